use log::{debug, info};
use rand::Rng;

use crate::boundary::apply_boundaries;
use crate::config::{ParamUpdate, SimConfig, SimulationParameters};
use crate::error::{LatticeError, Result};
use crate::field::Field;
use crate::lattice::LatticeState;
use crate::obstacle::Preset;
use crate::render::{render_vorticity, Frame};
use crate::solver;

/// Lattice Boltzmann Method Simulator for Computational Fluid Dynamics (CFD)
///
/// * a channel flowing left to right, fed by a free-stream inlet
/// * applies particle bounce-back to obstacles
///
/// between two sub-steps the current generation always satisfies the inlet
/// and outlet conditions, so every edit re-applies them
#[derive(Debug, Clone)]
pub struct Simulation {
    lattice: LatticeState,
    params: SimulationParameters,
    omega: f64,
}

impl Simulation {
    pub fn new(config: &SimConfig) -> Result<Self> {
        let params = config.parameters();
        params.validate()?;

        let mut lattice = LatticeState::new(config.width, config.height)?;
        lattice.set_preset(config.barrier);
        lattice.reset_to_equilibrium();

        let mut sim = Self {
            lattice,
            params,
            omega: params.omega(),
        };
        sim.pin_boundaries();

        info!(
            "lattice {}x{} started, viscosity {} (omega {:.4}), inlet speed {}",
            config.width, config.height, params.viscosity, sim.omega, params.inlet_speed
        );
        Ok(sim)
    }

    pub fn lattice(&self) -> &LatticeState {
        &self.lattice
    }

    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    /// relaxation rate currently in use
    pub fn omega(&self) -> f64 {
        self.omega
    }

    /// execute a given number of sub-steps of the simulation
    pub fn run(&mut self, steps: usize) {
        for _ in 0..steps {
            solver::step(&mut self.lattice, self.omega, self.params.inlet_speed);
        }
    }

    /// put the flow back at rest, keeping obstacles and parameters
    pub fn reset(&mut self) {
        self.lattice.reset_to_equilibrium();
        self.pin_boundaries();
        info!("flow reset to rest");
    }

    /// apply any subset of the parameters; nothing changes when the result
    /// would be unstable
    pub fn set_params(&mut self, update: &ParamUpdate) -> Result<()> {
        let params = self.params.updated(update)?;
        self.params = params;
        self.omega = params.omega();
        self.pin_boundaries();
        debug!("parameters updated: {:?} (omega {:.4})", params, self.omega);
        Ok(())
    }

    pub fn set_preset(&mut self, preset: Preset) {
        self.lattice.set_preset(preset);
        self.pin_boundaries();
        debug!("obstacle preset {:?}", preset);
    }

    pub fn paint_disc(&mut self, x: f64, y: f64, radius: f64) {
        self.lattice.paint_disc(x, y, radius);
        self.pin_boundaries();
    }

    pub fn perturb<R: Rng + ?Sized>(&mut self, amplitude: f64, rng: &mut R) -> Result<()> {
        if !amplitude.is_finite() {
            return Err(LatticeError::InvalidParameter {
                name: "perturbation amplitude",
                value: amplitude,
            });
        }
        self.lattice.perturb(amplitude, rng);
        self.pin_boundaries();
        Ok(())
    }

    pub fn field(&self) -> Field {
        Field::from_lattice(&self.lattice)
    }

    /// draw the vorticity of the latest generation into `frame`
    pub fn render(&self, frame: &mut Frame) -> Result<()> {
        render_vorticity(&self.lattice, self.params.contrast, frame)
    }

    fn pin_boundaries(&mut self) {
        apply_boundaries(&mut self.lattice, self.params.inlet_speed);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::d2q9::equilibrium_set;

    fn config(width: usize, height: usize) -> SimConfig {
        SimConfig {
            width,
            height,
            barrier: Preset::Empty,
            ..SimConfig::default()
        }
    }

    #[test]
    fn invalid_config_creates_nothing() {
        assert_eq!(
            Simulation::new(&config(0, 5)).unwrap_err(),
            LatticeError::InvalidDimensions { width: 0, height: 5 }
        );

        let unstable = SimConfig {
            viscosity: -0.1,
            ..config(10, 10)
        };
        assert!(matches!(
            Simulation::new(&unstable),
            Err(LatticeError::UnstableParameters { .. })
        ));
    }

    #[test]
    fn rejected_update_keeps_state() {
        let mut sim = Simulation::new(&config(10, 10)).unwrap();
        let omega = sim.omega();

        let update = ParamUpdate {
            viscosity: Some(0.0),
            ..ParamUpdate::default()
        };
        assert!(sim.set_params(&update).is_err());
        assert_eq!(sim.omega(), omega);
        assert_eq!(sim.params().viscosity, 0.02);

        let update = ParamUpdate {
            viscosity: Some(0.1),
            ..ParamUpdate::default()
        };
        sim.set_params(&update).unwrap();
        assert!((sim.omega() - 1.0 / 0.8).abs() < 1e-12);
    }

    #[test]
    fn inlet_speed_change_is_visible_before_the_next_step() {
        let mut sim = Simulation::new(&config(10, 6)).unwrap();
        sim.set_params(&ParamUpdate {
            inlet_speed: Some(0.05),
            ..ParamUpdate::default()
        })
        .unwrap();

        let eq = equilibrium_set(1.0, (0.05, 0.0));
        for y in 0..6 {
            assert_eq!(sim.lattice().cell(sim.lattice().index(0, y)), eq);
        }
    }

    #[test]
    fn reset_keeps_obstacles() {
        let mut sim = Simulation::new(&config(30, 20)).unwrap();
        sim.paint_disc(15.0, 10.0, 2.0);
        let solid = sim.lattice().mask().count();
        sim.run(10);
        sim.reset();

        assert_eq!(sim.lattice().mask().count(), solid);
        let i = sim.lattice().index(20, 10);
        assert_eq!(sim.lattice().cell(i), equilibrium_set(1.0, (0.0, 0.0)));
    }

    #[test]
    fn switching_presets_keeps_the_flow_finite() {
        let mut sim = Simulation::new(&SimConfig::default()).unwrap();
        sim.run(60);
        sim.set_preset(Preset::Line);
        sim.run(6);

        let mut frame = Frame::new(200, 100);
        sim.render(&mut frame).unwrap();

        // (60, 50) sat inside the circle and is fluid again
        let (rho, _) = sim.lattice().macroscopic(sim.lattice().index(60, 50));
        assert!(rho > 0.5 && rho < 1.5, "rho = {rho}");
        assert_ne!(frame.pixel(60, 50), crate::render::OBSTACLE_COLOR);
        assert_eq!(frame.pixel(66, 30), crate::render::OBSTACLE_COLOR);
    }

    #[test]
    fn contrast_only_changes_the_picture() {
        let mut sim = Simulation::new(&config(50, 30)).unwrap();
        sim.paint_disc(15.0, 15.0, 3.0);
        sim.run(100);
        let mut dim = Frame::new(50, 30);
        sim.render(&mut dim).unwrap();
        let before = sim.lattice().clone();

        sim.set_params(&ParamUpdate {
            contrast: Some(30.0),
            ..ParamUpdate::default()
        })
        .unwrap();
        let mut bright = Frame::new(50, 30);
        sim.render(&mut bright).unwrap();

        assert_eq!(sim.params().contrast, 30.0);
        assert_eq!(sim.lattice().current(), before.current());
        assert_ne!(dim.pixels(), bright.pixels());
    }
}
