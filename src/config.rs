use serde::Deserialize;

use crate::error::{LatticeError, Result};
use crate::obstacle::Preset;
use crate::solver::relaxation_rate;

/// Everything needed to start a simulation.
///
/// missing fields fall back to [`SimConfig::default`] when deserialised
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    pub width: usize,
    pub height: usize,
    pub viscosity: f64,
    pub inlet_speed: f64,
    pub contrast: f64,
    pub barrier: Preset,
    /// solver sub-steps between two emitted frames
    pub steps_per_frame: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 200,
            height: 100,
            viscosity: 0.02,
            inlet_speed: 0.1,
            contrast: 3.0,
            barrier: Preset::Circle,
            steps_per_frame: 6,
        }
    }
}

impl SimConfig {
    pub fn parameters(&self) -> SimulationParameters {
        SimulationParameters {
            viscosity: self.viscosity,
            inlet_speed: self.inlet_speed,
            contrast: self.contrast,
        }
    }
}

/// Physical and display parameters which may change between sub-steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationParameters {
    pub viscosity: f64,
    pub inlet_speed: f64,
    pub contrast: f64,
}

impl SimulationParameters {
    pub fn omega(&self) -> f64 {
        relaxation_rate(self.viscosity)
    }

    /// reject parameters the solver cannot run stably with
    pub fn validate(&self) -> Result<()> {
        let omega = self.omega();
        if !self.viscosity.is_finite() || !(omega > 0.0 && omega < 2.0) {
            return Err(LatticeError::UnstableParameters {
                viscosity: self.viscosity,
                omega,
            });
        }
        if !self.inlet_speed.is_finite() {
            return Err(LatticeError::InvalidParameter {
                name: "inlet speed",
                value: self.inlet_speed,
            });
        }
        if !self.contrast.is_finite() {
            return Err(LatticeError::InvalidParameter {
                name: "contrast",
                value: self.contrast,
            });
        }
        Ok(())
    }

    /// the parameters after applying `update`, validated as a whole
    pub fn updated(&self, update: &ParamUpdate) -> Result<Self> {
        let params = Self {
            viscosity: update.viscosity.unwrap_or(self.viscosity),
            inlet_speed: update.inlet_speed.unwrap_or(self.inlet_speed),
            contrast: update.contrast.unwrap_or(self.contrast),
        };
        params.validate()?;
        Ok(params)
    }
}

/// Partial parameter change; absent fields keep their value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ParamUpdate {
    pub viscosity: Option<f64>,
    pub inlet_speed: Option<f64>,
    pub contrast: Option<f64>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_are_stable() {
        let params = SimConfig::default().parameters();
        assert!(params.validate().is_ok());
        assert!(params.omega() > 1.7 && params.omega() < 1.8);
    }

    #[test]
    fn zero_and_negative_viscosity_are_unstable() {
        for viscosity in [0.0, -0.01, -0.5, f64::NAN] {
            let params = SimulationParameters {
                viscosity,
                ..SimConfig::default().parameters()
            };
            assert!(matches!(
                params.validate(),
                Err(LatticeError::UnstableParameters { .. })
            ));
        }
    }

    #[test]
    fn update_is_all_or_nothing() {
        let params = SimConfig::default().parameters();
        let update = ParamUpdate {
            viscosity: Some(0.05),
            inlet_speed: Some(f64::INFINITY),
            contrast: None,
        };
        assert_eq!(
            params.updated(&update),
            Err(LatticeError::InvalidParameter {
                name: "inlet speed",
                value: f64::INFINITY
            })
        );

        let update = ParamUpdate {
            contrast: Some(5.0),
            ..ParamUpdate::default()
        };
        let params = params.updated(&update).unwrap();
        assert_eq!(params.contrast, 5.0);
        assert_eq!(params.viscosity, 0.02);
    }

    #[test]
    fn partial_config_deserialises() {
        let config: SimConfig =
            serde_json::from_str(r#"{ "width": 50, "height": 30, "barrier": "line" }"#).unwrap();
        assert_eq!(config.width, 50);
        assert_eq!(config.height, 30);
        assert_eq!(config.barrier, Preset::Line);
        assert_eq!(config.steps_per_frame, 6);

        let update: ParamUpdate = serde_json::from_str(r#"{ "viscosity": 0.01 }"#).unwrap();
        assert_eq!(update.viscosity, Some(0.01));
        assert_eq!(update.inlet_speed, None);
    }
}
