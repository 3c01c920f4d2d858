use crate::boundary::apply_boundaries;
use crate::d2q9::{macroscopic, site_equilibrium, NDIR, SITE_REV, SITE_VECS};
use crate::lattice::LatticeState;

/// relaxation rate of the BGK operator for a kinematic viscosity,
/// `ω = 1 / (3ν + 1/2)`
#[inline]
pub fn relaxation_rate(viscosity: f64) -> f64 {
    1.0 / (3.0 * viscosity + 0.5)
}

/// collision and streaming of one sub-step, from the current generation into
/// the next one.
///
/// every fluid cell is relaxed toward its local equilibrium:
///
/// ```math
/// f' = f + ω (F_eq - f)
/// ```
///
/// and the relaxed values are pushed to the neighbouring cell along each
/// site vector. values leaving the lattice are dropped (the open boundaries
/// refill those columns), and values heading into an obstacle are reflected
/// into the reversed site of the cell they came from.
pub fn collide_and_stream(lattice: &mut LatticeState, omega: f64) {
    let width = lattice.width() as isize;
    let height = lattice.height() as isize;
    let (current, next, mask) = lattice.split_mut();

    for y in 0..height {
        for x in 0..width {
            let i = (y * width + x) as usize;

            // obstacle cells never hold fluid, they only reflect their neighbours
            if mask.is_obstacle(i) {
                continue;
            }

            let f = current.cell(i);
            let (rho, u) = macroscopic(&f);

            for k in 0..NDIR {
                let relaxed = f[k] + omega * (site_equilibrium(k, rho, u) - f[k]);

                let (vx, vy) = SITE_VECS[k];
                let x_new = x + vx as isize;
                let y_new = y + vy as isize;
                if x_new < 0 || x_new >= width || y_new < 0 || y_new >= height {
                    continue;
                }

                let i_new = (y_new * width + x_new) as usize;
                if mask.is_obstacle(i_new) {
                    next.set(SITE_REV[k], i, relaxed);
                } else {
                    next.set(k, i_new, relaxed);
                }
            }
        }
    }
}

/// one full sub-step: collide and stream, hand the written generation over to
/// the read side, then pin the inlet and outlet columns of it so the next
/// collision pass reads a boundary-consistent state
pub fn step(lattice: &mut LatticeState, omega: f64, u0: f64) {
    collide_and_stream(lattice, omega);
    lattice.swap();
    apply_boundaries(lattice, u0);
}
