use crate::error::{LatticeError, Result};
use crate::lattice::LatticeState;

/// Macroscopic fields recovered from the current generation of a lattice.
///
/// obstacle cells report zero density and zero velocity
#[derive(Debug, Clone)]
pub struct Field {
    pub width: usize,
    pub height: usize,
    /// density at each lattice site
    pub rho: Vec<f64>,
    /// velocity at each lattice site
    pub u: Vec<(f64, f64)>,
}

impl Field {
    pub fn from_lattice(lattice: &LatticeState) -> Self {
        let len = lattice.len();
        let mut rho = vec![0.0; len];
        let mut u = vec![(0.0, 0.0); len];

        for i in 0..len {
            if lattice.mask().is_obstacle(i) {
                continue;
            }
            let (r, v) = lattice.macroscopic(i);
            rho[i] = r;
            u[i] = v;
        }

        Self {
            width: lattice.width(),
            height: lattice.height(),
            rho,
            u,
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// central-difference curl of the velocity, `∂uy/∂x - ∂ux/∂y`.
    ///
    /// only defined for interior cells; border cells report zero
    pub fn vorticity(&self, x: usize, y: usize) -> f64 {
        if x == 0 || y == 0 || x + 1 >= self.width || y + 1 >= self.height {
            return 0.0;
        }
        let duy_dx = (self.u[self.index(x + 1, y)].1 - self.u[self.index(x - 1, y)].1) / 2.0;
        let dux_dy = (self.u[self.index(x, y + 1)].0 - self.u[self.index(x, y - 1)].0) / 2.0;
        duy_dx - dux_dy
    }

    /// fail on the first fluid cell whose density has collapsed or whose
    /// state is no longer finite
    pub fn check_finite(&self, lattice: &LatticeState) -> Result<()> {
        for (i, (&rho, &(ux, uy))) in self.rho.iter().zip(self.u.iter()).enumerate() {
            if lattice.mask().is_obstacle(i) {
                continue;
            }
            if !(rho.is_finite() && rho > 0.0 && ux.is_finite() && uy.is_finite()) {
                return Err(LatticeError::Diverged {
                    x: i % self.width,
                    y: i / self.width,
                });
            }
        }
        Ok(())
    }

    /// mean velocity over the fluid cells of a rectangular window
    pub fn mean_velocity(&self, xs: std::ops::Range<usize>, ys: std::ops::Range<usize>) -> (f64, f64) {
        let mut sum = (0.0, 0.0);
        let mut count = 0usize;
        for y in ys {
            for x in xs.clone() {
                let i = self.index(x, y);
                if self.rho[i] == 0.0 {
                    continue;
                }
                sum.0 += self.u[i].0;
                sum.1 += self.u[i].1;
                count += 1;
            }
        }
        if count == 0 {
            (0.0, 0.0)
        } else {
            (sum.0 / count as f64, sum.1 / count as f64)
        }
    }
}
