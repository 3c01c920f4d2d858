//! The D2Q9 velocity set and its second-order equilibrium.
//!
//! ```text
//!   6   2   5
//!    \  |  /
//!   3 - 0 - 1
//!    /  |  \
//!   7   4   8
//! ```

/// Number of points that exist in the 2D lattice based on the D2Q9 scheme
pub const NDIR: usize = 9;

/// discrete velocities of the sites in the D2Q9 lattice scheme
pub const SITE_VECS: [(i32, i32); NDIR] = [
    (0, 0),   // rest
    (1, 0),   // east
    (0, 1),   // north
    (-1, 0),  // west
    (0, -1),  // south
    (1, 1),   // north-east
    (-1, 1),  // north-west
    (-1, -1), // south-west
    (1, -1),  // south-east
];

/// weights of sites in the D2Q9 lattice scheme
pub const WEIGHTS: [f64; NDIR] = [
    4.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 9.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
    1.0 / 36.0,
];

/// reversed lattice directions used for bounce-back
pub const SITE_REV: [usize; NDIR] = [0, 3, 4, 1, 2, 7, 8, 5, 6];

pub(crate) trait Dot<T> {
    /// Compute the dot product of two vector-like objects
    fn dot(self, other: Self) -> T;
}

impl<T> Dot<T> for (T, T)
where
    T: std::ops::Mul<Output = T> + std::ops::Add<Output = T>,
{
    fn dot(self, other: Self) -> T {
        self.0 * other.0 + self.1 * other.1
    }
}

/// Equilibrium value of a single site:
///
/// ```math
/// F_eq = w * ρ * ( 1 + 3(c⋅u) + (9/2)(c⋅u)^2 - (3/2)(u⋅u) )
/// ```
#[inline]
pub fn equilibrium(weight: f64, cx: f64, cy: f64, rho: f64, ux: f64, uy: f64) -> f64 {
    let u = (ux, uy);
    let cu = (cx, cy).dot(u);
    weight * rho * (1.0 + 3.0 * cu + 4.5 * cu * cu - 1.5 * u.dot(u))
}

/// equilibrium of site `k` for the given density and velocity
#[inline]
pub fn site_equilibrium(k: usize, rho: f64, u: (f64, f64)) -> f64 {
    let (cx, cy) = SITE_VECS[k];
    equilibrium(WEIGHTS[k], cx as f64, cy as f64, rho, u.0, u.1)
}

/// all nine equilibrium values for the given density and velocity
pub fn equilibrium_set(rho: f64, u: (f64, f64)) -> [f64; NDIR] {
    std::array::from_fn(|k| site_equilibrium(k, rho, u))
}

/// recover `ρ` (density) and `u` (velocity) from the nine distributions of a cell.
///
/// the velocity is reported as zero for an empty cell rather than dividing by zero
#[inline]
pub fn macroscopic(f: &[f64; NDIR]) -> (f64, (f64, f64)) {
    let rho: f64 = f.iter().sum();

    let (mx, my) = f
        .iter()
        .zip(SITE_VECS.iter())
        .fold((0.0, 0.0), |(mx, my), (s, &(cx, cy))| {
            (mx + cx as f64 * s, my + cy as f64 * s)
        });

    if rho == 0.0 {
        (rho, (0.0, 0.0))
    } else {
        (rho, (mx / rho, my / rho))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn weights_sum_to_one() {
        assert_abs_diff_eq!(WEIGHTS.iter().sum::<f64>(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn reversed_sites_point_backwards() {
        for k in 0..NDIR {
            let (cx, cy) = SITE_VECS[k];
            let (rx, ry) = SITE_VECS[SITE_REV[k]];
            assert_eq!((cx + rx, cy + ry), (0, 0));
            assert_eq!(SITE_REV[SITE_REV[k]], k);
            assert_eq!(WEIGHTS[k], WEIGHTS[SITE_REV[k]]);
        }
    }

    #[test]
    fn equilibrium_sums_to_density() {
        for &rho in &[0.5, 1.0, 1.3, 2.0] {
            for &u in &[(0.0, 0.0), (0.1, 0.0), (-0.05, 0.08), (0.2, -0.15)] {
                let sum: f64 = equilibrium_set(rho, u).iter().sum();
                assert_abs_diff_eq!(sum, rho, epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn equilibrium_carries_momentum() {
        let rho = 1.2;
        let u = (0.07, -0.03);
        let (r, (ux, uy)) = macroscopic(&equilibrium_set(rho, u));
        assert_abs_diff_eq!(r, rho, epsilon = 1e-12);
        assert_abs_diff_eq!(ux, u.0, epsilon = 1e-12);
        assert_abs_diff_eq!(uy, u.1, epsilon = 1e-12);
    }

    #[test]
    fn rest_equilibrium_is_the_weights() {
        let eq = equilibrium_set(1.0, (0.0, 0.0));
        for k in 0..NDIR {
            assert_abs_diff_eq!(eq[k], WEIGHTS[k], epsilon = 1e-15);
        }
    }

    #[test]
    fn empty_cell_has_no_velocity() {
        assert_eq!(macroscopic(&[0.0; NDIR]), (0.0, (0.0, 0.0)));
    }
}
