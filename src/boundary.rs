//! Open boundaries of the channel: a pinned free-stream inlet on the left
//! edge and a zero-gradient outlet on the right edge.
//!
//! Both passes act on the current generation, which is the one the next
//! collision pass will read.

use crate::d2q9::equilibrium_set;
use crate::lattice::LatticeState;

/// overwrite every fluid cell of column `x = 0` with the equilibrium of unit
/// density moving at `(u0, 0)`
pub fn apply_inlet(lattice: &mut LatticeState, u0: f64) {
    let eq = equilibrium_set(1.0, (u0, 0.0));

    for y in 0..lattice.height() {
        let i = lattice.index(0, y);
        if lattice.mask().is_obstacle(i) {
            continue;
        }
        lattice.current_mut().set_cell(i, &eq);
    }
}

/// copy all nine distributions of column `width - 2` into column `width - 1`
pub fn apply_outlet(lattice: &mut LatticeState) {
    let width = lattice.width();
    if width < 2 {
        return;
    }

    for y in 0..lattice.height() {
        let src = lattice.index(width - 2, y);
        let dst = lattice.index(width - 1, y);
        let f = lattice.current().cell(src);
        lattice.current_mut().set_cell(dst, &f);
    }
}

/// inlet, then outlet
pub fn apply_boundaries(lattice: &mut LatticeState, u0: f64) {
    apply_inlet(lattice, u0);
    apply_outlet(lattice);
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::d2q9::NDIR;

    #[test]
    fn inlet_pins_fluid_cells_only() {
        let mut lattice = LatticeState::new(6, 4).unwrap();
        lattice.paint_disc(0.0, 2.0, 0.0);
        lattice.reset_to_equilibrium();

        apply_inlet(&mut lattice, 0.1);

        let eq = equilibrium_set(1.0, (0.1, 0.0));
        for y in 0..4 {
            let i = lattice.index(0, y);
            if y == 2 {
                assert_eq!(lattice.cell(i), [0.0; NDIR]);
            } else {
                assert_eq!(lattice.cell(i), eq);
            }
        }
        // the rest of the lattice is untouched
        assert_eq!(lattice.cell(lattice.index(1, 0)), equilibrium_set(1.0, (0.0, 0.0)));
    }

    #[test]
    fn outlet_copies_the_neighbouring_column() {
        let mut lattice = LatticeState::new(5, 3).unwrap();
        for y in 0..3 {
            let i = lattice.index(3, y);
            let f: [f64; NDIR] = std::array::from_fn(|k| (k + 10 * y) as f64);
            lattice.current_mut().set_cell(i, &f);
        }

        apply_outlet(&mut lattice);

        for y in 0..3 {
            assert_eq!(
                lattice.cell(lattice.index(4, y)),
                lattice.cell(lattice.index(3, y))
            );
        }
    }

    #[test]
    fn outlet_needs_two_columns() {
        let mut lattice = LatticeState::new(1, 3).unwrap();
        lattice.reset_to_equilibrium();
        apply_outlet(&mut lattice);
        assert_eq!(lattice.cell(0), equilibrium_set(1.0, (0.0, 0.0)));
    }
}
