use rand::Rng;

use crate::d2q9::{equilibrium_set, macroscopic, NDIR, WEIGHTS};
use crate::error::{LatticeError, Result};
use crate::obstacle::{ObstacleMask, Preset};

/// One generation of the nine distribution fields, stored as parallel arrays.
#[derive(Debug, Clone, PartialEq)]
pub struct DistributionSet {
    f: [Vec<f64>; NDIR],
}

impl DistributionSet {
    /// zeroed fields for `len` cells
    pub fn new(len: usize) -> Self {
        Self {
            f: std::array::from_fn(|_| vec![0.0; len]),
        }
    }

    pub fn len(&self) -> usize {
        self.f[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.f[0].is_empty()
    }

    #[inline]
    pub fn get(&self, k: usize, i: usize) -> f64 {
        self.f[k][i]
    }

    #[inline]
    pub fn set(&mut self, k: usize, i: usize, value: f64) {
        self.f[k][i] = value;
    }

    /// the nine distributions of cell `i`
    #[inline]
    pub fn cell(&self, i: usize) -> [f64; NDIR] {
        std::array::from_fn(|k| self.f[k][i])
    }

    #[inline]
    pub fn set_cell(&mut self, i: usize, values: &[f64; NDIR]) {
        for (field, &v) in self.f.iter_mut().zip(values.iter()) {
            field[i] = v;
        }
    }

    /// the `k`-th field over every cell
    pub fn field(&self, k: usize) -> &[f64] {
        &self.f[k]
    }
}

/// Double-buffered lattice state: the generation being read, the generation
/// being written, and the obstacle mask shared by both.
#[derive(Debug, Clone)]
pub struct LatticeState {
    width: usize,
    height: usize,
    current: DistributionSet,
    next: DistributionSet,
    mask: ObstacleMask,
}

impl LatticeState {
    /// allocate two zeroed generations and an empty mask
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(LatticeError::InvalidDimensions { width, height });
        }
        let size = width
            .checked_mul(height)
            .ok_or(LatticeError::InvalidDimensions { width, height })?;

        Ok(Self {
            width,
            height,
            current: DistributionSet::new(size),
            next: DistributionSet::new(size),
            mask: ObstacleMask::new(width, height),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn current(&self) -> &DistributionSet {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut DistributionSet {
        &mut self.current
    }

    pub fn next(&self) -> &DistributionSet {
        &self.next
    }

    pub fn mask(&self) -> &ObstacleMask {
        &self.mask
    }

    pub fn mask_mut(&mut self) -> &mut ObstacleMask {
        &mut self.mask
    }

    /// nine distributions of cell `i` in the current generation
    #[inline]
    pub fn cell(&self, i: usize) -> [f64; NDIR] {
        self.current.cell(i)
    }

    /// borrow the generation to read from, the generation to write into and the
    /// mask at once, so a sub-step can never alias the two generations
    pub(crate) fn split_mut(&mut self) -> (&DistributionSet, &mut DistributionSet, &ObstacleMask) {
        (&self.current, &mut self.next, &self.mask)
    }

    /// exchange the roles of the two generations
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.current, &mut self.next);
    }

    /// put every fluid cell of both generations at rest with unit density.
    ///
    /// the next generation is filled as well so the slots streaming never
    /// reaches at the lattice edge hold rest values rather than zeros
    pub fn reset_to_equilibrium(&mut self) {
        for i in 0..self.len() {
            if self.mask.is_obstacle(i) {
                continue;
            }
            self.current.set_cell(i, &WEIGHTS);
            self.next.set_cell(i, &WEIGHTS);
        }
    }

    /// fill every fluid cell of the current generation with the equilibrium
    /// for the given density and velocity
    pub fn fill_equilibrium(&mut self, rho: f64, u: (f64, f64)) {
        let eq = equilibrium_set(rho, u);
        for i in 0..self.len() {
            if !self.mask.is_obstacle(i) {
                self.current.set_cell(i, &eq);
            }
        }
    }

    /// density and velocity of cell `i` in the current generation
    #[inline]
    pub fn macroscopic(&self, i: usize) -> (f64, (f64, f64)) {
        macroscopic(&self.current.cell(i))
    }

    /// total density over the fluid cells of the current generation
    pub fn total_density(&self) -> f64 {
        (0..self.len())
            .filter(|&i| !self.mask.is_obstacle(i))
            .map(|i| self.current.cell(i).iter().sum::<f64>())
            .sum()
    }

    /// replace the obstacles with a canonical layout.
    ///
    /// cells the old layout covered and the new one frees hold no fluid, so
    /// they come back at rest in both generations
    pub fn set_preset(&mut self, preset: Preset) {
        let old = self.mask.clone();
        self.mask.set_preset(preset);
        for i in 0..self.len() {
            if old.is_obstacle(i) && !self.mask.is_obstacle(i) {
                self.current.set_cell(i, &WEIGHTS);
                self.next.set_cell(i, &WEIGHTS);
            }
        }
    }

    pub fn paint_disc(&mut self, cx: f64, cy: f64, radius: f64) {
        self.mask.paint_disc(cx, cy, radius);
    }

    /// add random noise to every distribution of every fluid cell, scaled by
    /// the site weight so the rest state stays the dominant contribution
    pub fn perturb<R: Rng + ?Sized>(&mut self, amplitude: f64, rng: &mut R) {
        for i in 0..self.len() {
            if self.mask.is_obstacle(i) {
                continue;
            }
            let mut f = self.current.cell(i);
            for (k, s) in f.iter_mut().enumerate() {
                *s += amplitude * WEIGHTS[k] * rng.gen_range(-1.0..=1.0);
            }
            self.current.set_cell(i, &f);
        }
    }
}
