use thiserror::Error;

/// Failures surfaced by the lattice, the simulation and the frame worker.
///
/// Solver and boundary passes never fail; everything here is detected either
/// while validating configuration or while extracting a frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LatticeError {
    #[error("invalid lattice dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("viscosity {viscosity} gives relaxation rate {omega}, outside (0, 2)")]
    UnstableParameters { viscosity: f64, omega: f64 },

    #[error("invalid {name}: {value}")]
    InvalidParameter { name: &'static str, value: f64 },

    #[error("simulation diverged at cell ({x}, {y})")]
    Diverged { x: usize, y: usize },

    #[error("no lattice has been started")]
    NotStarted,
}

pub type Result<T> = std::result::Result<T, LatticeError>;
