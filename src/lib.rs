//! D2Q9 Lattice Boltzmann channel flow with a pull-based frame worker.
//!
//! The solver evolves two generations of nine distribution fields with BGK
//! collision, push streaming and bounce-back off obstacles. The left edge is
//! pinned to a free stream, the right edge is open, and the vorticity of the
//! result is rendered into RGBA frames handed out by a [`worker`] thread.

pub mod boundary;
pub mod config;
pub mod d2q9;
pub mod error;
pub mod field;
pub mod lattice;
pub mod obstacle;
pub mod render;
pub mod simulation;
pub mod solver;
pub mod worker;

pub use config::{ParamUpdate, SimConfig, SimulationParameters};
pub use d2q9::{equilibrium, NDIR};
pub use error::{LatticeError, Result};
pub use field::Field;
pub use lattice::{DistributionSet, LatticeState};
pub use obstacle::{Boundary, ObstacleMask, Preset};
pub use render::Frame;
pub use simulation::Simulation;
pub use worker::{Command, Event, WorkerHandle};
