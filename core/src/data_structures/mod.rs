//! Core data structures

pub mod residual;

pub use self::residual::{EdgeHandle, ResidualEdge, ResidualNetwork};
