//! Collision scaling-law model.
//!
//! The model is implemented as small, pure functions so that the solvers and the
//! grid scan can stay generic.

pub mod scaling;

pub use scaling::*;
