//! Inverse solves of the scaling law.
//!
//! Responsibilities:
//!
//! - single-query inversions (target mass, impact velocity)
//! - parallel batch sweeps with per-coordinate failure records

pub mod inverse;
pub mod sweep;

#[cfg(test)]
mod proptest_inverse;

pub use inverse::*;
pub use sweep::*;
