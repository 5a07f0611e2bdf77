//! `impact-region` library crate.
//!
//! Empirical scaling law for the largest remnant of a collision between two
//! planetary bodies: forward evaluation, root-finding inversions, and the scan
//! of the reachable (fragment mass, iron fraction) region.
//!
//! The binary (`impact`) is a thin wrapper around this library so that the
//! model and solvers are testable without spawning processes.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod models;
pub mod region;
pub mod report;
pub mod solve;
