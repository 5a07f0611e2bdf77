//! Reachable-region scan over (target mass × impact velocity).

pub mod envelope;

pub use envelope::*;
