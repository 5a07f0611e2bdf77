//! Mathematical utilities: bracketed root finding and sample axes.

pub mod brent;
pub mod spacing;

pub use brent::*;
pub use spacing::*;
