//! Input/output helpers.
//!
//! - envelope table write/read (`table`)
//! - calibration JSON ingest (`params`)

pub mod params;
pub mod table;

pub use params::*;
pub use table::*;
