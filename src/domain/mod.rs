//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the calibration constants (`ParameterSet`)
//! - collision scenarios and their forward-model outcomes
//! - grid samples and envelope curves of the region scan

pub mod params;
pub mod types;

pub use params::*;
pub use types::*;
