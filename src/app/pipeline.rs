//! Region scan pipeline shared by the CLI and library callers.
//!
//! grid scan -> envelope curves -> lower.txt / upper.txt

use std::path::PathBuf;

use crate::domain::{ParameterSet, RegionConfig};
use crate::error::AppError;
use crate::io::write_region_tables;
use crate::region::{RegionOutput, trace_region};

/// All outputs of a single `impact region` run.
#[derive(Debug, Clone)]
pub struct RegionRun {
    pub output: RegionOutput,
    pub lower_path: PathBuf,
    pub upper_path: PathBuf,
}

/// Scan the grid, then persist both envelope curves into `config.out_dir`.
pub fn run_region(config: &RegionConfig, params: &ParameterSet) -> Result<RegionRun, AppError> {
    let output = trace_region(config, params)?;
    let (lower_path, upper_path) = write_region_tables(&config.out_dir, &output)?;

    Ok(RegionRun {
        output,
        lower_path,
        upper_path,
    })
}
