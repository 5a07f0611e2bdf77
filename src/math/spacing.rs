//! Sample axes for grid scans and sweeps.
//!
//! Velocity is scanned on a linear axis, masses on a logarithmic one.
//! Both include their endpoints exactly.

use crate::domain::types::validate_steps;
use crate::error::{ScalingError, ScalingResult, require_positive};

/// Generate `steps` evenly spaced points between `min` and `max` (inclusive).
pub fn lin_space(min: f64, max: f64, steps: usize) -> ScalingResult<Vec<f64>> {
    check_range(min, max, steps)?;

    let step = (max - min) / (steps as f64 - 1.0);
    let mut out: Vec<f64> = (0..steps).map(|i| min + step * i as f64).collect();
    out[steps - 1] = max;
    Ok(out)
}

/// Generate `steps` log-spaced points between `min` and `max` (inclusive).
pub fn log_space(min: f64, max: f64, steps: usize) -> ScalingResult<Vec<f64>> {
    check_range(min, max, steps)?;

    let ln_min = min.ln();
    let ln_max = max.ln();
    let step = (ln_max - ln_min) / (steps as f64 - 1.0);

    let mut out: Vec<f64> = (0..steps).map(|i| (ln_min + step * i as f64).exp()).collect();
    out[0] = min;
    out[steps - 1] = max;
    Ok(out)
}

fn check_range(min: f64, max: f64, steps: usize) -> ScalingResult<()> {
    require_positive("min", min)?;
    require_positive("max", max)?;
    if max < min {
        return Err(ScalingError::invalid("max", max, "range is inverted (max < min)"));
    }
    validate_steps("steps", steps)
}
