//! Batch inverse solves over a log-spaced fragment-mass axis.
//!
//! Two sweeps are provided:
//!
//! - velocity contours: `V_i(M_lrg)` for a fixed `γ` and a list of iron fractions
//! - composition curves: `Z(M_lrg)` and `M_targ(M_lrg)` for lists of `γ` and `V_i`
//!
//! Each coordinate is solved independently (parallel). A coordinate whose solve
//! fails is recorded in `failures` and the sweep continues. Row order follows the
//! input lists, outermost list first, fragment mass innermost.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::domain::SweepConfig;
use crate::error::{ScalingError, ScalingResult, require_positive};
use crate::math::log_space;
use crate::solve::InverseSolver;

/// One point of a velocity contour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocityContourRow {
    pub iron_fraction: f64,
    pub mass_ratio: f64,
    pub fragment_mass: f64,
    pub impact_velocity: f64,
    pub target_mass: f64,
}

/// One point of a composition curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositionRow {
    pub impact_velocity: f64,
    pub mass_ratio: f64,
    pub fragment_mass: f64,
    pub iron_fraction: f64,
    pub target_mass: f64,
}

/// A coordinate that could not be solved.
#[derive(Debug, Clone, PartialEq)]
pub struct SweepFailure {
    pub fragment_mass: f64,
    pub mass_ratio: f64,
    /// Fixed velocity (composition sweep only).
    pub impact_velocity: Option<f64>,
    /// Requested iron fraction (velocity sweep only).
    pub iron_fraction: Option<f64>,
    pub error: ScalingError,
}

#[derive(Debug, Clone, Default)]
pub struct SweepOutput<R> {
    pub rows: Vec<R>,
    pub failures: Vec<SweepFailure>,
}

impl<R> SweepOutput<R> {
    fn from_results(results: Vec<Result<R, SweepFailure>>) -> Self {
        let mut out = SweepOutput {
            rows: Vec::with_capacity(results.len()),
            failures: Vec::new(),
        };
        for result in results {
            match result {
                Ok(row) => out.rows.push(row),
                Err(failure) => {
                    warn!(
                        fragment_mass = failure.fragment_mass,
                        mass_ratio = failure.mass_ratio,
                        impact_velocity = ?failure.impact_velocity,
                        iron_fraction = ?failure.iron_fraction,
                        error = %failure.error,
                        "sweep coordinate failed"
                    );
                    out.failures.push(failure);
                }
            }
        }
        out
    }
}

/// Solve `V_i` for every `(Z, M_lrg)` pair.
pub fn velocity_contours(
    solver: &InverseSolver,
    config: &SweepConfig,
    mass_ratio: f64,
    iron_fractions: &[f64],
) -> ScalingResult<SweepOutput<VelocityContourRow>> {
    config.validate()?;
    require_positive("gamma", mass_ratio)?;
    require_list("Z", iron_fractions)?;
    let masses = log_space(
        config.fragment_mass_min,
        config.fragment_mass_max,
        config.fragment_mass_steps,
    )?;

    let coords: Vec<(f64, f64)> = iron_fractions
        .iter()
        .flat_map(|&z| masses.iter().map(move |&m| (z, m)))
        .collect();
    info!(points = coords.len(), mass_ratio, "running velocity contour sweep");

    let results: Vec<Result<VelocityContourRow, SweepFailure>> = coords
        .par_iter()
        .map(|&(z, mlrg)| {
            solver
                .impact_velocity(mlrg, mass_ratio, z)
                .map(|sol| VelocityContourRow {
                    iron_fraction: z,
                    mass_ratio,
                    fragment_mass: mlrg,
                    impact_velocity: sol.impact_velocity,
                    target_mass: sol.target.target_mass,
                })
                .map_err(|error| SweepFailure {
                    fragment_mass: mlrg,
                    mass_ratio,
                    impact_velocity: None,
                    iron_fraction: Some(z),
                    error,
                })
        })
        .collect();

    Ok(SweepOutput::from_results(results))
}

/// Solve `(Z, M_targ)` for every `(V_i, γ, M_lrg)` triple.
pub fn composition_curves(
    solver: &InverseSolver,
    config: &SweepConfig,
    mass_ratios: &[f64],
    velocities: &[f64],
) -> ScalingResult<SweepOutput<CompositionRow>> {
    config.validate()?;
    require_list("gamma", mass_ratios)?;
    require_list("Vi", velocities)?;
    let masses = log_space(
        config.fragment_mass_min,
        config.fragment_mass_max,
        config.fragment_mass_steps,
    )?;

    let mut coords = Vec::with_capacity(velocities.len() * mass_ratios.len() * masses.len());
    for &vi in velocities {
        for &gamma in mass_ratios {
            coords.extend(masses.iter().map(|&m| (vi, gamma, m)));
        }
    }
    info!(points = coords.len(), "running composition sweep");

    let results: Vec<Result<CompositionRow, SweepFailure>> = coords
        .par_iter()
        .map(|&(vi, gamma, mlrg)| {
            solver
                .target_mass_and_iron_fraction(mlrg, gamma, vi)
                .map(|sol| CompositionRow {
                    impact_velocity: vi,
                    mass_ratio: gamma,
                    fragment_mass: mlrg,
                    iron_fraction: sol.iron_fraction,
                    target_mass: sol.target_mass,
                })
                .map_err(|error| SweepFailure {
                    fragment_mass: mlrg,
                    mass_ratio: gamma,
                    impact_velocity: Some(vi),
                    iron_fraction: None,
                    error,
                })
        })
        .collect();

    Ok(SweepOutput::from_results(results))
}

fn require_list(name: &'static str, values: &[f64]) -> ScalingResult<()> {
    if values.is_empty() {
        return Err(ScalingError::invalid(name, f64::NAN, "list must not be empty"));
    }
    for &v in values {
        require_positive(name, v)?;
    }
    Ok(())
}
