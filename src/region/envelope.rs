//! Reachable (fragment mass, iron fraction) region for a fixed mass ratio.
//!
//! The scan covers a `NMtarg × NVi` grid: target mass log-spaced, impact velocity
//! linearly spaced. The boundary of the reachable region is traced by the grid
//! edges alone:
//!
//! - upper curve: smallest target mass row ∪ slowest velocity column
//! - lower curve: largest target mass row ∪ fastest velocity column
//!
//! so interior points are only evaluated when a full scatter cloud is requested.
//! Grid points are evaluated in parallel; curves are assembled afterwards in grid
//! order, which keeps the output deterministic.

use rayon::prelude::*;
use tracing::{info, warn};

use crate::domain::{
    EdgeSet, EnvelopeCurve, EnvelopePoint, GridSample, ImpactScenario, ParameterSet, RegionConfig,
};
use crate::error::{ScalingError, ScalingResult};
use crate::math::{lin_space, log_space};
use crate::models::evaluate;

/// A grid point whose forward evaluation failed.
#[derive(Debug, Clone, PartialEq)]
pub struct GridFailure {
    pub i: usize,
    pub j: usize,
    pub target_mass: f64,
    pub impact_velocity: f64,
    pub error: ScalingError,
}

/// All computed outputs of a region scan.
#[derive(Debug, Clone)]
pub struct RegionOutput {
    /// Evaluated grid points in row-major order (edges only unless `full_grid`).
    pub samples: Vec<GridSample>,
    pub upper: EnvelopeCurve,
    pub lower: EnvelopeCurve,
    pub failures: Vec<GridFailure>,
    /// Size of the full grid, evaluated or not.
    pub grid_points: usize,
}

/// Scan the grid described by `config` and extract both envelope curves.
pub fn trace_region(config: &RegionConfig, params: &ParameterSet) -> ScalingResult<RegionOutput> {
    config.validate()?;

    let masses = log_space(config.target_mass_min, config.target_mass_max, config.target_mass_steps)?;
    let velocities = lin_space(config.velocity_min, config.velocity_max, config.velocity_steps)?;
    let (n_target, n_velocity) = (masses.len(), velocities.len());

    let coords: Vec<(usize, usize, EdgeSet)> = (0..n_target)
        .flat_map(|i| (0..n_velocity).map(move |j| (i, j, EdgeSet::classify(i, j, n_target, n_velocity))))
        .filter(|&(_, _, edges)| config.full_grid || !edges.is_interior())
        .collect();
    info!(
        mass_ratio = config.mass_ratio,
        grid_points = n_target * n_velocity,
        evaluated = coords.len(),
        full_grid = config.full_grid,
        "scanning collision grid"
    );

    let results: Vec<Result<GridSample, GridFailure>> = coords
        .par_iter()
        .map(|&(i, j, edges)| {
            let (m, vi) = (masses[i], velocities[j]);
            let fail = |error| GridFailure {
                i,
                j,
                target_mass: m,
                impact_velocity: vi,
                error,
            };
            let scenario = ImpactScenario::new(m, config.mass_ratio, vi).map_err(fail)?;
            let outcome = evaluate(&scenario, params).map_err(fail)?;
            Ok(GridSample {
                i,
                j,
                scenario,
                edges,
                outcome,
            })
        })
        .collect();

    let mut samples = Vec::with_capacity(results.len());
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(sample) => samples.push(sample),
            Err(failure) => {
                warn!(
                    i = failure.i,
                    j = failure.j,
                    target_mass = failure.target_mass,
                    impact_velocity = failure.impact_velocity,
                    error = %failure.error,
                    "grid point skipped"
                );
                failures.push(failure);
            }
        }
    }

    let (upper, lower) = envelope_curves(&samples);
    info!(upper = upper.len(), lower = lower.len(), failed = failures.len(), "envelope assembled");

    Ok(RegionOutput {
        samples,
        upper,
        lower,
        failures,
        grid_points: n_target * n_velocity,
    })
}

/// Split edge samples into the upper and lower boundary curves.
///
/// Interior samples are ignored. A corner sample on one upper and one lower edge
/// lands in both curves.
pub fn envelope_curves(samples: &[GridSample]) -> (EnvelopeCurve, EnvelopeCurve) {
    let point = |s: &GridSample| EnvelopePoint {
        fragment_mass: s.outcome.fragment_mass,
        iron_fraction: s.outcome.iron_fraction,
    };
    let upper = samples.iter().filter(|s| s.edges.is_upper()).map(point).collect();
    let lower = samples.iter().filter(|s| s.edges.is_lower()).map(point).collect();
    (EnvelopeCurve::from_unsorted(upper), EnvelopeCurve::from_unsorted(lower))
}
