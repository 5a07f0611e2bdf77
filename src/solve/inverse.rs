//! Inverse problems: infer the collision from the observed remnant.
//!
//! - `target_mass_and_iron_fraction`: given `(M_lrg, γ, V_i)`, find the target mass
//!   for which the forward model produces `M_lrg`, then report its `Z`.
//! - `impact_velocity`: given `(M_lrg, γ, Z)`, find `V_i` such that the target-mass
//!   solve above yields `Z`.
//!
//! The second solve treats the first as a black box, so every velocity trial runs
//! a full nested Brent solve. Costs multiply accordingly.

use tracing::debug;

use crate::domain::{ImpactScenario, Outcome, ParameterSet};
use crate::error::{ScalingError, ScalingResult, require_finite, require_positive};
use crate::math::{SolverOptions, brent};
use crate::models::{evaluate, target_mass_from_fragment};

/// Search interval for the target mass [M_E].
pub const TARGET_MASS_BRACKET: (f64, f64) = (1e-6, 1e6);

/// Search interval for the impact velocity [km/s].
pub const VELOCITY_BRACKET: (f64, f64) = (0.01, 1e3);

/// Self-consistent target mass for an observed remnant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetSolution {
    pub target_mass: f64,
    pub iron_fraction: f64,
    /// Forward model re-evaluated at `target_mass`.
    pub outcome: Outcome,
    pub iterations: usize,
}

/// Impact velocity reproducing an observed remnant mass and composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocitySolution {
    pub impact_velocity: f64,
    /// Target-mass solve at `impact_velocity`.
    pub target: TargetSolution,
    pub iterations: usize,
}

/// Bracketed solvers over the forward model for a fixed calibration.
#[derive(Debug, Clone, Copy)]
pub struct InverseSolver {
    params: ParameterSet,
    options: SolverOptions,
}

impl InverseSolver {
    pub fn new(params: ParameterSet) -> Self {
        Self::with_options(params, SolverOptions::default())
    }

    pub fn with_options(params: ParameterSet, options: SolverOptions) -> Self {
        Self { params, options }
    }

    /// Find the target mass that yields `fragment_mass`, and the remnant's iron fraction.
    pub fn target_mass_and_iron_fraction(
        &self,
        fragment_mass: f64,
        mass_ratio: f64,
        vi: f64,
    ) -> ScalingResult<TargetSolution> {
        require_positive("fragment_mass", fragment_mass)?;
        require_positive("mass_ratio", mass_ratio)?;
        require_positive("impact_velocity", vi)?;

        let params = &self.params;
        let residual = |m: f64| target_mass_from_fragment(m, fragment_mass, mass_ratio, vi, params) - m;
        let (lower, upper) = TARGET_MASS_BRACKET;
        let root = brent("target mass", residual, lower, upper, &self.options)?;
        debug!(
            fragment_mass,
            mass_ratio,
            vi,
            target_mass = root.x,
            iterations = root.iterations,
            "target mass converged"
        );

        let target_mass = require_finite("target mass", root.x)?;
        let outcome = evaluate(&ImpactScenario::new(target_mass, mass_ratio, vi)?, params)?;
        Ok(TargetSolution {
            target_mass,
            iron_fraction: outcome.iron_fraction,
            outcome,
            iterations: root.iterations,
        })
    }

    /// Find the impact velocity for which a remnant of `fragment_mass` has `iron_fraction`.
    ///
    /// A failure of a nested target-mass solve at any trial velocity is returned as-is.
    pub fn impact_velocity(
        &self,
        fragment_mass: f64,
        mass_ratio: f64,
        iron_fraction: f64,
    ) -> ScalingResult<VelocitySolution> {
        require_positive("fragment_mass", fragment_mass)?;
        require_positive("mass_ratio", mass_ratio)?;
        require_positive("iron_fraction", iron_fraction)?;

        let mut nested_error: Option<ScalingError> = None;
        let residual = |vi: f64| match self.target_mass_and_iron_fraction(fragment_mass, mass_ratio, vi) {
            Ok(solution) => solution.iron_fraction - iron_fraction,
            Err(err) => {
                nested_error.get_or_insert(err);
                f64::NAN
            }
        };
        let (lower, upper) = VELOCITY_BRACKET;
        let result = brent("impact velocity", residual, lower, upper, &self.options);
        let root = match (result, nested_error) {
            (_, Some(err)) => return Err(err),
            (result, None) => result?,
        };
        debug!(
            fragment_mass,
            mass_ratio,
            iron_fraction,
            vi = root.x,
            iterations = root.iterations,
            "impact velocity converged"
        );

        let target = self.target_mass_and_iron_fraction(fragment_mass, mass_ratio, root.x)?;
        Ok(VelocitySolution {
            impact_velocity: root.x,
            target,
            iterations: root.iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RootFailure;
    use crate::models::{energy_ratio, fragment_mass, iron_fraction};
    use approx::assert_relative_eq;

    fn solver() -> InverseSolver {
        InverseSolver::new(ParameterSet::default())
    }

    #[test]
    fn recovers_target_mass_of_reference_scenario() {
        let p = ParameterSet::default();
        let mlrg = fragment_mass(1.0, 1.0, 20.0, &p);
        let sol = solver().target_mass_and_iron_fraction(mlrg, 1.0, 20.0).unwrap();

        assert_relative_eq!(sol.target_mass, 1.0, max_relative = 1e-6);
        assert_relative_eq!(sol.iron_fraction, 0.338, max_relative = 0.02);
        assert_relative_eq!(sol.outcome.fragment_mass, mlrg, max_relative = 1e-9);
        assert!(sol.iterations <= 100);
    }

    #[test]
    fn recovers_target_mass_in_supercatastrophic_regime() {
        let p = ParameterSet::default();
        let (m, gamma, vi) = (0.2, 1.0, 80.0);
        assert!(energy_ratio(m, gamma, vi, &p) > p.b);
        let mlrg = fragment_mass(m, gamma, vi, &p);
        let sol = solver().target_mass_and_iron_fraction(mlrg, gamma, vi).unwrap();
        assert_relative_eq!(sol.target_mass, m, max_relative = 1e-6);
    }

    #[test]
    fn recovers_impact_velocity() {
        let p = ParameterSet::default();
        let (m, gamma, vi) = (1.0, 1.0, 30.0);
        let mlrg = fragment_mass(m, gamma, vi, &p);
        let z = iron_fraction(energy_ratio(m, gamma, vi, &p), &p);

        let sol = solver().impact_velocity(mlrg, gamma, z).unwrap();
        assert_relative_eq!(sol.impact_velocity, vi, max_relative = 1e-4);
        assert_relative_eq!(sol.target.target_mass, m, max_relative = 1e-4);
    }

    #[test]
    fn unreachable_fragment_mass_has_no_root() {
        let err = solver().target_mass_and_iron_fraction(1e10, 1.0, 20.0).unwrap_err();
        assert!(matches!(
            err,
            ScalingError::RootNotFound { reason: RootFailure::NoSignChange, .. }
        ));
    }

    #[test]
    fn unreachable_iron_fraction_has_no_root() {
        // Z never drops below the initial iron fraction.
        let err = solver().impact_velocity(1.0, 1.0, 0.25).unwrap_err();
        assert!(matches!(err, ScalingError::RootNotFound { what: "impact velocity", .. }));
    }

    #[test]
    fn non_positive_inputs_are_rejected_before_solving() {
        let err = solver().target_mass_and_iron_fraction(1.0, 0.0, 20.0).unwrap_err();
        assert!(matches!(err, ScalingError::InvalidParameter { name: "mass_ratio", .. }));
        let err = solver().impact_velocity(-1.0, 1.0, 0.5).unwrap_err();
        assert!(matches!(err, ScalingError::InvalidParameter { name: "fragment_mass", .. }));
    }

    #[test]
    fn tight_iteration_cap_surfaces_as_root_not_found() {
        let opts = SolverOptions {
            max_iterations: 2,
            ..SolverOptions::default()
        };
        let solver = InverseSolver::with_options(ParameterSet::default(), opts);
        let err = solver.target_mass_and_iron_fraction(1.756, 1.0, 20.0).unwrap_err();
        assert!(matches!(
            err,
            ScalingError::RootNotFound { reason: RootFailure::IterationLimit, .. }
        ));
    }
}
