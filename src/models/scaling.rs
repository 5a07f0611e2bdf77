//! Forward evaluation of the collision scaling law.
//!
//! The chain is:
//!
//! ```text
//! (M_targ, γ, V_i) -> Q_RD*  (disruption energy of the combined body)
//!                  -> Q_R    (specific impact energy)
//!                  -> Q_R / Q_RD*
//!                  -> β (retention), Z (iron fraction)
//!                  -> M_lrg = (1 + γ) β M_targ
//! ```
//!
//! Both `β` and `Z` are piecewise in the energy ratio. Each outer branch is
//! scaled so that it meets the inner branch at the threshold (`b` for `β`,
//! `q_sc` for `Z`), making both functions continuous.
//!
//! The free functions are unchecked formulas over positive inputs. `evaluate`
//! is the checked entry point used by the grid scan and the solvers.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::domain::{ImpactScenario, Outcome, ParameterSet};
use crate::error::{ScalingResult, require_finite};

/// Catastrophic disruption energy `Q_RD*` for the combined body.
pub fn disruption_energy(target_mass: f64, mass_ratio: f64, vi: f64, params: &ParameterSet) -> f64 {
    let rc = (3.0 * (1.0 + mass_ratio) * target_mass / (4.0 * PI * params.rho0)).cbrt();
    params.qg * rc.powf(3.0 * params.mu) * vi.powf(2.0 - 3.0 * params.mu)
}

/// Specific impact energy `Q_R = ½ γ / (1 + γ)² V_i²`.
pub fn impact_energy(mass_ratio: f64, vi: f64) -> f64 {
    0.5 * mass_ratio / (1.0 + mass_ratio).powi(2) * vi * vi
}

/// `Q_R / Q_RD*`.
pub fn energy_ratio(target_mass: f64, mass_ratio: f64, vi: f64, params: &ParameterSet) -> f64 {
    impact_energy(mass_ratio, vi) / disruption_energy(target_mass, mass_ratio, vi, params)
}

/// Iron mass fraction of the largest remnant.
pub fn iron_fraction(ratio: f64, params: &ParameterSet) -> f64 {
    if ratio < params.q_sc {
        params.z_fe_initial + params.a_fe * ratio.powf(params.b_fe)
    } else {
        let a_fe_sc = 1.0 - params.z_at_threshold();
        1.0 - a_fe_sc * (-params.b_fe_sc * (ratio - params.q_sc)).exp()
    }
}

/// Fraction `β` of the combined mass kept in the largest remnant.
pub fn retention_coefficient(ratio: f64, params: &ParameterSet) -> f64 {
    if ratio < params.b {
        cosine_taper(ratio)
    } else {
        cosine_taper(params.b) / params.b.powf(params.c) * ratio.powf(params.c)
    }
}

fn cosine_taper(ratio: f64) -> f64 {
    0.5 * (ratio * FRAC_PI_2).cos() + 0.5
}

/// Largest-remnant mass `M_lrg = (1 + γ) β M_targ`.
pub fn fragment_mass(target_mass: f64, mass_ratio: f64, vi: f64, params: &ParameterSet) -> f64 {
    let ratio = energy_ratio(target_mass, mass_ratio, vi, params);
    (1.0 + mass_ratio) * retention_coefficient(ratio, params) * target_mass
}

/// Target mass implied by `fragment_mass` when `β` is evaluated at `candidate_target_mass`.
///
/// This is one half of a fixed-point relation: the result equals the candidate only
/// at the self-consistent target mass. Use `solve::solve_target_mass` to find it.
pub fn target_mass_from_fragment(
    candidate_target_mass: f64,
    fragment_mass: f64,
    mass_ratio: f64,
    vi: f64,
    params: &ParameterSet,
) -> f64 {
    let ratio = energy_ratio(candidate_target_mass, mass_ratio, vi, params);
    fragment_mass / ((1.0 + mass_ratio) * retention_coefficient(ratio, params))
}

/// Evaluate every forward-model quantity for one scenario.
///
/// Fails with `NumericOverflow` if any quantity is NaN or infinite.
pub fn evaluate(scenario: &ImpactScenario, params: &ParameterSet) -> ScalingResult<Outcome> {
    let (m, gamma, vi) = (scenario.target_mass(), scenario.mass_ratio(), scenario.impact_velocity());

    let disruption_energy = require_finite("disruption energy", disruption_energy(m, gamma, vi, params))?;
    let impact_energy = require_finite("impact energy", impact_energy(gamma, vi))?;
    let energy_ratio = require_finite("energy ratio", impact_energy / disruption_energy)?;
    let retention = require_finite("retention coefficient", retention_coefficient(energy_ratio, params))?;
    let iron_fraction = require_finite("iron fraction", iron_fraction(energy_ratio, params))?;
    let fragment_mass = require_finite("fragment mass", (1.0 + gamma) * retention * m)?;

    Ok(Outcome {
        disruption_energy,
        impact_energy,
        energy_ratio,
        retention,
        iron_fraction,
        fragment_mass,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params() -> ParameterSet {
        ParameterSet::default()
    }

    #[test]
    fn reference_scenario_matches_published_values() {
        let p = params();
        let scenario = ImpactScenario::new(1.0, 1.0, 20.0).unwrap();
        let out = evaluate(&scenario, &p).unwrap();

        assert_relative_eq!(out.disruption_energy, 110.2, max_relative = 0.02);
        assert_relative_eq!(out.impact_energy, 50.0, max_relative = 1e-12);
        assert_relative_eq!(out.energy_ratio, 0.454, max_relative = 0.02);
        assert_relative_eq!(out.iron_fraction, 0.338, max_relative = 0.02);
        assert_relative_eq!(out.fragment_mass, 1.756, max_relative = 0.02);
    }

    #[test]
    fn free_functions_agree_with_evaluate() {
        let p = params();
        let scenario = ImpactScenario::new(2.5, 0.25, 45.0).unwrap();
        let out = evaluate(&scenario, &p).unwrap();

        assert_eq!(out.energy_ratio, energy_ratio(2.5, 0.25, 45.0, &p));
        assert_relative_eq!(out.fragment_mass, fragment_mass(2.5, 0.25, 45.0, &p), max_relative = 1e-15);
        assert_eq!(out.iron_fraction, iron_fraction(out.energy_ratio, &p));
    }

    #[test]
    fn iron_fraction_is_continuous_at_supercatastrophic_threshold() {
        let p = params();
        let below = iron_fraction(p.q_sc * (1.0 - 1e-13), &p);
        let at = iron_fraction(p.q_sc, &p);
        assert_relative_eq!(below, at, max_relative = 1e-9);
    }

    #[test]
    fn retention_is_continuous_at_branch_point() {
        let p = params();
        let below = retention_coefficient(p.b * (1.0 - 1e-13), &p);
        let at = retention_coefficient(p.b, &p);
        assert_relative_eq!(below, at, max_relative = 1e-9);
    }

    #[test]
    fn retention_tapers_from_one_and_decays_past_threshold() {
        let p = params();
        assert_relative_eq!(retention_coefficient(0.0, &p), 1.0);
        let mut prev = retention_coefficient(1e-3, &p);
        for r in [0.1, 0.5, 1.0, 1.2, 1.3, 2.0, 5.0, 20.0] {
            let beta = retention_coefficient(r, &p);
            assert!(beta < prev, "beta should decrease: beta({r})={beta} prev={prev}");
            assert!(beta > 0.0);
            prev = beta;
        }
    }

    #[test]
    fn iron_fraction_stays_between_initial_value_and_one() {
        let p = params();
        for r in [1e-6, 0.01, 0.3, 1.0, 1.2645, 1.5, 3.0] {
            let z = iron_fraction(r, &p);
            assert!(z >= p.z_fe_initial && z < 1.0, "Z({r}) = {z}");
        }
    }

    #[test]
    fn target_mass_from_fragment_is_fixed_point_of_forward_model() {
        let p = params();
        let (m, gamma, vi) = (3.0, 0.5, 35.0);
        let mlrg = fragment_mass(m, gamma, vi, &p);
        let back = target_mass_from_fragment(m, mlrg, gamma, vi, &p);
        assert_relative_eq!(back, m, max_relative = 1e-12);
    }

    #[test]
    fn overflowing_inputs_are_reported() {
        let p = ParameterSet {
            qg: 1e-320,
            ..params()
        };
        let scenario = ImpactScenario::new(1.0, 1.0, 20.0).unwrap();
        let err = evaluate(&scenario, &p).unwrap_err();
        assert!(matches!(err, crate::error::ScalingError::NumericOverflow { .. }));
    }
}
