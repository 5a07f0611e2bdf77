//! Property-based tests for the forward model and its inversions using proptest.
//!
//! Scenario ranges keep the energy ratio between roughly 0.1 and 2, where the
//! iron fraction is neither pinned at its initial value nor saturated at 1.

use approx::relative_eq;
use proptest::prelude::*;

use crate::domain::{ImpactScenario, ParameterSet};
use crate::models::{evaluate, iron_fraction, retention_coefficient};
use crate::solve::InverseSolver;

fn parameter_set() -> impl Strategy<Value = ParameterSet> {
    (0.5f64..1.9, -10.0f64..-1.0, 0.1f64..0.5, 0.05f64..0.4, 1.0f64..3.0, 0.5f64..3.0, 1.0f64..10.0).prop_map(
        |(b, c, z_fe_initial, a_fe, b_fe, q_sc, b_fe_sc)| ParameterSet {
            b,
            c,
            z_fe_initial,
            a_fe,
            b_fe,
            q_sc,
            b_fe_sc,
            ..ParameterSet::default()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Both piecewise laws meet at their thresholds for any calibration.
    #[test]
    fn prop_piecewise_laws_are_continuous(p in parameter_set()) {
        let below = p.q_sc * (1.0 - 1e-13);
        let z_lo = iron_fraction(below, &p);
        let z_hi = iron_fraction(p.q_sc, &p);
        prop_assert!(relative_eq!(z_lo, z_hi, max_relative = 1e-9), "Z: {z_lo} vs {z_hi}");

        let below = p.b * (1.0 - 1e-13);
        let beta_lo = retention_coefficient(below, &p);
        let beta_hi = retention_coefficient(p.b, &p);
        prop_assert!(relative_eq!(beta_lo, beta_hi, max_relative = 1e-9), "beta: {beta_lo} vs {beta_hi}");
    }

    /// The remnant never outweighs target plus impactor.
    #[test]
    fn prop_fragment_mass_is_bounded_by_total_mass(
        target_mass in 1e-3f64..1e3,
        mass_ratio in 1e-2f64..1.0,
        vi in 1.0f64..200.0,
    ) {
        let scenario = ImpactScenario::new(target_mass, mass_ratio, vi).unwrap();
        let out = evaluate(&scenario, &ParameterSet::default()).unwrap();
        prop_assert!(out.fragment_mass <= scenario.total_mass() * (1.0 + 1e-12));
        prop_assert!(out.iron_fraction >= 0.3 && out.iron_fraction <= 1.0);
    }

    #[test]
    fn prop_target_mass_round_trip(
        target_mass in 0.1f64..10.0,
        mass_ratio in 0.1f64..1.0,
        vi in 10.0f64..100.0,
    ) {
        let params = ParameterSet::default();
        let scenario = ImpactScenario::new(target_mass, mass_ratio, vi).unwrap();
        let forward = evaluate(&scenario, &params).unwrap();

        let sol = InverseSolver::new(params)
            .target_mass_and_iron_fraction(forward.fragment_mass, mass_ratio, vi)
            .unwrap();
        prop_assert!(
            relative_eq!(sol.target_mass, target_mass, max_relative = 1e-6),
            "solved {} expected {}", sol.target_mass, target_mass
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn prop_impact_velocity_round_trip(
        target_mass in 0.5f64..5.0,
        mass_ratio in 0.5f64..1.0,
        vi in 15.0f64..35.0,
    ) {
        let params = ParameterSet::default();
        let scenario = ImpactScenario::new(target_mass, mass_ratio, vi).unwrap();
        let forward = evaluate(&scenario, &params).unwrap();

        let sol = InverseSolver::new(params)
            .impact_velocity(forward.fragment_mass, mass_ratio, forward.iron_fraction)
            .unwrap();
        prop_assert!(
            relative_eq!(sol.impact_velocity, vi, max_relative = 1e-4),
            "solved {} expected {}", sol.impact_velocity, vi
        );
    }
}
