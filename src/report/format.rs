//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the model/solver code stays clean and testable
//! - output changes are localized

use std::path::Path;

use crate::domain::{ImpactScenario, Outcome, ParameterSet, RegionConfig};
use crate::io::format_sci;
use crate::region::RegionOutput;
use crate::solve::{
    CompositionRow, SweepFailure, SweepOutput, TargetSolution, VelocityContourRow, VelocitySolution,
};

/// Format the calibration block printed at the top of every run.
pub fn format_params(params: &ParameterSet) -> String {
    let mut out = String::new();
    out.push_str("Calibration:\n");
    out.push_str(&format!("  beta : b={} c={}\n", params.b, params.c));
    out.push_str(&format!(
        "  Q_RD*: rho0={:e} qg={:e} mu={}\n",
        params.rho0, params.qg, params.mu
    ));
    out.push_str(&format!(
        "  Z    : ZFei={} aFe={} bFe={} qsc={} bFEsc={}\n",
        params.z_fe_initial, params.a_fe, params.b_fe, params.q_sc, params.b_fe_sc
    ));
    out
}

/// Format the summary of a region scan.
pub fn format_region_summary(
    config: &RegionConfig,
    output: &RegionOutput,
    lower_path: &Path,
    upper_path: &Path,
) -> String {
    let mut out = String::new();

    out.push_str("=== impact - reachable fragment region ===\n");
    out.push_str(&format!("gamma: {}\n", config.mass_ratio));
    out.push_str(&format!(
        "Vi   : [{}, {}] km/s, n={}\n",
        config.velocity_min, config.velocity_max, config.velocity_steps
    ));
    out.push_str(&format!(
        "Mtarg: [{}, {}] M_E (log), n={}\n",
        config.target_mass_min, config.target_mass_max, config.target_mass_steps
    ));
    out.push_str(&format!(
        "Grid : {} points, {} evaluated{}\n",
        output.grid_points,
        output.samples.len() + output.failures.len(),
        if config.full_grid { " (full grid)" } else { " (edges only)" }
    ));
    if !output.failures.is_empty() {
        out.push_str(&format!("Failed points: {}\n", output.failures.len()));
        for f in output.failures.iter().take(10) {
            out.push_str(&format!(
                "  (i={}, j={}) Mtarg={:.4} Vi={:.3}: {}\n",
                f.i, f.j, f.target_mass, f.impact_velocity, f.error
            ));
        }
    }

    out.push('\n');
    for (label, curve, path) in [("upper", &output.upper, upper_path), ("lower", &output.lower, lower_path)] {
        let range = match (curve.points().first(), curve.points().last()) {
            (Some(a), Some(b)) => format!("Mlrg=[{:.4}, {:.4}]", a.fragment_mass, b.fragment_mass),
            _ => "empty".to_string(),
        };
        out.push_str(&format!(
            "{label}: {} points, {range} -> {}\n",
            curve.len(),
            path.display()
        ));
    }

    out
}

/// Format every forward-model quantity for one scenario.
pub fn format_outcome(scenario: &ImpactScenario, outcome: &Outcome) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Mtarg={} gamma={} Vi={}\n",
        scenario.target_mass(),
        scenario.mass_ratio(),
        scenario.impact_velocity()
    ));
    out.push_str(&format!("  Q_RD*        : {:.6}\n", outcome.disruption_energy));
    out.push_str(&format!("  Q_R          : {:.6}\n", outcome.impact_energy));
    out.push_str(&format!("  Q_R / Q_RD*  : {:.6}\n", outcome.energy_ratio));
    out.push_str(&format!("  beta         : {:.6}\n", outcome.retention));
    out.push_str(&format!("  Z            : {:.6}\n", outcome.iron_fraction));
    out.push_str(&format!("  Mlrg         : {:.6}\n", outcome.fragment_mass));
    out
}

pub fn format_target_solution(fragment_mass: f64, mass_ratio: f64, vi: f64, sol: &TargetSolution) -> String {
    format!(
        "Mlrg={fragment_mass} gamma={mass_ratio} Vi={vi}\n  Mtarg : {:.9}\n  Z     : {:.9}\n  ({} iterations)\n",
        sol.target_mass, sol.iron_fraction, sol.iterations
    )
}

pub fn format_velocity_solution(
    fragment_mass: f64,
    mass_ratio: f64,
    iron_fraction: f64,
    sol: &VelocitySolution,
) -> String {
    format!(
        "Mlrg={fragment_mass} gamma={mass_ratio} Z={iron_fraction}\n  Vi    : {:.9}\n  Mtarg : {:.9}\n  ({} iterations)\n",
        sol.impact_velocity, sol.target.target_mass, sol.iterations
    )
}

/// Whitespace table: `Z Mlrg Vi Mtarg`.
pub fn format_velocity_contours(output: &SweepOutput<VelocityContourRow>) -> String {
    let mut out = String::from("Z Mlrg Vi Mtarg\n");
    for r in &output.rows {
        out.push_str(&format!(
            "{} {} {} {}\n",
            r.iron_fraction,
            format_sci(r.fragment_mass),
            format_sci(r.impact_velocity),
            format_sci(r.target_mass)
        ));
    }
    out.push_str(&format_failures(&output.failures));
    out
}

/// Whitespace table: `Vi gamma Mlrg Z Mtarg`.
pub fn format_composition(output: &SweepOutput<CompositionRow>) -> String {
    let mut out = String::from("Vi gamma Mlrg Z Mtarg\n");
    for r in &output.rows {
        out.push_str(&format!(
            "{} {} {} {} {}\n",
            r.impact_velocity,
            r.mass_ratio,
            format_sci(r.fragment_mass),
            format_sci(r.iron_fraction),
            format_sci(r.target_mass)
        ));
    }
    out.push_str(&format_failures(&output.failures));
    out
}

fn format_failures(failures: &[SweepFailure]) -> String {
    if failures.is_empty() {
        return String::new();
    }
    let mut out = format!("# {} coordinates failed\n", failures.len());
    for f in failures {
        let fixed = match (f.impact_velocity, f.iron_fraction) {
            (Some(vi), _) => format!("Vi={vi}"),
            (None, Some(z)) => format!("Z={z}"),
            (None, None) => String::new(),
        };
        out.push_str(&format!(
            "# Mlrg={} gamma={} {fixed}: {}\n",
            format_sci(f.fragment_mass),
            f.mass_ratio,
            f.error
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{RootFailure, ScalingError};
    use crate::models::evaluate;

    #[test]
    fn outcome_lists_all_quantities() {
        let scenario = ImpactScenario::new(1.0, 1.0, 20.0).unwrap();
        let outcome = evaluate(&scenario, &ParameterSet::default()).unwrap();
        let text = format_outcome(&scenario, &outcome);
        assert!(text.contains("Q_R          : 50.000000"));
        assert!(text.contains("Mlrg"));
        assert!(text.contains("beta"));
    }

    #[test]
    fn sweep_table_appends_failures_as_comments() {
        let output = SweepOutput {
            rows: vec![CompositionRow {
                impact_velocity: 20.0,
                mass_ratio: 1.0,
                fragment_mass: 1.0,
                iron_fraction: 0.35,
                target_mass: 0.6,
            }],
            failures: vec![SweepFailure {
                fragment_mass: 1e10,
                mass_ratio: 1.0,
                impact_velocity: Some(20.0),
                iron_fraction: None,
                error: ScalingError::RootNotFound {
                    what: "target mass",
                    lower: 1e-6,
                    upper: 1e6,
                    reason: RootFailure::NoSignChange,
                },
            }],
        };
        let text = format_composition(&output);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Vi gamma Mlrg Z Mtarg");
        assert!(lines[1].starts_with("20 1 1.000000000000000e+00"));
        assert_eq!(lines[2], "# 1 coordinates failed");
        assert!(lines[3].contains("Vi=20") && lines[3].contains("no sign change"));
    }
}
