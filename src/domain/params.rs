//! Calibration constants of the scaling law.
//!
//! The ten constants are grouped by the formula that consumes them:
//!
//! - `b`, `c`: largest-remnant retention `beta(Q_R / Q_RD*)`
//! - `rho0`, `qg`, `mu`: catastrophic disruption energy `Q_RD*`
//! - `z_fe_initial`, `a_fe`, `b_fe`, `q_sc`, `b_fe_sc`: iron mass fraction `Z(Q_R / Q_RD*)`
//!
//! Units follow the calibration: masses in Earth masses, velocities in km/s.
//! `qg` is expressed in that unit system rather than cgs and must be used as-is.

use serde::{Deserialize, Serialize};

use crate::error::{ScalingError, ScalingResult};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ParameterSet {
    pub b: f64,
    pub c: f64,

    pub rho0: f64,
    pub qg: f64,
    pub mu: f64,

    #[serde(rename = "ZFei")]
    pub z_fe_initial: f64,
    #[serde(rename = "aFe")]
    pub a_fe: f64,
    #[serde(rename = "bFe")]
    pub b_fe: f64,
    #[serde(rename = "qsc")]
    pub q_sc: f64,
    #[serde(rename = "bFEsc")]
    pub b_fe_sc: f64,
}

impl ParameterSet {
    /// The published calibration.
    pub const REINHARDT: ParameterSet = ParameterSet {
        b: 1.2645,
        c: -8.1214,
        rho0: 5.972e-12,
        qg: 1.3299e-05,
        mu: 0.6164,
        z_fe_initial: 0.3,
        a_fe: 0.2099,
        b_fe: 2.1516,
        q_sc: 1.2645,
        b_fe_sc: 6.4890,
    };

    /// Check a set loaded from outside the crate.
    ///
    /// The thresholds and density appear as bases of fractional powers or as
    /// divisors, so they must be strictly positive.
    pub fn validate(&self) -> ScalingResult<()> {
        let all = [
            ("b", self.b),
            ("c", self.c),
            ("rho0", self.rho0),
            ("qg", self.qg),
            ("mu", self.mu),
            ("ZFei", self.z_fe_initial),
            ("aFe", self.a_fe),
            ("bFe", self.b_fe),
            ("qsc", self.q_sc),
            ("bFEsc", self.b_fe_sc),
        ];
        for (name, value) in all {
            if !value.is_finite() {
                return Err(ScalingError::invalid(name, value, "calibration constant must be finite"));
            }
        }
        for (name, value) in [("b", self.b), ("rho0", self.rho0), ("qg", self.qg), ("qsc", self.q_sc)] {
            if value <= 0.0 {
                return Err(ScalingError::invalid(name, value, "calibration constant must be > 0"));
            }
        }
        Ok(())
    }

    /// Iron fraction reached at the supercatastrophic threshold `q_sc`.
    pub fn z_at_threshold(&self) -> f64 {
        self.z_fe_initial + self.a_fe * self.q_sc.powf(self.b_fe)
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self::REINHARDT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_the_published_set() {
        let p = ParameterSet::default();
        assert_eq!(p.b, 1.2645);
        assert_eq!(p.c, -8.1214);
        assert_eq!(p.qg, 1.3299e-05);
        assert_eq!(p.b_fe_sc, 6.4890);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn validate_rejects_non_positive_density() {
        let p = ParameterSet {
            rho0: 0.0,
            ..ParameterSet::default()
        };
        let err = p.validate().unwrap_err();
        assert!(matches!(err, ScalingError::InvalidParameter { name: "rho0", .. }));
    }

    #[test]
    fn json_uses_calibration_names() {
        let json = serde_json::to_string(&ParameterSet::default()).unwrap();
        assert!(json.contains("\"ZFei\":0.3"));
        assert!(json.contains("\"bFEsc\":6.489"));
        let back: ParameterSet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ParameterSet::default());
    }
}
