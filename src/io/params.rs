//! Load a calibration from JSON.
//!
//! The file holds one object with the ten constants under their calibration names:
//!
//! ```json
//! { "b": 1.2645, "c": -8.1214, "rho0": 5.972e-12, "qg": 1.3299e-05, "mu": 0.6164,
//!   "ZFei": 0.3, "aFe": 0.2099, "bFe": 2.1516, "qsc": 1.2645, "bFEsc": 6.489 }
//! ```

use std::fs::File;
use std::path::Path;

use tracing::info;

use crate::domain::ParameterSet;
use crate::error::AppError;

/// Read and validate a parameter JSON file.
pub fn read_params_json(path: &Path) -> Result<ParameterSet, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open parameter JSON '{}': {e}", path.display())))?;
    let params: ParameterSet = serde_json::from_reader(file)
        .map_err(|e| AppError::new(2, format!("Invalid parameter JSON '{}': {e}", path.display())))?;
    params.validate()?;

    info!(path = %path.display(), "loaded calibration constants");
    Ok(params)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_a_written_calibration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("params.json");
        let custom = ParameterSet {
            mu: 0.55,
            ..ParameterSet::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&custom).unwrap()).unwrap();

        let loaded = read_params_json(&path).unwrap();
        assert_eq!(loaded, custom);
    }

    #[test]
    fn missing_field_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "b": 1.2645, "c": -8.1214 }}"#).unwrap();
        let err = read_params_json(file.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Invalid parameter JSON"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        let bad = ParameterSet {
            q_sc: -1.0,
            ..ParameterSet::default()
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", serde_json::to_string(&bad).unwrap()).unwrap();
        let err = read_params_json(file.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("qsc"));
    }
}
