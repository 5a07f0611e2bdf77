//! Envelope tables (`lower.txt` / `upper.txt`).
//!
//! Format:
//!
//! ```text
//! Mlarg Z
//! 1.756000000000000e+00 3.380000000000000e-01
//! ...
//! ```
//!
//! One point per line in ascending fragment mass, both values in scientific
//! notation with 15 digits after the point and a signed, at least two-digit exponent.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::{EnvelopeCurve, EnvelopePoint};
use crate::error::AppError;
use crate::region::RegionOutput;

pub const TABLE_HEADER: &str = "Mlarg Z";
pub const LOWER_FILE: &str = "lower.txt";
pub const UPPER_FILE: &str = "upper.txt";

/// Write both envelope curves into `dir`. Returns the `(lower, upper)` paths.
pub fn write_region_tables(dir: &Path, output: &RegionOutput) -> Result<(PathBuf, PathBuf), AppError> {
    std::fs::create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create output dir '{}': {e}", dir.display())))?;

    let lower = dir.join(LOWER_FILE);
    let upper = dir.join(UPPER_FILE);
    write_envelope_table(&lower, &output.lower)?;
    write_envelope_table(&upper, &output.upper)?;
    Ok((lower, upper))
}

/// Write a single envelope table.
pub fn write_envelope_table(path: &Path, curve: &EnvelopeCurve) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create table '{}': {e}", path.display())))?;
    let mut out = BufWriter::new(file);
    let write_err = |e: std::io::Error| AppError::new(2, format!("Failed to write table '{}': {e}", path.display()));

    writeln!(out, "{TABLE_HEADER}").map_err(write_err)?;
    for p in curve.points() {
        writeln!(out, "{} {}", format_sci(p.fragment_mass), format_sci(p.iron_fraction)).map_err(write_err)?;
    }
    out.flush().map_err(write_err)?;

    info!(path = %path.display(), points = curve.len(), "wrote envelope table");
    Ok(())
}

/// Read an envelope table written by `write_envelope_table`.
pub fn read_envelope_table(path: &Path) -> Result<EnvelopeCurve, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open table '{}': {e}", path.display())))?;
    let mut lines = BufReader::new(file).lines();

    let header = lines
        .next()
        .transpose()
        .map_err(|e| AppError::new(2, format!("Failed to read table '{}': {e}", path.display())))?;
    if header.as_deref().map(str::trim) != Some(TABLE_HEADER) {
        return Err(AppError::new(
            2,
            format!("Table '{}' must start with the header '{TABLE_HEADER}'.", path.display()),
        ));
    }

    let mut points = Vec::new();
    for (idx, line) in lines.enumerate() {
        let line = line.map_err(|e| AppError::new(2, format!("Failed to read table '{}': {e}", path.display())))?;
        if line.trim().is_empty() {
            continue;
        }
        let row = idx + 2;
        let mut fields = line.split_whitespace().map(str::parse::<f64>);
        match (fields.next(), fields.next(), fields.next()) {
            (Some(Ok(fragment_mass)), Some(Ok(iron_fraction)), None) => points.push(EnvelopePoint {
                fragment_mass,
                iron_fraction,
            }),
            _ => {
                return Err(AppError::new(
                    2,
                    format!("Table '{}' line {row}: expected two numbers, got '{line}'.", path.display()),
                ));
            }
        }
    }

    Ok(EnvelopeCurve::from_unsorted(points))
}

/// Format like C's `%.15e` (`1.500000000000000e-03`).
pub fn format_sci(value: f64) -> String {
    let s = format!("{value:.15e}");
    match s.split_once('e') {
        Some((mantissa, exp)) => {
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.abs())
        }
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sci_format_matches_printf() {
        assert_eq!(format_sci(1.756), "1.756000000000000e+00");
        assert_eq!(format_sci(0.0015), "1.500000000000000e-03");
        assert_eq!(format_sci(123456.0), "1.234560000000000e+05");
        assert_eq!(format_sci(2.5e-120), "2.500000000000000e-120");
        assert_eq!(format_sci(0.0), "0.000000000000000e+00");
    }

    #[test]
    fn table_has_header_and_one_line_per_point() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.txt");
        let curve = EnvelopeCurve::from_unsorted(vec![
            EnvelopePoint { fragment_mass: 2.0, iron_fraction: 0.4 },
            EnvelopePoint { fragment_mass: 0.5, iron_fraction: 0.9 },
        ]);
        write_envelope_table(&path, &curve).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Mlarg Z");
        assert_eq!(lines[1], "5.000000000000000e-01 9.000000000000000e-01");
        assert_eq!(lines[2], "2.000000000000000e+00 4.000000000000000e-01");
        assert_eq!(lines.len(), 3);

        let back = read_envelope_table(&path).unwrap();
        assert_eq!(back, curve);
    }

    #[test]
    fn reader_rejects_missing_header() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "1.0 0.5").unwrap();
        let err = read_envelope_table(file.path()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
