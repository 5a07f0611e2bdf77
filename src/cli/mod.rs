//! Command-line parsing for the collision scaling-law tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the model/solver code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::math::SolverOptions;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "impact",
    version,
    about = "Largest-fragment mass and iron fraction of planetary collisions"
)]
pub struct Cli {
    /// Calibration JSON replacing the published constants.
    #[arg(long, global = true, value_name = "JSON")]
    pub params: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Trace the reachable (fragment mass, iron fraction) region and write lower.txt / upper.txt.
    Region(RegionArgs),
    /// Evaluate the forward model for one collision.
    Eval(EvalArgs),
    /// Solve the target mass (and iron fraction) that produces a given fragment.
    Invert(InvertArgs),
    /// Solve the impact velocity that produces a given fragment mass and iron fraction.
    Velocity(VelocityArgs),
    /// Impact velocity against fragment mass for several iron fractions.
    SweepVelocity(SweepVelocityArgs),
    /// Iron fraction and target mass against fragment mass for several gammas and velocities.
    SweepComposition(SweepCompositionArgs),
}

/// Options of the region scan.
///
/// The single-dash spellings (`-gamma`, `-Vimin`, ...) are accepted too.
#[derive(Debug, Args, Clone)]
pub struct RegionArgs {
    /// Impactor/target mass ratio.
    #[arg(long, default_value_t = 1.0)]
    pub gamma: f64,

    /// Minimum impact velocity [km/s].
    #[arg(long = "Vimin", default_value_t = 20.0)]
    pub vi_min: f64,

    /// Maximum impact velocity [km/s].
    #[arg(long = "Vimax", default_value_t = 100.0)]
    pub vi_max: f64,

    /// Minimum target mass [M_E].
    #[arg(long = "Mtargmin", default_value_t = 0.1)]
    pub mtarg_min: f64,

    /// Maximum target mass [M_E].
    #[arg(long = "Mtargmax", default_value_t = 10.0)]
    pub mtarg_max: f64,

    /// Number of points along the velocity axis.
    #[arg(long = "NVi", default_value_t = 201)]
    pub n_vi: usize,

    /// Number of points along the target-mass axis.
    #[arg(long = "NMtarg", default_value_t = 201)]
    pub n_mtarg: usize,

    /// Evaluate the whole grid (sample cloud for plotting), not just its edges.
    #[arg(long)]
    pub plot: bool,

    /// Directory for lower.txt and upper.txt.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

#[derive(Debug, Args, Clone)]
pub struct EvalArgs {
    /// Target mass [M_E].
    #[arg(long)]
    pub mtarg: f64,

    /// Impactor/target mass ratio.
    #[arg(long, default_value_t = 1.0)]
    pub gamma: f64,

    /// Impact velocity [km/s].
    #[arg(long)]
    pub vi: f64,
}

#[derive(Debug, Args, Clone)]
pub struct InvertArgs {
    /// Largest-fragment mass [M_E].
    #[arg(long)]
    pub mlrg: f64,

    /// Impactor/target mass ratio.
    #[arg(long, default_value_t = 1.0)]
    pub gamma: f64,

    /// Impact velocity [km/s].
    #[arg(long)]
    pub vi: f64,

    #[command(flatten)]
    pub solver: SolverArgs,
}

#[derive(Debug, Args, Clone)]
pub struct VelocityArgs {
    /// Largest-fragment mass [M_E].
    #[arg(long)]
    pub mlrg: f64,

    /// Impactor/target mass ratio.
    #[arg(long, default_value_t = 1.0)]
    pub gamma: f64,

    /// Iron mass fraction of the fragment.
    #[arg(long)]
    pub z: f64,

    #[command(flatten)]
    pub solver: SolverArgs,
}

/// Fragment-mass axis shared by the sweeps.
#[derive(Debug, Args, Clone)]
pub struct MassAxisArgs {
    /// Smallest fragment mass [M_E].
    #[arg(long = "Mlrgmin", default_value_t = 1e-4)]
    pub mlrg_min: f64,

    /// Largest fragment mass [M_E].
    #[arg(long = "Mlrgmax", default_value_t = 3e2)]
    pub mlrg_max: f64,

    /// Number of log-spaced fragment masses.
    #[arg(long = "NMlrg", default_value_t = 101)]
    pub n_mlrg: usize,
}

#[derive(Debug, Args, Clone)]
pub struct SweepVelocityArgs {
    #[command(flatten)]
    pub axis: MassAxisArgs,

    /// Impactor/target mass ratio.
    #[arg(long, default_value_t = 1.0)]
    pub gamma: f64,

    /// Iron fractions, comma separated.
    #[arg(
        long = "z",
        value_delimiter = ',',
        default_values_t = vec![0.301, 0.4, 0.5, 0.7, 0.8, 0.9, 0.95, 0.99]
    )]
    pub iron_fractions: Vec<f64>,

    #[command(flatten)]
    pub solver: SolverArgs,
}

#[derive(Debug, Args, Clone)]
pub struct SweepCompositionArgs {
    #[command(flatten)]
    pub axis: MassAxisArgs,

    /// Mass ratios, comma separated.
    #[arg(long = "gamma", value_delimiter = ',', default_values_t = vec![0.1, 0.25, 1.0])]
    pub mass_ratios: Vec<f64>,

    /// Impact velocities [km/s], comma separated.
    #[arg(long = "vi", value_delimiter = ',', default_values_t = vec![20.0, 40.0, 60.0, 80.0, 160.0])]
    pub velocities: Vec<f64>,

    #[command(flatten)]
    pub solver: SolverArgs,
}

/// Root-finder limits.
#[derive(Debug, Args, Clone)]
pub struct SolverArgs {
    /// Iteration cap for each bracketed solve.
    #[arg(long, default_value_t = 100)]
    pub max_iterations: usize,
}

impl SolverArgs {
    pub fn options(&self) -> SolverOptions {
        SolverOptions {
            max_iterations: self.max_iterations,
            ..SolverOptions::default()
        }
    }
}
