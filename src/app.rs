//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs the tracing subscriber
//! - parses CLI arguments
//! - loads the calibration
//! - runs the requested scan/solve
//! - prints reports and writes the envelope tables

use clap::Parser;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::cli::{
    Command, EvalArgs, InvertArgs, RegionArgs, SweepCompositionArgs, SweepVelocityArgs, VelocityArgs,
};
use crate::domain::{ImpactScenario, ParameterSet, RegionConfig, SweepConfig};
use crate::error::AppError;
use crate::solve::InverseSolver;

pub mod pipeline;

const SUBCOMMANDS: [&str; 7] = [
    "region",
    "eval",
    "invert",
    "velocity",
    "sweep-velocity",
    "sweep-composition",
    "help",
];

/// Single-dash long flags accepted for the region scan.
const LEGACY_FLAGS: [&str; 8] = ["gamma", "Vimin", "Vimax", "Mtargmin", "Mtargmax", "NVi", "NMtarg", "plot"];

/// Entry point for the `impact` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    let params = match &cli.params {
        Some(path) => crate::io::read_params_json(path)?,
        None => ParameterSet::default(),
    };

    match cli.command {
        Command::Region(args) => handle_region(args, params),
        Command::Eval(args) => handle_eval(args, params),
        Command::Invert(args) => handle_invert(args, params),
        Command::Velocity(args) => handle_velocity(args, params),
        Command::SweepVelocity(args) => handle_sweep_velocity(args, params),
        Command::SweepComposition(args) => handle_sweep_composition(args, params),
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn handle_region(args: RegionArgs, params: ParameterSet) -> Result<(), AppError> {
    let config = region_config_from_args(&args);
    let run = pipeline::run_region(&config, &params)?;

    println!("{}", crate::report::format_params(&params));
    println!(
        "{}",
        crate::report::format_region_summary(&config, &run.output, &run.lower_path, &run.upper_path)
    );
    Ok(())
}

fn handle_eval(args: EvalArgs, params: ParameterSet) -> Result<(), AppError> {
    let scenario = ImpactScenario::new(args.mtarg, args.gamma, args.vi)?;
    let outcome = crate::models::evaluate(&scenario, &params)?;
    println!("{}", crate::report::format_outcome(&scenario, &outcome));
    Ok(())
}

fn handle_invert(args: InvertArgs, params: ParameterSet) -> Result<(), AppError> {
    let solver = InverseSolver::with_options(params, args.solver.options());
    let sol = solver.target_mass_and_iron_fraction(args.mlrg, args.gamma, args.vi)?;
    println!(
        "{}",
        crate::report::format_target_solution(args.mlrg, args.gamma, args.vi, &sol)
    );
    Ok(())
}

fn handle_velocity(args: VelocityArgs, params: ParameterSet) -> Result<(), AppError> {
    let solver = InverseSolver::with_options(params, args.solver.options());
    let sol = solver.impact_velocity(args.mlrg, args.gamma, args.z)?;
    println!(
        "{}",
        crate::report::format_velocity_solution(args.mlrg, args.gamma, args.z, &sol)
    );
    Ok(())
}

fn handle_sweep_velocity(args: SweepVelocityArgs, params: ParameterSet) -> Result<(), AppError> {
    let solver = InverseSolver::with_options(params, args.solver.options());
    let config = sweep_config_from_args(&args.axis);
    let output = crate::solve::velocity_contours(&solver, &config, args.gamma, &args.iron_fractions)?;
    print!("{}", crate::report::format_velocity_contours(&output));
    Ok(())
}

fn handle_sweep_composition(args: SweepCompositionArgs, params: ParameterSet) -> Result<(), AppError> {
    let solver = InverseSolver::with_options(params, args.solver.options());
    let config = sweep_config_from_args(&args.axis);
    let output = crate::solve::composition_curves(&solver, &config, &args.mass_ratios, &args.velocities)?;
    print!("{}", crate::report::format_composition(&output));
    Ok(())
}

pub fn region_config_from_args(args: &RegionArgs) -> RegionConfig {
    RegionConfig {
        mass_ratio: args.gamma,
        velocity_min: args.vi_min,
        velocity_max: args.vi_max,
        velocity_steps: args.n_vi,
        target_mass_min: args.mtarg_min,
        target_mass_max: args.mtarg_max,
        target_mass_steps: args.n_mtarg,
        full_grid: args.plot,
        out_dir: args.out_dir.clone(),
    }
}

pub fn sweep_config_from_args(args: &crate::cli::MassAxisArgs) -> SweepConfig {
    SweepConfig {
        fragment_mass_min: args.mlrg_min,
        fragment_mass_max: args.mlrg_max,
        fragment_mass_steps: args.n_mlrg,
    }
}

/// Rewrite argv so `impact` defaults to `impact region` and accepts single-dash long flags.
///
/// Rules:
/// - `impact`                         -> `impact region`
/// - `impact -gamma 0.5 ...`          -> `impact region --gamma 0.5 ...`
/// - `impact region -NVi 51`          -> `impact region --NVi 51`
/// - `impact --help/--version/-h`     -> unchanged (show top-level help/version)
fn rewrite_args(argv: Vec<String>) -> Vec<String> {
    let mut argv: Vec<String> = argv
        .into_iter()
        .enumerate()
        .map(|(idx, arg)| if idx == 0 { arg } else { expand_legacy_flag(arg) })
        .collect();

    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("region".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version");
    if is_top_level_help_or_version {
        return argv;
    }

    if leading_subcommand(&argv).is_some() {
        return argv;
    }

    // If the first token is a flag, treat it as "region flags".
    if arg1.starts_with('-') {
        argv.insert(1, "region".to_string());
    }
    argv
}

/// First positional token, if it names a subcommand.
///
/// Only `--params` may precede the subcommand with a separate value.
fn leading_subcommand(argv: &[String]) -> Option<&str> {
    let mut tokens = argv.iter().skip(1).map(String::as_str);
    while let Some(token) = tokens.next() {
        if token == "--params" {
            tokens.next();
        } else if !token.starts_with('-') {
            return SUBCOMMANDS.contains(&token).then_some(token);
        }
    }
    None
}

fn expand_legacy_flag(arg: String) -> String {
    let Some(rest) = arg.strip_prefix('-') else {
        return arg;
    };
    if rest.starts_with('-') {
        return arg;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    if LEGACY_FLAGS.contains(&name) {
        format!("-{arg}")
    } else {
        arg
    }
}
