//! # u-tsp CLI
//!
//! Solves a TSP instance with one algorithm and writes the `.sol` and
//! `.trace` files:
//!
//! ```text
//! u-tsp -inst data/Atlanta.tsp -alg LS2 -time 60 -seed 7
//! ```

use anyhow::{anyhow, Context};
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use u_tsp::bnb::BoundRule;
use u_tsp::instance::Instance;
use u_tsp::output::{write_files, OutputNames};
use u_tsp::sa::SaConfig;
use u_tsp::solver::{solve, Algorithm, SolveOptions};

/// Flags that are also accepted with a single leading dash.
const SINGLE_DASH_FLAGS: [&str; 4] = ["-inst", "-alg", "-time", "-seed"];

/// Command-line interface for u-tsp
#[derive(Parser, Debug)]
#[command(name = "u-tsp", version)]
#[command(
    about = "Travelling salesman solver: branch-and-bound, MST approximation, hill climbing, \
             simulated annealing"
)]
struct Cli {
    /// Instance file (TSPLIB-style coordinates)
    #[arg(long = "inst", value_name = "FILE")]
    inst: PathBuf,

    /// Algorithm: BnB, Approx, LS1 or LS2
    #[arg(long = "alg", value_name = "ALG")]
    alg: Algorithm,

    /// Cutoff in seconds
    #[arg(long = "time", value_name = "SECONDS")]
    time: f64,

    /// Random seed (required by Approx, LS1 and LS2)
    #[arg(long = "seed")]
    seed: Option<u64>,

    /// Directory for the .sol and .trace files
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    /// Use the admissible bound in BnB, so an exhausted search is optimal
    #[arg(long)]
    admissible_bound: bool,

    /// Annealing start temperature
    #[arg(long)]
    t_max: Option<f64>,

    /// Annealing end temperature
    #[arg(long)]
    t_min: Option<f64>,

    /// Length of the annealing schedule in steps
    #[arg(long)]
    steps: Option<u64>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn solve_options(&self) -> anyhow::Result<SolveOptions> {
        let cutoff = Duration::try_from_secs_f64(self.time).map_err(|_| {
            anyhow!("invalid cutoff '{}', expected non-negative seconds", self.time)
        })?;

        let mut annealing = SaConfig::default();
        if let Some(t) = self.t_max {
            annealing = annealing.with_t_max(t);
        }
        if let Some(t) = self.t_min {
            annealing = annealing.with_t_min(t);
        }
        if let Some(steps) = self.steps {
            annealing = annealing.with_steps(steps);
        }

        let bound = if self.admissible_bound {
            BoundRule::Admissible
        } else {
            BoundRule::HalfSum
        };
        let mut options = SolveOptions::new(self.alg, cutoff)
            .with_bound_rule(bound)
            .with_annealing(annealing);
        if let Some(seed) = self.seed {
            options = options.with_seed(seed);
        }
        Ok(options)
    }
}

/// Rewrites `-inst` style flags (and `-inst=value`) to `--inst` so clap can
/// parse them. Every other token is passed through.
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| match arg.to_str() {
            Some(token) if is_single_dash_flag(token) => OsString::from(format!("-{token}")),
            _ => arg,
        })
        .collect()
}

fn is_single_dash_flag(token: &str) -> bool {
    let name = token.split_once('=').map_or(token, |(name, _)| name);
    SINGLE_DASH_FLAGS.contains(&name)
}

fn main() -> ExitCode {
    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    let default_filter = if cli.verbose { "u_tsp=debug" } else { "u_tsp=info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .target(env_logger::Target::Stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let options = cli.solve_options()?;
    if cli.seed.is_some() && !cli.alg.requires_seed() {
        log::warn!("{} ignores the seed", cli.alg);
    }

    let instance = Instance::from_path(&cli.inst)
        .with_context(|| format!("failed to load {}", cli.inst.display()))?;
    let matrix = instance.distance_matrix();

    let solution = solve(&matrix, &options)
        .with_context(|| format!("{} failed on {}", cli.alg, instance.name))?;

    let names = OutputNames::for_instance(&cli.inst, cli.alg, cli.time, cli.seed);
    write_files(&cli.output_dir, &names, &solution)
        .with_context(|| format!("failed to write results to {}", cli.output_dir.display()))?;

    println!(
        "{} {}: cost {} ({:?}, {} improvements)",
        instance.name,
        solution.algorithm,
        solution.cost,
        solution.status,
        solution.trace.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(normalize_args(args.iter().map(OsString::from)))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_single_dash_flags() {
        let cli = parse(&[
            "u-tsp", "-inst", "DATA/Atlanta.tsp", "-alg", "LS1", "-time", "5", "-seed", "3",
        ])
        .unwrap();
        assert_eq!(cli.inst, PathBuf::from("DATA/Atlanta.tsp"));
        assert_eq!(cli.alg, Algorithm::HillClimbing);
        assert_eq!(cli.time, 5.0);
        assert_eq!(cli.seed, Some(3));
        assert_eq!(cli.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_double_dash_flags_and_annealing_knobs() {
        let cli = parse(&[
            "u-tsp", "--inst", "a.tsp", "--alg", "LS2", "--time", "1.5", "--seed", "9",
            "--t-max", "500", "--t-min", "0.5", "--steps", "1000",
        ])
        .unwrap();
        let options = cli.solve_options().unwrap();
        assert_eq!(options.algorithm, Algorithm::SimulatedAnnealing);
        assert_eq!(options.cutoff, Duration::from_millis(1500));
        assert_eq!(options.annealing.t_max, 500.0);
        assert_eq!(options.annealing.steps, 1000);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_unknown_algorithm_is_rejected() {
        assert!(parse(&["u-tsp", "-inst", "a.tsp", "-alg", "GA", "-time", "1"]).is_err());
    }

    #[test]
    fn test_negative_cutoff_is_rejected() {
        let cli = parse(&["u-tsp", "-inst", "a.tsp", "-alg", "BnB", "-time=-1"]).unwrap();
        assert_eq!(cli.time, -1.0);
        let err = cli.solve_options().unwrap_err();
        assert!(err.to_string().contains("invalid cutoff"), "{err}");
    }

    #[test]
    fn test_only_known_single_dash_flags_are_doubled() {
        let args = normalize_args(
            ["u-tsp", "-seed", "7", "-time=2", "-v", "-instance", "--alg"].map(OsString::from),
        );
        let args: Vec<&str> = args.iter().map(|a| a.to_str().unwrap()).collect();
        assert_eq!(args, ["u-tsp", "--seed", "7", "--time=2", "-v", "-instance", "--alg"]);
    }
}
