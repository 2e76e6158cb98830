//! Command-line parsing for the Mumbai property price estimator.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the estimator and artifact code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_BATHROOMS, DEFAULT_BEDROOMS, DEFAULT_FLOOR_AREA, Tier};

pub mod prompt;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pe", version, about = "Mumbai property price estimator")]
pub struct Cli {
    /// Log filter directive (e.g. `debug`, `price_estimator=trace`).
    ///
    /// Overrides `PE_LOG` and `RUST_LOG`.
    #[arg(long, global = true, value_name = "FILTER")]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Estimate one property's price and print the breakdown.
    Estimate(EstimateArgs),
    /// List the reference price table.
    Areas(AreasArgs),
    /// Describe the loaded artifact bundle.
    Bundle(ArtifactArgs),
    /// Write a synthetic artifact bundle for local runs.
    DemoBundle(DemoBundleArgs),
    /// Guided three-step estimate on stdin/stdout.
    Wizard(ArtifactArgs),
    /// Launch the interactive TUI.
    ///
    /// Same estimator as `pe estimate`, rendered as a form with Ratatui.
    Tui(ArtifactArgs),
}

/// Where to load the artifact bundle from.
#[derive(Debug, Args, Clone, Default)]
pub struct ArtifactArgs {
    /// Artifact directory (overrides `PE_ARTIFACT_DIR`, default `artifacts`).
    #[arg(long, value_name = "DIR")]
    pub artifacts: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct EstimateArgs {
    /// Neighborhood name, exactly as listed by `pe areas`.
    #[arg(short = 'a', long)]
    pub area: String,

    /// Number of bedrooms (1-6).
    #[arg(short = 'b', long, default_value_t = DEFAULT_BEDROOMS)]
    pub bedrooms: u8,

    /// Number of bathrooms (1.0-5.0, steps of 0.5).
    #[arg(long, default_value_t = DEFAULT_BATHROOMS)]
    pub bathrooms: f64,

    /// Carpet area in sq ft (300-5000, steps of 50).
    #[arg(long, default_value_t = DEFAULT_FLOOR_AREA)]
    pub sqft: u32,

    #[command(flatten)]
    pub artifacts: ArtifactArgs,

    /// Export the estimate (inputs, features, breakdown) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct AreasArgs {
    /// Only list one tier.
    #[arg(long, value_enum)]
    pub tier: Option<Tier>,
}

#[derive(Debug, Args, Clone)]
pub struct DemoBundleArgs {
    /// Output directory (created if missing).
    #[arg(long, value_name = "DIR")]
    pub out: PathBuf,

    /// Random seed for the synthetic listings.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Number of synthetic listings to fit on.
    #[arg(long, default_value_t = 2000)]
    pub samples: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_defaults_match_the_form() {
        let cli = Cli::parse_from(["pe", "estimate", "-a", "Juhu"]);
        let Command::Estimate(args) = cli.command else {
            panic!("expected estimate");
        };
        assert_eq!(args.area, "Juhu");
        assert_eq!(args.bedrooms, 2);
        assert_eq!(args.bathrooms, 2.0);
        assert_eq!(args.sqft, 1000);
        assert!(args.artifacts.artifacts.is_none());
    }

    #[test]
    fn log_flag_is_global() {
        let cli = Cli::parse_from(["pe", "areas", "--tier", "ultra-premium", "--log", "debug"]);
        assert_eq!(cli.log.as_deref(), Some("debug"));
        let Command::Areas(args) = cli.command else {
            panic!("expected areas");
        };
        assert_eq!(args.tier, Some(Tier::UltraPremium));
    }

    #[test]
    fn demo_bundle_requires_out() {
        assert!(Cli::try_parse_from(["pe", "demo-bundle"]).is_err());
        let cli = Cli::parse_from(["pe", "demo-bundle", "--out", "demo", "--seed", "7"]);
        let Command::DemoBundle(args) = cli.command else {
            panic!("expected demo-bundle");
        };
        assert_eq!(args.out, PathBuf::from("demo"));
        assert_eq!(args.seed, 7);
        assert_eq!(args.samples, 2000);
    }
}
