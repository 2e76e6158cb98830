//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - reads environment settings and installs logging
//! - loads the artifact bundle once
//! - runs estimates and prints reports
//! - writes optional exports

use std::io;

use chrono::{Local, Utc};
use clap::Parser;

use crate::artifacts::demo::{self, DemoConfig};
use crate::cli::{AreasArgs, ArtifactArgs, Cli, Command, DemoBundleArgs, EstimateArgs};
use crate::config::Settings;
use crate::domain::PredictionRequest;
use crate::error::AppError;
use crate::io::{EstimateRecord, write_estimate_json};
use crate::reference::ReferenceTable;

pub mod pipeline;

use pipeline::Session;

/// Entry point for the `pe` binary.
pub fn run() -> Result<(), AppError> {
    // We want `pe` and `pe --artifacts DIR` to behave like `pe tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = Cli::parse_from(argv);
    let settings = Settings::from_env();

    let rust_log = std::env::var("RUST_LOG").ok();
    let filter = crate::logging::resolve_filter(cli.log.as_deref(), settings.log_filter.as_deref(), rust_log.as_deref());
    // The TUI owns the terminal; log lines would tear the alternate screen.
    let console = !matches!(cli.command, Command::Tui(_));
    crate::logging::init(&filter, console)?;

    dispatch(cli.command, settings)
}

/// Run one parsed command against the given settings.
pub fn dispatch(command: Command, settings: Settings) -> Result<(), AppError> {
    match command {
        Command::Estimate(args) => handle_estimate(args, settings),
        Command::Areas(args) => handle_areas(args),
        Command::Bundle(args) => handle_bundle(args, settings),
        Command::DemoBundle(args) => handle_demo_bundle(args),
        Command::Wizard(args) => handle_wizard(args, settings),
        Command::Tui(args) => handle_tui(args, settings),
    }
}

fn load_session(args: ArtifactArgs, settings: Settings) -> Result<Session, AppError> {
    let settings = settings.with_artifact_dir(args.artifacts);
    Session::load(&settings.artifact_dir)
}

fn handle_estimate(args: EstimateArgs, settings: Settings) -> Result<(), AppError> {
    let session = load_session(args.artifacts.clone(), settings)?;
    let request = PredictionRequest::new(args.area.as_str(), args.bedrooms, args.bathrooms, args.sqft)?;
    let out = session.run_estimate(&request);

    println!("{}", crate::report::format_estimate(&request, &out.profile, &out.trace.result));

    if let Some(path) = &args.export {
        let record = EstimateRecord::new(&request, &out.profile, &out.trace, Utc::now());
        write_estimate_json(path, &record)?;
        println!("Wrote estimate: {}", path.display());
    }

    Ok(())
}

fn handle_areas(args: AreasArgs) -> Result<(), AppError> {
    let table = ReferenceTable::builtin();
    print!("{}", crate::report::format_area_list(&table, args.tier));
    Ok(())
}

fn handle_bundle(args: ArtifactArgs, settings: Settings) -> Result<(), AppError> {
    let session = load_session(args, settings)?;
    print!(
        "{}",
        crate::report::format_bundle_summary(session.estimator().bundle(), session.table())
    );
    Ok(())
}

fn handle_demo_bundle(args: DemoBundleArgs) -> Result<(), AppError> {
    let config = DemoConfig {
        seed: args.seed,
        samples: args.samples,
        trained_on: Some(Local::now().date_naive()),
        ..DemoConfig::default()
    };
    let files = demo::generate(&config).map_err(|e| AppError::usage(format!("Cannot build demo bundle: {e}")))?;
    files
        .write_to(&args.out)
        .map_err(|e| AppError::runtime(format!("Cannot write demo bundle: {e}")))?;
    println!("Wrote demo bundle: {}", args.out.display());
    Ok(())
}

fn handle_wizard(args: ArtifactArgs, settings: Settings) -> Result<(), AppError> {
    let session = load_session(args, settings)?;
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout();

    let Some(request) = crate::cli::prompt::run_wizard(&mut input, &mut output, session.table())? else {
        println!("Canceled.");
        return Ok(());
    };
    let out = session.run_estimate(&request);
    println!();
    println!("{}", crate::report::format_breakdown(&out.trace.result));
    Ok(())
}

fn handle_tui(args: ArtifactArgs, settings: Settings) -> Result<(), AppError> {
    let session = load_session(args, settings)?;
    crate::tui::run(session)
}

/// Rewrite argv so `pe` defaults to `pe tui`.
///
/// Rules:
/// - `pe`                      -> `pe tui`
/// - `pe --artifacts DIR ...`  -> `pe tui --artifacts DIR ...`
/// - `pe --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "estimate" | "areas" | "bundle" | "demo-bundle" | "wizard" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    fn settings_for(dir: &Path) -> Settings {
        Settings::default().with_artifact_dir(Some(dir.to_path_buf()))
    }

    fn write_demo(dir: &Path) {
        handle_demo_bundle(DemoBundleArgs {
            out: dir.to_path_buf(),
            seed: 42,
            samples: 500,
        })
        .unwrap();
    }

    #[test]
    fn bare_invocation_opens_tui() {
        assert_eq!(rewrite_args(argv(&["pe"])), argv(&["pe", "tui"]));
        assert_eq!(
            rewrite_args(argv(&["pe", "--artifacts", "x"])),
            argv(&["pe", "tui", "--artifacts", "x"])
        );
    }

    #[test]
    fn subcommands_and_help_are_untouched() {
        for args in [
            argv(&["pe", "estimate", "-a", "Juhu"]),
            argv(&["pe", "--help"]),
            argv(&["pe", "-V"]),
            argv(&["pe", "demo-bundle", "--out", "d"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn rewritten_args_parse() {
        let cli = Cli::parse_from(rewrite_args(argv(&["pe", "--artifacts", "x"])));
        let Command::Tui(args) = cli.command else {
            panic!("expected tui");
        };
        assert_eq!(args.artifacts.as_deref(), Some(Path::new("x")));
    }

    #[test]
    fn estimate_with_export_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        write_demo(dir.path());
        let export = dir.path().join("estimate.json");

        let args = EstimateArgs {
            area: "Bandra West".to_string(),
            bedrooms: 2,
            bathrooms: 2.0,
            sqft: 1000,
            artifacts: ArtifactArgs::default(),
            export: Some(export.clone()),
        };
        dispatch(Command::Estimate(args), settings_for(dir.path())).unwrap();

        let value: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&export).unwrap()).unwrap();
        assert_eq!(value["profile"]["avg_rate"], 40000.0);
        assert_eq!(value["result"]["base_price"], 40_000_000.0);
    }

    #[test]
    fn missing_artifacts_exit_before_input_is_checked() {
        let dir = tempfile::tempdir().unwrap();
        let args = EstimateArgs {
            area: "Juhu".to_string(),
            bedrooms: 99,
            bathrooms: 2.0,
            sqft: 1000,
            artifacts: ArtifactArgs::default(),
            export: None,
        };
        let err = dispatch(Command::Estimate(args), settings_for(&dir.path().join("none"))).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_ARTIFACTS);
    }

    #[test]
    fn invalid_input_is_a_usage_error() {
        let dir = tempfile::tempdir().unwrap();
        write_demo(dir.path());
        let args = EstimateArgs {
            area: "Juhu".to_string(),
            bedrooms: 2,
            bathrooms: 2.0,
            sqft: 1025,
            artifacts: ArtifactArgs::default(),
            export: None,
        };
        let err = dispatch(Command::Estimate(args), settings_for(dir.path())).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::EXIT_USAGE);
    }

    #[test]
    fn artifacts_flag_overrides_settings() {
        let dir = tempfile::tempdir().unwrap();
        write_demo(dir.path());
        let args = ArtifactArgs {
            artifacts: Some(dir.path().to_path_buf()),
        };
        assert!(dispatch(Command::Bundle(args), Settings::default()).is_ok());
    }
}
