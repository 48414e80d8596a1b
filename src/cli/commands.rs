//! CLI command handlers.
//!
//! This module contains the execution logic for each CLI command.
//! Handlers return an [`ExitCode`] and report errors on stderr.

use std::path::Path;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use super::output::{
    format_header, format_snapshot, format_status, format_summary, print_catalog, print_help,
    print_page, print_trace, print_version,
};
use super::{Args, Command};
use crate::catalog::{Algorithm, ViewMode};
use crate::config::VizConfig;
use crate::error::VizResult;
use crate::player::Player;
use crate::trace::ErasedKind;

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::List => {
            print_catalog();
            ExitCode::SUCCESS
        }
        Command::Run {
            scenario_path,
            json,
            verbose,
        } => run_scenario(&scenario_path, json, verbose),
        Command::Play {
            scenario_path,
            speed_ms,
            verbose,
        } => play_scenario(&scenario_path, speed_ms, verbose),
        Command::Show { algorithm, view } => show_algorithm(algorithm, view),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
    }
}

/// Install a stderr log subscriber for `--verbose`.
///
/// `RUST_LOG` wins over the default `algoviz=debug` filter. A second call
/// is harmless.
pub fn init_tracing(verbose: bool) {
    if !verbose {
        return;
    }
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("algoviz=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Generate a scenario's trace and print it.
///
/// # Arguments
///
/// * `path` - Path to the scenario YAML file
/// * `json` - Print the trace as pretty JSON instead of text
/// * `verbose` - Whether to enable debug logging
#[must_use]
pub fn run_scenario(path: &Path, json: bool, verbose: bool) -> ExitCode {
    init_tracing(verbose);
    match render_scenario(path, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

fn render_scenario(path: &Path, json: bool) -> VizResult<()> {
    let config = VizConfig::load(path)?;
    let trace = config.build_trace()?;
    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
    } else {
        println!("{}\n", format_header(&config));
        print_trace(&trace);
    }
    Ok(())
}

/// Play a scenario back in real time through the player.
///
/// # Arguments
///
/// * `path` - Path to the scenario YAML file
/// * `speed_ms` - Optional override of the configured speed
/// * `verbose` - Whether to enable debug logging
#[must_use]
pub fn play_scenario(path: &Path, speed_ms: Option<u64>, verbose: bool) -> ExitCode {
    init_tracing(verbose);
    match playback(path, speed_ms) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Load a scenario into a player, with `speed_ms` replacing the configured
/// speed before any tick is scheduled.
pub(crate) fn load_player(
    path: &Path,
    speed_ms: Option<u64>,
) -> VizResult<(VizConfig, Player<ErasedKind, serde_json::Value>)> {
    let mut config = VizConfig::load(path)?;
    if let Some(ms) = speed_ms {
        config.player.speed_ms = ms;
    }
    let player = config.player()?;
    Ok((config, player))
}

fn playback(path: &Path, speed_ms: Option<u64>) -> VizResult<()> {
    let (config, mut player) = load_player(path, speed_ms)?;
    println!("{}\n", format_header(&config));

    let len = player.len();
    if let Some(snapshot) = player.current() {
        println!("{}", format_snapshot(player.cursor(), len, snapshot));
    }
    player.play();

    // The player only schedules on virtual time; sleep until its timer is due.
    while let Some(handle) = player.pending_timer() {
        let wait = handle.due.since(player.now());
        std::thread::sleep(wait);
        if player.advance(wait) == 0 {
            break;
        }
        if let Some(snapshot) = player.current() {
            println!("{}", format_snapshot(player.cursor(), len, snapshot));
        }
    }

    println!("\n{}", format_status(&player));
    if let Some(trace) = player.trace() {
        println!("{}", format_summary(trace));
    }
    Ok(())
}

/// Show one catalog page.
#[must_use]
pub fn show_algorithm(algorithm: Algorithm, view: ViewMode) -> ExitCode {
    print_page(algorithm, view);
    ExitCode::SUCCESS
}
