//! CLI argument parsing.
//!
//! This module provides the argument parser for the algoviz CLI.
//! Parsing is separate from execution so it can be tested in isolation.

use std::path::PathBuf;

use crate::catalog::{Algorithm, ViewMode};

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List every algorithm in the catalog
    List,
    /// Generate a scenario's trace and print it
    Run {
        /// Path to the scenario YAML file.
        scenario_path: PathBuf,
        /// Print the trace as JSON instead of text.
        json: bool,
        /// Enable debug logging.
        verbose: bool,
    },
    /// Play a scenario back in real time
    Play {
        /// Path to the scenario YAML file.
        scenario_path: PathBuf,
        /// Optional speed override in milliseconds.
        speed_ms: Option<u64>,
        /// Enable debug logging.
        verbose: bool,
    },
    /// Show one catalog page
    Show {
        /// Algorithm to show.
        algorithm: Algorithm,
        /// Panel to print.
        view: ViewMode,
    },
    /// Show help
    Help,
    /// Show version
    Version,
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// This method is testable as it accepts any iterator of strings,
    /// not just `std::env::args()`.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Internal parsing from a vector of strings.
    fn parse_from_vec(args: &[String]) -> Self {
        if args.len() < 2 {
            return Self {
                command: Command::Help,
            };
        }

        let command = match args[1].as_str() {
            "list" => Command::List,
            "run" => Self::parse_run_command(args),
            "play" => Self::parse_play_command(args),
            "show" => Self::parse_show_command(args),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => {
                eprintln!("Unknown command: {unknown}");
                Command::Help
            }
        };

        Self { command }
    }

    /// Parse the 'run' command arguments.
    fn parse_run_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'run' command requires a scenario path");
            return Command::Help;
        }

        let mut json = false;
        let mut verbose = false;
        for flag in &args[3..] {
            match flag.as_str() {
                "--json" => json = true,
                "-v" | "--verbose" => verbose = true,
                other => eprintln!("Ignoring unknown option: {other}"),
            }
        }

        Command::Run {
            scenario_path: PathBuf::from(&args[2]),
            json,
            verbose,
        }
    }

    /// Parse the 'play' command arguments.
    fn parse_play_command(args: &[String]) -> Command {
        if args.len() < 3 {
            eprintln!("Error: 'play' command requires a scenario path");
            return Command::Help;
        }

        let mut speed_ms = None;
        let mut verbose = false;

        let mut i = 3;
        while i < args.len() {
            match args[i].as_str() {
                "--speed" => {
                    if i + 1 < args.len() {
                        match args[i + 1].parse() {
                            Ok(ms) => speed_ms = Some(ms),
                            Err(_) => eprintln!("Ignoring invalid speed: {}", args[i + 1]),
                        }
                        i += 2;
                    } else {
                        i += 1;
                    }
                }
                "-v" | "--verbose" => {
                    verbose = true;
                    i += 1;
                }
                _ => i += 1,
            }
        }

        Command::Play {
            scenario_path: PathBuf::from(&args[2]),
            speed_ms,
            verbose,
        }
    }

    /// Parse the 'show' command arguments.
    fn parse_show_command(args: &[String]) -> Command {
        let Some(name) = args.get(2) else {
            eprintln!("Error: 'show' command requires an algorithm id");
            return Command::Help;
        };
        let algorithm = match name.parse::<Algorithm>() {
            Ok(algorithm) => algorithm,
            Err(e) => {
                eprintln!("Error: {e}");
                return Command::Help;
            }
        };

        let mut view = ViewMode::default();
        if args.len() > 4 && args[3] == "--view" {
            match args[4].parse() {
                Ok(mode) => view = mode,
                Err(e) => eprintln!("Warning: {e}, showing the visualizer"),
            }
        }

        Command::Show { algorithm, view }
    }
}
