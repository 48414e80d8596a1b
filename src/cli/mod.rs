//! CLI module for algoviz.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested.
//! The entry point `run_cli` is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command};
pub use commands::{init_tracing, play_scenario, run_cli, run_scenario, show_algorithm};
pub use output::{
    format_catalog, format_header, format_page, format_snapshot, format_status, format_summary,
    print_catalog, print_help, print_page, print_trace, print_version,
};
