//! CLI output formatting.
//!
//! The `format_*` functions build plain text and are what the tests check;
//! the `print_*` functions write that text to stdout. This is the only
//! renderer the crate ships: a pure read of a snapshot's kind, narration
//! and state.

use std::fmt::Write as _;

use crate::catalog::{Algorithm, Category, ViewMode};
use crate::config::VizConfig;
use crate::player::Player;
use crate::trace::{ErasedKind, ErasedTrace, Snapshot, StepKind};

type ErasedSnapshot = Snapshot<ErasedKind, serde_json::Value>;

/// Print version information.
pub fn print_version() {
    println!("algoviz {}", env!("CARGO_PKG_VERSION"));
}

/// Print help message.
pub fn print_help() {
    println!(
        r"algoviz - step-by-step algorithm visualizer

USAGE:
    algoviz <COMMAND> [OPTIONS]

COMMANDS:
    list                        List every algorithm

    run <scenario.yaml>         Generate a trace and print every step
        --json                  Print the trace as JSON
        -v, --verbose           Enable debug logging

    play <scenario.yaml>        Play the trace back in real time
        --speed <MS>            Milliseconds per step (10..=5000)
        -v, --verbose           Enable debug logging

    show <algorithm>            Show an algorithm page
        --view <MODE>           visualizer | theory | pseudocode

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    algoviz list
    algoviz show dijkstra --view pseudocode
    algoviz run scenarios/bfs.yaml --json
    algoviz play scenarios/quick_sort.yaml --speed 200

SCENARIO FILE:
    algorithm:
      id: bfs
      nodes: 'A, B, C, D'
      edges: 'A-B, A-C, C-D'
      start: A
    player:
      speed_ms: 300
"
    );
}

/// Catalog grouped by category.
#[must_use]
pub fn format_catalog() -> String {
    let mut out = String::new();
    for category in [
        Category::Graph,
        Category::Sorting,
        Category::Text,
        Category::Backtracking,
    ] {
        let _ = writeln!(out, "{category}:");
        for algorithm in Algorithm::ALL.iter().filter(|a| a.category() == category) {
            let _ = writeln!(out, "  {:<18} {}", algorithm.id(), algorithm.name());
        }
        out.push('\n');
    }
    out
}

/// Print the catalog.
pub fn print_catalog() {
    print!("{}", format_catalog());
}

/// One algorithm page in the chosen view.
#[must_use]
pub fn format_page(algorithm: Algorithm, view: ViewMode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", algorithm.name(), algorithm.category());
    let _ = writeln!(out, "{}", "=".repeat(algorithm.name().len()));
    match view {
        ViewMode::Visualizer => {
            let _ = writeln!(out, "Run a scenario with `id: {}` to watch it:", algorithm.id());
            let _ = writeln!(out, "    algoviz play <scenario.yaml>");
        }
        ViewMode::Theory => {
            let _ = writeln!(out, "{}", algorithm.summary());
        }
        ViewMode::Pseudocode => {
            for (n, line) in algorithm.pseudocode().iter().enumerate() {
                let _ = writeln!(out, "{:>2} | {line}", n + 1);
            }
        }
    }
    out
}

/// Print one algorithm page.
pub fn print_page(algorithm: Algorithm, view: ViewMode) {
    print!("{}", format_page(algorithm, view));
}

/// One line per snapshot: position, kind, narration.
#[must_use]
pub fn format_snapshot(index: usize, len: usize, snapshot: &ErasedSnapshot) -> String {
    let width = len.to_string().len();
    format!(
        "[{:>width$}/{len}] {:<15} {}",
        index + 1,
        snapshot.kind().label(),
        snapshot.narration()
    )
}

/// Scenario heading printed before a run or playback.
#[must_use]
pub fn format_header(config: &VizConfig) -> String {
    let algorithm = config.algorithm.algorithm();
    let title = if config.scenario.name.is_empty() {
        algorithm.name()
    } else {
        config.scenario.name.as_str()
    };
    let mut out = format!("{title} ({})", algorithm.id());
    if !config.scenario.description.is_empty() {
        let _ = write!(out, "\n{}", config.scenario.description);
    }
    out
}

/// Summary after the last snapshot.
#[must_use]
pub fn format_summary(trace: &ErasedTrace) -> String {
    let outcome = trace.outcome().map_or("none", StepKind::label);
    format!("{} snapshots, outcome: {outcome}", trace.len())
}

/// Print a whole trace as text.
pub fn print_trace(trace: &ErasedTrace) {
    for (i, snapshot) in trace.iter().enumerate() {
        println!("{}", format_snapshot(i, trace.len(), snapshot));
    }
    println!("\n{}", format_summary(trace));
}

/// Status line for the player.
#[must_use]
pub fn format_status(player: &Player<ErasedKind, serde_json::Value>) -> String {
    format!(
        "status: {:?}, step {}/{}, {:.0}%",
        player.status(),
        player.cursor() + 1,
        player.len(),
        player.progress() * 100.0
    )
}
