//! Backtracking puzzles.
//!
//! Both solvers search in a fixed order (column by column for N-Queens,
//! row-major empty cells for Sudoku) and record every attempt, placement and
//! undo. An exhausted search ends in [`BacktrackStep::NoSolution`], which is
//! an outcome, not an error.

mod nqueens;
mod sudoku;

pub use nqueens::{NQueens, NQueensState};
pub use sudoku::{Grid, Sudoku, SudokuState};

use serde::{Deserialize, Serialize};

use super::step_kind;

/// Transition kinds for backtracking traces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BacktrackStep {
    /// Empty board or puzzle as given.
    Initialize,
    /// A cell is chosen and its candidates listed.
    Focus,
    /// An attempt fails the safety check.
    Conflict,
    /// A value passes the safety check and is placed.
    Place,
    /// A placement is undone.
    Backtrack,
    /// A complete assignment is found.
    Solution,
    /// Search finished with at least one solution.
    Complete,
    /// Search exhausted without a solution.
    NoSolution,
}

step_kind!(BacktrackStep {
    Initialize => "initialize",
    Focus => "focus",
    Conflict => "conflict",
    Place => "place",
    Backtrack => "backtrack",
    Solution => "solution",
    Complete => "complete",
    NoSolution => "no_solution",
}
initial: [Initialize]
terminal: [Complete, NoSolution]);
