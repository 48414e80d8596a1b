//! N-Queens, all solutions.

use serde::Serialize;

use super::BacktrackStep;
use crate::catalog::Algorithm;
use crate::error::VizResult;
use crate::input;
use crate::trace::{TraceBuilder, TraceGenerator};

/// N-Queens snapshot state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NQueensState {
    /// Board size.
    pub n: usize,
    /// Row of the queen in each column, if placed.
    pub queens: Vec<Option<usize>>,
    /// Square `(row, col)` being tried.
    pub focus: Option<(usize, usize)>,
    /// Queen `(row, col)` attacking the focused square.
    pub attacker: Option<(usize, usize)>,
    /// Solutions found so far.
    pub solutions_found: usize,
    /// Most recent solution as one row per column.
    pub last_solution: Option<Vec<usize>>,
}

/// Column-by-column N-Queens search, rows tried top to bottom.
///
/// The search does not stop at the first solution; every solution is
/// recorded with a `solution` snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NQueens;

struct Board {
    n: usize,
    queens: Vec<Option<usize>>,
    solutions: usize,
    last: Option<Vec<usize>>,
}

type Out = TraceBuilder<BacktrackStep, NQueensState>;

impl Board {
    fn state(&self, focus: Option<(usize, usize)>, attacker: Option<(usize, usize)>) -> NQueensState {
        NQueensState {
            n: self.n,
            queens: self.queens.clone(),
            focus,
            attacker,
            solutions_found: self.solutions,
            last_solution: self.last.clone(),
        }
    }

    /// First queen in an earlier column that attacks `(row, col)`.
    fn attacker(&self, row: usize, col: usize) -> Option<(usize, usize)> {
        (0..col).find_map(|c| {
            let r = self.queens[c]?;
            let same_row = r == row;
            let diagonal = r.abs_diff(row) == col - c;
            (same_row || diagonal).then_some((r, c))
        })
    }

    fn solve(&mut self, col: usize, out: &mut Out) -> VizResult<()> {
        if col == self.n {
            self.solutions += 1;
            let rows: Vec<usize> = self.queens.iter().flatten().copied().collect();
            self.last = Some(rows.clone());
            return out.emit(
                BacktrackStep::Solution,
                format!("Solution {}: rows {rows:?}", self.solutions),
                self.state(None, None),
            );
        }
        for row in 0..self.n {
            if let Some((r, c)) = self.attacker(row, col) {
                out.emit(
                    BacktrackStep::Conflict,
                    format!("({row}, {col}) is attacked by the queen at ({r}, {c})"),
                    self.state(Some((row, col)), Some((r, c))),
                )?;
                continue;
            }
            self.queens[col] = Some(row);
            out.emit(
                BacktrackStep::Place,
                format!("Place a queen at ({row}, {col})"),
                self.state(Some((row, col)), None),
            )?;
            self.solve(col + 1, out)?;
            self.queens[col] = None;
            out.emit(
                BacktrackStep::Backtrack,
                format!("Remove the queen from ({row}, {col})"),
                self.state(Some((row, col)), None),
            )?;
        }
        Ok(())
    }
}

impl TraceGenerator for NQueens {
    type Input = usize;
    type Kind = BacktrackStep;
    type State = NQueensState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::NQueens
    }

    fn record(&self, n: &usize, out: &mut Out) -> VizResult<()> {
        let n = input::check_board_size(*n)?;
        let mut board = Board {
            n,
            queens: vec![None; n],
            solutions: 0,
            last: None,
        };
        out.emit(
            BacktrackStep::Initialize,
            format!("Place {n} queens on a {n}x{n} board, one column at a time"),
            board.state(None, None),
        )?;
        board.solve(0, out)?;

        if board.solutions == 0 {
            out.emit(
                BacktrackStep::NoSolution,
                format!("No placement of {n} queens is safe"),
                board.state(None, None),
            )
        } else {
            out.emit(
                BacktrackStep::Complete,
                format!("Search complete: {} solution(s)", board.solutions),
                board.state(None, None),
            )
        }
    }
}
