//! Sudoku solver for `base² x base²` grids.

use serde::Serialize;
use std::fmt;

use super::BacktrackStep;
use crate::catalog::Algorithm;
use crate::error::{VizError, VizResult};
use crate::input;
use crate::trace::{TraceBuilder, TraceGenerator};

/// A validated puzzle: `side = base²` rows of `side` cells, `0` for empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    base: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Parse whitespace-delimited cells (`.` or `0` for empty).
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Input`] for malformed grids and for givens that
    /// already conflict with each other.
    pub fn parse(raw: &str) -> VizResult<Self> {
        let (base, cells) = input::parse_grid(raw)?;
        Self::new(base, cells)
    }

    /// Build from raw cells.
    ///
    /// # Errors
    ///
    /// Same as [`Grid::parse`].
    pub fn new(base: usize, cells: Vec<u8>) -> VizResult<Self> {
        let side = base * base;
        if !(2..=4).contains(&base) || cells.len() != side * side {
            return Err(VizError::input(
                "grid",
                format!("expected {} cells for base {base}, got {}", side * side, cells.len()),
            ));
        }
        let mut grid = Self { base, cells };
        for idx in 0..grid.cells.len() {
            let value = grid.cells[idx];
            if value == 0 {
                continue;
            }
            if usize::from(value) > side {
                return Err(VizError::input(
                    "grid",
                    format!("value {value} is out of range for a {side}x{side} grid"),
                ));
            }
            grid.cells[idx] = 0;
            let clash = !grid.allows(idx, value);
            grid.cells[idx] = value;
            if clash {
                let (r, c) = grid.position(idx);
                return Err(VizError::input(
                    "grid",
                    format!("given {value} at ({r}, {c}) repeats in its row, column or box"),
                ));
            }
        }
        Ok(grid)
    }

    /// Box size.
    #[must_use]
    pub const fn base(&self) -> usize {
        self.base
    }

    /// Row and column count.
    #[must_use]
    pub const fn side(&self) -> usize {
        self.base * self.base
    }

    /// Cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    fn position(&self, idx: usize) -> (usize, usize) {
        (idx / self.side(), idx % self.side())
    }

    /// The first unit that already holds `value`, checked in row, column,
    /// box order.
    fn clash(&self, idx: usize, value: u8) -> Option<Unit> {
        let side = self.side();
        let (row, col) = self.position(idx);
        let (br, bc) = (row - row % self.base, col - col % self.base);
        if (0..side).any(|c| self.cells[row * side + c] == value) {
            return Some(Unit::Row(row));
        }
        if (0..side).any(|r| self.cells[r * side + col] == value) {
            return Some(Unit::Column(col));
        }
        let in_box = (0..self.base)
            .any(|dr| (0..self.base).any(|dc| self.cells[(br + dr) * side + bc + dc] == value));
        in_box.then_some(Unit::Box(br, bc))
    }

    /// Whether `value` may go in cell `idx` given the rest of the grid.
    fn allows(&self, idx: usize, value: u8) -> bool {
        self.clash(idx, value).is_none()
    }

    fn candidates(&self, idx: usize) -> Vec<u8> {
        (1..=self.side() as u8).filter(|v| self.allows(idx, *v)).collect()
    }
}

/// Row, column or box that rules a digit out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Row(usize),
    Column(usize),
    /// Top-left corner of the box.
    Box(usize, usize),
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Row(r) => write!(f, "row {r}"),
            Self::Column(c) => write!(f, "column {c}"),
            Self::Box(r, c) => write!(f, "the box at ({r}, {c})"),
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.side()) {
            let line: Vec<String> = row
                .iter()
                .map(|v| if *v == 0 { ".".to_string() } else { v.to_string() })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}

/// Sudoku snapshot state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SudokuState {
    /// Box size.
    pub base: usize,
    /// Cells in row-major order, `0` for empty.
    pub cells: Vec<u8>,
    /// Which cells were given.
    pub given: Vec<bool>,
    /// Cell index in focus.
    pub focus: Option<usize>,
    /// Candidates of the focused cell.
    pub candidates: Vec<u8>,
    /// Placements so far.
    pub placements: usize,
    /// Undone placements so far.
    pub backtracks: usize,
}

/// Backtracking over empty cells in row-major order, digits ascending.
///
/// Every digit is tried against the row, column and box of its cell; a
/// rejected digit is recorded as a conflict. Stops at the first solution.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sudoku;

struct Search {
    grid: Grid,
    given: Vec<bool>,
    empties: Vec<usize>,
    placements: usize,
    backtracks: usize,
}

type Out = TraceBuilder<BacktrackStep, SudokuState>;

impl Search {
    fn state(&self, focus: Option<usize>, candidates: &[u8]) -> SudokuState {
        SudokuState {
            base: self.grid.base,
            cells: self.grid.cells.clone(),
            given: self.given.clone(),
            focus,
            candidates: candidates.to_vec(),
            placements: self.placements,
            backtracks: self.backtracks,
        }
    }

    fn solve(&mut self, k: usize, out: &mut Out) -> VizResult<bool> {
        let Some(&idx) = self.empties.get(k) else {
            return Ok(true);
        };
        let (r, c) = self.grid.position(idx);
        let candidates = self.grid.candidates(idx);
        let narration = if candidates.is_empty() {
            format!("Cell ({r}, {c}) has no candidates, dead end")
        } else {
            format!("Cell ({r}, {c}) candidates: {candidates:?}")
        };
        out.emit(BacktrackStep::Focus, narration, self.state(Some(idx), &candidates))?;

        for value in 1..=self.grid.side() as u8 {
            if let Some(unit) = self.grid.clash(idx, value) {
                out.emit(
                    BacktrackStep::Conflict,
                    format!("{value} at ({r}, {c}) repeats in {unit}"),
                    self.state(Some(idx), &candidates),
                )?;
                continue;
            }
            self.grid.cells[idx] = value;
            self.placements += 1;
            out.emit(
                BacktrackStep::Place,
                format!("Try {value} at ({r}, {c})"),
                self.state(Some(idx), &candidates),
            )?;
            if self.solve(k + 1, out)? {
                return Ok(true);
            }
            self.grid.cells[idx] = 0;
            self.backtracks += 1;
            out.emit(
                BacktrackStep::Backtrack,
                format!("{value} at ({r}, {c}) leads nowhere, erase it"),
                self.state(Some(idx), &candidates),
            )?;
        }
        Ok(false)
    }
}

impl TraceGenerator for Sudoku {
    type Input = Grid;
    type Kind = BacktrackStep;
    type State = SudokuState;

    fn algorithm(&self) -> Algorithm {
        Algorithm::Sudoku
    }

    fn record(&self, grid: &Grid, out: &mut Out) -> VizResult<()> {
        let mut search = Search {
            given: grid.cells.iter().map(|v| *v != 0).collect(),
            empties: (0..grid.cells.len()).filter(|&i| grid.cells[i] == 0).collect(),
            grid: grid.clone(),
            placements: 0,
            backtracks: 0,
        };
        let side = grid.side();
        out.emit(
            BacktrackStep::Initialize,
            format!("{side}x{side} puzzle with {} empty cells", search.empties.len()),
            search.state(None, &[]),
        )?;

        if search.solve(0, out)? {
            out.emit(
                BacktrackStep::Solution,
                "Every cell is filled without conflicts",
                search.state(None, &[]),
            )?;
            out.emit(
                BacktrackStep::Complete,
                format!(
                    "Solved with {} placements and {} backtracks",
                    search.placements, search.backtracks
                ),
                search.state(None, &[]),
            )
        } else {
            out.emit(
                BacktrackStep::NoSolution,
                format!(
                    "No solution after {} placements and {} backtracks",
                    search.placements, search.backtracks
                ),
                search.state(None, &[]),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUZZLE_4: &str = "1 . . 4
                            . . 1 .
                            . 1 . .
                            4 . . 1";

    fn solved(cells: &[u8], base: usize) -> bool {
        let grid = Grid {
            base,
            cells: cells.to_vec(),
        };
        cells.iter().all(|v| *v != 0)
            && (0..cells.len()).all(|i| {
                let mut probe = grid.clone();
                let v = probe.cells[i];
                probe.cells[i] = 0;
                probe.allows(i, v)
            })
    }

    #[test]
    fn test_sudoku_4x4() {
        let grid = Grid::parse(PUZZLE_4).expect("valid");
        let trace = Sudoku.generate(&grid).expect("generate");
        let last = trace.last().expect("non-empty").state();
        assert!(solved(&last.cells, 2));
        assert_eq!(&last.cells[..4], &[1, 2, 3, 4]);
        assert_eq!(trace.outcome(), Some(BacktrackStep::Complete));
        assert_eq!(trace.count(BacktrackStep::Solution), 1);
        // Givens never change.
        for (i, given) in last.given.iter().enumerate() {
            if *given {
                assert_eq!(last.cells[i], grid.cells()[i]);
            }
        }
    }

    #[test]
    fn test_sudoku_9x9() {
        let puzzle = "
            5 3 . . 7 . . . .
            6 . . 1 9 5 . . .
            . 9 8 . . . . 6 .
            8 . . . 6 . . . 3
            4 . . 8 . 3 . . 1
            7 . . . 2 . . . 6
            . 6 . . . . 2 8 .
            . . . 4 1 9 . . 5
            . . . . 8 . . 7 9";
        let grid = Grid::parse(puzzle).expect("valid");
        let trace = Sudoku.generate(&grid).expect("generate");
        let last = trace.last().expect("non-empty").state();
        assert!(solved(&last.cells, 3));
        assert_eq!(&last.cells[..9], &[5, 3, 4, 6, 7, 8, 9, 1, 2]);
        assert_eq!(trace.len(), 46_020);
    }

    #[test]
    fn test_sudoku_no_solution() {
        // (0, 1) cannot take 1 or 2 (row) nor 3 or 4 (column).
        let grid = Grid::parse(
            "1 . 2 .
             . 3 . .
             . 4 . .
             . . . .",
        )
        .expect("valid");
        let trace = Sudoku.generate(&grid).expect("generate");
        assert_eq!(trace.outcome(), Some(BacktrackStep::NoSolution));
        assert_eq!(trace.count(BacktrackStep::Place), trace.count(BacktrackStep::Backtrack));

        // Every digit is attempted and each one is turned away.
        let conflicts: Vec<&str> = trace
            .iter()
            .filter(|s| *s.kind() == BacktrackStep::Conflict)
            .map(|s| s.narration())
            .collect();
        assert_eq!(
            conflicts,
            [
                "1 at (0, 1) repeats in row 0",
                "2 at (0, 1) repeats in row 0",
                "3 at (0, 1) repeats in column 1",
                "4 at (0, 1) repeats in column 1",
            ]
        );
        assert_eq!(trace.len(), 7);
    }

    #[test]
    fn test_sudoku_box_conflict() {
        let grid = Grid::parse(
            "1 . . .
             2 . . .
             . . . .
             . . . .",
        )
        .expect("valid");
        let trace = Sudoku.generate(&grid).expect("generate");
        let first: Vec<&str> = trace
            .iter()
            .filter(|s| *s.kind() == BacktrackStep::Conflict)
            .take(2)
            .map(|s| s.narration())
            .collect();
        assert_eq!(
            first,
            [
                "1 at (0, 1) repeats in row 0",
                "2 at (0, 1) repeats in the box at (0, 0)",
            ]
        );
    }

    #[test]
    fn test_sudoku_attempts_every_digit() {
        let grid = Grid::parse(PUZZLE_4).expect("valid");
        let trace = Sudoku.generate(&grid).expect("generate");
        // Each focus is followed by `side` attempts (conflict or place),
        // except on the path that reaches the solution, which stops early.
        let attempts = trace.count(BacktrackStep::Conflict) + trace.count(BacktrackStep::Place);
        assert!(attempts <= trace.count(BacktrackStep::Focus) * 4);
        assert!(trace.count(BacktrackStep::Conflict) > 0);
        assert!(trace.validate().is_ok());
    }

    #[test]
    fn test_sudoku_rejects_conflicting_givens() {
        let err = Grid::parse("1 1 . . . . . . . . . . . . . .").unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_sudoku_full_grid() {
        let grid = Grid::parse("1 2 3 4 3 4 1 2 2 1 4 3 4 3 2 1").expect("valid");
        let trace = Sudoku.generate(&grid).expect("generate");
        assert_eq!(trace.len(), 3);
        assert_eq!(trace.outcome(), Some(BacktrackStep::Complete));
    }

    #[test]
    fn test_grid_display() {
        let grid = Grid::parse(PUZZLE_4).expect("valid");
        assert!(grid.to_string().starts_with("1 . . 4\n"));
    }
}
