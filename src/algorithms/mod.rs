//! Instrumented algorithm implementations.
//!
//! Each submodule holds one algorithm family. Every algorithm is a unit
//! struct implementing [`TraceGenerator`](crate::trace::TraceGenerator); the
//! family shares a step-kind enum and, where the data shape allows, a
//! snapshot state type.
//!
//! # Families
//!
//! 1. [`graph`] - BFS, DFS, Dijkstra, Prim, topological sort
//! 2. [`sorting`] - bubble, selection, insertion, merge, quick, counting, bucket
//! 3. [`text`] - KMP search, Huffman coding
//! 4. [`backtracking`] - N-Queens, Sudoku

/// Implements [`StepKind`](crate::trace::StepKind) for a family enum.
///
/// `label` is the `snake_case` variant name; the `initial` and `terminal`
/// lists name the variants that may open and close a trace.
macro_rules! step_kind {
    (
        $kind:ident {
            $($variant:ident => $label:literal),+ $(,)?
        }
        initial: [$($initial:ident),+]
        terminal: [$($terminal:ident),+]
    ) => {
        impl $crate::trace::StepKind for $kind {
            fn label(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            fn is_initial(self) -> bool {
                matches!(self, $(Self::$initial)|+)
            }

            fn is_terminal(self) -> bool {
                matches!(self, $(Self::$terminal)|+)
            }
        }
    };
}

pub(crate) use step_kind;

pub mod backtracking;
pub mod graph;
pub mod sorting;
pub mod text;
