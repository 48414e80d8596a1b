//! # algoviz
//!
//! Step-by-step algorithm visualizer core.
//!
//! Every algorithm runs eagerly and records a [`Trace`](trace::Trace) of
//! immutable snapshots, one per learner-visible transition. A
//! [`Player`](player::Player) then walks the trace with play, pause, step,
//! reset and speed control, driven by a single cancellable timer.
//!
//! - Generators are pure: same input, same trace
//! - Traces are shared read-only and never change after generation
//! - The player owns all mutable playback state
//!
//! ## Example
//!
//! ```rust
//! use algoviz::prelude::*;
//! use std::time::Duration;
//!
//! let graph = Graph::parse("A, B, C", "A-B, B-C", false).unwrap();
//! let trace = BreadthFirstSearch.generate(&GraphQuery::new(graph, "A")).unwrap();
//!
//! let mut player = Player::with_speed(Duration::from_millis(100));
//! player.load_new_trace(trace).unwrap();
//! player.play();
//! player.advance(Duration::from_secs(10));
//! assert_eq!(player.status(), PlayerStatus::Finished);
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::too_many_lines,
    clippy::missing_const_for_fn,
    clippy::needless_range_loop,
    clippy::needless_pass_by_value,
)]

pub mod algorithms;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod player;
pub mod trace;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::algorithms::backtracking::{BacktrackStep, Grid, NQueens, Sudoku};
    pub use crate::algorithms::graph::{
        BreadthFirstSearch, DepthFirstSearch, Dijkstra, Graph, GraphQuery, GraphStep, Prim,
        TopologicalSort,
    };
    pub use crate::algorithms::sorting::{
        BubbleSort, BucketSort, CountingSort, InsertionSort, MergeSort, QuickSort, SelectionSort,
        SortStep,
    };
    pub use crate::algorithms::text::{Huffman, HuffmanStep, Kmp, KmpStep, SearchQuery};
    pub use crate::catalog::{Algorithm, Category, ViewMode};
    pub use crate::config::{AlgorithmSpec, VizConfig, VizConfigBuilder};
    pub use crate::engine::{PlaybackTime, TimerHandle};
    pub use crate::error::{VizError, VizResult};
    pub use crate::player::{Player, PlayerStatus};
    pub use crate::trace::{ErasedTrace, Snapshot, StepKind, Trace, TraceBuilder, TraceGenerator};
}

/// Re-export for public API
pub use error::{VizError, VizResult};
