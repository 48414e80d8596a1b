//! Scenario configuration with YAML schema and validation.
//!
//! A scenario names one algorithm, its raw inputs, and how to play the
//! resulting trace. Checks run in three layers:
//! - serde rejects unknown fields and malformed shapes
//! - `validator` derives enforce numeric ranges and non-empty strings
//! - a semantic pass parses the raw inputs the way the generator will

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::algorithms::backtracking::{Grid, NQueens, Sudoku};
use crate::algorithms::graph::{
    BreadthFirstSearch, DepthFirstSearch, Dijkstra, Graph, GraphQuery, Prim, TopologicalSort,
};
use crate::algorithms::sorting::{
    BubbleSort, BucketSort, CountingSort, InsertionSort, MergeSort, QuickSort, SelectionSort,
};
use crate::algorithms::text::{Huffman, Kmp, SearchQuery};
use crate::catalog::Algorithm;
use crate::error::{VizError, VizResult};
use crate::input;
use crate::player::Player;
use crate::trace::{ErasedKind, ErasedTrace, TraceGenerator, DEFAULT_MAX_SNAPSHOTS};

/// Top-level scenario configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct VizConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Scenario metadata.
    #[serde(default)]
    pub scenario: ScenarioMeta,

    /// Playback settings.
    #[validate(nested)]
    #[serde(default)]
    pub player: PlayerConfig,

    /// Resource limits.
    #[validate(nested)]
    #[serde(default)]
    pub limits: LimitsConfig,

    /// Algorithm and its raw inputs.
    pub algorithm: AlgorithmSpec,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl VizConfig {
    /// Load a scenario from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> VizResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse a scenario from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> VizResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }

    /// Serialize back to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> VizResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder for programmatic construction.
    #[must_use]
    pub fn builder() -> VizConfigBuilder {
        VizConfigBuilder::default()
    }

    /// Validate constraints the schema cannot express.
    fn validate_semantic(&self) -> VizResult<()> {
        if !self.schema_version.starts_with("1.") {
            return Err(VizError::config(format!(
                "unsupported schema version '{}', expected 1.x",
                self.schema_version
            )));
        }
        self.algorithm.check()
    }

    /// Generate the trace this scenario describes.
    ///
    /// # Errors
    ///
    /// Returns input errors, generator errors, or [`VizError::TraceLimit`]
    /// when the trace outgrows `limits.max_snapshots`.
    pub fn build_trace(&self) -> VizResult<ErasedTrace> {
        self.algorithm.generate(self.limits.max_snapshots)
    }

    /// Playback interval.
    #[must_use]
    pub const fn speed(&self) -> Duration {
        self.player.speed()
    }

    /// Generate the trace and load it into a player set up as configured.
    ///
    /// With `autoplay` the player is already running.
    ///
    /// # Errors
    ///
    /// Same as [`VizConfig::build_trace`].
    pub fn player(&self) -> VizResult<Player<ErasedKind, serde_json::Value>> {
        let mut player = Player::with_speed(self.speed());
        player.load_new_trace(self.build_trace()?)?;
        if self.player.autoplay {
            player.play();
        }
        Ok(player)
    }
}

impl Default for VizConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            scenario: ScenarioMeta::default(),
            player: PlayerConfig::default(),
            limits: LimitsConfig::default(),
            algorithm: AlgorithmSpec::sample(Algorithm::Bfs),
        }
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct VizConfigBuilder {
    name: Option<String>,
    algorithm: Option<AlgorithmSpec>,
    speed_ms: Option<u64>,
    autoplay: Option<bool>,
    max_snapshots: Option<usize>,
}

impl VizConfigBuilder {
    /// Set the scenario name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the algorithm and its inputs.
    #[must_use]
    pub fn algorithm(mut self, spec: AlgorithmSpec) -> Self {
        self.algorithm = Some(spec);
        self
    }

    /// Set the playback interval in milliseconds.
    #[must_use]
    pub const fn speed_ms(mut self, ms: u64) -> Self {
        self.speed_ms = Some(ms);
        self
    }

    /// Start playing as soon as the trace is loaded.
    #[must_use]
    pub const fn autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = Some(autoplay);
        self
    }

    /// Set the snapshot budget.
    #[must_use]
    pub const fn max_snapshots(mut self, limit: usize) -> Self {
        self.max_snapshots = Some(limit);
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`VizConfig::from_yaml`] would for the
    /// equivalent file.
    pub fn build(self) -> VizResult<VizConfig> {
        let mut config = VizConfig::default();
        if let Some(name) = self.name {
            config.scenario.name = name;
        }
        if let Some(spec) = self.algorithm {
            config.algorithm = spec;
        }
        if let Some(ms) = self.speed_ms {
            config.player.speed_ms = ms;
        }
        if let Some(autoplay) = self.autoplay {
            config.player.autoplay = autoplay;
        }
        if let Some(limit) = self.max_snapshots {
            config.limits.max_snapshots = limit;
        }
        config.validate()?;
        config.validate_semantic()?;
        Ok(config)
    }
}

/// Scenario metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioMeta {
    /// Scenario name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
}

/// Playback settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlayerConfig {
    /// Milliseconds between automatic steps.
    #[validate(range(min = 10, max = 5000))]
    #[serde(default = "default_speed_ms")]
    pub speed_ms: u64,
    /// Start playing immediately.
    #[serde(default)]
    pub autoplay: bool,
}

const fn default_speed_ms() -> u64 {
    500
}

impl PlayerConfig {
    /// Interval as a [`Duration`].
    #[must_use]
    pub const fn speed(&self) -> Duration {
        Duration::from_millis(self.speed_ms)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            speed_ms: default_speed_ms(),
            autoplay: false,
        }
    }
}

/// Resource limits.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LimitsConfig {
    /// Largest trace a generator may produce.
    #[validate(range(min = 2, max = 5_000_000))]
    #[serde(default = "default_max_snapshots")]
    pub max_snapshots: usize,
}

const fn default_max_snapshots() -> usize {
    DEFAULT_MAX_SNAPSHOTS
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_snapshots: default_max_snapshots(),
        }
    }
}

/// Graph inputs in the form a user types them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GraphSpec {
    /// Comma-separated labels.
    #[validate(length(min = 1))]
    pub nodes: String,
    /// Comma-separated edges, `A-B` or `A-B:weight`.
    #[serde(default)]
    pub edges: String,
    /// Start node; defaults to the first label.
    #[serde(default)]
    pub start: Option<String>,
    /// One-way edges; defaults to true for topological sort only.
    #[serde(default)]
    pub directed: Option<bool>,
}

impl GraphSpec {
    fn query(&self, default_directed: bool) -> VizResult<GraphQuery> {
        let directed = self.directed.unwrap_or(default_directed);
        let graph = Graph::parse(&self.nodes, &self.edges, directed)?;
        let start = match &self.start {
            Some(start) => start.clone(),
            None => graph.labels().next().unwrap_or_default().to_string(),
        };
        Ok(GraphQuery::new(graph, start))
    }
}

/// Array inputs, comma-separated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ArraySpec {
    /// Comma-separated numbers.
    #[validate(length(min = 1))]
    pub values: String,
}

/// KMP inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct KmpSpec {
    /// Text to search.
    #[validate(length(min = 1))]
    pub text: String,
    /// Pattern to find.
    #[validate(length(min = 1))]
    pub pattern: String,
}

/// Huffman input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TextSpec {
    /// Text to encode.
    #[validate(length(min = 1))]
    pub text: String,
}

/// N-Queens input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct BoardSpec {
    /// Board size.
    #[validate(range(min = 1, max = 8))]
    pub n: usize,
}

/// Sudoku input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GridSpec {
    /// Whitespace-delimited cells, `.` or `0` for empty.
    #[validate(length(min = 1))]
    pub grid: String,
}

/// Algorithm selection, tagged by the catalog id.
///
/// ```yaml
/// algorithm:
///   id: dijkstra
///   nodes: "A, B, C"
///   edges: "A-B:4, B-C:1"
///   start: A
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "id", rename_all = "snake_case")]
pub enum AlgorithmSpec {
    /// Breadth-first search.
    Bfs(GraphSpec),
    /// Depth-first search.
    Dfs(GraphSpec),
    /// Dijkstra's shortest paths.
    Dijkstra(GraphSpec),
    /// Prim's spanning tree.
    Prim(GraphSpec),
    /// Kahn's topological sort.
    TopologicalSort(GraphSpec),
    /// Bubble sort.
    BubbleSort(ArraySpec),
    /// Selection sort.
    SelectionSort(ArraySpec),
    /// Insertion sort.
    InsertionSort(ArraySpec),
    /// Merge sort.
    MergeSort(ArraySpec),
    /// Quick sort.
    QuickSort(ArraySpec),
    /// Counting sort (non-negative integers).
    CountingSort(ArraySpec),
    /// Bucket sort (values in `[0, 1]`).
    BucketSort(ArraySpec),
    /// KMP search.
    Kmp(KmpSpec),
    /// Huffman coding.
    Huffman(TextSpec),
    /// N-Queens.
    NQueens(BoardSpec),
    /// Sudoku.
    Sudoku(GridSpec),
}

impl AlgorithmSpec {
    /// Catalog entry this spec selects.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        match self {
            Self::Bfs(_) => Algorithm::Bfs,
            Self::Dfs(_) => Algorithm::Dfs,
            Self::Dijkstra(_) => Algorithm::Dijkstra,
            Self::Prim(_) => Algorithm::Prim,
            Self::TopologicalSort(_) => Algorithm::TopologicalSort,
            Self::BubbleSort(_) => Algorithm::BubbleSort,
            Self::SelectionSort(_) => Algorithm::SelectionSort,
            Self::InsertionSort(_) => Algorithm::InsertionSort,
            Self::MergeSort(_) => Algorithm::MergeSort,
            Self::QuickSort(_) => Algorithm::QuickSort,
            Self::CountingSort(_) => Algorithm::CountingSort,
            Self::BucketSort(_) => Algorithm::BucketSort,
            Self::Kmp(_) => Algorithm::Kmp,
            Self::Huffman(_) => Algorithm::Huffman,
            Self::NQueens(_) => Algorithm::NQueens,
            Self::Sudoku(_) => Algorithm::Sudoku,
        }
    }

    /// Built-in sample inputs for an algorithm.
    #[must_use]
    pub fn sample(algorithm: Algorithm) -> Self {
        let traversal = || GraphSpec {
            nodes: "A, B, C, D, E, F".to_string(),
            edges: "A-B, A-D, B-C, B-D, C-E, D-F, E-F".to_string(),
            start: Some("A".to_string()),
            directed: None,
        };
        let weighted = || GraphSpec {
            nodes: "A, B, C, D, E".to_string(),
            edges: "A-B:4, A-D:2, B-C:5, B-D:1, C-E:2, D-E:8, D-C:6".to_string(),
            start: Some("A".to_string()),
            directed: None,
        };
        let array = |values: &str| ArraySpec {
            values: values.to_string(),
        };
        let mixed = || array("64, 34, 25, 12, 22, 11, 90, 88, 45, 50");
        match algorithm {
            Algorithm::Bfs => Self::Bfs(traversal()),
            Algorithm::Dfs => Self::Dfs(traversal()),
            Algorithm::Dijkstra => Self::Dijkstra(weighted()),
            Algorithm::Prim => Self::Prim(weighted()),
            Algorithm::TopologicalSort => Self::TopologicalSort(GraphSpec {
                nodes: "Intro, Data, Algo, Systems, Compilers".to_string(),
                edges: "Intro-Data, Intro-Systems, Data-Algo, Systems-Compilers, Algo-Compilers"
                    .to_string(),
                start: None,
                directed: Some(true),
            }),
            Algorithm::BubbleSort => Self::BubbleSort(mixed()),
            Algorithm::SelectionSort => Self::SelectionSort(mixed()),
            Algorithm::InsertionSort => Self::InsertionSort(mixed()),
            Algorithm::MergeSort => Self::MergeSort(mixed()),
            Algorithm::QuickSort => Self::QuickSort(mixed()),
            Algorithm::CountingSort => Self::CountingSort(array("4, 2, 8, 3, 1, 9, 6, 5, 7")),
            Algorithm::BucketSort => {
                Self::BucketSort(array("0.78, 0.17, 0.39, 0.26, 0.72, 0.94, 0.21, 0.12"))
            }
            Algorithm::Kmp => Self::Kmp(KmpSpec {
                text: "ABABDABACDABABCABAB".to_string(),
                pattern: "ABABCABAB".to_string(),
            }),
            Algorithm::Huffman => Self::Huffman(TextSpec {
                text: "abracadabra".to_string(),
            }),
            Algorithm::NQueens => Self::NQueens(BoardSpec { n: 4 }),
            Algorithm::Sudoku => Self::Sudoku(GridSpec {
                grid: "1 . . 4\n. . 1 .\n. 1 . .\n4 . . 1".to_string(),
            }),
        }
    }

    /// Run the derive checks of the selected variant and parse its inputs.
    ///
    /// # Errors
    ///
    /// Returns [`VizError::Validation`] or [`VizError::Input`].
    pub fn check(&self) -> VizResult<()> {
        match self {
            Self::Bfs(g) | Self::Dfs(g) | Self::Dijkstra(g) | Self::Prim(g) => {
                g.validate()?;
                g.query(false).map(drop)
            }
            Self::TopologicalSort(g) => {
                g.validate()?;
                g.query(true).map(drop)
            }
            Self::BubbleSort(a)
            | Self::SelectionSort(a)
            | Self::InsertionSort(a)
            | Self::MergeSort(a)
            | Self::QuickSort(a) => {
                a.validate()?;
                input::parse_integers(&a.values).map(drop)
            }
            Self::CountingSort(a) => {
                a.validate()?;
                input::parse_counting_keys(&a.values).map(drop)
            }
            Self::BucketSort(a) => {
                a.validate()?;
                input::parse_unit_interval(&a.values).map(drop)
            }
            Self::Kmp(k) => Ok(k.validate()?),
            Self::Huffman(t) => Ok(t.validate()?),
            Self::NQueens(b) => Ok(b.validate()?),
            Self::Sudoku(s) => {
                s.validate()?;
                Grid::parse(&s.grid).map(drop)
            }
        }
    }

    /// Parse the inputs and run the generator with a snapshot budget.
    ///
    /// # Errors
    ///
    /// Returns input errors or any generator error.
    pub fn generate(&self, limit: usize) -> VizResult<ErasedTrace> {
        match self {
            Self::Bfs(g) => BreadthFirstSearch.generate_erased(&g.query(false)?, limit),
            Self::Dfs(g) => DepthFirstSearch.generate_erased(&g.query(false)?, limit),
            Self::Dijkstra(g) => Dijkstra.generate_erased(&g.query(false)?, limit),
            Self::Prim(g) => Prim.generate_erased(&g.query(false)?, limit),
            Self::TopologicalSort(g) => TopologicalSort.generate_erased(&g.query(true)?, limit),
            Self::BubbleSort(a) => BubbleSort.generate_erased(&input::parse_integers(&a.values)?, limit),
            Self::SelectionSort(a) => {
                SelectionSort.generate_erased(&input::parse_integers(&a.values)?, limit)
            }
            Self::InsertionSort(a) => {
                InsertionSort.generate_erased(&input::parse_integers(&a.values)?, limit)
            }
            Self::MergeSort(a) => MergeSort.generate_erased(&input::parse_integers(&a.values)?, limit),
            Self::QuickSort(a) => QuickSort.generate_erased(&input::parse_integers(&a.values)?, limit),
            Self::CountingSort(a) => {
                CountingSort.generate_erased(&input::parse_counting_keys(&a.values)?, limit)
            }
            Self::BucketSort(a) => {
                BucketSort.generate_erased(&input::parse_unit_interval(&a.values)?, limit)
            }
            Self::Kmp(k) => Kmp.generate_erased(&SearchQuery::new(&k.text, &k.pattern), limit),
            Self::Huffman(t) => Huffman.generate_erased(t.text.as_str(), limit),
            Self::NQueens(b) => NQueens.generate_erased(&b.n, limit),
            Self::Sudoku(s) => Sudoku.generate_erased(&Grid::parse(&s.grid)?, limit),
        }
    }
}
