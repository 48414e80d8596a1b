//! Catalog of every visualization the crate can generate.
//!
//! The catalog is what a browsing page lists: one [`Algorithm`] per page,
//! grouped by [`Category`], each with a one-line summary and pseudocode.
//! [`ViewMode`] is the closed set of panels a page can show.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::VizError;

/// Grouping used for browsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Traversal, shortest paths, spanning trees, ordering.
    Graph,
    /// Comparison and distribution sorts.
    Sorting,
    /// String matching and compression.
    Text,
    /// Constraint search with undo.
    Backtracking,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Graph => "Graph",
            Self::Sorting => "Sorting",
            Self::Text => "Text",
            Self::Backtracking => "Backtracking",
        };
        f.write_str(name)
    }
}

/// Panel shown on an algorithm page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Animated trace playback.
    #[default]
    Visualizer,
    /// Summary and complexity notes.
    Theory,
    /// Step-by-step pseudocode.
    Pseudocode,
}

impl ViewMode {
    /// All modes in tab order.
    pub const ALL: [Self; 3] = [Self::Visualizer, Self::Theory, Self::Pseudocode];

    /// Next tab, wrapping around.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Visualizer => Self::Theory,
            Self::Theory => Self::Pseudocode,
            Self::Pseudocode => Self::Visualizer,
        }
    }
}

impl FromStr for ViewMode {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "visualizer" => Ok(Self::Visualizer),
            "theory" => Ok(Self::Theory),
            "pseudocode" => Ok(Self::Pseudocode),
            other => Err(VizError::config(format!("unknown view mode '{other}'"))),
        }
    }
}

/// Every algorithm with a trace generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Breadth-first search.
    Bfs,
    /// Depth-first search.
    Dfs,
    /// Dijkstra's single-source shortest paths.
    Dijkstra,
    /// Prim's minimum spanning tree.
    Prim,
    /// Kahn's topological sort.
    TopologicalSort,
    /// Bubble sort.
    BubbleSort,
    /// Selection sort.
    SelectionSort,
    /// Insertion sort.
    InsertionSort,
    /// Top-down merge sort.
    MergeSort,
    /// Quick sort with Lomuto partitioning.
    QuickSort,
    /// Stable counting sort.
    CountingSort,
    /// Bucket sort over `[0, 1]`.
    BucketSort,
    /// Knuth-Morris-Pratt string search.
    Kmp,
    /// Huffman coding.
    Huffman,
    /// N-Queens, all solutions.
    NQueens,
    /// Sudoku solver.
    Sudoku,
}

impl Algorithm {
    /// Every algorithm in catalog order.
    pub const ALL: [Self; 16] = [
        Self::Bfs,
        Self::Dfs,
        Self::Dijkstra,
        Self::Prim,
        Self::TopologicalSort,
        Self::BubbleSort,
        Self::SelectionSort,
        Self::InsertionSort,
        Self::MergeSort,
        Self::QuickSort,
        Self::CountingSort,
        Self::BucketSort,
        Self::Kmp,
        Self::Huffman,
        Self::NQueens,
        Self::Sudoku,
    ];

    /// Stable identifier (matches the YAML `algorithm:` tag).
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Dijkstra => "dijkstra",
            Self::Prim => "prim",
            Self::TopologicalSort => "topological_sort",
            Self::BubbleSort => "bubble_sort",
            Self::SelectionSort => "selection_sort",
            Self::InsertionSort => "insertion_sort",
            Self::MergeSort => "merge_sort",
            Self::QuickSort => "quick_sort",
            Self::CountingSort => "counting_sort",
            Self::BucketSort => "bucket_sort",
            Self::Kmp => "kmp",
            Self::Huffman => "huffman",
            Self::NQueens => "n_queens",
            Self::Sudoku => "sudoku",
        }
    }

    /// Display name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "Breadth-First Search",
            Self::Dfs => "Depth-First Search",
            Self::Dijkstra => "Dijkstra's Algorithm",
            Self::Prim => "Prim's Algorithm",
            Self::TopologicalSort => "Topological Sort",
            Self::BubbleSort => "Bubble Sort",
            Self::SelectionSort => "Selection Sort",
            Self::InsertionSort => "Insertion Sort",
            Self::MergeSort => "Merge Sort",
            Self::QuickSort => "Quick Sort",
            Self::CountingSort => "Counting Sort",
            Self::BucketSort => "Bucket Sort",
            Self::Kmp => "Knuth-Morris-Pratt",
            Self::Huffman => "Huffman Coding",
            Self::NQueens => "N-Queens",
            Self::Sudoku => "Sudoku Solver",
        }
    }

    /// Browsing category.
    #[must_use]
    pub const fn category(self) -> Category {
        match self {
            Self::Bfs | Self::Dfs | Self::Dijkstra | Self::Prim | Self::TopologicalSort => {
                Category::Graph
            }
            Self::BubbleSort
            | Self::SelectionSort
            | Self::InsertionSort
            | Self::MergeSort
            | Self::QuickSort
            | Self::CountingSort
            | Self::BucketSort => Category::Sorting,
            Self::Kmp | Self::Huffman => Category::Text,
            Self::NQueens | Self::Sudoku => Category::Backtracking,
        }
    }

    /// One-line summary with time complexity.
    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Bfs => "Visit nodes level by level with a FIFO queue. O(V + E).",
            Self::Dfs => "Follow each branch to its end before backtracking. O(V + E).",
            Self::Dijkstra => "Shortest paths from one source with non-negative weights. O(V^2).",
            Self::Prim => "Grow a minimum spanning tree from a start node. O(V^2).",
            Self::TopologicalSort => "Order a DAG so every edge points forward. O(V + E).",
            Self::BubbleSort => "Swap adjacent out-of-order pairs until none remain. O(n^2).",
            Self::SelectionSort => "Move the minimum of the unsorted suffix to its front. O(n^2).",
            Self::InsertionSort => "Insert each element into the sorted prefix. O(n^2).",
            Self::MergeSort => "Sort halves recursively, then merge them. O(n log n).",
            Self::QuickSort => "Partition around a pivot, sort both sides. O(n log n) average.",
            Self::CountingSort => "Count keys, prefix-sum, place stably. O(n + k).",
            Self::BucketSort => "Scatter [0,1] values into buckets, sort each, gather. O(n) average.",
            Self::Kmp => "Search text using a failure table to avoid re-comparisons. O(n + m).",
            Self::Huffman => "Merge the two rarest symbols until one tree remains. O(n log n).",
            Self::NQueens => "Place N non-attacking queens column by column. O(N!).",
            Self::Sudoku => "Fill empty cells with backtracking over 1..N. Exponential.",
        }
    }

    /// Short pseudocode, one line per entry.
    #[must_use]
    pub const fn pseudocode(self) -> &'static [&'static str] {
        match self {
            Self::Bfs => &[
                "mark start visited, level[start] = 0, enqueue start",
                "while queue not empty:",
                "  u = dequeue()",
                "  for v in adj[u]:",
                "    if v not visited: mark v, level[v] = level[u] + 1, enqueue v",
            ],
            Self::Dfs => &[
                "dfs(u):",
                "  mark u visited",
                "  for v in adj[u]:",
                "    if v not visited: dfs(v)",
            ],
            Self::Dijkstra => &[
                "dist[*] = inf, dist[source] = 0",
                "repeat V times:",
                "  u = unvisited node with minimum dist",
                "  mark u visited",
                "  for (v, w) in adj[u]: if dist[u] + w < dist[v]: dist[v] = dist[u] + w",
            ],
            Self::Prim => &[
                "key[*] = inf, key[start] = 0",
                "repeat V times:",
                "  u = node not in tree with minimum key",
                "  add u (and its parent edge) to the tree",
                "  for (v, w) in adj[u]: if v not in tree and w < key[v]: key[v] = w, parent[v] = u",
            ],
            Self::TopologicalSort => &[
                "compute in-degree of every node",
                "queue = nodes with in-degree 0",
                "while queue not empty:",
                "  u = dequeue(), append u to order",
                "  for v in adj[u]: in-degree[v] -= 1; if 0: enqueue v",
                "if |order| < V: cycle detected",
            ],
            Self::BubbleSort => &[
                "for i in 0..n-1:",
                "  for j in 0..n-1-i:",
                "    if a[j] > a[j+1]: swap(a[j], a[j+1])",
                "  stop early if no swap happened",
            ],
            Self::SelectionSort => &[
                "for i in 0..n-1:",
                "  min = i",
                "  for j in i+1..n: if a[j] < a[min]: min = j",
                "  swap(a[i], a[min])",
            ],
            Self::InsertionSort => &[
                "for i in 1..n:",
                "  j = i",
                "  while j > 0 and a[j-1] > a[j]: swap(a[j-1], a[j]), j -= 1",
            ],
            Self::MergeSort => &[
                "sort(lo, hi):",
                "  if lo >= hi: return",
                "  mid = (lo + hi) / 2; sort(lo, mid); sort(mid + 1, hi)",
                "  merge a[lo..=mid] and a[mid+1..=hi], taking the left on ties",
            ],
            Self::QuickSort => &[
                "sort(lo, hi):",
                "  if lo >= hi: return",
                "  pivot = a[hi]; i = lo",
                "  for j in lo..hi: if a[j] < pivot: swap(a[i], a[j]), i += 1",
                "  swap(a[i], a[hi]); sort(lo, i-1); sort(i+1, hi)",
            ],
            Self::CountingSort => &[
                "count[k] = occurrences of k",
                "count[k] += count[k-1] for k in 1..=max",
                "for x in input reversed: output[--count[x]] = x",
            ],
            Self::BucketSort => &[
                "for x in input: buckets[floor(x * n)].push(x)",
                "insertion-sort each bucket",
                "concatenate buckets",
            ],
            Self::Kmp => &[
                "build lps: len = 0; for i in 1..m:",
                "  while len > 0 and p[i] != p[len]: len = lps[len-1]",
                "  if p[i] == p[len]: len += 1; lps[i] = len",
                "search: j = 0; for i in 0..n:",
                "  while j > 0 and t[i] != p[j]: j = lps[j-1]",
                "  if t[i] == p[j]: j += 1; if j == m: report i-m+1, j = lps[j-1]",
            ],
            Self::Huffman => &[
                "create a leaf per symbol with its frequency",
                "while more than one node:",
                "  a, b = two lowest-frequency nodes",
                "  insert node(a.freq + b.freq, left = a, right = b)",
                "assign 0 to left edges and 1 to right edges",
            ],
            Self::NQueens => &[
                "solve(col):",
                "  if col == n: record solution",
                "  for row in 0..n:",
                "    if safe(row, col): place, solve(col + 1), remove",
            ],
            Self::Sudoku => &[
                "solve():",
                "  cell = first empty cell, if none: solved",
                "  for v in 1..=N:",
                "    if v not in row, column or box: place v; if solve(): return true",
                "  clear cell; return false",
            ],
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|a| a.id() == wanted)
            .ok_or_else(|| VizError::config(format!("unknown algorithm '{s}'")))
    }
}
