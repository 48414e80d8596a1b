//! Scenario files: the shipped samples and ad-hoc YAML on disk.

use std::path::PathBuf;
use std::time::Duration;

use algoviz::prelude::*;
use algoviz::trace::ErasedKind;

fn scenario_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios")
}

fn load(name: &str) -> VizConfig {
    VizConfig::load(scenario_dir().join(name)).unwrap_or_else(|e| panic!("{name}: {e}"))
}

fn outcome(trace: &ErasedTrace) -> &'static str {
    trace.outcome().map_or("none", ErasedKind::label)
}

#[test]
fn shipped_scenarios_all_generate() {
    let mut seen = 0;
    for entry in std::fs::read_dir(scenario_dir()).expect("scenario dir") {
        let path = entry.expect("entry").path();
        if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
            continue;
        }
        let config = VizConfig::load(&path).unwrap_or_else(|e| panic!("{}: {e}", path.display()));
        let trace = config.build_trace().expect("generate");
        assert!(trace.validate().is_ok(), "{}", path.display());
        seen += 1;
    }
    assert!(seen >= 8, "only {seen} scenarios found");
}

#[test]
fn shipped_scenario_outcomes() {
    let cases = [
        ("bfs.yaml", Algorithm::Bfs, "complete"),
        ("dijkstra.yaml", Algorithm::Dijkstra, "complete"),
        ("course_plan.yaml", Algorithm::TopologicalSort, "complete"),
        ("quick_sort.yaml", Algorithm::QuickSort, "complete"),
        ("kmp.yaml", Algorithm::Kmp, "complete"),
        ("huffman.yaml", Algorithm::Huffman, "complete"),
        ("n_queens.yaml", Algorithm::NQueens, "complete"),
        ("sudoku.yaml", Algorithm::Sudoku, "complete"),
    ];
    for (file, algorithm, expected) in cases {
        let config = load(file);
        assert_eq!(config.algorithm.algorithm(), algorithm, "{file}");
        let trace = config.build_trace().expect("generate");
        assert_eq!(outcome(&trace), expected, "{file}");
    }
}

#[test]
fn autoplay_scenario_starts_running() {
    let config = load("quick_sort.yaml");
    let mut player = config.player().expect("player");
    assert_eq!(player.status(), PlayerStatus::Running);
    assert_eq!(player.speed(), Duration::from_millis(250));

    assert_eq!(player.advance(Duration::from_millis(750)), 3);
    assert_eq!(player.cursor(), 3);
}

#[test]
fn sudoku_scenario_fills_the_grid() {
    let trace = load("sudoku.yaml").build_trace().expect("generate");
    let last = trace.last().expect("non-empty");
    let first_row: Vec<u64> = last.state()["cells"]
        .as_array()
        .expect("cells array")
        .iter()
        .take(9)
        .filter_map(serde_json::Value::as_u64)
        .collect();
    assert_eq!(first_row, [5, 3, 4, 6, 7, 8, 9, 1, 2]);
}

#[test]
fn yaml_round_trip_through_disk() {
    let config = VizConfig::builder()
        .name("round trip")
        .algorithm(AlgorithmSpec::sample(Algorithm::BucketSort))
        .speed_ms(120)
        .build()
        .expect("valid");

    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("bucket.yaml");
    std::fs::write(&path, config.to_yaml().expect("serialize")).expect("write");

    let loaded = VizConfig::load(&path).expect("load");
    assert_eq!(loaded.scenario.name, "round trip");
    assert_eq!(loaded.algorithm, config.algorithm);
    assert_eq!(loaded.player.speed_ms, 120);
    assert_eq!(
        loaded.build_trace().expect("generate"),
        config.build_trace().expect("generate")
    );
}

#[test]
fn bad_scenarios_are_rejected() {
    let dir = tempfile::tempdir().expect("tempdir");
    let cases = [
        ("edge.yaml", "algorithm:\n  id: bfs\n  nodes: 'A, B'\n  edges: 'A-Z'\n"),
        ("range.yaml", "algorithm:\n  id: bucket_sort\n  values: '0.5, 1.5'\n"),
        ("grid.yaml", "algorithm:\n  id: sudoku\n  grid: '1 1 . . . . . . . . . . . . . .'\n"),
        ("schema.yaml", "schema_version: '2.0'\nalgorithm:\n  id: n_queens\n  n: 4\n"),
    ];
    for (name, yaml) in cases {
        let path = dir.path().join(name);
        std::fs::write(&path, yaml).expect("write");
        assert!(VizConfig::load(&path).is_err(), "{name} should be rejected");
    }
}

#[test]
fn negative_weights_fail_at_generation() {
    let config = VizConfig::from_yaml(
        "algorithm:\n  id: dijkstra\n  nodes: 'A, B'\n  edges: 'A-B:-3'\n",
    )
    .expect("edges parse");
    assert!(matches!(
        config.build_trace(),
        Err(VizError::Input { field: "edges", .. })
    ));
}

#[test]
fn small_budget_fails_generation() {
    let config = VizConfig::from_yaml(
        "limits:\n  max_snapshots: 5\nalgorithm:\n  id: bubble_sort\n  values: '5, 4, 3, 2, 1'\n",
    )
    .expect("valid");
    assert!(matches!(
        config.build_trace(),
        Err(VizError::TraceLimit { limit: 5 })
    ));
}

#[test]
fn overflowing_weights_are_rejected() {
    for id in ["dijkstra", "prim"] {
        let yaml = format!(
            "algorithm:\n  id: {id}\n  nodes: 'A, B, C'\n  edges: 'A-B:{max}, B-C:{max}'\n",
            max = i64::MAX
        );
        assert!(
            matches!(
                VizConfig::from_yaml(&yaml),
                Err(VizError::Input { field: "edges", .. })
            ),
            "{id} should reject the weight"
        );
    }
}

#[test]
fn largest_weights_still_generate() {
    let max = algoviz::input::MAX_WEIGHT;
    for id in ["dijkstra", "prim"] {
        let yaml = format!(
            "algorithm:\n  id: {id}\n  nodes: 'A, B, C'\n  edges: 'A-B:{max}, B-C:{max}, A-C:{max}'\n"
        );
        let trace = VizConfig::from_yaml(&yaml)
            .expect("valid")
            .build_trace()
            .expect("generate");
        assert_eq!(outcome(&trace), "complete", "{id}");
    }
}

#[test]
fn oversized_node_sets_are_rejected() {
    let nodes: Vec<String> = (0..5000).map(|i| format!("n{i}")).collect();
    let yaml = format!("algorithm:\n  id: bfs\n  nodes: '{}'\n  edges: ''\n", nodes.join(", "));
    assert!(matches!(
        VizConfig::from_yaml(&yaml),
        Err(VizError::Input { field: "nodes", .. })
    ));

    let nodes: Vec<String> = (0..algoviz::input::MAX_NODES).map(|i| format!("n{i}")).collect();
    let edges: Vec<String> = nodes.windows(2).map(|w| format!("{}-{}", w[0], w[1])).collect();
    let yaml = format!(
        "algorithm:\n  id: bfs\n  nodes: '{}'\n  edges: '{}'\n",
        nodes.join(", "),
        edges.join(", ")
    );
    let trace = VizConfig::from_yaml(&yaml)
        .expect("at the node limit")
        .build_trace()
        .expect("generate");
    assert_eq!(outcome(&trace), "complete");
}
