//! Raw user input parsing and validation.
//!
//! Everything a user can type into a form ends up here first: comma-separated
//! labels and edges, comma-separated numbers, whitespace-delimited puzzle
//! grids. Failures are [`VizError::Input`] values meant to be shown back to
//! the user; no generator runs on rejected input.

use indexmap::IndexSet;

use crate::error::{VizError, VizResult};

/// Largest array accepted by the sorting inputs.
pub const MAX_ELEMENTS: usize = 200;

/// Largest key accepted by counting sort (bounds the count array).
pub const MAX_COUNTING_KEY: u32 = 999;

/// Largest N-Queens board.
pub const MAX_BOARD: usize = 8;

/// Most nodes a graph input may have.
pub const MAX_NODES: usize = 200;

/// Largest absolute edge weight. Path sums over [`MAX_NODES`] nodes stay
/// far inside `i64`.
pub const MAX_WEIGHT: i64 = 1_000_000;

/// One parsed edge, endpoints given as labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeToken {
    /// Source label.
    pub from: String,
    /// Target label.
    pub to: String,
    /// Weight, 1 if omitted.
    pub weight: i64,
}

fn tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Parse a comma-separated list of node labels (`"A, B, C"`).
///
/// # Errors
///
/// Rejects an empty list, more than [`MAX_NODES`] labels, duplicate labels,
/// and labels containing `-` or `:` (reserved by the edge syntax).
pub fn parse_labels(raw: &str) -> VizResult<IndexSet<String>> {
    let mut labels = IndexSet::new();
    for token in tokens(raw) {
        if token.contains(['-', ':']) {
            return Err(VizError::input(
                "nodes",
                format!("label '{token}' must not contain '-' or ':'"),
            ));
        }
        if !labels.insert(token.to_string()) {
            return Err(VizError::input("nodes", format!("duplicate label '{token}'")));
        }
    }
    if labels.is_empty() {
        return Err(VizError::input("nodes", "at least one node is required"));
    }
    check_node_count(labels.len())?;
    Ok(labels)
}

/// Parse a comma-separated edge list (`"A-B, B-C:4"`) against known labels.
///
/// # Errors
///
/// Rejects malformed tokens, non-integer weights, weights beyond
/// [`MAX_WEIGHT`], and unknown endpoints.
pub fn parse_edges(raw: &str, labels: &IndexSet<String>) -> VizResult<Vec<EdgeToken>> {
    tokens(raw)
        .map(|token| {
            let (pair, weight) = match token.split_once(':') {
                Some((pair, w)) => {
                    let weight = w.trim().parse::<i64>().map_err(|_| {
                        VizError::input("edges", format!("weight in '{token}' is not an integer"))
                    })?;
                    (pair, check_weight(weight)?)
                }
                None => (token, 1),
            };
            let (from, to) = pair
                .split_once('-')
                .map(|(a, b)| (a.trim(), b.trim()))
                .filter(|(a, b)| !a.is_empty() && !b.is_empty())
                .ok_or_else(|| {
                    VizError::input("edges", format!("'{token}' is not of the form A-B"))
                })?;
            for endpoint in [from, to] {
                if !labels.contains(endpoint) {
                    return Err(VizError::input(
                        "edges",
                        format!("'{token}' references unknown node '{endpoint}'"),
                    ));
                }
            }
            Ok(EdgeToken {
                from: from.to_string(),
                to: to.to_string(),
                weight,
            })
        })
        .collect()
}

/// Check a graph's node count against [`MAX_NODES`].
///
/// # Errors
///
/// Returns [`VizError::Input`] for the `nodes` field when there are too many.
pub fn check_node_count(count: usize) -> VizResult<()> {
    if count > MAX_NODES {
        return Err(VizError::input(
            "nodes",
            format!("{count} nodes given, at most {MAX_NODES} allowed"),
        ));
    }
    Ok(())
}

/// Check an edge weight against [`MAX_WEIGHT`].
///
/// # Errors
///
/// Returns [`VizError::Input`] for the `edges` field when out of range.
pub fn check_weight(weight: i64) -> VizResult<i64> {
    if !(-MAX_WEIGHT..=MAX_WEIGHT).contains(&weight) {
        return Err(VizError::input(
            "edges",
            format!("weight {weight} is outside -{MAX_WEIGHT}..={MAX_WEIGHT}"),
        ));
    }
    Ok(weight)
}

fn check_len(field: &'static str, len: usize) -> VizResult<()> {
    if len == 0 {
        return Err(VizError::input(field, "at least one value is required"));
    }
    if len > MAX_ELEMENTS {
        return Err(VizError::input(
            field,
            format!("{len} values given, at most {MAX_ELEMENTS} allowed"),
        ));
    }
    Ok(())
}

/// Parse comma-separated integers (`"5, -3, 8"`).
///
/// # Errors
///
/// Rejects non-integers, empty lists, and lists over [`MAX_ELEMENTS`].
pub fn parse_integers(raw: &str) -> VizResult<Vec<i64>> {
    let values = tokens(raw)
        .map(|t| {
            t.parse::<i64>()
                .map_err(|_| VizError::input("values", format!("'{t}' is not an integer")))
        })
        .collect::<VizResult<Vec<_>>>()?;
    check_len("values", values.len())?;
    Ok(values)
}

/// Parse comma-separated keys for counting sort: integers in
/// `0..=MAX_COUNTING_KEY`.
///
/// # Errors
///
/// Rejects negative, oversized, or non-integer keys.
pub fn parse_counting_keys(raw: &str) -> VizResult<Vec<u32>> {
    let values = tokens(raw)
        .map(|t| {
            t.parse::<u32>()
                .ok()
                .filter(|v| *v <= MAX_COUNTING_KEY)
                .ok_or_else(|| {
                    VizError::input(
                        "values",
                        format!("'{t}' is not an integer in 0..={MAX_COUNTING_KEY}"),
                    )
                })
        })
        .collect::<VizResult<Vec<_>>>()?;
    check_len("values", values.len())?;
    Ok(values)
}

/// Parse comma-separated reals in `[0, 1]` for bucket sort.
///
/// # Errors
///
/// Rejects non-numbers, NaN, and values outside `[0, 1]`.
pub fn parse_unit_interval(raw: &str) -> VizResult<Vec<f64>> {
    let values = tokens(raw)
        .map(|t| {
            t.parse::<f64>()
                .ok()
                .filter(|v| (0.0..=1.0).contains(v))
                .ok_or_else(|| {
                    VizError::input("values", format!("'{t}' is not a number in [0, 1]"))
                })
        })
        .collect::<VizResult<Vec<_>>>()?;
    check_len("values", values.len())?;
    Ok(values)
}

/// Parse a whitespace/newline-delimited square grid of digits, with `0` or
/// `.` for empty cells. Returns `(base, cells)` where the grid is
/// `base² × base²` and `cells` is row-major.
///
/// Only the shape and value range are checked here; conflicts between givens
/// are checked by the puzzle type.
///
/// # Errors
///
/// Rejects unknown tokens and grids whose cell count is not `base⁴` for
/// `base` in `2..=4`.
pub fn parse_grid(raw: &str) -> VizResult<(usize, Vec<u8>)> {
    let cells = raw
        .split_whitespace()
        .map(|t| match t {
            "." => Ok(0),
            _ => t
                .parse::<u8>()
                .map_err(|_| VizError::input("grid", format!("'{t}' is not a digit or '.'"))),
        })
        .collect::<VizResult<Vec<u8>>>()?;

    let base = (2..=4)
        .find(|b: &usize| b.pow(4) == cells.len())
        .ok_or_else(|| {
            VizError::input(
                "grid",
                format!(
                    "{} cells given, expected 16 (4x4), 81 (9x9) or 256 (16x16)",
                    cells.len()
                ),
            )
        })?;

    let side = base * base;
    if let Some(bad) = cells.iter().find(|v| usize::from(**v) > side) {
        return Err(VizError::input(
            "grid",
            format!("value {bad} is out of range for a {side}x{side} grid"),
        ));
    }
    Ok((base, cells))
}

/// Check an N-Queens board size against [`MAX_BOARD`].
///
/// # Errors
///
/// Rejects sizes outside the supported range.
pub fn check_board_size(n: usize) -> VizResult<usize> {
    if (1..=MAX_BOARD).contains(&n) {
        Ok(n)
    } else {
        Err(VizError::input("n", format!("board size {n} is outside 1..={MAX_BOARD}")))
    }
}

/// Validate a text field for the string algorithms.
///
/// # Errors
///
/// Rejects empty text.
pub fn check_text(field: &'static str, text: &str) -> VizResult<()> {
    if text.is_empty() {
        return Err(VizError::input(field, "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_labels() {
        let labels = parse_labels(" A, B ,C,, ").expect("valid");
        assert_eq!(labels.iter().collect::<Vec<_>>(), ["A", "B", "C"]);
    }

    #[test]
    fn test_parse_labels_rejects_duplicates() {
        let err = parse_labels("A, B, A").unwrap_err();
        assert!(err.to_string().contains("duplicate label 'A'"));
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_parse_labels_rejects_empty() {
        assert!(parse_labels(" , ").is_err());
        assert!(parse_labels("A-B").is_err());
    }

    #[test]
    fn test_parse_edges() {
        let labels = parse_labels("A, B, C").expect("valid");
        let edges = parse_edges("A-B, B - C:7", &labels).expect("valid");
        assert_eq!(edges.len(), 2);
        assert_eq!(edges[0].weight, 1);
        assert_eq!(edges[1].from, "B");
        assert_eq!(edges[1].to, "C");
        assert_eq!(edges[1].weight, 7);
    }

    #[test]
    fn test_parse_edges_unknown_endpoint() {
        let labels = parse_labels("A, B").expect("valid");
        let err = parse_edges("A-Z", &labels).unwrap_err();
        assert!(err.to_string().contains("unknown node 'Z'"));
    }

    #[test]
    fn test_parse_edges_malformed() {
        let labels = parse_labels("A, B").expect("valid");
        assert!(parse_edges("AB", &labels).is_err());
        assert!(parse_edges("A-", &labels).is_err());
        assert!(parse_edges("A-B:x", &labels).is_err());
    }

    #[test]
    fn test_parse_edges_weight_bounds() {
        let labels = parse_labels("A, B, C").expect("valid");
        let err = parse_edges("A-B:9223372036854775807, B-C:1", &labels).unwrap_err();
        assert!(matches!(err, VizError::Input { field: "edges", .. }));
        assert!(err.to_string().contains("outside"));
        assert!(parse_edges("A-B:-1000001", &labels).is_err());
        let edges = parse_edges("A-B:1000000, B-C:-1000000", &labels).expect("in range");
        assert_eq!(edges[0].weight, MAX_WEIGHT);
        assert_eq!(edges[1].weight, -MAX_WEIGHT);
    }

    #[test]
    fn test_parse_labels_node_limit() {
        let at_limit: Vec<String> = (0..MAX_NODES).map(|i| format!("n{i}")).collect();
        assert_eq!(parse_labels(&at_limit.join(",")).expect("at limit").len(), MAX_NODES);

        let many: Vec<String> = (0..5000).map(|i| format!("n{i}")).collect();
        let err = parse_labels(&many.join(",")).unwrap_err();
        assert!(matches!(err, VizError::Input { field: "nodes", .. }));
        assert!(err.to_string().contains("5000 nodes given"));
    }

    #[test]
    fn test_parse_integers() {
        assert_eq!(parse_integers("5, -3, 8").expect("valid"), vec![5, -3, 8]);
        assert!(parse_integers("5, x").is_err());
        assert!(parse_integers("").is_err());
        let too_many = vec!["1"; MAX_ELEMENTS + 1].join(",");
        assert!(parse_integers(&too_many).is_err());
    }

    #[test]
    fn test_parse_counting_keys() {
        assert_eq!(parse_counting_keys("4,2,8").expect("valid"), vec![4, 2, 8]);
        assert!(parse_counting_keys("-1").is_err());
        assert!(parse_counting_keys("1000").is_err());
    }

    #[test]
    fn test_parse_unit_interval() {
        let values = parse_unit_interval("0.78, 0.17, 1, 0").expect("valid");
        assert_eq!(values.len(), 4);
        assert!(parse_unit_interval("1.5").is_err());
        assert!(parse_unit_interval("NaN").is_err());
        assert!(parse_unit_interval("-0.1").is_err());
    }

    #[test]
    fn test_parse_grid_4x4() {
        let raw = "1 . . 4\n. . 1 .\n. 1 . .\n4 . . 1";
        let (base, cells) = parse_grid(raw).expect("valid");
        assert_eq!(base, 2);
        assert_eq!(cells.len(), 16);
        assert_eq!(cells[0], 1);
        assert_eq!(cells[1], 0);
    }

    #[test]
    fn test_parse_grid_rejects_bad_shape() {
        let err = parse_grid("1 2 3").unwrap_err();
        assert!(err.to_string().contains("3 cells"));
    }

    #[test]
    fn test_parse_grid_rejects_out_of_range() {
        let raw = "5 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0";
        assert!(parse_grid(raw).is_err());
        assert!(parse_grid("x 0 0 0 0 0 0 0 0 0 0 0 0 0 0 0").is_err());
    }

    #[test]
    fn test_check_board_size() {
        assert_eq!(check_board_size(8).expect("valid"), 8);
        assert!(check_board_size(0).is_err());
        assert!(check_board_size(9).is_err());
    }

    #[test]
    fn test_check_text() {
        assert!(check_text("text", "abc").is_ok());
        assert!(check_text("pattern", "").is_err());
    }
}
