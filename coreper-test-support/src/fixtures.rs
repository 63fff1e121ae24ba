//! Edge-list fixtures shared by the core and CLI test suites.
//!
//! The constants are small enough to reason about by hand; the expected
//! extraction results quoted in their docs are asserted by the tests that
//! use them.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Triangle `A-B-C` plus a detached pair `D-E`.
///
/// Only the triangle survives graph construction.
pub const TRIANGLE_WITH_DETACHED_PAIR: &str = "\
# triangle with a detached pair
A B
B C
C A
D E
";

/// Complete graph on `a b c d` with a tail `d-e-f`.
///
/// Internal ids follow first appearance: `a=0 b=1 c=2 d=3 e=4 f=5`.
/// Rich club promotes `{a, b, d}`; densest core promotes `{c, d}`.
pub const K4_WITH_TAIL: &str = "\
a b
a c
a d
b c
b d
c d
d e
e f
";

/// Four-cycle `0-1-2-3-0`.
pub const FOUR_CYCLE: &str = "\
0 1
1 2
2 3
3 0
";

/// Writes `contents` to `dir/name` and returns the full path.
///
/// # Errors
/// Returns any I/O error raised while writing the file.
pub fn write_edge_list(dir: &Path, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

/// Renders token pairs as an edge-list document.
#[must_use]
pub fn render_edge_list(edges: &[(String, String)]) -> String {
    edges
        .iter()
        .map(|(source, target)| format!("{source} {target}\n"))
        .collect()
}

/// Edges of the complete graph on `n` nodes named `0..n`.
#[must_use]
pub fn complete_edges(n: usize) -> Vec<(String, String)> {
    let mut edges = Vec::new();
    for left in 0..n {
        for right in (left + 1)..n {
            edges.push((left.to_string(), right.to_string()));
        }
    }
    edges
}

/// Edges of a cycle on `n` nodes named `0..n`.
#[must_use]
pub fn cycle_edges(n: usize) -> Vec<(String, String)> {
    (0..n)
        .map(|node| (node.to_string(), ((node + 1) % n).to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case(1, 0)]
    #[case(4, 6)]
    #[case(6, 15)]
    fn complete_edges_counts_pairs(#[case] n: usize, #[case] expected: usize) {
        assert_eq!(complete_edges(n).len(), expected);
    }

    #[test]
    fn cycle_wraps_around() {
        let edges = cycle_edges(3);
        assert_eq!(edges.last(), Some(&("2".to_owned(), "0".to_owned())));
    }

    #[test]
    fn write_edge_list_round_trips() -> io::Result<()> {
        let dir = TempDir::new()?;
        let path = write_edge_list(dir.path(), "graph.txt", FOUR_CYCLE)?;
        assert_eq!(fs::read_to_string(path)?, FOUR_CYCLE);
        Ok(())
    }

    #[test]
    fn render_edge_list_emits_one_line_per_edge() {
        let rendered = render_edge_list(&cycle_edges(4));
        assert_eq!(rendered, "0 1\n1 2\n2 3\n3 0\n");
    }
}
