//! A small built-in catalog of named patterns, used to validate the engine against
//! known reducibility verdicts. Mirrors the host crate's built-in puzzle tables
//! (`PUZZLE_EASY`, `PUZZLE_HARDER`, ...): a fixed set of examples, not a general
//! pattern database.

use crate::error::PatternError;
use crate::pattern::PatternReducibility;

/// One catalog entry: its name and the reducibility verdict it is expected to produce.
pub struct CatalogEntry {
    pub name: &'static str,
    pub expected_reducible: bool,
}

pub const ENTRIES: &[CatalogEntry] = &[
    CatalogEntry { name: "p_22", expected_reducible: true },
    CatalogEntry { name: "p_232", expected_reducible: true },
    CatalogEntry { name: "p_3_2x3", expected_reducible: true },
    CatalogEntry { name: "p_233_2x2", expected_reducible: true },
    CatalogEntry { name: "p_3_2x233_2", expected_reducible: true },
    CatalogEntry { name: "p_7", expected_reducible: true },
    CatalogEntry { name: "critical_face", expected_reducible: false },
];

/// Builds the pattern registered under `name`, or `None` if no such pattern exists.
pub fn build(name: &str) -> Option<Result<PatternReducibility, PatternError>> {
    let (line_graph, outgoing, symmetries): (Vec<Vec<usize>>, Vec<usize>, Vec<Vec<usize>>) =
        match name {
            "p_22" => (
                vec![vec![1], vec![0, 2], vec![1]],
                vec![0, 2],
                vec![vec![0, 1], vec![1, 0]],
            ),
            "p_232" => (
                vec![vec![1], vec![0, 2, 3], vec![1, 3], vec![1, 2, 4], vec![3]],
                vec![0, 2, 4],
                vec![vec![0, 1, 2], vec![2, 1, 0]],
            ),
            "p_3_2x3" => (
                vec![
                    vec![1],
                    vec![0, 2, 3],
                    vec![1, 3],
                    vec![1, 2, 4, 8],
                    vec![3, 5, 6, 8],
                    vec![4, 6],
                    vec![4, 5, 7],
                    vec![6],
                    vec![3, 4, 9],
                    vec![8],
                ],
                vec![0, 2, 5, 7, 9],
                vec![vec![0, 1, 2, 3, 4], vec![3, 2, 1, 0, 4]],
            ),
            "p_233_2x2" => (
                vec![
                    vec![1],
                    vec![0, 2, 3],
                    vec![1, 3],
                    vec![1, 2, 4, 8],
                    vec![3, 5, 6, 8],
                    vec![4, 6],
                    vec![4, 5, 7],
                    vec![6],
                    vec![3, 4, 9],
                    vec![8],
                ],
                vec![0, 5, 7, 9, 2],
                vec![vec![0, 1, 2, 3, 4]],
            ),
            "p_3_2x233_2" => (
                vec![
                    vec![1],
                    vec![0, 2, 3],
                    vec![1, 3, 4, 6],
                    vec![1, 2],
                    vec![2, 5, 6],
                    vec![4],
                    vec![2, 4, 7, 8],
                    vec![6, 8],
                    vec![6, 7, 9, 10],
                    vec![8, 10],
                    vec![8, 9, 11],
                    vec![10],
                ],
                vec![0, 5, 7, 11, 9, 3],
                vec![vec![0, 1, 2, 3, 4, 5]],
            ),
            "p_7" => (
                vec![
                    vec![14, 1, 2],
                    vec![0, 2],
                    vec![0, 1, 3, 4],
                    vec![2, 4],
                    vec![2, 3, 5, 7],
                    vec![4, 6, 7],
                    vec![5],
                    vec![4, 5, 8, 10],
                    vec![7, 9, 10],
                    vec![8],
                    vec![7, 8, 11, 12],
                    vec![10, 12],
                    vec![10, 11, 13, 14],
                    vec![12, 14],
                    vec![12, 13, 0],
                ],
                vec![1, 3, 6, 9, 11, 13],
                vec![vec![0, 1, 2, 3, 4, 5], vec![5, 4, 3, 2, 1, 0]],
            ),
            "critical_face" => (
                vec![
                    vec![1, 11],
                    vec![0, 11, 2, 3],
                    vec![1, 3],
                    vec![1, 2, 4],
                    vec![3, 5, 6],
                    vec![4, 6],
                    vec![4, 5, 7, 8],
                    vec![6, 8],
                    vec![6, 7, 9, 10],
                    vec![8, 10],
                    vec![8, 9, 11],
                    vec![10, 0, 1],
                ],
                vec![0, 2, 5, 7, 9],
                vec![vec![0, 1, 2, 3, 4], vec![1, 0, 4, 3, 2]],
            ),
            _ => return None,
        };

    Some(PatternReducibility::new(line_graph, outgoing, symmetries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_reproduces_expected_verdicts() {
        for entry in ENTRIES {
            let mut pattern = build(entry.name)
                .unwrap_or_else(|| panic!("catalog entry {} missing", entry.name))
                .unwrap_or_else(|e| panic!("catalog entry {} invalid: {e}", entry.name));
            assert_eq!(
                pattern.is_pattern_reducible(false),
                entry.expected_reducible,
                "pattern {} should be reducible={}",
                entry.name,
                entry.expected_reducible
            );
        }
    }

    #[test]
    fn unknown_pattern_name_returns_none() {
        assert!(build("not_a_pattern").is_none());
    }
}
