//! Top-k extraction over per-node scores.
//!
//! Order is descending by score with ascending node id breaking ties, so two
//! runs over the same result always list the same nodes in the same order.

use std::cmp::Ordering;

use serde::Serialize;

use crate::metrics::CentralityResult;

/// One ranked `(node id, value)` entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub id: String,
    pub value: f64,
}

/// Every node of `result`, best first.
#[must_use]
pub fn rank_all(result: &CentralityResult) -> Vec<RankedEntry> {
    let mut entries: Vec<RankedEntry> = result
        .iter()
        .map(|(id, value)| RankedEntry {
            id: id.to_string(),
            value,
        })
        .collect();
    entries.sort_by(compare_entries);
    entries
}

/// The first `k` entries of [`rank_all`]. Returns every node when `k` is at
/// least the node count.
#[must_use]
pub fn top_k(result: &CentralityResult, k: usize) -> Vec<RankedEntry> {
    let mut entries = rank_all(result);
    entries.truncate(k);
    entries
}

fn compare_entries(a: &RankedEntry, b: &RankedEntry) -> Ordering {
    b.value
        .total_cmp(&a.value)
        .then_with(|| a.id.cmp(&b.id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn result(pairs: &[(&str, f64)]) -> CentralityResult {
        CentralityResult {
            scores: pairs
                .iter()
                .map(|(id, v)| ((*id).to_string(), *v))
                .collect(),
        }
    }

    fn ids(entries: &[RankedEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn descending_by_value() {
        let r = result(&[("a", 0.1), ("b", 0.9), ("c", 0.5)]);
        assert_eq!(ids(&top_k(&r, 2)), ["b", "c"]);
    }

    #[test]
    fn ties_break_by_ascending_id() {
        let r = result(&[("zeta", 1.0), ("alpha", 1.0), ("mid", 1.0), ("low", 0.2)]);
        assert_eq!(ids(&top_k(&r, 3)), ["alpha", "mid", "zeta"]);
    }

    #[test]
    fn k_larger_than_node_count_returns_all() {
        let r = result(&[("a", 0.1), ("b", 0.2)]);
        let top = top_k(&r, 5);
        assert_eq!(ids(&top), ["b", "a"]);
        assert_eq!(top, rank_all(&r));
    }

    #[test]
    fn k_zero_and_empty_input() {
        let r = result(&[("a", 0.1)]);
        assert!(top_k(&r, 0).is_empty());
        assert!(top_k(&CentralityResult::default(), 5).is_empty());
    }
}
