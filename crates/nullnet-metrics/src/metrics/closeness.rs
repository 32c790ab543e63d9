//! Closeness centrality via repeated breadth-first search.
//!
//! For each node `v`, a BFS over the unweighted graph yields hop distances to
//! every node reachable from `v`. With `r` the number of reachable nodes
//! (counting `v` itself) and `n` the node count of the whole graph, the
//! Wasserman–Faust form is:
//!
//! ```text
//! closeness(v) = ((r - 1) / (n - 1)) * ((r - 1) / Σ dist(v, u))   for r > 1
//! closeness(v) = 0                                               for r = 1
//! ```
//!
//! The first factor scales by the share of the graph `v` can reach, so a node
//! in a small fragment never outranks a hub of the main component. On a
//! connected graph it is 1 and a node adjacent to everyone scores exactly 1.0.
//!
//! Complexity: O(V * (V + E)).

use std::collections::VecDeque;

use tracing::instrument;

use crate::graph::Graph;
use crate::metrics::CentralityResult;

const UNVISITED: usize = usize::MAX;

/// Compute closeness centrality for every node in `graph`.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count()))]
pub fn closeness_centrality(graph: &Graph) -> CentralityResult {
    CentralityResult::from_indexed(graph, &closeness_scores(graph))
}

/// Index-ordered closeness scores.
#[allow(clippy::cast_precision_loss)]
pub(crate) fn closeness_scores(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();
    let mut scores = vec![0.0; n];

    // Allocated once, reset per source.
    let mut dist: Vec<usize> = vec![UNVISITED; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    for (source, score) in scores.iter_mut().enumerate() {
        dist.fill(UNVISITED);
        queue.clear();

        dist[source] = 0;
        queue.push_back(source);

        let mut reached: usize = 0;
        let mut total_distance: usize = 0;

        while let Some(v) = queue.pop_front() {
            reached += 1;
            total_distance += dist[v];

            for &w in graph.neighbors(v) {
                if dist[w] == UNVISITED {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }
            }
        }

        if total_distance > 0 {
            let others = (reached - 1) as f64;
            *score = (others / (n - 1) as f64) * (others / total_distance as f64);
        }
    }

    scores
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
