//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness nodes are "bridges" or
//! "bottlenecks"; removing them would lengthen or break many paths.
//!
//! # Algorithm
//!
//! We implement Brandes' algorithm (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E) for unweighted graphs.
//!
//! # Scaling
//!
//! In an undirected graph the sweep meets every unordered pair `{s, t}` twice
//! (once from each endpoint), so the summed dependencies are halved to give
//! one count per pair: [`betweenness_pair_counts`]. The hub of an `n`-node
//! star scores `(n-1)(n-2)/2` there.
//!
//! [`betweenness_centrality`] then divides the pair counts by 2. No further
//! rescaling by `(n-1)(n-2)` is applied.

use std::collections::VecDeque;

use tracing::instrument;

use crate::graph::Graph;
use crate::metrics::CentralityResult;

const UNVISITED: usize = usize::MAX;

/// Compute betweenness centrality for all nodes in the graph.
///
/// # Returns
///
/// A [`CentralityResult`] with each node's pair count halved. Nodes that
/// lie on no shortest path between two other nodes, and every node of a
/// graph with fewer than 3 nodes, receive 0.0.
#[must_use]
#[instrument(skip(graph), fields(nodes = graph.node_count(), edges = graph.edge_count()))]
pub fn betweenness_centrality(graph: &Graph) -> CentralityResult {
    CentralityResult::from_indexed(graph, &betweenness_scores(graph))
}

/// Betweenness before the final halving: the number of unordered node pairs
/// whose shortest paths run through each node, split fractionally where
/// several shortest paths exist.
#[must_use]
pub fn betweenness_pair_counts(graph: &Graph) -> CentralityResult {
    let mut counts = dependency_sums(graph);
    for value in &mut counts {
        *value /= 2.0;
    }
    CentralityResult::from_indexed(graph, &counts)
}

/// Index-ordered betweenness scores, as reported by [`betweenness_centrality`].
pub(crate) fn betweenness_scores(graph: &Graph) -> Vec<f64> {
    let mut scores = dependency_sums(graph);
    for value in &mut scores {
        *value /= 4.0;
    }
    scores
}

/// Brandes dependency totals summed over every source node.
fn dependency_sums(graph: &Graph) -> Vec<f64> {
    let n = graph.node_count();

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    if n < 3 {
        return cb;
    }

    // Per-source buffers, allocated once and reset for each source.
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut dist: Vec<usize> = vec![UNVISITED; n];
    let mut delta: Vec<f64> = vec![0.0; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    for s in 0..n {
        stack.clear();
        queue.clear();
        for preds in &mut predecessors {
            preds.clear();
        }
        sigma.fill(0.0);
        dist.fill(UNVISITED);
        delta.fill(0.0);

        // sigma[t]: number of shortest paths from s to t.
        sigma[s] = 1.0;
        dist[s] = 0;
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);

            for &w in graph.neighbors(v) {
                // First visit to w?
                if dist[w] == UNVISITED {
                    dist[w] = dist[v] + 1;
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == dist[v] + 1 {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }

            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    cb
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
