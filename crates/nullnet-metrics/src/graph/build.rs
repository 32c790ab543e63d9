//! Graph construction from edge-list text.
//!
//! # Overview
//!
//! Input is one undirected edge per line: two whitespace-separated node ids.
//! Everything after a `#` is a comment, and blank lines are skipped.
//!
//! ```text
//! # yeast PPI, filtered
//! YAL001C  YBR123W
//! YBR123W  YAL001C   # reversed duplicate, collapses
//! ```
//!
//! ## Simple Graphs Only
//!
//! Repeated edges (in either orientation) collapse to a single edge. A line
//! naming the same node twice is rejected: every metric downstream assumes a
//! simple graph, and a self-loop would silently inflate degrees in the
//! clustering denominator.
//!
//! ## Node Order
//!
//! Nodes are numbered in order of first appearance. That index is what the
//! metric code works on; ids are only looked up again when results are
//! keyed back to strings.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::instrument;

use crate::error::AnalysisError;

// ---------------------------------------------------------------------------
// Graph
// ---------------------------------------------------------------------------

/// An immutable, simple, undirected graph with string node ids.
///
/// Backed by a petgraph [`UnGraph`] for storage, with a sorted neighbor list
/// cached per node so traversals and triangle checks never walk petgraph's
/// edge lists.
#[derive(Debug, Clone)]
pub struct Graph {
    /// Undirected storage graph: node weights are the ids.
    pub(crate) graph: UnGraph<String, ()>,
    /// Mapping from node id to petgraph `NodeIndex`.
    node_map: HashMap<String, NodeIndex>,
    /// Sorted neighbor indices, one list per node.
    adjacency: Vec<Vec<usize>>,
}

impl Graph {
    /// Parse an edge list into a [`Graph`].
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Parse`] for a line that does not hold exactly
    /// two ids, or that connects a node to itself.
    #[instrument(skip(text), fields(bytes = text.len()))]
    pub fn parse(text: &str) -> Result<Self, AnalysisError> {
        let mut builder = Builder::default();

        for (offset, raw) in text.lines().enumerate() {
            let line_no = offset + 1;
            let line = raw.split_once('#').map_or(raw, |(content, _)| content);

            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.as_slice() {
                [] => {}
                [a, b] if a == b => {
                    return Err(AnalysisError::parse(
                        line_no,
                        format!("self-loop on node `{a}`"),
                    ));
                }
                [a, b] => builder.add_edge(a, b),
                other => {
                    return Err(AnalysisError::parse(
                        line_no,
                        format!("expected 2 node ids, found {}", other.len()),
                    ));
                }
            }
        }

        Ok(builder.finish())
    }

    /// Build a graph from explicit nodes and edges.
    ///
    /// Nodes listed in `nodes` come first (so isolated nodes can be
    /// represented); edge endpoints not already present are appended.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Parse`] (line = 1-based edge position) for a
    /// self-loop.
    pub fn from_edges(nodes: &[&str], edges: &[(&str, &str)]) -> Result<Self, AnalysisError> {
        let mut builder = Builder::default();
        for id in nodes {
            builder.intern(id);
        }
        for (pos, (a, b)) in edges.iter().enumerate() {
            if a == b {
                return Err(AnalysisError::parse(
                    pos + 1,
                    format!("self-loop on node `{a}`"),
                ));
            }
            builder.add_edge(a, b);
        }
        Ok(builder.finish())
    }

    /// Build a graph on nodes `"0".."n-1"` from index pairs.
    ///
    /// Callers guarantee every pair is in range, distinct, and not a loop.
    pub(crate) fn from_index_pairs(node_count: usize, pairs: &[(usize, usize)]) -> Self {
        let mut graph = UnGraph::<String, ()>::with_capacity(node_count, pairs.len());
        let mut node_map = HashMap::with_capacity(node_count);

        for i in 0..node_count {
            let id = i.to_string();
            let idx = graph.add_node(id.clone());
            node_map.insert(id, idx);
        }

        for &(a, b) in pairs {
            debug_assert!(a != b && a < node_count && b < node_count);
            graph.add_edge(NodeIndex::new(a), NodeIndex::new(b), ());
        }

        Self::with_adjacency(graph, node_map)
    }

    fn with_adjacency(graph: UnGraph<String, ()>, node_map: HashMap<String, NodeIndex>) -> Self {
        let adjacency = graph
            .node_indices()
            .map(|idx| {
                let mut neighbors: Vec<usize> =
                    graph.neighbors(idx).map(NodeIndex::index).collect();
                neighbors.sort_unstable();
                neighbors
            })
            .collect();

        Self {
            graph,
            node_map,
            adjacency,
        }
    }

    /// Return the number of nodes in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of (undirected) edges in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// Look up the dense index of a node id.
    #[must_use]
    pub fn node_index(&self, id: &str) -> Option<usize> {
        self.node_map.get(id).map(|idx| idx.index())
    }

    /// Return the id of the node at `index`.
    #[must_use]
    pub fn node_id(&self, index: usize) -> Option<&str> {
        self.graph
            .node_weight(NodeIndex::new(index))
            .map(String::as_str)
    }

    /// Iterate `(index, id)` pairs in index order.
    pub fn nodes(&self) -> impl Iterator<Item = (usize, &str)> + '_ {
        self.graph
            .node_indices()
            .map(|idx| (idx.index(), self.graph[idx].as_str()))
    }

    /// Sorted neighbor indices of the node at `index` (empty if out of range).
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency.get(index).map_or(&[], Vec::as_slice)
    }

    #[must_use]
    pub fn degree(&self, index: usize) -> usize {
        self.neighbors(index).len()
    }

    /// Whether nodes `a` and `b` are adjacent.
    #[must_use]
    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        let (probe, target) = if self.degree(a) <= self.degree(b) {
            (a, b)
        } else {
            (b, a)
        };
        self.neighbors(probe).binary_search(&target).is_ok()
    }
}

/// Largest edge count a simple undirected graph on `n` nodes can have.
#[must_use]
pub const fn max_edge_count(n: usize) -> usize {
    n.saturating_mul(n.saturating_sub(1)) / 2
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Accumulates interned nodes and de-duplicated edges.
#[derive(Default)]
struct Builder {
    graph: UnGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    seen: HashSet<(usize, usize)>,
}

impl Builder {
    fn intern(&mut self, id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_map.get(id) {
            return idx;
        }
        let idx = self.graph.add_node(id.to_string());
        self.node_map.insert(id.to_string(), idx);
        idx
    }

    fn add_edge(&mut self, a: &str, b: &str) {
        let ia = self.intern(a);
        let ib = self.intern(b);

        let key = (ia.index().min(ib.index()), ia.index().max(ib.index()));
        // petgraph allows parallel edges; keep the graph simple.
        if self.seen.insert(key) {
            self.graph.add_edge(ia, ib, ());
        }
    }

    fn finish(self) -> Graph {
        Graph::with_adjacency(self.graph, self.node_map)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
