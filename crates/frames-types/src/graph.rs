//! Weighted undirected topic co-occurrence graph.

use serde::{Deserialize, Serialize};

use crate::matrix::TopicId;

/// A topic node with its visual attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicNode {
    /// Topic identifier (matrix column index)
    pub topic: TopicId,
    /// Normalized probability mass, scaled for visual encoding
    pub size: f64,
    /// Human-assigned label; `None` means unlabeled (distinct from `Some("")`)
    pub label: Option<String>,
}

impl TopicNode {
    /// Create a new topic node.
    pub fn new(topic: TopicId, size: f64, label: Option<String>) -> Self {
        Self { topic, size, label }
    }
}

/// Immutable weighted undirected graph over topics.
///
/// Nodes are addressed by dense internal index 0..n; each carries its
/// [`TopicId`] plus `size` and `label` attributes. Edge weights are the
/// cosine similarities of the topics' probability columns, so they lie in
/// [-1, 1]. Invariants: no self loops, each edge stored once with
/// endpoints ordered low-to-high, symmetric adjacency.
///
/// The graph is frozen at construction. Community detection fans out over
/// a shared `&TopicGraph`, so nothing mutates it after `new` returns.
#[derive(Debug, Clone, Serialize)]
pub struct TopicGraph {
    nodes: Vec<TopicNode>,
    edges: Vec<(usize, usize, f64)>,
    #[serde(skip)]
    adjacency: Vec<Vec<(usize, f64)>>,
}

impl TopicGraph {
    /// Build a graph from nodes and undirected edges.
    ///
    /// Edges are canonicalized to `(low, high, weight)` order; self loops
    /// are dropped.
    ///
    /// # Panics
    /// Panics if an edge references a node index out of range.
    pub fn new(nodes: Vec<TopicNode>, edges: Vec<(usize, usize, f64)>) -> Self {
        let n = nodes.len();
        let mut canonical = Vec::with_capacity(edges.len());
        let mut adjacency = vec![Vec::new(); n];
        for (a, b, w) in edges {
            assert!(a < n && b < n, "Edge endpoint out of range");
            if a == b {
                continue;
            }
            let (lo, hi) = if a < b { (a, b) } else { (b, a) };
            canonical.push((lo, hi, w));
            adjacency[lo].push((hi, w));
            adjacency[hi].push((lo, w));
        }
        Self {
            nodes,
            edges: canonical,
            adjacency,
        }
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes, indexed by internal node index.
    pub fn nodes(&self) -> &[TopicNode] {
        &self.nodes
    }

    /// The node at an internal index.
    pub fn node(&self, index: usize) -> &TopicNode {
        &self.nodes[index]
    }

    /// Canonical edge list as `(low, high, weight)` triples.
    pub fn edges(&self) -> &[(usize, usize, f64)] {
        &self.edges
    }

    /// Neighbors of a node as `(node_index, weight)` pairs.
    pub fn neighbors(&self, index: usize) -> &[(usize, f64)] {
        &self.adjacency[index]
    }

    /// Weighted degree (sum of incident edge weights).
    pub fn strength(&self, index: usize) -> f64 {
        self.adjacency[index].iter().map(|(_, w)| w).sum()
    }

    /// Total edge weight of the graph (each edge counted once).
    pub fn total_weight(&self) -> f64 {
        self.edges.iter().map(|(_, _, w)| w).sum()
    }

    /// Topic ids in node-index order.
    pub fn topic_ids(&self) -> Vec<TopicId> {
        self.nodes.iter().map(|n| n.topic).collect()
    }

    /// Internal node index for a topic id, if present.
    pub fn index_of(&self, topic: TopicId) -> Option<usize> {
        self.nodes.iter().position(|n| n.topic == topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> TopicGraph {
        let nodes = vec![
            TopicNode::new(0, 1.0, Some("economy".to_string())),
            TopicNode::new(1, 0.5, Some("health".to_string())),
            TopicNode::new(2, 0.0, None),
        ];
        let edges = vec![(0, 1, 0.9), (1, 2, 0.2), (2, 0, 0.1)];
        TopicGraph::new(nodes, edges)
    }

    #[test]
    fn test_counts() {
        let g = triangle();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.edge_count(), 3);
        assert!(!g.is_empty());
    }

    #[test]
    fn test_self_loops_dropped() {
        let nodes = vec![TopicNode::new(0, 1.0, None), TopicNode::new(1, 1.0, None)];
        let g = TopicGraph::new(nodes, vec![(0, 0, 1.0), (0, 1, 0.5)]);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.edges()[0], (0, 1, 0.5));
    }

    #[test]
    fn test_edges_canonicalized() {
        let nodes = vec![TopicNode::new(0, 1.0, None), TopicNode::new(1, 1.0, None)];
        let g = TopicGraph::new(nodes, vec![(1, 0, 0.7)]);
        assert_eq!(g.edges()[0], (0, 1, 0.7));
    }

    #[test]
    fn test_adjacency_symmetric() {
        let g = triangle();
        assert!(g.neighbors(0).contains(&(1, 0.9)));
        assert!(g.neighbors(1).contains(&(0, 0.9)));
    }

    #[test]
    fn test_strength_and_total_weight() {
        let g = triangle();
        assert!((g.strength(1) - 1.1).abs() < 1e-12);
        assert!((g.total_weight() - 1.2).abs() < 1e-12);
    }

    #[test]
    fn test_index_of() {
        let g = triangle();
        assert_eq!(g.index_of(2), Some(2));
        assert_eq!(g.index_of(7), None);
    }
}
