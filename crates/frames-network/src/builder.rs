//! Similarity graph construction.

use std::collections::HashMap;

use tracing::{debug, instrument};

use frames_types::{MatrixError, ProbabilityMatrix, TopicGraph, TopicId, TopicNode};

use crate::config::NetworkConfig;
use crate::error::NetworkError;
use crate::normalize::min_max_normalize;
use crate::similarity::cosine_similarity;

/// Builds a weighted topic co-occurrence graph from a probability matrix.
///
/// Each topic is represented by its probability column across all
/// documents; the cosine similarity of two columns becomes the edge
/// weight between the two topic nodes. Node size is the topic's total
/// probability mass, min-max normalized and scaled by the configured
/// multiplier. Labels come from a partial topic → label map; a missing
/// entry means unlabeled, which is distinct from an empty-string label.
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    config: NetworkConfig,
}

impl GraphBuilder {
    /// Create a builder with the given configuration.
    pub fn new(config: NetworkConfig) -> Self {
        Self { config }
    }

    /// Build the topic graph.
    ///
    /// When `prune_unlabeled` is configured, topics without a label map
    /// entry are removed along with their incident edges. Exactly-zero
    /// similarities (including those of all-zero columns) produce no
    /// edge, so a topic never mentioned anywhere ends up isolated.
    ///
    /// # Errors
    ///
    /// Returns [`NetworkError::Matrix`] if the matrix is empty.
    #[instrument(skip(self, matrix, labels))]
    pub fn build(
        &self,
        matrix: &ProbabilityMatrix,
        labels: &HashMap<TopicId, String>,
    ) -> Result<TopicGraph, NetworkError> {
        if matrix.document_count() == 0 || matrix.topic_count() == 0 {
            return Err(MatrixError::EmptyMatrix.into());
        }

        let k = matrix.topic_count();
        let columns: Vec<Vec<f32>> = (0..k).map(|t| matrix.column(t)).collect();

        let masses: Vec<f64> = (0..k).map(|t| matrix.column_mass(t)).collect();
        let sizes: Vec<f64> = min_max_normalize(&masses)
            .into_iter()
            .map(|s| s * self.config.size_multiplier)
            .collect();

        // Surviving topics keep their matrix column index as TopicId;
        // node indices are dense over the survivors.
        let mut index_of: HashMap<TopicId, usize> = HashMap::new();
        let mut nodes = Vec::new();
        for topic in 0..k {
            let label = labels.get(&topic).cloned();
            if self.config.prune_unlabeled && label.is_none() {
                continue;
            }
            index_of.insert(topic, nodes.len());
            nodes.push(TopicNode::new(topic, sizes[topic], label));
        }

        let mut edges = Vec::new();
        for i in 0..k {
            let Some(&a) = index_of.get(&i) else { continue };
            for j in (i + 1)..k {
                let Some(&b) = index_of.get(&j) else { continue };
                let weight = cosine_similarity(&columns[i], &columns[j]) as f64;
                if weight != 0.0 {
                    edges.push((a, b, weight));
                }
            }
        }

        debug!(
            topics = k,
            nodes = nodes.len(),
            edges = edges.len(),
            pruned = self.config.prune_unlabeled,
            "Built topic graph"
        );
        Ok(TopicGraph::new(nodes, edges))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frames_types::DocumentRow;

    fn matrix(rows: &[&[f32]]) -> ProbabilityMatrix {
        let rows = rows
            .iter()
            .enumerate()
            .map(|(i, p)| DocumentRow::new(format!("doc-{i}"), p.to_vec()))
            .collect();
        ProbabilityMatrix::new(rows).unwrap()
    }

    fn labels(entries: &[(TopicId, &str)]) -> HashMap<TopicId, String> {
        entries
            .iter()
            .map(|(t, l)| (*t, l.to_string()))
            .collect()
    }

    #[test]
    fn test_no_self_loops_and_weights_in_range() {
        let m = matrix(&[&[0.9, 0.1, 0.3], &[0.2, 0.8, 0.4], &[0.5, 0.5, 0.1]]);
        let graph = GraphBuilder::default().build(&m, &HashMap::new()).unwrap();
        for &(a, b, w) in graph.edges() {
            assert_ne!(a, b);
            assert!((-1.0..=1.0).contains(&w), "Weight out of range: {w}");
        }
    }

    #[test]
    fn test_one_node_per_topic_unpruned() {
        let m = matrix(&[&[0.9, 0.1, 0.0], &[0.2, 0.8, 0.0]]);
        let graph = GraphBuilder::default().build(&m, &HashMap::new()).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.topic_ids(), vec![0, 1, 2]);
    }

    #[test]
    fn test_sizes_follow_column_mass() {
        let m = matrix(&[&[0.9, 0.1, 0.0], &[0.9, 0.3, 0.0]]);
        let graph = GraphBuilder::default().build(&m, &HashMap::new()).unwrap();
        // Topic 0 carries the most mass, topic 2 the least
        assert!((graph.node(0).size - 10.0).abs() < 1e-9);
        assert!(graph.node(2).size.abs() < 1e-9);
        assert!(graph.node(1).size > graph.node(2).size);
        assert!(graph.node(1).size < graph.node(0).size);
    }

    #[test]
    fn test_equal_masses_degenerate_sizes() {
        let m = matrix(&[&[0.5, 0.5], &[0.5, 0.5]]);
        let graph = GraphBuilder::default().build(&m, &HashMap::new()).unwrap();
        assert!(graph.node(0).size.abs() < 1e-12);
        assert!(graph.node(1).size.abs() < 1e-12);
    }

    #[test]
    fn test_labels_attached() {
        let m = matrix(&[&[0.9, 0.1], &[0.2, 0.8]]);
        let graph = GraphBuilder::default()
            .build(&m, &labels(&[(0, "economy"), (1, "")]))
            .unwrap();
        assert_eq!(graph.node(0).label.as_deref(), Some("economy"));
        // Empty string is still a label
        assert_eq!(graph.node(1).label.as_deref(), Some(""));
    }

    #[test]
    fn test_prune_unlabeled_keeps_exactly_label_keys() {
        let m = matrix(&[&[0.9, 0.1, 0.3], &[0.2, 0.8, 0.4]]);
        let config = NetworkConfig {
            prune_unlabeled: true,
            ..NetworkConfig::default()
        };
        let pruned = GraphBuilder::new(config)
            .build(&m, &labels(&[(0, "economy"), (2, "health")]))
            .unwrap();
        assert_eq!(pruned.topic_ids(), vec![0, 2]);

        let full = GraphBuilder::default()
            .build(&m, &labels(&[(0, "economy"), (2, "health")]))
            .unwrap();
        for topic in pruned.topic_ids() {
            assert!(full.topic_ids().contains(&topic));
        }
    }

    #[test]
    fn test_pruned_graph_restricts_edges() {
        let m = matrix(&[&[0.9, 0.1, 0.3], &[0.2, 0.8, 0.4], &[0.1, 0.1, 0.9]]);
        let config = NetworkConfig {
            prune_unlabeled: true,
            ..NetworkConfig::default()
        };
        let graph = GraphBuilder::new(config)
            .build(&m, &labels(&[(0, "a"), (1, "b")]))
            .unwrap();
        assert_eq!(graph.node_count(), 2);
        for &(a, b, _) in graph.edges() {
            assert!(a < 2 && b < 2);
        }
    }

    #[test]
    fn test_empty_string_label_survives_pruning() {
        let m = matrix(&[&[0.9, 0.1], &[0.2, 0.8]]);
        let config = NetworkConfig {
            prune_unlabeled: true,
            ..NetworkConfig::default()
        };
        let graph = GraphBuilder::new(config)
            .build(&m, &labels(&[(1, "")]))
            .unwrap();
        assert_eq!(graph.topic_ids(), vec![1]);
    }

    #[test]
    fn test_zero_column_isolated() {
        let m = matrix(&[&[0.9, 0.1, 0.0], &[0.2, 0.8, 0.0]]);
        let graph = GraphBuilder::default().build(&m, &HashMap::new()).unwrap();
        assert!(graph.neighbors(2).is_empty());
        assert!(graph.strength(2).abs() < 1e-12);
    }

    #[test]
    fn test_edge_weights_are_column_cosines() {
        let m = matrix(&[&[1.0, 0.0], &[0.0, 1.0]]);
        // Orthogonal columns: similarity 0, so no edge at all
        let graph = GraphBuilder::default().build(&m, &HashMap::new()).unwrap();
        assert_eq!(graph.edge_count(), 0);

        let m = matrix(&[&[1.0, 1.0], &[0.0, 0.0]]);
        let graph = GraphBuilder::default().build(&m, &HashMap::new()).unwrap();
        assert_eq!(graph.edge_count(), 1);
        assert!((graph.edges()[0].2 - 1.0).abs() < 1e-6);
    }
}
