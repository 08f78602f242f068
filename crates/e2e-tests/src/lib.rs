//! End-to-end test infrastructure for topic-frames.
//!
//! Provides shared corpus fixtures and helpers for tests covering the
//! full aggregate -> build graph -> detect pipeline.

use std::collections::HashMap;
use std::sync::Once;

use frames_network::{GraphBuilder, NetworkConfig};
use frames_types::{ProbabilityMatrix, TopicGraph, TopicId};

static TRACING: Once = Once::new();

/// Initialize tracing once for test diagnostics (honors `RUST_LOG`).
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Sentence-level probability rows for a corpus with two topic blocks.
///
/// Topics 0-2 co-occur in the first six documents, topics 3-5 in the
/// last six, with tiny cross-block loadings. The resulting similarity
/// graph has two dense blocks bridged by weak edges, so every detection
/// algorithm should recover the two blocks.
pub fn two_block_rows() -> Vec<(String, Vec<f32>)> {
    let mut rows = Vec::new();
    for doc in 0..12 {
        let doc_id = format!("doc-{doc}");
        // Two sentences per document with slightly different loadings
        for sentence in 0..2 {
            let strong = 0.25 + 0.05 * ((doc + sentence) % 3) as f32;
            let weak = 0.02;
            let probabilities: Vec<f32> = (0..6)
                .map(|topic| {
                    let in_first_block = topic < 3;
                    let doc_in_first_block = doc < 6;
                    if in_first_block == doc_in_first_block {
                        strong
                    } else {
                        weak
                    }
                })
                .collect();
            rows.push((doc_id.clone(), probabilities));
        }
    }
    rows
}

/// Labels for the two-block corpus (topic 5 deliberately unlabeled).
pub fn two_block_labels() -> HashMap<TopicId, String> {
    [
        (0, "economy"),
        (1, "taxes"),
        (2, "budget"),
        (3, "health"),
        (4, "hospitals"),
    ]
    .into_iter()
    .map(|(t, l)| (t, l.to_string()))
    .collect()
}

/// Build the topic graph for a matrix with default network settings.
pub fn build_graph(matrix: &ProbabilityMatrix, labels: &HashMap<TopicId, String>) -> TopicGraph {
    GraphBuilder::new(NetworkConfig::default())
        .build(matrix, labels)
        .expect("graph construction should succeed")
}

/// Community index of a topic within a raw community list.
pub fn community_of(communities: &[Vec<TopicId>], topic: TopicId) -> Option<usize> {
    communities.iter().position(|c| c.contains(&topic))
}
