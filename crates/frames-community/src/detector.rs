//! The detection strategy interface.

use frames_types::{TopicGraph, TopicId};

use crate::error::CommunityError;

/// A graph partitioning strategy.
///
/// Every implementation treats edge weight as the clustering-relevant
/// quantity (never binary adjacency) and returns its communities as
/// sets of topic ids, in the order the algorithm produced them - the
/// engine assigns sequential indices and colors from that order.
///
/// A degenerate graph (no edges, single node) is a valid input and must
/// yield a trivial partition, not an error. An algorithm may omit nodes
/// it cannot place (spinglass drops isolated nodes); absence from the
/// result is distinct from membership in community 0.
pub trait CommunityDetector: Send + Sync {
    /// Stable algorithm name used as the key in the detection report.
    fn name(&self) -> &'static str;

    /// Partition the graph.
    fn detect(&self, graph: &TopicGraph) -> Result<Vec<Vec<TopicId>>, CommunityError>;
}
