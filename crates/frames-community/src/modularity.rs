//! Weighted modularity and partition helpers shared by the strategies.

use frames_types::{TopicGraph, TopicId};

/// Weighted modularity of a partition.
///
/// `membership[i]` is the community of node index `i`; community ids may
/// be arbitrary (not necessarily compact). Uses the standard weighted
/// form `Q = sum_c [ w_in_c / m - resolution * (deg_c / 2m)^2 ]` where
/// `m` is total edge weight and `deg_c` the summed node strengths of
/// community `c`. An edgeless graph has modularity 0 by convention.
pub fn modularity(graph: &TopicGraph, membership: &[usize], resolution: f64) -> f64 {
    debug_assert_eq!(membership.len(), graph.node_count());
    let m = graph.total_weight();
    if m <= 0.0 {
        return 0.0;
    }
    let m2 = 2.0 * m;
    let ncomm = membership.iter().copied().max().map_or(0, |c| c + 1);
    let mut internal = vec![0.0; ncomm];
    let mut degsum = vec![0.0; ncomm];
    for i in 0..graph.node_count() {
        degsum[membership[i]] += graph.strength(i);
    }
    for &(a, b, w) in graph.edges() {
        if membership[a] == membership[b] {
            internal[membership[a]] += w;
        }
    }
    internal
        .iter()
        .zip(degsum.iter())
        .map(|(w_in, deg)| w_in / m - resolution * (deg / m2) * (deg / m2))
        .sum()
}

/// Group node indices by community label, ordered by first occurrence.
pub fn communities_from_membership(membership: &[usize]) -> Vec<Vec<usize>> {
    let mut position: Vec<Option<usize>> = Vec::new();
    let mut communities: Vec<Vec<usize>> = Vec::new();
    for (node, &label) in membership.iter().enumerate() {
        if label >= position.len() {
            position.resize(label + 1, None);
        }
        let slot = match position[label] {
            Some(slot) => slot,
            None => {
                let slot = communities.len();
                position[label] = Some(slot);
                communities.push(Vec::new());
                slot
            }
        };
        communities[slot].push(node);
    }
    communities
}

/// Translate node-index communities into topic-id communities.
pub fn to_topic_communities(graph: &TopicGraph, communities: Vec<Vec<usize>>) -> Vec<Vec<TopicId>> {
    communities
        .into_iter()
        .map(|members| members.into_iter().map(|i| graph.node(i).topic).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use frames_types::TopicNode;

    fn two_blocks() -> TopicGraph {
        // Two triangles joined by one weak edge
        let nodes = (0..6).map(|t| TopicNode::new(t, 1.0, None)).collect();
        let edges = vec![
            (0, 1, 0.9),
            (1, 2, 0.9),
            (0, 2, 0.9),
            (3, 4, 0.9),
            (4, 5, 0.9),
            (3, 5, 0.9),
            (2, 3, 0.1),
        ];
        TopicGraph::new(nodes, edges)
    }

    #[test]
    fn test_block_partition_beats_merged() {
        let g = two_blocks();
        let blocks = vec![0, 0, 0, 1, 1, 1];
        let merged = vec![0, 0, 0, 0, 0, 0];
        assert!(modularity(&g, &blocks, 1.0) > modularity(&g, &merged, 1.0));
    }

    #[test]
    fn test_merged_partition_is_zero() {
        let g = two_blocks();
        let merged = vec![0; 6];
        assert!(modularity(&g, &merged, 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_edgeless_graph_zero_modularity() {
        let nodes = (0..3).map(|t| TopicNode::new(t, 1.0, None)).collect();
        let g = TopicGraph::new(nodes, Vec::new());
        assert_eq!(modularity(&g, &[0, 1, 2], 1.0), 0.0);
    }

    #[test]
    fn test_communities_from_membership_first_seen_order() {
        let communities = communities_from_membership(&[5, 2, 5, 0, 2]);
        assert_eq!(communities, vec![vec![0, 2], vec![1, 4], vec![3]]);
    }

    #[test]
    fn test_communities_partition_without_duplicates() {
        let membership = vec![1, 0, 1, 3, 0];
        let communities = communities_from_membership(&membership);
        let mut seen: Vec<usize> = communities.into_iter().flatten().collect();
        seen.sort_unstable();
        assert_eq!(seen, vec![0, 1, 2, 3, 4]);
    }
}
