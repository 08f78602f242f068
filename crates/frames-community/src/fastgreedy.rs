//! Greedy modularity merge partition (fast-greedy, CNM-style).

use std::collections::HashMap;

use tracing::debug;

use frames_types::{TopicGraph, TopicId};

use crate::detector::CommunityDetector;
use crate::error::CommunityError;
use crate::modularity::{communities_from_membership, to_topic_communities};

/// Agglomerative modularity optimization.
///
/// Starts from singleton communities and repeatedly merges the connected
/// pair with the largest modularity gain, building the full merge
/// sequence; the returned partition is the cut with maximal modularity.
/// Nodes in different components are never merged, so an edgeless graph
/// stays singletons.
#[derive(Debug, Clone, Default)]
pub struct FastGreedy;

impl CommunityDetector for FastGreedy {
    fn name(&self) -> &'static str {
        "fastgreedy"
    }

    fn detect(&self, graph: &TopicGraph) -> Result<Vec<Vec<TopicId>>, CommunityError> {
        let n = graph.node_count();
        if n == 0 {
            return Ok(Vec::new());
        }
        let m = graph.total_weight();
        let mut membership: Vec<usize> = (0..n).collect();
        if m <= 0.0 {
            return Ok(to_topic_communities(
                graph,
                communities_from_membership(&membership),
            ));
        }

        let mut degsum: Vec<f64> = (0..n).map(|i| graph.strength(i)).collect();
        // Weight between community pairs, keyed (low, high)
        let mut between: HashMap<(usize, usize), f64> = HashMap::new();
        for &(a, b, w) in graph.edges() {
            *between.entry((a, b)).or_insert(0.0) += w;
        }

        // Singleton modularity as the starting best cut
        let mut q: f64 = degsum.iter().map(|d| -(d / (2.0 * m)).powi(2)).sum();
        let mut best_q = q;
        let mut best_membership = membership.clone();

        while !between.is_empty() {
            // Pair with maximal merge gain: w_ab/m - deg_a*deg_b/(2m^2)
            let Some(((a, b), gain)) = between
                .iter()
                .map(|(&pair, &w)| {
                    let gain = w / m - degsum[pair.0] * degsum[pair.1] / (2.0 * m * m);
                    (pair, gain)
                })
                .max_by(|x, y| x.1.partial_cmp(&y.1).unwrap_or(std::cmp::Ordering::Equal))
            else {
                break;
            };

            // Merge b into a
            for label in membership.iter_mut() {
                if *label == b {
                    *label = a;
                }
            }
            degsum[a] += degsum[b];
            degsum[b] = 0.0;
            let mut merged: HashMap<(usize, usize), f64> = HashMap::new();
            for ((x, y), w) in between.drain() {
                let x = if x == b { a } else { x };
                let y = if y == b { a } else { y };
                if x == y {
                    continue;
                }
                let key = if x < y { (x, y) } else { (y, x) };
                *merged.entry(key).or_insert(0.0) += w;
            }
            between = merged;

            q += gain;
            if q > best_q + 1e-12 {
                best_q = q;
                best_membership = membership.clone();
            }
        }

        let communities = communities_from_membership(&best_membership);
        debug!(
            nodes = n,
            communities = communities.len(),
            modularity = best_q,
            "Fast-greedy partition complete"
        );
        Ok(to_topic_communities(graph, communities))
    }
}
