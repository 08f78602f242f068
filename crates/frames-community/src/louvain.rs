//! Modularity-optimizing partition (Louvain-style).

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::debug;

use frames_types::{TopicGraph, TopicId};

use crate::detector::CommunityDetector;
use crate::error::CommunityError;
use crate::modularity::{communities_from_membership, to_topic_communities};

/// Two-phase modularity optimization.
///
/// Each pass moves single nodes to the neighboring community with the
/// best modularity gain, then collapses communities into super-nodes and
/// repeats on the aggregated graph until no move improves the partition.
/// Node visit order is shuffled per pass with the seeded RNG, so results
/// are deterministic for a given seed but tie-breaking varies across
/// seeds.
#[derive(Debug, Clone)]
pub struct Louvain {
    /// Modularity resolution; above 1.0 favors more, smaller communities
    pub resolution: f64,
    /// RNG seed for the node visit order
    pub seed: u64,
}

impl Default for Louvain {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            seed: 42,
        }
    }
}

/// Aggregated graph for one Louvain level.
///
/// `links[i]` holds weighted entries including a self-loop entry storing
/// twice the internal weight, so node strength is the plain entry sum.
struct LevelGraph {
    links: Vec<Vec<(usize, f64)>>,
}

impl LevelGraph {
    fn from_topic_graph(graph: &TopicGraph) -> Self {
        let links = (0..graph.node_count())
            .map(|i| graph.neighbors(i).to_vec())
            .collect();
        Self { links }
    }

    fn node_count(&self) -> usize {
        self.links.len()
    }

    fn total_weight_doubled(&self) -> f64 {
        self.links
            .iter()
            .flat_map(|l| l.iter().map(|(_, w)| w))
            .sum()
    }

    fn strength(&self, i: usize) -> f64 {
        self.links[i].iter().map(|(_, w)| w).sum()
    }

    /// Collapse communities into super-nodes; `membership` must be compact.
    fn aggregate(&self, membership: &[usize], community_count: usize) -> LevelGraph {
        let mut maps: Vec<HashMap<usize, f64>> = vec![HashMap::new(); community_count];
        for (i, entries) in self.links.iter().enumerate() {
            let ci = membership[i];
            for &(j, w) in entries {
                *maps[ci].entry(membership[j]).or_insert(0.0) += w;
            }
        }
        let links = maps
            .into_iter()
            .map(|m| m.into_iter().collect())
            .collect();
        LevelGraph { links }
    }
}

/// One local-moving pass. Returns the (non-compact) membership and
/// whether any node moved.
fn one_level(graph: &LevelGraph, resolution: f64, rng: &mut StdRng) -> (Vec<usize>, bool) {
    let n = graph.node_count();
    let m2 = graph.total_weight_doubled();
    let mut community: Vec<usize> = (0..n).collect();
    if m2 <= 0.0 {
        return (community, false);
    }
    let strengths: Vec<f64> = (0..n).map(|i| graph.strength(i)).collect();
    let mut tot = strengths.clone();
    let mut improved = false;

    loop {
        let mut order: Vec<usize> = (0..n).collect();
        order.shuffle(rng);
        let mut moves = 0usize;

        for &i in &order {
            let ci = community[i];
            // Weight from i to each neighboring community, self loop excluded
            let mut neighbor_weight: HashMap<usize, f64> = HashMap::new();
            for &(j, w) in &graph.links[i] {
                if j != i {
                    *neighbor_weight.entry(community[j]).or_insert(0.0) += w;
                }
            }

            tot[ci] -= strengths[i];
            let own = neighbor_weight.get(&ci).copied().unwrap_or(0.0);
            let mut best_community = ci;
            let mut best_gain = own - resolution * strengths[i] * tot[ci] / m2;
            for (&c, &w) in &neighbor_weight {
                if c == ci {
                    continue;
                }
                let gain = w - resolution * strengths[i] * tot[c] / m2;
                if gain > best_gain + 1e-12 {
                    best_gain = gain;
                    best_community = c;
                }
            }
            tot[best_community] += strengths[i];
            if best_community != ci {
                community[i] = best_community;
                moves += 1;
            }
        }

        if moves == 0 {
            break;
        }
        improved = true;
    }

    (community, improved)
}

/// Renumber community labels to a compact 0..count range, preserving
/// first-occurrence order. Returns the count.
fn compact(membership: &mut [usize]) -> usize {
    let mut renumber: HashMap<usize, usize> = HashMap::new();
    for label in membership.iter_mut() {
        let next = renumber.len();
        *label = *renumber.entry(*label).or_insert(next);
    }
    renumber.len()
}

impl CommunityDetector for Louvain {
    fn name(&self) -> &'static str {
        "louvain"
    }

    fn detect(&self, graph: &TopicGraph) -> Result<Vec<Vec<TopicId>>, CommunityError> {
        let n = graph.node_count();
        if n == 0 {
            return Ok(Vec::new());
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut level = LevelGraph::from_topic_graph(graph);
        let mut final_membership: Vec<usize> = (0..n).collect();

        loop {
            let (mut membership, improved) = one_level(&level, self.resolution, &mut rng);
            let count = compact(&mut membership);
            for label in final_membership.iter_mut() {
                *label = membership[*label];
            }
            if !improved || count == level.node_count() {
                break;
            }
            level = level.aggregate(&membership, count);
        }

        let communities = communities_from_membership(&final_membership);
        debug!(
            nodes = n,
            communities = communities.len(),
            seed = self.seed,
            "Louvain partition complete"
        );
        Ok(to_topic_communities(graph, communities))
    }
}
