//! Random-walk based partition (walktrap-style).

use std::collections::HashSet;

use tracing::debug;

use frames_types::{TopicGraph, TopicId};

use crate::detector::CommunityDetector;
use crate::error::CommunityError;
use crate::modularity::{communities_from_membership, modularity, to_topic_communities};

/// Agglomeration by random-walk profile distance.
///
/// Each node gets the probability profile of a t-step random walk
/// started at it; communities whose member-averaged profiles are close
/// (in the strength-weighted L2 sense of Pons-Latapy) are merged first.
/// Only adjacent communities merge, building a dendrogram; the returned
/// partition is the merge level with maximal modularity. Short walks
/// stay near their starting community, which is what makes the profile a
/// community signature.
#[derive(Debug, Clone)]
pub struct Walktrap {
    /// Random walk length in steps
    pub walk_length: usize,
}

impl Default for Walktrap {
    fn default() -> Self {
        Self { walk_length: 4 }
    }
}

struct Community {
    members: Vec<usize>,
    profile: Vec<f64>,
}

/// Strength-weighted squared distance between two community profiles.
fn profile_distance(a: &[f64], b: &[f64], strengths: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .zip(strengths.iter())
        .filter(|(_, &d)| d > 0.0)
        .map(|((&x, &y), &d)| (x - y) * (x - y) / d)
        .sum()
}

impl Walktrap {
    /// The t-step walk probability profile starting from `start`.
    fn walk_profile(&self, graph: &TopicGraph, strengths: &[f64], start: usize) -> Vec<f64> {
        let n = graph.node_count();
        let mut profile = vec![0.0; n];
        profile[start] = 1.0;
        for _ in 0..self.walk_length {
            let mut next = vec![0.0; n];
            for u in 0..n {
                let mass = profile[u];
                if mass == 0.0 {
                    continue;
                }
                if strengths[u] <= 0.0 {
                    // Nowhere to walk: stay put
                    next[u] += mass;
                    continue;
                }
                for &(v, w) in graph.neighbors(u) {
                    next[v] += mass * w / strengths[u];
                }
            }
            profile = next;
        }
        profile
    }
}

impl CommunityDetector for Walktrap {
    fn name(&self) -> &'static str {
        "walktrap"
    }

    fn detect(&self, graph: &TopicGraph) -> Result<Vec<Vec<TopicId>>, CommunityError> {
        let n = graph.node_count();
        if n == 0 {
            return Ok(Vec::new());
        }
        let strengths: Vec<f64> = (0..n).map(|i| graph.strength(i)).collect();

        let mut communities: Vec<Option<Community>> = (0..n)
            .map(|i| {
                Some(Community {
                    members: vec![i],
                    profile: self.walk_profile(graph, &strengths, i),
                })
            })
            .collect();
        let mut adjacent: HashSet<(usize, usize)> = graph
            .edges()
            .iter()
            .map(|&(a, b, _)| (a, b))
            .collect();
        let mut membership: Vec<usize> = (0..n).collect();
        let mut best_membership = membership.clone();
        let mut best_q = modularity(graph, &membership, 1.0);

        while !adjacent.is_empty() {
            // Adjacent pair with minimal Ward-style merge cost
            let Some((a, b)) = adjacent
                .iter()
                .map(|&(a, b)| {
                    let (ca, cb) = (communities[a].as_ref(), communities[b].as_ref());
                    let cost = match (ca, cb) {
                        (Some(ca), Some(cb)) => {
                            let s1 = ca.members.len() as f64;
                            let s2 = cb.members.len() as f64;
                            s1 * s2 / (s1 + s2)
                                * profile_distance(&ca.profile, &cb.profile, &strengths)
                        }
                        _ => f64::INFINITY,
                    };
                    ((a, b), cost)
                })
                .min_by(|x, y| x.1.partial_cmp(&y.1).unwrap_or(std::cmp::Ordering::Equal))
                .map(|(pair, _)| pair)
            else {
                break;
            };

            // Merge b into a: size-weighted profile average
            let cb = communities[b].take();
            let (Some(ca), Some(cb)) = (communities[a].as_mut(), cb) else {
                break;
            };
            let s1 = ca.members.len() as f64;
            let s2 = cb.members.len() as f64;
            for (slot, &value) in ca.profile.iter_mut().zip(cb.profile.iter()) {
                *slot = (*slot * s1 + value * s2) / (s1 + s2);
            }
            for &node in &cb.members {
                membership[node] = a;
            }
            ca.members.extend(cb.members);

            adjacent = adjacent
                .into_iter()
                .filter_map(|(x, y)| {
                    let x = if x == b { a } else { x };
                    let y = if y == b { a } else { y };
                    if x == y {
                        None
                    } else if x < y {
                        Some((x, y))
                    } else {
                        Some((y, x))
                    }
                })
                .collect();

            let q = modularity(graph, &membership, 1.0);
            if q > best_q + 1e-12 {
                best_q = q;
                best_membership = membership.clone();
            }
        }

        let result = communities_from_membership(&best_membership);
        debug!(
            nodes = n,
            communities = result.len(),
            walk_length = self.walk_length,
            "Walktrap partition complete"
        );
        Ok(to_topic_communities(graph, result))
    }
}
