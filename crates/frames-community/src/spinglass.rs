//! Spin-model partition (spinglass-style).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use frames_types::{TopicGraph, TopicId};

use crate::detector::CommunityDetector;
use crate::error::CommunityError;

/// Potts-model energy minimization (Reichardt-Bornholdt form).
///
/// Each node carries one of `spin_states` spins; the energy rewards
/// same-spin endpoints of heavy edges and penalizes same-spin pairs the
/// null model expects to be connected. Simulated annealing with a
/// geometric cooling schedule finds a low-energy spin configuration,
/// followed by greedy refinement to a local minimum; final spins define
/// the communities.
///
/// Isolated nodes (zero strength) have no energy terms and are omitted
/// from the result entirely - callers must treat their absence as
/// "unassigned", not as community 0.
#[derive(Debug, Clone)]
pub struct Spinglass {
    /// Number of spin states; the partition can use at most this many
    /// communities
    pub spin_states: usize,
    /// RNG seed for spin initialization and update order
    pub seed: u64,
    /// Budget for the greedy refinement passes after cooling
    pub max_iterations: usize,
}

impl Default for Spinglass {
    fn default() -> Self {
        Self {
            spin_states: 25,
            seed: 42,
            max_iterations: 1000,
        }
    }
}

const T_START: f64 = 1.0;
const T_STOP: f64 = 0.01;
const COOLING: f64 = 0.95;

impl CommunityDetector for Spinglass {
    fn name(&self) -> &'static str {
        "spinglass"
    }

    fn detect(&self, graph: &TopicGraph) -> Result<Vec<Vec<TopicId>>, CommunityError> {
        let n = graph.node_count();
        if n == 0 {
            return Ok(Vec::new());
        }
        // Isolated nodes carry no couplings; the model never assigns them
        let active: Vec<usize> = (0..n).filter(|&i| graph.strength(i) > 0.0).collect();
        if active.is_empty() {
            return Ok(Vec::new());
        }
        let mut position: Vec<Option<usize>> = vec![None; n];
        for (slot, &node) in active.iter().enumerate() {
            position[node] = Some(slot);
        }
        let strengths: Vec<f64> = active.iter().map(|&i| graph.strength(i)).collect();
        let m2 = 2.0 * graph.total_weight();
        if m2 <= 0.0 {
            return Err(CommunityError::Detection(
                "Non-positive total edge weight".to_string(),
            ));
        }

        let q = self.spin_states.max(1);
        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut spins: Vec<usize> = (0..active.len()).map(|_| rng.random_range(0..q)).collect();
        let mut spin_strength = vec![0.0; q];
        for (slot, &k) in strengths.iter().enumerate() {
            spin_strength[spins[slot]] += k;
        }

        // Coupling of node `slot` to every spin: adjacency weight minus
        // the null-model expectation, excluding the node itself.
        let coupling = |slot: usize,
                        spins: &[usize],
                        spin_strength: &[f64]|
         -> Vec<f64> {
            let node = active[slot];
            let mut adjacency = vec![0.0; q];
            for &(j, w) in graph.neighbors(node) {
                if let Some(other) = position[j] {
                    adjacency[spins[other]] += w;
                }
            }
            (0..q)
                .map(|s| {
                    let mut others = spin_strength[s];
                    if spins[slot] == s {
                        others -= strengths[slot];
                    }
                    adjacency[s] - strengths[slot] * others / m2
                })
                .collect()
        };

        // Annealing: Metropolis single-spin flips under geometric cooling
        let mut temperature = T_START;
        while temperature > T_STOP {
            for _ in 0..50 * active.len() {
                let slot = rng.random_range(0..active.len());
                let proposal = rng.random_range(0..q);
                let current = spins[slot];
                if proposal == current {
                    continue;
                }
                let couplings = coupling(slot, &spins, &spin_strength);
                let delta = couplings[current] - couplings[proposal];
                if delta <= 0.0 || rng.random::<f64>() < (-delta / temperature).exp() {
                    spin_strength[current] -= strengths[slot];
                    spin_strength[proposal] += strengths[slot];
                    spins[slot] = proposal;
                }
            }
            temperature *= COOLING;
        }

        // Greedy refinement to a local energy minimum
        let mut stable = false;
        for _ in 0..self.max_iterations {
            let mut changed = false;
            for slot in 0..active.len() {
                let couplings = coupling(slot, &spins, &spin_strength);
                let current = spins[slot];
                let best = (0..q)
                    .max_by(|&a, &b| {
                        couplings[a]
                            .partial_cmp(&couplings[b])
                            .unwrap_or(std::cmp::Ordering::Equal)
                    })
                    .unwrap_or(current);
                if best != current && couplings[best] > couplings[current] + 1e-12 {
                    spin_strength[current] -= strengths[slot];
                    spin_strength[best] += strengths[slot];
                    spins[slot] = best;
                    changed = true;
                }
            }
            if !changed {
                stable = true;
                break;
            }
        }
        if !stable {
            return Err(CommunityError::NonConvergence(format!(
                "Spin refinement still moving after {} passes",
                self.max_iterations
            )));
        }

        // Group active nodes by spin, first-seen order
        let mut spin_slot: Vec<Option<usize>> = vec![None; q];
        let mut communities: Vec<Vec<TopicId>> = Vec::new();
        for (slot, &node) in active.iter().enumerate() {
            let spin = spins[slot];
            let index = match spin_slot[spin] {
                Some(index) => index,
                None => {
                    spin_slot[spin] = Some(communities.len());
                    communities.push(Vec::new());
                    communities.len() - 1
                }
            };
            communities[index].push(graph.node(node).topic);
        }

        debug!(
            nodes = n,
            assigned = active.len(),
            communities = communities.len(),
            seed = self.seed,
            "Spinglass partition complete"
        );
        Ok(communities)
    }
}
