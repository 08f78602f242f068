//! Community detection configuration.

use serde::{Deserialize, Serialize};

/// Configuration shared by the five detection algorithms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityConfig {
    /// Modularity resolution parameter (Louvain)
    #[serde(default = "default_resolution")]
    pub resolution: f64,

    /// Seed for every stochastic algorithm, for reproducible runs
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Random walk length (walktrap)
    #[serde(default = "default_walk_length")]
    pub walk_length: usize,

    /// Number of Potts spin states (spinglass)
    #[serde(default = "default_spin_states")]
    pub spin_states: usize,

    /// Iteration budget for convergence loops (spinglass refinement,
    /// eigenvector power iteration)
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

impl Default for CommunityConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            seed: default_seed(),
            walk_length: default_walk_length(),
            spin_states: default_spin_states(),
            max_iterations: default_max_iterations(),
        }
    }
}

fn default_resolution() -> f64 {
    1.0
}
fn default_seed() -> u64 {
    42
}
fn default_walk_length() -> usize {
    4
}
fn default_spin_states() -> usize {
    25
}
fn default_max_iterations() -> usize {
    1000
}
