//! Network construction configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the similarity graph builder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Multiplier applied to normalized node sizes for visual encoding
    #[serde(default = "default_size_multiplier")]
    pub size_multiplier: f64,

    /// Remove nodes that have no label attribute
    #[serde(default)]
    pub prune_unlabeled: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            size_multiplier: default_size_multiplier(),
            prune_unlabeled: false,
        }
    }
}

fn default_size_multiplier() -> f64 {
    10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NetworkConfig::default();
        assert!((config.size_multiplier - 10.0).abs() < f64::EPSILON);
        assert!(!config.prune_unlabeled);
    }

    #[test]
    fn test_serde_defaults_fill_missing_fields() {
        let config: NetworkConfig = serde_json::from_str("{}").unwrap();
        assert!((config.size_multiplier - 10.0).abs() < f64::EPSILON);
        assert!(!config.prune_unlabeled);
    }
}
