//! The detection engine: five algorithms, isolated failures.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use frames_types::{CommunityAssignment, TopicGraph};

use crate::config::CommunityConfig;
use crate::detector::CommunityDetector;
use crate::eigenvector::LeadingEigenvector;
use crate::error::CommunityError;
use crate::fastgreedy::FastGreedy;
use crate::louvain::Louvain;
use crate::spinglass::Spinglass;
use crate::walktrap::Walktrap;

/// Combined result of one engine run.
///
/// Every algorithm lands in exactly one of the two maps: a successful
/// partition in `assignments`, or the failure reason in `failures`.
/// One algorithm failing never discards the others' results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionReport {
    /// Algorithm name → its community assignment
    pub assignments: BTreeMap<String, CommunityAssignment>,
    /// Algorithm name → why it produced no assignment
    pub failures: BTreeMap<String, String>,
}

impl DetectionReport {
    /// A specific algorithm's assignment, if it succeeded.
    pub fn assignment(&self, algorithm: &str) -> Option<&CommunityAssignment> {
        self.assignments.get(algorithm)
    }

    /// True when every algorithm produced an assignment.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs the five community detection strategies over one graph.
///
/// The graph is immutable; the engine reads it five times and never
/// writes, so callers are free to fan the detectors out across threads
/// instead - the engine itself runs them sequentially.
pub struct DetectionEngine {
    detectors: Vec<Box<dyn CommunityDetector>>,
}

impl DetectionEngine {
    /// Engine with the five standard algorithms configured from `config`.
    pub fn new(config: &CommunityConfig) -> Self {
        let detectors: Vec<Box<dyn CommunityDetector>> = vec![
            Box::new(Louvain {
                resolution: config.resolution,
                seed: config.seed,
            }),
            Box::new(Walktrap {
                walk_length: config.walk_length,
            }),
            Box::new(Spinglass {
                spin_states: config.spin_states,
                seed: config.seed,
                max_iterations: config.max_iterations,
            }),
            Box::new(FastGreedy),
            Box::new(LeadingEigenvector {
                seed: config.seed,
                max_iterations: config.max_iterations,
            }),
        ];
        Self { detectors }
    }

    /// Engine with a custom strategy set.
    pub fn with_detectors(detectors: Vec<Box<dyn CommunityDetector>>) -> Self {
        Self { detectors }
    }

    /// Names of the configured algorithms, in run order.
    pub fn algorithm_names(&self) -> Vec<&'static str> {
        self.detectors.iter().map(|d| d.name()).collect()
    }

    /// Run every algorithm over the graph.
    ///
    /// Each invocation is independent: an algorithm error is recorded in
    /// the report's `failures` and the run continues.
    #[instrument(skip(self, graph))]
    pub fn run(&self, graph: &TopicGraph) -> DetectionReport {
        let mut report = DetectionReport::default();
        for detector in &self.detectors {
            match detector.detect(graph) {
                Ok(communities) => {
                    debug!(
                        algorithm = detector.name(),
                        communities = communities.len(),
                        "Algorithm succeeded"
                    );
                    report.assignments.insert(
                        detector.name().to_string(),
                        CommunityAssignment::from_communities(communities),
                    );
                }
                Err(error) => {
                    warn!(
                        algorithm = detector.name(),
                        error = %error,
                        "Algorithm failed; continuing with the rest"
                    );
                    report
                        .failures
                        .insert(detector.name().to_string(), error.to_string());
                }
            }
        }
        report
    }
}

impl Default for DetectionEngine {
    fn default() -> Self {
        Self::new(&CommunityConfig::default())
    }
}
