//! # frames-community
//!
//! Community detection over the topic co-occurrence graph.
//!
//! Five independent algorithms partition the same weighted
//! [`frames_types::TopicGraph`] into candidate frame groupings:
//!
//! - [`Louvain`] - two-phase modularity optimization
//! - [`Walktrap`] - agglomeration by random-walk profile distance
//! - [`Spinglass`] - Potts-model simulated annealing
//! - [`FastGreedy`] - greedy modularity-increasing merges
//! - [`LeadingEigenvector`] - recursive spectral bisection of the
//!   modularity matrix
//!
//! All five implement [`CommunityDetector`] and are driven together by
//! the [`DetectionEngine`], which isolates per-algorithm failures: one
//! algorithm blowing up never discards the other four results. Which
//! partition is "correct" is left to the analyst.

pub mod config;
pub mod detector;
pub mod eigenvector;
pub mod engine;
pub mod error;
pub mod fastgreedy;
pub mod louvain;
pub mod modularity;
pub mod spinglass;
pub mod walktrap;

pub use config::CommunityConfig;
pub use detector::CommunityDetector;
pub use eigenvector::LeadingEigenvector;
pub use engine::{DetectionEngine, DetectionReport};
pub use error::CommunityError;
pub use fastgreedy::FastGreedy;
pub use louvain::Louvain;
pub use modularity::modularity;
pub use spinglass::Spinglass;
pub use walktrap::Walktrap;
