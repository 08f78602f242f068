//! # frames-network
//!
//! Turns a document × topic probability matrix into a weighted topic
//! co-occurrence graph.
//!
//! The pipeline stage covered here:
//! 1. [`aggregate`] - collapse sentence-level probability rows into one
//!    row per parent document (element-wise max or mean)
//! 2. [`GraphBuilder`] - pairwise cosine similarity between topic
//!    probability columns becomes edge weight; column mass, min-max
//!    normalized, becomes node size; labels attach as node attributes
//!    and unlabeled topics are optionally pruned
//!
//! The resulting [`frames_types::TopicGraph`] is immutable and feeds the
//! community detection engine in `frames-community`.

pub mod aggregate;
pub mod builder;
pub mod config;
pub mod error;
pub mod normalize;
pub mod similarity;

pub use aggregate::{aggregate, Reducer};
pub use builder::GraphBuilder;
pub use config::NetworkConfig;
pub use error::NetworkError;
pub use normalize::min_max_normalize;
pub use similarity::cosine_similarity;
