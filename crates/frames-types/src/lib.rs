//! # frames-types
//!
//! Shared data types for the topic-frames pipeline.
//!
//! A topic model hands us a document × topic probability matrix; the
//! downstream crates turn it into a weighted topic co-occurrence graph
//! and partition that graph into candidate frame groupings. This crate
//! holds the types that cross those boundaries:
//!
//! - [`ProbabilityMatrix`] - validated document × topic probabilities
//! - [`TopicGraph`] - immutable weighted undirected topic network
//! - [`CommunityAssignment`] - one algorithm's topic → community result
//! - [`PALETTE`] - the fixed community color cycle

pub mod community;
pub mod error;
pub mod graph;
pub mod matrix;
pub mod palette;

pub use community::CommunityAssignment;
pub use error::MatrixError;
pub use graph::{TopicGraph, TopicNode};
pub use matrix::{DocumentRow, ProbabilityMatrix, TopicId};
pub use palette::{color_for, PALETTE};
