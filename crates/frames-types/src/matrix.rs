//! Document × topic probability matrix.

use serde::{Deserialize, Serialize};

use crate::error::MatrixError;

/// A topic identifier: the topic's column index in the probability matrix.
///
/// The outlier topic (conventionally -1 in topic-model output) is excluded
/// upstream; only real topic columns 0..K appear here.
pub type TopicId = usize;

/// One document's topic-membership probabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRow {
    /// Source document identifier
    pub doc_id: String,
    /// One probability per topic, index 0..K
    pub probabilities: Vec<f32>,
}

impl DocumentRow {
    /// Create a new document row.
    pub fn new(doc_id: impl Into<String>, probabilities: Vec<f32>) -> Self {
        Self {
            doc_id: doc_id.into(),
            probabilities,
        }
    }
}

/// Ordered document × topic probability matrix.
///
/// Invariant: every row has the same length K > 0. Rows are non-negative
/// topic probabilities in model output, but magnitudes are not enforced
/// here - only the shape is.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProbabilityMatrix {
    rows: Vec<DocumentRow>,
}

impl ProbabilityMatrix {
    /// Build a matrix from document rows, validating the shape.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::EmptyMatrix`] for zero rows or zero columns,
    /// and [`MatrixError::ShapeMismatch`] when rows disagree on length.
    pub fn new(rows: Vec<DocumentRow>) -> Result<Self, MatrixError> {
        let first = rows.first().ok_or(MatrixError::EmptyMatrix)?;
        let expected = first.probabilities.len();
        if expected == 0 {
            return Err(MatrixError::EmptyMatrix);
        }
        for row in &rows {
            if row.probabilities.len() != expected {
                return Err(MatrixError::ShapeMismatch {
                    expected,
                    actual: row.probabilities.len(),
                });
            }
        }
        Ok(Self { rows })
    }

    /// Number of documents (rows).
    pub fn document_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of topics (columns).
    pub fn topic_count(&self) -> usize {
        self.rows.first().map_or(0, |r| r.probabilities.len())
    }

    /// All document rows in order.
    pub fn rows(&self) -> &[DocumentRow] {
        &self.rows
    }

    /// A topic's probability column across all documents.
    ///
    /// # Panics
    /// Panics if `topic` is out of range.
    pub fn column(&self, topic: TopicId) -> Vec<f32> {
        assert!(topic < self.topic_count(), "Topic index out of range");
        self.rows.iter().map(|r| r.probabilities[topic]).collect()
    }

    /// Total probability mass assigned to a topic (column sum).
    ///
    /// # Panics
    /// Panics if `topic` is out of range.
    pub fn column_mass(&self, topic: TopicId) -> f64 {
        assert!(topic < self.topic_count(), "Topic index out of range");
        self.rows
            .iter()
            .map(|r| r.probabilities[topic] as f64)
            .sum()
    }
}
