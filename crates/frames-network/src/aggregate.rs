//! Sentence-to-document probability aggregation.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use frames_types::{DocumentRow, MatrixError, ProbabilityMatrix};

use crate::error::NetworkError;

/// Element-wise reducer applied across a document's sentence rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reducer {
    /// Per topic, the strongest signal from any sentence. A single
    /// strongly on-topic sentence registers the whole document as
    /// relevant to that topic.
    #[default]
    Max,
    /// Per topic, the mean across sentences; dilutes outliers.
    Mean,
}

/// Collapse sentence-level probability rows into one row per document.
///
/// Rows are `(parent_doc_id, probabilities)` pairs; output keeps the
/// first-seen order of parent ids. Empty groups cannot occur: a key only
/// exists because at least one row carried it.
///
/// # Errors
///
/// [`MatrixError::EmptyMatrix`] on empty input, [`MatrixError::ShapeMismatch`]
/// if rows disagree on topic count.
#[instrument(skip(rows))]
pub fn aggregate(
    rows: &[(String, Vec<f32>)],
    reducer: Reducer,
) -> Result<ProbabilityMatrix, NetworkError> {
    let first = rows.first().ok_or(MatrixError::EmptyMatrix)?;
    let k = first.1.len();
    if k == 0 {
        return Err(MatrixError::EmptyMatrix.into());
    }

    let mut order: Vec<&str> = Vec::new();
    let mut groups: HashMap<&str, (Vec<f32>, usize)> = HashMap::new();

    for (doc_id, probabilities) in rows {
        if probabilities.len() != k {
            return Err(MatrixError::ShapeMismatch {
                expected: k,
                actual: probabilities.len(),
            }
            .into());
        }
        match groups.entry(doc_id.as_str()) {
            Entry::Occupied(mut entry) => {
                let (acc, count) = entry.get_mut();
                for (slot, &value) in acc.iter_mut().zip(probabilities.iter()) {
                    match reducer {
                        Reducer::Max => *slot = slot.max(value),
                        Reducer::Mean => *slot += value,
                    }
                }
                *count += 1;
            }
            Entry::Vacant(entry) => {
                order.push(doc_id.as_str());
                entry.insert((probabilities.clone(), 1));
            }
        }
    }

    let documents = order
        .into_iter()
        .map(|doc_id| {
            let (mut acc, count) = groups.remove(doc_id).unwrap_or_default();
            if reducer == Reducer::Mean && count > 1 {
                for slot in acc.iter_mut() {
                    *slot /= count as f32;
                }
            }
            DocumentRow::new(doc_id, acc)
        })
        .collect();

    debug!(sentences = rows.len(), reducer = ?reducer, "Aggregated sentence rows");
    Ok(ProbabilityMatrix::new(documents)?)
}
