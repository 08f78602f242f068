//! Leading-eigenvector partition (recursive spectral bisection).

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use frames_types::{TopicGraph, TopicId};

use crate::detector::CommunityDetector;
use crate::error::CommunityError;

/// Newman's leading-eigenvector method.
///
/// Recursively splits node groups by the sign of the leading eigenvector
/// of the generalized modularity matrix, computed by shifted power
/// iteration. A group whose leading eigenvalue is non-positive, or whose
/// best split does not increase modularity, is left whole.
#[derive(Debug, Clone)]
pub struct LeadingEigenvector {
    /// RNG seed for the power-iteration start vector
    pub seed: u64,
    /// Power iteration budget per split attempt
    pub max_iterations: usize,
}

impl Default for LeadingEigenvector {
    fn default() -> Self {
        Self {
            seed: 42,
            max_iterations: 1000,
        }
    }
}

const EIGEN_TOLERANCE: f64 = 1e-9;

/// Dense view of the generalized modularity matrix for a node group.
struct GroupMatrix {
    /// `entries[u][v]` = B(g) for the group's local indices
    entries: Vec<Vec<f64>>,
}

impl GroupMatrix {
    /// B(g)_uv = A_uv - k_u k_v / 2m - delta_uv * row_sum_u, where the
    /// row sum runs over the group only (Newman's B^(g) correction).
    fn build(graph: &TopicGraph, group: &[usize], m2: f64) -> Self {
        let size = group.len();
        let mut local: Vec<Option<usize>> = vec![None; graph.node_count()];
        for (slot, &node) in group.iter().enumerate() {
            local[node] = Some(slot);
        }
        let mut entries = vec![vec![0.0; size]; size];
        for (u, &node) in group.iter().enumerate() {
            for v in 0..size {
                entries[u][v] = -graph.strength(node) * graph.strength(group[v]) / m2;
            }
            for &(j, w) in graph.neighbors(node) {
                if let Some(v) = local[j] {
                    entries[u][v] += w;
                }
            }
        }
        for u in 0..size {
            let row_sum: f64 = entries[u].iter().sum();
            entries[u][u] -= row_sum;
        }
        Self { entries }
    }

    fn size(&self) -> usize {
        self.entries.len()
    }

    fn multiply(&self, x: &[f64]) -> Vec<f64> {
        self.entries
            .iter()
            .map(|row| row.iter().zip(x.iter()).map(|(b, xi)| b * xi).sum())
            .collect()
    }

    /// Infinity-norm bound on the spectrum, used as the power-iteration
    /// shift so the leading eigenvalue dominates in magnitude.
    fn shift(&self) -> f64 {
        self.entries
            .iter()
            .map(|row| row.iter().map(|b| b.abs()).sum())
            .fold(0.0, f64::max)
    }
}

impl LeadingEigenvector {
    /// Leading eigenpair of the group matrix via shifted power iteration.
    fn leading_eigenpair(
        &self,
        matrix: &GroupMatrix,
        rng: &mut StdRng,
    ) -> Result<(f64, Vec<f64>), CommunityError> {
        let size = matrix.size();
        let shift = matrix.shift();
        let mut x: Vec<f64> = (0..size).map(|_| rng.random::<f64>() - 0.5).collect();
        let norm = x.iter().map(|v| v * v).sum::<f64>().sqrt();
        if norm > 0.0 {
            for v in x.iter_mut() {
                *v /= norm;
            }
        }

        for _ in 0..self.max_iterations {
            let mut y = matrix.multiply(&x);
            for (yi, xi) in y.iter_mut().zip(x.iter()) {
                *yi += shift * xi;
            }
            let norm = y.iter().map(|v| v * v).sum::<f64>().sqrt();
            if norm < EIGEN_TOLERANCE {
                // x is (numerically) in the null space of the shifted
                // matrix: no positive direction to split along
                return Ok((0.0, x));
            }
            for v in y.iter_mut() {
                *v /= norm;
            }
            let diff = y
                .iter()
                .zip(x.iter())
                .map(|(a, b)| (a - b).abs())
                .fold(0.0, f64::max);
            x = y;
            if diff < EIGEN_TOLERANCE {
                let bx = matrix.multiply(&x);
                let eigenvalue: f64 = x.iter().zip(bx.iter()).map(|(a, b)| a * b).sum();
                return Ok((eigenvalue, x));
            }
        }
        Err(CommunityError::NonConvergence(format!(
            "Power iteration did not converge in {} steps",
            self.max_iterations
        )))
    }

    fn split_group(
        &self,
        graph: &TopicGraph,
        group: Vec<usize>,
        m2: f64,
        rng: &mut StdRng,
        out: &mut Vec<Vec<usize>>,
    ) -> Result<(), CommunityError> {
        if group.len() < 2 {
            out.push(group);
            return Ok(());
        }
        let matrix = GroupMatrix::build(graph, &group, m2);
        let (eigenvalue, vector) = self.leading_eigenpair(&matrix, rng)?;
        if eigenvalue <= 1e-8 {
            out.push(group);
            return Ok(());
        }

        let signs: Vec<f64> = vector.iter().map(|&v| if v >= 0.0 { 1.0 } else { -1.0 }).collect();
        let gain: f64 = {
            let bs = matrix.multiply(&signs);
            signs.iter().zip(bs.iter()).map(|(a, b)| a * b).sum::<f64>() / (2.0 * m2)
        };
        let positive: Vec<usize> = group
            .iter()
            .zip(signs.iter())
            .filter(|(_, &s)| s > 0.0)
            .map(|(&node, _)| node)
            .collect();
        let negative: Vec<usize> = group
            .iter()
            .zip(signs.iter())
            .filter(|(_, &s)| s < 0.0)
            .map(|(&node, _)| node)
            .collect();
        if positive.is_empty() || negative.is_empty() || gain <= 1e-12 {
            out.push(group);
            return Ok(());
        }
        self.split_group(graph, positive, m2, rng, out)?;
        self.split_group(graph, negative, m2, rng, out)
    }
}

impl CommunityDetector for LeadingEigenvector {
    fn name(&self) -> &'static str {
        "leading_eigenvector"
    }

    fn detect(&self, graph: &TopicGraph) -> Result<Vec<Vec<TopicId>>, CommunityError> {
        let n = graph.node_count();
        if n == 0 {
            return Ok(Vec::new());
        }
        let m2 = 2.0 * graph.total_weight();
        if m2 <= 0.0 {
            // No modularity matrix without edges: every node is its own
            // trivial community
            return Ok((0..n).map(|i| vec![graph.node(i).topic]).collect());
        }

        let mut rng = StdRng::seed_from_u64(self.seed);
        let mut groups = Vec::new();
        self.split_group(graph, (0..n).collect(), m2, &mut rng, &mut groups)?;

        debug!(
            nodes = n,
            communities = groups.len(),
            "Leading-eigenvector partition complete"
        );
        Ok(groups
            .into_iter()
            .map(|g| g.into_iter().map(|i| graph.node(i).topic).collect())
            .collect())
    }
}
