//! Min-max normalization for node visual attributes.

/// Rescale values to [0, 1] via `(v - min) / (max - min)`.
///
/// Degenerate input where all values are equal returns all zeros instead
/// of dividing by zero; with nothing to rank, every node gets the floor
/// of the visual scale. Empty input returns an empty vector.
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    let Some(&first) = values.first() else {
        return Vec::new();
    };
    let (min, max) = values.iter().fold((first, first), |(lo, hi), &v| {
        (lo.min(v), hi.max(v))
    });
    let range = max - min;
    if range == 0.0 {
        return vec![0.0; values.len()];
    }
    values.iter().map(|&v| (v - min) / range).collect()
}
