//! Fixed community color palette.

/// Categorical colors assigned to communities by index.
///
/// Community index i gets `PALETTE[i % PALETTE.len()]`. When an algorithm
/// finds more communities than the palette holds, colors wrap around and
/// distinct communities share a color. That reuse is inherited behavior
/// from the reference analysis and is kept as-is.
pub const PALETTE: [&str; 12] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf", "#aec7e8", "#ffbb78",
];

/// Color for a community index.
pub fn color_for(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
