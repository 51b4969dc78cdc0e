// File: crates/difplot-core/src/grid.rs
// Summary: Evenly spaced value and index grids.

pub fn linspace(start: f64, end: f64, steps: usize) -> Vec<f64> {
    if steps < 2 { return vec![start, end]; }
    let step = (end - start) / (steps as f64 - 1.0);
    (0..steps).map(|i| start + step * i as f64).collect()
}

/// `count` indices spread evenly over `0..len`, both ends included, rounded down.
/// Computed in integer arithmetic so `len - 1` is always hit exactly.
pub fn stride_indices(len: usize, count: usize) -> Vec<usize> {
    match (len, count) {
        (0, _) | (_, 0) => Vec::new(),
        (_, 1) => vec![0],
        _ => (0..count).map(|i| i * (len - 1) / (count - 1)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stride_hits_both_ends() {
        assert_eq!(stride_indices(11, 3), vec![0, 5, 10]);
        assert_eq!(stride_indices(10, 4), vec![0, 3, 6, 9]);
        assert_eq!(stride_indices(5, 1), vec![0]);
        assert!(stride_indices(0, 4).is_empty());
    }
}
