// File: crates/difplot-core/src/weights.rs
// Summary: Slope-weighted candidate selection (weight per segment, CDF inversion).

use tracing::debug;

/// Per-segment rise/run of a curve, computed once and re-weighted for each tolerance.
pub(crate) struct SlopeProfile {
    deltas: Vec<(f64, f64)>,
}

impl SlopeProfile {
    pub(crate) fn new(x: &[f64], y: &[f64]) -> Self {
        let deltas = x
            .windows(2)
            .zip(y.windows(2))
            .map(|(xs, ys)| (xs[1] - xs[0], ys[1] - ys[0]))
            .collect();
        Self { deltas }
    }

    /// Number of points on the profiled curve.
    fn points(&self) -> usize { self.deltas.len() + 1 }

    /// Segment weights `s / (tol + s)` with `s = |dy/dx|`, normalized to sum to one.
    ///
    /// Small tolerances saturate every sloped segment toward 1 (near-uniform sampling);
    /// large tolerances make the weight proportional to the slope. A curve with no
    /// weighted segment at all falls back to uniform weights.
    fn weights(&self, tol: f64) -> Vec<f64> {
        let mut w: Vec<f64> = self.deltas.iter().map(|&(dx, dy)| slope_weight(dx, dy, tol)).collect();
        let total: f64 = w.iter().sum();
        if total > 0.0 && total.is_finite() {
            w.iter_mut().for_each(|v| *v /= total);
        } else {
            debug!(segments = w.len(), "zero slope weight everywhere; using uniform weights");
            let uniform = 1.0 / w.len() as f64;
            w.iter_mut().for_each(|v| *v = uniform);
        }
        w
    }

    /// Candidate indices for a target of `n` points: index 0, index M-1, and the
    /// inverse CDF at the `n - 2` interior targets of an even grid over [0, 1].
    /// Sorted and deduplicated, so the result may hold fewer than `n` indices.
    pub(crate) fn candidates(&self, tol: f64, n: usize) -> Vec<usize> {
        let last = self.points() - 1;
        let mut cdf = Vec::with_capacity(self.points());
        cdf.push(0.0);
        let mut acc = 0.0;
        for w in self.weights(tol) {
            acc += w;
            cdf.push(acc);
        }

        let mut idx = Vec::with_capacity(n);
        idx.push(0);
        let steps = (n - 1) as f64;
        for i in 1..n - 1 {
            let target = i as f64 / steps;
            idx.push(cdf.partition_point(|&c| c < target).min(last));
        }
        idx.push(last);
        idx.sort_unstable();
        idx.dedup();
        idx
    }
}

fn slope_weight(dx: f64, dy: f64, tol: f64) -> f64 {
    if dy == 0.0 {
        return 0.0;
    }
    let slope = (dy / dx).abs();
    if slope.is_infinite() {
        // vertical segment (repeated x)
        1.0
    } else {
        slope / (tol + slope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_slope_gives_even_candidates() {
        let x: Vec<f64> = (0..=100).map(|i| i as f64 / 10.0).collect();
        let y: Vec<f64> = x.iter().map(|v| 2.0 * v).collect();
        let idx = SlopeProfile::new(&x, &y).candidates(1e-3, 5);
        assert_eq!(idx.len(), 5);
        assert_eq!(idx[0], 0);
        assert_eq!(idx[4], 100);
        for (got, want) in idx.iter().zip([0usize, 25, 50, 75, 100]) {
            assert!(got.abs_diff(want) <= 1, "{got} vs {want}");
        }
    }

    #[test]
    fn flat_curve_does_not_divide_by_zero() {
        let x: Vec<f64> = (0..20).map(f64::from).collect();
        let y = vec![5.0; 20];
        let profile = SlopeProfile::new(&x, &y);
        let w = profile.weights(1e-3);
        assert!(w.iter().all(|v| v.is_finite()));
        assert!((w.iter().sum::<f64>() - 1.0).abs() < 1e-12);
        assert_eq!(profile.candidates(1e-3, 6).len(), 6);
    }

    #[test]
    fn steep_step_collapses_candidates() {
        // All weight sits on one segment, so every interior target lands on it.
        let x: Vec<f64> = (0..50).map(f64::from).collect();
        let y: Vec<f64> = x.iter().map(|&v| if v < 25.0 { 0.0 } else { 1.0 }).collect();
        let idx = SlopeProfile::new(&x, &y).candidates(1e-3, 10);
        assert_eq!(idx, vec![0, 25, 49]);
    }

    #[test]
    fn vertical_segment_saturates() {
        assert_eq!(slope_weight(0.0, 1.0, 1e-3), 1.0);
        assert_eq!(slope_weight(0.0, 0.0, 1e-3), 0.0);
        assert!((slope_weight(1.0, 1.0, 1.0) - 0.5).abs() < 1e-12);
    }
}
