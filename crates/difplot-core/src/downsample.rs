// File: crates/difplot-core/src/downsample.rs
// Summary: Adaptive curve down-sampling. Slope-weighted point selection, max-gap
//          enforcement, tolerance bisection, and a bounded fallback with coverage injection.

use std::cmp::Ordering;

use tracing::{debug, info};

use crate::curve::Curve;
use crate::error::{InvalidInput, Result};
use crate::gap::{enforce_max_gap, within_gap};
use crate::grid::stride_indices;
use crate::weights::SlopeProfile;

/// Bracket searched by the tolerance bisection.
const TOL_LOW: f64 = 1e-12;
const TOL_HIGH: f64 = 1e3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleOptions {
    /// Initial knee of the slope weighting `s / (tol + s)`; adapted by bisection.
    /// Starts are clamped into the searched range `[1e-12, 1e3]`.
    pub tolerance: f64,
    /// Largest allowed x distance between consecutive samples.
    pub max_gap: f64,
    /// Bisection rounds before falling back.
    pub max_iterations: usize,
    /// Fallback only: `even_samples - 1` evenly spaced indices are added.
    pub even_samples: usize,
    /// Fallback only: this many raw points next to each end are added.
    pub edge_samples: usize,
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self {
            tolerance: 1e-3,
            max_gap: f64::INFINITY,
            max_iterations: 50,
            even_samples: 100,
            edge_samples: 9,
        }
    }
}

impl SampleOptions {
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_gap(mut self, max_gap: f64) -> Self {
        self.max_gap = max_gap;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_even_samples(mut self, even_samples: usize) -> Self {
        self.even_samples = even_samples;
        self
    }

    pub fn with_edge_samples(mut self, edge_samples: usize) -> Self {
        self.edge_samples = edge_samples;
        self
    }
}

/// How a sample set was reached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Convergence {
    /// Exactly `n` points within the gap bound, found in `iterations` rounds.
    Exact { iterations: usize, tolerance: f64 },
    /// No exact set within the round budget. The set was forced to `n` points and then
    /// grew by `injected` coverage indices, so it may hold more than `n`.
    Fallback { tolerance: f64, injected: usize },
    /// The curve had no more than `n` points and is returned whole.
    Passthrough,
}

#[derive(Clone, Debug)]
pub struct Downsampled {
    pub curve: Curve,
    /// Rows of the input kept in `curve`, strictly increasing.
    pub indices: Vec<usize>,
    pub convergence: Convergence,
}

impl Downsampled {
    pub fn is_exact(&self) -> bool {
        matches!(self.convergence, Convergence::Exact { .. })
    }

    pub fn into_curve(self) -> Curve { self.curve }
}

/// Down-sample `curve` to about `n` points with default options.
pub fn sample(curve: &Curve, n: usize) -> Result<Curve> {
    sample_with(curve, n, &SampleOptions::default()).map(Downsampled::into_curve)
}

/// Down-sample `curve` to `n` points, concentrating samples where the slope is steep.
///
/// The first and last points are always kept and, where the input allows it, no two
/// consecutive samples are more than `opts.max_gap` apart in x. The weighting
/// tolerance is bisected until exactly `n` points satisfy those constraints. If that
/// does not happen within `opts.max_iterations` rounds, the last selection is
/// stretched or thinned to `n` points and extra evenly spaced and edge points are
/// added; the result then holds at least `n` points (see [`Convergence::Fallback`]).
///
/// `curve.x()` must be sorted ascending.
pub fn sample_with(curve: &Curve, n: usize, opts: &SampleOptions) -> Result<Downsampled> {
    validate(curve, n, opts)?;
    let m = curve.len();
    if n >= m {
        return Ok(Downsampled {
            curve: curve.clone(),
            indices: (0..m).collect(),
            convergence: Convergence::Passthrough,
        });
    }

    let x = curve.x();
    let profile = SlopeProfile::new(x, curve.y());
    let select = |tol: f64| enforce_max_gap(x, &profile.candidates(tol, n), opts.max_gap);

    let (mut low, mut high) = (TOL_LOW, TOL_HIGH);
    let mut tol = opts.tolerance.clamp(TOL_LOW, TOL_HIGH);
    for round in 1..=opts.max_iterations {
        let idx = select(tol);
        if is_exact(x, &idx, n, opts.max_gap) {
            debug!(round, tol, n, "sample set converged");
            let convergence = Convergence::Exact { iterations: round, tolerance: tol };
            return Ok(finish(curve, idx, convergence));
        }
        if idx.len() > n {
            low = tol;
            tol = (tol + high) / 2.0;
        } else {
            high = tol;
            tol = (tol + low) / 2.0;
        }
    }

    let mut idx = fit_to_size(select(tol), n, m);
    let injected = inject_coverage(&mut idx, m, opts);
    info!(
        n,
        tol,
        len = idx.len(),
        rounds = opts.max_iterations,
        "no exact sample set found; using fallback selection"
    );
    Ok(finish(curve, idx, Convergence::Fallback { tolerance: tol, injected }))
}

fn validate(curve: &Curve, n: usize, opts: &SampleOptions) -> Result<()> {
    let m = curve.len();
    if m < 3 {
        return Err(InvalidInput::CurveTooShort { len: m }.into());
    }
    if n <= 2 {
        return Err(InvalidInput::TargetTooSmall { n }.into());
    }
    if !opts.tolerance.is_finite() || opts.tolerance < 0.0 {
        return Err(InvalidInput::InvalidOption {
            name: "tolerance",
            reason: format!("must be finite and non-negative, got {}", opts.tolerance),
        }
        .into());
    }
    if opts.max_gap.is_nan() || opts.max_gap <= 0.0 {
        return Err(InvalidInput::InvalidOption {
            name: "max_gap",
            reason: format!("must be positive, got {}", opts.max_gap),
        }
        .into());
    }
    if let Some(index) = curve.points().position(|(x, y)| !x.is_finite() || !y.is_finite()) {
        return Err(InvalidInput::NonFinite { index }.into());
    }
    if let Some(index) = curve.x().windows(2).position(|w| w[1] < w[0]) {
        return Err(InvalidInput::NonMonotonic { index: index + 1 }.into());
    }
    Ok(())
}

fn is_exact(x: &[f64], idx: &[usize], n: usize, max_gap: f64) -> bool {
    idx.len() == n
        && idx.first() == Some(&0)
        && idx.last() == Some(&(x.len() - 1))
        && within_gap(x, idx, max_gap)
}

/// Force a sorted selection to exactly `n` indices over a curve of `m` points,
/// keeping both ends.
fn fit_to_size(mut idx: Vec<usize>, n: usize, m: usize) -> Vec<usize> {
    if let Some(last) = idx.last_mut() {
        *last = m - 1;
    }
    match idx.len().cmp(&n) {
        Ordering::Equal => idx,
        Ordering::Greater => stride_indices(idx.len(), n).into_iter().map(|k| idx[k]).collect(),
        Ordering::Less => {
            idx.extend(stride_indices(m, n));
            idx.sort_unstable();
            idx.dedup();
            idx.truncate(n);
            // truncation drops from the right; put the final point back
            if let Some(last) = idx.last_mut() {
                *last = m - 1;
            }
            idx
        }
    }
}

/// Add evenly spaced indices and the raw points next to both ends. Returns how many
/// indices were new.
fn inject_coverage(idx: &mut Vec<usize>, m: usize, opts: &SampleOptions) -> usize {
    let before = idx.len();
    let even = opts.even_samples;
    if even > 0 {
        idx.extend((1..even).map(|j| j * (m - 1) / even));
    }
    let edge = opts.edge_samples.min(m - 1);
    idx.extend((1..=edge).flat_map(|j| [j, m - 1 - j]));
    idx.sort_unstable();
    idx.dedup();
    idx.len() - before
}

fn finish(curve: &Curve, indices: Vec<usize>, convergence: Convergence) -> Downsampled {
    Downsampled { curve: curve.select(&indices), indices, convergence }
}
