// File: crates/difplot-core/src/curve.rs
// Summary: Curve model: parallel x/y columns with constructors from pairs, rows, and columns.
// Notes:
// - Construction only checks that the columns line up. Ordering and finiteness
//   are checked by the sampler, since unsorted curves are still valid data.

use crate::downsample::{sample_with, Downsampled, SampleOptions};
use crate::error::{InvalidInput, Result};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Curve {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Curve {
    /// Build a curve from parallel columns.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(InvalidInput::LengthMismatch { x: x.len(), y: y.len() }.into());
        }
        Ok(Self { x, y })
    }

    pub fn from_points(points: &[(f64, f64)]) -> Self {
        let (x, y) = points.iter().copied().unzip();
        Self { x, y }
    }

    /// Build a curve from `[x, y]` rows (an M×2 array).
    pub fn from_rows(rows: &[[f64; 2]]) -> Self {
        let (x, y) = rows.iter().map(|r| (r[0], r[1])).unzip();
        Self { x, y }
    }

    /// Sample `f` at `steps` evenly spaced x values over `[start, end]`.
    pub fn from_fn(start: f64, end: f64, steps: usize, f: impl Fn(f64) -> f64) -> Self {
        let x = crate::grid::linspace(start, end, steps);
        let y = x.iter().map(|&v| f(v)).collect();
        Self { x, y }
    }

    pub fn len(&self) -> usize { self.x.len() }
    pub fn is_empty(&self) -> bool { self.x.is_empty() }

    pub fn x(&self) -> &[f64] { &self.x }
    pub fn y(&self) -> &[f64] { &self.y }

    /// Point at `i`, if in range.
    pub fn get(&self, i: usize) -> Option<(f64, f64)> {
        Some((*self.x.get(i)?, *self.y.get(i)?))
    }

    pub fn first(&self) -> Option<(f64, f64)> { self.get(0) }
    pub fn last(&self) -> Option<(f64, f64)> { self.len().checked_sub(1).and_then(|i| self.get(i)) }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }

    pub fn to_points(&self) -> Vec<(f64, f64)> { self.points().collect() }

    /// Sub-curve made of the rows at `indices`, in the order given.
    /// Panics if an index is out of range.
    pub fn select(&self, indices: &[usize]) -> Self {
        Self {
            x: indices.iter().map(|&i| self.x[i]).collect(),
            y: indices.iter().map(|&i| self.y[i]).collect(),
        }
    }

    /// Down-sample to roughly `n` points; see [`sample_with`].
    pub fn downsample(&self, n: usize, opts: &SampleOptions) -> Result<Downsampled> {
        sample_with(self, n, opts)
    }
}
