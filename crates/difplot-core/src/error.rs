// File: crates/difplot-core/src/error.rs
// Summary: Error taxonomy for curve validation, down-sampling options, and data file I/O.

use std::path::PathBuf;

use thiserror::Error;

/// Reasons a curve, target size, or option set is rejected before sampling.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidInput {
    #[error("curve has {len} points; at least 3 are required")]
    CurveTooShort { len: usize },
    #[error("target size {n} must be greater than 2")]
    TargetTooSmall { n: usize },
    #[error("x is not sorted ascending at index {index}")]
    NonMonotonic { index: usize },
    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },
    #[error("column lengths differ: x has {x} values, y has {y}")]
    LengthMismatch { x: usize, y: usize },
    #[error("row {row} has no column {column}")]
    MissingColumn { row: usize, column: usize },
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption { name: &'static str, reason: String },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("record error in {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
