// File: crates/difplot-core/src/lib.rs
// Summary: Core library entry point; exports the curve model, adaptive down-sampler, and data file I/O.

pub mod curve;
pub mod dataset;
pub mod downsample;
pub mod error;
pub mod grid;

mod gap;
mod weights;

pub use curve::Curve;
pub use dataset::{
    read_dir, read_dir_values, read_table, write_curve, Dataset, KeyedValues, ReadOptions, Table,
};
pub use downsample::{sample, sample_with, Convergence, Downsampled, SampleOptions};
pub use error::{Error, InvalidInput, Result};
