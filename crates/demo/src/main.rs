// File: crates/demo/src/main.rs
// Summary: `difplot` CLI. Down-samples a data file (`sample`) or lists a directory of numbered files (`scan`).

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use difplot_core::dataset::{format_key, write_curve_to};
use difplot_core::{
    read_dir, read_table, sample_with, write_curve, Convergence, ReadOptions, SampleOptions,
};
use tracing::{info, Level};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Down-sample one data file to about N points
    Sample {
        /// Whitespace-separated numeric columns
        input: PathBuf,
        /// Target number of points (> 2)
        #[arg(short = 'n', long = "points")]
        points: usize,
        #[command(flatten)]
        tuning: Tuning,
        /// Column holding x
        #[arg(long, default_value_t = 0)]
        x_col: usize,
        /// Column holding y
        #[arg(long, default_value_t = 1)]
        y_col: usize,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the numbered data files in a directory
    Scan {
        dir: PathBuf,
        /// Characters of the file name that spell its key
        #[arg(long, default_value_t = 9)]
        key_length: usize,
        /// Key that must be present (repeatable)
        #[arg(long)]
        expected: Vec<f64>,
    },
}

/// Overrides for [`SampleOptions`]; unset flags keep the library defaults.
#[derive(Args)]
struct Tuning {
    /// Initial slope-weighting tolerance
    #[arg(long)]
    tolerance: Option<f64>,
    /// Largest x distance between consecutive samples
    #[arg(long)]
    max_gap: Option<f64>,
    /// Tolerance bisection rounds before falling back
    #[arg(long)]
    max_iterations: Option<usize>,
    /// Evenly spaced points added on fallback (plus one)
    #[arg(long)]
    even_samples: Option<usize>,
    /// Raw points kept next to each end on fallback
    #[arg(long)]
    edge_samples: Option<usize>,
}

impl Tuning {
    fn options(&self) -> SampleOptions {
        let mut opts = SampleOptions::default();
        if let Some(v) = self.tolerance {
            opts = opts.with_tolerance(v);
        }
        if let Some(v) = self.max_gap {
            opts = opts.with_max_gap(v);
        }
        if let Some(v) = self.max_iterations {
            opts = opts.with_max_iterations(v);
        }
        if let Some(v) = self.even_samples {
            opts = opts.with_even_samples(v);
        }
        if let Some(v) = self.edge_samples {
            opts = opts.with_edge_samples(v);
        }
        opts
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt().with_max_level(level).with_writer(io::stderr).init();

    match cli.command {
        Commands::Sample { input, points, tuning, x_col, y_col, output } => {
            let table = read_table(&input, &ReadOptions::default())
                .with_context(|| format!("failed to read '{}'", input.display()))?;
            let curve = table
                .curve(x_col, y_col)
                .with_context(|| format!("columns {x_col}/{y_col} of '{}'", input.display()))?;
            info!(points = curve.len(), path = %input.display(), "loaded curve");

            let out = sample_with(&curve, points, &tuning.options())?;
            match out.convergence {
                Convergence::Exact { iterations, tolerance } => {
                    info!(iterations, tolerance, "exact sample set")
                }
                Convergence::Fallback { tolerance, injected } => {
                    info!(tolerance, injected, "fallback sample set")
                }
                Convergence::Passthrough => info!("input already small enough"),
            }

            match output {
                Some(path) => {
                    write_curve(&path, &out.curve)?;
                    eprintln!("Wrote {} of {} points to {}", out.curve.len(), curve.len(), path.display());
                }
                None => write_curve_to(io::stdout().lock(), &out.curve)?,
            }
        }
        Commands::Scan { dir, key_length, expected } => {
            let opts = ReadOptions { key_length, expected, ..ReadOptions::default() };
            let data = read_dir(&dir, &opts)
                .with_context(|| format!("failed to scan '{}'", dir.display()))?;
            println!("{} data files in {}", data.len(), dir.display());
            for (key, table) in data.iter() {
                println!("{}  {:>8} rows", format_key(key), table.len());
            }
            for &key in &data.missing {
                println!("missing {}", format_key(key));
            }
        }
    }
    Ok(())
}
