// File: crates/difplot-core/src/dataset.rs
// Summary: Numbered data files. Directory scan by filename key, whitespace column parsing,
//          NaN row filtering, per-file value vectors, and writing a curve back out.
// Notes:
// - Files are whitespace-separated numeric columns with optional `#` comments.
//   A token that does not parse as a number reads as NaN, which drops its row.
// - A file's key is the number spelled by the first `key_length` characters of its name,
//   e.g. `1.000e+00_run.txt` with the default length of 9.

use std::collections::HashSet;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::curve::Curve;
use crate::error::{Error, InvalidInput, Result};

#[derive(Clone, Debug, PartialEq)]
pub struct ReadOptions {
    /// Read exactly these keys (as `<format_key(k)>.txt`, in this order) instead of
    /// scanning the directory.
    pub keys: Vec<f64>,
    /// Characters of the file name that spell the key when scanning.
    pub key_length: usize,
    /// Rows past this index are ignored.
    pub max_row: usize,
    /// Only the first `max_rows` rows of each file are looked at.
    pub max_rows: Option<usize>,
    /// Multiplier applied to every value (-1 flips the sign).
    pub scale: f64,
    /// Keys that should be present; absent ones are reported in [`Dataset::missing`].
    pub expected: Vec<f64>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            keys: Vec::new(),
            key_length: 9,
            max_row: 10_000,
            max_rows: None,
            scale: 1.0,
            expected: Vec::new(),
        }
    }
}

/// Numeric rows read from one file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    rows: Vec<Vec<f64>>,
}

impl Table {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self { Self { rows } }

    pub fn rows(&self) -> &[Vec<f64>] { &self.rows }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    /// Column `i` across all rows, or `None` if some row is too short.
    pub fn column(&self, i: usize) -> Option<Vec<f64>> {
        self.rows.iter().map(|r| r.get(i).copied()).collect()
    }

    /// Curve with x from column `x_col` and y from column `y_col`.
    pub fn curve(&self, x_col: usize, y_col: usize) -> Result<Curve> {
        let mut x = Vec::with_capacity(self.rows.len());
        let mut y = Vec::with_capacity(self.rows.len());
        for (row, values) in self.rows.iter().enumerate() {
            let get = |column: usize| {
                values.get(column).copied().ok_or(InvalidInput::MissingColumn { row, column })
            };
            x.push(get(x_col)?);
            y.push(get(y_col)?);
        }
        Curve::new(x, y)
    }
}

/// Tables keyed by the number encoded in their file names.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub keys: Vec<f64>,
    pub tables: Vec<Table>,
    /// Expected keys that were not read.
    pub missing: Vec<f64>,
}

impl Dataset {
    pub fn len(&self) -> usize { self.keys.len() }
    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    pub fn iter(&self) -> impl Iterator<Item = (f64, &Table)> + '_ {
        self.keys.iter().copied().zip(self.tables.iter())
    }
}

/// One flat value vector per numbered file, sorted by key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyedValues {
    pub keys: Vec<f64>,
    pub values: Vec<Vec<f64>>,
}

impl KeyedValues {
    pub fn len(&self) -> usize { self.keys.len() }
    pub fn is_empty(&self) -> bool { self.keys.is_empty() }

    /// Curve of value `i` of every file against its key.
    pub fn curve(&self, i: usize) -> Result<Curve> {
        let y = self
            .values
            .iter()
            .enumerate()
            .map(|(row, v)| v.get(i).copied().ok_or(InvalidInput::MissingColumn { row, column: i }))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Curve::new(self.keys.clone(), y)
    }
}

/// Scientific notation with one decimal and a signed two-digit exponent: `2.5e-03`.
pub fn format_key(value: f64) -> String {
    let s = format!("{value:.1e}");
    match s.split_once('e').map(|(m, e)| (m, e.parse::<i32>())) {
        Some((mantissa, Ok(exp))) => {
            let sign = if exp < 0 { '-' } else { '+' };
            format!("{mantissa}e{sign}{:02}", exp.unsigned_abs())
        }
        _ => s,
    }
}

/// Read every numbered file of `dir` (or the explicit `opts.keys`).
///
/// Scanned files come back sorted by key; explicit keys keep their given order.
pub fn read_dir(dir: impl AsRef<Path>, opts: &ReadOptions) -> Result<Dataset> {
    let dir = dir.as_ref();
    let mut data = Dataset::default();
    for (key, path) in entries(dir, opts)? {
        debug!(key = %format_key(key), path = %path.display(), "reading data file");
        let table = read_table(&path, opts)?;
        data.keys.push(key);
        data.tables.push(table);
    }

    data.missing = missing_keys(&data.keys, &opts.expected);
    for &key in &data.missing {
        warn!(key = %format_key(key), dir = %dir.display(), "expected key not found");
    }
    Ok(data)
}

/// Read every value of each numbered file of `dir` (or the explicit `opts.keys`) as
/// one flat vector. A file holding any NaN is skipped whole. Results are sorted by key.
pub fn read_dir_values(dir: impl AsRef<Path>, opts: &ReadOptions) -> Result<KeyedValues> {
    let dir = dir.as_ref();
    let mut read: Vec<(f64, Vec<f64>)> = Vec::new();
    for (key, path) in entries(dir, opts)? {
        debug!(key = %format_key(key), path = %path.display(), "reading value file");
        let values = read_values(&path)?;
        if values.iter().any(|v| v.is_nan()) {
            warn!(key = %format_key(key), path = %path.display(), "NaN detected; skipping file");
            continue;
        }
        read.push((key, values.into_iter().map(|v| v * opts.scale).collect()));
    }
    read.sort_by(|a, b| a.0.total_cmp(&b.0));
    let (keys, values) = read.into_iter().unzip();
    Ok(KeyedValues { keys, values })
}

/// Parse one whitespace-column file, dropping rows that contain NaN.
pub fn read_table(path: impl AsRef<Path>, opts: &ReadOptions) -> Result<Table> {
    let path = path.as_ref();
    let mut rdr = open_reader(path)?;
    let limit = opts.max_rows.unwrap_or(usize::MAX);
    let mut rows = Vec::new();
    let mut j = 0usize;
    for rec in rdr.records() {
        let rec = rec.map_err(|source| Error::Csv { path: path.to_path_buf(), source })?;
        let row: Vec<f64> = parse_record(&rec).collect();
        if row.is_empty() {
            continue;
        }
        if j >= limit || j > opts.max_row {
            break;
        }
        if row.iter().any(|v| v.is_nan()) {
            warn!(path = %path.display(), row = j, "NaN detected; dropping row");
        } else {
            rows.push(row.into_iter().map(|v| v * opts.scale).collect());
        }
        j += 1;
    }
    Ok(Table { rows })
}

/// Write `curve` as two whitespace-separated columns.
pub fn write_curve(path: impl AsRef<Path>, curve: &Curve) -> Result<()> {
    let path = path.as_ref();
    let io = |source| Error::Io { path: path.to_path_buf(), source };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io)?;
    }
    let file = File::create(path).map_err(io)?;
    write_curve_to(file, curve).map_err(|source| Error::Csv { path: path.to_path_buf(), source })
}

pub fn write_curve_to<W: Write>(writer: W, curve: &Curve) -> csv::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .from_writer(writer);
    for (x, y) in curve.points() {
        wtr.write_record([x.to_string(), y.to_string()])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Every value of a file in reading order, NaN kept.
fn read_values(path: &Path) -> Result<Vec<f64>> {
    let mut rdr = open_reader(path)?;
    let mut values = Vec::new();
    for rec in rdr.records() {
        let rec = rec.map_err(|source| Error::Csv { path: path.to_path_buf(), source })?;
        values.extend(parse_record(&rec));
    }
    Ok(values)
}

fn open_reader(path: &Path) -> Result<csv::Reader<File>> {
    let file = File::open(path).map_err(|source| Error::Io { path: path.to_path_buf(), source })?;
    Ok(csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b' ')
        .flexible(true)
        .comment(Some(b'#'))
        .from_reader(file))
}

fn parse_record(rec: &csv::StringRecord) -> impl Iterator<Item = f64> + '_ {
    rec.iter()
        .flat_map(str::split_whitespace)
        .map(|tok| tok.parse().unwrap_or(f64::NAN))
}

/// Scanned files sorted by key, or the explicit keys in their given order.
fn entries(dir: &Path, opts: &ReadOptions) -> Result<Vec<(f64, PathBuf)>> {
    if opts.keys.is_empty() {
        let mut found = scan_dir(dir, opts.key_length)?;
        found.sort_by(|a, b| a.0.total_cmp(&b.0));
        Ok(found)
    } else {
        Ok(opts
            .keys
            .iter()
            .map(|&k| (k, dir.join(format!("{}.txt", format_key(k)))))
            .collect())
    }
}

fn scan_dir(dir: &Path, key_length: usize) -> Result<Vec<(f64, PathBuf)>> {
    let io = |source| Error::Io { path: dir.to_path_buf(), source };
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io)? {
        let path = entry.map_err(io)?.path();
        if !path.is_file() {
            continue;
        }
        match key_from_name(&path, key_length) {
            Some(key) => found.push((key, path)),
            None => warn!(path = %path.display(), "file name does not start with a number; skipping"),
        }
    }
    Ok(found)
}

fn key_from_name(path: &Path, key_length: usize) -> Option<f64> {
    let name = path.file_name()?.to_str()?;
    let prefix: String = name.chars().take(key_length).collect();
    prefix.trim().parse().ok()
}

fn missing_keys(found: &[f64], expected: &[f64]) -> Vec<f64> {
    let found: HashSet<String> = found.iter().map(|&k| format_key(k)).collect();
    expected.iter().copied().filter(|&k| !found.contains(&format_key(k))).collect()
}
