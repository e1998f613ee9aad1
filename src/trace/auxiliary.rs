//! Optional companion files written next to an oscillator trace
//!
//! Some simulator runs also dump a Poincaré section (`x v` per crossing) and a
//! running Lyapunov-exponent estimate (`t lambda`). These files are optional:
//! a missing or empty file means the feature is not available for this run and
//! the dependent plot is skipped. A file that exists but cannot be parsed is
//! still an error.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use super::error::{TraceError, TraceResult};
use super::reader::parse_rows;

/// Scatter sample of `(x, v)` states taken at each section crossing
#[derive(Debug, Clone, PartialEq)]
pub struct PoincareSection {
    pub x: Vec<f64>,
    pub v: Vec<f64>,
}

impl PoincareSection {
    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Running estimate of the largest Lyapunov exponent
#[derive(Debug, Clone, PartialEq)]
pub struct LyapunovSeries {
    pub time: Vec<f64>,
    pub exponent: Vec<f64>,
}

impl LyapunovSeries {
    /// Last estimate of the run
    pub fn final_estimate(&self) -> Option<f64> {
        self.exponent.last().copied()
    }

    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Read a Poincaré section file, `Ok(None)` when not available
pub fn read_poincare(path: impl AsRef<Path>) -> TraceResult<Option<PoincareSection>> {
    let rows = match read_optional_rows(path.as_ref(), "Poincare section")? {
        Some(rows) => rows,
        None => return Ok(None),
    };

    Ok(Some(PoincareSection {
        x: rows.iter().map(|r| r[0]).collect(),
        v: rows.iter().map(|r| r[1]).collect(),
    }))
}

/// Read a Lyapunov progress file, `Ok(None)` when not available
pub fn read_lyapunov(path: impl AsRef<Path>) -> TraceResult<Option<LyapunovSeries>> {
    let rows = match read_optional_rows(path.as_ref(), "Lyapunov exponent")? {
        Some(rows) => rows,
        None => return Ok(None),
    };

    Ok(Some(LyapunovSeries {
        time: rows.iter().map(|r| r[0]).collect(),
        exponent: rows.iter().map(|r| r[1]).collect(),
    }))
}

fn read_optional_rows(path: &Path, what: &str) -> TraceResult<Option<Vec<Vec<f64>>>> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("{} file {} not found, skipping", what, path.display());
            return Ok(None);
        }
        Err(source) => return Err(TraceError::Io { path: path.to_path_buf(), source }),
    };

    let rows = parse_rows(&text, 2)?;
    if rows.is_empty() {
        log::info!("{} file {} has no data, skipping", what, path.display());
        return Ok(None);
    }

    Ok(Some(rows))
}
