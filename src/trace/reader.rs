//! Trace file reader
//!
//! Parses the plain-text format written by the particle and oscillator
//! simulators:
//!
//! ```text
//! # W: 10
//! # H: 10
//! # R_BOLA: 0.2
//! # t x0 y0 vx0 vy0 x1 y1 vx1 vy1
//! 0.0000  1.0 1.0  0.3 -0.2  2.0 2.0 -0.1  0.4
//! 0.0100  ...
//! ```
//!
//! - `#` lines carry `key: value` metadata or column names
//! - a bare non-numeric first line (`t x0 y0 ...`) is accepted as a header
//! - blank lines are skipped
//! - every other line must be whitespace-separated floats
//!
//! There is no partial recovery: the first malformed row aborts the read.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use ndarray::Array2;

use super::data::Trace;
use super::error::{TraceError, TraceResult};
use super::layout::EntityLayout;
use super::metadata::{parse_comment, CommentLine, TraceMetadata, COMMENT_MARKER};

/// Source name used in errors when parsing from memory
const IN_MEMORY_SOURCE: &str = "<input>";

/// Read and validate a trace file
///
/// # Errors
///
/// - [`TraceError::NotFound`] if `path` does not exist
/// - [`TraceError::Empty`] if the file holds no data rows
/// - any shape or parse error from [`parse_trace`]
///
/// # Example
///
/// ```rust,ignore
/// use simviz_rs::trace::{read_trace, EntityLayout};
///
/// let trace = read_trace("results/trajectories.dat", EntityLayout::Kinematic)?;
/// println!("{} particles, {} frames", trace.n_entities(), trace.n_frames());
/// ```
pub fn read_trace(path: impl AsRef<Path>, layout: EntityLayout) -> TraceResult<Trace> {
    let path = path.as_ref();

    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => TraceError::NotFound(path.to_path_buf()),
        _ => TraceError::Io { path: path.to_path_buf(), source },
    })?;

    let trace = parse_source(&text, layout, &path.display().to_string())?;

    log::debug!(
        "read {} frames x {} entities ({}) from {}",
        trace.n_frames(),
        trace.n_entities(),
        layout,
        path.display()
    );

    Ok(trace)
}

/// Parse trace text already held in memory
pub fn parse_trace(text: &str, layout: EntityLayout) -> TraceResult<Trace> {
    parse_source(text, layout, IN_MEMORY_SOURCE)
}

/// Parse whitespace-separated rows of exactly-known width (auxiliary files)
///
/// Comment and blank lines are skipped; every row must have at least
/// `min_columns` numbers. Extra columns are kept.
pub(crate) fn parse_rows(text: &str, min_columns: usize) -> TraceResult<Vec<Vec<f64>>> {
    let mut rows = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            continue;
        }

        let values = parse_numbers(line, index + 1)?;
        if values.len() < min_columns {
            return Err(TraceError::TooFewColumns {
                line: index + 1,
                found: values.len(),
                required: min_columns,
            });
        }
        rows.push(values);
    }

    Ok(rows)
}

fn parse_source(text: &str, layout: EntityLayout, source: &str) -> TraceResult<Trace> {
    let stride = layout.stride();
    let required = 1 + stride;

    let mut metadata = TraceMetadata::new();
    let mut time: Vec<f64> = Vec::new();
    let mut states: Vec<f64> = Vec::new();
    let mut n_columns: Option<usize> = None;

    for (index, raw) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw.trim();

        if line.is_empty() {
            continue;
        }

        // ====== Comment lines: metadata or column names ======

        if line.starts_with(COMMENT_MARKER) {
            match parse_comment(line) {
                CommentLine::Parameter(key, value) => metadata.insert(key, value),
                CommentLine::Header(columns) if time.is_empty() => metadata.set_columns(columns),
                _ => {}
            }
            continue;
        }

        // ====== Bare header line before any data ======

        if time.is_empty() && is_bare_header(line) {
            metadata.set_columns(line.split_whitespace().map(str::to_string).collect());
            continue;
        }

        // ====== Data row ======

        let values = parse_numbers(line, line_number)?;
        let found = values.len();

        match n_columns {
            None => {
                if found < required {
                    return Err(TraceError::TooFewColumns { line: line_number, found, required });
                }
                if (found - 1) % stride != 0 {
                    return Err(TraceError::StrideMismatch { columns: found - 1, stride });
                }
                n_columns = Some(found);
            }
            Some(expected) if expected != found => {
                return Err(TraceError::RaggedRow { line: line_number, expected, found });
            }
            Some(_) => {}
        }

        let t = values[0];
        if let Some(&previous) = time.last() {
            if t < previous {
                return Err(TraceError::NonMonotonicTime { line: line_number, previous, current: t });
            }
        }

        time.push(t);
        states.extend_from_slice(&values[1..]);
    }

    let n_columns = match n_columns {
        Some(n) => n,
        None => return Err(TraceError::Empty(source.to_string())),
    };

    let states = Array2::from_shape_vec((time.len(), n_columns - 1), states).map_err(|e| {
        TraceError::Malformed { line: 0, message: format!("inconsistent state matrix: {}", e) }
    })?;

    Ok(Trace::new(time, states, layout, metadata))
}

/// A line whose tokens are all non-numeric (`t x0 y0 vx0 vy0`)
fn is_bare_header(line: &str) -> bool {
    let mut tokens = line.split_whitespace().peekable();
    tokens.peek().is_some() && tokens.all(|token| token.parse::<f64>().is_err())
}

fn parse_numbers(line: &str, line_number: usize) -> TraceResult<Vec<f64>> {
    line.split_whitespace()
        .map(|token| {
            match token.parse::<f64>() {
                Ok(value) if value.is_finite() => Ok(value),
                Ok(_) => Err(TraceError::Malformed {
                    line: line_number,
                    message: format!("non-finite value '{}'", token),
                }),
                Err(_) => Err(TraceError::Malformed {
                    line: line_number,
                    message: format!("invalid number '{}'", token),
                }),
            }
        })
        .collect()
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const BILLIARD: &str = "\
# W: 10
# H: 5
# R_BOLA: 0.25
#         t             x0             y0            vx0            vy0
    0.0000       1.000000       1.000000       0.500000       0.000000
    0.0100       1.005000       1.000000       0.500000       0.000000
    0.0200       1.010000       1.000000       0.500000       0.000000
";

    #[test]
    fn test_parse_billiard_header_and_rows() {
        let trace = parse_trace(BILLIARD, EntityLayout::Kinematic).unwrap();

        assert_eq!(trace.n_frames(), 3);
        assert_eq!(trace.n_entities(), 1);
        assert_eq!(trace.time(), &[0.0, 0.01, 0.02]);

        let geometry = trace.geometry().unwrap();
        assert_eq!(geometry.width, 10.0);
        assert_eq!(geometry.height, 5.0);
        assert_eq!(geometry.radius, 0.25);

        assert_eq!(trace.column_names(), vec!["t", "x0", "y0", "vx0", "vy0"]);
    }

    #[test]
    fn test_parse_oscillator_rows() {
        let text = "# t x1 v1 x2 v2\n0 1 0 0.5 0\n0.01 0.99 -0.01 0.5 0.002\n";
        let trace = parse_trace(text, EntityLayout::Oscillator).unwrap();

        assert_eq!(trace.n_entities(), 2);
        assert_eq!(trace.displacement(1).unwrap(), vec![0.5, 0.5]);
        assert!(trace.geometry().is_none());
    }

    #[test]
    fn test_bare_header_line_is_accepted() {
        let text = "t              x0             y0             vx0            vy0\n\
                    0.000000e+00   5.0e+01        5.0e+01        1.0e+00        0.0e+00\n";
        let trace = parse_trace(text, EntityLayout::Kinematic).unwrap();
        assert_eq!(trace.n_frames(), 1);
        assert_eq!(trace.component(0, 0), vec![50.0]);
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let text = "\n0 1 2\n\n1 3 4\n\n";
        let trace = parse_trace(text, EntityLayout::Planar).unwrap();
        assert_eq!(trace.n_frames(), 2);
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(parse_trace("", EntityLayout::Planar), Err(TraceError::Empty(_))));
        assert!(matches!(
            parse_trace("# W: 10\n# H: 10\n\n", EntityLayout::Kinematic),
            Err(TraceError::Empty(_))
        ));
    }

    #[test]
    fn test_malformed_number() {
        let err = parse_trace("0 1 2\n1 abc 4\n", EntityLayout::Planar).unwrap_err();
        match err {
            TraceError::Malformed { line, message } => {
                assert_eq!(line, 2);
                assert!(message.contains("abc"));
            }
            other => panic!("Expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_too_few_columns() {
        let err = parse_trace("0 1 2\n", EntityLayout::Kinematic).unwrap_err();
        assert!(matches!(err, TraceError::TooFewColumns { line: 1, found: 3, required: 5 }));
    }

    #[test]
    fn test_stride_mismatch() {
        let err = parse_trace("0 1 2 3\n", EntityLayout::Oscillator).unwrap_err();
        assert!(matches!(err, TraceError::StrideMismatch { columns: 3, stride: 2 }));
    }

    #[test]
    fn test_ragged_rows() {
        let err = parse_trace("0 1 2\n1 1 2 3 4\n", EntityLayout::Planar).unwrap_err();
        assert!(matches!(err, TraceError::RaggedRow { line: 2, expected: 3, found: 5 }));
    }

    #[test]
    fn test_time_must_not_decrease() {
        let err = parse_trace("1 0 0\n0.5 0 0\n", EntityLayout::Planar).unwrap_err();
        assert!(matches!(err, TraceError::NonMonotonicTime { line: 2, .. }));

        // Repeated time stamps are allowed
        assert!(parse_trace("1 0 0\n1 0 0\n", EntityLayout::Planar).is_ok());
    }

    #[test]
    fn test_non_finite_values_are_rejected() {
        for token in ["nan", "NaN", "inf", "-inf", "infinity"] {
            let text = format!("0 0 0 1 1\n1 0 0 {} 1\n", token);
            let err = parse_trace(&text, EntityLayout::Kinematic).unwrap_err();
            assert!(matches!(err, TraceError::Malformed { line: 2, .. }), "{}: {:?}", token, err);
        }
    }

    #[test]
    fn test_non_finite_time_is_rejected() {
        let err = parse_trace("0 1 2\n1 1 2\nnan 1 2\n0.5 1 2\n", EntityLayout::Planar).unwrap_err();
        assert!(matches!(err, TraceError::Malformed { line: 3, .. }));

        let err = parse_rows("0 1\ninf 2\n", 2).unwrap_err();
        assert!(matches!(err, TraceError::Malformed { line: 2, .. }));
    }

    #[test]
    fn test_parse_is_deterministic() {
        let a = parse_trace(BILLIARD, EntityLayout::Kinematic).unwrap();
        let b = parse_trace(BILLIARD, EntityLayout::Kinematic).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_rows_minimum_width() {
        let rows = parse_rows("# x v\n0.1 0.2\n0.3 0.4 9\n", 2).unwrap();
        assert_eq!(rows, vec![vec![0.1, 0.2], vec![0.3, 0.4, 9.0]]);

        let err = parse_rows("0.1\n", 2).unwrap_err();
        assert!(matches!(err, TraceError::TooFewColumns { line: 1, .. }));
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.dat");
        let err = read_trace(&path, EntityLayout::Kinematic).unwrap_err();
        assert!(matches!(err, TraceError::NotFound(_)));
    }
}
