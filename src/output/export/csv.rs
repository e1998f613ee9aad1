//! CSV export of derived quantities
//!
//! Derived arrays (kinetic energy, spectra, phase difference) are written as
//! delimited columns so they can be reloaded in pandas, gnuplot or a
//! spreadsheet.
//!
//! # Features
//!
//! - **Simple interface**: one header and one `&[f64]` column per field
//! - **Metadata support**: optional `#` header with the source trace
//! - **Customizable**: delimiter, decimal separator, precision
//! - **Validation**: checks for empty data, mismatched lengths, NaN/Inf
//!
//! # Example
//!
//! ```rust,ignore
//! use simviz_rs::output::export::{export_series_csv, CsvConfig, CsvMetadata};
//!
//! let metadata = CsvMetadata::from_trace("results/trajectories.dat", &trace);
//! let config = CsvConfig::default().with_metadata(metadata);
//!
//! export_series_csv(&["t", "E"], &[trace.time(), &energy], "kinetic_energy.csv", Some(&config))?;
//! ```
//!
//! **Output** (`kinetic_energy.csv`):
//! ```csv
//! # Simulation Trace Export
//! # Generated: 2026-10-19T10:30:00+00:00
//! # Source: results/trajectories.dat
//! # Frames: 2001
//! # Entities: 16
//! #
//! t,E
//! 0.000000,12.500000
//! ...
//! ```

use std::error::Error;
use std::fs::File;
use std::io::{BufWriter, Write};

use crate::trace::Trace;

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: enable metadata
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Only non-None fields are written.
#[derive(Clone, Default)]
pub struct CsvMetadata {
    /// Trace file the data was derived from
    pub source: Option<String>,

    /// Number of frames in the trace
    pub frames: Option<usize>,

    /// Number of entities in the trace
    pub entities: Option<usize>,

    /// Additional key/value pairs (trace parameters, units, ...)
    pub custom: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Describe a trace: source path, shape and its `# KEY: value` parameters
    pub fn from_trace(source: &str, trace: &Trace) -> Self {
        let custom = trace
            .metadata()
            .entries()
            .iter()
            .map(|(key, value)| (key.clone(), value.to_string()))
            .collect();

        Self {
            source: Some(source.to_string()),
            frames: Some(trace.n_frames()),
            entities: Some(trace.n_entities()),
            custom,
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.custom.push((key.into(), value.into()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Write metadata header comments
fn write_metadata_header<W: Write>(out: &mut W, metadata: &CsvMetadata) -> Result<(), Box<dyn Error>> {
    writeln!(out, "# Simulation Trace Export")?;

    let now = chrono::Utc::now();
    writeln!(out, "# Generated: {}", now.to_rfc3339())?;

    if let Some(source) = &metadata.source {
        writeln!(out, "# Source: {}", source)?;
    }
    if let Some(frames) = metadata.frames {
        writeln!(out, "# Frames: {}", frames)?;
    }
    if let Some(entities) = metadata.entities {
        writeln!(out, "# Entities: {}", entities)?;
    }

    for (key, value) in &metadata.custom {
        writeln!(out, "# {}: {}", key, value)?;
    }

    writeln!(out, "#")?;

    Ok(())
}

/// Format number with configured precision and decimal separator
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export equally long columns to CSV
///
/// # Arguments
///
/// * `headers` - One header per column
/// * `columns` - Column data, all of the same length
/// * `output_path` - Output file path
/// * `config` - Optional CSV configuration (uses default if None)
///
/// # Errors
///
/// - No columns, or empty columns
/// - Header count differs from column count
/// - Columns of different lengths
/// - NaN or Inf values
/// - File creation errors
///
/// Validation happens before the file is created, so a rejected export
/// leaves nothing on disk.
pub fn export_series_csv(
    headers: &[&str],
    columns: &[&[f64]],
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), Box<dyn Error>> {

    // ============================= Validation =============================

    if columns.is_empty() || columns[0].is_empty() {
        return Err("Empty data: at least one non-empty column is required".into());
    }

    if headers.len() != columns.len() {
        return Err(format!(
            "Header count mismatch: {} headers for {} columns",
            headers.len(),
            columns.len()
        )
        .into());
    }

    let rows = columns[0].len();
    for (header, column) in headers.iter().zip(columns.iter()) {
        if column.len() != rows {
            return Err(format!(
                "Column '{}' length mismatch: {} values versus {}",
                header,
                column.len(),
                rows
            )
            .into());
        }

        if column.iter().any(|v| !v.is_finite()) {
            return Err(format!("Invalid data: NaN or Inf detected in column '{}'", header).into());
        }
    }

    // ============================= Configuration ==========================

    let binding = CsvConfig::default();
    let config = config.unwrap_or(&binding);

    // ============================= Write ==================================

    let mut out = BufWriter::new(File::create(output_path)?);

    if config.include_metadata {
        if let Some(metadata) = &config.metadata {
            write_metadata_header(&mut out, metadata)?;
        }
    }

    writeln!(out, "{}", headers.join(&config.delimiter.to_string()))?;

    for i in 0..rows {
        let line: Vec<String> = columns.iter().map(|c| format_number(c[i], config)).collect();
        writeln!(out, "{}", line.join(&config.delimiter.to_string()))?;
    }

    out.flush()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
