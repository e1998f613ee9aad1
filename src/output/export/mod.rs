//! Export of derived quantities
//!
//! # Available formats
//!
//! | Format  | Module   |
//! |---------|----------|
//! | CSV     | [`csv`]  |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use simviz_rs::output::export::export_series_csv;
//!
//! export_series_csv(&["f", "|X1(f)|"], &[&spectrum.frequencies, &spectrum.amplitudes], "spectrum.csv", None)?;
//! ```

pub mod csv;

pub use csv::{export_series_csv, CsvConfig, CsvMetadata};
