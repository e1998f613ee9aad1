//! Output of trace analysis
//!
//! - **Visualization**: PNG/SVG charts and GIF animations using plotters
//! - **Export**: CSV files of derived arrays
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Charts and animations
//! │   ├── mod.rs
//! │   ├── config.rs
//! │   ├── trajectories.rs
//! │   ├── histogram.rs
//! │   ├── series.rs
//! │   ├── phase_space.rs
//! │   ├── spectrum.rs
//! │   ├── summary.rs
//! │   └── animation.rs
//! └── export/             ← Data export
//!     ├── mod.rs
//!     └── csv.rs
//! ```
//!
//! Both sub-modules accept plain `&[f64]` slices, so anything computed in
//! [`crate::analysis`] can be drawn or exported directly.

pub mod export;
pub mod visualization;

pub use visualization::{
    animate_particles,
    animate_phase_trace,
    plot_energy,
    plot_oscillator_summary,
    plot_phase_portrait,
    plot_spectrum,
    plot_speed_histogram,
    plot_time_series,
    plot_trajectories,
    AnimationConfig,
    PlotConfig,
};

pub use export::{export_series_csv, CsvConfig};
