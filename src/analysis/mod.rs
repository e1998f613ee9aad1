//! Derived quantities
//!
//! Everything computed from a [`Trace`](crate::trace::Trace) before rendering.
//! Each function is a direct, single-pass reduction over trace columns.
//!
//! # Module Organization
//!
//! - **`kinematics`**: speed magnitudes, pooled speed samples, kinetic energy
//! - **`statistics`**: mean / min / max / std / rms summary
//! - **`histogram`**: probability-density histogram, 2D Maxwell–Boltzmann law
//! - **`spectrum`**: FFT amplitude spectrum of a mean-subtracted signal
//! - **`phase`**: oscillator phase angles and phase difference
//! - **`sampling`**: frame decimation for animations
//!
//! # Example
//!
//! ```rust
//! use simviz_rs::analysis::{kinematics, Summary};
//! use simviz_rs::trace::{parse_trace, EntityLayout};
//!
//! // (t, vx, vy) rows, read as planar-velocity kinematics with zero positions
//! let trace = parse_trace(
//!     "0 0 0 0 0\n1 0 0 3 4\n2 0 0 0 0\n",
//!     EntityLayout::Kinematic,
//! ).unwrap();
//!
//! let speeds = kinematics::speed_samples(&trace).unwrap();
//! assert_eq!(speeds, vec![0.0, 5.0, 0.0]);
//!
//! let summary = Summary::from_samples(&speeds).unwrap();
//! assert!((summary.mean - 5.0 / 3.0).abs() < 1e-12);
//! ```

pub mod error;
pub mod histogram;
pub mod kinematics;
pub mod phase;
pub mod sampling;
pub mod spectrum;
pub mod statistics;

pub use error::{AnalysisError, AnalysisResult};
pub use histogram::{Histogram, MaxwellBoltzmann2d};
pub use sampling::FrameSampler;
pub use spectrum::Spectrum;
pub use statistics::Summary;
