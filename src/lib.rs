//! simviz-rs: Plotting and Animation of Simulation Traces
//!
//! Reads the whitespace-delimited trace files written by particle and coupled
//! oscillator simulations, derives speeds, energies, spectra and phase
//! differences, and renders them as PNG/SVG charts and GIF animations.
//!
//! # Architecture
//!
//! simviz-rs is built as a one-way pipeline:
//!
//! 1. **Trace** ([`trace`]): parse and validate a file into a time column and
//!    a matrix of per-entity state columns
//! 2. **Analysis** ([`analysis`]): pure reductions over trace columns
//! 3. **Output** ([`output`]): plotters charts, GIF animations and CSV export
//! 4. **CLI** ([`cli`]): the `particles` and `oscillators` commands of the
//!    `simviz` binary
//!
//! # Quick Start
//!
//! ```rust
//! use simviz_rs::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Two oscillators, 3 frames: t x1 v1 x2 v2
//! let text = "# t x1 v1 x2 v2\n0 1 0 0 1\n1 0 -1 1 0\n2 -1 0 0 -1\n";
//! let trace = parse_trace(text, EntityLayout::Oscillator)?;
//!
//! assert_eq!(trace.n_frames(), 3);
//! assert_eq!(trace.n_entities(), 2);
//!
//! let x1 = trace.displacement(0).unwrap();
//! let spectrum = Spectrum::compute(&x1, trace.time_step().unwrap())?;
//! assert_eq!(spectrum.len(), 3 / 2 + 1);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`trace`]: Trace files, metadata and auxiliary series
//! - [`analysis`]: Derived quantities
//! - [`output`]: Visualization and export
//! - [`cli`]: Command-line interface

pub mod analysis;
pub mod cli;
pub mod output;
pub mod trace;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use simviz_rs::prelude::*;
    //! ```
    pub use crate::analysis::{kinematics,
                              phase,
                              AnalysisError,
                              FrameSampler,
                              Histogram,
                              MaxwellBoltzmann2d,
                              Spectrum,
                              Summary};
    pub use crate::trace::{parse_trace,
                           read_trace,
                           BoxGeometry,
                           EntityLayout,
                           Extent,
                           Trace,
                           TraceError};
    pub use crate::output::visualization::{AnimationConfig, PlotConfig, NO_TITLE};
}
