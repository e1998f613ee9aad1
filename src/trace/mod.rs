//! Simulation traces
//!
//! This module reads the text files produced by the particle and oscillator
//! simulators and exposes them as an immutable [`Trace`].
//!
//! # Core Concepts
//!
//! - **Trace**: time column plus a `frames × (entities · stride)` state matrix
//! - **Entity**: one particle or oscillator, a fixed-width column group per row
//! - **Layout**: names the columns of a group and fixes the stride
//!   ([`EntityLayout`])
//! - **Metadata**: `# key: value` comment lines (box size, particle radius)
//!
//! # Example
//!
//! ```rust
//! use simviz_rs::trace::{parse_trace, EntityLayout};
//!
//! let text = "# W: 10\n# H: 10\n0.0 1 1 0.5 0\n0.1 1.05 1 0.5 0\n";
//! let trace = parse_trace(text, EntityLayout::Kinematic).unwrap();
//!
//! assert_eq!(trace.n_frames(), 2);
//! assert_eq!(trace.n_entities(), 1);
//! assert_eq!(trace.geometry().unwrap().width, 10.0);
//! ```

pub mod auxiliary;
pub mod data;
pub mod error;
pub mod layout;
pub mod metadata;
pub mod reader;

pub use auxiliary::{read_lyapunov, read_poincare, LyapunovSeries, PoincareSection};
pub use data::{Extent, Trace};
pub use error::{TraceError, TraceResult};
pub use layout::EntityLayout;
pub use metadata::{BoxGeometry, TraceMetadata};
pub use reader::{parse_trace, read_trace};
