//! Visualization of simulation traces
//!
//! This module renders traces and derived quantities with the `plotters` library.
//! Static charts are written as PNG or SVG depending on the output extension;
//! animations are always GIF.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`, `AnimationConfig`)
//! - **trajectories**: Particle paths inside the box
//! - **histogram**: Speed distribution with Maxwell–Boltzmann overlay
//! - **series**: Signals, kinetic energy and Lyapunov exponent against time
//! - **phase_space**: Lissajous figures, `x`–`v` portraits, Poincaré sections
//! - **spectrum**: FFT amplitude spectra
//! - **summary**: 2×2 oscillator overview
//! - **animation**: GIF of moving particles or a growing phase-space curve
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use simviz_rs::output::visualization::{plot_trajectories, plot_energy, PlotConfig};
//!
//! let trace = read_trace("results/trajectories.dat", EntityLayout::Kinematic)?;
//!
//! // Default config
//! plot_trajectories(&trace, trace.geometry().as_ref(), "trajectories.png", None)?;
//!
//! // Custom config
//! let energy = kinematics::kinetic_energy(&trace, 1.0)?;
//! let mut config = PlotConfig::energy("Hard disks, N = 16");
//! config.width = 1600;
//! plot_energy(trace.time(), &energy, "energy.svg", Some(&config))?;
//! ```
//!
//! # When to Use Which Module
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | Particle paths | `trajectories` | `plot_trajectories` |
//! | Speed distribution | `histogram` | `plot_speed_histogram` |
//! | Displacements, phase difference | `series` | `plot_time_series` |
//! | Energy conservation | `series` | `plot_energy` |
//! | Chaos indicator | `series` | `plot_lyapunov` |
//! | Lissajous, `x`–`v` portrait | `phase_space` | `plot_phase_portrait` |
//! | Poincaré section | `phase_space` | `plot_poincare` |
//! | Frequency content | `spectrum` | `plot_spectrum` |
//! | Oscillator overview | `summary` | `plot_oscillator_summary` |
//! | Moving particles | `animation` | `animate_particles` |
//! | Growing phase curve | `animation` | `animate_phase_trace` |

pub mod animation;
pub mod config;
pub mod histogram;
pub mod phase_space;
pub mod series;
pub mod spectrum;
pub mod summary;
pub mod trajectories;

pub use config::{AnimationConfig, IntoOptionalTitle, PlotConfig, NO_TITLE};

pub use animation::{animate_particles, animate_phase_trace};
pub use histogram::plot_speed_histogram;
pub use phase_space::{plot_phase_portrait, plot_poincare};
pub use series::{plot_energy, plot_lyapunov, plot_time_series};
pub use spectrum::plot_spectrum;
pub use summary::{plot_oscillator_summary, Panel};
pub use trajectories::plot_trajectories;
