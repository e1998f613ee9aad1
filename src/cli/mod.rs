//! Command-line interface of the `simviz` binary
//!
//! ```text
//! simviz [-v...] [-q] [--settings FILE.yaml] <COMMAND>
//!   particles   [DATA_FILE] [-o DIR] [--charts trajectories,histogram,energy,animation] [--csv]
//!   oscillators [DATA_FILE] [-o DIR] [--gif] [--poincare FILE] [--lyapunov FILE] [--csv]
//! ```
//!
//! Each command reads and validates its trace before creating the output
//! directory, so a bad input leaves nothing on disk.

pub mod commands;
pub mod settings;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use std::fmt;
use std::path::PathBuf;

pub use commands::{run_oscillators, run_particles};
pub use settings::RenderSettings;

/// Default trace of the particle simulations
pub const DEFAULT_PARTICLES_FILE: &str = "results/trajectories.dat";

/// Default trace of the coupled oscillators
pub const DEFAULT_OSCILLATORS_FILE: &str = "results/datos.txt";

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = "results";

#[derive(Parser, Debug)]
#[command(name = "simviz", version, about = "Plot and animate particle and oscillator simulation traces")]
pub struct Cli {
    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only report errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// YAML file with render settings
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Log level selected by `-v` / `-q`
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Billiard or gas of particles: trajectories, speed histogram, energy, animation
    Particles(ParticlesArgs),

    /// Coupled oscillators: time series, Lissajous, phase space, spectrum, summary
    Oscillators(OscillatorsArgs),
}

/// Charts produced by the `particles` command
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleChart {
    Trajectories,
    Histogram,
    Energy,
    Animation,
}

impl ParticleChart {
    pub fn all() -> Vec<Self> {
        vec![Self::Trajectories, Self::Histogram, Self::Energy, Self::Animation]
    }
}

#[derive(Args, Debug)]
pub struct ParticlesArgs {
    /// Trace file: `t x0 y0 vx0 vy0 x1 y1 vx1 vy1 ...`
    #[arg(default_value = DEFAULT_PARTICLES_FILE)]
    pub data_file: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Charts to produce (default: all)
    #[arg(long, value_enum, value_delimiter = ',')]
    pub charts: Option<Vec<ParticleChart>>,

    /// Trace has positions only: `t x0 y0 x1 y1 ...`
    #[arg(long)]
    pub positions_only: bool,

    /// Also export kinetic energy as CSV
    #[arg(long)]
    pub csv: bool,
}

impl ParticlesArgs {
    pub fn selected_charts(&self) -> Vec<ParticleChart> {
        self.charts.clone().unwrap_or_else(ParticleChart::all)
    }
}

#[derive(Args, Debug)]
pub struct OscillatorsArgs {
    /// Trace file: `t x1 v1 x2 v2 ...`
    #[arg(default_value = DEFAULT_OSCILLATORS_FILE)]
    pub data_file: PathBuf,

    /// Output directory
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    /// Also render phase-space and Lissajous GIF animations
    #[arg(long)]
    pub gif: bool,

    /// Poincaré section file (`x v` per line)
    #[arg(long, value_name = "FILE")]
    pub poincare: Option<PathBuf>,

    /// Lyapunov exponent file (`t lambda` per line)
    #[arg(long, value_name = "FILE")]
    pub lyapunov: Option<PathBuf>,

    /// Also export spectrum and phase difference as CSV
    #[arg(long)]
    pub csv: bool,
}

/// What a run produced
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub command: &'static str,
    pub frames: usize,
    pub entities: usize,
    pub written: Vec<PathBuf>,
    pub mean_speed: Option<f64>,
    pub energy_drift_percent: Option<f64>,
    pub dominant_frequencies: Vec<f64>,
    pub lyapunov_exponent: Option<f64>,
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} frames, {} entities, {} files written",
            self.command,
            self.frames,
            self.entities,
            self.written.len()
        )?;
        if let Some(v) = self.mean_speed {
            write!(f, ", mean speed {:.4}", v)?;
        }
        if let Some(d) = self.energy_drift_percent {
            write!(f, ", energy drift {:.4}%", d)?;
        }
        if !self.dominant_frequencies.is_empty() {
            let freqs: Vec<String> = self.dominant_frequencies.iter().map(|f| format!("{:.4}", f)).collect();
            write!(f, ", dominant frequencies [{}]", freqs.join(", "))?;
        }
        if let Some(l) = self.lyapunov_exponent {
            write!(f, ", lyapunov {:.4}", l)?;
        }
        Ok(())
    }
}

/// Run the selected command
pub fn run(cli: &Cli) -> anyhow::Result<RunReport> {
    let settings = RenderSettings::load(cli.settings.as_deref())?;

    match &cli.command {
        Command::Particles(args) => run_particles(args, &settings),
        Command::Oscillators(args) => run_oscillators(args, &settings),
    }
}
