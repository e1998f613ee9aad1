//! Render settings loaded from YAML
//!
//! Every field has a default, so a settings file only lists what it changes:
//!
//! ```yaml
//! width: 1600
//! height: 1200
//! histogram_bins: 30
//! particle_mass: 1.0
//! particle_fps: 20
//! particle_frame_threshold: 500
//! particle_max_frames: 300
//! phase_fps: 25
//! phase_max_frames: 300
//! max_trajectories: 20
//! legend_limit: 10
//! spectrum_frequency_limit: 2.0
//! phase_lock_tolerance: 0.1
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::output::export::CsvConfig;
use crate::output::visualization::{AnimationConfig, PlotConfig};

/// Sizes, bin counts and frame budgets used by the CLI pipelines
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub width: u32,                            // static chart width in pixels
    pub height: u32,                           // static chart height in pixels
    pub histogram_bins: usize,                 // bins of the speed histogram
    pub particle_mass: f64,                    // mass used for the kinetic energy
    pub particle_fps: u32,                     // playback rate of particles.gif
    pub particle_frame_threshold: usize,       // traces longer than this are decimated
    pub particle_max_frames: usize,            // target frame count once decimated
    pub phase_fps: u32,                        // playback rate of the phase-space GIFs
    pub phase_max_frames: usize,               // frame budget of the phase-space GIFs
    pub max_trajectories: usize,               // particles drawn on trajectories.png
    pub legend_limit: usize,                   // legend only up to this many series
    pub spectrum_frequency_limit: Option<f64>, // upper bound of the spectrum axis
    pub phase_lock_tolerance: f64,             // |dphi| below this counts as locked (rad)
    pub csv_precision: usize,                  // decimal places in exported CSV
    pub csv_european: bool,                    // ';' delimiter and ',' decimal separator
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            histogram_bins: 50,
            particle_mass: 1.0,
            particle_fps: 20,
            particle_frame_threshold: 500,
            particle_max_frames: 300,
            phase_fps: 25,
            phase_max_frames: 300,
            max_trajectories: 20,
            legend_limit: 10,
            spectrum_frequency_limit: None,
            phase_lock_tolerance: 0.1,
            csv_precision: 6,
            csv_european: false,
        }
    }
}

impl RenderSettings {
    /// Load settings from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("cannot open settings file {}", path.display()))?;
        let reader = BufReader::new(file);
        let settings: RenderSettings = serde_yaml::from_reader(reader)
            .with_context(|| format!("invalid settings file {}", path.display()))?;

        settings.validate()?;
        log::debug!("Loaded render settings from {}: {:?}", path.display(), settings);

        Ok(settings)
    }

    /// Load from `path` when given, defaults otherwise
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_yaml_file(p),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.width > 0 && self.height > 0, "image size must be positive");
        anyhow::ensure!(self.histogram_bins > 0, "histogram_bins must be positive");
        anyhow::ensure!(
            self.particle_mass.is_finite() && self.particle_mass > 0.0,
            "particle_mass must be a positive number"
        );
        anyhow::ensure!(
            self.particle_max_frames > 0 && self.phase_max_frames > 0,
            "frame budgets must be positive"
        );
        anyhow::ensure!(self.csv_precision <= 17, "csv_precision must be at most 17");
        Ok(())
    }

    /// Apply size and entity caps to a chart preset
    pub fn plot_config(&self, preset: PlotConfig) -> PlotConfig {
        PlotConfig {
            width: self.width,
            height: self.height,
            max_series: self.max_trajectories,
            legend_limit: self.legend_limit,
            ..preset
        }
    }

    /// Particle animation preset with the configured rate and budget
    pub fn particle_animation(&self, preset: AnimationConfig) -> AnimationConfig {
        AnimationConfig {
            fps: self.particle_fps,
            max_frames: self.particle_max_frames,
            ..preset
        }
    }

    /// CSV layout for `--csv` exports
    pub fn csv_config(&self) -> CsvConfig {
        let base = if self.csv_european { CsvConfig::european() } else { CsvConfig::default() };
        base.precision(self.csv_precision)
    }

    /// Phase-space animation preset with the configured rate and budget
    pub fn phase_animation(&self, preset: AnimationConfig) -> AnimationConfig {
        AnimationConfig {
            fps: self.phase_fps,
            max_frames: self.phase_max_frames,
            ..preset
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let settings = RenderSettings::load(None).unwrap();
        assert_eq!(settings, RenderSettings::default());
        assert_eq!(settings.histogram_bins, 50);
    }

    #[test]
    fn test_partial_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "width: 640\nhistogram_bins: 30\nspectrum_frequency_limit: 2.5").unwrap();

        let settings = RenderSettings::from_yaml_file(file.path()).unwrap();
        assert_eq!(settings.width, 640);
        assert_eq!(settings.height, 768);
        assert_eq!(settings.histogram_bins, 30);
        assert_eq!(settings.spectrum_frequency_limit, Some(2.5));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "widht: 640").unwrap();
        assert!(RenderSettings::from_yaml_file(file.path()).is_err());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "histogram_bins: 0").unwrap();
        assert!(RenderSettings::from_yaml_file(file.path()).is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(RenderSettings::from_yaml_file(Path::new("/nonexistent/settings.yaml")).is_err());
    }

    #[test]
    fn test_plot_config_applies_caps() {
        let settings = RenderSettings { width: 300, max_trajectories: 5, ..Default::default() };
        let config = settings.plot_config(PlotConfig::trajectories("t"));
        assert_eq!(config.width, 300);
        assert_eq!(config.max_series, 5);
        assert_eq!(config.title, "t");
        assert_eq!(config.xlabel, "x");
    }

    #[test]
    fn test_csv_layout_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "csv_precision: 3\ncsv_european: true").unwrap();

        let settings = RenderSettings::from_yaml_file(file.path()).unwrap();
        let csv = settings.csv_config();
        assert_eq!(csv.precision, 3);
        assert_eq!(csv.delimiter, ';');
        assert_eq!(csv.decimal_separator, ',');

        let csv = RenderSettings::default().csv_config();
        assert_eq!(csv.precision, 6);
        assert_eq!(csv.delimiter, ',');
    }
}
