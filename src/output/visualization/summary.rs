//! Multi-panel oscillator summary
//!
//! A 2×2 figure that collects the main oscillator charts in one image:
//! typically displacements, Lissajous figure, spectrum and phase difference.

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;

use super::config::PlotConfig;
use super::phase_space::draw_portrait_on_area;
use super::series::draw_lines_on_area;
use super::spectrum::draw_spectrum_on_area;
use crate::analysis::Spectrum;

/// Number of panels in the summary grid
pub const SUMMARY_PANELS: usize = 4;

/// One chart of the summary figure
pub enum Panel<'a> {
    /// Signals against time
    Lines {
        title: &'a str,
        ylabel: &'a str,
        time: &'a [f64],
        series: Vec<(&'a str, &'a [f64])>,
    },
    /// `y` against `x`
    Portrait {
        title: &'a str,
        xlabel: &'a str,
        ylabel: &'a str,
        x: &'a [f64],
        y: &'a [f64],
    },
    /// Amplitude spectra
    Spectrum {
        title: &'a str,
        spectra: Vec<(&'a str, &'a Spectrum)>,
        frequency_limit: Option<f64>,
    },
}

impl Panel<'_> {
    fn config(&self, base: &PlotConfig) -> PlotConfig {
        let mut config = base.clone();
        config.line_width = 1;
        match self {
            Panel::Lines { title, ylabel, .. } => {
                config.title = title.to_string();
                config.xlabel = "t".to_string();
                config.ylabel = ylabel.to_string();
            }
            Panel::Portrait { title, xlabel, ylabel, .. } => {
                config.title = title.to_string();
                config.xlabel = xlabel.to_string();
                config.ylabel = ylabel.to_string();
            }
            Panel::Spectrum { title, .. } => {
                let preset = PlotConfig::spectrum(*title);
                config.title = preset.title;
                config.xlabel = preset.xlabel;
                config.ylabel = preset.ylabel;
            }
        }
        config
    }

    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>, base: &PlotConfig) -> Result<(), Box<dyn Error>>
    where
        DB::ErrorType: 'static,
    {
        let config = self.config(base);
        match self {
            Panel::Lines { time, series, .. } => draw_lines_on_area(area, time, series, None, &config),
            Panel::Portrait { x, y, .. } => draw_portrait_on_area(area, x, y, &config),
            Panel::Spectrum { spectra, frequency_limit, .. } => {
                draw_spectrum_on_area(area, spectra, *frequency_limit, &config)
            }
        }
    }

    fn validate(&self) -> Result<(), Box<dyn Error>> {
        match self {
            Panel::Lines { title, time, series, .. } => {
                if time.is_empty() || series.is_empty() {
                    return Err(format!("Panel '{}' has no data", title).into());
                }
                if series.iter().any(|(_, v)| v.len() != time.len()) {
                    return Err(format!("Panel '{}' has series of the wrong length", title).into());
                }
            }
            Panel::Portrait { title, x, y, .. } => {
                if x.is_empty() || x.len() != y.len() {
                    return Err(format!("Panel '{}' needs two coordinate arrays of equal length", title).into());
                }
            }
            Panel::Spectrum { title, spectra, .. } => {
                if spectra.is_empty() {
                    return Err(format!("Panel '{}' has no spectrum", title).into());
                }
            }
        }
        Ok(())
    }
}

/// Plot up to four panels on a 2×2 grid
///
/// Panels fill the grid row by row; unused cells stay blank. The config
/// sets the overall image size, palette and background (default 1600×1200).
///
/// # Example
///
/// ```rust,ignore
/// let panels = vec![
///     Panel::Lines { title: "Displacement", ylabel: "x", time: trace.time(), series: vec![("x1", &x1), ("x2", &x2)] },
///     Panel::Portrait { title: "Lissajous", xlabel: "x1", ylabel: "x2", x: &x1, y: &x2 },
///     Panel::Spectrum { title: "Spectrum", spectra: vec![("x1", &s1), ("x2", &s2)], frequency_limit: None },
///     Panel::Lines { title: "Phase difference", ylabel: "rad", time: trace.time(), series: vec![("dphi", &dphi)] },
/// ];
/// plot_oscillator_summary(&panels, "summary.png", None)?;
/// ```
pub fn plot_oscillator_summary(
    panels: &[Panel],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if panels.is_empty() {
        return Err("Summary needs at least one panel".into());
    }
    if panels.len() > SUMMARY_PANELS {
        return Err(format!("Summary holds at most {} panels, got {}", SUMMARY_PANELS, panels.len()).into());
    }
    for panel in panels {
        panel.validate()?;
    }

    let default_config = PlotConfig {
        width: 1600,
        height: 1200,
        ..PlotConfig::default()
    };
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_summary_impl(backend, panels, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_summary_impl(backend, panels, config)
        }
    }
}

/// Implementation for summary plotting with concrete backend
fn plot_summary_impl<DB: DrawingBackend>(
    backend: DB,
    panels: &[Panel],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let areas = root.split_evenly((2, 2));
    for (panel, area) in panels.iter().zip(areas.iter()) {
        panel.draw(area, config)?;
    }

    root.present()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_full_summary() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let dt = 0.05;
        let time: Vec<f64> = (0..400).map(|i| i as f64 * dt).collect();
        let x1: Vec<f64> = time.iter().map(|t| t.cos()).collect();
        let x2: Vec<f64> = time.iter().map(|t| (1.3 * t).cos()).collect();
        let dphi: Vec<f64> = time.iter().map(|t| (0.3 * t).sin()).collect();
        let s1 = Spectrum::compute(&x1, dt).unwrap();
        let s2 = Spectrum::compute(&x2, dt).unwrap();

        let panels = vec![
            Panel::Lines { title: "Displacement", ylabel: "x", time: &time, series: vec![("x1", &x1[..]), ("x2", &x2[..])] },
            Panel::Portrait { title: "Lissajous", xlabel: "x1", ylabel: "x2", x: &x1, y: &x2 },
            Panel::Spectrum { title: "Spectrum", spectra: vec![("x1", &s1), ("x2", &s2)], frequency_limit: Some(1.0) },
            Panel::Lines { title: "Phase difference", ylabel: "rad", time: &time, series: vec![("dphi", &dphi[..])] },
        ];

        plot_oscillator_summary(&panels, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_partial_summary_svg() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("svg");

        let x = vec![0.0, 1.0, 0.0, -1.0];
        let v = vec![1.0, 0.0, -1.0, 0.0];
        let panels = vec![Panel::Portrait { title: "Oscillator 1", xlabel: "x", ylabel: "v", x: &x, y: &v }];

        plot_oscillator_summary(&panels, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_summary_panel_count() {
        assert!(plot_oscillator_summary(&[], "unused.png", None).is_err());

        let x = vec![0.0, 1.0];
        let panel = || Panel::Portrait { title: "p", xlabel: "x", ylabel: "y", x: &x, y: &x };
        let panels: Vec<Panel> = (0..5).map(|_| panel()).collect();
        assert!(plot_oscillator_summary(&panels, "unused.png", None).is_err());
    }

    #[test]
    fn test_summary_rejects_ragged_panel() {
        let time = vec![0.0, 1.0, 2.0];
        let short = vec![0.0];
        let panels = vec![Panel::Lines { title: "bad", ylabel: "x", time: &time, series: vec![("x", &short[..])] }];
        assert!(plot_oscillator_summary(&panels, "unused.png", None).is_err());
    }
}
