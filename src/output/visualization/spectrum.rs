//! Amplitude spectrum plots

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use crate::analysis::Spectrum;

/// Draw one or more spectra on any drawing area
///
/// Each legend entry reports the dominant (non-DC) frequency of its spectrum.
pub(crate) fn draw_spectrum_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    spectra: &[(&str, &Spectrum)],
    frequency_limit: Option<f64>,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let f_max_data = spectra.iter().map(|(_, s)| s.max_frequency()).fold(0.0, f64::max);
    let f_max = match frequency_limit {
        Some(limit) if limit > 0.0 => limit.min(f_max_data),
        _ => f_max_data,
    };
    let f_max = if f_max > 0.0 { f_max } else { 1.0 };

    let peak = spectra
        .iter()
        .flat_map(|(_, s)| {
            s.frequencies
                .iter()
                .zip(s.amplitudes.iter())
                .filter(move |(f, _)| **f <= f_max)
                .map(|(_, a)| *a)
        })
        .fold(0.0, f64::max);
    let y_max = if peak > 0.0 { peak * 1.1 } else { 1.0 };

    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..f_max, 0.0..y_max)?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&|f| format!("{:.3}", f));

    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    let shown = spectra.len().min(config.max_series);
    for (idx, (name, spectrum)) in spectra.iter().take(shown).enumerate() {
        let color = if shown == 1 { config.line_color } else { config.get_entity_color(idx) };
        let width = config.line_width;

        let label = match spectrum.dominant_frequency() {
            Some(f) => format!("{} (f = {:.4})", name, f),
            None => name.to_string(),
        };

        chart
            .draw_series(LineSeries::new(
                spectrum
                    .frequencies
                    .iter()
                    .zip(spectrum.amplitudes.iter())
                    .filter(|(f, _)| **f <= f_max)
                    .map(|(f, a)| (*f, *a)),
                color.stroke_width(width),
            ))?
            .label(label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width)));
    }

    if shown <= config.legend_limit {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(config.background.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

/// Plot amplitude spectra
///
/// # Arguments
///
/// * `spectra` - `(label, spectrum)` pairs drawn on the same axes
/// * `frequency_limit` - Optional upper bound of the frequency axis
/// * `output_path` - Output file path (.png or .svg)
/// * `config` - Optional PlotConfig
///
/// # Example
///
/// ```rust,ignore
/// let dt = trace.time_step().unwrap();
/// let s1 = Spectrum::compute(&trace.displacement(0).unwrap(), dt)?;
/// let s2 = Spectrum::compute(&trace.displacement(1).unwrap(), dt)?;
///
/// plot_spectrum(&[("x1", &s1), ("x2", &s2)], Some(2.0), "spectrum.png", None)?;
/// ```
pub fn plot_spectrum(
    spectra: &[(&str, &Spectrum)],
    frequency_limit: Option<f64>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if spectra.is_empty() || spectra.iter().all(|(_, s)| s.is_empty()) {
        return Err("No spectrum to plot".into());
    }

    let default_config = PlotConfig::spectrum(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
            draw_spectrum_on_area(&root, spectra, frequency_limit, config)?;
            root.present()?;
        }
        _ => {
            let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
            draw_spectrum_on_area(&root, spectra, frequency_limit, config)?;
            root.present()?;
        }
    }

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(freq: f64, dt: f64, n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| (2.0 * std::f64::consts::PI * freq * i as f64 * dt).sin())
            .collect()
    }

    #[test]
    fn test_plot_two_spectra() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let dt = 0.01;
        let s1 = Spectrum::compute(&sine(1.0, dt, 1000), dt).unwrap();
        let s2 = Spectrum::compute(&sine(2.5, dt, 1000), dt).unwrap();

        plot_spectrum(&[("x1", &s1), ("x2", &s2)], Some(5.0), path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_spectrum_svg_full_range() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("svg");

        let dt = 0.1;
        let s = Spectrum::compute(&sine(0.5, dt, 128), dt).unwrap();

        plot_spectrum(&[("x", &s)], None, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_spectrum_requires_data() {
        assert!(plot_spectrum(&[], None, "unused.png", None).is_err());
    }
}
