//! Line plots against time
//!
//! Oscillator displacements, phase difference, kinetic energy and the
//! Lyapunov exponent estimate are all drawn as one or more lines sharing the
//! time axis.
//!
//! # Usage
//!
//! ```rust,ignore
//! use simviz_rs::output::visualization::{plot_time_series, PlotConfig};
//!
//! let x1 = trace.displacement(0).unwrap();
//! let x2 = trace.displacement(1).unwrap();
//!
//! plot_time_series(trace.time(), &[("x1", &x1), ("x2", &x2)], "x_vs_t.png", None)?;
//! ```

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use crate::analysis::kinematics::energy_drift_percent;
use crate::trace::{Extent, LyapunovSeries};

/// Horizontal reference line drawn across the whole time axis
pub(crate) struct Reference<'a> {
    pub label: &'a str,
    pub value: f64,
    pub color: RGBColor,
}

// =================================================================================================
// Drawing helpers
// =================================================================================================

fn check_series(time: &[f64], series: &[(&str, &[f64])]) -> Result<(), Box<dyn Error>> {
    if time.is_empty() {
        return Err("Time axis is empty".into());
    }
    if series.is_empty() {
        return Err("No series to plot".into());
    }
    for (name, values) in series {
        if values.len() != time.len() {
            return Err(format!(
                "Series '{}' has {} values for {} time points",
                name,
                values.len(),
                time.len()
            )
            .into());
        }
    }
    Ok(())
}

/// Draw lines against time on any drawing area
///
/// Does not present the area, so it can draw one panel of a larger figure.
pub(crate) fn draw_lines_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    time: &[f64],
    series: &[(&str, &[f64])],
    reference: Option<&Reference>,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let mut extent = Extent::empty();
    for (_, values) in series {
        for (&t, &v) in time.iter().zip(values.iter()) {
            extent.include(t, v);
        }
    }
    if let Some(r) = reference {
        extent.include(time[0], r.value);
    }
    let bounds = extent.padded(0.1);
    let x_range = if extent.x_max > extent.x_min { extent.x_range() } else { bounds.x_range() };

    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_range, bounds.y_range())?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel).y_desc(&config.ylabel);

    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    let shown = series.len().min(config.max_series);
    let with_legend = shown > 1 && shown <= config.legend_limit;

    for (idx, (name, values)) in series.iter().take(shown).enumerate() {
        let color = if shown == 1 { config.line_color } else { config.get_entity_color(idx) };
        let width = config.line_width;

        let drawn = chart.draw_series(LineSeries::new(
            time.iter().zip(values.iter()).map(|(t, v)| (*t, *v)),
            color.stroke_width(width),
        ))?;
        if with_legend || reference.is_some() {
            drawn
                .label(*name)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(width)));
        }
    }

    if let Some(r) = reference {
        let color = r.color;
        chart
            .draw_series(LineSeries::new(
                vec![(extent.x_min, r.value), (extent.x_max, r.value)],
                color.mix(0.8).stroke_width(1),
            ))?
            .label(r.label)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if with_legend || reference.is_some() {
        chart
            .configure_series_labels()
            .background_style(config.background.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }

    Ok(())
}

fn render_lines(
    time: &[f64],
    series: &[(&str, &[f64])],
    reference: Option<&Reference>,
    output_path: &str,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>> {
    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
            draw_lines_on_area(&root, time, series, reference, config)?;
            root.present()?;
        }
        _ => {
            let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
            draw_lines_on_area(&root, time, series, reference, config)?;
            root.present()?;
        }
    }

    Ok(())
}

// =================================================================================================
// Public plotting functions
// =================================================================================================

/// Plot one or more signals against time
///
/// # Arguments
///
/// * `time` - Time axis
/// * `series` - `(label, values)` pairs, each as long as `time`
/// * `output_path` - Output file path (.png or .svg)
/// * `config` - Optional PlotConfig
///
/// # Errors
///
/// Fails on an empty time axis, no series, or a length mismatch.
pub fn plot_time_series(
    time: &[f64],
    series: &[(&str, &[f64])],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    check_series(time, series)?;

    let default_config = PlotConfig::time_series(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    render_lines(time, series, None, output_path, config)
}

/// Plot total kinetic energy with the initial value as reference
///
/// The default title reports the relative drift between the first and last
/// frames.
pub fn plot_energy(
    time: &[f64],
    energy: &[f64],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    check_series(time, &[("E", energy)])?;

    let default_config = match energy_drift_percent(energy) {
        Some(drift) => PlotConfig::energy(format!("Kinetic Energy (drift: {:.4}%)", drift)),
        None => PlotConfig::energy(NO_TITLE),
    };
    let config = config.unwrap_or(&default_config);

    let initial = energy[0];
    let label = format!("E0 = {:.4}", initial);
    let reference = Reference { label: &label, value: initial, color: RED };

    render_lines(time, &[("Kinetic energy", energy)], Some(&reference), output_path, config)
}

/// Plot the running Lyapunov exponent estimate
///
/// A zero line separates converging from diverging trajectories.
pub fn plot_lyapunov(
    lyapunov: &LyapunovSeries,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    check_series(&lyapunov.time, &[("lambda", &lyapunov.exponent)])?;

    let default_config = match lyapunov.final_estimate() {
        Some(lambda) => PlotConfig::lyapunov(format!("Lyapunov Exponent (final: {:.4})", lambda)),
        None => PlotConfig::lyapunov(NO_TITLE),
    };
    let config = config.unwrap_or(&default_config);

    let reference = Reference { label: "lambda = 0", value: 0.0, color: BLACK };

    render_lines(
        &lyapunov.time,
        &[("lambda(t)", &lyapunov.exponent)],
        Some(&reference),
        output_path,
        config,
    )
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn signals() -> (Vec<f64>, Vec<f64>, Vec<f64>) {
        let time: Vec<f64> = (0..200).map(|i| i as f64 * 0.05).collect();
        let x1 = time.iter().map(|t| t.cos()).collect();
        let x2 = time.iter().map(|t| (1.5 * t).sin()).collect();
        (time, x1, x2)
    }

    #[test]
    fn test_plot_time_series_png() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let (time, x1, x2) = signals();
        plot_time_series(&time, &[("x1", &x1), ("x2", &x2)], path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_time_series_svg() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("svg");

        let (time, x1, _) = signals();
        let mut config = PlotConfig::time_series("Oscillator 1");
        config.show_grid = false;
        plot_time_series(&time, &[("x1", &x1)], path.to_str().unwrap(), Some(&config)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_time_series_length_mismatch() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let time = vec![0.0, 1.0, 2.0];
        let short = vec![1.0, 2.0];
        let result = plot_time_series(&time, &[("x", &short)], path.to_str().unwrap(), None);
        assert!(result.is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_plot_time_series_requires_series() {
        let result = plot_time_series(&[0.0, 1.0], &[], "unused.png", None);
        assert!(result.is_err());
    }

    #[test]
    fn test_plot_energy() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let time: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let energy: Vec<f64> = time.iter().map(|t| 10.0 + 1e-3 * t).collect();
        plot_energy(&time, &energy, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_constant_energy() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        plot_energy(&[0.0, 1.0, 2.0], &[0.0, 0.0, 0.0], path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_lyapunov() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let time: Vec<f64> = (1..=100).map(|i| i as f64).collect();
        let exponent = time.iter().map(|t| 0.1 + 1.0 / t).collect();
        let lyapunov = LyapunovSeries { time, exponent };

        plot_lyapunov(&lyapunov, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }
}
