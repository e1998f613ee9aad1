//! Phase-space plots
//!
//! One signal drawn against another: the Lissajous figure of two oscillator
//! displacements, the `x`–`v` portrait of a single oscillator, and the
//! Poincaré section read from an auxiliary file.

use plotters::coord::Shift;
use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use crate::trace::{Extent, PoincareSection};

/// Draw a closed or open curve `y(x)` on any drawing area
///
/// The first sample is marked in green and the last in red.
pub(crate) fn draw_portrait_on_area<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    x: &[f64],
    y: &[f64],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let extent = Extent::from_xy(x, y).padded(0.1);

    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(root)
        .caption(&config.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(extent.x_range(), extent.y_range())?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel).y_desc(&config.ylabel);

    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    chart.draw_series(LineSeries::new(
        x.iter().zip(y.iter()).map(|(a, b)| (*a, *b)),
        config.line_color.mix(0.8).stroke_width(config.line_width),
    ))?;

    let size = config.marker_size + 3;
    if let (Some(&x0), Some(&y0)) = (x.first(), y.first()) {
        chart.draw_series(std::iter::once(Circle::new((x0, y0), size, GREEN.filled())))?;
    }
    if let (Some(&xn), Some(&yn)) = (x.last(), y.last()) {
        chart.draw_series(std::iter::once(Circle::new((xn, yn), size, RED.filled())))?;
    }

    Ok(())
}

/// Plot `y` against `x`
///
/// # Arguments
///
/// * `x` - Horizontal coordinate samples
/// * `y` - Vertical coordinate samples, same length as `x`
/// * `output_path` - Output file path (.png or .svg)
/// * `config` - Optional PlotConfig (default: `PlotConfig::phase_portrait`)
///
/// # Example
///
/// ```rust,ignore
/// // Lissajous figure of two coupled oscillators
/// let x1 = trace.displacement(0).unwrap();
/// let x2 = trace.displacement(1).unwrap();
///
/// let mut config = PlotConfig::phase_portrait("Lissajous");
/// config.xlabel = "x1".to_string();
/// config.ylabel = "x2".to_string();
/// plot_phase_portrait(&x1, &x2, "lissajous.png", Some(&config))?;
/// ```
pub fn plot_phase_portrait(
    x: &[f64],
    y: &[f64],
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if x.is_empty() {
        return Err("Phase portrait needs at least one sample".into());
    }
    if x.len() != y.len() {
        return Err(format!("Coordinate length mismatch: {} vs {}", x.len(), y.len()).into());
    }

    let default_config = PlotConfig::phase_portrait(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let root = SVGBackend::new(output_path, (config.width, config.height)).into_drawing_area();
            draw_portrait_on_area(&root, x, y, config)?;
            root.present()?;
        }
        _ => {
            let root = BitMapBackend::new(output_path, (config.width, config.height)).into_drawing_area();
            draw_portrait_on_area(&root, x, y, config)?;
            root.present()?;
        }
    }

    Ok(())
}

/// Plot a Poincaré section as a scatter of `(x, v)` crossings
pub fn plot_poincare(
    section: &PoincareSection,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if section.is_empty() {
        return Err("Poincare section has no points".into());
    }

    let default_config = PlotConfig::poincare(format!("Poincare Section ({} crossings)", section.len()));
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_poincare_impl(backend, section, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_poincare_impl(backend, section, config)
        }
    }
}

/// Implementation for Poincaré plotting with concrete backend
fn plot_poincare_impl<DB: DrawingBackend>(
    backend: DB,
    section: &PoincareSection,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let extent = Extent::from_xy(&section.x, &section.v).padded(0.1);

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 28).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(extent.x_range(), extent.y_range())?;

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel).y_desc(&config.ylabel);

    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    let style = config.line_color.mix(0.6).filled();
    let size = config.marker_size;
    chart.draw_series(
        section
            .x
            .iter()
            .zip(section.v.iter())
            .map(|(&x, &v)| Circle::new((x, v), size, style)),
    )?;

    root.present()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_plot_lissajous() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let t: Vec<f64> = (0..500).map(|i| i as f64 * 2.0 * PI / 500.0).collect();
        let x1: Vec<f64> = t.iter().map(|t| (3.0 * t).sin()).collect();
        let x2: Vec<f64> = t.iter().map(|t| (2.0 * t).sin()).collect();

        plot_phase_portrait(&x1, &x2, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_portrait_svg() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("svg");

        let config = PlotConfig::phase_portrait("Oscillator 1");
        plot_phase_portrait(&[0.0, 1.0, 0.0], &[1.0, 0.0, -1.0], path.to_str().unwrap(), Some(&config)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_portrait_rejects_mismatch() {
        assert!(plot_phase_portrait(&[0.0, 1.0], &[0.0], "unused.png", None).is_err());
        assert!(plot_phase_portrait(&[], &[], "unused.png", None).is_err());
    }

    #[test]
    fn test_plot_poincare() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let section = PoincareSection {
            x: (0..100).map(|i| (i as f64 * 0.7).sin()).collect(),
            v: (0..100).map(|i| (i as f64 * 0.3).cos()).collect(),
        };

        plot_poincare(&section, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_poincare_empty() {
        let section = PoincareSection { x: vec![], v: vec![] };
        assert!(plot_poincare(&section, "unused.png", None).is_err());
    }
}
