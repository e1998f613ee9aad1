//! Speed-distribution histogram
//!
//! Density bars of the pooled particle speeds, with the sample mean, the ±1σ
//! band and an optional 2D Maxwell–Boltzmann curve for comparison.

use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use crate::analysis::{Histogram, MaxwellBoltzmann2d, Summary};

/// Points used to draw the Maxwell–Boltzmann overlay
const OVERLAY_POINTS: usize = 1000;

/// Plot a speed histogram
///
/// # Arguments
///
/// * `histogram` - Density histogram of the speeds
/// * `summary` - Statistics of the same sample (mean and σ markers)
/// * `overlay` - Optional theoretical distribution drawn over the bars
/// * `output_path` - Path to save the plot (PNG or SVG)
/// * `config` - Optional plot configuration
///
/// # Example
///
/// ```rust,ignore
/// let speeds = kinematics::speed_samples(&trace)?;
/// let histogram = Histogram::density(&speeds, 50)?;
/// let summary = Summary::from_samples(&speeds).unwrap();
/// let mb = MaxwellBoltzmann2d::from_rms(summary.rms);
///
/// plot_speed_histogram(&histogram, &summary, Some(&mb), "speeds.png", None)?;
/// ```
pub fn plot_speed_histogram(
    histogram: &Histogram,
    summary: &Summary,
    overlay: Option<&MaxwellBoltzmann2d>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if histogram.bins() == 0 {
        return Err("Histogram has no bins".into());
    }

    let default_config = PlotConfig::histogram(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_histogram_impl(backend, histogram, summary, overlay, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_histogram_impl(backend, histogram, summary, overlay, config)
        }
    }
}

/// Implementation for histogram plotting with concrete backend
fn plot_histogram_impl<DB: DrawingBackend>(
    backend: DB,
    histogram: &Histogram,
    summary: &Summary,
    overlay: Option<&MaxwellBoltzmann2d>,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let x_min = histogram.edges[0].min(0.0);
    let x_max = histogram.edges[histogram.bins()];

    let curve = overlay.map(|mb| mb.curve(x_max, OVERLAY_POINTS));
    let curve_max = curve
        .as_ref()
        .map(|c| c.iter().map(|(_, f)| *f).fold(0.0, f64::max))
        .unwrap_or(0.0);

    let y_max = histogram.max_density().max(curve_max).max(1e-10) * 1.1;

    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(70)
        .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

    let x_format = |x: &f64| format!("{:.2}", x);
    let y_format = |y: &f64| format!("{:.3}", y);

    let mut mesh = chart.configure_mesh();
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&x_format)
        .y_label_formatter(&y_format);

    if config.show_grid {
        mesh.draw()?;
    } else {
        mesh.disable_mesh().draw()?;
    }

    // ====== Bars ======

    let fill = config.line_color.mix(0.7).filled();
    chart.draw_series((0..histogram.bins()).map(|i| {
        let (left, right) = histogram.bin_range(i);
        Rectangle::new([(left, 0.0), (right, histogram.density[i])], fill)
    }))?;
    chart.draw_series((0..histogram.bins()).map(|i| {
        let (left, right) = histogram.bin_range(i);
        Rectangle::new([(left, 0.0), (right, histogram.density[i])], BLACK.stroke_width(1))
    }))?;

    // ====== Mean and ±1σ markers ======

    let mean_color = RGBColor(255, 105, 180);
    chart
        .draw_series(LineSeries::new(
            vec![(summary.mean, 0.0), (summary.mean, y_max)],
            mean_color.stroke_width(2),
        ))?
        .label(format!("Mean: {:.3}", summary.mean))
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], mean_color.stroke_width(2)));

    let sigma_color = RGBColor(255, 165, 0);
    for (i, v) in [summary.mean - summary.std, summary.mean + summary.std].into_iter().enumerate() {
        let series = chart.draw_series(LineSeries::new(
            vec![(v, 0.0), (v, y_max)],
            sigma_color.mix(0.7).stroke_width(1),
        ))?;
        if i == 0 {
            series
                .label(format!("±1σ: {:.3}", summary.std))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], sigma_color));
        }
    }

    // ====== Theoretical overlay ======

    if let Some(curve) = curve {
        chart
            .draw_series(LineSeries::new(curve, RED.stroke_width(config.line_width)))?
            .label("Maxwell-Boltzmann (2D)")
            .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(config.background.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn speeds() -> Vec<f64> {
        (0..2000)
            .map(|i| {
                let u = (i as f64 + 0.5) / 2000.0;
                // Inverse CDF of the 2D Maxwell-Boltzmann law with sigma = 1
                (-2.0 * (1.0 - u).ln()).sqrt()
            })
            .collect()
    }

    #[test]
    fn test_plot_histogram_with_overlay() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let samples = speeds();
        let histogram = Histogram::density(&samples, 50).unwrap();
        let summary = Summary::from_samples(&samples).unwrap();
        let mb = MaxwellBoltzmann2d::from_rms(summary.rms);

        plot_speed_histogram(&histogram, &summary, Some(&mb), path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_histogram_without_overlay() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let samples = vec![1.0, 1.0, 1.0];
        let histogram = Histogram::density(&samples, 30).unwrap();
        let summary = Summary::from_samples(&samples).unwrap();

        plot_speed_histogram(&histogram, &summary, None, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_histogram_without_grid_keeps_axes() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("svg");

        let samples = speeds();
        let histogram = Histogram::density(&samples, 20).unwrap();
        let summary = Summary::from_samples(&samples).unwrap();
        let mut config = PlotConfig::histogram("Speeds");
        config.show_grid = false;
        config.xlabel = "Particle speed".to_string();

        plot_speed_histogram(&histogram, &summary, None, path.to_str().unwrap(), Some(&config)).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("Particle speed"));
    }
}
