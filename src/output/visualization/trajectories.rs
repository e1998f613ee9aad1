//! Particle trajectory plots
//!
//! Scatter of every recorded position of each particle, optionally inside the
//! outline of the simulation box.
//!
//! # Usage
//!
//! ```rust,ignore
//! use simviz_rs::output::visualization::plot_trajectories;
//!
//! let trace = read_trace("results/trajectories.dat", EntityLayout::Kinematic)?;
//! plot_trajectories(&trace, trace.geometry().as_ref(), "trajectories.png", None)?;
//! ```

use plotters::prelude::*;
use std::error::Error;

use super::config::{PlotConfig, NO_TITLE};
use crate::trace::{BoxGeometry, Extent, Trace};

/// Plot the path of every particle
///
/// At most `config.max_series` particles are drawn; the legend is shown only
/// up to `config.legend_limit` particles.
///
/// # Arguments
///
/// * `trace` - Planar or kinematic trace
/// * `geometry` - Box to outline; when `None` the axes follow the data extent
/// * `output_path` - Path to save the plot (PNG or SVG)
/// * `config` - Optional plot configuration
///
/// # Errors
///
/// Fails for oscillator traces (no planar positions) and on any drawing error.
pub fn plot_trajectories(
    trace: &Trace,
    geometry: Option<&BoxGeometry>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let shown = trace.n_entities();
    let mut paths = Vec::with_capacity(shown);
    for entity in 0..shown {
        let (x, y) = trace
            .positions(entity)
            .ok_or_else(|| format!("{} traces have no planar positions", trace.layout()))?;
        paths.push((x, y));
    }

    let default_config = PlotConfig::trajectories(format!("Trajectories of {} particles", shown));
    let config = config.unwrap_or(&default_config);

    let extent = match geometry {
        Some(g) => Extent::from_geometry(g).padded(0.02),
        None => trace.extent().padded(0.1),
    };

    let ext = std::path::Path::new(output_path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("png");

    match ext {
        "svg" => {
            let backend = SVGBackend::new(output_path, (config.width, config.height));
            plot_trajectories_impl(backend, &paths, geometry, &extent, config)
        }
        _ => {
            let backend = BitMapBackend::new(output_path, (config.width, config.height));
            plot_trajectories_impl(backend, &paths, geometry, &extent, config)
        }
    }
}

/// Implementation for trajectory plotting with concrete backend
fn plot_trajectories_impl<DB: DrawingBackend>(
    backend: DB,
    paths: &[(Vec<f64>, Vec<f64>)],
    geometry: Option<&BoxGeometry>,
    extent: &Extent,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 32).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(extent.x_range(), extent.y_range())?;

    let mut mesh = chart.configure_mesh();
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&|x| format!("{:.2}", x))
        .y_label_formatter(&|y| format!("{:.2}", y))
        .draw()?;

    // ====== Box outline ======

    if let Some(g) = geometry {
        chart.draw_series(std::iter::once(Rectangle::new(
            [(0.0, 0.0), (g.width, g.height)],
            BLACK.stroke_width(2),
        )))?;
    }

    // ====== Paths ======

    let shown = paths.len().min(config.max_series);
    let with_legend = shown <= config.legend_limit;

    for (idx, (x, y)) in paths.iter().take(shown).enumerate() {
        let color = config.get_entity_color(idx);
        let size = config.marker_size;

        let series = chart.draw_series(
            x.iter()
                .zip(y.iter())
                .map(move |(&x, &y)| Circle::new((x, y), size, color.mix(0.7).filled())),
        )?;

        if with_legend {
            series
                .label(format!("Particle {}", idx + 1))
                .legend(move |(x, y)| Circle::new((x + 10, y), 4, color.filled()));
        }
    }

    if with_legend && shown > 0 {
        chart
            .configure_series_labels()
            .background_style(config.background.mix(0.8))
            .border_style(BLACK)
            .draw()?;
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
    use crate::trace::{parse_trace, EntityLayout};

    fn billiard_trace() -> Trace {
        let mut text = String::from("# W: 4\n# H: 2\n");
        for i in 0..50 {
            let t = i as f64 * 0.1;
            text.push_str(&format!(
                "{} {} 1.0 0.1 0.0 {} 0.5 0.0 0.1\n",
                t,
                0.5 + 0.05 * i as f64,
                2.0 + 0.01 * i as f64
            ));
        }
        parse_trace(&text, EntityLayout::Kinematic).unwrap()
    }

    #[test]
    fn test_plot_trajectories_png() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        let trace = billiard_trace();
        plot_trajectories(&trace, trace.geometry().as_ref(), path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_trajectories_svg_without_box() {
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("svg");

        let config = PlotConfig::trajectories(NO_TITLE);
        plot_trajectories(&billiard_trace(), None, path.to_str().unwrap(), Some(&config)).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_trajectories_rejects_oscillators() {
        let trace = parse_trace("0 1 0\n1 0 1\n", EntityLayout::Oscillator).unwrap();
        let temp = tempfile::NamedTempFile::new().unwrap();
        let path = temp.path().with_extension("png");

        assert!(plot_trajectories(&trace, None, path.to_str().unwrap(), None).is_err());
    }
}
