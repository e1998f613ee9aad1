//! GIF animations
//!
//! Frames are rendered in-process with the plotters GIF backend. Long traces
//! are decimated with a [`FrameSampler`] so every animation stays within its
//! frame budget.
//!
//! # Usage
//!
//! ```rust,ignore
//! use simviz_rs::analysis::FrameSampler;
//! use simviz_rs::output::visualization::{animate_particles, AnimationConfig};
//!
//! let sampler = FrameSampler::thresholded(trace.n_frames(), 500, 300);
//! let extent = Extent::from_geometry(&geometry);
//! animate_particles(&trace, &extent, Some(&geometry), &sampler, "particles.gif", None)?;
//! ```

use plotters::prelude::*;
use std::error::Error;

use super::config::{AnimationConfig, NO_TITLE};
use crate::analysis::FrameSampler;
use crate::trace::{BoxGeometry, Extent, Trace};

/// Smallest particle radius drawn, in pixels
const MIN_PARTICLE_RADIUS_PX: f64 = 2.0;

/// Animate particles moving in their box
///
/// Each frame shows every particle at one sampled time, drawn with the
/// physical radius from `geometry` when known. The caption reads
/// `t = <time> s - frame <i>/<n>`.
///
/// # Arguments
///
/// * `trace` - Planar or kinematic trace
/// * `extent` - Fixed axis bounds for every frame
/// * `geometry` - Box outline and particle radius
/// * `sampler` - Frames to render
/// * `output_path` - Output GIF path
/// * `config` - Optional AnimationConfig
pub fn animate_particles(
    trace: &Trace,
    extent: &Extent,
    geometry: Option<&BoxGeometry>,
    sampler: &FrameSampler,
    output_path: &str,
    config: Option<&AnimationConfig>,
) -> Result<(), Box<dyn Error>> {
    if trace.layout().position_offsets().is_none() {
        return Err(format!("{} traces have no particle positions to animate", trace.layout()).into());
    }
    if sampler.is_empty() || sampler.total() > trace.n_frames() {
        return Err(format!(
            "Frame sampler covers {} frames but the trace has {}",
            sampler.total(),
            trace.n_frames()
        )
        .into());
    }

    let default_config = AnimationConfig::particles(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    let root = BitMapBackend::gif(output_path, (config.width, config.height), config.frame_delay_ms())?
        .into_drawing_area();

    let n_frames = sampler.len();
    let time = trace.time();

    for (i, row) in sampler.indices().enumerate() {
        root.fill(&config.background)?;

        let caption = format!("{}: t = {:.2} s - frame {}/{}", config.title, time[row], i + 1, n_frames);
        let mut chart = ChartBuilder::on(&root)
            .caption(caption, ("sans-serif", 22).into_font())
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(extent.x_range(), extent.y_range())?;

        chart
            .configure_mesh()
            .disable_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .draw()?;

        let radius = match geometry {
            Some(g) => {
                let (pixels, _) = chart.plotting_area().get_pixel_range();
                let scale = (pixels.end - pixels.start) as f64 / (extent.x_max - extent.x_min);
                (g.radius * scale).max(MIN_PARTICLE_RADIUS_PX).round() as u32
            }
            None => config.marker_size,
        };

        if let Some(g) = geometry {
            chart.draw_series(std::iter::once(Rectangle::new(
                [(0.0, 0.0), (g.width, g.height)],
                BLACK.stroke_width(2),
            )))?;
        }

        let fill = config.marker_color.mix(0.8).filled();
        chart.draw_series(
            trace
                .frame_points(row)
                .into_iter()
                .map(|p| Circle::new((p.x, p.y), radius, fill)),
        )?;

        root.present()?;
    }

    log::debug!("Wrote {} animation frames to {}", n_frames, output_path);

    Ok(())
}

/// Animate a growing phase-space curve
///
/// Frame `i` draws the curve from the first sample up to the `i`-th sampled
/// one, with the current state marked. Axis bounds are the padded extent of
/// the whole curve so they stay fixed.
///
/// # Arguments
///
/// * `time` - Time of each sample (caption only)
/// * `x`, `y` - Curve coordinates, same length as `time`
/// * `sampler` - Frames to render
/// * `output_path` - Output GIF path
/// * `config` - Optional AnimationConfig (default: `AnimationConfig::phase_trace`)
pub fn animate_phase_trace(
    time: &[f64],
    x: &[f64],
    y: &[f64],
    sampler: &FrameSampler,
    output_path: &str,
    config: Option<&AnimationConfig>,
) -> Result<(), Box<dyn Error>> {
    if x.len() != time.len() || y.len() != time.len() {
        return Err(format!(
            "Length mismatch: {} time points, {} x values, {} y values",
            time.len(),
            x.len(),
            y.len()
        )
        .into());
    }
    if sampler.is_empty() || sampler.total() > time.len() {
        return Err(format!(
            "Frame sampler covers {} frames but the curve has {}",
            sampler.total(),
            time.len()
        )
        .into());
    }

    let default_config = AnimationConfig::phase_trace(NO_TITLE, "x", "v");
    let config = config.unwrap_or(&default_config);

    let extent = Extent::from_xy(x, y).padded(0.1);

    let root = BitMapBackend::gif(output_path, (config.width, config.height), config.frame_delay_ms())?
        .into_drawing_area();

    for idx in sampler.indices() {
        root.fill(&config.background)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(
                format!("{} - t = {:.2}", config.title, time[idx]),
                ("sans-serif", 22).into_font(),
            )
            .margin(10)
            .x_label_area_size(35)
            .y_label_area_size(45)
            .build_cartesian_2d(extent.x_range(), extent.y_range())?;

        chart
            .configure_mesh()
            .x_desc(&config.xlabel)
            .y_desc(&config.ylabel)
            .draw()?;

        chart.draw_series(LineSeries::new(
            x[..=idx].iter().zip(y[..=idx].iter()).map(|(a, b)| (*a, *b)),
            config.trail_color.mix(0.7).stroke_width(1),
        ))?;

        chart.draw_series(std::iter::once(Circle::new(
            (x[idx], y[idx]),
            config.marker_size,
            config.marker_color.filled(),
        )))?;

        root.present()?;
    }

    log::debug!("Wrote {} animation frames to {}", sampler.len(), output_path);

    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================
