//! Particle and oscillator pipelines
//!
//! Both pipelines follow the same order: read the trace, compute every
//! derived quantity, create the output directory, then render.

use anyhow::{anyhow, Context, Result};
use log::{info, warn};

use std::error::Error;
use std::fs;
use std::path::Path;

use super::settings::RenderSettings;
use super::{OscillatorsArgs, ParticleChart, ParticlesArgs, RunReport};
use crate::analysis::{kinematics, phase, FrameSampler, Histogram, MaxwellBoltzmann2d, Spectrum, Summary};
use crate::output::export::{export_series_csv, CsvConfig, CsvMetadata};
use crate::output::visualization::{
    animate_particles, animate_phase_trace, plot_energy, plot_lyapunov, plot_oscillator_summary,
    plot_phase_portrait, plot_poincare, plot_spectrum, plot_speed_histogram, plot_time_series,
    plot_trajectories, AnimationConfig, Panel, PlotConfig,
};
use crate::trace::{read_lyapunov, read_poincare, read_trace, EntityLayout, Extent, Trace};

// =================================================================================================
// Helpers
// =================================================================================================

/// Render one output file and record it in the report
fn render<F>(report: &mut RunReport, dir: &Path, name: &str, draw: F) -> Result<()>
where
    F: FnOnce(&str) -> Result<(), Box<dyn Error>>,
{
    let path = dir.join(name);
    let path_str = path
        .to_str()
        .ok_or_else(|| anyhow!("output path {} is not valid UTF-8", path.display()))?;

    draw(path_str).map_err(|e| anyhow!("failed to write {}: {}", path.display(), e))?;

    info!("Wrote {}", path.display());
    report.written.push(path);
    Ok(())
}

fn create_output_dir(dir: &Path) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("cannot create output directory {}", dir.display()))
}

fn csv_config(settings: &RenderSettings, source: &Path, trace: &Trace) -> CsvConfig {
    settings.csv_config().with_metadata(CsvMetadata::from_trace(&source.display().to_string(), trace))
}

// =================================================================================================
// Particles
// =================================================================================================

/// Trajectories, speed histogram, kinetic energy and animation of a particle trace
pub fn run_particles(args: &ParticlesArgs, settings: &RenderSettings) -> Result<RunReport> {
    let layout = if args.positions_only { EntityLayout::Planar } else { EntityLayout::Kinematic };
    let trace = read_trace(&args.data_file, layout)
        .with_context(|| format!("cannot load particle trace {}", args.data_file.display()))?;

    let n = trace.n_entities();
    info!("Loaded {} frames of {} particles from {}", trace.n_frames(), n, args.data_file.display());

    let charts = args.selected_charts();
    let geometry = trace.geometry();

    // ====== Derived quantities ======

    let speeds = if layout.has_velocity() { Some(kinematics::speed_samples(&trace)?) } else { None };
    let summary = speeds.as_deref().and_then(Summary::from_samples);
    let energy = if layout.has_velocity() {
        Some(kinematics::kinetic_energy(&trace, settings.particle_mass)?)
    } else {
        None
    };
    let drift = energy.as_deref().and_then(kinematics::energy_drift_percent);

    if let Some(s) = &summary {
        info!("Speed statistics: {}", s);
    }
    if let Some(e) = &energy {
        if e.first() == Some(&0.0) {
            warn!("Initial kinetic energy is zero, drift is undefined");
        }
    }

    let mut report = RunReport {
        command: "particles",
        frames: trace.n_frames(),
        entities: n,
        mean_speed: summary.as_ref().map(|s| s.mean),
        energy_drift_percent: drift,
        ..Default::default()
    };

    create_output_dir(&args.output_dir)?;
    let dir = args.output_dir.as_path();

    // ====== Charts ======

    if charts.contains(&ParticleChart::Trajectories) {
        let title = format!("Trajectories of {} particles", n);
        let config = settings.plot_config(PlotConfig::trajectories(title));
        render(&mut report, dir, "trajectories.png", |path| {
            plot_trajectories(&trace, geometry.as_ref(), path, Some(&config))
        })?;
    }

    if charts.contains(&ParticleChart::Histogram) {
        match (&speeds, &summary) {
            (Some(speeds), Some(summary)) => {
                let histogram = Histogram::density(speeds, settings.histogram_bins)?;
                let overlay = MaxwellBoltzmann2d::from_rms(summary.rms);
                let config = settings.plot_config(PlotConfig::histogram(format!(
                    "Speed Distribution ({} samples)",
                    summary.count
                )));
                render(&mut report, dir, "speed_histogram.png", |path| {
                    plot_speed_histogram(&histogram, summary, Some(&overlay), path, Some(&config))
                })?;
            }
            _ => info!("Skipping speed histogram: trace has no velocities"),
        }
    }

    if charts.contains(&ParticleChart::Energy) {
        match &energy {
            Some(energy) => {
                let title = match drift {
                    Some(d) => format!("Kinetic Energy (drift: {:.4}%)", d),
                    None => "Kinetic Energy".to_string(),
                };
                let config = settings.plot_config(PlotConfig::energy(title));
                render(&mut report, dir, "kinetic_energy.png", |path| {
                    plot_energy(trace.time(), energy, path, Some(&config))
                })?;

                if args.csv {
                    let csv = csv_config(settings, &args.data_file, &trace);
                    render(&mut report, dir, "kinetic_energy.csv", |path| {
                        export_series_csv(
                            &["t", "kinetic_energy"],
                            &[trace.time(), energy.as_slice()],
                            path,
                            Some(&csv),
                        )
                    })?;
                }
            }
            None => info!("Skipping kinetic energy: trace has no velocities"),
        }
    }

    if charts.contains(&ParticleChart::Animation) {
        let sampler = FrameSampler::thresholded(
            trace.n_frames(),
            settings.particle_frame_threshold,
            settings.particle_max_frames,
        );
        let extent = match &geometry {
            Some(g) => Extent::from_geometry(g).padded(0.02),
            None => trace.extent().padded(0.1),
        };
        let config = settings.particle_animation(AnimationConfig::particles(format!("{} particles", n)));

        info!("Animating {} of {} frames (stride {})", sampler.len(), sampler.total(), sampler.stride());
        render(&mut report, dir, "particles.gif", |path| {
            animate_particles(&trace, &extent, geometry.as_ref(), &sampler, path, Some(&config))
        })?;
    }

    Ok(report)
}

// =================================================================================================
// Oscillators
// =================================================================================================

/// Time series, Lissajous figure, phase portraits, spectrum and summary of an oscillator trace
pub fn run_oscillators(args: &OscillatorsArgs, settings: &RenderSettings) -> Result<RunReport> {
    let trace = read_trace(&args.data_file, EntityLayout::Oscillator)
        .with_context(|| format!("cannot load oscillator trace {}", args.data_file.display()))?;

    let n = trace.n_entities();
    info!("Loaded {} frames of {} oscillators from {}", trace.n_frames(), n, args.data_file.display());

    let dt = trace
        .time_step()
        .context("spectrum needs at least two samples with increasing time")?;

    // ====== Derived quantities ======

    let mut displacements = Vec::with_capacity(n);
    let mut velocities = Vec::with_capacity(n);
    for i in 0..n {
        displacements.push(trace.displacement(i).with_context(|| format!("oscillator {} is missing", i + 1))?);
        velocities.push(trace.oscillator_velocity(i).with_context(|| format!("oscillator {} is missing", i + 1))?);
    }

    let spectra = displacements
        .iter()
        .map(|x| Spectrum::compute(x, dt))
        .collect::<Result<Vec<_>, _>>()?;
    let dominant: Vec<f64> = spectra.iter().filter_map(Spectrum::dominant_frequency).collect();
    for (i, f) in dominant.iter().enumerate() {
        info!("Oscillator {}: dominant frequency {:.4}", i + 1, f);
    }

    let phase_diff = if n >= 2 {
        let phi1 = phase::phase_angles(&displacements[0], &velocities[0])?;
        let phi2 = phase::phase_angles(&displacements[1], &velocities[1])?;
        let diff = phase::phase_difference(&phi1, &phi2)?;
        if let Some(ratio) = phase::locking_ratio(&diff, settings.phase_lock_tolerance) {
            info!("Phase difference within {} rad for {:.1}% of samples", settings.phase_lock_tolerance, ratio * 100.0);
        }
        Some(diff)
    } else {
        None
    };

    let poincare = match &args.poincare {
        Some(path) => read_poincare(path).with_context(|| format!("cannot load Poincare section {}", path.display()))?,
        None => None,
    };
    let lyapunov = match &args.lyapunov {
        Some(path) => read_lyapunov(path).with_context(|| format!("cannot load Lyapunov series {}", path.display()))?,
        None => None,
    };

    let names: Vec<String> = (1..=n).map(|i| format!("x{}", i)).collect();
    let time = trace.time();

    let mut report = RunReport {
        command: "oscillators",
        frames: trace.n_frames(),
        entities: n,
        dominant_frequencies: dominant,
        lyapunov_exponent: lyapunov.as_ref().and_then(|l| l.final_estimate()),
        ..Default::default()
    };

    create_output_dir(&args.output_dir)?;
    let dir = args.output_dir.as_path();

    // ====== Static charts ======

    let series: Vec<(&str, &[f64])> = names
        .iter()
        .zip(displacements.iter())
        .map(|(name, x)| (name.as_str(), x.as_slice()))
        .collect();

    let config = settings.plot_config(PlotConfig::time_series("Displacement vs Time"));
    render(&mut report, dir, "x_vs_t.png", |path| plot_time_series(time, &series, path, Some(&config)))?;

    if n >= 2 {
        let mut config = settings.plot_config(PlotConfig::phase_portrait("Lissajous Figure"));
        config.xlabel = "x1".to_string();
        config.ylabel = "x2".to_string();
        render(&mut report, dir, "lissajous.png", |path| {
            plot_phase_portrait(&displacements[0], &displacements[1], path, Some(&config))
        })?;
    } else {
        info!("Skipping Lissajous figure: needs two oscillators");
    }

    for i in 0..n {
        let mut config = settings.plot_config(PlotConfig::phase_portrait(format!("Phase Space, Oscillator {}", i + 1)));
        config.xlabel = format!("x{}", i + 1);
        config.ylabel = format!("v{}", i + 1);
        render(&mut report, dir, &format!("phase_space_osc{}.png", i + 1), |path| {
            plot_phase_portrait(&displacements[i], &velocities[i], path, Some(&config))
        })?;
    }

    let labelled: Vec<(&str, &Spectrum)> = names.iter().map(String::as_str).zip(spectra.iter()).collect();
    let config = settings.plot_config(PlotConfig::spectrum(spectrum_title(n)));
    render(&mut report, dir, "spectrum.png", |path| {
        plot_spectrum(&labelled, settings.spectrum_frequency_limit, path, Some(&config))
    })?;

    if let Some(diff) = &phase_diff {
        let mut config = settings.plot_config(PlotConfig::time_series("Phase Difference"));
        config.ylabel = "phi1 - phi2 (rad)".to_string();
        render(&mut report, dir, "phase_difference.png", |path| {
            plot_time_series(time, &[("phi1 - phi2", diff.as_slice())], path, Some(&config))
        })?;
    }

    match &poincare {
        Some(section) => {
            let config = settings.plot_config(PlotConfig::poincare(format!(
                "Poincare Section ({} crossings)",
                section.len()
            )));
            render(&mut report, dir, "poincare.png", |path| plot_poincare(section, path, Some(&config)))?;
        }
        None if args.poincare.is_some() => info!("Skipping Poincare section: no data"),
        None => {}
    }

    match &lyapunov {
        Some(series) => {
            let title = match series.final_estimate() {
                Some(l) => format!("Lyapunov Exponent (final: {:.4})", l),
                None => "Lyapunov Exponent".to_string(),
            };
            let config = settings.plot_config(PlotConfig::lyapunov(title));
            render(&mut report, dir, "lyapunov.png", |path| plot_lyapunov(series, path, Some(&config)))?;
        }
        None if args.lyapunov.is_some() => info!("Skipping Lyapunov exponent: no data"),
        None => {}
    }

    // ====== Summary ======

    let mut panels = vec![Panel::Lines { title: "Displacement", ylabel: "x", time, series: series.clone() }];
    if n >= 2 {
        panels.push(Panel::Portrait {
            title: "Lissajous",
            xlabel: "x1",
            ylabel: "x2",
            x: &displacements[0],
            y: &displacements[1],
        });
    } else {
        panels.push(Panel::Portrait {
            title: "Phase Space",
            xlabel: "x1",
            ylabel: "v1",
            x: &displacements[0],
            y: &velocities[0],
        });
    }
    panels.push(Panel::Spectrum {
        title: "Spectrum",
        spectra: labelled.clone(),
        frequency_limit: settings.spectrum_frequency_limit,
    });
    if let Some(diff) = &phase_diff {
        panels.push(Panel::Lines {
            title: "Phase Difference",
            ylabel: "rad",
            time,
            series: vec![("phi1 - phi2", diff.as_slice())],
        });
    }

    let summary_config = PlotConfig {
        width: settings.width.max(1600),
        height: settings.height.max(1200),
        ..settings.plot_config(PlotConfig::default())
    };
    render(&mut report, dir, "summary.png", |path| {
        plot_oscillator_summary(&panels, path, Some(&summary_config))
    })?;

    // ====== Animations ======

    if args.gif {
        let sampler = FrameSampler::capped(trace.n_frames(), settings.phase_max_frames);
        info!("Animating {} of {} frames (stride {})", sampler.len(), sampler.total(), sampler.stride());

        for i in 0..n {
            let xlabel = format!("x{}", i + 1);
            let ylabel = format!("v{}", i + 1);
            let config = settings.phase_animation(AnimationConfig::phase_trace(
                format!("Oscillator {}", i + 1),
                &xlabel,
                &ylabel,
            ));
            render(&mut report, dir, &format!("phase_space_osc{}.gif", i + 1), |path| {
                animate_phase_trace(time, &displacements[i], &velocities[i], &sampler, path, Some(&config))
            })?;
        }

        if n >= 2 {
            let config = settings.phase_animation(AnimationConfig::phase_trace("Lissajous", "x1", "x2"));
            render(&mut report, dir, "lissajous_evolution.gif", |path| {
                animate_phase_trace(time, &displacements[0], &displacements[1], &sampler, path, Some(&config))
            })?;
        }
    }

    // ====== CSV ======

    if args.csv {
        let csv = csv_config(settings, &args.data_file, &trace);

        let mut headers = vec!["frequency".to_string()];
        headers.extend(names.iter().map(|name| format!("amplitude_{}", name)));
        let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
        let mut columns: Vec<&[f64]> = vec![spectra[0].frequencies.as_slice()];
        columns.extend(spectra.iter().map(|s| s.amplitudes.as_slice()));

        render(&mut report, dir, "spectrum.csv", |path| export_series_csv(&header_refs, &columns, path, Some(&csv)))?;

        if let Some(diff) = &phase_diff {
            render(&mut report, dir, "phase_difference.csv", |path| {
                export_series_csv(&["t", "phase_difference"], &[time, diff.as_slice()], path, Some(&csv))
            })?;
        }
    }

    Ok(report)
}

fn spectrum_title(n: usize) -> String {
    if n == 1 {
        "Frequency Spectrum".to_string()
    } else {
        format!("Frequency Spectrum, {} Oscillators", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn write_trace(dir: &Path, name: &str, text: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(text.as_bytes()).unwrap();
        path
    }

    fn particles_args(data_file: PathBuf, output_dir: PathBuf) -> ParticlesArgs {
        ParticlesArgs { data_file, output_dir, charts: None, positions_only: false, csv: false }
    }

    #[test]
    fn test_particles_without_velocities_skips_histogram() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_trace(dir.path(), "pos.dat", "0 0.1 0.1\n1 0.2 0.2\n2 0.3 0.3\n");
        let out = dir.path().join("out");

        let mut args = particles_args(data, out.clone());
        args.positions_only = true;
        args.charts = Some(vec![ParticleChart::Trajectories, ParticleChart::Histogram]);

        let report = run_particles(&args, &RenderSettings::default()).unwrap();
        assert_eq!(report.written, vec![out.join("trajectories.png")]);
        assert!(report.mean_speed.is_none());
        assert!(!out.join("speed_histogram.png").exists());
    }

    #[test]
    fn test_particles_missing_file_creates_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let args = particles_args(dir.path().join("missing.dat"), out.clone());

        assert!(run_particles(&args, &RenderSettings::default()).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn test_single_oscillator() {
        let dir = tempfile::tempdir().unwrap();
        let mut text = String::from("# t x1 v1\n");
        for i in 0..64 {
            let t = i as f64 * 0.1;
            text.push_str(&format!("{} {} {}\n", t, t.cos(), -t.sin()));
        }
        let data = write_trace(dir.path(), "single.txt", &text);
        let out = dir.path().join("out");

        let args = OscillatorsArgs {
            data_file: data,
            output_dir: out.clone(),
            gif: false,
            poincare: None,
            lyapunov: None,
            csv: false,
        };
        let report = run_oscillators(&args, &RenderSettings::default()).unwrap();

        assert_eq!(report.entities, 1);
        assert!(out.join("x_vs_t.png").exists());
        assert!(out.join("phase_space_osc1.png").exists());
        assert!(out.join("summary.png").exists());
        assert!(!out.join("lissajous.png").exists());
        assert!(!out.join("phase_difference.png").exists());
    }

    #[test]
    fn test_oscillators_single_sample_fails_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let data = write_trace(dir.path(), "one.txt", "0 1 0 1 0\n");
        let out = dir.path().join("out");

        let args = OscillatorsArgs {
            data_file: data,
            output_dir: out.clone(),
            gif: false,
            poincare: None,
            lyapunov: None,
            csv: false,
        };
        assert!(run_oscillators(&args, &RenderSettings::default()).is_err());
        assert!(!out.exists());
    }
}
