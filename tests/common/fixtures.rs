//! Trace files written the way the simulations write them

use std::f64::consts::PI;
use std::fs;
use std::path::{Path, PathBuf};

/// Billiard trace with box metadata: `t x0 y0 vx0 vy0 ...`
///
/// Particles move on straight lines at constant velocity, so every frame has
/// the same kinetic energy.
pub fn billiard_text(n_particles: usize, n_frames: usize) -> String {
    let mut text = String::from("# W: 2.0\n# H: 1.0\n# R_BOLA: 0.05\n");
    for frame in 0..n_frames {
        let t = frame as f64 * 0.01;
        text.push_str(&format!("{}", t));
        for p in 0..n_particles {
            let vx = 0.5 + 0.1 * p as f64;
            let vy = 0.2 - 0.05 * p as f64;
            let x = 0.2 + vx * t;
            let y = 0.2 + 0.1 * p as f64 + vy * t;
            text.push_str(&format!(" {} {} {} {}", x, y, vx, vy));
        }
        text.push('\n');
    }
    text
}

/// Coupled-oscillator trace: `t x1 v1 x2 v2`
///
/// Oscillator 1 runs at `f1`, oscillator 2 at `f2` (in 1/t units).
pub fn oscillator_text(n_frames: usize, dt: f64, f1: f64, f2: f64) -> String {
    let mut text = String::from("# t x1 v1 x2 v2\n");
    for frame in 0..n_frames {
        let t = frame as f64 * dt;
        let (w1, w2) = (2.0 * PI * f1, 2.0 * PI * f2);
        text.push_str(&format!(
            "{} {} {} {} {}\n",
            t,
            (w1 * t).cos(),
            -w1 * (w1 * t).sin(),
            (w2 * t).cos(),
            -w2 * (w2 * t).sin()
        ));
    }
    text
}

/// Write `text` to `dir/name` and return the path
pub fn write_file(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}
