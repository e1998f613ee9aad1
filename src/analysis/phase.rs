//! Oscillator phase angles and pairwise phase difference

use std::f64::consts::{PI, TAU};

use super::error::{AnalysisError, AnalysisResult};

/// Phase angle of each `(x, v)` state, `atan2(v, x)` in `(-π, π]`
pub fn phase_angles(x: &[f64], v: &[f64]) -> AnalysisResult<Vec<f64>> {
    if x.len() != v.len() {
        return Err(AnalysisError::LengthMismatch { left: x.len(), right: v.len() });
    }
    Ok(x.iter().zip(v.iter()).map(|(x, v)| v.atan2(*x)).collect())
}

/// Pairwise difference `a - b`, wrapped to `[-π, π)`
pub fn phase_difference(a: &[f64], b: &[f64]) -> AnalysisResult<Vec<f64>> {
    if a.len() != b.len() {
        return Err(AnalysisError::LengthMismatch { left: a.len(), right: b.len() });
    }
    Ok(a.iter().zip(b.iter()).map(|(a, b)| wrap_angle(a - b)).collect())
}

/// Map an angle onto `[-π, π)`
pub fn wrap_angle(angle: f64) -> f64 {
    (angle + PI).rem_euclid(TAU) - PI
}

/// Fraction of samples whose phase difference stays within `tolerance` of its
/// circular mean; close to 1 for phase-locked oscillators
pub fn locking_ratio(difference: &[f64], tolerance: f64) -> Option<f64> {
    if difference.is_empty() {
        return None;
    }

    let (s, c) = difference
        .iter()
        .fold((0.0, 0.0), |(s, c), d| (s + d.sin(), c + d.cos()));
    let mean = s.atan2(c);

    let locked = difference
        .iter()
        .filter(|d| wrap_angle(**d - mean).abs() <= tolerance)
        .count();

    Some(locked as f64 / difference.len() as f64)
}
