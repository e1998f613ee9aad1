//! Velocity magnitudes and kinetic energy
//!
//! Direct elementwise arithmetic over the strided velocity columns of a trace.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::error::{AnalysisError, AnalysisResult};
use crate::trace::Trace;

/// Euclidean norm of paired velocity components
///
/// `speeds(vx, vy)[i] = sqrt(vx[i]² + vy[i]²)`, always non-negative.
///
/// # Example
///
/// ```rust
/// use simviz_rs::analysis::kinematics::speeds;
///
/// let v = speeds(&[0.0, 3.0, 0.0], &[0.0, 4.0, 0.0]).unwrap();
/// assert_eq!(v, vec![0.0, 5.0, 0.0]);
/// ```
pub fn speeds(vx: &[f64], vy: &[f64]) -> AnalysisResult<Vec<f64>> {
    if vx.len() != vy.len() {
        return Err(AnalysisError::LengthMismatch { left: vx.len(), right: vy.len() });
    }
    Ok(vx.iter().zip(vy.iter()).map(|(x, y)| x.hypot(*y)).collect())
}

/// Speed series of one entity
pub fn entity_speeds(trace: &Trace, entity: usize) -> AnalysisResult<Vec<f64>> {
    let (vx, vy) = trace
        .velocities(entity)
        .ok_or(AnalysisError::MissingVelocities(trace.layout()))?;
    speeds(&vx, &vy)
}

/// Speeds of every entity at every frame, pooled for a histogram
///
/// Samples are concatenated entity by entity.
pub fn speed_samples(trace: &Trace) -> AnalysisResult<Vec<f64>> {
    if !trace.layout().has_velocity() {
        return Err(AnalysisError::MissingVelocities(trace.layout()));
    }

    #[cfg(feature = "parallel")]
    let per_entity: Vec<Vec<f64>> = (0..trace.n_entities())
        .into_par_iter()
        .map(|entity| entity_speeds(trace, entity))
        .collect::<AnalysisResult<_>>()?;

    #[cfg(not(feature = "parallel"))]
    let per_entity: Vec<Vec<f64>> = (0..trace.n_entities())
        .map(|entity| entity_speeds(trace, entity))
        .collect::<AnalysisResult<_>>()?;

    Ok(per_entity.concat())
}

/// Total kinetic energy per frame, `0.5 · m · Σ |v|²` over all entities
pub fn kinetic_energy(trace: &Trace, mass: f64) -> AnalysisResult<Vec<f64>> {
    let mut energy = vec![0.0; trace.n_frames()];

    for entity in 0..trace.n_entities() {
        let (vx, vy) = trace
            .velocities(entity)
            .ok_or(AnalysisError::MissingVelocities(trace.layout()))?;

        for (e, (x, y)) in energy.iter_mut().zip(vx.iter().zip(vy.iter())) {
            *e += 0.5 * mass * (x * x + y * y);
        }
    }

    Ok(energy)
}

/// Relative drift between first and last energy, in percent
///
/// `None` for an empty series or a zero initial energy.
pub fn energy_drift_percent(energy: &[f64]) -> Option<f64> {
    let first = *energy.first()?;
    let last = *energy.last()?;
    if first == 0.0 {
        return None;
    }
    Some((last - first).abs() / first.abs() * 100.0)
}
