//! Probability-density histograms and the 2D Maxwell–Boltzmann speed law

use super::error::{AnalysisError, AnalysisResult};

/// Equal-width histogram normalised to a probability density
///
/// Bins cover `[min, max]` of the sample; every bin is half-open except the
/// last, which also holds `max`. `density[i] = counts[i] / (n · width)`, so the
/// bar areas sum to one.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` bin edges
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub density: Vec<f64>,
}

impl Histogram {
    /// Bin `samples` into `bins` equal-width bins
    ///
    /// A sample with a single distinct value is binned over `[v - 0.5, v + 0.5]`.
    /// Non-finite samples are ignored.
    pub fn density(samples: &[f64], bins: usize) -> AnalysisResult<Self> {
        if bins == 0 {
            return Err(AnalysisError::InvalidBins);
        }

        let finite: Vec<f64> = samples.iter().copied().filter(|x| x.is_finite()).collect();
        if finite.is_empty() {
            return Err(AnalysisError::EmptySignal);
        }

        let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
        let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * width).collect();

        let mut counts = vec![0usize; bins];
        for &x in &finite {
            let index = (((x - lo) / width).floor() as usize).min(bins - 1);
            counts[index] += 1;
        }

        let norm = finite.len() as f64 * width;
        let density = counts.iter().map(|&c| c as f64 / norm).collect();

        Ok(Self { edges, counts, density })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Left and right edge of bin `i`
    pub fn bin_range(&self, i: usize) -> (f64, f64) {
        (self.edges[i], self.edges[i + 1])
    }

    pub fn max_density(&self) -> f64 {
        self.density.iter().copied().fold(0.0, f64::max)
    }

    /// Total number of binned samples
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Speed distribution of an ideal 2D gas
///
/// ```text
/// f(v) = v / σ² · exp(-v² / (2σ²)),   σ = v_rms / √2
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaxwellBoltzmann2d {
    pub sigma: f64,
}

impl MaxwellBoltzmann2d {
    pub fn new(sigma: f64) -> Self {
        Self { sigma }
    }

    /// Fit from the root-mean-square speed of the sample
    pub fn from_rms(v_rms: f64) -> Self {
        Self::new(v_rms / std::f64::consts::SQRT_2)
    }

    /// Probability density at speed `v`
    pub fn pdf(&self, v: f64) -> f64 {
        if self.sigma <= 0.0 || v < 0.0 {
            return 0.0;
        }
        let s2 = self.sigma * self.sigma;
        v / s2 * (-v * v / (2.0 * s2)).exp()
    }

    /// `points` samples of the curve on `[0, v_max]`
    pub fn curve(&self, v_max: f64, points: usize) -> Vec<(f64, f64)> {
        if points < 2 {
            return vec![(0.0, 0.0)];
        }
        let step = v_max / (points - 1) as f64;
        (0..points)
            .map(|i| {
                let v = i as f64 * step;
                (v, self.pdf(v))
            })
            .collect()
    }
}
