//! Frequency spectrum of a uniformly sampled signal
//!
//! The mean is removed before transforming so the DC bin does not dominate
//! the plot. Only the non-negative half of the spectrum is kept (real-FFT
//! convention): `floor(n/2) + 1` bins.

use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

use super::error::{AnalysisError, AnalysisResult};

/// One-sided amplitude spectrum
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    /// Bin frequencies, `k / (n · dt)`
    pub frequencies: Vec<f64>,

    /// Magnitude `|X_k|` of each bin
    pub amplitudes: Vec<f64>,
}

impl Spectrum {
    /// Transform `signal` sampled every `dt`
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::EmptySignal`] for an empty signal
    /// - [`AnalysisError::InvalidTimeStep`] if `dt` is not strictly positive
    ///
    /// # Example
    ///
    /// ```rust
    /// use simviz_rs::analysis::Spectrum;
    ///
    /// let dt = 0.01;
    /// let signal: Vec<f64> = (0..1000)
    ///     .map(|i| (2.0 * std::f64::consts::PI * 5.0 * i as f64 * dt).sin())
    ///     .collect();
    ///
    /// let spectrum = Spectrum::compute(&signal, dt).unwrap();
    /// assert_eq!(spectrum.len(), 501);
    /// assert!((spectrum.dominant_frequency().unwrap() - 5.0).abs() < 0.1);
    /// ```
    pub fn compute(signal: &[f64], dt: f64) -> AnalysisResult<Self> {
        if signal.is_empty() {
            return Err(AnalysisError::EmptySignal);
        }
        if !(dt > 0.0 && dt.is_finite()) {
            return Err(AnalysisError::InvalidTimeStep(dt));
        }

        let n = signal.len();
        let mean = signal.iter().sum::<f64>() / n as f64;

        let mut buffer: Vec<Complex<f64>> = signal
            .iter()
            .map(|x| Complex::new(x - mean, 0.0))
            .collect();

        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(n);
        fft.process(&mut buffer);

        let bins = n / 2 + 1;
        let frequencies = (0..bins).map(|k| k as f64 / (n as f64 * dt)).collect();
        let amplitudes = buffer.iter().take(bins).map(|c| c.norm()).collect();

        Ok(Self { frequencies, amplitudes })
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// Frequency of the strongest non-DC bin
    pub fn dominant_frequency(&self) -> Option<f64> {
        self.amplitudes
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(k, _)| self.frequencies[k])
    }

    /// Largest amplitude, DC included
    pub fn peak_amplitude(&self) -> f64 {
        self.amplitudes.iter().copied().fold(0.0, f64::max)
    }

    /// Nyquist frequency, the last bin
    pub fn max_frequency(&self) -> f64 {
        self.frequencies.last().copied().unwrap_or(0.0)
    }
}
