//! Summary statistics of a sample

use std::fmt;

/// Single-pass summary of a non-empty sample
///
/// `std` is the population standard deviation (divide by `n`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub min: f64,
    pub max: f64,
    pub std: f64,
    /// Root mean square, `sqrt(mean(x²))`
    pub rms: f64,
}

impl Summary {
    /// Summarize the finite values of `samples`
    ///
    /// NaN and infinite samples are skipped; `None` when no finite sample
    /// remains.
    ///
    /// # Example
    ///
    /// ```rust
    /// use simviz_rs::analysis::Summary;
    ///
    /// let s = Summary::from_samples(&[0.0, 5.0, 0.0]).unwrap();
    /// assert!((s.mean - 5.0 / 3.0).abs() < 1e-12);
    /// assert_eq!(s.max, 5.0);
    /// ```
    pub fn from_samples(samples: &[f64]) -> Option<Self> {
        let mut count = 0usize;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;

        for &x in samples.iter().filter(|x| x.is_finite()) {
            count += 1;
            sum += x;
            sum_sq += x * x;
            min = min.min(x);
            max = max.max(x);
        }

        if count == 0 {
            return None;
        }

        let n = count as f64;
        let mean = (sum / n).clamp(min, max);
        let variance = samples
            .iter()
            .filter(|x| x.is_finite())
            .map(|x| (x - mean).powi(2))
            .sum::<f64>()
            / n;

        Some(Self {
            count,
            mean,
            min,
            max,
            std: variance.max(0.0).sqrt(),
            rms: (sum_sq / n).sqrt(),
        })
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mean {:.4}, min {:.4}, max {:.4}, std {:.4} (n = {})",
            self.mean, self.min, self.max, self.std, self.count
        )
    }
}
