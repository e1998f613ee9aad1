//! Frame sampling for animations
//!
//! Long traces are decimated with a constant stride so an animation stays
//! within a frame budget.

/// Every `stride`-th frame of a trace, starting at frame 0
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameSampler {
    total: usize,
    stride: usize,
}

impl FrameSampler {
    /// Keep every frame
    pub fn all(total: usize) -> Self {
        Self { total, stride: 1 }
    }

    /// Stride `max(1, total / max_frames)`
    ///
    /// # Example
    ///
    /// ```rust
    /// use simviz_rs::analysis::FrameSampler;
    ///
    /// let sampler = FrameSampler::capped(20_001, 300);
    /// assert_eq!(sampler.stride(), 66);
    /// assert!(sampler.len() <= 304);
    /// ```
    pub fn capped(total: usize, max_frames: usize) -> Self {
        let stride = if max_frames == 0 { 1 } else { (total / max_frames).max(1) };
        Self { total, stride }
    }

    /// Sample only above `threshold` frames, then with stride `total / target`
    pub fn thresholded(total: usize, threshold: usize, target: usize) -> Self {
        if total > threshold && target > 0 {
            Self { total, stride: (total / target).max(1) }
        } else {
            Self::all(total)
        }
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of sampled frames
    pub fn len(&self) -> usize {
        self.total.div_ceil(self.stride)
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Sampled frame indices in increasing order
    pub fn indices(&self) -> impl Iterator<Item = usize> {
        (0..self.total).step_by(self.stride)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_traces_keep_every_frame() {
        let sampler = FrameSampler::capped(50, 300);
        assert_eq!(sampler.stride(), 1);
        assert_eq!(sampler.len(), 50);
        assert_eq!(sampler.indices().count(), 50);
    }

    #[test]
    fn test_capped_stride() {
        let sampler = FrameSampler::capped(1000, 100);
        assert_eq!(sampler.stride(), 10);
        let indices: Vec<usize> = sampler.indices().collect();
        assert_eq!(indices.len(), 100);
        assert_eq!(indices[0], 0);
        assert_eq!(indices[99], 990);
    }

    #[test]
    fn test_len_matches_indices() {
        for total in [0usize, 1, 7, 299, 301, 1001, 20001] {
            let sampler = FrameSampler::capped(total, 300);
            assert_eq!(sampler.len(), sampler.indices().count(), "total = {}", total);
        }
    }

    #[test]
    fn test_thresholded() {
        assert_eq!(FrameSampler::thresholded(500, 500, 300).stride(), 1);
        assert_eq!(FrameSampler::thresholded(1200, 500, 300).stride(), 4);
    }

    #[test]
    fn test_zero_budget_keeps_everything() {
        assert_eq!(FrameSampler::capped(10, 0).stride(), 1);
    }
}
