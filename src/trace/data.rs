//! In-memory simulation trace
//!
//! A [`Trace`] is the immutable table read from a simulator output file:
//! one time column plus a `frames × (entities · stride)` state matrix.
//! Per-entity series are obtained by strided column extraction.

use nalgebra::Point2;
use ndarray::{Array2, ArrayView1};

use super::layout::EntityLayout;
use super::metadata::{BoxGeometry, TraceMetadata};

/// Time-indexed numeric table produced by an external simulation
///
/// # Invariants
///
/// - `time.len() == states.nrows()` (one row per frame)
/// - `states.ncols() == n_entities * layout.stride()`, with at least one entity
/// - `time` is monotonically non-decreasing
///
/// The reader enforces these; [`Trace::new`] checks them again in debug builds.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    time: Vec<f64>,
    states: Array2<f64>,
    layout: EntityLayout,
    metadata: TraceMetadata,
}

impl Trace {
    pub(crate) fn new(
        time: Vec<f64>,
        states: Array2<f64>,
        layout: EntityLayout,
        metadata: TraceMetadata,
    ) -> Self {
        debug_assert_eq!(time.len(), states.nrows());
        debug_assert_eq!(states.ncols() % layout.stride(), 0);
        Self { time, states, layout, metadata }
    }

    // ========================================== Queries ==========================================

    /// Number of frames (rows)
    pub fn n_frames(&self) -> usize {
        self.time.len()
    }

    /// Number of tracked entities
    pub fn n_entities(&self) -> usize {
        self.states.ncols() / self.layout.stride()
    }

    pub fn time(&self) -> &[f64] {
        &self.time
    }

    /// State matrix without the time column
    pub fn states(&self) -> &Array2<f64> {
        &self.states
    }

    pub fn layout(&self) -> EntityLayout {
        self.layout
    }

    pub fn metadata(&self) -> &TraceMetadata {
        &self.metadata
    }

    /// Box geometry declared in the header, if any
    pub fn geometry(&self) -> Option<BoxGeometry> {
        self.metadata.geometry()
    }

    /// Last recorded time
    pub fn duration(&self) -> f64 {
        self.time.last().copied().unwrap_or(0.0)
    }

    /// Mean sampling interval, `None` for fewer than two frames or a zero span
    pub fn time_step(&self) -> Option<f64> {
        let n = self.time.len();
        if n < 2 {
            return None;
        }
        let dt = (self.time[n - 1] - self.time[0]) / (n - 1) as f64;
        (dt > 0.0 && dt.is_finite()).then_some(dt)
    }

    /// Column names, from the file header or generated from the layout
    pub fn column_names(&self) -> Vec<String> {
        let expected = 1 + self.states.ncols();
        match self.metadata.columns() {
            Some(columns) if columns.len() == expected => columns.to_vec(),
            _ => self.layout.default_column_names(self.n_entities()),
        }
    }

    // ======================================== Extractions ========================================

    /// View of one component column of one entity
    ///
    /// # Panics
    ///
    /// Panics if `entity >= n_entities()` or `offset >= stride`.
    pub fn component_view(&self, entity: usize, offset: usize) -> ArrayView1<'_, f64> {
        let stride = self.layout.stride();
        assert!(entity < self.n_entities(), "entity {} out of range", entity);
        assert!(offset < stride, "component offset {} out of range", offset);
        self.states.column(entity * stride + offset)
    }

    /// Owned copy of one component column of one entity
    pub fn component(&self, entity: usize, offset: usize) -> Vec<f64> {
        self.component_view(entity, offset).to_vec()
    }

    /// Planar position series `(x, y)` of one entity
    ///
    /// `None` for oscillator traces, which have no planar position.
    pub fn positions(&self, entity: usize) -> Option<(Vec<f64>, Vec<f64>)> {
        let (ix, iy) = self.layout.position_offsets()?;
        Some((self.component(entity, ix), self.component(entity, iy)))
    }

    /// Velocity components of one entity
    ///
    /// - `Kinematic`: `(vx, vy)`
    /// - `Oscillator`: `(v, 0)` so magnitudes reduce to `|v|`
    /// - `Planar`: `None`
    pub fn velocities(&self, entity: usize) -> Option<(Vec<f64>, Vec<f64>)> {
        match self.layout {
            EntityLayout::Kinematic => Some((self.component(entity, 2), self.component(entity, 3))),
            EntityLayout::Oscillator => {
                Some((self.component(entity, 1), vec![0.0; self.n_frames()]))
            }
            EntityLayout::Planar => None,
        }
    }

    /// Displacement `x` of an oscillator
    pub fn displacement(&self, entity: usize) -> Option<Vec<f64>> {
        match self.layout {
            EntityLayout::Oscillator => Some(self.component(entity, 0)),
            _ => None,
        }
    }

    /// Velocity `v` of an oscillator
    pub fn oscillator_velocity(&self, entity: usize) -> Option<Vec<f64>> {
        match self.layout {
            EntityLayout::Oscillator => Some(self.component(entity, 1)),
            _ => None,
        }
    }

    /// Positions of every entity at one frame
    ///
    /// Oscillator frames map to `(x, v)` phase-space points.
    pub fn frame_points(&self, row: usize) -> Vec<Point2<f64>> {
        let stride = self.layout.stride();
        let frame = self.states.row(row);
        (0..self.n_entities())
            .map(|entity| Point2::new(frame[entity * stride], frame[entity * stride + 1]))
            .collect()
    }

    /// Bounding box of all positions (phase-space points for oscillators)
    pub fn extent(&self) -> Extent {
        let stride = self.layout.stride();
        let mut extent = Extent::empty();
        for frame in self.states.rows() {
            for entity in 0..self.n_entities() {
                extent.include(frame[entity * stride], frame[entity * stride + 1]);
            }
        }
        extent
    }
}

/// Axis-aligned bounding box in data coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extent {
    /// Extent that includes nothing yet
    pub fn empty() -> Self {
        Self {
            x_min: f64::INFINITY,
            x_max: f64::NEG_INFINITY,
            y_min: f64::INFINITY,
            y_max: f64::NEG_INFINITY,
        }
    }

    /// Extent of paired samples
    pub fn from_xy(x: &[f64], y: &[f64]) -> Self {
        let mut extent = Self::empty();
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            extent.include(xi, yi);
        }
        extent
    }

    /// Box `[0, W] × [0, H]`
    pub fn from_geometry(geometry: &BoxGeometry) -> Self {
        Self {
            x_min: 0.0,
            x_max: geometry.width,
            y_min: 0.0,
            y_max: geometry.height,
        }
    }

    pub fn include(&mut self, x: f64, y: f64) {
        if x.is_finite() {
            self.x_min = self.x_min.min(x);
            self.x_max = self.x_max.max(x);
        }
        if y.is_finite() {
            self.y_min = self.y_min.min(y);
            self.y_max = self.y_max.max(y);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x_min > self.x_max || self.y_min > self.y_max
    }

    /// Grow each side by `fraction` of the span
    ///
    /// Degenerate spans (a single value) are widened by one unit on each side
    /// so the axis range never collapses.
    pub fn padded(&self, fraction: f64) -> Self {
        if self.is_empty() {
            return Self { x_min: -1.0, x_max: 1.0, y_min: -1.0, y_max: 1.0 };
        }

        let pad = |lo: f64, hi: f64| {
            let span = hi - lo;
            if span > 0.0 {
                (lo - span * fraction, hi + span * fraction)
            } else {
                (lo - 1.0, hi + 1.0)
            }
        };

        let (x_min, x_max) = pad(self.x_min, self.x_max);
        let (y_min, y_max) = pad(self.y_min, self.y_max);
        Self { x_min, x_max, y_min, y_max }
    }

    pub fn x_range(&self) -> std::ops::Range<f64> {
        self.x_min..self.x_max
    }

    pub fn y_range(&self) -> std::ops::Range<f64> {
        self.y_min..self.y_max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn kinematic_trace() -> Trace {
        // 3 frames, 2 particles
        let states = array![
            [0.0, 0.0, 1.0, 0.0, 5.0, 5.0, 0.0, -1.0],
            [1.0, 0.0, 1.0, 0.0, 5.0, 4.0, 0.0, -1.0],
            [2.0, 0.0, 1.0, 0.0, 5.0, 3.0, 0.0, -1.0],
        ];
        Trace::new(vec![0.0, 1.0, 2.0], states, EntityLayout::Kinematic, TraceMetadata::new())
    }

    #[test]
    fn test_shape_queries() {
        let trace = kinematic_trace();
        assert_eq!(trace.n_frames(), 3);
        assert_eq!(trace.n_entities(), 2);
        assert_eq!(trace.duration(), 2.0);
        assert_eq!(trace.time_step(), Some(1.0));
    }

    #[test]
    fn test_strided_extraction() {
        let trace = kinematic_trace();
        let (x, y) = trace.positions(1).unwrap();
        assert_eq!(x, vec![5.0, 5.0, 5.0]);
        assert_eq!(y, vec![5.0, 4.0, 3.0]);

        let (vx, vy) = trace.velocities(0).unwrap();
        assert_eq!(vx, vec![1.0, 1.0, 1.0]);
        assert_eq!(vy, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_frame_points() {
        let trace = kinematic_trace();
        let points = trace.frame_points(2);
        assert_eq!(points, vec![Point2::new(2.0, 0.0), Point2::new(5.0, 3.0)]);
    }

    #[test]
    fn test_oscillator_accessors() {
        let states = array![[1.0, 0.0, 0.5, 0.0], [0.9, -0.1, 0.6, 0.1]];
        let trace = Trace::new(vec![0.0, 0.01], states, EntityLayout::Oscillator, TraceMetadata::new());

        assert_eq!(trace.n_entities(), 2);
        assert!(trace.positions(0).is_none());
        assert_eq!(trace.displacement(1).unwrap(), vec![0.5, 0.6]);
        assert_eq!(trace.oscillator_velocity(0).unwrap(), vec![0.0, -0.1]);
        assert_eq!(trace.column_names(), vec!["t", "x1", "v1", "x2", "v2"]);
    }

    #[test]
    fn test_extent_and_padding() {
        let extent = kinematic_trace().extent();
        assert_eq!(extent.x_min, 0.0);
        assert_eq!(extent.x_max, 5.0);
        assert_eq!(extent.y_min, 0.0);
        assert_eq!(extent.y_max, 5.0);

        let padded = extent.padded(0.1);
        assert!((padded.x_min + 0.5).abs() < 1e-12);
        assert!((padded.x_max - 5.5).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_extent_is_widened() {
        let extent = Extent::from_xy(&[2.0, 2.0], &[3.0, 3.0]).padded(0.1);
        assert_eq!(extent.x_range(), 1.0..3.0);
        assert_eq!(extent.y_range(), 2.0..4.0);
    }

    #[test]
    fn test_single_frame_has_no_time_step() {
        let states = array![[1.0, 2.0]];
        let trace = Trace::new(vec![0.0], states, EntityLayout::Planar, TraceMetadata::new());
        assert_eq!(trace.time_step(), None);
    }
}
