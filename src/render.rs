//! Drawing seam between the simulation and a host renderer
//!
//! The simulation never rasterizes; it issues shape calls through [`Renderer`]
//! and a host (canvas, GPU pipeline, plotter) decides what strokes look like.
//! [`RecordingRenderer`] is the headless implementation used by tests and the
//! demo binary.

use glam::Vec2;

/// Immediate-mode shape sink the simulation draws through
///
/// Callers bracket logically grouped draws with `push_state` / `pop_state`
/// so stroke or transform changes cannot leak between groups.
pub trait Renderer {
    /// Save the current draw state
    fn push_state(&mut self);
    /// Restore the most recently saved draw state
    fn pop_state(&mut self);
    /// Stroke a closed polygon through `points` in order (screen space)
    fn draw_closed_shape(&mut self, points: &[Vec2]);
    /// Stroke individual `points`-index pairs (screen space)
    fn draw_segments(&mut self, points: &[Vec2], segments: &[[usize; 2]]);
    /// Plot a single point (screen space)
    fn draw_point(&mut self, pos: Vec2);
}

/// Counts draw calls instead of rasterizing
#[derive(Debug, Default, Clone)]
pub struct RecordingRenderer {
    pub closed_shapes: usize,
    pub segments: usize,
    pub points: usize,
    depth: usize,
    underflows: usize,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total draw calls recorded so far
    pub fn calls(&self) -> usize {
        self.closed_shapes + self.segments + self.points
    }

    /// True when every push has been matched by a pop
    pub fn balanced(&self) -> bool {
        self.depth == 0 && self.underflows == 0
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl Renderer for RecordingRenderer {
    fn push_state(&mut self) {
        self.depth += 1;
    }

    fn pop_state(&mut self) {
        if self.depth == 0 {
            self.underflows += 1;
            return;
        }
        self.depth -= 1;
    }

    fn draw_closed_shape(&mut self, points: &[Vec2]) {
        debug_assert!(points.len() >= 3, "closed shape needs at least 3 points");
        self.closed_shapes += 1;
    }

    fn draw_segments(&mut self, points: &[Vec2], segments: &[[usize; 2]]) {
        debug_assert!(
            segments.iter().all(|[a, b]| *a < points.len() && *b < points.len()),
            "segment indexes off the point list"
        );
        self.segments += segments.len();
    }

    fn draw_point(&mut self, _pos: Vec2) {
        self.points += 1;
    }
}
