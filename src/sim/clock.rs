//! Frame delta measurement
//!
//! The simulation scales all motion by elapsed milliseconds, so one value
//! matters per frame: the delta since the previous frame. Timestamps are
//! truncated to whole milliseconds before differencing so fractional jitter
//! cannot accumulate into drift.

/// Turns monotonic millisecond timestamps into per-frame deltas
#[derive(Debug, Default, Clone)]
pub struct SimulationClock {
    prev_ms: Option<f64>,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delta in ms since the previous tick
    ///
    /// The first tick returns 0 so a long pause before the loop starts does
    /// not land as one giant step. A timestamp that goes backwards clamps
    /// to 0 rather than running the simulation in reverse.
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let now = now_ms.trunc();
        let delta = match self.prev_ms {
            Some(prev) => (now - prev).max(0.0) as f32,
            None => 0.0,
        };
        self.prev_ms = Some(now);
        delta
    }
}
