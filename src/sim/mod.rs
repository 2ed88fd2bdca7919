//! Frame-driven game simulation
//!
//! All gameplay logic lives here. The module has no platform dependencies:
//! - Time arrives as per-frame millisecond deltas
//! - Randomness comes from a seeded RNG in [`game::World`]
//! - Drawing goes through the [`crate::render::Renderer`] seam
//!
//! Everything on screen is an [`actor::Actor`] owned by one of six managers;
//! [`game::Game`] advances the managers in a fixed order each frame and the
//! [`phase::Phase`] machine decides what a frame means.

pub mod actor;
pub mod asteroid;
pub mod clock;
pub mod collision;
pub mod explosion;
pub mod game;
pub mod manager;
pub mod phase;
pub mod saucer;
pub mod score;
pub mod ship;
pub mod spawn;
pub mod text;
pub mod timer;

pub use clock::SimulationClock;
pub use game::{Game, World};
pub use phase::{Phase, PhaseKind};
pub use timer::{GameTimer, TimerEvent, TimerHandle, TimerSet};

use glam::Vec2;

/// Fixed screen geometry in pixels; every manager reads it for wrap and spawn math
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenSize {
    pub width: f32,
    pub height: f32,
}

impl ScreenSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}
