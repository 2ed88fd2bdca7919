//! Toro Rocks - a vector-graphics rock-blasting arcade game
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (actors, managers, timers, game phases)
//! - `config`: Data-driven tuning and shape geometry
//! - `input`: Key code to game action mapping
//! - `render`: Drawing seam between the simulation and a host renderer

pub mod config;
pub mod input;
pub mod render;
pub mod sim;

pub use config::GameConfig;
pub use render::{RecordingRenderer, Renderer};
pub use sim::game::Game;
pub use sim::phase::PhaseKind;
pub use sim::ScreenSize;

use glam::Vec2;

/// Game tuning constants that are not data-driven
pub mod consts {
    /// Clearance a fresh life needs around screen center (pixels)
    pub const SAFE_SPAWN_RADIUS: f32 = 200.0;
    /// Clearance a hyperspace re-entry needs (pixels)
    pub const HYPERSPACE_SAFE_RADIUS: f32 = 20.0;
    /// Hyperspace candidates stay this fraction of each dimension in from the edges
    pub const HYPERSPACE_EDGE_MARGIN: f32 = 0.2;

    /// Delay before a new life tries to materialize (ms)
    pub const SHIP_RESPAWN_DELAY_MS: f32 = 3000.0;
    /// Delay before a hyperspace jump re-enters (ms)
    pub const HYPERSPACE_DELAY_MS: f32 = 1000.0;
    /// "PLAYER 1" countdown between coin-up and play (ms)
    pub const READY_COUNTDOWN_MS: f32 = 2000.0;

    /// Initial rocks keep at least this distance from screen center (pixels)
    pub const FIELD_CENTER_CLEARANCE: f32 = 250.0;
    /// Wrap/collision extent of point particles (pixels)
    pub const PARTICLE_RADIUS: f32 = 2.0;
}

/// Unit vector for a heading, where heading 0 points screen-up
#[inline]
pub fn heading_to_vec(heading: f32) -> Vec2 {
    let angle = heading - std::f32::consts::FRAC_PI_2;
    Vec2::new(angle.cos(), angle.sin())
}
