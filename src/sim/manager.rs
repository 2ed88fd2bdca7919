//! Shared per-frame behavior every manager delegates to
//!
//! Each manager owns one slice of the game (ship, rocks, saucer, text, ...)
//! and rebuilds its actor set from that state every frame. Advancing and
//! edge-wrapping the set is written once here so all actors move and wrap
//! identically.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::actor::{Actor, Body};
use super::ScreenSize;
use crate::config::GameConfig;
use crate::render::Renderer;

/// Read/write context handed to every manager update
pub struct UpdateCtx<'a> {
    pub screen: ScreenSize,
    pub config: &'a GameConfig,
    pub rng: &'a mut Pcg32,
    /// Total simulated ms this session
    pub elapsed_ms: f32,
    /// Player ship position while it is on screen; hostiles aim at this
    pub ship_target: Option<Vec2>,
}

/// One slice of the game: updated then rendered once per frame, in fixed order
pub trait Manager {
    /// Rebuild the actor set from domain state and advance it
    fn update(&mut self, ctx: &mut UpdateCtx<'_>, delta_ms: f32);
    /// Draw the current set; the caller brackets this with push/pop state
    fn render(&self, renderer: &mut dyn Renderer);
}

/// Wrap a body to the opposite edge once it is fully off screen
///
/// The trigger and the landing spot both use the body's own radius, so a
/// shape slides out completely before reappearing and re-enters flush with
/// the edge it wrapped to.
pub fn edge_wrap(body: &mut Body, screen: ScreenSize) {
    if body.position.x > screen.width + body.radius {
        body.position.x = -body.radius;
    } else if body.position.x < -body.radius {
        body.position.x = screen.width + body.radius;
    }
    if body.position.y > screen.height + body.radius {
        body.position.y = -body.radius;
    } else if body.position.y < -body.radius {
        body.position.y = screen.height + body.radius;
    }
}

/// Advance every actor in the set, then keep it on the torus
pub fn advance_all<'a, I>(actors: I, delta_ms: f32, screen: ScreenSize)
where
    I: IntoIterator<Item = &'a mut dyn Actor>,
{
    for actor in actors {
        actor.update(delta_ms);
        edge_wrap(actor.body_mut(), screen);
    }
}

/// Render every visible actor in the set
pub fn render_all<'a, I>(actors: I, renderer: &mut dyn Renderer)
where
    I: IntoIterator<Item = &'a dyn Actor>,
{
    for actor in actors {
        if actor.body().visible {
            actor.render(renderer);
        }
    }
}
