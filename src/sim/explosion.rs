//! Transient wreckage: spark bursts and drifting hull debris
//!
//! Rocks and saucers die in a ring of sparks. The ship dies better: its
//! hull outline breaks into individual edges that tumble away, a longer
//! show for a bigger loss. Everything here ages out on its own and never
//! collides with anything.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;
use std::ops::Range;

use super::actor::{Actor, Body, Particle};
use super::manager::{advance_all, render_all, Manager, UpdateCtx};
use crate::config::ShapeModel;
use crate::render::Renderer;

/// Sparks per burst
const BURST_SPARKS: usize = 8;
/// Spark speed range (pixels per ms)
const SPARK_SPEED: Range<f32> = 0.02..0.08;
/// Spark lifetime range (ms)
const SPARK_LIFE: Range<f32> = 400.0..900.0;
/// Debris lifetime range (ms); outlasts any spark
const DEBRIS_LIFE: Range<f32> = 1800.0..2600.0;
/// Outward drift speed range for debris (pixels per ms)
const DEBRIS_DRIFT: Range<f32> = 0.02..0.05;

/// One hull edge tumbling away from a destroyed ship
#[derive(Debug, Clone)]
pub struct DebrisActor {
    body: Body,
    /// Model-space segment endpoints, relative to the body position
    a: Vec2,
    b: Vec2,
    /// Radians per ms
    spin: f32,
    life_ms: f32,
}

impl Actor for DebrisActor {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta_ms: f32) {
        self.life_ms -= delta_ms;
        if self.life_ms <= 0.0 {
            self.body.expired = true;
        }
        self.body.heading += self.spin * delta_ms;
        self.body.integrate(delta_ms);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let rotation = Vec2::from_angle(self.body.heading);
        let points = [
            rotation.rotate(self.a) + self.body.position,
            rotation.rotate(self.b) + self.body.position,
        ];
        renderer.draw_segments(&points, &[[0, 1]]);
    }
}

/// Owns every spark and debris piece on screen
#[derive(Default)]
pub struct ExplosionsManager {
    sparks: Vec<Particle>,
    debris: Vec<DebrisActor>,
}

impl ExplosionsManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ring of sparks at a destroyed rock or saucer
    pub fn burst(&mut self, position: Vec2, rng: &mut Pcg32) {
        for _ in 0..BURST_SPARKS {
            let direction = Vec2::from_angle(rng.random_range(0.0..TAU));
            let speed = rng.random_range(SPARK_SPEED);
            let life = rng.random_range(SPARK_LIFE);
            self.sparks.push(Particle::new(position, direction * speed, life));
        }
    }

    /// Break a ship outline into tumbling edges at the hull's last state
    pub fn ship_debris(&mut self, model: &ShapeModel, hull: &Body, rng: &mut Pcg32) {
        let n = model.points.len();
        if n < 2 {
            debug_assert!(false, "hull outline needs at least 2 points");
            log::warn!("skipping debris for degenerate hull");
            return;
        }
        for i in 0..n {
            let a = model.points[i];
            let b = model.points[(i + 1) % n];
            let extent = a.length().max(b.length());

            // Edges push outward from the hull center and keep some momentum
            let outward = ((a + b) / 2.0).normalize_or_zero();
            let drift = outward * rng.random_range(DEBRIS_DRIFT);

            let mut body = Body::new(hull.position, extent);
            body.velocity = drift + hull.velocity * 0.5;
            body.heading = hull.heading;
            self.debris.push(DebrisActor {
                body,
                a,
                b,
                spin: rng.random_range(-0.002..0.002),
                life_ms: rng.random_range(DEBRIS_LIFE),
            });
        }
    }

    pub fn spark_count(&self) -> usize {
        self.sparks.len()
    }

    pub fn debris_count(&self) -> usize {
        self.debris.len()
    }
}

impl Manager for ExplosionsManager {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>, delta_ms: f32) {
        self.sparks.retain(|s| s.body().alive());
        self.debris.retain(|d| d.body.alive());

        let mut actors: Vec<&mut dyn Actor> =
            Vec::with_capacity(self.sparks.len() + self.debris.len());
        actors.extend(self.sparks.iter_mut().map(|s| s as &mut dyn Actor));
        actors.extend(self.debris.iter_mut().map(|d| d as &mut dyn Actor));
        advance_all(actors, delta_ms, ctx.screen);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let mut actors: Vec<&dyn Actor> = Vec::with_capacity(self.sparks.len() + self.debris.len());
        actors.extend(self.sparks.iter().map(|s| s as &dyn Actor));
        actors.extend(self.debris.iter().map(|d| d as &dyn Actor));
        render_all(actors, renderer);
    }
}
