//! The actor contract every on-screen entity implements
//!
//! An actor is a position, a velocity, a heading, and a circular extent,
//! plus the two lifecycle flags managers use to drop it: `expired` (aged
//! out on its own) and `collided` (killed by contact).

use glam::Vec2;

use crate::consts::PARTICLE_RADIUS;
use crate::render::Renderer;

/// Spatial and lifecycle state shared by every actor
#[derive(Debug, Clone)]
pub struct Body {
    pub position: Vec2,
    /// Pixels per ms
    pub velocity: Vec2,
    /// Radians; 0 points screen-up
    pub heading: f32,
    /// Circular extent for wrapping and collision (pixels)
    pub radius: f32,
    pub visible: bool,
    /// Aged out; the owning manager drops it next frame
    pub expired: bool,
    /// Killed by contact this frame
    pub collided: bool,
}

impl Body {
    pub fn new(position: Vec2, radius: f32) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            heading: 0.0,
            radius,
            visible: true,
            expired: false,
            collided: false,
        }
    }

    /// Move by velocity over the frame delta
    #[inline]
    pub fn integrate(&mut self, delta_ms: f32) {
        self.position += self.velocity * delta_ms;
    }

    /// Neither expired nor collided
    #[inline]
    pub fn alive(&self) -> bool {
        !self.expired && !self.collided
    }
}

/// Capability interface managers drive actors through
pub trait Actor {
    fn body(&self) -> &Body;
    fn body_mut(&mut self) -> &mut Body;
    /// Advance internal state by a frame delta (ms)
    fn update(&mut self, delta_ms: f32);
    /// Draw; pure read of post-update state
    fn render(&self, renderer: &mut dyn Renderer);
}

/// Rotate, scale, and translate model-space points into screen space
pub fn transform_points(points: &[Vec2], position: Vec2, heading: f32, scale: f32) -> Vec<Vec2> {
    let rotation = Vec2::from_angle(heading);
    points
        .iter()
        .map(|p| rotation.rotate(*p * scale) + position)
        .collect()
}

/// Short-lived drifting point: ship fire, saucer fire, explosion sparks
#[derive(Debug, Clone)]
pub struct Particle {
    body: Body,
    life_ms: f32,
}

impl Particle {
    pub fn new(position: Vec2, velocity: Vec2, life_ms: f32) -> Self {
        let mut body = Body::new(position, PARTICLE_RADIUS);
        body.velocity = velocity;
        Self { body, life_ms }
    }
}

impl Actor for Particle {
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
        self.body.integrate(delta_ms);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        renderer.draw_point(self.body.position);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_transform_identity() {
        let points = [Vec2::new(1.0, 2.0), Vec2::new(-3.0, 4.0)];
        let out = transform_points(&points, Vec2::ZERO, 0.0, 1.0);
        assert_eq!(out, vec![Vec2::new(1.0, 2.0), Vec2::new(-3.0, 4.0)]);
    }

    #[test]
    fn test_transform_rotate_scale_translate() {
        // A quarter turn maps +x onto +y
        let out = transform_points(&[Vec2::X], Vec2::new(10.0, 20.0), FRAC_PI_2, 2.0);
        assert!((out[0].x - 10.0).abs() < 1e-5);
        assert!((out[0].y - 22.0).abs() < 1e-5);
    }

    #[test]
    fn test_particle_expires_after_lifetime() {
        let mut p = Particle::new(Vec2::ZERO, Vec2::new(0.1, 0.0), 100.0);
        p.update(60.0);
        assert!(p.body().alive());
        p.update(60.0);
        assert!(p.body().expired);
        // Position still integrated on the expiring frame
        assert!((p.body().position.x - 12.0).abs() < 1e-5);
    }
}
