//! The rock field: drifting, spinning, splitting
//!
//! Rocks come in three sizes. Shooting a large one buys two mediums, a
//! medium buys two smalls, and smalls just die. Smaller rocks are faster
//! and worth more.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use std::f32::consts::TAU;

use super::actor::{transform_points, Actor, Body};
use super::manager::{advance_all, render_all, Manager, UpdateCtx};
use super::spawn::{field_position, Hazard};
use super::ScreenSize;
use crate::config::{AsteroidsConfig, RockSizeSpec};
use crate::consts::FIELD_CENTER_CLEARANCE;
use crate::render::Renderer;

/// Rock size class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RockSize {
    Large,
    Medium,
    Small,
}

impl RockSize {
    /// What a hit rock splits into; smalls vaporize
    pub fn split(self) -> Option<RockSize> {
        match self {
            RockSize::Large => Some(RockSize::Medium),
            RockSize::Medium => Some(RockSize::Small),
            RockSize::Small => None,
        }
    }
}

/// One drifting rock
#[derive(Debug, Clone)]
pub struct RockActor {
    body: Body,
    size: RockSize,
    /// Unit-scale outline, scaled by the size radius when drawn
    points: Vec<Vec2>,
    /// Radians per ms
    spin: f32,
}

impl RockActor {
    pub fn size(&self) -> RockSize {
        self.size
    }
}

impl Actor for RockActor {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta_ms: f32) {
        self.body.heading += self.spin * delta_ms;
        self.body.integrate(delta_ms);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let outline =
            transform_points(&self.points, self.body.position, self.body.heading, self.body.radius);
        renderer.draw_closed_shape(&outline);
    }
}

/// Owns every rock on screen
pub struct AsteroidsManager {
    rocks: Vec<RockActor>,
    config: AsteroidsConfig,
}

impl AsteroidsManager {
    pub fn new(config: AsteroidsConfig) -> Self {
        Self {
            rocks: Vec::new(),
            config,
        }
    }

    /// Add a fresh field of large rocks, each clear of screen center
    pub fn create_field(&mut self, count: usize, rng: &mut Pcg32, screen: ScreenSize) {
        for _ in 0..count {
            let position = field_position(rng, screen, FIELD_CENTER_CLEARANCE);
            self.spawn(position, RockSize::Large, rng);
        }
        log::info!("rock field ready: {} rocks", self.rocks.len());
    }

    /// Spawn one rock with a random design, drift, and spin
    pub fn spawn(&mut self, position: Vec2, size: RockSize, rng: &mut Pcg32) {
        if self.config.designs.is_empty() {
            debug_assert!(false, "no rock designs configured");
            log::warn!("no rock designs configured; skipping spawn");
            return;
        }
        let spec = self.size_spec(size);
        let speed = rng.random_range(spec.min_speed..=spec.max_speed);
        let radius = spec.radius;
        let design = rng.random_range(0..self.config.designs.len());
        let points = self.config.designs[design].points.clone();

        let mut body = Body::new(position, radius);
        body.velocity = Vec2::from_angle(rng.random_range(0.0..TAU)) * speed;
        body.heading = rng.random_range(0.0..TAU);
        self.rocks.push(RockActor {
            body,
            size,
            points,
            spin: rng.random_range(-0.001..0.001),
        });
    }

    /// Resolve a hit on the rock at `index`: split it and return its score
    ///
    /// A rock already dead this frame scores nothing, so one rock cannot be
    /// cashed in twice.
    pub fn hit(&mut self, index: usize, rng: &mut Pcg32) -> u32 {
        let Some(rock) = self.rocks.get_mut(index) else {
            debug_assert!(false, "rock index {index} out of range");
            log::warn!("ignoring hit on missing rock {index}");
            return 0;
        };
        if !rock.body.alive() {
            return 0;
        }
        rock.body.collided = true;
        let position = rock.body.position;
        let size = rock.size;
        if let Some(next) = size.split() {
            self.spawn(position, next, rng);
            self.spawn(position, next, rng);
        }
        self.size_spec(size).score
    }

    pub fn clear(&mut self) {
        self.rocks.clear();
    }

    pub fn len(&self) -> usize {
        self.rocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rocks.is_empty()
    }

    pub fn rocks(&self) -> &[RockActor] {
        &self.rocks
    }

    /// Spawn-safety view of every live rock
    pub fn hazards(&self) -> impl Iterator<Item = Hazard> + '_ {
        self.rocks.iter().filter(|r| r.body.alive()).map(|r| Hazard {
            position: r.body.position,
            radius: r.body.radius,
        })
    }

    fn size_spec(&self, size: RockSize) -> &RockSizeSpec {
        match size {
            RockSize::Large => &self.config.sizes.large,
            RockSize::Medium => &self.config.sizes.medium,
            RockSize::Small => &self.config.sizes.small,
        }
    }
}

impl Manager for AsteroidsManager {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>, delta_ms: f32) {
        // Rocks killed last frame leave before the set advances
        self.rocks.retain(|r| r.body.alive());
        advance_all(
            self.rocks.iter_mut().map(|r| r as &mut dyn Actor),
            delta_ms,
            ctx.screen,
        );
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        render_all(self.rocks.iter().map(|r| r as &dyn Actor), renderer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::SeedableRng;

    fn setup() -> (AsteroidsManager, Pcg32) {
        let config = GameConfig::embedded();
        (
            AsteroidsManager::new(config.asteroids.clone()),
            Pcg32::seed_from_u64(3),
        )
    }

    #[test]
    fn test_field_spawns_large_rocks_clear_of_center() {
        let (mut rocks, mut rng) = setup();
        let screen = ScreenSize::new(1000.0, 800.0);
        rocks.create_field(10, &mut rng, screen);
        assert_eq!(rocks.len(), 10);
        for rock in rocks.rocks() {
            assert_eq!(rock.size(), RockSize::Large);
            assert!(rock.body().position.distance(screen.center()) > FIELD_CENTER_CLEARANCE);
            let speed = rock.body().velocity.length();
            assert!(speed > 0.0, "rocks always drift");
        }
    }

    #[test]
    fn test_hit_large_yields_two_mediums() {
        let (mut rocks, mut rng) = setup();
        rocks.spawn(Vec2::new(100.0, 100.0), RockSize::Large, &mut rng);
        let score = rocks.hit(0, &mut rng);
        assert_eq!(score, 20);
        // Original marked dead, two mediums appended at its position
        assert_eq!(rocks.len(), 3);
        assert!(!rocks.rocks()[0].body().alive());
        for fragment in &rocks.rocks()[1..] {
            assert_eq!(fragment.size(), RockSize::Medium);
            assert_eq!(fragment.body().position, Vec2::new(100.0, 100.0));
        }
    }

    #[test]
    fn test_hit_small_leaves_nothing() {
        let (mut rocks, mut rng) = setup();
        rocks.spawn(Vec2::ZERO, RockSize::Small, &mut rng);
        let score = rocks.hit(0, &mut rng);
        assert_eq!(score, 100);
        assert_eq!(rocks.len(), 1);
        assert!(!rocks.rocks()[0].body().alive());
    }

    #[test]
    fn test_double_hit_scores_once() {
        let (mut rocks, mut rng) = setup();
        rocks.spawn(Vec2::ZERO, RockSize::Small, &mut rng);
        assert_eq!(rocks.hit(0, &mut rng), 100);
        assert_eq!(rocks.hit(0, &mut rng), 0);
    }

    #[test]
    fn test_dead_rocks_are_dropped_on_update() {
        let (mut rocks, mut rng) = setup();
        let config = GameConfig::embedded();
        let screen = ScreenSize::new(1000.0, 800.0);
        rocks.spawn(Vec2::ZERO, RockSize::Medium, &mut rng);
        rocks.hit(0, &mut rng);
        assert_eq!(rocks.len(), 3);

        let mut ctx = UpdateCtx {
            screen,
            config: &config,
            rng: &mut rng,
            elapsed_ms: 16.0,
            ship_target: None,
        };
        rocks.update(&mut ctx, 16.0);
        // The dead medium is gone, its two smalls drift on
        assert_eq!(rocks.len(), 2);
        assert!(rocks.rocks().iter().all(|r| r.body().alive()));
    }

    #[test]
    fn test_hazards_skip_dead_rocks() {
        let (mut rocks, mut rng) = setup();
        rocks.spawn(Vec2::ZERO, RockSize::Small, &mut rng);
        rocks.spawn(Vec2::new(500.0, 0.0), RockSize::Small, &mut rng);
        rocks.hit(0, &mut rng);
        assert_eq!(rocks.hazards().count(), 1);
    }
}
