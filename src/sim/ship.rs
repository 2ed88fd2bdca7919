//! Player ship, its projectiles, and the re-entry timers
//!
//! The ship is recreated from scratch for every life: hidden at screen
//! center until the safe-spawn check lets it materialize. While hidden it
//! leaves the actor set entirely, so nothing moves, fires, or collides.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::actor::{transform_points, Actor, Body, Particle};
use super::explosion::ExplosionsManager;
use super::manager::{advance_all, render_all, Manager, UpdateCtx};
use super::score::ScoreManager;
use super::timer::{GameTimer, TimerEvent, TimerHandle, TimerSet};
use super::ScreenSize;
use crate::config::SpaceshipConfig;
use crate::consts::{HYPERSPACE_DELAY_MS, SHIP_RESPAWN_DELAY_MS};
use crate::heading_to_vec;
use crate::render::Renderer;

/// Turn command currently applied to the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipTurn {
    Left,
    Right,
    Stop,
}

impl ShipTurn {
    #[inline]
    fn direction(self) -> f32 {
        match self {
            ShipTurn::Left => -1.0,
            ShipTurn::Right => 1.0,
            ShipTurn::Stop => 0.0,
        }
    }
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct SpaceshipActor {
    body: Body,
    spec: SpaceshipConfig,
    turning: ShipTurn,
    pub thrusting: bool,
    /// Fire button held; actual shots are gated by the rate of fire
    pub firing: bool,
}

impl SpaceshipActor {
    /// Fresh ship, hidden until a safe-spawn check shows it
    pub fn new(spec: &SpaceshipConfig, position: Vec2) -> Self {
        let mut body = Body::new(position, spec.ship.radius);
        body.visible = false;
        Self {
            body,
            spec: spec.clone(),
            turning: ShipTurn::Stop,
            thrusting: false,
            firing: false,
        }
    }

    pub fn heading(&self) -> f32 {
        self.body.heading
    }
}

impl Actor for SpaceshipActor {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta_ms: f32) {
        self.body.heading += self.turning.direction() * self.spec.rotation_vel * delta_ms;
        if self.thrusting {
            self.body.velocity += heading_to_vec(self.body.heading) * self.spec.thrust_vel * delta_ms;
        }
        // Exponential coast-down, scaled to the frame delta
        self.body.velocity *= self.spec.friction.powf(delta_ms);
        self.body.integrate(delta_ms);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let hull = transform_points(&self.spec.ship.points, self.body.position, self.body.heading, 1.0);
        renderer.draw_closed_shape(&hull);
        if self.thrusting {
            let flame =
                transform_points(&self.spec.thrust.points, self.body.position, self.body.heading, 1.0);
            renderer.draw_closed_shape(&flame);
        }
    }
}

/// Owns the ship, its fire, and the two materialization timers
pub struct PlayerShipManager {
    ship: SpaceshipActor,
    projectiles: Vec<Particle>,
    last_shot_ms: f32,
    spec: SpaceshipConfig,
    respawn_timer: TimerHandle,
    hyperspace_timer: TimerHandle,
}

impl PlayerShipManager {
    pub fn new(spec: SpaceshipConfig, screen: ScreenSize, timers: &mut TimerSet) -> Self {
        let respawn_timer = timers.register(GameTimer::new(
            SHIP_RESPAWN_DELAY_MS,
            Some(TimerEvent::RespawnShip),
        ));
        let hyperspace_timer = timers.register(GameTimer::new(
            HYPERSPACE_DELAY_MS,
            Some(TimerEvent::HyperspaceJump),
        ));
        let ship = SpaceshipActor::new(&spec, screen.center());
        Self {
            ship,
            projectiles: Vec::new(),
            last_shot_ms: 0.0,
            spec,
            respawn_timer,
            hyperspace_timer,
        }
    }

    /// Fresh hidden ship parked at screen center
    pub fn create_ship(&mut self, screen: ScreenSize) {
        self.ship = SpaceshipActor::new(&self.spec, screen.center());
    }

    /// Spawn check passed: fresh ship at `position`, on screen right away
    pub fn materialize_at(&mut self, position: Vec2) {
        self.ship = SpaceshipActor::new(&self.spec, position);
        self.ship.body.visible = true;
    }

    pub fn show_ship(&mut self, show: bool) {
        self.ship.body.visible = show;
        if !show {
            self.ship.thrusting = false;
        }
    }

    pub fn ship_visible(&self) -> bool {
        self.ship.body.visible
    }

    /// Ship center while it is on screen
    pub fn ship_position(&self) -> Option<Vec2> {
        self.ship.body.visible.then_some(self.ship.body.position)
    }

    /// Collision circle while the ship is on screen
    pub fn ship_circle(&self) -> Option<(Vec2, f32)> {
        self.ship
            .body
            .visible
            .then_some((self.ship.body.position, self.ship.body.radius))
    }

    pub fn ship(&self) -> &SpaceshipActor {
        &self.ship
    }

    pub fn projectiles(&self) -> &[Particle] {
        &self.projectiles
    }

    pub fn projectiles_mut(&mut self) -> &mut [Particle] {
        &mut self.projectiles
    }

    pub fn turn(&mut self, turn: ShipTurn) {
        self.ship.turning = turn;
    }

    pub fn engine(&mut self, on: bool) {
        self.ship.thrusting = on;
    }

    pub fn fire(&mut self, on: bool) {
        self.ship.firing = on;
    }

    /// Arm the delayed center respawn
    pub fn start_new_life(&mut self, timers: &mut TimerSet) {
        timers.restart(self.respawn_timer);
    }

    /// Vanish now, re-enter somewhere random after the delay
    ///
    /// Ignored while a jump is already pending.
    pub fn hyperspace(&mut self, timers: &mut TimerSet) {
        if !timers.is_expired(self.hyperspace_timer) {
            return;
        }
        self.show_ship(false);
        timers.restart(self.hyperspace_timer);
    }

    /// Fatal contact: burn a life, scatter the hull, schedule re-entry
    pub fn ship_hit(
        &mut self,
        timers: &mut TimerSet,
        explosions: &mut ExplosionsManager,
        score: &mut ScoreManager,
        rng: &mut Pcg32,
    ) {
        if !self.ship.body.visible {
            return;
        }
        score.lives -= 1;
        explosions.ship_debris(&self.spec.ship, &self.ship.body, rng);
        self.show_ship(false);
        if score.lives > 0 {
            self.start_new_life(timers);
        }
        log::info!("ship destroyed, {} lives left", score.lives);
    }

    pub fn respawn_timer(&self) -> TimerHandle {
        self.respawn_timer
    }

    pub fn hyperspace_timer(&self) -> TimerHandle {
        self.hyperspace_timer
    }

    fn spawn_projectile(&mut self) {
        let body = &self.ship.body;
        let dir = heading_to_vec(body.heading);
        let muzzle = body.position + dir * body.radius;
        let velocity = dir * self.spec.projectile_vel + body.velocity;
        self.projectiles
            .push(Particle::new(muzzle, velocity, self.spec.projectile_life));
    }
}

impl Manager for PlayerShipManager {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>, delta_ms: f32) {
        if self.ship.firing
            && self.ship.body.visible
            && ctx.elapsed_ms - self.last_shot_ms > self.spec.rate_of_fire
        {
            self.spawn_projectile();
            self.last_shot_ms = ctx.elapsed_ms;
        }

        // Spent rounds leave the set before it advances
        self.projectiles.retain(|p| p.body().alive());

        let mut actors: Vec<&mut dyn Actor> = Vec::with_capacity(self.projectiles.len() + 1);
        if self.ship.body.visible {
            actors.push(&mut self.ship);
        }
        actors.extend(self.projectiles.iter_mut().map(|p| p as &mut dyn Actor));
        advance_all(actors, delta_ms, ctx.screen);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let mut actors: Vec<&dyn Actor> = Vec::with_capacity(self.projectiles.len() + 1);
        if self.ship.body.visible {
            actors.push(&self.ship);
        }
        actors.extend(self.projectiles.iter().map(|p| p as &dyn Actor));
        render_all(actors, renderer);
    }
}
