//! The flying saucer: a periodic hunter
//!
//! At most one saucer is live at a time. It cruises in from a side edge,
//! takes aimed potshots at the ship, and leaves on its own if nobody stops
//! it. Its shots menace only the player.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::actor::{transform_points, Actor, Body, Particle};
use super::manager::{advance_all, render_all, Manager, UpdateCtx};
use super::spawn::Hazard;
use super::timer::{GameTimer, TimerEvent, TimerHandle, TimerSet};
use super::ScreenSize;
use crate::config::SaucerConfig;
use crate::render::Renderer;

/// Aim error applied to every shot (radians, each side)
const SHOT_SPREAD: f32 = 0.15;
/// Saucers enter between these fractions of the screen height
const ENTRY_BAND_TOP: f32 = 0.15;
const ENTRY_BAND_BOTTOM: f32 = 0.85;

/// One live saucer
#[derive(Debug, Clone)]
pub struct SaucerActor {
    body: Body,
    points: Vec<Vec2>,
    /// Ms left before it gives up and leaves
    life_ms: f32,
    /// Ms until the next aimed shot
    fire_countdown_ms: f32,
}

impl Actor for SaucerActor {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta_ms: f32) {
        self.life_ms -= delta_ms;
        if self.life_ms <= 0.0 {
            // Leaves quietly; only gunfire earns an explosion
            self.body.expired = true;
        }
        self.body.integrate(delta_ms);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let outline = transform_points(&self.points, self.body.position, 0.0, 1.0);
        renderer.draw_closed_shape(&outline);
    }
}

/// Owns the saucer, its shots, and the spawn-window timer
pub struct SaucerManager {
    saucer: Option<SaucerActor>,
    shots: Vec<Particle>,
    config: SaucerConfig,
    spawn_timer: TimerHandle,
}

impl SaucerManager {
    /// Registers and arms the spawn window; it re-arms after every expiry
    pub fn new(config: SaucerConfig, timers: &mut TimerSet) -> Self {
        let spawn_timer = timers.register(GameTimer::new(
            config.spawn_interval,
            Some(TimerEvent::SaucerSpawn),
        ));
        timers.restart(spawn_timer);
        Self {
            saucer: None,
            shots: Vec::new(),
            config,
            spawn_timer,
        }
    }

    /// Enter from a random side edge; no-op while one is already live
    pub fn spawn(&mut self, rng: &mut Pcg32, screen: ScreenSize) {
        if self.saucer.is_some() {
            return;
        }
        let radius = self.config.model.radius;
        let y =
            rng.random_range(screen.height * ENTRY_BAND_TOP..=screen.height * ENTRY_BAND_BOTTOM);
        let (x, vx) = if rng.random_bool(0.5) {
            (-radius, self.config.speed)
        } else {
            (screen.width + radius, -self.config.speed)
        };
        let mut body = Body::new(Vec2::new(x, y), radius);
        body.velocity = Vec2::new(vx, 0.0);
        self.saucer = Some(SaucerActor {
            body,
            points: self.config.model.points.clone(),
            life_ms: self.config.lifetime,
            fire_countdown_ms: self.config.fire_interval,
        });
        log::info!("saucer on screen");
    }

    /// Shot down: returns the score value, once
    pub fn destroy(&mut self) -> u32 {
        match &mut self.saucer {
            Some(saucer) if saucer.body.alive() => {
                saucer.body.collided = true;
                log::info!("saucer destroyed");
                self.config.score
            }
            _ => 0,
        }
    }

    /// Drop the saucer and every shot in flight
    pub fn clear(&mut self) {
        self.saucer = None;
        self.shots.clear();
    }

    pub fn saucer(&self) -> Option<&SaucerActor> {
        self.saucer.as_ref()
    }

    /// Collision circle while a saucer is live
    pub fn saucer_circle(&self) -> Option<(Vec2, f32)> {
        self.saucer
            .as_ref()
            .filter(|s| s.body.alive())
            .map(|s| (s.body.position, s.body.radius))
    }

    pub fn shots(&self) -> &[Particle] {
        &self.shots
    }

    pub fn shots_mut(&mut self) -> &mut [Particle] {
        &mut self.shots
    }

    pub fn spawn_timer(&self) -> TimerHandle {
        self.spawn_timer
    }

    /// Spawn-safety view: the saucer and every shot in flight
    pub fn hazards(&self) -> impl Iterator<Item = Hazard> + '_ {
        self.saucer
            .iter()
            .filter(|s| s.body.alive())
            .map(|s| Hazard {
                position: s.body.position,
                radius: s.body.radius,
            })
            .chain(self.shots.iter().filter(|s| s.body().alive()).map(|s| Hazard {
                position: s.body().position,
                radius: s.body().radius,
            }))
    }
}

impl Manager for SaucerManager {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>, delta_ms: f32) {
        // Casualties and the aged-out leave before the set advances
        if self.saucer.as_ref().is_some_and(|s| !s.body.alive()) {
            self.saucer = None;
        }
        self.shots.retain(|s| s.body().alive());

        // Aimed fire; without a visible ship the trigger stays idle
        if let Some(saucer) = &mut self.saucer {
            saucer.fire_countdown_ms -= delta_ms;
            if saucer.fire_countdown_ms <= 0.0 {
                saucer.fire_countdown_ms = self.config.fire_interval;
                if let Some(target) = ctx.ship_target {
                    let aim = (target - saucer.body.position).to_angle();
                    let dir = Vec2::from_angle(aim + ctx.rng.random_range(-SHOT_SPREAD..SHOT_SPREAD));
                    let muzzle = saucer.body.position + dir * saucer.body.radius;
                    self.shots.push(Particle::new(
                        muzzle,
                        dir * self.config.shot_vel,
                        self.config.shot_life,
                    ));
                }
            }
        }

        let mut actors: Vec<&mut dyn Actor> = Vec::with_capacity(self.shots.len() + 1);
        if let Some(saucer) = &mut self.saucer {
            actors.push(saucer as &mut dyn Actor);
        }
        actors.extend(self.shots.iter_mut().map(|s| s as &mut dyn Actor));
        advance_all(actors, delta_ms, ctx.screen);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let mut actors: Vec<&dyn Actor> = Vec::with_capacity(self.shots.len() + 1);
        if let Some(saucer) = &self.saucer {
            actors.push(saucer as &dyn Actor);
        }
        actors.extend(self.shots.iter().map(|s| s as &dyn Actor));
        render_all(actors, renderer);
    }
}
