//! Session state and the frame loop
//!
//! [`World`] is the one explicit session object: screen geometry, config,
//! RNG, timers, and the six managers, built once per session and passed by
//! reference to everything that needs it. [`Game`] drives it: one `frame`
//! call measures the delta, ticks every timer, runs the active phase, then
//! updates and renders the managers in a fixed order.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::asteroid::AsteroidsManager;
use super::clock::SimulationClock;
use super::explosion::ExplosionsManager;
use super::manager::{Manager, UpdateCtx};
use super::phase::{Phase, PhaseKind};
use super::saucer::SaucerManager;
use super::score::ScoreManager;
use super::ship::PlayerShipManager;
use super::spawn::{position_is_safe, random_screen_position};
use super::text::TextManager;
use super::timer::{TimerEvent, TimerSet};
use super::ScreenSize;
use crate::config::GameConfig;
use crate::consts::{HYPERSPACE_EDGE_MARGIN, HYPERSPACE_SAFE_RADIUS, SAFE_SPAWN_RADIUS};
use crate::input::InputMap;
use crate::render::Renderer;

/// Everything one session owns
pub struct World {
    pub screen: ScreenSize,
    pub config: GameConfig,
    pub rng: Pcg32,
    pub timers: TimerSet,
    /// Total simulated ms this session
    pub elapsed_ms: f32,
    pub player: PlayerShipManager,
    pub asteroids: AsteroidsManager,
    pub saucer: SaucerManager,
    pub explosions: ExplosionsManager,
    pub text: TextManager,
    pub score: ScoreManager,
}

impl World {
    pub fn new(config: GameConfig, screen: ScreenSize, seed: u64) -> Self {
        let mut timers = TimerSet::new();
        let player = PlayerShipManager::new(config.spaceship.clone(), screen, &mut timers);
        let asteroids = AsteroidsManager::new(config.asteroids.clone());
        let saucer = SaucerManager::new(config.saucer.clone(), &mut timers);
        let text = TextManager::new(config.text.clone());
        let score = ScoreManager::new(config.settings.clone(), config.spaceship.ship.clone());
        Self {
            screen,
            config,
            rng: Pcg32::seed_from_u64(seed),
            timers,
            elapsed_ms: 0.0,
            player,
            asteroids,
            saucer,
            explosions: ExplosionsManager::new(),
            text,
            score,
        }
    }

    /// Materialize the ship at `candidate` if every hazard clears `safe_radius`
    ///
    /// Returns whether the ship appeared; an unsafe candidate is the caller's
    /// cue to re-arm its retry timer.
    pub fn try_materialize_ship(&mut self, candidate: Vec2, safe_radius: f32) -> bool {
        let safe = position_is_safe(
            candidate,
            safe_radius,
            self.asteroids.hazards().chain(self.saucer.hazards()),
        );
        if safe {
            self.player.materialize_at(candidate);
        } else {
            log::debug!("spawn at {candidate} blocked inside {safe_radius}px");
        }
        safe
    }

    fn handle_timer_event(&mut self, event: TimerEvent, phase: PhaseKind) {
        match event {
            // New life keeps testing the same screen-center spot
            TimerEvent::RespawnShip => {
                let center = self.screen.center();
                if !self.try_materialize_ship(center, SAFE_SPAWN_RADIUS) {
                    let respawn = self.player.respawn_timer();
                    self.timers.restart(respawn);
                }
            }
            // Hyperspace rolls a fresh candidate every attempt
            TimerEvent::HyperspaceJump => {
                let candidate =
                    random_screen_position(&mut self.rng, self.screen, HYPERSPACE_EDGE_MARGIN);
                if !self.try_materialize_ship(candidate, HYPERSPACE_SAFE_RADIUS) {
                    let hyperspace = self.player.hyperspace_timer();
                    self.timers.restart(hyperspace);
                }
            }
            TimerEvent::SaucerSpawn => {
                // Saucers menace play only; elsewhere the window just re-arms
                if phase == PhaseKind::Play {
                    self.saucer.spawn(&mut self.rng, self.screen);
                }
                let spawn = self.saucer.spawn_timer();
                self.timers.restart(spawn);
            }
        }
    }

    /// Advance the managers in their fixed registration order
    fn update_managers(&mut self, delta_ms: f32) {
        let ship_target = self.player.ship_position();
        let mut ctx = UpdateCtx {
            screen: self.screen,
            config: &self.config,
            rng: &mut self.rng,
            elapsed_ms: self.elapsed_ms,
            ship_target,
        };
        self.player.update(&mut ctx, delta_ms);
        self.asteroids.update(&mut ctx, delta_ms);
        self.explosions.update(&mut ctx, delta_ms);
        self.text.update(&mut ctx, delta_ms);
        self.score.update(&mut ctx, delta_ms);
        self.saucer.update(&mut ctx, delta_ms);
    }

    /// Render the managers in update order, each inside its own state bracket
    fn render_managers(&self, renderer: &mut dyn Renderer) {
        let managers: [&dyn Manager; 6] = [
            &self.player,
            &self.asteroids,
            &self.explosions,
            &self.text,
            &self.score,
            &self.saucer,
        ];
        for manager in managers {
            renderer.push_state();
            manager.render(renderer);
            renderer.pop_state();
        }
    }
}

/// The running game: a session world plus the phase machine and clock
pub struct Game {
    world: World,
    phase: Phase,
    clock: SimulationClock,
    input: InputMap,
}

impl Game {
    pub fn new(config: GameConfig, screen: ScreenSize, seed: u64) -> Self {
        let mut world = World::new(config, screen, seed);
        let phase = Phase::enter(PhaseKind::Attract, &mut world);
        log::info!("session up: {}x{}, seed {seed}", screen.width, screen.height);
        Self {
            world,
            phase,
            clock: SimulationClock::new(),
            input: InputMap::default(),
        }
    }

    pub fn phase(&self) -> PhaseKind {
        self.phase.kind()
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// One full frame: measure the delta, simulate, render
    pub fn frame(&mut self, now_ms: f64, renderer: &mut dyn Renderer) {
        let delta_ms = self.clock.tick(now_ms);
        self.advance(delta_ms);
        self.world.render_managers(renderer);
    }

    /// Simulation half of a frame, for hosts that measure time themselves
    ///
    /// Order per frame: timers, then the active phase (a requested
    /// transition swaps the phase here, and the incoming phase first runs
    /// next frame), then every manager.
    pub fn advance(&mut self, delta_ms: f32) {
        self.world.elapsed_ms += delta_ms;
        let phase_kind = self.phase.kind();
        for event in self.world.timers.update_all(delta_ms) {
            self.world.handle_timer_event(event, phase_kind);
        }
        if let Some(next) = self.phase.update(&mut self.world, delta_ms) {
            log::info!("phase {:?} -> {next:?}", self.phase.kind());
            self.phase = Phase::enter(next, &mut self.world);
        }
        self.world.update_managers(delta_ms);
    }

    /// Raw key down; the active phase picks out the actions it understands
    pub fn key_pressed(&mut self, code: u32) {
        let actions: Vec<_> = self.input.actions(code).collect();
        for action in actions {
            self.phase.key_press(&mut self.world, action);
        }
    }

    /// Raw key up
    pub fn key_released(&mut self, code: u32) {
        let actions: Vec<_> = self.input.actions(code).collect();
        for action in actions {
            self.phase.key_release(&mut self.world, action);
        }
    }

    pub fn input_map_mut(&mut self) -> &mut InputMap {
        &mut self.input
    }

    /// The one way out of game over; ignored in any other phase
    pub fn restart(&mut self) {
        if self.phase.kind() != PhaseKind::GameOver {
            log::warn!("restart ignored in {:?}", self.phase.kind());
            return;
        }
        self.phase = Phase::enter(PhaseKind::Attract, &mut self.world);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingRenderer;
    use crate::sim::asteroid::RockSize;

    fn game() -> Game {
        Game::new(GameConfig::embedded(), ScreenSize::new(1000.0, 800.0), 33)
    }

    #[test]
    fn test_frame_renders_in_balanced_brackets() {
        let mut game = game();
        let mut renderer = RecordingRenderer::new();
        game.frame(0.0, &mut renderer);
        game.frame(16.0, &mut renderer);
        assert!(renderer.balanced());
        // Attract screen shows rocks and the coin prompt
        assert!(renderer.closed_shapes > 0);
        assert!(renderer.segments > 0);
    }

    #[test]
    fn test_saucer_spawn_waits_for_play() {
        let mut game = game();
        let interval = game.world().config.saucer.spawn_interval;
        assert!(game.world().saucer.saucer().is_none());

        // The first window elapses during attract: no saucer, window re-armed
        game.advance(interval + 1.0);
        assert!(game.world().saucer.saucer().is_none());
        assert!(
            !game.world().timers.is_expired(game.world().saucer.spawn_timer()),
            "window re-armed"
        );

        // Into play; the next window produces one
        game.key_pressed(crate::input::keys::SPACE);
        game.advance(crate::consts::READY_COUNTDOWN_MS + 1.0);
        assert_eq!(game.phase(), PhaseKind::Play);
        game.advance(interval + 1.0);
        assert!(game.world().saucer.saucer().is_some());
    }

    #[test]
    fn test_blocked_center_defers_respawn_and_retries() {
        let mut game = game();
        let center = game.world().screen.center();

        // A rock camped on center blocks the new-life spot
        let world = game.world_mut();
        world.asteroids.clear();
        let mut rng = Pcg32::seed_from_u64(1);
        world.asteroids.spawn(center, RockSize::Large, &mut rng);
        world.handle_timer_event(TimerEvent::RespawnShip, PhaseKind::Play);
        assert!(!world.player.ship_visible());
        assert!(!world.timers.is_expired(world.player.respawn_timer()));

        // Clear the hazard; the retry succeeds at the same spot
        world.asteroids.clear();
        world.handle_timer_event(TimerEvent::RespawnShip, PhaseKind::Play);
        assert!(world.player.ship_visible());
        assert_eq!(world.player.ship_position(), Some(center));
    }

    #[test]
    fn test_hyperspace_retry_rolls_a_new_candidate() {
        let mut game = game();
        let world = game.world_mut();
        // Flood the field on a 25px grid: every point on screen is within
        // 17.7px of a rock center, inside the 20px hyperspace clearance
        let mut rng = Pcg32::seed_from_u64(2);
        for x in 0..40 {
            for y in 0..32 {
                world.asteroids.spawn(
                    Vec2::new(x as f32 * 25.0 + 12.5, y as f32 * 25.0 + 12.5),
                    RockSize::Small,
                    &mut rng,
                );
            }
        }
        world.handle_timer_event(TimerEvent::HyperspaceJump, PhaseKind::Play);
        assert!(!world.player.ship_visible());
        assert!(!world.timers.is_expired(world.player.hyperspace_timer()));

        world.asteroids.clear();
        world.handle_timer_event(TimerEvent::HyperspaceJump, PhaseKind::Play);
        assert!(world.player.ship_visible());
        let pos = world.player.ship_position().unwrap();
        // Candidates stay inside the configured edge margin
        assert!(pos.x >= 200.0 && pos.x <= 800.0);
        assert!(pos.y >= 160.0 && pos.y <= 640.0);
    }

    #[test]
    fn test_restart_outside_game_over_is_ignored() {
        let mut game = game();
        game.restart();
        assert_eq!(game.phase(), PhaseKind::Attract);
        // The attract session is untouched and can still coin up
        game.key_pressed(crate::input::keys::SPACE);
        game.advance(crate::consts::READY_COUNTDOWN_MS + 1.0);
        assert_eq!(game.phase(), PhaseKind::Play);
    }

    #[test]
    fn test_elapsed_time_accumulates_for_rate_of_fire() {
        let mut game = game();
        game.advance(100.0);
        game.advance(100.0);
        assert_eq!(game.world().elapsed_ms, 200.0);
    }
}
