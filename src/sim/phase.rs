//! The attract / play / game-over machine
//!
//! Exactly one phase is active at a time. A phase decides its own successor:
//! `update` hands the next phase kind back to the orchestrator, which
//! performs the swap, so the outgoing phase never runs again in the frame
//! that retired it. Entry setup and exit cleanup both happen inside
//! [`Phase::enter`], at transition time.

use super::collision;
use super::game::World;
use super::ship::ShipTurn;
use super::text::Justify;
use crate::consts::{READY_COUNTDOWN_MS, SAFE_SPAWN_RADIUS};
use crate::input::Action;

/// Text tag for the attract prompts; one tag so each write replaces the last
const TAG_INIT: &str = "init";
/// Text tag for the terminal banner
const TAG_GAME_OVER: &str = "gameover";
const PROMPT_SCALE: f32 = 2.3;

/// Which phase is active, without its transient state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    Attract,
    Play,
    GameOver,
}

/// Active phase plus whatever transient state it owns
#[derive(Debug)]
pub enum Phase {
    Attract {
        /// Ms left on the "PLAYER 1" countdown; `None` until coin-up
        ready_ms: Option<f32>,
    },
    Play,
    GameOver,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Attract { .. } => PhaseKind::Attract,
            Phase::Play => PhaseKind::Play,
            Phase::GameOver => PhaseKind::GameOver,
        }
    }

    /// Build a fresh phase, cleaning up after the one it replaces
    pub fn enter(kind: PhaseKind, world: &mut World) -> Phase {
        match kind {
            PhaseKind::Attract => {
                // Sweep up whatever the previous cycle left behind
                world.text.clear(TAG_GAME_OVER);
                world.saucer.clear();
                world.asteroids.clear();
                let count = world.config.asteroids.initial_count;
                world.asteroids.create_field(count, &mut world.rng, world.screen);
                world.score.reset();
                world.player.create_ship(world.screen);
                world.text.write(
                    TAG_INIT,
                    "1 COIN 1 PLAY",
                    world.screen.width / 2.0,
                    world.screen.height / 4.0 * 3.0,
                    PROMPT_SCALE,
                    Justify::Center,
                );
                Phase::Attract { ready_ms: None }
            }
            PhaseKind::Play => {
                world.text.clear(TAG_INIT);
                world.asteroids.clear();
                let count = world.config.asteroids.initial_count;
                world.asteroids.create_field(count, &mut world.rng, world.screen);
                world.player.create_ship(world.screen);
                // Fields start clear of center, so this lands immediately;
                // the timer path covers a blocked center all the same
                let center = world.screen.center();
                if !world.try_materialize_ship(center, SAFE_SPAWN_RADIUS) {
                    let respawn = world.player.respawn_timer();
                    world.timers.restart(respawn);
                }
                Phase::Play
            }
            PhaseKind::GameOver => {
                world.text.write(
                    TAG_GAME_OVER,
                    "GAME OVER",
                    world.screen.width / 2.0,
                    world.screen.height / 2.0,
                    PROMPT_SCALE,
                    Justify::Center,
                );
                Phase::GameOver
            }
        }
    }

    /// Per-frame phase logic; `Some` asks the orchestrator to transition
    pub fn update(&mut self, world: &mut World, delta_ms: f32) -> Option<PhaseKind> {
        match self {
            Phase::Attract { ready_ms } => {
                if let Some(remaining) = ready_ms {
                    *remaining -= delta_ms;
                    if *remaining <= 0.0 {
                        return Some(PhaseKind::Play);
                    }
                }
                None
            }
            Phase::Play => {
                if world.score.lives <= 0 {
                    return Some(PhaseKind::GameOver);
                }
                let World {
                    player,
                    asteroids,
                    saucer,
                    explosions,
                    score,
                    timers,
                    rng,
                    ..
                } = world;
                collision::resolve_frame(player, asteroids, saucer, explosions, score, timers, rng);
                None
            }
            // Dead end; only the external restart path leaves here
            Phase::GameOver => None,
        }
    }

    /// A logical action went down
    pub fn key_press(&mut self, world: &mut World, action: Action) {
        match self {
            Phase::Attract { ready_ms } => {
                if action == Action::Start && ready_ms.is_none() {
                    world.text.write(
                        TAG_INIT,
                        "PLAYER 1",
                        world.screen.width / 2.0,
                        world.screen.height / 4.0,
                        PROMPT_SCALE,
                        Justify::Center,
                    );
                    *ready_ms = Some(READY_COUNTDOWN_MS);
                }
            }
            Phase::Play => match action {
                Action::TurnLeft => world.player.turn(ShipTurn::Left),
                Action::TurnRight => world.player.turn(ShipTurn::Right),
                Action::Thrust => world.player.engine(true),
                Action::Fire => world.player.fire(true),
                Action::Hyperspace => {
                    let World { player, timers, .. } = world;
                    player.hyperspace(timers);
                }
                Action::Start => {}
            },
            Phase::GameOver => {}
        }
    }

    /// A logical action came back up
    pub fn key_release(&mut self, world: &mut World, action: Action) {
        if let Phase::Play = self {
            match action {
                Action::TurnLeft | Action::TurnRight => world.player.turn(ShipTurn::Stop),
                Action::Thrust => world.player.engine(false),
                Action::Fire => world.player.fire(false),
                Action::Start | Action::Hyperspace => {}
            }
        }
    }
}
