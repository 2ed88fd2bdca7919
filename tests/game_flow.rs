//! End-to-end session flow through the public API
//!
//! Drives a whole session with synthetic frame timestamps and key codes:
//! attract, coin-up, play, three deaths, game over, restart.

use toro_rocks::input::keys;
use toro_rocks::sim::World;
use toro_rocks::{Game, GameConfig, PhaseKind, RecordingRenderer, ScreenSize};

const FRAME_MS: f64 = 16.0;
const READY_MS: f64 = 2000.0;
const RESPAWN_MS: f64 = 3000.0;

struct Session {
    game: Game,
    renderer: RecordingRenderer,
    now: f64,
}

impl Session {
    fn new() -> Self {
        let game = Game::new(GameConfig::embedded(), ScreenSize::new(1000.0, 800.0), 7);
        let mut session = Self {
            game,
            renderer: RecordingRenderer::new(),
            now: 0.0,
        };
        // Baseline tick so the next frame measures a real delta
        session.game.frame(0.0, &mut session.renderer);
        session
    }

    fn run_ms(&mut self, ms: f64) {
        let end = self.now + ms;
        while self.now < end {
            self.now += FRAME_MS;
            self.game.frame(self.now, &mut self.renderer);
        }
    }

    /// Destroy the visible ship directly, with the field swept clear so the
    /// center respawn cannot be blocked
    fn hit_ship(&mut self) {
        let world = self.game.world_mut();
        world.asteroids.clear();
        world.saucer.clear();
        let World {
            player,
            timers,
            explosions,
            score,
            rng,
            ..
        } = world;
        assert!(player.ship_visible(), "hit needs a ship on screen");
        player.ship_hit(timers, explosions, score, rng);
    }

    fn to_play(&mut self) {
        self.game.key_pressed(keys::SPACE);
        self.game.key_released(keys::SPACE);
        self.run_ms(READY_MS + 200.0);
        assert_eq!(self.game.phase(), PhaseKind::Play);
    }

    fn to_game_over(&mut self) {
        self.to_play();
        for _ in 0..3 {
            self.hit_ship();
            self.run_ms(RESPAWN_MS + 200.0);
        }
        assert_eq!(self.game.phase(), PhaseKind::GameOver);
    }
}

#[test]
fn test_full_session_attract_play_game_over() {
    let mut session = Session::new();
    let config = GameConfig::embedded();

    assert_eq!(session.game.phase(), PhaseKind::Attract);
    assert_eq!(session.game.world().score.score, 0);
    assert_eq!(session.game.world().score.lives, config.settings.lives);
    assert_eq!(
        session.game.world().asteroids.len(),
        config.asteroids.initial_count
    );

    // Coin-up shows the ready message but does not start play yet
    session.game.key_pressed(keys::SPACE);
    session.game.key_released(keys::SPACE);
    session.run_ms(100.0);
    assert_eq!(session.game.phase(), PhaseKind::Attract);

    // Only after the ready countdown does play begin, ship and field in place
    session.run_ms(READY_MS + 100.0);
    assert_eq!(session.game.phase(), PhaseKind::Play);
    assert!(session.game.world().player.ship_visible());
    assert_eq!(
        session.game.world().asteroids.len(),
        config.asteroids.initial_count
    );

    // Three deaths end the session; the phase turns on the following update
    for _ in 0..2 {
        session.hit_ship();
        session.run_ms(RESPAWN_MS + 200.0);
        assert_eq!(session.game.phase(), PhaseKind::Play);
        assert!(session.game.world().player.ship_visible(), "respawned");
    }
    session.hit_ship();
    assert_eq!(session.game.world().score.lives, 0);
    session.run_ms(FRAME_MS * 2.0);
    assert_eq!(session.game.phase(), PhaseKind::GameOver);
}

#[test]
fn test_last_death_does_not_respawn() {
    let mut session = Session::new();
    session.to_game_over();
    // No pending respawn; the dead ship stays gone
    session.run_ms(RESPAWN_MS * 2.0);
    assert!(!session.game.world().player.ship_visible());
    assert_eq!(session.game.phase(), PhaseKind::GameOver);
}

#[test]
fn test_game_over_ignores_input_until_restart() {
    let mut session = Session::new();
    session.to_game_over();

    // Input does nothing here
    session.game.key_pressed(keys::SPACE);
    session.run_ms(READY_MS * 2.0);
    assert_eq!(session.game.phase(), PhaseKind::GameOver);

    // The designated restart path re-enters attract with a fresh session
    session.game.restart();
    assert_eq!(session.game.phase(), PhaseKind::Attract);
    let world = session.game.world();
    assert_eq!(world.score.score, 0);
    assert_eq!(world.score.lives, GameConfig::embedded().settings.lives);
    assert_eq!(world.asteroids.len(), GameConfig::embedded().asteroids.initial_count);
    assert!(!world.text.has("gameover"));

    // And the fresh attract coins up into play again
    session.game.key_pressed(keys::SPACE);
    session.game.key_released(keys::SPACE);
    session.run_ms(READY_MS + 100.0);
    assert_eq!(session.game.phase(), PhaseKind::Play);
}

#[test]
fn test_restart_outside_game_over_is_a_stale_transition() {
    let mut session = Session::new();
    session.game.restart();
    assert_eq!(session.game.phase(), PhaseKind::Attract);

    session.to_play();
    session.game.restart();
    assert_eq!(session.game.phase(), PhaseKind::Play);
}

#[test]
fn test_render_state_stays_balanced_across_a_session() {
    let mut session = Session::new();
    session.to_game_over();
    session.game.restart();
    session.run_ms(1000.0);
    assert!(session.renderer.balanced());
    assert!(session.renderer.calls() > 0);
}
