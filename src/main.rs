//! Headless demo driver
//!
//! Runs a scripted session against the recording renderer: coin up, a burst
//! of flying and shooting, one hyperspace jump. Useful for watching the log
//! of a whole session without a display attached.
//!
//! Usage: `toro-rocks [config.json] [seed]`

use std::env;
use std::path::PathBuf;

use toro_rocks::input::keys;
use toro_rocks::{Game, GameConfig, RecordingRenderer, ScreenSize};

const FRAME_MS: f64 = 16.0;
const SESSION_MS: f64 = 30_000.0;

/// (at ms, key down?, key code)
const SCRIPT: &[(f64, bool, u32)] = &[
    (500.0, true, keys::SPACE),
    (620.0, false, keys::SPACE),
    (3000.0, true, keys::UP_ARROW),
    (4200.0, false, keys::UP_ARROW),
    (4300.0, true, keys::RIGHT_ARROW),
    (4800.0, false, keys::RIGHT_ARROW),
    (5000.0, true, keys::SPACE),
    (20_000.0, false, keys::SPACE),
    (21_000.0, true, keys::RIGHT_CTRL),
    (21_100.0, false, keys::RIGHT_CTRL),
];

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config_path = env::args().nth(1).map(PathBuf::from);
    let config = GameConfig::load_or_embedded(config_path.as_deref());
    let seed: u64 = env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0xA57E_401D);

    let mut game = Game::new(config, ScreenSize::new(1280.0, 960.0), seed);
    let mut renderer = RecordingRenderer::new();

    let mut next_event = 0;
    let mut now = 0.0;
    while now <= SESSION_MS {
        while next_event < SCRIPT.len() && SCRIPT[next_event].0 <= now {
            let (_, down, code) = SCRIPT[next_event];
            if down {
                game.key_pressed(code);
            } else {
                game.key_released(code);
            }
            next_event += 1;
        }
        game.frame(now, &mut renderer);
        now += FRAME_MS;
    }

    log::info!(
        "session over in {:?}: score {}, lives {}, {} rocks left, {} draw calls",
        game.phase(),
        game.world().score.score,
        game.world().score.lives,
        game.world().asteroids.len(),
        renderer.calls()
    );
}
