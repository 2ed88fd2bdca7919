//! Per-frame contact resolution
//!
//! Everything collides as circles. One pass per frame settles all contact:
//! player fire against rocks and the saucer, then everything hostile against
//! the ship. Managers mark casualties with `collided` and drop them on their
//! next update; nothing is removed mid-pass.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::actor::Actor;
use super::asteroid::AsteroidsManager;
use super::explosion::ExplosionsManager;
use super::saucer::SaucerManager;
use super::score::ScoreManager;
use super::ship::PlayerShipManager;
use super::timer::TimerSet;

/// True iff two circles overlap; touching exactly does not count
#[inline]
pub fn circles_overlap(a: Vec2, a_radius: f32, b: Vec2, b_radius: f32) -> bool {
    a.distance_squared(b) < (a_radius + b_radius) * (a_radius + b_radius)
}

/// Settle every contact for this frame
///
/// Rock fragments spawned by a hit only append to the rock list, so the
/// index snapshot taken up front stays valid for the whole pass.
pub fn resolve_frame(
    player: &mut PlayerShipManager,
    asteroids: &mut AsteroidsManager,
    saucer: &mut SaucerManager,
    explosions: &mut ExplosionsManager,
    score: &mut ScoreManager,
    timers: &mut TimerSet,
    rng: &mut Pcg32,
) {
    let rocks: Vec<(usize, Vec2, f32)> = asteroids
        .rocks()
        .iter()
        .enumerate()
        .filter(|(_, r)| r.body().alive())
        .map(|(i, r)| (i, r.body().position, r.body().radius))
        .collect();

    // Player fire vs rocks
    for (index, position, radius) in &rocks {
        for shot in player.projectiles_mut() {
            let body = shot.body_mut();
            if body.alive() && circles_overlap(body.position, body.radius, *position, *radius) {
                body.collided = true;
                let points = asteroids.hit(*index, rng);
                if points > 0 {
                    score.add(points);
                    explosions.burst(*position, rng);
                }
                break;
            }
        }
    }

    // Player fire vs the saucer
    if let Some((s_pos, s_radius)) = saucer.saucer_circle() {
        for shot in player.projectiles_mut() {
            let body = shot.body_mut();
            if body.alive() && circles_overlap(body.position, body.radius, s_pos, s_radius) {
                body.collided = true;
                score.add(saucer.destroy());
                explosions.burst(s_pos, rng);
                break;
            }
        }
    }

    // Everything hostile vs the ship; the first contact ends the life
    let Some((ship_pos, ship_radius)) = player.ship_circle() else {
        return;
    };
    let mut fatal = false;

    for (index, position, radius) in &rocks {
        if circles_overlap(ship_pos, ship_radius, *position, *radius) {
            // Ramming still splits the rock and scores it
            let points = asteroids.hit(*index, rng);
            if points > 0 {
                score.add(points);
                explosions.burst(*position, rng);
            }
            fatal = true;
            break;
        }
    }

    if !fatal {
        if let Some((s_pos, s_radius)) = saucer.saucer_circle() {
            if circles_overlap(ship_pos, ship_radius, s_pos, s_radius) {
                score.add(saucer.destroy());
                explosions.burst(s_pos, rng);
                fatal = true;
            }
        }
    }

    if !fatal {
        for shot in saucer.shots_mut() {
            let body = shot.body_mut();
            if body.alive() && circles_overlap(body.position, body.radius, ship_pos, ship_radius) {
                body.collided = true;
                fatal = true;
                break;
            }
        }
    }

    if fatal {
        player.ship_hit(timers, explosions, score, rng);
    }
}
