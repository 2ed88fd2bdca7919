//! Spawn safety and random spawn positions
//!
//! Materializing the ship on top of a rock is an instant unearned death, so
//! every materialization (new life or hyperspace re-entry) first checks the
//! candidate position against everything currently dangerous. An unsafe
//! check is not an error; the caller re-arms its timer and tries later.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::ScreenSize;

/// Something a fresh ship must keep its distance from
#[derive(Debug, Clone, Copy)]
pub struct Hazard {
    pub position: Vec2,
    /// The hazard's own circular extent (pixels)
    pub radius: f32,
}

/// True iff every hazard center is strictly farther than `safe_radius`
///
/// An empty hazard set is trivially safe.
pub fn position_is_safe<I>(candidate: Vec2, safe_radius: f32, hazards: I) -> bool
where
    I: IntoIterator<Item = Hazard>,
{
    hazards
        .into_iter()
        .all(|hazard| candidate.distance(hazard.position) > safe_radius)
}

/// Uniform position at least `margin_pct` of each dimension in from the edges
///
/// `margin_pct` 0.0 covers the whole screen; 0.2 keeps the middle 60%.
pub fn random_screen_position(rng: &mut Pcg32, screen: ScreenSize, margin_pct: f32) -> Vec2 {
    let x_margin = screen.width * margin_pct;
    let y_margin = screen.height * margin_pct;
    Vec2::new(
        rng.random_range(x_margin..=screen.width - x_margin),
        rng.random_range(y_margin..=screen.height - y_margin),
    )
}

/// Random field position that keeps `clearance` pixels from screen center
///
/// Rejection-samples so the ship's center materialization spot starts clear.
pub fn field_position(rng: &mut Pcg32, screen: ScreenSize, clearance: f32) -> Vec2 {
    let center = screen.center();
    for _ in 0..64 {
        let candidate = random_screen_position(rng, screen, 0.0);
        if candidate.distance(center) > clearance {
            return candidate;
        }
    }
    // Only reachable when the clearance swallows the whole screen
    log::warn!("no field position clears screen center; using a corner");
    Vec2::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn hazards_at(distances: &[f32]) -> Vec<Hazard> {
        distances
            .iter()
            .map(|d| Hazard {
                position: Vec2::new(*d, 0.0),
                radius: 40.0,
            })
            .collect()
    }

    #[test]
    fn test_every_hazard_must_clear_the_radius() {
        // One near rock poisons the spot no matter how far the others are
        let hazards = hazards_at(&[150.0, 300.0]);
        assert!(!position_is_safe(Vec2::ZERO, 200.0, hazards.clone()));
        assert!(position_is_safe(Vec2::ZERO, 100.0, hazards));
    }

    #[test]
    fn test_empty_hazards_is_safe() {
        assert!(position_is_safe(Vec2::ZERO, 200.0, Vec::new()));
    }

    #[test]
    fn test_boundary_distance_is_unsafe() {
        // Strictly farther is required; exactly at the radius fails
        let hazards = hazards_at(&[200.0]);
        assert!(!position_is_safe(Vec2::ZERO, 200.0, hazards));
    }

    #[test]
    fn test_random_position_respects_margin() {
        let mut rng = Pcg32::seed_from_u64(1);
        let screen = ScreenSize::new(1000.0, 800.0);
        for _ in 0..100 {
            let pos = random_screen_position(&mut rng, screen, 0.2);
            assert!(pos.x >= 200.0 && pos.x <= 800.0);
            assert!(pos.y >= 160.0 && pos.y <= 640.0);
        }
    }

    #[test]
    fn test_field_position_clears_center() {
        let mut rng = Pcg32::seed_from_u64(2);
        let screen = ScreenSize::new(1000.0, 800.0);
        for _ in 0..50 {
            let pos = field_position(&mut rng, screen, 250.0);
            assert!(pos.distance(screen.center()) > 250.0);
        }
    }
}
