//! Data-driven game tuning and shape geometry
//!
//! Everything gameplay-shaped lives in one JSON document: ship handling,
//! rock designs, saucer behavior, and the vector font. A copy ships inside
//! the binary so the game always has a valid configuration to fall back on.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Built-in configuration compiled into the binary
const EMBEDDED_CONFIG: &str = include_str!("../assets/config.json");

/// Outline geometry: model-space points plus optional segment index pairs
///
/// Closed shapes (ship, rocks, saucer) leave `segments` empty and are drawn
/// as a polygon through `points` in order. Open shapes (glyphs, debris) list
/// the point-index pairs to connect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeModel {
    /// Deserialized straight from the JSON `[x, y]` pairs
    pub points: Vec<Vec2>,
    #[serde(default)]
    pub segments: Vec<[usize; 2]>,
    /// Circular extent used for wrapping and collision
    pub radius: f32,
}

/// Session-level tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Lives at the start of a session
    pub lives: i32,
    /// Points between bonus lives (0 disables the bonus)
    pub extra_life: u32,
}

/// Player ship handling and weapon tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceshipConfig {
    /// Hull outline
    pub ship: ShapeModel,
    /// Exhaust flame outline, drawn only while thrusting
    pub thrust: ShapeModel,
    /// Turn rate (radians per ms)
    pub rotation_vel: f32,
    /// Acceleration along the heading (pixels per ms per ms)
    pub thrust_vel: f32,
    /// Per-ms velocity retention factor
    pub friction: f32,
    /// Projectile muzzle speed (pixels per ms)
    pub projectile_vel: f32,
    /// Minimum ms between shots
    pub rate_of_fire: f32,
    /// Projectile lifetime (ms)
    pub projectile_life: f32,
}

/// Per-size rock parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RockSizeSpec {
    pub radius: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub score: u32,
}

/// Size table, largest to smallest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RockSizeTable {
    pub large: RockSizeSpec,
    pub medium: RockSizeSpec,
    pub small: RockSizeSpec,
}

/// Rock field tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AsteroidsConfig {
    /// Rocks in a fresh field
    pub initial_count: usize,
    /// Unit-scale outlines, scaled by the size radius at spawn
    pub designs: Vec<ShapeModel>,
    pub sizes: RockSizeTable,
}

/// Flying saucer tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaucerConfig {
    pub model: ShapeModel,
    /// Horizontal cruise speed (pixels per ms)
    pub speed: f32,
    /// Ms before an undisturbed saucer leaves
    pub lifetime: f32,
    /// Ms between aimed shots
    pub fire_interval: f32,
    /// Shot speed (pixels per ms)
    pub shot_vel: f32,
    /// Shot lifetime (ms)
    pub shot_life: f32,
    /// Ms between spawn attempts
    pub spawn_interval: f32,
    /// Points for destroying one
    pub score: u32,
}

/// One drawable character: segment pairs into the shared glyph grid
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlyphModel {
    #[serde(rename = "char")]
    pub ch: char,
    pub segments: Vec<[usize; 2]>,
}

/// Vector font: a shared point grid plus per-character segment lists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextConfig {
    /// Grid points every glyph indexes into
    pub points: Vec<Vec2>,
    /// Glyph cell extent, also the inter-character advance base
    pub radius: f32,
    pub characters: Vec<GlyphModel>,
}

impl TextConfig {
    /// Look up the glyph for a character, if the font has one
    pub fn glyph(&self, ch: char) -> Option<&GlyphModel> {
        self.characters.iter().find(|g| g.ch == ch)
    }
}

/// Complete game configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub settings: Settings,
    pub spaceship: SpaceshipConfig,
    pub asteroids: AsteroidsConfig,
    pub saucer: SaucerConfig,
    pub text: TextConfig,
}

impl GameConfig {
    /// Parse a configuration document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The configuration compiled into the binary
    pub fn embedded() -> Self {
        Self::from_json(EMBEDDED_CONFIG).expect("embedded config.json is valid")
    }

    /// Load from a file, falling back to the embedded configuration on any error
    pub fn load_or_embedded(path: Option<&Path>) -> Self {
        if let Some(path) = path {
            match std::fs::read_to_string(path) {
                Ok(json) => match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring config {}: {}", path.display(), e),
                },
                Err(e) => log::warn!("Could not read config {}: {}", path.display(), e),
            }
        }
        log::info!("Using embedded config");
        Self::embedded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_parses() {
        let config = GameConfig::embedded();
        assert_eq!(config.settings.lives, 3);
        assert!(config.asteroids.initial_count > 0);
        assert!(!config.asteroids.designs.is_empty());
        // Size ordering: large rocks are bigger and slower than small ones
        assert!(config.asteroids.sizes.large.radius > config.asteroids.sizes.small.radius);
        assert!(config.asteroids.sizes.large.max_speed < config.asteroids.sizes.small.max_speed);
    }

    #[test]
    fn test_font_covers_game_messages() {
        let config = GameConfig::embedded();
        for ch in "0123456789 GAMEOVERPLAYER1COIN".chars() {
            assert!(config.text.glyph(ch).is_some(), "missing glyph {ch:?}");
        }
        assert!(config.text.glyph('~').is_none());
    }

    #[test]
    fn test_glyph_segments_index_into_grid() {
        let config = GameConfig::embedded();
        let grid = config.text.points.len();
        for glyph in &config.text.characters {
            for [a, b] in &glyph.segments {
                assert!(*a < grid && *b < grid, "glyph {:?} indexes off-grid", glyph.ch);
            }
        }
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(GameConfig::from_json("{}").is_err());
        assert!(GameConfig::from_json("not json").is_err());
    }

    #[test]
    fn test_geometry_deserializes_as_vectors() {
        let config = GameConfig::embedded();
        // JSON [x, y] pairs land directly as glam vectors
        assert_eq!(config.spaceship.ship.points[0], Vec2::new(0.0, -14.0));
        assert_eq!(config.text.points[8], Vec2::new(12.0, 16.0));
        let back = serde_json::to_string(&config.spaceship.ship).unwrap();
        assert!(back.contains("[0.0,-14.0]"));
    }
}
