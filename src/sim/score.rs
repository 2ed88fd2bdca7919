//! Score, lives, and the heads-up display
//!
//! Keeps the session tally and redraws it every frame: a zero-padded score
//! in the top-left corner with one small ship outline per remaining life
//! underneath. Crossing the configured point threshold awards a bonus life.

use glam::Vec2;

use super::actor::{transform_points, Actor, Body};
use super::manager::{advance_all, render_all, Manager, UpdateCtx};
use super::text::{layout_glyphs, GlyphActor, Justify};
use crate::config::{Settings, ShapeModel};
use crate::render::Renderer;

/// Score line anchor (pixels from top-left)
const SCORE_POS: Vec2 = Vec2::new(20.0, 15.0);
const SCORE_SCALE: f32 = 1.5;
/// First life icon anchor and per-icon spacing
const ICONS_POS: Vec2 = Vec2::new(30.0, 65.0);
const ICON_SPACING: f32 = 24.0;
const ICON_SCALE: f32 = 0.8;

/// Small ship outline standing in for one remaining life
#[derive(Debug, Clone)]
struct LifeIcon {
    body: Body,
    points: Vec<Vec2>,
}

impl Actor for LifeIcon {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta_ms: f32) {
        self.body.integrate(delta_ms);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let outline =
            transform_points(&self.points, self.body.position, self.body.heading, ICON_SCALE);
        renderer.draw_closed_shape(&outline);
    }
}

/// Owns the session tally and its display actors
pub struct ScoreManager {
    pub score: u32,
    pub lives: i32,
    settings: Settings,
    next_bonus_life: u32,
    ship_model: ShapeModel,
    glyphs: Vec<GlyphActor>,
    icons: Vec<LifeIcon>,
}

impl ScoreManager {
    pub fn new(settings: Settings, ship_model: ShapeModel) -> Self {
        let mut manager = Self {
            score: 0,
            lives: settings.lives,
            next_bonus_life: 0,
            settings,
            ship_model,
            glyphs: Vec::new(),
            icons: Vec::new(),
        };
        manager.reset();
        manager
    }

    /// Fresh session: zero score, full lives, bonus ladder rewound
    pub fn reset(&mut self) {
        self.score = 0;
        self.lives = self.settings.lives;
        self.next_bonus_life = if self.settings.extra_life == 0 {
            u32::MAX
        } else {
            self.settings.extra_life
        };
    }

    pub fn add(&mut self, points: u32) {
        self.score += points;
    }
}

impl Manager for ScoreManager {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>, delta_ms: f32) {
        if self.score >= self.next_bonus_life {
            self.lives += 1;
            self.next_bonus_life += self.settings.extra_life;
            log::info!("bonus life at {} points", self.score);
        }

        // The display is derived state, rebuilt from the tally every frame
        self.glyphs = layout_glyphs(
            &ctx.config.text,
            &format!("{:05}", self.score),
            SCORE_POS,
            SCORE_SCALE,
            Justify::Left,
        );
        self.icons = (0..self.lives.max(0))
            .map(|i| LifeIcon {
                body: Body::new(
                    ICONS_POS + Vec2::new(i as f32 * ICON_SPACING, 0.0),
                    self.ship_model.radius,
                ),
                points: self.ship_model.points.clone(),
            })
            .collect();

        let mut actors: Vec<&mut dyn Actor> =
            Vec::with_capacity(self.glyphs.len() + self.icons.len());
        actors.extend(self.glyphs.iter_mut().map(|g| g as &mut dyn Actor));
        actors.extend(self.icons.iter_mut().map(|i| i as &mut dyn Actor));
        advance_all(actors, delta_ms, ctx.screen);
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        let mut actors: Vec<&dyn Actor> = Vec::with_capacity(self.glyphs.len() + self.icons.len());
        actors.extend(self.glyphs.iter().map(|g| g as &dyn Actor));
        actors.extend(self.icons.iter().map(|i| i as &dyn Actor));
        render_all(actors, renderer);
    }
}
