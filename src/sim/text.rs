//! Vector-font text drawn as actor sets
//!
//! Every character is segments into a shared 3x3 point grid, laid out one
//! glyph cell advance apart. A line of text is written under a tag; writing
//! the same tag again replaces the old line, so callers never repaint by
//! hand.

use glam::Vec2;

use super::actor::{transform_points, Actor, Body};
use super::manager::{advance_all, render_all, Manager, UpdateCtx};
use crate::config::TextConfig;
use crate::render::Renderer;

/// Extra grid units between glyph cells
const GLYPH_GAP: f32 = 4.0;

/// Horizontal anchoring of a text line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Justify {
    Left,
    Right,
    Center,
}

/// One laid-out character
///
/// All glyphs of a line share the line origin as their position; the column
/// offset is baked into the model points so the whole line moves as one.
#[derive(Debug, Clone)]
pub struct GlyphActor {
    body: Body,
    points: Vec<Vec2>,
    segments: Vec<[usize; 2]>,
    scale: f32,
}

impl Actor for GlyphActor {
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
        let points =
            transform_points(&self.points, self.body.position, self.body.heading, self.scale);
        renderer.draw_segments(&points, &self.segments);
    }
}

/// Lay out a message as glyph actors anchored at `origin`
///
/// Characters are uppercased before lookup. A character the font cannot
/// draw is skipped but still takes up its column.
pub fn layout_glyphs(
    font: &TextConfig,
    message: &str,
    origin: Vec2,
    scale: f32,
    justify: Justify,
) -> Vec<GlyphActor> {
    let chars: Vec<char> = message.to_uppercase().chars().collect();
    let advance = font.radius + GLYPH_GAP;
    let line_width = advance * scale * chars.len() as f32;
    let anchor_x = match justify {
        Justify::Left => origin.x,
        Justify::Right => origin.x - line_width,
        Justify::Center => origin.x - line_width / 2.0,
    };
    let line_origin = Vec2::new(anchor_x, origin.y);

    let mut glyphs = Vec::with_capacity(chars.len());
    let mut column = 0.0;
    for ch in chars {
        let Some(glyph) = font.glyph(ch) else {
            debug_assert!(false, "font has no glyph for {ch:?}");
            log::warn!("font has no glyph for {ch:?}; skipping");
            column += advance;
            continue;
        };
        let points = font
            .points
            .iter()
            .map(|p| *p + Vec2::new(column, 0.0))
            .collect();
        glyphs.push(GlyphActor {
            body: Body::new(line_origin, font.radius),
            points,
            segments: glyph.segments.clone(),
            scale,
        });
        column += advance;
    }
    glyphs
}

struct TextBlock {
    tag: String,
    glyphs: Vec<GlyphActor>,
}

/// Owns every tagged line of text on screen
pub struct TextManager {
    blocks: Vec<TextBlock>,
    font: TextConfig,
}

impl TextManager {
    pub fn new(font: TextConfig) -> Self {
        Self {
            blocks: Vec::new(),
            font,
        }
    }

    /// Write a line under `tag`, replacing whatever the tag held before
    pub fn write(&mut self, tag: &str, message: &str, x: f32, y: f32, scale: f32, justify: Justify) {
        let glyphs = layout_glyphs(&self.font, message, Vec2::new(x, y), scale, justify);
        self.clear(tag);
        self.blocks.push(TextBlock {
            tag: tag.to_string(),
            glyphs,
        });
    }

    /// Remove the line written under `tag`, if any
    pub fn clear(&mut self, tag: &str) {
        self.blocks.retain(|block| block.tag != tag);
    }

    pub fn has(&self, tag: &str) -> bool {
        self.blocks.iter().any(|block| block.tag == tag)
    }
}

impl Manager for TextManager {
    fn update(&mut self, ctx: &mut UpdateCtx<'_>, delta_ms: f32) {
        advance_all(
            self.blocks
                .iter_mut()
                .flat_map(|block| block.glyphs.iter_mut())
                .map(|g| g as &mut dyn Actor),
            delta_ms,
            ctx.screen,
        );
    }

    fn render(&self, renderer: &mut dyn Renderer) {
        render_all(
            self.blocks
                .iter()
                .flat_map(|block| block.glyphs.iter())
                .map(|g| g as &dyn Actor),
            renderer,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;

    fn font() -> TextConfig {
        GameConfig::embedded().text
    }

    #[test]
    fn test_center_justify_anchors_half_width_left() {
        let font = font();
        // Advance is (12 + 4) grid units; three chars at scale 2 span 96 px
        let glyphs = layout_glyphs(&font, "AAA", Vec2::new(300.0, 100.0), 2.0, Justify::Center);
        assert_eq!(glyphs.len(), 3);
        for glyph in &glyphs {
            assert_eq!(glyph.body().position, Vec2::new(252.0, 100.0));
        }
        // Columns step one advance apart in model space
        assert_eq!(glyphs[0].points[0].x, 0.0);
        assert_eq!(glyphs[1].points[0].x, 16.0);
        assert_eq!(glyphs[2].points[0].x, 32.0);
    }

    #[test]
    fn test_right_justify_anchors_full_width_left() {
        let font = font();
        let glyphs = layout_glyphs(&font, "79", Vec2::new(300.0, 50.0), 1.0, Justify::Right);
        assert_eq!(glyphs[0].body().position.x, 300.0 - 32.0);
    }

    #[test]
    fn test_lowercase_maps_to_uppercase_glyphs() {
        let font = font();
        let lower = layout_glyphs(&font, "game", Vec2::ZERO, 1.0, Justify::Left);
        let upper = layout_glyphs(&font, "GAME", Vec2::ZERO, 1.0, Justify::Left);
        assert_eq!(lower.len(), upper.len());
        assert_eq!(lower[0].segments, upper[0].segments);
    }

    #[test]
    fn test_write_replaces_same_tag() {
        let mut text = TextManager::new(font());
        text.write("banner", "GAME OVER", 100.0, 100.0, 2.0, Justify::Center);
        text.write("banner", "OK", 100.0, 100.0, 2.0, Justify::Center);
        assert!(text.has("banner"));
        assert_eq!(text.blocks.len(), 1);
        assert_eq!(text.blocks[0].glyphs.len(), 2);
    }

    #[test]
    fn test_clear_removes_only_its_tag() {
        let mut text = TextManager::new(font());
        text.write("a", "ONE", 0.0, 0.0, 1.0, Justify::Left);
        text.write("b", "TWO", 0.0, 50.0, 1.0, Justify::Left);
        text.clear("a");
        assert!(!text.has("a"));
        assert!(text.has("b"));
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "no glyph")]
    fn test_unmapped_character_asserts_in_debug() {
        layout_glyphs(&font(), "~", Vec2::ZERO, 1.0, Justify::Left);
    }
}
