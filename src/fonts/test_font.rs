// src/fonts/test_font.rs
//
// A synthetic glyph source for tests: every printable character is a
// box with a rounded top, "o" also has a counter, the snowman is missing.

use super::{FontMetrics, GlyphSource};
use crate::geometry::{GlyphOutline, OutlineCommand};

pub const SPACE_GLYPH: u16 = 1;
/// A real TrueType face with a format 0 kern table.
pub const DEJAVU_SANS: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");
pub const DEJAVU_REF: &str = "fonts/DejaVuSans.ttf";
pub const MISSING_CHAR: char = '\u{2603}';

pub struct BoxFont {
    pub family: String,
    pub advance_width: f32,
}

impl BoxFont {
    pub fn new() -> Self {
        Self::named("Box Sans")
    }

    pub fn named(family: &str) -> Self {
        Self {
            family: family.to_string(),
            advance_width: 560.0,
        }
    }

    pub fn glyph(ch: char) -> u16 {
        if ch == ' ' {
            SPACE_GLYPH
        } else {
            2 + (ch as u32 % 60_000) as u16
        }
    }
}

impl GlyphSource for BoxFont {
    fn metrics(&self) -> FontMetrics {
        FontMetrics {
            units_per_em: 1000.0,
            ascender: Some(800.0),
            descender: Some(-200.0),
        }
    }

    fn glyph_for(&self, ch: char) -> Option<u16> {
        (ch != MISSING_CHAR).then(|| Self::glyph(ch))
    }

    fn advance(&self, glyph: u16) -> Option<f32> {
        if glyph == SPACE_GLYPH {
            Some(250.0)
        } else {
            Some(self.advance_width)
        }
    }

    fn kerning(&self, left: u16, right: u16) -> f32 {
        if left == Self::glyph('A') && right == Self::glyph('V') {
            -80.0
        } else {
            0.0
        }
    }

    fn outline(&self, glyph: u16) -> Option<GlyphOutline> {
        if glyph == SPACE_GLYPH {
            return None;
        }
        let mut outline = GlyphOutline::default();
        outline.push(OutlineCommand::MoveTo(60.0, 0.0));
        outline.push(OutlineCommand::LineTo(500.0, 0.0));
        outline.push(OutlineCommand::LineTo(500.0, 500.0));
        outline.push(OutlineCommand::QuadTo(280.0, 700.0, 60.0, 500.0));
        outline.push(OutlineCommand::Close);
        if glyph == Self::glyph('o') {
            outline.push(OutlineCommand::MoveTo(160.0, 100.0));
            outline.push(OutlineCommand::LineTo(160.0, 400.0));
            outline.push(OutlineCommand::LineTo(400.0, 400.0));
            outline.push(OutlineCommand::LineTo(400.0, 100.0));
            outline.push(OutlineCommand::Close);
        }
        Some(outline)
    }

    fn names(&self) -> Vec<String> {
        vec![self.family.clone(), format!("{} Regular", self.family)]
    }
}
