// src/fonts/source.rs
//
// GlyphSource is the narrow view of a font the timeline builder uses.
// ttf-parser's Face implements it; tests use a synthetic font.

use crate::geometry::GlyphOutline;
use ttf_parser::{Face, GlyphId};

/// Vertical metrics in font units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    pub units_per_em: f32,
    pub ascender: Option<f32>,
    pub descender: Option<f32>,
}

pub trait GlyphSource {
    fn metrics(&self) -> FontMetrics;
    fn glyph_for(&self, ch: char) -> Option<u16>;
    fn advance(&self, glyph: u16) -> Option<f32>;
    /// Pair adjustment in font units, 0 when the font has none.
    fn kerning(&self, left: u16, right: u16) -> f32;
    fn outline(&self, glyph: u16) -> Option<GlyphOutline>;
    /// Name-table strings used to fingerprint handwriting fonts.
    fn names(&self) -> Vec<String>;
}

impl GlyphSource for Face<'_> {
    fn metrics(&self) -> FontMetrics {
        let ascender = self.ascender();
        let descender = self.descender();
        FontMetrics {
            units_per_em: self.units_per_em() as f32,
            ascender: (ascender != 0).then_some(ascender as f32),
            descender: (descender != 0).then_some(descender as f32),
        }
    }

    fn glyph_for(&self, ch: char) -> Option<u16> {
        self.glyph_index(ch).map(|glyph| glyph.0)
    }

    fn advance(&self, glyph: u16) -> Option<f32> {
        self.glyph_hor_advance(GlyphId(glyph)).map(f32::from)
    }

    fn kerning(&self, left: u16, right: u16) -> f32 {
        let Some(kern) = self.tables().kern else {
            return 0.0;
        };
        kern.subtables
            .into_iter()
            .filter(|subtable| subtable.horizontal && !subtable.variable)
            .find_map(|subtable| subtable.glyphs_kerning(GlyphId(left), GlyphId(right)))
            .map_or(0.0, f32::from)
    }

    fn outline(&self, glyph: u16) -> Option<GlyphOutline> {
        let mut outline = GlyphOutline::default();
        self.outline_glyph(GlyphId(glyph), &mut outline)?;
        Some(outline)
    }

    fn names(&self) -> Vec<String> {
        Face::names(self)
            .into_iter()
            .filter_map(|name| name.to_string())
            .collect()
    }
}
