// src/timeline/builder.rs
//
// Builds a DrawModel. Per line: glyphs are placed left to right,
// their outlines are flattened in parallel, then the timeline cursor
// walks the graphemes in reading order handing out delays.

use super::{complexity_score, is_punctuation, is_whitespace, DrawModel, StrokeUnit};
use crate::{
    fonts::{FontProfile, GlyphSource},
    geometry::{extract_glyph, GlyphGeometry, Placement},
    pacing::{clamp, preset_for, seeded_random, segment_graphemes, Quality},
};
use log::debug;
use rayon::prelude::*;

const DEFAULT_SIZE: f64 = 84.0;
const DEFAULT_LINE_HEIGHT: f64 = 1.32;
const FALLBACK_ASCENDER: f64 = 0.82;
const FALLBACK_DESCENDER: f64 = 0.28;
const FALLBACK_ADVANCE: f64 = 0.45;

#[derive(Debug, Clone, PartialEq)]
pub struct TimelineParams {
    pub size: f64,
    pub speed: f64,
    pub line_height: f64,
    pub profile: FontProfile,
    pub quality: Quality,
    /// Resolved numeric base seed.
    pub seed: f64,
}

impl Default for TimelineParams {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            speed: 1.0,
            line_height: DEFAULT_LINE_HEIGHT,
            profile: FontProfile::default(),
            quality: Quality::Balanced,
            seed: 0.0,
        }
    }
}

fn positive_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        fallback
    }
}

// canvas layout derived from size and font metrics, in px
struct Layout {
    font_size: f64,
    scale: f64,
    padding_x: f64,
    padding_top: f64,
    padding_bottom: f64,
    ascender: f64,
    descender: f64,
    line_stride: f64,
    units_per_em: f64,
}

impl Layout {
    fn new<S: GlyphSource + ?Sized>(source: &S, size: f64, line_height: f64) -> Self {
        let metrics = source.metrics();
        let units_per_em = positive_or(metrics.units_per_em as f64, 1000.0);
        let font_size = size * 0.9;
        let scale = font_size / units_per_em;
        let raw_ascender = metrics
            .ascender
            .map_or(units_per_em * FALLBACK_ASCENDER, f64::from);
        let raw_descender = metrics
            .descender
            .map_or(units_per_em * FALLBACK_DESCENDER, |d| f64::from(d).abs());
        let ascender = raw_ascender * scale * 1.08;
        let descender = raw_descender * scale * 1.2;

        Self {
            font_size,
            scale,
            padding_x: size * 0.24,
            padding_top: size * 0.34,
            padding_bottom: size * 0.78,
            ascender,
            descender,
            line_stride: (size * line_height).max(ascender + descender + size * 0.16),
            units_per_em,
        }
    }

    fn baseline(&self, line_index: usize) -> f64 {
        self.padding_top + self.ascender + self.line_stride * line_index as f64
    }
}

struct PlacedGlyph<'t> {
    grapheme: &'t str,
    glyph: Option<u16>,
    offset_x: f64,
}

fn place_line<'t, S: GlyphSource + ?Sized>(
    source: &S,
    graphemes: &[&'t str],
    layout: &Layout,
) -> (Vec<PlacedGlyph<'t>>, f64) {
    let glyphs: Vec<Option<u16>> = graphemes
        .iter()
        .map(|grapheme| grapheme.chars().next().and_then(|ch| source.glyph_for(ch)))
        .collect();

    let mut cursor_x = layout.padding_x;
    let mut placed = Vec::with_capacity(graphemes.len());
    for (index, grapheme) in graphemes.iter().enumerate() {
        let glyph = glyphs[index];
        let kern = match (glyph, glyphs.get(index + 1).copied().flatten()) {
            (Some(left), Some(right)) => source.kerning(left, right) as f64,
            _ => 0.0,
        };
        // a miss still advances by the .notdef width
        let advance = source
            .advance(glyph.unwrap_or(0))
            .map_or(layout.units_per_em * FALLBACK_ADVANCE, f64::from);

        placed.push(PlacedGlyph {
            grapheme,
            glyph,
            offset_x: cursor_x,
        });
        cursor_x += (advance + kern) * layout.scale;
    }
    (placed, cursor_x)
}

fn glyph_geometry<S: GlyphSource + ?Sized>(
    source: &S,
    placed: &PlacedGlyph<'_>,
    layout: &Layout,
    baseline: f64,
    outer_only: bool,
) -> GlyphGeometry {
    if is_whitespace(placed.grapheme) {
        return GlyphGeometry::empty();
    }
    let placement = Placement {
        scale: layout.scale as f32,
        offset_x: placed.offset_x as f32,
        baseline_y: baseline as f32,
    };
    placed
        .glyph
        .and_then(|glyph| source.outline(glyph))
        .map_or_else(GlyphGeometry::empty, |outline| {
            extract_glyph(&outline, placement, outer_only)
        })
}

/// Builds the draw model for `text`. Pure: identical inputs give an
/// identical model.
pub fn build_draw_model<S: GlyphSource + Sync + ?Sized>(
    source: &S,
    text: &str,
    params: &TimelineParams,
) -> DrawModel {
    let size = positive_or(params.size, DEFAULT_SIZE);
    let speed = positive_or(params.speed, 1.0);
    let line_height = positive_or(params.line_height, DEFAULT_LINE_HEIGHT);
    let profile = params.profile;
    let preset = preset_for(params.quality);
    let layout = Layout::new(source, size, line_height);

    let brush_width = (layout.font_size * profile.brush_scale).max(1.6) as f32;
    let word_gap = clamp(120.0 / speed, 70.0, 220.0);
    let line_pause = clamp(180.0 / speed, 120.0, 320.0);

    let lines: Vec<&str> = text.split('\n').collect();
    let mut units: Vec<StrokeUnit> = Vec::new();
    let mut timeline = 0.0;
    let mut max_width = layout.padding_x * 2.0 + size * 2.0;

    for (line_index, line) in lines.iter().enumerate() {
        let graphemes = segment_graphemes(line);
        let baseline = layout.baseline(line_index);
        let (placed, line_end) = place_line(source, &graphemes, &layout);

        let geometries: Vec<GlyphGeometry> = placed
            .par_iter()
            .map(|glyph| glyph_geometry(source, glyph, &layout, baseline, profile.outer_only))
            .collect();

        for (glyph, geometry) in placed.iter().zip(geometries) {
            if is_whitespace(glyph.grapheme) {
                timeline += word_gap;
                continue;
            }

            let codepoint = glyph.grapheme.chars().next().map_or(0, u32::from) as f64;
            let char_seed = line_index as f64 * 1021.0
                + units.len() as f64 * 37.0
                + codepoint
                + params.seed * 977.0;

            let rhythm = 0.86 + seeded_random(char_seed + 11.0) * preset.cadence_jitter;
            let path_length = geometry.path_length as f64;
            let draw_duration = clamp(
                (70.0 + path_length * 1.2 + complexity_score(glyph.grapheme) * 42.0)
                    * rhythm
                    * profile.duration_scale
                    / speed,
                90.0,
                720.0,
            );
            let pen_lift = clamp(
                (10.0 + seeded_random(char_seed + 29.0) * 10.0) / speed,
                6.0,
                30.0,
            );
            let base_gap = if is_punctuation(glyph.grapheme) { 74.0 } else { 24.0 };
            let letter_gap = clamp(
                (base_gap + seeded_random(char_seed + 47.0) * 18.0) / speed,
                14.0,
                98.0,
            );

            if geometry.is_drawable() {
                if let Some(fill_shape) = geometry.fill_shape {
                    units.push(StrokeUnit {
                        grapheme: glyph.grapheme.to_string(),
                        line: line_index,
                        fill_shape,
                        segments: geometry.segments,
                        path_length: geometry.path_length,
                        brush_width,
                        seed: char_seed,
                        delay: timeline.round(),
                        duration: draw_duration.round(),
                    });
                }
            }

            timeline += draw_duration + pen_lift + letter_gap;
        }

        max_width = max_width.max(line_end + layout.padding_x);
        if line_index + 1 < lines.len() {
            timeline += line_pause;
        }
    }

    let total_duration = units.iter().map(StrokeUnit::end).fold(0.0, f64::max);
    let stacked = layout.padding_top
        + layout.ascender
        + layout.descender
        + layout.line_stride * lines.len().saturating_sub(1) as f64
        + layout.padding_bottom;

    debug!(
        "built draw model: {} units, {} lines, {:.0} ms",
        units.len(),
        lines.len(),
        total_duration
    );

    DrawModel {
        width: max_width.max(size * 3.0),
        height: stacked.max(size * 1.9),
        units,
        total_duration,
    }
}
