// src/fonts/profile.rs
//
// Per-font drawing defaults, inferred once when the font loads.
// Script and handwriting faces get a finer brush and skip interior
// counter strokes so they read as one continuous line.

use super::GlyphSource;
use crate::pacing::{clamp, segment_graphemes};
use log::debug;
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

static SCRIPT_FINGERPRINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"script|hand|signature|brittany|chancery|brush")
        .expect("script fingerprint pattern is valid")
});
const SAMPLE_TEXT: &str = "anom";
const REFERENCE_WIDTH_RATIO: f64 = 0.56;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontProfile {
    pub brush_scale: f64,
    pub duration_scale: f64,
    pub outer_only: bool,
}

impl Default for FontProfile {
    fn default() -> Self {
        Self {
            brush_scale: 0.074,
            duration_scale: 1.0,
            outer_only: false,
        }
    }
}

/// Caller overrides, applied field by field over the inferred profile.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ProfileOverrides {
    pub brush_scale: Option<f64>,
    pub duration_scale: Option<f64>,
    pub outer_only: Option<bool>,
}

pub fn is_script_like(font_ref: &str, names: &[String]) -> bool {
    let fingerprint = format!("{} {}", font_ref, names.join(" ")).to_lowercase();
    SCRIPT_FINGERPRINT.is_match(&fingerprint)
}

fn average_width_ratio<S: GlyphSource + ?Sized>(source: &S) -> f64 {
    let units_per_em = source.metrics().units_per_em as f64;
    let widths: Vec<f64> = segment_graphemes(SAMPLE_TEXT)
        .into_iter()
        .filter_map(|grapheme| grapheme.chars().next())
        .filter_map(|ch| source.glyph_for(ch))
        .filter_map(|glyph| source.advance(glyph))
        .map(f64::from)
        .filter(|width| *width > 0.0)
        .collect();

    let average = if widths.is_empty() {
        units_per_em * REFERENCE_WIDTH_RATIO
    } else {
        widths.iter().sum::<f64>() / widths.len() as f64
    };
    average / units_per_em
}

impl FontProfile {
    /// Infers brush and pacing defaults from the font's average lowercase
    /// width and whether its name or reference looks like a script face.
    pub fn infer<S: GlyphSource + ?Sized>(source: &S, font_ref: &str) -> Self {
        let script_like = is_script_like(font_ref, &source.names());
        let ratio = average_width_ratio(source);

        let (brush_bias, duration_bias) = if script_like {
            (0.006, -0.03)
        } else {
            (0.0, 0.03)
        };
        let profile = Self {
            brush_scale: clamp(
                0.074 + (REFERENCE_WIDTH_RATIO - ratio) * 0.08 - brush_bias,
                0.052,
                0.102,
            ),
            duration_scale: clamp(
                1.0 + (ratio - REFERENCE_WIDTH_RATIO) * 0.35 + duration_bias,
                0.9,
                1.18,
            ),
            outer_only: script_like,
        };
        debug!("inferred profile for {}: {:?}", font_ref, profile);
        profile
    }

    /// Applies `overrides`, then a standalone brush scale if given.
    pub fn with_overrides(&self, overrides: &ProfileOverrides, brush_scale: Option<f64>) -> Self {
        Self {
            brush_scale: brush_scale
                .or(overrides.brush_scale)
                .unwrap_or(self.brush_scale),
            duration_scale: overrides.duration_scale.unwrap_or(self.duration_scale),
            outer_only: overrides.outer_only.unwrap_or(self.outer_only),
        }
    }
}
