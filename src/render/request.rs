// src/render/request.rs
//
// The public render contract: everything a host can ask of a
// handwriting surface, with the component defaults.

use crate::fonts::{FontProfile, ProfileOverrides};
use crate::pacing::{Quality, Seed};
use crate::playback::{InkColor, PlaybackOptions};
use crate::timeline::TimelineParams;
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderRequest {
    /// Newline-delimited lines.
    pub text: String,
    pub font_ref: String,
    pub size: f64,
    pub speed: f64,
    pub line_height: f64,
    pub quality: Quality,
    pub seed: Seed,
    pub brush_scale: Option<f64>,
    pub profile: ProfileOverrides,
    pub color: InkColor,
    pub animate: bool,
    pub incremental: bool,
    pub auto_replay: bool,
    /// Bumped by the caller to force a restart.
    pub playhead: u64,
}

impl Default for RenderRequest {
    fn default() -> Self {
        Self {
            text: String::new(),
            font_ref: String::new(),
            size: 84.0,
            speed: 1.0,
            line_height: 1.32,
            quality: Quality::Balanced,
            seed: Seed::default(),
            brush_scale: None,
            profile: ProfileOverrides::default(),
            color: InkColor::default(),
            animate: true,
            incremental: true,
            auto_replay: false,
            playhead: 0,
        }
    }
}

impl RenderRequest {
    pub fn new(text: &str, font_ref: &str) -> Self {
        Self {
            text: text.to_string(),
            font_ref: font_ref.to_string(),
            ..Self::default()
        }
    }

    /// Model inputs other than the text.
    pub fn settings(&self) -> ModelSettings {
        ModelSettings {
            font_ref: self.font_ref.clone(),
            size: self.size,
            speed: self.speed,
            line_height: self.line_height,
            quality: self.quality,
            seed: self.seed.resolve(),
            brush_scale: self.brush_scale,
            profile: self.profile,
        }
    }

    pub fn model_key(&self) -> ModelKey {
        ModelKey {
            text: self.text.clone(),
            settings: self.settings(),
        }
    }

    pub fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions {
            animate: self.animate,
            incremental: self.incremental,
            auto_replay: self.auto_replay,
            quality: self.quality,
        }
    }

    /// Merges `profile` and then `brush_scale` over the font's inferred profile.
    pub fn resolve_profile(&self, inferred: FontProfile) -> FontProfile {
        inferred.with_overrides(&self.profile, self.brush_scale)
    }

    pub fn timeline_params(&self, inferred: FontProfile) -> TimelineParams {
        TimelineParams {
            size: self.size,
            speed: self.speed,
            line_height: self.line_height,
            profile: self.resolve_profile(inferred),
            quality: self.quality,
            seed: self.seed.resolve(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModelSettings {
    pub font_ref: String,
    pub size: f64,
    pub speed: f64,
    pub line_height: f64,
    pub quality: Quality,
    pub seed: f64,
    pub brush_scale: Option<f64>,
    pub profile: ProfileOverrides,
}

/// Memo key for a built draw model. Equal keys build equal models.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelKey {
    pub text: String,
    pub settings: ModelSettings,
}
