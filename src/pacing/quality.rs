// src/pacing/quality.rs
//
// Pacing quality presets. Each preset tunes how eagerly playback
// catches up with freshly streamed text and how much cadence varies.

use log::debug;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum Quality {
    Calm,
    #[default]
    Balanced,
    Snappy,
}

impl Quality {
    /// Resolves a quality name, falling back to `Balanced` for anything unknown.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "calm" => Quality::Calm,
            "balanced" => Quality::Balanced,
            "snappy" => Quality::Snappy,
            other => {
                debug!("unknown quality {:?}, using balanced", other);
                Quality::Balanced
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Quality::Calm => "calm",
            Quality::Balanced => "balanced",
            Quality::Snappy => "snappy",
        }
    }
}

impl From<&str> for Quality {
    fn from(name: &str) -> Self {
        Quality::from_name(name)
    }
}

impl From<String> for Quality {
    fn from(name: String) -> Self {
        Quality::from_name(&name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityPreset {
    pub burst_window_ms: f64,
    pub burst_boost: f64,
    pub backlog_start: f64,
    pub backlog_range: f64,
    pub backlog_max_boost: f64,
    pub cadence_jitter: f64,
}

const CALM: QualityPreset = QualityPreset {
    burst_window_ms: 170.0,
    burst_boost: 1.08,
    backlog_start: 260.0,
    backlog_range: 2600.0,
    backlog_max_boost: 1.05,
    cadence_jitter: 0.15,
};

const BALANCED: QualityPreset = QualityPreset {
    burst_window_ms: 150.0,
    burst_boost: 1.22,
    backlog_start: 180.0,
    backlog_range: 1800.0,
    backlog_max_boost: 1.8,
    cadence_jitter: 0.35,
};

const SNAPPY: QualityPreset = QualityPreset {
    burst_window_ms: 130.0,
    burst_boost: 1.35,
    backlog_start: 120.0,
    backlog_range: 1300.0,
    backlog_max_boost: 2.4,
    cadence_jitter: 0.44,
};

pub fn preset_for(quality: Quality) -> &'static QualityPreset {
    match quality {
        Quality::Calm => &CALM,
        Quality::Balanced => &BALANCED,
        Quality::Snappy => &SNAPPY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_quality_has_a_preset() {
        for name in ["calm", "balanced", "snappy"] {
            let preset = preset_for(Quality::from_name(name));
            assert!(preset.burst_window_ms > 0.0);
            assert!(preset.backlog_range > 0.0);
        }
    }

    #[test]
    fn test_unknown_quality_falls_back_to_balanced() {
        assert_eq!(Quality::from_name("nope"), Quality::Balanced);
        assert_eq!(preset_for(Quality::from_name("nope")), preset_for(Quality::Balanced));
        assert_eq!(Quality::from_name(""), Quality::Balanced);
    }

    #[test]
    fn test_names_are_case_insensitive() {
        assert_eq!(Quality::from_name(" Snappy "), Quality::Snappy);
        assert_eq!(Quality::from("CALM"), Quality::Calm);
    }

    #[test]
    fn test_deserialize_with_fallback() {
        #[derive(Deserialize)]
        struct Wrapper {
            quality: Quality,
        }
        let parsed: Wrapper = toml::from_str("quality = \"calm\"").unwrap();
        assert_eq!(parsed.quality, Quality::Calm);
        let parsed: Wrapper = toml::from_str("quality = \"turbo\"").unwrap();
        assert_eq!(parsed.quality, Quality::Balanced);
    }
}
