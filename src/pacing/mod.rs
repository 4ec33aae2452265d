// src/pacing/mod.rs
//
// Quality presets and the pure numeric helpers the timeline and
// playback code share. Nothing in here holds state.

pub mod catchup;
pub mod quality;
pub mod random;
pub mod text;

pub use catchup::{catchup_multiplier, is_typing_burst};
pub use quality::{preset_for, Quality, QualityPreset};
pub use random::{hash_seed, seeded_random, Seed};
pub use text::{drop_last_grapheme, segment_graphemes};

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_boundaries() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn test_clamp_inclusive_edges() {
        assert_eq!(clamp(0.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(10.0, 0.0, 10.0), 10.0);
    }
}
