// src/pacing/random.rs
//
// Deterministic, non-cryptographic randomness for stroke humanization.
// The same seed always gives the same value, so a given text, font and
// seed always produce the same handwriting.

use serde::Deserialize;

/// Maps a seed to a float in `[0, 1)`.
pub fn seeded_random(seed: f64) -> f64 {
    let value = (seed * 12.9898).sin() * 43758.5453;
    let fract = value - value.floor();
    // tiny negative inputs can round up to exactly 1.0
    if fract >= 1.0 || fract.is_nan() {
        0.0
    } else {
        fract
    }
}

/// 32-bit FNV-1a over the UTF-16 code units of `value`.
pub fn hash_seed(value: &str) -> u32 {
    value.encode_utf16().fold(2_166_136_261u32, |hash, unit| {
        (hash ^ unit as u32).wrapping_mul(16_777_619)
    })
}

/// A caller-provided seed: either a number used as-is or text that gets hashed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Seed {
    Number(f64),
    Text(String),
}

impl Seed {
    /// The numeric base seed. Non-finite numbers resolve to 0.
    pub fn resolve(&self) -> f64 {
        match self {
            Seed::Number(value) if value.is_finite() => *value,
            Seed::Number(_) => 0.0,
            Seed::Text(text) => hash_seed(text) as f64,
        }
    }
}

impl Default for Seed {
    fn default() -> Self {
        Seed::Number(0.0)
    }
}

impl From<f64> for Seed {
    fn from(value: f64) -> Self {
        Seed::Number(value)
    }
}

impl From<&str> for Seed {
    fn from(value: &str) -> Self {
        Seed::Text(value.to_string())
    }
}
