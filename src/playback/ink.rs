// src/playback/ink.rs
//
// Progress shaping for a single stroke: an eased ink curve over the
// pen-down window, and a taper that thins the line at either end.

use crate::pacing::{clamp, seeded_random};

const TAPER_IN: f64 = 0.06;
const TAPER_OUT: f64 = 0.08;

/// Hermite step between two edges. Reversed edges give a falling step.
pub fn smoothstep(edge0: f64, edge1: f64, x: f64) -> f64 {
    if edge1 == edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = clamp((x - edge0) / (edge1 - edge0), 0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Three-phase ink curve: a quick attack, a long body, a soft release.
/// The phase boundaries vary per stroke with `seed`. Monotone, with
/// fixed points at 0 and 1.
pub fn ease_ink_progress(progress: f64, seed: f64) -> f64 {
    let p = clamp(progress, 0.0, 1.0);
    let attack = 0.18 + seeded_random(seed + 2.0) * 0.1;
    let release = 0.7 + seeded_random(seed + 3.0) * 0.16;

    let value = smoothstep(0.0, attack, p) * 0.24
        + smoothstep(attack, release, p) * 0.62
        + smoothstep(release, 1.0, p) * 0.14;
    clamp(value, 0.0, 1.0)
}

/// Pressure multiplier at `t` along the whole stroke: the nib presses
/// down over the first 6% and lifts off over the last 8%.
pub fn stroke_taper(t: f64) -> f64 {
    if t < TAPER_IN {
        smoothstep(0.0, TAPER_IN, t)
    } else if t > 1.0 - TAPER_OUT {
        smoothstep(1.0, 1.0 - TAPER_OUT, t)
    } else {
        1.0
    }
}
