// src/pacing/catchup.rs
//
// Typing-burst detection and the catch-up multiplier applied to the
// pen-time advance rate while text streams in.

use super::{clamp, preset_for, Quality};

/// True when the previous model update happened inside the quality's burst window.
pub fn is_typing_burst(elapsed_ms: f64, quality: Quality) -> bool {
    elapsed_ms < preset_for(quality).burst_window_ms
}

/// Multiplier (>= 1) for the pen-time advance.
///
/// Grows linearly once `backlog` passes `backlog_start` and saturates at
/// `1 + backlog_max_boost` at `backlog_start + backlog_range`. A burst
/// multiplies the result by the flat `burst_boost`.
pub fn catchup_multiplier(backlog: f64, is_burst: bool, quality: Quality) -> f64 {
    let preset = preset_for(quality);
    let overflow = (backlog.max(0.0) - preset.backlog_start) / preset.backlog_range;
    let backlog_boost = 1.0 + clamp(overflow, 0.0, 1.0) * preset.backlog_max_boost;
    if is_burst {
        backlog_boost * preset.burst_boost
    } else {
        backlog_boost
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUALITIES: [Quality; 3] = [Quality::Calm, Quality::Balanced, Quality::Snappy];

    #[test]
    fn test_burst_window_differs_by_preset() {
        assert!(is_typing_burst(160.0, Quality::Calm));
        assert!(!is_typing_burst(160.0, Quality::Snappy));
        assert!(!is_typing_burst(150.0, Quality::Balanced));
    }

    #[test]
    fn test_no_backlog_means_no_boost() {
        for quality in QUALITIES {
            assert_eq!(catchup_multiplier(0.0, false, quality), 1.0);
            assert_eq!(catchup_multiplier(-50.0, false, quality), 1.0);
        }
    }

    #[test]
    fn test_multiplier_is_monotonic_in_backlog() {
        for quality in QUALITIES {
            for burst in [false, true] {
                let mut previous = 0.0;
                for step in 0..200 {
                    let value = catchup_multiplier(step as f64 * 25.0, burst, quality);
                    assert!(value >= previous);
                    assert!(value >= 1.0);
                    previous = value;
                }
            }
        }
    }

    #[test]
    fn test_burst_never_slows_playback() {
        for quality in QUALITIES {
            for step in 0..100 {
                let backlog = step as f64 * 61.0;
                assert!(
                    catchup_multiplier(backlog, true, quality)
                        >= catchup_multiplier(backlog, false, quality)
                );
            }
        }
    }

    #[test]
    fn test_multiplier_saturates() {
        let preset = preset_for(Quality::Snappy);
        let full = preset.backlog_start + preset.backlog_range;
        let saturated = catchup_multiplier(full, false, Quality::Snappy);
        assert!((saturated - (1.0 + preset.backlog_max_boost)).abs() < 1e-9);
        assert_eq!(catchup_multiplier(full * 10.0, false, Quality::Snappy), saturated);
    }

    #[test]
    fn test_large_burst_backlog_beats_idle() {
        let low = catchup_multiplier(0.0, false, Quality::Balanced);
        let high = catchup_multiplier(3000.0, true, Quality::Snappy);
        assert!(high > low);
    }
}
