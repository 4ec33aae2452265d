// src/playback/state.rs
//
// Streaming state and the continue-or-restart decision.

use crate::pacing::{is_typing_burst, Quality};

/// Incremented on every restart. Continuation state from an older
/// generation is never reused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayheadGeneration(pub u64);

impl PlayheadGeneration {
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackOptions {
    pub animate: bool,
    pub incremental: bool,
    pub auto_replay: bool,
    pub quality: Quality,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            animate: true,
            incremental: true,
            auto_replay: false,
            quality: Quality::Balanced,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackState {
    pub last_text: String,
    pub pen_time: f64,
    /// When the model driving this state was presented, ms.
    pub last_update: Option<f64>,
    pub generation: PlayheadGeneration,
    /// The caller's replay token this state belongs to.
    pub replay_token: u64,
}

impl PlaybackState {
    pub fn fresh(generation: PlayheadGeneration, text: &str, replay_token: u64, now: f64) -> Self {
        Self {
            last_text: text.to_string(),
            pen_time: 0.0,
            last_update: Some(now),
            generation,
            replay_token,
        }
    }

    /// The snapshot that carries this one forward to a longer text.
    pub fn continued(&self, text: &str, pen_time: f64, now: f64) -> Self {
        Self {
            last_text: text.to_string(),
            pen_time,
            last_update: Some(now),
            generation: self.generation,
            replay_token: self.replay_token,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StartDecision {
    Continue { pen_time: f64, burst: bool },
    Restart,
}

#[derive(Debug, Clone, Copy)]
pub struct StartRequest<'a> {
    pub text: &'a str,
    pub replay_token: u64,
    /// Set when a model input other than the text changed.
    pub force_restart: bool,
    pub total_duration: f64,
    pub now: f64,
    pub options: PlaybackOptions,
}

const NO_PREVIOUS_UPDATE_MS: f64 = 1000.0;

/// Continue only for an append-only edit within the same replay token,
/// in incremental mode, while not looping.
pub fn decide_start(previous: Option<&PlaybackState>, request: &StartRequest<'_>) -> StartDecision {
    let Some(previous) = previous else {
        return StartDecision::Restart;
    };
    let options = request.options;
    let can_append = options.incremental
        && !options.auto_replay
        && !request.force_restart
        && previous.replay_token == request.replay_token
        && request.text.starts_with(previous.last_text.as_str());
    if !can_append {
        return StartDecision::Restart;
    }

    let elapsed = previous
        .last_update
        .map_or(NO_PREVIOUS_UPDATE_MS, |last| request.now - last);
    StartDecision::Continue {
        pen_time: previous.pen_time.min(request.total_duration),
        burst: is_typing_burst(elapsed, options.quality),
    }
}
