// src/playback/engine.rs
//
// One engine per live surface. Owns the pen-time clock and decides, on
// every new model, whether playback continues or starts over.

use super::brush::ink_unit;
use super::scheduler::FrameLoop;
use super::state::{
    decide_start, PlaybackOptions, PlaybackState, PlayheadGeneration, StartDecision, StartRequest,
};
use super::surface::{InkColor, RasterSurface};
use crate::pacing::catchup_multiplier;
use crate::timeline::DrawModel;
use log::debug;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackPhase {
    Idle,
    Continuing,
    Restarting,
    Static,
}

/// Everything about a presentation besides the model itself.
#[derive(Debug, Clone, Copy)]
pub struct Presentation<'a> {
    pub text: &'a str,
    pub options: PlaybackOptions,
    pub color: InkColor,
    pub replay_token: u64,
    pub force_restart: bool,
}

#[derive(Debug)]
pub struct PlaybackEngine {
    model: Option<Arc<DrawModel>>,
    state: Option<PlaybackState>,
    options: PlaybackOptions,
    color: InkColor,
    burst: bool,
    phase: PlaybackPhase,
    frames: FrameLoop,
    generation: PlayheadGeneration,
}

impl Default for PlaybackEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl PlaybackEngine {
    pub fn new() -> Self {
        Self {
            model: None,
            state: None,
            options: PlaybackOptions::default(),
            color: InkColor::default(),
            burst: false,
            phase: PlaybackPhase::Idle,
            frames: FrameLoop::new(),
            generation: PlayheadGeneration::default(),
        }
    }

    pub fn phase(&self) -> PlaybackPhase {
        self.phase
    }

    pub fn state(&self) -> Option<&PlaybackState> {
        self.state.as_ref()
    }

    pub fn pen_time(&self) -> f64 {
        self.state.as_ref().map_or(0.0, |state| state.pen_time)
    }

    pub fn generation(&self) -> PlayheadGeneration {
        self.generation
    }

    pub fn model(&self) -> Option<&Arc<DrawModel>> {
        self.model.as_ref()
    }

    /// True while frames are still wanted.
    pub fn is_animating(&self) -> bool {
        self.frames.is_running()
    }

    /// Takes a freshly built model. Cancels the running frame loop and
    /// either resumes at the stored pen time or starts a new generation.
    pub fn present<R: RasterSurface + ?Sized>(
        &mut self,
        model: Arc<DrawModel>,
        presentation: Presentation<'_>,
        now: f64,
        surface: &mut R,
    ) -> PlaybackPhase {
        self.frames.cancel();
        let (width, height) = model.pixel_size();
        surface.resize(width, height);

        self.options = presentation.options;
        self.color = presentation.color;
        self.model = Some(Arc::clone(&model));

        if !presentation.options.animate {
            let state = match &self.state {
                Some(previous) if previous.replay_token == presentation.replay_token => {
                    previous.continued(presentation.text, model.total_duration, now)
                }
                _ => {
                    self.generation = self.generation.next();
                    PlaybackState {
                        pen_time: model.total_duration,
                        ..PlaybackState::fresh(
                            self.generation,
                            presentation.text,
                            presentation.replay_token,
                            now,
                        )
                    }
                }
            };
            self.state = Some(state);
            self.burst = false;
            self.phase = PlaybackPhase::Static;
            self.draw_frame(surface);
            return self.phase;
        }

        let request = StartRequest {
            text: presentation.text,
            replay_token: presentation.replay_token,
            force_restart: presentation.force_restart,
            total_duration: model.total_duration,
            now,
            options: presentation.options,
        };
        let continued = match decide_start(self.state.as_ref(), &request) {
            StartDecision::Continue { pen_time, burst } => self
                .state
                .as_ref()
                .map(|previous| (previous.continued(presentation.text, pen_time, now), burst)),
            StartDecision::Restart => None,
        };
        match continued {
            Some((state, burst)) => {
                debug!(
                    "continuing at {:.0} of {:.0} ms (burst: {})",
                    state.pen_time, model.total_duration, burst
                );
                self.state = Some(state);
                self.burst = burst;
                self.phase = PlaybackPhase::Continuing;
            }
            None => {
                self.generation = self.generation.next();
                debug!("restarting playback, generation {}", self.generation.0);
                self.state = Some(PlaybackState::fresh(
                    self.generation,
                    presentation.text,
                    presentation.replay_token,
                    now,
                ));
                self.burst = false;
                self.phase = PlaybackPhase::Restarting;
            }
        }

        self.frames.start();
        self.draw_frame(surface);
        self.phase
    }

    /// One display refresh. Returns whether another frame is wanted.
    pub fn tick<R: RasterSurface + ?Sized>(&mut self, now: f64, surface: &mut R) -> bool {
        let Some(model) = self.model.clone() else {
            return false;
        };
        let Some(dt) = self.frames.advance(now) else {
            return false;
        };
        let Some(state) = &mut self.state else {
            self.frames.cancel();
            return false;
        };

        let total = model.total_duration;
        let backlog = (total - state.pen_time).max(0.0);
        state.pen_time += dt * catchup_multiplier(backlog, self.burst, self.options.quality);
        if self.options.auto_replay && total > 0.0 {
            state.pen_time %= total;
        } else {
            state.pen_time = state.pen_time.min(total);
        }
        let finished = !self.options.auto_replay && state.pen_time >= total;

        self.draw_frame(surface);

        if finished {
            self.frames.cancel();
        }
        !finished
    }

    /// Redraws the current model at the current pen time.
    pub fn draw_frame<R: RasterSurface + ?Sized>(&self, surface: &mut R) {
        surface.clear();
        let Some(model) = &self.model else {
            return;
        };
        if self.phase == PlaybackPhase::Static {
            for unit in &model.units {
                ink_unit(surface, unit, 1.0, self.color);
            }
            return;
        }
        let pen_time = self.pen_time();
        for unit in &model.units {
            let progress = unit.progress_at(pen_time);
            if progress > 0.0 {
                ink_unit(surface, unit, progress, self.color);
            }
        }
    }

    /// Cancels pending frames. The last state is kept so a later
    /// presentation can still continue from it.
    pub fn release(&mut self) {
        self.frames.cancel();
    }

    /// Drops model and state.
    pub fn reset(&mut self) {
        self.frames.cancel();
        self.model = None;
        self.state = None;
        self.burst = false;
        self.phase = PlaybackPhase::Idle;
    }
}
