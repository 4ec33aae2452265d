// src/playback/mod.rs
//
// Playback: the pen-time clock, the continue-or-restart decision, and
// the brush that inks stroke units onto a raster surface.

pub mod brush;
pub mod engine;
pub mod ink;
pub mod scheduler;
pub mod state;
pub mod surface;

pub use brush::{draw_tapered_stroke, ink_unit};
pub use engine::{PlaybackEngine, PlaybackPhase, Presentation};
pub use ink::{ease_ink_progress, smoothstep, stroke_taper};
pub use scheduler::FrameLoop;
pub use state::{
    decide_start, PlaybackOptions, PlaybackState, PlayheadGeneration, StartDecision, StartRequest,
};
pub use surface::{InkColor, PixmapSurface, RasterSurface, DEFAULT_INK};
