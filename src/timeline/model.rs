// src/timeline/model.rs

use crate::geometry::{FillShape, Polyline};

/// One drawable grapheme. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeUnit {
    pub grapheme: String,
    pub line: usize,
    pub fill_shape: FillShape,
    pub segments: Vec<Polyline>,
    pub path_length: f32,
    pub brush_width: f32,
    pub seed: f64,
    /// Pen-down start on the shared timeline, ms.
    pub delay: f64,
    /// Pen-down length, ms. Always > 0.
    pub duration: f64,
}

impl StrokeUnit {
    pub fn end(&self) -> f64 {
        self.delay + self.duration
    }

    /// Fraction of this unit inked at `pen_time`, in `[0, 1]`.
    pub fn progress_at(&self, pen_time: f64) -> f64 {
        crate::pacing::clamp((pen_time - self.delay) / self.duration, 0.0, 1.0)
    }
}

/// The result of one timeline build. A new one is built whenever any
/// input changes; existing models are never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawModel {
    pub width: f64,
    pub height: f64,
    pub units: Vec<StrokeUnit>,
    pub total_duration: f64,
}

impl DrawModel {
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            self.width.ceil().max(1.0) as u32,
            self.height.ceil().max(1.0) as u32,
        )
    }
}
