// src/timeline/mod.rs
//
// The timeline builder turns text and a font into a DrawModel: one
// stroke unit per visible grapheme, each with its place on a shared
// millisecond timeline.

pub mod builder;
pub mod complexity;
pub mod model;

pub use builder::{build_draw_model, TimelineParams};
pub use complexity::{complexity_score, is_punctuation, is_whitespace};
pub use model::{DrawModel, StrokeUnit};
