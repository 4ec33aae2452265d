// src/render/mod.rs
//
// The surface hosts render through.

pub mod handwriting;
pub mod request;

pub use handwriting::HandwritingSurface;
pub use request::{ModelKey, ModelSettings, RenderRequest};
