// src/lib.rs
//
// penora: text rendered as an animated handwriting stroke.
// Glyph outlines become ordered pen strokes, a seeded timeline paces
// them, and a pen-time clock plays them back onto a raster surface.

pub mod config;
pub mod controllers;
pub mod fonts;
pub mod geometry;
pub mod models;
pub mod pacing;
pub mod playback;
pub mod render;
pub mod timeline;

pub use render::{HandwritingSurface, RenderRequest};
