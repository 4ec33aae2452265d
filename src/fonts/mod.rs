// src/fonts/mod.rs
//
// Font loading and the per-font data the timeline needs:
// a glyph source seam over ttf-parser, the inferred drawing profile,
// and the process-wide cache of loaded fonts.

pub mod cache;
pub mod entry;
pub mod error;
pub mod profile;
pub mod source;

#[cfg(test)]
pub(crate) mod test_font;

pub use cache::{FontCache, FontLookup};
pub use entry::FontEntry;
pub use error::FontLoadError;
pub use profile::{FontProfile, ProfileOverrides};
pub use source::{FontMetrics, GlyphSource};
