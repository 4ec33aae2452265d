// src/fonts/entry.rs

use super::{FontLoadError, FontProfile};
use std::path::PathBuf;
use ttf_parser::Face;

/// A loaded font: its raw bytes and the profile inferred from them.
/// Never mutated after creation; shared through the cache as `Arc<FontEntry>`.
#[derive(Debug)]
pub struct FontEntry {
    font_ref: String,
    data: Vec<u8>,
    index: u32,
    profile: FontProfile,
}

impl FontEntry {
    pub fn from_bytes(font_ref: &str, data: Vec<u8>) -> Result<Self, FontLoadError> {
        let face = Face::parse(&data, 0).map_err(|source| FontLoadError::Parse {
            font_ref: font_ref.to_string(),
            source,
        })?;
        let profile = FontProfile::infer(&face, font_ref);

        Ok(Self {
            font_ref: font_ref.to_string(),
            data,
            index: 0,
            profile,
        })
    }

    pub fn load(font_ref: &str) -> Result<Self, FontLoadError> {
        let path = resolve_font_path(font_ref)?;
        let data = std::fs::read(&path).map_err(|source| FontLoadError::Io {
            font_ref: font_ref.to_string(),
            source,
        })?;
        Self::from_bytes(font_ref, data)
    }

    /// Re-borrows the parsed face. Parsing only reads the table directory.
    pub fn face(&self) -> Result<Face<'_>, FontLoadError> {
        Face::parse(&self.data, self.index).map_err(|source| FontLoadError::Parse {
            font_ref: self.font_ref.clone(),
            source,
        })
    }

    pub fn font_ref(&self) -> &str {
        &self.font_ref
    }

    pub fn profile(&self) -> FontProfile {
        self.profile
    }
}

/// Font references are local paths or `file://` URLs.
pub fn resolve_font_path(font_ref: &str) -> Result<PathBuf, FontLoadError> {
    if let Some(path) = font_ref.strip_prefix("file://") {
        return Ok(PathBuf::from(path));
    }
    let lowered = font_ref.to_ascii_lowercase();
    if lowered.starts_with("http://") || lowered.starts_with("https://") {
        return Err(FontLoadError::UnsupportedScheme {
            font_ref: font_ref.to_string(),
        });
    }
    Ok(PathBuf::from(font_ref))
}
