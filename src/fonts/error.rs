// src/fonts/error.rs

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("failed to read font {font_ref}: {source}")]
    Io {
        font_ref: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse font {font_ref}: {source}")]
    Parse {
        font_ref: String,
        #[source]
        source: ttf_parser::FaceParsingError,
    },
    #[error("remote font references are not supported: {font_ref}")]
    UnsupportedScheme { font_ref: String },
    #[error("failed to start loader for {font_ref}: {source}")]
    Spawn {
        font_ref: String,
        #[source]
        source: std::io::Error,
    },
}

impl FontLoadError {
    pub fn font_ref(&self) -> &str {
        match self {
            FontLoadError::Io { font_ref, .. }
            | FontLoadError::Parse { font_ref, .. }
            | FontLoadError::UnsupportedScheme { font_ref }
            | FontLoadError::Spawn { font_ref, .. } => font_ref,
        }
    }
}
