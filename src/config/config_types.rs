// src/config/config_types.rs
//
// Config sections for the viewer

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct PathConfig {
    pub font_file: String,
    /// Typing script JSON, replayed into the text on startup.
    #[serde(default)]
    pub script_file: Option<String>,
    /// Second font the viewer can switch to.
    #[serde(default)]
    pub alt_font_file: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Deserialize)]
pub struct OscConfig {
    pub rx_port: u16,
}

impl Default for OscConfig {
    fn default() -> Self {
        Self { rx_port: 9000 }
    }
}
