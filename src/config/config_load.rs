// src/config/config_load.rs
//
// loading of config.toml

use super::{OscConfig, PathConfig, WindowConfig};
use crate::render::RenderRequest;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
pub struct Config {
    pub paths: PathConfig,
    pub window: WindowConfig,
    #[serde(default)]
    pub render: RenderRequest,
    #[serde(default)]
    pub osc: OscConfig,
}

impl Config {
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        // First try to load from the executable's directory
        if let Some(exe_config) = Self::load_from_exe_dir() {
            return Ok(exe_config);
        }

        // Fallback to loading from the current working directory
        Self::load_from_working_dir()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(toml::from_str(content)?)
    }

    fn load_from_exe_dir() -> Option<Self> {
        let config_path = exe_dir()?.join("config.toml");

        if config_path.exists() {
            let content = fs::read_to_string(&config_path).ok()?;
            Self::from_toml_str(&content).ok()
        } else {
            None
        }
    }

    fn load_from_working_dir() -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string("config.toml")?;
        Self::from_toml_str(&content)
    }

    pub fn resolve_font_path(&self) -> PathBuf {
        resolve_relative(&self.paths.font_file)
    }

    pub fn resolve_script_path(&self) -> Option<PathBuf> {
        self.paths.script_file.as_deref().map(resolve_relative)
    }

    /// Font references the viewer cycles through, primary first.
    pub fn font_refs(&self) -> Vec<String> {
        std::iter::once(self.paths.font_file.as_str())
            .chain(self.paths.alt_font_file.as_deref())
            .map(|path| resolve_relative(path).to_string_lossy().into_owned())
            .collect()
    }

    /// The configured render defaults, pointed at the configured font.
    pub fn render_request(&self) -> RenderRequest {
        RenderRequest {
            font_ref: self.resolve_font_path().to_string_lossy().into_owned(),
            ..self.render.clone()
        }
    }
}

fn exe_dir() -> Option<PathBuf> {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
}

// Relative paths resolve next to the executable when something is
// there, otherwise against the working directory.
fn resolve_relative(path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
        return PathBuf::from(path);
    }
    exe_dir()
        .map(|dir| dir.join(path))
        .filter(|candidate| candidate.exists())
        .unwrap_or_else(|| PathBuf::from(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pacing::{Quality, Seed};
    use crate::playback::InkColor;

    const SAMPLE: &str = r##"
[paths]
font_file = "/fonts/Caveat.ttf"
script_file = "scripts/hello.json"
alt_font_file = "/fonts/DejaVuSans.ttf"

[window]
width = 1280
height = 480

[render]
text = "Hello"
size = 96.0
quality = "calm"
seed = "ink"
color = "#224488"
auto_replay = true

[render.profile]
outer_only = true

[osc]
rx_port = 9100
"##;

    #[test]
    fn test_parse_sample() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.osc.rx_port, 9100);
        assert_eq!(config.render.text, "Hello");
        assert_eq!(config.render.size, 96.0);
        assert_eq!(config.render.quality, Quality::Calm);
        assert_eq!(config.render.seed, Seed::Text("ink".to_string()));
        assert_eq!(config.render.color, InkColor::rgb(0x22, 0x44, 0x88));
        assert!(config.render.auto_replay);
        assert_eq!(config.render.profile.outer_only, Some(true));
        assert_eq!(config.render.speed, 1.0);
    }

    #[test]
    fn test_render_request_uses_font_file() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        let request = config.render_request();
        assert_eq!(request.font_ref, "/fonts/Caveat.ttf");
        assert_eq!(request.text, "Hello");
    }

    #[test]
    fn test_optional_sections() {
        let config = Config::from_toml_str(
            "[paths]\nfont_file = \"a.ttf\"\n[window]\nwidth = 10\nheight = 10\n",
        )
        .unwrap();
        assert_eq!(config.render, RenderRequest::default());
        assert_eq!(config.osc.rx_port, 9000);
        assert!(config.resolve_script_path().is_none());
        assert_eq!(config.font_refs().len(), 1);
    }

    #[test]
    fn test_font_refs_put_primary_first() {
        let config = Config::from_toml_str(SAMPLE).unwrap();
        assert_eq!(
            config.font_refs(),
            vec!["/fonts/Caveat.ttf".to_string(), "/fonts/DejaVuSans.ttf".to_string()]
        );
    }

    #[test]
    fn test_missing_section_is_an_error() {
        assert!(Config::from_toml_str("[window]\nwidth = 10\nheight = 10\n").is_err());
    }
}
