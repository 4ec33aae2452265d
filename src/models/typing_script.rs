// src/models/typing_script.rs
// the JSON typing script: timed edits that simulate a caller streaming text

use crate::pacing::segment_graphemes;
use serde::{Deserialize, Serialize};

use std::fs;
use std::path::Path;

use std::error::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepAction {
    Set(String),
    Append(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptStep {
    #[serde(rename = "atMs")]
    pub at_ms: f64,
    #[serde(flatten)]
    pub action: StepAction,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypingScript {
    #[serde(default)]
    pub name: String,
    pub steps: Vec<ScriptStep>,
}

impl TypingScript {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self, Box<dyn Error>> {
        let mut script: TypingScript = serde_json::from_str(content)?;
        script.steps.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
        Ok(script)
    }

    /// One grapheme appended every `interval_ms`, starting at `start_ms`.
    pub fn typed(text: &str, start_ms: f64, interval_ms: f64) -> Self {
        let steps = segment_graphemes(text)
            .into_iter()
            .enumerate()
            .map(|(i, grapheme)| ScriptStep {
                at_ms: start_ms + i as f64 * interval_ms,
                action: StepAction::Append(grapheme.to_string()),
            })
            .collect();
        Self {
            name: String::from("typed"),
            steps,
        }
    }

    /// The text after every step due by `elapsed_ms`.
    pub fn text_at(&self, elapsed_ms: f64) -> String {
        let mut text = String::new();
        for step in self.steps.iter().take_while(|step| step.at_ms <= elapsed_ms) {
            match &step.action {
                StepAction::Set(value) => text = value.clone(),
                StepAction::Append(value) => text.push_str(value),
            }
        }
        text
    }

    pub fn duration(&self) -> f64 {
        self.steps.last().map_or(0.0, |step| step.at_ms)
    }

    pub fn is_finished(&self, elapsed_ms: f64) -> bool {
        elapsed_ms >= self.duration()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCRIPT: &str = r#"{
        "name": "greeting",
        "steps": [
            {"atMs": 300, "append": " there"},
            {"atMs": 0, "set": "hi"},
            {"atMs": 900, "set": "bye"}
        ]
    }"#;

    #[test]
    fn test_text_at() {
        let script = TypingScript::from_json(SCRIPT).unwrap();
        assert_eq!(script.name, "greeting");
        assert_eq!(script.text_at(-1.0), "");
        assert_eq!(script.text_at(0.0), "hi");
        assert_eq!(script.text_at(450.0), "hi there");
        assert_eq!(script.text_at(901.0), "bye");
        assert_eq!(script.duration(), 900.0);
        assert!(script.is_finished(900.0));
    }

    #[test]
    fn test_typed_appends_graphemes() {
        let script = TypingScript::typed("e\u{301}a", 100.0, 50.0);
        assert_eq!(script.steps.len(), 2);
        assert_eq!(script.text_at(100.0), "e\u{301}");
        assert_eq!(script.text_at(150.0), "e\u{301}a");
        assert!(!script.is_finished(120.0));
    }

    #[test]
    fn test_appends_are_prefix_extensions() {
        let script = TypingScript::typed("streaming", 0.0, 30.0);
        let mut previous = String::new();
        for step in 0..12 {
            let text = script.text_at(step as f64 * 30.0);
            assert!(text.starts_with(&previous));
            previous = text;
        }
        assert_eq!(previous, "streaming");
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(TypingScript::from_json("{\"steps\": [{\"atMs\": 1}]}").is_err());
        assert!(TypingScript::load("/no/such/script.json").is_err());
    }
}
