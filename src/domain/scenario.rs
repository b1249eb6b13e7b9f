//! Scenario and step definitions.
//!
//! The serde shape matches the JSON scenario files the demo has always used
//! (`type`, `typingSpeed`, `copilotSize`, ...), so a catalog can be authored
//! outside the binary and loaded with `--scenarios`.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::DEMO;

/// Who (or what) a step speaks for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum ActorKind {
    AiMessage,
    UserMessage,
    SystemUpdate,
    MetricChange,
    AlertTrigger,
    FileAttachment,
}

impl ActorKind {
    /// Messages from the user render on the right-hand side of the chat.
    pub fn is_user(self) -> bool {
        matches!(self, ActorKind::UserMessage)
    }
}

impl fmt::Display for ActorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ActorKind::AiMessage => "Adam",
            ActorKind::UserMessage => "Joe",
            ActorKind::SystemUpdate => "System",
            ActorKind::MetricChange => "Metrics",
            ActorKind::AlertTrigger => "Alert",
            ActorKind::FileAttachment => "Files",
        };
        write!(f, "{label}")
    }
}

/// Typing speed class. Exactly two exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypingSpeed {
    #[serde(rename = "human")]
    Human,
    #[serde(rename = "ai", alias = "synthetic")]
    Synthetic,
}

impl TypingSpeed {
    pub fn words_per_minute(self) -> u32 {
        match self {
            TypingSpeed::Human => DEMO.typing.human_wpm,
            TypingSpeed::Synthetic => DEMO.typing.synthetic_wpm,
        }
    }
}

/// How much room the copilot panel takes while a step plays.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Emphasis {
    Small,
    #[default]
    Medium,
    Large,
    Dramatic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertDescriptor {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    pub severity: String,
}

/// A file shown as an attachment under a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub icon: String,
    pub preview: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepMetadata {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<AlertDescriptor>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileRef>,
    #[serde(rename = "copilotSize", default, skip_serializing_if = "Option::is_none")]
    pub emphasis: Option<Emphasis>,
}

/// One unit of scripted content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActorKind,
    pub content: String,
    /// Milliseconds to wait before typing starts.
    #[serde(rename = "delay", default, skip_serializing_if = "Option::is_none")]
    pub delay_ms: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typing_speed: Option<TypingSpeed>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<StepMetadata>,
}

impl Step {
    /// Steps without an explicit speed type at the synthetic rate.
    pub fn words_per_minute(&self) -> u32 {
        self.typing_speed
            .unwrap_or(TypingSpeed::Synthetic)
            .words_per_minute()
    }

    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(
            self.delay_ms
                .unwrap_or(DEMO.playback.default_step_delay_ms),
        )
    }

    pub fn files(&self) -> &[FileRef] {
        self.metadata
            .as_ref()
            .map(|m| m.files.as_slice())
            .unwrap_or(&[])
    }

    pub fn emphasis(&self) -> Emphasis {
        self.metadata
            .as_ref()
            .and_then(|m| m.emphasis)
            .unwrap_or_default()
    }
}

/// A named, ordered script of steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<Step>,
}

impl Scenario {
    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Index of the final step. Catalog validation guarantees `steps` is non-empty.
    pub fn last_index(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_json_wire_shape() {
        let json = r#"{
            "id": "adam-greeting",
            "type": "ai_message",
            "content": "Hello Joe",
            "typingSpeed": "ai",
            "metadata": {
                "copilotSize": "dramatic",
                "metrics": { "Priority Tasks": "3" },
                "alerts": [{ "type": "warning", "message": "Anomaly", "severity": "high" }],
                "files": [{ "name": "a.json", "icon": "🔗", "preview": "A" }]
            }
        }"#;
        let step: Step = serde_json::from_str(json).unwrap();

        assert_eq!(step.kind, ActorKind::AiMessage);
        assert_eq!(step.typing_speed, Some(TypingSpeed::Synthetic));
        assert_eq!(step.emphasis(), Emphasis::Dramatic);
        assert_eq!(step.files().len(), 1);
        assert_eq!(step.metadata.as_ref().unwrap().alerts[0].kind, "warning");
    }

    #[test]
    fn defaults_follow_demo_config() {
        let step = Step {
            id: "s".into(),
            kind: ActorKind::UserMessage,
            content: "hi".into(),
            delay_ms: None,
            typing_speed: None,
            metadata: None,
        };
        assert_eq!(step.words_per_minute(), 180);
        assert_eq!(step.start_delay(), Duration::from_millis(500));
        assert!(step.files().is_empty());

        let human = Step {
            typing_speed: Some(TypingSpeed::Human),
            delay_ms: Some(1_200),
            ..step
        };
        assert_eq!(human.words_per_minute(), 60);
        assert_eq!(human.start_delay(), Duration::from_millis(1_200));
    }
}
