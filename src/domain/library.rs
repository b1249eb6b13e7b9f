//! Scenario catalog: the built-in library plus JSON-authored catalogs.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use super::scenario::{
    ActorKind, AlertDescriptor, Emphasis, FileRef, Scenario, Step, StepMetadata, TypingSpeed,
};

/// Read-only, process-wide set of scenarios. Shared behind an `Arc`.
/// Deserializing goes through the same checks as `new`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Scenario>", into = "Vec<Scenario>")]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl TryFrom<Vec<Scenario>> for ScenarioCatalog {
    type Error = anyhow::Error;

    fn try_from(scenarios: Vec<Scenario>) -> Result<Self> {
        Self::new(scenarios)
    }
}

impl From<ScenarioCatalog> for Vec<Scenario> {
    fn from(catalog: ScenarioCatalog) -> Self {
        catalog.scenarios
    }
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ScenarioCatalog {
    /// Validates and wraps a list of scenarios.
    pub fn new(scenarios: Vec<Scenario>) -> Result<Self> {
        if scenarios.is_empty() {
            bail!("scenario catalog is empty");
        }

        let mut scenario_ids = HashSet::new();
        for scenario in &scenarios {
            if !scenario_ids.insert(scenario.id.as_str()) {
                bail!("duplicate scenario id '{}'", scenario.id);
            }
            if scenario.steps.is_empty() {
                bail!("scenario '{}' has no steps", scenario.id);
            }
            let mut step_ids = HashSet::new();
            for step in &scenario.steps {
                if !step_ids.insert(step.id.as_str()) {
                    bail!(
                        "scenario '{}' repeats step id '{}'",
                        scenario.id,
                        step.id
                    );
                }
            }
        }

        Ok(Self { scenarios })
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let scenarios: Vec<Scenario> =
            serde_json::from_str(json).context("scenario catalog is not valid JSON")?;
        Self::new(scenarios)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario catalog {:?}", path))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Failed to load scenario catalog {:?}", path))
    }

    pub fn get(&self, id: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.scenarios.iter().map(|s| s.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// The four cinematic scenes the demo ships with.
    pub fn builtin() -> Self {
        Self {
            scenarios: vec![
                onboarding_care(),
                weekend_insight(),
                crisis_prevention(),
                morning_synthesis(),
            ],
        }
    }
}

// --- Built-in library ---

fn ai(id: &str, content: &str) -> Step {
    Step {
        id: id.to_string(),
        kind: ActorKind::AiMessage,
        content: content.to_string(),
        delay_ms: None,
        typing_speed: Some(TypingSpeed::Synthetic),
        metadata: None,
    }
}

fn joe(id: &str, content: &str) -> Step {
    Step {
        id: id.to_string(),
        kind: ActorKind::UserMessage,
        content: content.to_string(),
        delay_ms: None,
        typing_speed: Some(TypingSpeed::Human),
        metadata: None,
    }
}

fn meta(
    emphasis: Emphasis,
    files: &[(&str, &str, &str)],
    metrics: &[(&str, &str)],
    alerts: &[(&str, &str, &str)],
) -> Option<StepMetadata> {
    Some(StepMetadata {
        metrics: metrics
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect::<BTreeMap<_, _>>(),
        alerts: alerts
            .iter()
            .map(|(kind, message, severity)| AlertDescriptor {
                kind: kind.to_string(),
                message: message.to_string(),
                severity: severity.to_string(),
            })
            .collect(),
        files: files
            .iter()
            .map(|(name, icon, preview)| FileRef {
                name: name.to_string(),
                icon: icon.to_string(),
                preview: preview.to_string(),
            })
            .collect(),
        emphasis: Some(emphasis),
    })
}

fn onboarding_care() -> Scenario {
    Scenario {
        id: "onboarding-care".into(),
        title: "Onboarding Care".into(),
        description: "Adam shows intimate knowledge of Joe's workflow".into(),
        steps: vec![
            Step {
                metadata: meta(
                    Emphasis::Medium,
                    &[
                        ("clickup-integration.json", "🔗", "ClickUp workspace connection"),
                        ("slack-channels.md", "💬", "Active Slack channels analysis"),
                    ],
                    &[],
                    &[],
                ),
                ..ai(
                    "adam-greeting",
                    "Hey Joe, how's your onboarding going? I notice you're getting notifications from ClickUp and Slack - jumping between systems can be tedious. Should we connect those?",
                )
            },
            joe("joe-response", "Sure, that's thoughtful. Go ahead."),
            Step {
                metadata: meta(
                    Emphasis::Large,
                    &[],
                    &[
                        ("Connected Systems", "2"),
                        ("Priority Tasks", "3"),
                        ("Integration Status", "Active"),
                    ],
                    &[],
                ),
                ..ai(
                    "adam-integration",
                    "Perfect! I've connected your ClickUp tasks and Slack channels. I can now see you have 3 high-priority items due this week. Want me to create a focused work plan?",
                )
            },
        ],
    }
}

fn weekend_insight() -> Scenario {
    Scenario {
        id: "weekend-insight".into(),
        title: "Weekend Dedication".into(),
        description: "Adam demonstrates loyalty by working weekends".into(),
        steps: vec![
            Step {
                metadata: meta(
                    Emphasis::Dramatic,
                    &[
                        ("revenue-correlation.insight", "📊", "Q3 revenue pattern analysis"),
                        ("competitor-pricing.json", "💰", "Market pricing intelligence"),
                        ("strategic-opportunity.md", "🎯", "Competitive advantage analysis"),
                    ],
                    &[],
                    &[],
                ),
                ..ai(
                    "weekend-analysis",
                    "Morning Joe! I was running analysis over the weekend and found something interesting. Your Q3 revenue patterns correlate with competitor pricing changes 72 hours earlier. This could be a strategic advantage.",
                )
            },
            joe(
                "joe-surprise",
                "You worked on this over the weekend? That's incredible insight.",
            ),
            Step {
                metadata: meta(
                    Emphasis::Large,
                    &[],
                    &[],
                    &[("opportunity", "Strategic pricing advantage identified", "high")],
                ),
                ..ai(
                    "adam-dedication",
                    "Of course! Market patterns don't wait for business hours. I've prepared three strategic scenarios based on this correlation. Should we review them now or schedule for your 2 PM strategy block?",
                )
            },
        ],
    }
}

fn crisis_prevention() -> Scenario {
    Scenario {
        id: "crisis-prevention".into(),
        title: "Proactive Crisis Prevention".into(),
        description: "Adam prevents problems before they happen".into(),
        steps: vec![
            Step {
                metadata: meta(
                    Emphasis::Dramatic,
                    &[],
                    &[],
                    &[
                        ("warning", "Operational anomaly detected", "high"),
                        ("prediction", "Potential disruption in 48 hours", "critical"),
                    ],
                ),
                ..ai(
                    "urgent-flag",
                    "Joe, I need to flag something urgent. I've detected anomalous patterns in your operational metrics that preceded the Q2 supply chain disruption. We have about 48 hours to adjust before potential impact.",
                )
            },
            joe("joe-concern", "What kind of patterns? Show me the analysis."),
            Step {
                metadata: meta(
                    Emphasis::Large,
                    &[
                        ("anomaly-detection.json", "⚠️", "Operational pattern analysis"),
                        ("contingency-plan.md", "🛡️", "Crisis prevention protocols"),
                        ("supplier-alternatives.xlsx", "🏭", "Backup supplier network"),
                    ],
                    &[
                        ("Risk Level", "High"),
                        ("Time to Impact", "48 hours"),
                        ("Mitigation Options", "3"),
                    ],
                    &[],
                ),
                ..ai(
                    "adam-analysis",
                    "The same vendor delivery variance and inventory buffer depletion we saw in Q2. I've already drafted contingency protocols and identified 3 alternative suppliers. Should I initiate the backup plan?",
                )
            },
        ],
    }
}

fn morning_synthesis() -> Scenario {
    Scenario {
        id: "morning-synthesis".into(),
        title: "Morning Strategic Synthesis".into(),
        description: "Adam provides comprehensive morning briefing".into(),
        steps: vec![
            Step {
                metadata: meta(
                    Emphasis::Medium,
                    &[
                        ("market-overnight.json", "🌙", "Overnight market analysis"),
                        ("calendar-priorities.md", "📅", "Today's strategic priorities"),
                        ("team-updates.summary", "👥", "Team status synthesis"),
                    ],
                    &[],
                    &[],
                ),
                ..ai(
                    "morning-briefing",
                    "Morning Joe! I've synthesized overnight market data, your calendar priorities, and team updates. Three key items need your attention: the partnership proposal review, Q4 budget allocation, and the new hire onboarding strategy.",
                )
            },
            joe(
                "joe-prioritize",
                "Let's start with the partnership proposal. What's your recommendation?",
            ),
            Step {
                metadata: meta(
                    Emphasis::Large,
                    &[
                        ("partnership-analysis.insight", "🤝", "Partnership evaluation matrix"),
                        ("negotiation-strategy.md", "💼", "Strategic negotiation points"),
                        ("risk-assessment.json", "📊", "Integration risk analysis"),
                    ],
                    &[
                        ("Value Increase", "+23%"),
                        ("Risk Reduction", "Moderate"),
                        ("Recommendation", "Proceed with modifications"),
                    ],
                    &[],
                ),
                ..ai(
                    "adam-recommendation",
                    "Based on their financial stability, market position, and cultural alignment scores, I recommend proceeding with modified terms. I've highlighted 3 negotiation points that could increase value by 23% while reducing integration risk.",
                )
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_library_is_valid() {
        let builtin = ScenarioCatalog::builtin();
        let validated = ScenarioCatalog::new(builtin.scenarios().to_vec()).unwrap();
        assert_eq!(validated.len(), 4);
        assert_eq!(
            validated.ids().collect::<Vec<_>>(),
            vec![
                "onboarding-care",
                "weekend-insight",
                "crisis-prevention",
                "morning-synthesis"
            ]
        );
        assert!(validated.scenarios().iter().all(|s| s.len() == 3));
    }

    #[test]
    fn builtin_files_exist_in_mock_table() {
        let catalog = ScenarioCatalog::builtin();
        for scenario in catalog.scenarios() {
            for step in &scenario.steps {
                for file in step.files() {
                    assert!(
                        crate::domain::mock_files::lookup(&file.name).is_some(),
                        "{} missing from mock file table",
                        file.name
                    );
                }
            }
        }
    }

    #[test]
    fn json_round_trip_keeps_catalog() {
        let catalog = ScenarioCatalog::builtin();
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(ScenarioCatalog::from_json_str(&json).unwrap(), catalog);
    }

    #[test]
    fn rejects_invalid_catalogs() {
        assert!(ScenarioCatalog::from_json_str("[]").is_err());
        assert!(ScenarioCatalog::from_json_str("not json").is_err());

        let empty_steps = r#"[{ "id": "a", "title": "A", "description": "", "steps": [] }]"#;
        let err = ScenarioCatalog::from_json_str(empty_steps).unwrap_err();
        assert!(err.to_string().contains("has no steps"));

        let step = r#"{ "id": "s", "type": "ai_message", "content": "x" }"#;
        let duplicate_steps = format!(
            r#"[{{ "id": "a", "title": "A", "description": "", "steps": [{step}, {step}] }}]"#
        );
        let err = ScenarioCatalog::from_json_str(&duplicate_steps).unwrap_err();
        assert!(err.to_string().contains("repeats step id"));

        let scenario = format!(r#"{{ "id": "a", "title": "A", "description": "", "steps": [{step}] }}"#);
        let duplicate_scenarios = format!("[{scenario}, {scenario}]");
        let err = ScenarioCatalog::from_json_str(&duplicate_scenarios).unwrap_err();
        assert!(err.to_string().contains("duplicate scenario id"));
    }

    #[test]
    fn deserialize_applies_catalog_checks() {
        let empty_steps = r#"[{"id":"x","title":"X","description":"d","steps":[]}]"#;
        let err = serde_json::from_str::<ScenarioCatalog>(empty_steps).unwrap_err();
        assert!(err.to_string().contains("has no steps"), "{err}");

        let step = r#"{"id":"a","type":"ai_message","content":"Hi","delay":0}"#;
        let duplicate = format!(
            r#"[{{"id":"x","title":"X","description":"d","steps":[{step}]}},
                {{"id":"x","title":"Y","description":"d","steps":[{step}]}}]"#
        );
        assert!(serde_json::from_str::<ScenarioCatalog>(&duplicate).is_err());
        assert!(serde_json::from_str::<ScenarioCatalog>("[]").is_err());

        let valid = format!(r#"[{{"id":"x","title":"X","description":"d","steps":[{step}]}}]"#);
        let catalog: ScenarioCatalog = serde_json::from_str(&valid).unwrap();
        assert_eq!(catalog.ids().collect::<Vec<_>>(), vec!["x"]);
    }

    #[test]
    fn lookup_by_id() {
        let catalog = ScenarioCatalog::builtin();
        let scenario = catalog.get("crisis-prevention").unwrap();
        assert_eq!(scenario.title, "Proactive Crisis Prevention");
        assert!(catalog.get("nope").is_none());
        assert!(!catalog.contains("nope"));
    }
}
