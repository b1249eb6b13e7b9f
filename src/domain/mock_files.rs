//! Mock file system for the attachment previews.
//!
//! Purely visual: the table is static, and the "actions" only log what a real
//! client would have done.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::EnumIter)]
pub enum FileCategory {
    Insight,
    Analysis,
    Report,
    Data,
    Strategy,
}

impl fmt::Display for FileCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileCategory::Insight => "insight",
            FileCategory::Analysis => "analysis",
            FileCategory::Report => "report",
            FileCategory::Data => "data",
            FileCategory::Strategy => "strategy",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockFile {
    pub name: &'static str,
    pub icon: &'static str,
    pub preview: &'static str,
    pub category: FileCategory,
    pub size: &'static str,
    pub last_modified: &'static str,
}

/// What the user asked to do with an attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    Open,
    Download,
    Share,
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileAction::Open => write!(f, "opening"),
            FileAction::Download => write!(f, "download of"),
            FileAction::Share => write!(f, "sharing"),
        }
    }
}

const fn file(
    name: &'static str,
    icon: &'static str,
    preview: &'static str,
    category: FileCategory,
    size: &'static str,
    last_modified: &'static str,
) -> MockFile {
    MockFile {
        name,
        icon,
        preview,
        category,
        size,
        last_modified,
    }
}

pub static MOCK_FILES: &[MockFile] = &[
    file(
        "revenue-correlation.insight",
        "📊",
        "Q3 revenue pattern analysis showing 72-hour correlation with competitor pricing",
        FileCategory::Insight,
        "2.4 KB",
        "2 hours ago",
    ),
    file(
        "competitor-pricing.json",
        "💰",
        "Market pricing intelligence data with trend analysis",
        FileCategory::Data,
        "15.7 KB",
        "3 hours ago",
    ),
    file(
        "strategic-opportunity.md",
        "🎯",
        "Competitive advantage analysis and strategic recommendations",
        FileCategory::Strategy,
        "8.2 KB",
        "1 hour ago",
    ),
    file(
        "clickup-integration.json",
        "🔗",
        "ClickUp workspace connection and task synchronization data",
        FileCategory::Data,
        "4.1 KB",
        "30 minutes ago",
    ),
    file(
        "slack-channels.md",
        "💬",
        "Active Slack channels analysis and communication patterns",
        FileCategory::Analysis,
        "6.8 KB",
        "45 minutes ago",
    ),
    file(
        "anomaly-detection.json",
        "⚠️",
        "Operational pattern analysis with anomaly detection algorithms",
        FileCategory::Analysis,
        "12.3 KB",
        "1 hour ago",
    ),
    file(
        "contingency-plan.md",
        "🛡️",
        "Crisis prevention protocols and emergency response procedures",
        FileCategory::Strategy,
        "9.5 KB",
        "2 hours ago",
    ),
    file(
        "supplier-alternatives.xlsx",
        "🏭",
        "Backup supplier network with risk assessments and contact details",
        FileCategory::Data,
        "18.9 KB",
        "3 hours ago",
    ),
    file(
        "market-overnight.json",
        "🌙",
        "Overnight market analysis with global trend indicators",
        FileCategory::Analysis,
        "7.6 KB",
        "6 hours ago",
    ),
    file(
        "calendar-priorities.md",
        "📅",
        "Today's strategic priorities with time allocation recommendations",
        FileCategory::Strategy,
        "3.2 KB",
        "1 hour ago",
    ),
    file(
        "team-updates.summary",
        "👥",
        "Team status synthesis with project progress and blockers",
        FileCategory::Report,
        "5.4 KB",
        "2 hours ago",
    ),
    file(
        "partnership-analysis.insight",
        "🤝",
        "Partnership evaluation matrix with financial and cultural alignment scores",
        FileCategory::Insight,
        "11.2 KB",
        "4 hours ago",
    ),
    file(
        "negotiation-strategy.md",
        "💼",
        "Strategic negotiation points with value optimization recommendations",
        FileCategory::Strategy,
        "6.7 KB",
        "3 hours ago",
    ),
    file(
        "risk-assessment.json",
        "📊",
        "Integration risk analysis with mitigation strategies",
        FileCategory::Analysis,
        "9.8 KB",
        "2 hours ago",
    ),
];

pub fn lookup(name: &str) -> Option<&'static MockFile> {
    MOCK_FILES.iter().find(|f| f.name == name)
}

/// Logs the action a real client would perform. Returns false for unknown files.
pub fn simulate_file_action(name: &str, action: FileAction) -> bool {
    match lookup(name) {
        Some(file) => {
            log::info!("[demo] Simulating {} {} ({})", action, file.name, file.size);
            true
        }
        None => {
            log::warn!("[demo] No mock file named {}", name);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let names: HashSet<_> = MOCK_FILES.iter().map(|f| f.name).collect();
        assert_eq!(names.len(), MOCK_FILES.len());
    }

    #[test]
    fn lookup_and_actions() {
        let file = lookup("contingency-plan.md").unwrap();
        assert_eq!(file.category, FileCategory::Strategy);
        assert_eq!(file.size, "9.5 KB");

        assert!(simulate_file_action("contingency-plan.md", FileAction::Share));
        assert!(!simulate_file_action("missing.txt", FileAction::Open));
    }
}
