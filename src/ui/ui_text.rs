/// All user-facing strings of the dashboard chrome. Scenario and feed content
/// lives with its data.
pub struct UiText {
    pub brand: &'static str,
    pub brand_tagline: &'static str,

    pub scenario_heading: &'static str,
    pub scenario_none: &'static str,
    pub scenario_finished: &'static str,
    pub button_start: &'static str,
    pub button_previous: &'static str,
    pub button_next: &'static str,
    pub button_reset: &'static str,
    pub autoplay_label: &'static str,
    pub variant_label: &'static str,

    pub chat_heading: &'static str,
    pub chat_subheading: &'static str,
    pub chat_placeholder: &'static str,
    pub chat_send: &'static str,
    pub chat_locked: &'static str,
    pub typing_suffix: &'static str,

    pub file_open: &'static str,
    pub file_download: &'static str,
    pub file_share: &'static str,

    pub headline_heading: &'static str,
    pub anomalies_heading: &'static str,
    pub anomalies_scanning: &'static str,
    pub anomalies_last_scan: &'static str,
    pub narrative_heading: &'static str,
    pub narrative_thinking: &'static str,
    pub narrative_confidence: &'static str,
    pub opportunities_heading: &'static str,
    pub opportunities_synthesizing: &'static str,
    pub tasks_heading: &'static str,
    pub footer_heading: &'static str,

    pub help_title: &'static str,
    pub help_intro: &'static str,
    pub help_next: &'static str,
    pub help_previous: &'static str,
    pub help_reset: &'static str,
    pub help_toggle: &'static str,
    pub help_wheel: &'static str,
}

pub const UI_TEXT: UiText = UiText {
    brand: "RISKILL",
    brand_tagline: "Executive Intelligence",

    scenario_heading: "Demo Scenarios",
    scenario_none: "No scenario loaded",
    scenario_finished: "Scenario complete",
    button_start: "▶ Start",
    button_previous: "◀ Back",
    button_next: "Next ▶",
    button_reset: "⟲ Reset",
    autoplay_label: "Autoplay",
    variant_label: "Layout",

    chat_heading: "Adam",
    chat_subheading: "Strategic Intelligence Assistant",
    chat_placeholder: "Ask Adam anything...",
    chat_send: "Send",
    chat_locked: "Chat is paused while a scenario plays",
    typing_suffix: " is typing...",

    file_open: "Open",
    file_download: "Download",
    file_share: "Share",

    headline_heading: "Enterprise Pulse",
    anomalies_heading: "Anomalies",
    anomalies_scanning: "Scanning...",
    anomalies_last_scan: "Last scan: ",
    narrative_heading: "Strategy Narrative",
    narrative_thinking: "Adam is thinking...",
    narrative_confidence: "Confidence",
    opportunities_heading: "Discovered Opportunities",
    opportunities_synthesizing: "Synthesizing new insight...",
    tasks_heading: "Adam is working on",
    footer_heading: "Intelligence Modules",

    help_title: "⌨ Keyboard Shortcuts",
    help_intro: "Scenario playback is keyboard driven:",
    help_next: "Next step",
    help_previous: "Previous step",
    help_reset: "Restart the scenario",
    help_toggle: "Toggle this help panel",
    help_wheel: "Mouse wheel over a KPI card flips through its stack",
};
