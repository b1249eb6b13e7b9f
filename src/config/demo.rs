//! config/demo.rs Timing knobs for the simulated dashboard.
//!
//! All values are milliseconds unless the field name says otherwise. Tests
//! build their own copies of these structs when they need a fixed schedule.

/// Typing simulation speeds (words per minute).
#[derive(Debug, Clone, Copy)]
pub struct TypingSettings {
    pub human_wpm: u32,
    pub synthetic_wpm: u32,
}

/// Per-widget card rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationSettings {
    // Each widget draws its period from [min, max] once per mount
    pub min_interval_ms: u64,
    pub max_interval_ms: u64,
    // Quiet period after the last hover/scroll before auto-rotation resumes
    pub resume_quiet_ms: u64,
    // Card flip animation length; wheel steps inside it are dropped
    pub scroll_cooldown_ms: u64,
}

/// Scenario playback driven by the engine.
#[derive(Debug, Clone, Copy)]
pub struct PlaybackSettings {
    // Used when a step does not carry its own delay
    pub default_step_delay_ms: u64,
    // Delay before the canned reply to a manual chat message starts typing
    pub manual_reply_delay_ms: u64,
    // Pause between steps when autoplay is enabled without an explicit value
    pub default_autoplay_pause_ms: u64,
}

/// Background feeds that keep the dashboard looking alive.
#[derive(Debug, Clone, Copy)]
pub struct FeedSettings {
    pub headline_refresh_ms: u64,
    // Half-width of the jitter applied to headline percentages
    pub headline_jitter: f64,
    pub anomaly_scan_every_ms: u64,
    pub anomaly_scan_duration_ms: u64,
    pub anomaly_label_age_ms: u64,
    pub narrative_cycle_ms: u64,
    pub opportunity_cycle_ms: u64,
    pub opportunity_synthesis_ms: u64,
    pub narrative_thinking_ms: u64,
    pub task_refresh_ms: u64,
    // Upper bound of the random progress added to each task per refresh (percent)
    pub task_max_progress_step: f64,
}

/// The Master Demo Configuration
#[derive(Debug, Clone, Copy)]
pub struct DemoConfig {
    pub typing: TypingSettings,
    pub rotation: RotationSettings,
    pub playback: PlaybackSettings,
    pub feeds: FeedSettings,
}

pub const DEMO: DemoConfig = DemoConfig {
    typing: TypingSettings {
        human_wpm: 60,
        synthetic_wpm: 180,
    },

    rotation: RotationSettings {
        min_interval_ms: 4_000,
        max_interval_ms: 10_000,
        resume_quiet_ms: 3_000,
        scroll_cooldown_ms: 600,
    },

    playback: PlaybackSettings {
        default_step_delay_ms: 500,
        manual_reply_delay_ms: 1_000,
        default_autoplay_pause_ms: 2_500,
    },

    feeds: FeedSettings {
        headline_refresh_ms: 8_000,
        headline_jitter: 0.025,
        anomaly_scan_every_ms: 30_000,
        anomaly_scan_duration_ms: 2_000,
        anomaly_label_age_ms: 60_000,
        narrative_cycle_ms: 15_000,
        opportunity_cycle_ms: 20_000,
        opportunity_synthesis_ms: 1_500,
        narrative_thinking_ms: 2_000,
        task_refresh_ms: 3_000,
        task_max_progress_step: 2.0,
    },
};
