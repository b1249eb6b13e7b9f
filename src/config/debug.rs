//! Debugging feature flags.
//!
//! Toggle individual diagnostics here; keep them `false` by default so the
//! terminal stays quiet. Every use site is additionally gated by
//! `cfg(debug_assertions)`.

pub struct DebugFlags {
    /// Emit every orchestration transition and its outcome.
    pub print_transitions: bool,

    /// Emit typing-simulation start/finish (not every word tick).
    pub print_typing: bool,

    /// Emit widget rotation ticks, pauses and resumes.
    pub print_rotation: bool,

    /// Emit background feed refreshes (metric jitter, anomaly scans, task progress).
    pub print_feeds: bool,

    /// Emit UI interaction logs (variant switches, hover enter/leave, clicks).
    pub print_ui_interactions: bool,

    /// Emit details of UI state serialization/deserialization.
    pub print_state_serde: bool,

    /// Emit shutdown app messages.
    pub print_shutdown: bool,
}

pub const DEBUG_FLAGS: DebugFlags = DebugFlags {
    print_transitions: true,
    print_typing: false,
    print_rotation: false,
    print_feeds: false,
    print_ui_interactions: false,
    print_state_serde: false,
    print_shutdown: false,
};
