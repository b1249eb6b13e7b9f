use std::collections::BTreeMap;
use std::time::Duration;

use eframe::egui;
use serde::{Deserialize, Serialize};

use crate::LaunchOptions;
use crate::config::DEMO;
use crate::domain::{DashboardVariant, WidgetId};
use crate::engine::DemoEngine;
use crate::ui::utils::setup_custom_visuals;
use crate::utils::{AppInstant, ms, now};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Repaint cadence while something animates (typing, queued steps).
const BUSY_FRAME: Duration = Duration::from_millis(16);
/// Longest wait between frames. Feed timers are not tracked by
/// `next_wakeup` and are all far coarser than this.
const IDLE_FRAME: Duration = Duration::from_millis(50);

/// How long to sleep before the next frame. An idle board wakes for its next
/// scheduled deadline, never later than `IDLE_FRAME`.
fn repaint_delay(busy: bool, next_wakeup: Option<AppInstant>, now: AppInstant) -> Duration {
    if busy {
        return BUSY_FRAME;
    }
    next_wakeup
        .map(|at| at.saturating_duration_since(now))
        .unwrap_or(IDLE_FRAME)
        .clamp(BUSY_FRAME, IDLE_FRAME)
}

#[derive(Deserialize, Serialize)]
pub struct DemoDeckApp {
    // Preferences
    #[serde(default)]
    pub(super) variant: DashboardVariant,
    #[serde(default)]
    pub(super) last_scenario: Option<String>,
    #[serde(default)]
    pub(super) autoplay_enabled: bool,
    #[serde(default = "default_autoplay_pause_ms")]
    pub(super) autoplay_pause_ms: u64,

    // Runtime state
    #[serde(skip)]
    pub(super) engine: DemoEngine,
    #[serde(skip)]
    pub(super) chat_draft: String,
    // Last known pointer containment per KPI stack, to turn per-frame
    // hover into enter/leave edges
    #[serde(skip)]
    pub(super) hovered: BTreeMap<WidgetId, bool>,

    // Help panel visibility
    #[serde(skip)]
    pub(super) show_help: bool,
}

fn default_autoplay_pause_ms() -> u64 {
    DEMO.playback.default_autoplay_pause_ms
}

impl DemoDeckApp {
    pub fn new(cc: &eframe::CreationContext<'_>, options: LaunchOptions) -> Self {
        let mut app: DemoDeckApp;

        // Attempt to load the persisted state
        if let Some(storage) = cc.storage {
            if let Some(value) = eframe::get_value(storage, eframe::APP_KEY) {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("Successfully loaded persisted state");
                }
                app = value;
            } else {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_state_serde {
                    log::info!("No persisted Demo Deck state. Creating anew.");
                }
                app = DemoDeckApp::new_with_initial_state();
            }
        } else {
            app = DemoDeckApp::new_with_initial_state();
        }

        app.apply_launch_options(options);
        app
    }

    pub fn new_with_initial_state() -> Self {
        Self {
            variant: DashboardVariant::default(),
            last_scenario: None,
            autoplay_enabled: false,
            autoplay_pause_ms: default_autoplay_pause_ms(),
            engine: DemoEngine::default(),
            chat_draft: String::new(),
            hovered: BTreeMap::new(),
            show_help: false,
        }
    }

    /// Builds the engine and lets command-line options override stored preferences.
    pub(super) fn apply_launch_options(&mut self, options: LaunchOptions) {
        let LaunchOptions {
            catalog,
            variant,
            autostart,
            seed,
            autoplay,
        } = options;

        self.engine = DemoEngine::new(catalog, seed, now());
        self.hovered.clear();

        if let Some(variant) = variant {
            self.variant = variant;
        }
        if let Some(pause) = autoplay {
            self.autoplay_enabled = true;
            self.autoplay_pause_ms = pause.as_millis() as u64;
        }
        self.apply_autoplay();

        // A stored scenario may not exist in a custom catalog
        if let Some(id) = &self.last_scenario {
            if !self.engine.catalog.contains(id) {
                log::info!("Stored scenario '{}' not in catalog, clearing", id);
                self.last_scenario = None;
            }
        }

        if let Some(id) = autostart {
            self.start_scenario(id);
        }
    }

    pub(super) fn apply_autoplay(&mut self) {
        let pause = self
            .autoplay_enabled
            .then(|| ms(self.autoplay_pause_ms));
        self.engine.set_autoplay(pause);
    }

    /// A new layout re-creates the KPI row, so every rotation restarts.
    pub(super) fn switch_variant(&mut self, variant: DashboardVariant) {
        if variant == self.variant {
            return;
        }
        self.variant = variant;
        self.hovered.clear();
        self.engine.remount_widgets(now());
    }

    pub(super) fn start_scenario(&mut self, id: String) {
        let outcome = self.engine.start_scenario(&id);
        if outcome.is_applied() {
            self.last_scenario = Some(id);
        } else {
            log::warn!("Could not start scenario '{}': {}", id, outcome);
        }
    }

    /// Scenario preselected in the picker: the last one played, else the first in the catalog.
    pub(super) fn selected_scenario(&self) -> String {
        self.last_scenario
            .clone()
            .or_else(|| self.engine.catalog.ids().next().map(str::to_string))
            .unwrap_or_default()
    }
}

impl eframe::App for DemoDeckApp {
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // Stop every rotation, typing and feed timer
        self.engine.dispose();

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_shutdown {
            log::info!("Application shutdown complete.");
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        setup_custom_visuals(ctx);

        // 1. Advance playback, rotation and feeds to this frame
        let frame_start = now();
        let busy = self.engine.update(frame_start);

        // 2. Keyboard navigation
        self.handle_global_shortcuts(ctx);

        // 3. Layout (outer panels first, central last)
        let layout = crate::ui::config::variant_layout(self.variant);
        self.render_top_panel(ctx, &layout);
        if layout.footer {
            self.render_footer_panel(ctx);
        }
        if layout.anomalies {
            self.render_side_panel(ctx);
        }
        if layout.discovery {
            self.render_right_panel(ctx);
        }
        self.render_central_panel(ctx);
        if self.show_help {
            self.render_help_panel(ctx);
        }

        // 4. Timers are polled, so keep frames coming
        ctx.request_repaint_after(repaint_delay(
            busy,
            self.engine.next_wakeup(),
            frame_start,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preferences_round_trip_without_runtime_state() {
        let mut app = DemoDeckApp::new_with_initial_state();
        app.variant = DashboardVariant::Compact;
        app.last_scenario = Some("crisis-prevention".into());
        app.autoplay_enabled = true;
        app.chat_draft = "unsent".into();

        let json = serde_json::to_string(&app).unwrap();
        assert!(!json.contains("unsent"));

        let restored: DemoDeckApp = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.variant, DashboardVariant::Compact);
        assert_eq!(restored.last_scenario.as_deref(), Some("crisis-prevention"));
        assert!(restored.autoplay_enabled);
        assert!(restored.chat_draft.is_empty());
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let restored: DemoDeckApp = serde_json::from_str("{}").unwrap();
        assert_eq!(restored.variant, DashboardVariant::Classic);
        assert_eq!(restored.autoplay_pause_ms, DEMO.playback.default_autoplay_pause_ms);
    }

    #[test]
    fn launch_options_override_preferences() {
        let mut app = DemoDeckApp::new_with_initial_state();
        app.last_scenario = Some("no-such-scenario".into());
        app.apply_launch_options(LaunchOptions {
            variant: Some(DashboardVariant::Idp),
            autostart: Some("weekend-insight".into()),
            seed: Some(7),
            autoplay: Some(Duration::from_millis(1_200)),
            ..LaunchOptions::default()
        });

        assert_eq!(app.variant, DashboardVariant::Idp);
        assert_eq!(app.last_scenario.as_deref(), Some("weekend-insight"));
        assert!(app.engine.is_playing());
        assert_eq!(app.engine.autoplay(), Some(Duration::from_millis(1_200)));
    }

    #[test]
    fn idle_frames_wake_for_the_next_deadline() {
        let t0 = now();
        assert_eq!(repaint_delay(true, Some(t0 + ms(5_000)), t0), BUSY_FRAME);
        assert_eq!(repaint_delay(false, None, t0), IDLE_FRAME);
        assert_eq!(repaint_delay(false, Some(t0 + ms(5_000)), t0), IDLE_FRAME);
        assert_eq!(repaint_delay(false, Some(t0 + ms(30)), t0), ms(30));
        // Overdue deadlines still leave a frame's gap
        assert_eq!(repaint_delay(false, Some(t0), t0 + ms(10)), BUSY_FRAME);
    }

    #[test]
    fn switching_variant_restarts_rotation() {
        let mut app = DemoDeckApp::new_with_initial_state();
        app.engine.widgets.hover_start(WidgetId::Churn);
        app.hovered.insert(WidgetId::Churn, true);

        app.switch_variant(DashboardVariant::Idp);
        assert_eq!(app.variant, DashboardVariant::Idp);
        assert!(app.hovered.is_empty());
        assert!(!app.engine.widgets.is_paused(WidgetId::Churn));

        // Re-selecting the current layout keeps state
        app.engine.widgets.hover_start(WidgetId::Churn);
        app.switch_variant(DashboardVariant::Idp);
        assert!(app.engine.widgets.is_paused(WidgetId::Churn));
    }

    #[test]
    fn unknown_autostart_leaves_engine_idle() {
        let mut app = DemoDeckApp::new_with_initial_state();
        app.apply_launch_options(LaunchOptions {
            autostart: Some("nope".into()),
            ..LaunchOptions::default()
        });
        assert!(!app.engine.is_playing());
        assert!(app.last_scenario.is_none());
        assert_eq!(app.selected_scenario(), "onboarding-care");
    }
}
