use eframe::egui::{
    Align, CentralPanel, Context, Frame, Grid, Key, Layout, Margin, RichText, ScrollArea,
    SidePanel, TopBottomPanel, Ui, Window,
};
use strum::IntoEnumIterator;

use crate::domain::{Emphasis, WidgetId, mock_files};
use crate::engine::NavKey;
use crate::models::card_stack;
use crate::ui::config::{UI_CONFIG, UI_TEXT, VariantLayout};
use crate::ui::styles::UiStyleExt;
use crate::ui::ui_panels::{
    AnomaliesPanel, AnomalyEvent, ChatEvent, ChatPanel, FooterPanel, HeadlineMetricsPanel,
    KpiStackEvent, KpiStackPanel, NarrativeEvent, NarrativePanel, OpportunityPanel, Panel,
    ScenarioControlEvent, ScenarioControlsPanel, TasksPanel,
};
use crate::utils::now;

use super::app::DemoDeckApp;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

impl DemoDeckApp {
    pub(super) fn render_top_panel(&mut self, ctx: &Context, layout: &VariantLayout) {
        if let Some(banner) = layout.banner {
            TopBottomPanel::top("variant_banner")
                .frame(Frame::new().fill(UI_CONFIG.colors.banner).inner_margin(Margin::same(4)))
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new(banner).strong().color(UI_CONFIG.colors.heading));
                    });
                });
        }

        let top_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::same(8));
        TopBottomPanel::top("top_panel")
            .frame(top_frame)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(UI_TEXT.brand)
                            .size(20.0)
                            .strong()
                            .color(UI_CONFIG.colors.heading),
                    );
                    ui.label_subdued(UI_TEXT.brand_tagline);
                });
                ui.add_space(4.0);

                let control_events = self.scenario_controls_panel(ui);
                self.handle_control_events(control_events);

                ui.add_space(6.0);
                self.render_kpi_row(ui);

                if layout.headline_metrics {
                    ui.add_space(6.0);
                    let mut panel = HeadlineMetricsPanel::new(&self.engine.feeds.headline);
                    panel.render(ui);
                }
            });
    }

    fn render_kpi_row(&mut self, ui: &mut Ui) {
        let widgets: Vec<WidgetId> = WidgetId::iter().collect();
        let mut kpi_events = Vec::new();

        ui.columns(widgets.len(), |columns| {
            for (column, &widget) in columns.iter_mut().zip(&widgets) {
                let Some(index) = self.engine.widgets.index(widget) else {
                    continue;
                };
                let paused = self.engine.widgets.is_paused(widget);
                if let Some(mut panel) = KpiStackPanel::new(widget, card_stack(widget), index, paused) {
                    for event in panel.render(column) {
                        kpi_events.push((widget, event));
                    }
                }
            }
        });

        for (widget, event) in kpi_events {
            self.handle_kpi_event(widget, event);
        }
    }

    pub(super) fn render_side_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::same(8));
        SidePanel::left("anomaly_panel")
            .default_width(UI_CONFIG.side_panel_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                let mut events = Vec::new();
                ScrollArea::vertical()
                    .id_salt("anomaly_scroll")
                    .show(ui, |ui| {
                        let mut panel = AnomaliesPanel::new(&self.engine.feeds.anomalies);
                        events = panel.render(ui);
                    });
                for event in events {
                    match event {
                        AnomalyEvent::Toggle(severity) => {
                            self.engine.feeds.anomalies.toggle(severity);
                        }
                    }
                }
            });
    }

    pub(super) fn render_right_panel(&mut self, ctx: &Context) {
        let side_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.side_panel)
            .inner_margin(Margin::same(8));
        SidePanel::right("discovery_panel")
            .default_width(UI_CONFIG.side_panel_width)
            .frame(side_panel_frame)
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .id_salt("discovery_scroll")
                    .show(ui, |ui| {
                        OpportunityPanel::new(&self.engine.feeds.opportunities).render(ui);
                        TasksPanel::new(self.engine.feeds.tasks.tasks()).render(ui);
                    });
            });
    }

    pub(super) fn render_footer_panel(&mut self, ctx: &Context) {
        TopBottomPanel::bottom("footer_panel")
            .frame(
                Frame::new()
                    .fill(UI_CONFIG.colors.side_panel)
                    .inner_margin(Margin::same(6)),
            )
            .show(ctx, |ui| {
                FooterPanel.render(ui);
            });
    }

    pub(super) fn render_central_panel(&mut self, ctx: &Context) {
        let central_panel_frame = Frame::new()
            .fill(UI_CONFIG.colors.central_panel)
            .inner_margin(Margin::same(10));
        CentralPanel::default()
            .frame(central_panel_frame)
            .show(ctx, |ui| {
                // Big moments hand the whole column to the conversation
                let emphasis = self
                    .engine
                    .current_step()
                    .map(|s| s.emphasis())
                    .unwrap_or_default();
                if !matches!(emphasis, Emphasis::Large | Emphasis::Dramatic) {
                    let events = NarrativePanel::new(&self.engine.feeds.narratives).render(ui);
                    for NarrativeEvent::Action(action) in events {
                        self.engine.feeds.narratives.request_action(action, now());
                    }
                    ui.separator();
                }

                let typing_label = self
                    .engine
                    .typing_actor()
                    .map(|actor| format!("{}{}", actor, UI_TEXT.typing_suffix));
                let mut panel = ChatPanel::new(
                    self.engine.messages(),
                    self.engine.typing_text(),
                    typing_label,
                    self.engine.can_chat(),
                    &mut self.chat_draft,
                );
                let events = panel.render(ui);
                self.handle_chat_events(events);
            });
    }

    fn render_shortcut_rows(ui: &mut Ui, rows: &[(&str, &str)]) {
        for (key, description) in rows {
            ui.label(RichText::new(*key).monospace().strong());
            ui.label(*description);
            ui.end_row();
        }
    }

    pub(super) fn render_help_panel(&mut self, ctx: &Context) {
        Window::new(UI_TEXT.help_title)
            .open(&mut self.show_help)
            .resizable(false)
            .collapsible(false)
            .default_width(400.0)
            .show(ctx, |ui| {
                ui.label(UI_TEXT.help_intro);
                ui.add_space(5.0);

                let shortcuts = [
                    ("→ / Space", UI_TEXT.help_next),
                    ("←", UI_TEXT.help_previous),
                    ("Esc", UI_TEXT.help_reset),
                    ("H", UI_TEXT.help_toggle),
                ];

                Grid::new("shortcuts_grid")
                    .num_columns(2)
                    .spacing([20.0, 8.0])
                    .striped(true)
                    .show(ui, |ui| {
                        Self::render_shortcut_rows(ui, &shortcuts);
                    });

                ui.add_space(10.0);
                ui.separator();
                ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
                    ui.label_subdued(UI_TEXT.help_wheel);
                });
            });
    }

    fn scenario_controls_panel(&mut self, ui: &mut Ui) -> Vec<ScenarioControlEvent> {
        let selected = self.selected_scenario();
        let mut panel = ScenarioControlsPanel::new(
            &self.engine.catalog,
            self.engine.state(),
            selected,
            self.autoplay_enabled,
            self.variant,
        );
        panel.render(ui)
    }

    // --- EVENT HANDLING ---

    fn handle_control_events(&mut self, events: Vec<ScenarioControlEvent>) {
        for event in events {
            match event {
                ScenarioControlEvent::Start(id) => self.start_scenario(id),
                ScenarioControlEvent::Previous => {
                    self.engine.previous();
                }
                ScenarioControlEvent::Next => {
                    self.engine.advance();
                }
                ScenarioControlEvent::Reset => {
                    self.engine.reset();
                }
                ScenarioControlEvent::Autoplay(enabled) => {
                    self.autoplay_enabled = enabled;
                    self.apply_autoplay();
                }
                ScenarioControlEvent::Variant(variant) => {
                    self.switch_variant(variant);
                }
            }
        }
    }

    fn handle_kpi_event(&mut self, widget: WidgetId, event: KpiStackEvent) {
        match event {
            KpiStackEvent::Hovered(hovered) => {
                let was_hovered = self.hovered.insert(widget, hovered).unwrap_or(false);
                if hovered && !was_hovered {
                    self.engine.widgets.hover_start(widget);
                } else if !hovered && was_hovered {
                    self.engine.widgets.hover_end(widget, now());
                }
            }
            KpiStackEvent::Wheel(delta_y) => {
                let _outcome = self.engine.widgets.scroll(widget, delta_y, now());
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    log::info!("Wheel {:.1} on {}: {:?}", delta_y, widget, _outcome);
                }
            }
        }
    }

    fn handle_chat_events(&mut self, events: Vec<ChatEvent>) {
        for event in events {
            match event {
                ChatEvent::Send(text) => {
                    if let Err(e) = self.engine.send_user_message(&text, now()) {
                        log::warn!("Message not sent: {}", e);
                        self.chat_draft = text;
                    }
                }
                ChatEvent::File(name, action) => {
                    mock_files::simulate_file_action(&name, action);
                }
            }
        }
    }

    pub(super) fn handle_global_shortcuts(&mut self, ctx: &Context) {
        // Typing into the chat box must not drive the scenario
        if ctx.wants_keyboard_input() {
            return;
        }

        ctx.input(|i| {
            if i.key_pressed(Key::H) {
                self.show_help = !self.show_help;
            }

            if i.key_pressed(Key::Escape) && self.show_help {
                self.show_help = false;
                return;
            }

            let keys = [
                (Key::ArrowRight, NavKey::ArrowRight),
                (Key::Space, NavKey::Space),
                (Key::ArrowLeft, NavKey::ArrowLeft),
                (Key::Escape, NavKey::Escape),
            ];
            for (key, nav) in keys {
                if i.key_pressed(key) {
                    self.engine.handle_key(nav);
                }
            }
        });
    }
}
