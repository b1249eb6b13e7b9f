use std::convert::Infallible;

use eframe::egui::{
    Align, Button, Color32, ComboBox, Frame, Grid, Key, Layout, Margin, ProgressBar, RichText,
    ScrollArea, Sense, TextEdit, Ui,
};
use strum::IntoEnumIterator;

use crate::domain::{DashboardVariant, FileAction, FileRef, ScenarioCatalog, WidgetId};
use crate::engine::{DemoState, Message};
use crate::models::kpi::accent;
use crate::models::modules::count_by_status;
use crate::models::{
    AgentTask, AnomalyPanel, FOOTER_MODULES, HeadlineMetrics, KpiCard, ModuleStatus,
    NarrativeCenter, OpportunityFeed, anomalies,
};
use crate::ui::config::{
    UI_CONFIG, UI_TEXT, accent_color, severity_color, status_color, trend_color,
};
use crate::ui::styles::UiStyleExt;
use crate::ui::utils::{
    colored_subsection_heading, section_heading, spaced_separator, sparkline, trend_arrow,
};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;

/// Trait for UI panels that can be rendered
pub trait Panel {
    type Event;
    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event>;
}

// --- SCENARIO CONTROLS ---

#[derive(Debug, Clone, PartialEq)]
pub enum ScenarioControlEvent {
    Start(String),
    Previous,
    Next,
    Reset,
    Autoplay(bool),
    Variant(DashboardVariant),
}

/// Scenario picker, step navigation and layout switcher in the top bar.
pub struct ScenarioControlsPanel<'a> {
    catalog: &'a ScenarioCatalog,
    state: &'a DemoState,
    step_count: usize,
    selected: String,
    autoplay: bool,
    variant: DashboardVariant,
}

impl<'a> ScenarioControlsPanel<'a> {
    pub fn new(
        catalog: &'a ScenarioCatalog,
        state: &'a DemoState,
        selected: String,
        autoplay: bool,
        variant: DashboardVariant,
    ) -> Self {
        let step_count = state
            .current_scenario
            .as_deref()
            .and_then(|id| catalog.get(id))
            .map(|s| s.len())
            .unwrap_or(0);
        Self {
            catalog,
            state,
            step_count,
            selected,
            autoplay,
            variant,
        }
    }

    fn status_line(&self) -> String {
        match self.state.current_scenario.as_deref() {
            None => UI_TEXT.scenario_none.to_string(),
            Some(_) if !self.state.is_playing => format!(
                "{} ({}/{})",
                UI_TEXT.scenario_finished,
                self.state.completed_steps.len(),
                self.step_count
            ),
            Some(id) => format!(
                "{} · step {}/{}",
                id,
                self.state.current_step + 1,
                self.step_count
            ),
        }
    }
}

impl<'a> Panel for ScenarioControlsPanel<'a> {
    type Event = ScenarioControlEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();

        ui.horizontal(|ui| {
            ui.label(colored_subsection_heading(UI_TEXT.scenario_heading));

            let selected_title = self
                .catalog
                .get(&self.selected)
                .map(|s| s.title.clone())
                .unwrap_or_else(|| self.selected.clone());
            ComboBox::from_id_salt("scenario_selector")
                .selected_text(selected_title)
                .show_ui(ui, |ui| {
                    for scenario in self.catalog.scenarios() {
                        ui.selectable_value(
                            &mut self.selected,
                            scenario.id.clone(),
                            scenario.title.as_str(),
                        )
                        .on_hover_text(scenario.description.as_str());
                    }
                });

            if ui.button(UI_TEXT.button_start).clicked() {
                events.push(ScenarioControlEvent::Start(self.selected.clone()));
            }

            let loaded = self.state.current_scenario.is_some();
            if ui
                .add_enabled(loaded, Button::new(UI_TEXT.button_previous))
                .clicked()
            {
                events.push(ScenarioControlEvent::Previous);
            }
            if ui
                .add_enabled(self.state.is_playing, Button::new(UI_TEXT.button_next))
                .clicked()
            {
                events.push(ScenarioControlEvent::Next);
            }
            if ui
                .add_enabled(loaded, Button::new(UI_TEXT.button_reset))
                .clicked()
            {
                events.push(ScenarioControlEvent::Reset);
            }

            if ui.checkbox(&mut self.autoplay, UI_TEXT.autoplay_label).changed() {
                events.push(ScenarioControlEvent::Autoplay(self.autoplay));
            }

            ui.separator();
            ui.label_subdued(UI_TEXT.variant_label);
            let previous_variant = self.variant;
            ComboBox::from_id_salt("variant_selector")
                .selected_text(self.variant.to_string())
                .show_ui(ui, |ui| {
                    for variant in DashboardVariant::iter() {
                        ui.selectable_value(&mut self.variant, variant, variant.to_string());
                    }
                });
            if self.variant != previous_variant {
                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_ui_interactions {
                    log::info!("Layout switched to {}", self.variant);
                }
                events.push(ScenarioControlEvent::Variant(self.variant));
            }

            ui.separator();
            ui.label_subdued(self.status_line());
        });

        events
    }
}

// --- KPI STACKS ---

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KpiStackEvent {
    /// Current pointer containment. Emitted every frame; the app tracks edges.
    Hovered(bool),
    /// Wheel movement in browser convention: positive means scrolling down.
    Wheel(f32),
}

/// One rotating KPI card.
pub struct KpiStackPanel {
    widget: WidgetId,
    card: &'static KpiCard,
    index: usize,
    len: usize,
    paused: bool,
}

impl KpiStackPanel {
    pub fn new(widget: WidgetId, stack: &'static [KpiCard], index: usize, paused: bool) -> Option<Self> {
        let card = stack.get(index)?;
        Some(Self {
            widget,
            card,
            index,
            len: stack.len(),
            paused,
        })
    }

    fn render_pager(&self, ui: &mut Ui, color: Color32) {
        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 3.0;
            for i in 0..self.len {
                let dot = if i == self.index { "●" } else { "○" };
                ui.label(RichText::new(dot).small().color(color));
            }
            if self.paused {
                ui.label_subdued("⏸");
            }
        });
    }
}

impl Panel for KpiStackPanel {
    type Event = KpiStackEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let color = accent_color(accent(self.widget));
        let fill = if self.paused {
            UI_CONFIG.colors.card_hovered
        } else {
            UI_CONFIG.colors.card
        };

        let inner = Frame::new()
            .fill(fill)
            .corner_radius(6.0)
            .inner_margin(Margin::same(8))
            .show(ui, |ui| {
                ui.set_min_height(UI_CONFIG.kpi_card_height);
                ui.label(RichText::new(self.card.title).small().strong().color(color));
                ui.label(
                    RichText::new(self.card.value)
                        .size(22.0)
                        .strong()
                        .color(UI_CONFIG.colors.heading),
                );
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("{} {}", trend_arrow(self.card.trend), self.card.change))
                            .small()
                            .color(trend_color(self.card.trend)),
                    );
                    ui.label_subdued(self.card.period);
                });
                if let Some(subtitle) = self.card.subtitle {
                    ui.label_subdued(subtitle);
                }
                self.render_pager(ui, color);
            });

        let rect = inner.response.rect;
        let response = ui.interact(rect, ui.id().with(self.widget), Sense::hover());
        let hovered = response.hovered() || ui.rect_contains_pointer(rect);

        let mut events = vec![KpiStackEvent::Hovered(hovered)];
        if hovered {
            // egui reports wheel-down as negative y
            let raw = ui.input(|i| i.raw_scroll_delta.y);
            if raw != 0.0 {
                events.push(KpiStackEvent::Wheel(-raw));
            }
        }
        events
    }
}

// --- HEADLINE METRICS ---

/// The four "enterprise pulse" numbers with their sparklines.
pub struct HeadlineMetricsPanel<'a> {
    metrics: &'a HeadlineMetrics,
}

impl<'a> HeadlineMetricsPanel<'a> {
    pub fn new(metrics: &'a HeadlineMetrics) -> Self {
        Self { metrics }
    }
}

impl<'a> Panel for HeadlineMetricsPanel<'a> {
    type Event = Infallible;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        ui.label_header(UI_TEXT.headline_heading);
        ui.horizontal(|ui| {
            for (index, (metric, _)) in self.metrics.iter().enumerate() {
                Frame::new()
                    .fill(UI_CONFIG.colors.card)
                    .corner_radius(6.0)
                    .inner_margin(Margin::same(6))
                    .show(ui, |ui| {
                        ui.vertical(|ui| {
                            ui.label_subdued(metric.title);
                            let value = self.metrics.label(index).unwrap_or_default();
                            ui.label(
                                RichText::new(value)
                                    .size(18.0)
                                    .strong()
                                    .color(UI_CONFIG.colors.heading),
                            );
                            ui.label(
                                RichText::new(sparkline(&metric.sparkline))
                                    .monospace()
                                    .color(UI_CONFIG.colors.subsection_heading),
                            );
                            ui.label(
                                RichText::new(metric.change)
                                    .small()
                                    .color(UI_CONFIG.colors.positive),
                            );
                            ui.label_subdued(metric.subtitle);
                            for (label, value) in metric.stacked {
                                ui.metric(label, value, UI_CONFIG.colors.label);
                            }
                        });
                    });
            }
        });
        Vec::new()
    }
}

// --- CHAT ---

#[derive(Debug, Clone, PartialEq)]
pub enum ChatEvent {
    Send(String),
    File(String, FileAction),
}

/// Conversation log with the live typing line and the free-chat input.
pub struct ChatPanel<'a> {
    messages: &'a [Message],
    typing_text: &'a str,
    typing_label: Option<String>,
    can_chat: bool,
    draft: &'a mut String,
}

impl<'a> ChatPanel<'a> {
    pub fn new(
        messages: &'a [Message],
        typing_text: &'a str,
        typing_label: Option<String>,
        can_chat: bool,
        draft: &'a mut String,
    ) -> Self {
        Self {
            messages,
            typing_text,
            typing_label,
            can_chat,
            draft,
        }
    }

    fn render_files(ui: &mut Ui, files: &[FileRef], events: &mut Vec<ChatEvent>) {
        for file in files {
            ui.horizontal(|ui| {
                ui.label(format!("{} {}", file.icon, file.name))
                    .on_hover_text(file.preview.as_str());
                for (text, action) in [
                    (UI_TEXT.file_open, FileAction::Open),
                    (UI_TEXT.file_download, FileAction::Download),
                    (UI_TEXT.file_share, FileAction::Share),
                ] {
                    if ui.small_button(text).clicked() {
                        events.push(ChatEvent::File(file.name.clone(), action));
                    }
                }
            });
        }
    }

    fn render_message(ui: &mut Ui, message: &Message, events: &mut Vec<ChatEvent>) {
        let is_user = message.actor.is_user();
        let (layout, fill) = if is_user {
            (Layout::right_to_left(Align::TOP), UI_CONFIG.colors.user_bubble)
        } else {
            (Layout::left_to_right(Align::TOP), UI_CONFIG.colors.ai_bubble)
        };

        ui.with_layout(layout, |ui| {
            Frame::new()
                .fill(fill)
                .corner_radius(8.0)
                .inner_margin(Margin::same(8))
                .show(ui, |ui| {
                    ui.set_max_width(ui.available_width() * 0.8);
                    ui.vertical(|ui| {
                        ui.horizontal(|ui| {
                            ui.label(RichText::new(message.actor.to_string()).strong());
                            ui.label_subdued(&message.timestamp);
                        });
                        ui.label(message.content.as_str());

                        if let Some(metadata) = &message.metadata {
                            for (label, value) in &metadata.metrics {
                                ui.metric(label, value, UI_CONFIG.colors.subsection_heading);
                            }
                            for alert in &metadata.alerts {
                                ui.label_warning(format!("⚠ {} ({})", alert.message, alert.severity));
                            }
                        }
                        Self::render_files(ui, &message.files, events);
                    });
                });
        });
        ui.add_space(4.0);
    }

    fn render_input(&mut self, ui: &mut Ui) -> Option<String> {
        if !self.can_chat {
            ui.label_subdued(UI_TEXT.chat_locked);
            return None;
        }

        let mut submitted = false;
        ui.horizontal(|ui| {
            let send_width = 60.0;
            let response = ui.add(
                TextEdit::singleline(&mut *self.draft)
                    .hint_text(UI_TEXT.chat_placeholder)
                    .desired_width(ui.available_width() - send_width)
                    .min_size([0.0, UI_CONFIG.chat_input_height].into()),
            );
            let enter = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
            let clicked = ui.button(UI_TEXT.chat_send).clicked();
            submitted = enter || clicked;
        });

        if submitted && !self.draft.trim().is_empty() {
            Some(std::mem::take(&mut *self.draft))
        } else {
            None
        }
    }
}

impl<'a> Panel for ChatPanel<'a> {
    type Event = ChatEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();

        ui.horizontal(|ui| {
            ui.label_header(UI_TEXT.chat_heading);
            ui.label_subdued(UI_TEXT.chat_subheading);
        });
        ui.add_space(4.0);

        let log_height = (ui.available_height() - UI_CONFIG.chat_input_height - 24.0).max(80.0);
        ScrollArea::vertical()
            .max_height(log_height)
            .stick_to_bottom(true)
            .auto_shrink([false, false])
            .id_salt("chat_log")
            .show(ui, |ui| {
                for message in self.messages {
                    Self::render_message(ui, message, &mut events);
                }
                if let Some(label) = &self.typing_label {
                    ui.label_subdued(label);
                    if !self.typing_text.is_empty() {
                        ui.label(RichText::new(self.typing_text).italics());
                    }
                }
            });

        ui.separator();
        if let Some(text) = self.render_input(ui) {
            events.push(ChatEvent::Send(text));
        }
        events
    }
}

// --- ANOMALIES ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnomalyEvent {
    Toggle(anomalies::Severity),
}

pub struct AnomaliesPanel<'a> {
    panel: &'a AnomalyPanel,
}

impl<'a> AnomaliesPanel<'a> {
    pub fn new(panel: &'a AnomalyPanel) -> Self {
        Self { panel }
    }
}

impl<'a> Panel for AnomaliesPanel<'a> {
    type Event = AnomalyEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        section_heading(ui, UI_TEXT.anomalies_heading);

        if self.panel.is_scanning() {
            ui.label_warning(UI_TEXT.anomalies_scanning);
        } else {
            ui.label_subdued(format!(
                "{}{}",
                UI_TEXT.anomalies_last_scan,
                self.panel.last_scan().text()
            ));
        }
        ui.add_space(4.0);

        for (severity, items) in anomalies::grouped() {
            let expanded = self.panel.is_expanded(severity);
            let marker = if expanded { "▾" } else { "▸" };
            let header = RichText::new(format!("{} {} ({})", marker, severity, items.len()))
                .color(severity_color(severity));
            if ui.selectable_label(expanded, header).clicked() {
                events.push(AnomalyEvent::Toggle(severity));
            }
            if expanded {
                for anomaly in items {
                    ui.indent(("anomaly", anomaly.id), |ui| {
                        ui.horizontal(|ui| {
                            ui.label(
                                RichText::new(trend_arrow(anomaly.trend))
                                    .color(trend_color(anomaly.trend)),
                            );
                            ui.label(RichText::new(anomaly.title).strong());
                        });
                        ui.label_subdued(anomaly.description);
                        ui.label_subdued(anomaly.time);
                    });
                    ui.add_space(2.0);
                }
            }
        }
        events
    }
}

// --- NARRATIVE ---

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NarrativeEvent {
    Action(&'static str),
}

pub struct NarrativePanel<'a> {
    center: &'a NarrativeCenter,
}

impl<'a> NarrativePanel<'a> {
    pub fn new(center: &'a NarrativeCenter) -> Self {
        Self { center }
    }
}

impl<'a> Panel for NarrativePanel<'a> {
    type Event = NarrativeEvent;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        let mut events = Vec::new();
        let insight = self.center.current();

        ui.label_header(UI_TEXT.narrative_heading);
        ui.label_subheader(format!("{} · {}", insight.task_title, insight.task_subtitle));
        ui.label(insight.message);
        ui.label_subdued(insight.details);
        ui.label_subdued(insight.context);
        ui.label(RichText::new(insight.recommendation).color(UI_CONFIG.colors.positive));

        ui.horizontal(|ui| {
            let enabled = !self.center.is_thinking();
            for action in insight.actions {
                if ui.add_enabled(enabled, Button::new(action).small()).clicked() {
                    events.push(NarrativeEvent::Action(action));
                }
            }
        });

        ui.horizontal(|ui| {
            ui.metric(
                UI_TEXT.narrative_confidence,
                &format!("{}%", insight.confidence),
                UI_CONFIG.colors.subsection_heading,
            );
            ui.label_subdued(insight.sources.join(" · "));
        });

        if self.center.is_thinking() {
            ui.label_warning(UI_TEXT.narrative_thinking);
        }
        events
    }
}

// --- OPPORTUNITIES ---

pub struct OpportunityPanel<'a> {
    feed: &'a OpportunityFeed,
}

impl<'a> OpportunityPanel<'a> {
    pub fn new(feed: &'a OpportunityFeed) -> Self {
        Self { feed }
    }
}

impl<'a> Panel for OpportunityPanel<'a> {
    type Event = Infallible;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        section_heading(ui, UI_TEXT.opportunities_heading);
        if self.feed.is_synthesizing() {
            ui.label_warning(UI_TEXT.opportunities_synthesizing);
            return Vec::new();
        }
        let opportunity = self.feed.current();
        ui.label(RichText::new(opportunity.title).strong());
        ui.label_subdued(opportunity.summary);
        ui.metric("Impact", opportunity.impact, UI_CONFIG.colors.positive);
        ui.metric(
            UI_TEXT.narrative_confidence,
            &format!("{}%", opportunity.confidence),
            UI_CONFIG.colors.subsection_heading,
        );
        Vec::new()
    }
}

// --- TASKS ---

pub struct TasksPanel<'a> {
    tasks: &'a [AgentTask],
}

impl<'a> TasksPanel<'a> {
    pub fn new(tasks: &'a [AgentTask]) -> Self {
        Self { tasks }
    }
}

impl<'a> Panel for TasksPanel<'a> {
    type Event = Infallible;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        spaced_separator(ui);
        section_heading(ui, UI_TEXT.tasks_heading);
        for task in self.tasks {
            ui.label(task.title);
            ui.add(
                ProgressBar::new((task.progress / 100.0) as f32)
                    .desired_height(6.0)
                    .text(RichText::new(task.eta_label()).small()),
            );
            ui.add_space(4.0);
        }
        Vec::new()
    }
}

// --- FOOTER ---

pub struct FooterPanel;

impl Panel for FooterPanel {
    type Event = Infallible;

    fn render(&mut self, ui: &mut Ui) -> Vec<Self::Event> {
        ui.horizontal(|ui| {
            ui.label_header(UI_TEXT.footer_heading);
            for status in [ModuleStatus::Active, ModuleStatus::Processing, ModuleStatus::Standby] {
                ui.status_dot(
                    status_color(status),
                    format!("{} {}", count_by_status(status), status),
                );
            }
        });
        Grid::new("footer_modules_grid")
            .num_columns(4)
            .spacing([16.0, 4.0])
            .show(ui, |ui| {
                for (i, module) in FOOTER_MODULES.iter().enumerate() {
                    ui.horizontal(|ui| {
                        ui.label(module.icon);
                        ui.label(RichText::new(module.name).small().strong());
                        ui.status_dot(status_color(module.status), module.metrics);
                    });
                    if i % 4 == 3 {
                        ui.end_row();
                    }
                }
            });
        Vec::new()
    }
}
