use eframe::egui::Color32;

use crate::domain::DashboardVariant;
use crate::models::{Accent, ModuleStatus, Severity, Trend};

pub use crate::ui::ui_text::{UI_TEXT, UiText};

/// UI Colors for consistent theming
#[derive(Clone, Copy)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub subsection_heading: Color32,
    pub central_panel: Color32,
    pub side_panel: Color32,
    pub card: Color32,
    pub card_hovered: Color32,
    pub user_bubble: Color32,
    pub ai_bubble: Color32,
    pub positive: Color32,
    pub negative: Color32,
    pub neutral: Color32,
    pub banner: Color32,
}

/// Which regions a dashboard variant shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VariantLayout {
    pub headline_metrics: bool,
    pub anomalies: bool,
    pub discovery: bool,
    pub footer: bool,
    pub banner: Option<&'static str>,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub kpi_card_height: f32,
    pub side_panel_width: f32,
    pub chat_input_height: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::from_rgb(170, 176, 186),
        heading: Color32::from_rgb(232, 236, 242),
        subsection_heading: Color32::from_rgb(120, 170, 255),
        central_panel: Color32::from_rgb(16, 18, 24),
        side_panel: Color32::from_rgb(22, 25, 32),
        card: Color32::from_rgb(30, 34, 44),
        card_hovered: Color32::from_rgb(40, 46, 60),
        user_bubble: Color32::from_rgb(38, 70, 120),
        ai_bubble: Color32::from_rgb(34, 38, 50),
        positive: Color32::from_rgb(90, 200, 140),
        negative: Color32::from_rgb(235, 100, 100),
        neutral: Color32::from_rgb(150, 150, 160),
        banner: Color32::from_rgb(90, 40, 140),
    },
    kpi_card_height: 96.0,
    side_panel_width: 300.0,
    chat_input_height: 36.0,
};

pub fn variant_layout(variant: DashboardVariant) -> VariantLayout {
    match variant {
        DashboardVariant::Classic => VariantLayout {
            headline_metrics: true,
            anomalies: true,
            discovery: true,
            footer: true,
            banner: None,
        },
        DashboardVariant::Minimalist => VariantLayout {
            headline_metrics: false,
            anomalies: true,
            discovery: true,
            footer: true,
            banner: None,
        },
        DashboardVariant::Compact => VariantLayout {
            headline_metrics: false,
            anomalies: true,
            discovery: true,
            footer: true,
            banner: Some("Minimalist2 Version - Deployment Test"),
        },
        DashboardVariant::Idp => VariantLayout {
            headline_metrics: false,
            anomalies: false,
            discovery: true,
            footer: false,
            banner: None,
        },
    }
}

pub fn accent_color(accent: Accent) -> Color32 {
    match accent {
        Accent::Emerald => Color32::from_rgb(52, 211, 153),
        Accent::Orange => Color32::from_rgb(251, 146, 60),
        Accent::Blue => Color32::from_rgb(96, 165, 250),
        Accent::Amber => Color32::from_rgb(251, 191, 36),
        Accent::Rose => Color32::from_rgb(251, 113, 133),
    }
}

pub fn trend_color(trend: Trend) -> Color32 {
    match trend {
        Trend::Up => UI_CONFIG.colors.positive,
        Trend::Down => UI_CONFIG.colors.negative,
        Trend::Stable => UI_CONFIG.colors.neutral,
    }
}

pub fn severity_color(severity: Severity) -> Color32 {
    match severity {
        Severity::High => Color32::from_rgb(239, 68, 68),
        Severity::Medium => Color32::from_rgb(245, 158, 11),
        Severity::Low => Color32::from_rgb(59, 130, 246),
    }
}

pub fn status_color(status: ModuleStatus) -> Color32 {
    match status {
        ModuleStatus::Active => UI_CONFIG.colors.positive,
        ModuleStatus::Processing => Color32::from_rgb(96, 165, 250),
        ModuleStatus::Standby => UI_CONFIG.colors.neutral,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_compact_has_a_banner() {
        assert!(variant_layout(DashboardVariant::Compact).banner.is_some());
        assert!(variant_layout(DashboardVariant::Classic).banner.is_none());
        assert!(variant_layout(DashboardVariant::Classic).headline_metrics);
        assert!(!variant_layout(DashboardVariant::Idp).anomalies);
    }
}
