//! KPI card stacks shown across the top row.

use strum::IntoEnumIterator;

use crate::domain::WidgetId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

/// Colour family for a stack. The UI maps these to actual colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Emerald,
    Orange,
    Blue,
    Amber,
    Rose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KpiCard {
    pub title: &'static str,
    pub value: &'static str,
    pub change: &'static str,
    pub trend: Trend,
    pub period: &'static str,
    pub subtitle: Option<&'static str>,
}

const fn card(
    title: &'static str,
    value: &'static str,
    change: &'static str,
    period: &'static str,
    subtitle: Option<&'static str>,
) -> KpiCard {
    KpiCard {
        title,
        value,
        change,
        trend: Trend::Up,
        period,
        subtitle,
    }
}

static REVENUE: [KpiCard; 4] = [
    card("REVENUE", "$2.4M", "+12.5%", "Q4 2024", Some("Total")),
    card("RECURRING", "$1.8M", "+8.2%", "Q4 2024", Some("Recurring Revenue")),
    card("GROWTH", "18.4%", "+3.1%", "YoY", Some("Revenue Growth")),
    card("FORECAST", "$3.1M", "+29.2%", "Q1 2025", Some("Projected Revenue")),
];

static CHURN: [KpiCard; 3] = [
    card("CHURN RATE", "2.8%", "-0.4%", "Monthly", None),
    card("AT RISK", "147", "-23", "Customers", None),
    card("RETENTION", "97.2%", "+0.4%", "Rate", None),
];

static COORDINATION: [KpiCard; 3] = [
    card("MEETINGS", "3", "+1", "Today", Some("Next: 2:30 PM")),
    card("EMAILS", "47", "+12", "Unread", Some("Priority: 8")),
    card("MESSAGES", "23", "+5", "Slack/Teams", Some("@mentions: 4")),
];

static RISK: [KpiCard; 3] = [
    card("RISK SCORE", "7.2", "-0.8", "Current", None),
    card("THREATS", "3", "-2", "Active", None),
    card("MITIGATION", "98.5%", "+1.2%", "Coverage", None),
];

static PERFORMANCE: [KpiCard; 3] = [
    card("UPTIME", "99.9%", "+0.1%", "SLA", None),
    card("THROUGHPUT", "5.2K", "+8%", "Ops/Sec", None),
    card("EFFICIENCY", "87.3%", "+4.1%", "Resource", None),
];

pub fn card_stack(widget: WidgetId) -> &'static [KpiCard] {
    match widget {
        WidgetId::Revenue => &REVENUE,
        WidgetId::Churn => &CHURN,
        WidgetId::Coordination => &COORDINATION,
        WidgetId::Risk => &RISK,
        WidgetId::Performance => &PERFORMANCE,
    }
}

pub fn accent(widget: WidgetId) -> Accent {
    match widget {
        WidgetId::Revenue => Accent::Emerald,
        WidgetId::Churn => Accent::Orange,
        WidgetId::Coordination => Accent::Blue,
        WidgetId::Risk => Accent::Amber,
        WidgetId::Performance => Accent::Rose,
    }
}

/// Every widget with its stack size, ready for `RotationSet::mount`.
pub fn stack_lengths() -> Vec<(WidgetId, usize)> {
    WidgetId::iter().map(|w| (w, card_stack(w).len())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_widget_has_cards() {
        let lengths = stack_lengths();
        assert_eq!(lengths.len(), 5);
        assert!(lengths.iter().all(|(_, len)| *len >= 3));
        assert_eq!(card_stack(WidgetId::Revenue).len(), 4);
        assert_eq!(card_stack(WidgetId::Coordination)[1].subtitle, Some("Priority: 8"));
    }
}
