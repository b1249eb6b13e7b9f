use std::fmt;

use strum::IntoEnumIterator;
use strum_macros::EnumIter;

use crate::config::{DEMO, FeedSettings};
use crate::engine::timer::{Deadline, Interval};
use crate::utils::{AppInstant, ms};

use super::kpi::Trend;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    fn slot(self) -> usize {
        match self {
            Severity::High => 0,
            Severity::Medium => 1,
            Severity::Low => 2,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::High => write!(f, "High Priority"),
            Severity::Medium => write!(f, "Medium Priority"),
            Severity::Low => write!(f, "Low Priority"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anomaly {
    pub id: u32,
    pub title: &'static str,
    pub description: &'static str,
    pub trend: Trend,
    pub severity: Severity,
    pub time: &'static str,
}

const fn anomaly(
    id: u32,
    title: &'static str,
    description: &'static str,
    trend: Trend,
    severity: Severity,
    time: &'static str,
) -> Anomaly {
    Anomaly {
        id,
        title,
        description,
        trend,
        severity,
        time,
    }
}

pub static ANOMALIES: [Anomaly; 12] = [
    anomaly(1, "Revenue spike +47% in EMEA region", "Unusual pattern detected", Trend::Up, Severity::High, "2 min ago"),
    anomaly(2, "API response time 2.3x normal baseline", "Performance degrading", Trend::Down, Severity::High, "4 min ago"),
    anomaly(3, "Failed login attempts 15x increase", "Security concern flagged", Trend::Up, Severity::High, "6 min ago"),
    anomaly(4, "Database query performance declining 23%", "Gradual degradation", Trend::Down, Severity::Medium, "8 min ago"),
    anomaly(5, "Memory utilization trending upward", "82% average usage", Trend::Up, Severity::Medium, "12 min ago"),
    anomaly(6, "Customer acquisition cost anomaly", "CAC increased 18%", Trend::Up, Severity::Medium, "15 min ago"),
    anomaly(7, "Network bandwidth usage irregular", "Unusual traffic patterns", Trend::Stable, Severity::Medium, "18 min ago"),
    anomaly(8, "Backup completion time variance", "Taking 34% longer", Trend::Down, Severity::Medium, "22 min ago"),
    anomaly(9, "Email delivery rate declining", "Down to 94.2%", Trend::Down, Severity::Medium, "25 min ago"),
    anomaly(10, "User session duration anomaly", "Sessions 28% shorter", Trend::Down, Severity::Medium, "28 min ago"),
    anomaly(11, "Minor configuration drift detected", "Non-critical variance", Trend::Stable, Severity::Low, "32 min ago"),
    anomaly(12, "Log rotation timing variance", "Slight delay in cleanup", Trend::Stable, Severity::Low, "35 min ago"),
];

/// Anomalies bucketed by severity, highest first.
pub fn grouped() -> Vec<(Severity, Vec<&'static Anomaly>)> {
    Severity::iter()
        .map(|sev| (sev, ANOMALIES.iter().filter(|a| a.severity == sev).collect()))
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanLabel {
    /// Whatever the board showed before the first scan of the session.
    Stale,
    JustNow,
    MinuteAgo,
}

impl ScanLabel {
    pub fn text(self) -> &'static str {
        match self {
            ScanLabel::Stale => "2 min ago",
            ScanLabel::JustNow => "Just now",
            ScanLabel::MinuteAgo => "1 min ago",
        }
    }
}

/// Expandable severity sections plus the periodic background re-scan.
#[derive(Debug)]
pub struct AnomalyPanel {
    expanded: [bool; 3],
    scan_every: Interval,
    scan_done: Option<Deadline>,
    label_ages: Option<Deadline>,
    label: ScanLabel,
    scan_duration_ms: u64,
    label_age_ms: u64,
}

impl AnomalyPanel {
    pub fn new(now: AppInstant) -> Self {
        Self::with_settings(now, &DEMO.feeds)
    }

    pub fn with_settings(now: AppInstant, feeds: &FeedSettings) -> Self {
        Self {
            expanded: [true, false, false],
            scan_every: Interval::new(now, ms(feeds.anomaly_scan_every_ms)),
            scan_done: None,
            label_ages: None,
            label: ScanLabel::Stale,
            scan_duration_ms: feeds.anomaly_scan_duration_ms,
            label_age_ms: feeds.anomaly_label_age_ms,
        }
    }

    pub fn toggle(&mut self, severity: Severity) {
        let slot = &mut self.expanded[severity.slot()];
        *slot = !*slot;
    }

    pub fn is_expanded(&self, severity: Severity) -> bool {
        self.expanded[severity.slot()]
    }

    pub fn is_scanning(&self) -> bool {
        self.scan_done.is_some()
    }

    pub fn last_scan(&self) -> ScanLabel {
        self.label
    }

    /// Drops a scan in flight and the pending label ageing.
    pub fn cancel_scan(&mut self) {
        self.scan_done = None;
        self.label_ages = None;
    }

    /// Advances the scan cycle. Returns true when anything visible changed.
    pub fn update(&mut self, now: AppInstant) -> bool {
        let mut changed = false;
        loop {
            let next_scan = self.scan_every.next_due();
            let done = self.scan_done.map(|d| d.due()).filter(|&t| t <= now);
            let aged = self.label_ages.map(|d| d.due()).filter(|&t| t <= now);

            // Earliest due event first
            let earliest = [Some(next_scan).filter(|&t| t <= now), done, aged]
                .into_iter()
                .flatten()
                .min();
            let Some(at) = earliest else { break };
            changed = true;

            if done == Some(at) {
                self.scan_done = None;
                self.label = ScanLabel::JustNow;
                self.label_ages = Some(Deadline::after(at, ms(self.label_age_ms)));
            } else if aged == Some(at) {
                self.label_ages = None;
                self.label = ScanLabel::MinuteAgo;
            } else {
                self.scan_every.fire_if_due(now);
                if self.scan_done.is_none() {
                    self.scan_done = Some(Deadline::after(at, ms(self.scan_duration_ms)));
                }
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::now;

    #[test]
    fn groups_follow_severity_order() {
        let groups = grouped();
        let sizes: Vec<_> = groups.iter().map(|(s, items)| (*s, items.len())).collect();
        assert_eq!(
            sizes,
            vec![(Severity::High, 3), (Severity::Medium, 7), (Severity::Low, 2)]
        );
    }

    #[test]
    fn sections_toggle_independently() {
        let mut panel = AnomalyPanel::new(now());
        assert!(panel.is_expanded(Severity::High));
        assert!(!panel.is_expanded(Severity::Low));
        panel.toggle(Severity::High);
        panel.toggle(Severity::Low);
        assert!(!panel.is_expanded(Severity::High));
        assert!(panel.is_expanded(Severity::Low));
        assert!(!panel.is_expanded(Severity::Medium));
    }

    #[test]
    fn scan_cycle_updates_label() {
        let t0 = now();
        let feeds = FeedSettings {
            anomaly_scan_every_ms: 30_000,
            anomaly_scan_duration_ms: 2_000,
            anomaly_label_age_ms: 10_000,
            ..DEMO.feeds
        };
        let mut panel = AnomalyPanel::with_settings(t0, &feeds);
        assert_eq!(panel.last_scan().text(), "2 min ago");

        assert!(!panel.update(t0 + ms(29_999)));
        assert!(panel.update(t0 + ms(30_000)));
        assert!(panel.is_scanning());

        panel.update(t0 + ms(32_000));
        assert!(!panel.is_scanning());
        assert_eq!(panel.last_scan(), ScanLabel::JustNow);

        panel.update(t0 + ms(42_000));
        assert_eq!(panel.last_scan(), ScanLabel::MinuteAgo);
    }

    #[test]
    fn next_scan_supersedes_label_age() {
        let t0 = now();
        let mut panel = AnomalyPanel::new(t0);

        panel.update(t0 + ms(32_000));
        assert_eq!(panel.last_scan(), ScanLabel::JustNow);

        // Second scan at 60 s finishes at 62 s and replaces the pending age-out
        panel.update(t0 + ms(92_500));
        assert_eq!(panel.last_scan(), ScanLabel::JustNow);
        panel.update(t0 + ms(122_000));
        assert_eq!(panel.last_scan(), ScanLabel::JustNow);
    }
}
