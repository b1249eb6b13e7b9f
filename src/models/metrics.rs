//! Headline percentages in the top metrics zone. They drift by a hair every
//! few seconds so the board looks alive.

use rand::Rng;

use crate::config::{DEMO, FeedSettings};
use crate::engine::timer::Interval;
use crate::utils::{AppInstant, ms};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlineMetric {
    pub id: &'static str,
    pub title: &'static str,
    pub base: f64,
    pub change: &'static str,
    pub subtitle: &'static str,
    pub sparkline: [u8; 5],
    /// Cards fanned out behind the primary one: (title, value).
    pub stacked: &'static [(&'static str, &'static str)],
}

pub static HEADLINE_METRICS: [HeadlineMetric; 4] = [
    HeadlineMetric {
        id: "operational",
        title: "Operational Excellence",
        base: 94.2,
        change: "+2.4%",
        subtitle: "Real-time efficiency metrics",
        sparkline: [92, 93, 94, 95, 94],
        stacked: &[("Process Optimization", "89.7%"), ("Resource Allocation", "91.3%")],
    },
    HeadlineMetric {
        id: "intelligence",
        title: "Intelligence Coverage",
        base: 96.8,
        change: "+3.1%",
        subtitle: "Data completeness & accuracy",
        sparkline: [94, 95, 96, 97, 97],
        stacked: &[
            ("Pattern Recognition", "87.4%"),
            ("Predictive Accuracy", "92.1%"),
            ("Data Integration", "88.9%"),
        ],
    },
    HeadlineMetric {
        id: "strategic",
        title: "Strategic Alignment",
        base: 91.5,
        change: "+1.7%",
        subtitle: "Cross-functional coherence",
        sparkline: [89, 90, 91, 92, 91],
        stacked: &[("Goal Achievement", "85.3%"), ("Risk Mitigation", "93.7%")],
    },
    HeadlineMetric {
        id: "automation",
        title: "Process Automation",
        base: 78.9,
        change: "+4.2%",
        subtitle: "Workflow digitization",
        sparkline: [75, 76, 77, 78, 79],
        stacked: &[
            ("AI Integration", "82.6%"),
            ("Human-AI Collaboration", "89.2%"),
            ("Decision Support", "91.8%"),
            ("Quality Assurance", "87.4%"),
        ],
    },
];

#[derive(Debug)]
pub struct HeadlineMetrics {
    values: [f64; 4],
    refresh: Interval,
    jitter: f64,
}

impl HeadlineMetrics {
    pub fn new(now: AppInstant) -> Self {
        Self::with_settings(now, &DEMO.feeds)
    }

    pub fn with_settings(now: AppInstant, feeds: &FeedSettings) -> Self {
        Self {
            values: HEADLINE_METRICS.map(|m| m.base),
            refresh: Interval::new(now, ms(feeds.headline_refresh_ms)),
            jitter: feeds.headline_jitter,
        }
    }

    /// Re-draws every value around its base once per refresh period.
    /// Returns true if anything changed.
    pub fn update<R: Rng>(&mut self, now: AppInstant, rng: &mut R) -> bool {
        if self.refresh.drain(now) == 0 {
            return false;
        }
        for (value, metric) in self.values.iter_mut().zip(HEADLINE_METRICS.iter()) {
            *value = metric.base + rng.gen_range(-self.jitter..=self.jitter);
        }
        true
    }

    pub fn value(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Display form, e.g. "94.2%".
    pub fn label(&self, index: usize) -> Option<String> {
        self.value(index).map(|v| format!("{v:.1}%"))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static HeadlineMetric, f64)> + '_ {
        HEADLINE_METRICS.iter().zip(self.values.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{now, seeded_rng};

    #[test]
    fn jitter_stays_within_band() {
        let t0 = now();
        let mut rng = seeded_rng(3, 0);
        let mut metrics = HeadlineMetrics::new(t0);

        assert!(!metrics.update(t0 + ms(7_999), &mut rng));
        assert_eq!(metrics.value(0), Some(94.2));

        for n in 1..=20u32 {
            assert!(metrics.update(t0 + ms(8_000) * n, &mut rng));
            for (metric, value) in metrics.iter() {
                assert!((value - metric.base).abs() <= 0.025 + 1e-9);
            }
        }
        assert_eq!(metrics.label(3).as_deref().map(|l| l.ends_with('%')), Some(true));
        assert_eq!(metrics.value(4), None);
    }
}
