// Simulated dashboard content
// Static tables plus the timer-driven feeds that perturb them

pub mod anomalies;
pub mod insights;
pub mod kpi;
pub mod metrics;
pub mod modules;
pub mod tasks;

use rand::Rng;

use crate::utils::AppInstant;

// Re-export key types for convenience
pub use anomalies::{ANOMALIES, Anomaly, AnomalyPanel, ScanLabel, Severity};
pub use insights::{NarrativeCenter, NarrativeInsight, Opportunity, OpportunityFeed};
pub use kpi::{Accent, KpiCard, Trend, card_stack, stack_lengths};
pub use metrics::{HEADLINE_METRICS, HeadlineMetric, HeadlineMetrics};
pub use modules::{FOOTER_MODULES, IntelligenceModule, ModuleStatus};
pub use tasks::{AgentTask, AgentTasks};

/// Every background feed on the board, ticked together by the engine.
#[derive(Debug)]
pub struct DashboardFeeds {
    pub headline: HeadlineMetrics,
    pub anomalies: AnomalyPanel,
    pub narratives: NarrativeCenter,
    pub opportunities: OpportunityFeed,
    pub tasks: AgentTasks,
    disposed: bool,
}

impl DashboardFeeds {
    pub fn new(now: AppInstant) -> Self {
        Self {
            headline: HeadlineMetrics::new(now),
            anomalies: AnomalyPanel::new(now),
            narratives: NarrativeCenter::new(now),
            opportunities: OpportunityFeed::new(now),
            tasks: AgentTasks::new(now),
            disposed: false,
        }
    }

    /// Stops every feed for good. Later `update` calls change nothing.
    pub fn dispose(&mut self) {
        self.anomalies.cancel_scan();
        self.disposed = true;
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Returns true if any feed changed this frame.
    pub fn update<R: Rng>(&mut self, now: AppInstant, rng: &mut R) -> bool {
        if self.disposed {
            return false;
        }
        // Non-short-circuiting so every feed advances
        let changed = [
            self.headline.update(now, rng),
            self.anomalies.update(now),
            self.narratives.update(now),
            self.opportunities.update(now),
            self.tasks.update(now, rng),
        ];

        #[cfg(debug_assertions)]
        if crate::config::DEBUG_FLAGS.print_feeds && changed.iter().any(|c| *c) {
            log::info!("[feeds] refreshed {:?}", changed);
        }

        changed.iter().any(|c| *c)
    }
}
