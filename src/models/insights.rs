//! Narrative insights and discovered opportunities in the centre column.

use crate::config::{DEMO, FeedSettings};
use crate::engine::timer::{Deadline, Interval};
use crate::utils::{AppInstant, ms};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsightPriority {
    High,
    Medium,
    Insight,
    Opportunity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NarrativeInsight {
    pub id: u32,
    pub priority: InsightPriority,
    pub task_title: &'static str,
    pub task_subtitle: &'static str,
    pub message: &'static str,
    pub details: &'static str,
    pub context: &'static str,
    pub recommendation: &'static str,
    pub actions: [&'static str; 3],
    pub confidence: u8,
    pub sources: [&'static str; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opportunity {
    pub id: u32,
    pub title: &'static str,
    pub summary: &'static str,
    pub impact: &'static str,
    pub confidence: u8,
}

pub static NARRATIVES: [NarrativeInsight; 4] = [
    NarrativeInsight {
        id: 1,
        priority: InsightPriority::High,
        task_title: "EMEA Growth vs Infrastructure Analysis",
        task_subtitle: "Revenue surge creating performance bottlenecks",
        message: "Joe, I've been watching your EMEA numbers this morning and something remarkable is happening. Your revenue is up 47% - but here's what's really interesting...",
        details: "I noticed your API response times are degrading right as this growth is hitting. Your customers are about to feel this.",
        context: "Based on what I'm seeing in Salesforce, ServiceNow, and your infrastructure logs, you have about 2 weeks before this becomes a customer experience problem.",
        recommendation: "Want me to draft the infrastructure scaling plan? I can have it ready in 10 minutes using your budget parameters.",
        actions: ["Draft scaling plan", "Show me the data", "Customer impact analysis"],
        confidence: 94,
        sources: ["Salesforce", "ServiceNow", "Infrastructure Logs", "Revenue Analytics"],
    },
    NarrativeInsight {
        id: 2,
        priority: InsightPriority::Medium,
        task_title: "Q4 Performance & Enterprise Upsell Analysis",
        task_subtitle: "Churn stabilization reveals $2.3M opportunity",
        message: "Joe, three things caught my attention this morning that you need to know about your Q4 performance...",
        details: "Your customer churn pattern I flagged last week is stabilizing - your retention strategy is working. But there's more.",
        context: "I'm seeing an unusual revenue pattern in your enterprise accounts that suggests an upsell opportunity worth approximately $2.3M.",
        recommendation: "Should I prepare the enterprise upsell analysis? I can identify the specific accounts and optimal timing.",
        actions: ["Enterprise upsell analysis", "Retention deep dive", "Revenue pattern details"],
        confidence: 87,
        sources: ["HubSpot", "Customer Success Platform", "Revenue Analytics", "Churn Models"],
    },
    NarrativeInsight {
        id: 3,
        priority: InsightPriority::Insight,
        task_title: "Security Intelligence & Customer Protection",
        task_subtitle: "Coordinated attacks on high-value accounts detected",
        message: "Joe, I've been analyzing the correlation between your recent security incidents and customer behavior...",
        details: "The failed login attempts we flagged aren't random - they're targeting your highest-value enterprise accounts.",
        context: "This suggests a coordinated effort, but here's the interesting part: your security response time has improved 340% since last quarter.",
        recommendation: "I recommend we brief your enterprise customers on the enhanced security measures. This could actually become a competitive advantage.",
        actions: ["Security briefing draft", "Enterprise communication plan", "Competitive analysis"],
        confidence: 91,
        sources: ["Security Logs", "Customer Data", "Threat Intelligence", "Response Analytics"],
    },
    NarrativeInsight {
        id: 4,
        priority: InsightPriority::Opportunity,
        task_title: "Remote Work Productivity Assessment",
        task_subtitle: "Hybrid policies showing measurable ROI",
        message: "Joe, your team's productivity metrics are telling an interesting story about remote work effectiveness...",
        details: "I'm seeing a 23% increase in cross-functional collaboration since implementing the new communication tools.",
        context: "More importantly, this correlates directly with a 18% improvement in project delivery times and customer satisfaction scores.",
        recommendation: "This data could support your case for permanent hybrid work policies. Want me to prepare the executive summary?",
        actions: ["Productivity report", "ROI analysis", "Policy recommendations"],
        confidence: 89,
        sources: ["Teams Analytics", "Project Management", "HR Systems", "Customer Feedback"],
    },
];

pub static OPPORTUNITIES: [Opportunity; 4] = [
    Opportunity {
        id: 1,
        title: "Cross-Platform Revenue Optimization",
        summary: "Enterprise customers using mobile + desktop generate 234% more revenue when onboarded during Q4",
        impact: "$3.2M additional ARR",
        confidence: 96,
    },
    Opportunity {
        id: 2,
        title: "Inverse Churn Prediction Model",
        summary: "Customers who reduce usage by 23% in month 4 but increase email opens by 12% become advocates",
        impact: "$1.8M referral pipeline",
        confidence: 94,
    },
    Opportunity {
        id: 3,
        title: "Competitive Intelligence Synthesis",
        summary: "Strategic content deployment 72 hours after competitor Friday releases increases trial signups 67%",
        impact: "$890K additional ARR",
        confidence: 91,
    },
    Opportunity {
        id: 4,
        title: "Organizational Network Effect",
        summary: "Remote teams using collaborative features during 2-4 PM generate 156% more cross-sell opportunities",
        impact: "$2.1M cross-sell potential",
        confidence: 88,
    },
];

/// Rotating narrative plus the short "thinking" spell after an action click.
#[derive(Debug)]
pub struct NarrativeCenter {
    current: usize,
    cycle: Interval,
    thinking: Option<(Deadline, &'static str)>,
    thinking_ms: u64,
}

impl NarrativeCenter {
    pub fn new(now: AppInstant) -> Self {
        Self::with_settings(now, &DEMO.feeds)
    }

    pub fn with_settings(now: AppInstant, feeds: &FeedSettings) -> Self {
        Self {
            current: 0,
            cycle: Interval::new(now, ms(feeds.narrative_cycle_ms)),
            thinking: None,
            thinking_ms: feeds.narrative_thinking_ms,
        }
    }

    pub fn current(&self) -> &'static NarrativeInsight {
        &NARRATIVES[self.current % NARRATIVES.len()]
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking.is_some()
    }

    /// One of the narrative's action chips was clicked. A second click while
    /// thinking restarts the spell with the new action.
    pub fn request_action(&mut self, action: &'static str, now: AppInstant) {
        self.thinking = Some((Deadline::after(now, ms(self.thinking_ms)), action));
    }

    pub fn update(&mut self, now: AppInstant) -> bool {
        let mut changed = false;
        let ticks = self.cycle.drain(now);
        if ticks > 0 {
            self.current = (self.current + ticks) % NARRATIVES.len();
            changed = true;
        }
        if let Some((deadline, action)) = self.thinking {
            if deadline.is_due(now) {
                self.thinking = None;
                log::info!("[demo] Adam is processing: {}", action);
                changed = true;
            }
        }
        changed
    }
}

/// Opportunity carousel: every cycle a synthesis phase runs, then the next
/// opportunity is shown.
#[derive(Debug)]
pub struct OpportunityFeed {
    current: usize,
    cycle: Interval,
    synthesis_done: Option<Deadline>,
    synthesis_ms: u64,
}

impl OpportunityFeed {
    pub fn new(now: AppInstant) -> Self {
        Self::with_settings(now, &DEMO.feeds)
    }

    pub fn with_settings(now: AppInstant, feeds: &FeedSettings) -> Self {
        Self {
            current: 0,
            cycle: Interval::new(now, ms(feeds.opportunity_cycle_ms)),
            synthesis_done: None,
            synthesis_ms: feeds.opportunity_synthesis_ms,
        }
    }

    pub fn current(&self) -> &'static Opportunity {
        &OPPORTUNITIES[self.current % OPPORTUNITIES.len()]
    }

    pub fn is_synthesizing(&self) -> bool {
        self.synthesis_done.is_some()
    }

    pub fn update(&mut self, now: AppInstant) -> bool {
        let mut changed = false;
        loop {
            let tick = Some(self.cycle.next_due()).filter(|&t| t <= now);
            let done = self.synthesis_done.map(|d| d.due()).filter(|&t| t <= now);
            match (tick, done) {
                (_, Some(d)) if tick.is_none_or(|t| d <= t) => {
                    self.synthesis_done = None;
                    self.current = (self.current + 1) % OPPORTUNITIES.len();
                }
                (Some(t), _) => {
                    self.cycle.fire_if_due(now);
                    if self.synthesis_done.is_none() {
                        self.synthesis_done = Some(Deadline::after(t, ms(self.synthesis_ms)));
                    }
                }
                _ => break,
            }
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::now;

    #[test]
    fn narratives_cycle_every_period() {
        let t0 = now();
        let mut center = NarrativeCenter::new(t0);
        assert_eq!(center.current().id, 1);
        assert!(!center.update(t0 + ms(14_999)));
        assert!(center.update(t0 + ms(15_000)));
        assert_eq!(center.current().id, 2);
        center.update(t0 + ms(60_000));
        assert_eq!(center.current().id, 1);
    }

    #[test]
    fn action_thinks_for_two_seconds() {
        let t0 = now();
        let mut center = NarrativeCenter::new(t0);
        center.request_action("Draft scaling plan", t0);
        assert!(center.is_thinking());
        center.update(t0 + ms(1_999));
        assert!(center.is_thinking());
        assert!(center.update(t0 + ms(2_000)));
        assert!(!center.is_thinking());
    }

    #[test]
    fn opportunity_switches_after_synthesis() {
        let t0 = now();
        let mut feed = OpportunityFeed::new(t0);
        assert_eq!(feed.current().id, 1);

        feed.update(t0 + ms(20_000));
        assert!(feed.is_synthesizing());
        assert_eq!(feed.current().id, 1);

        feed.update(t0 + ms(21_500));
        assert!(!feed.is_synthesizing());
        assert_eq!(feed.current().id, 2);

        // A long stall still plays every cycle in order
        feed.update(t0 + ms(81_500));
        assert_eq!(feed.current().id, 1);
    }
}
