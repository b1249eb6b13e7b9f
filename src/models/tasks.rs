//! Background tasks the assistant pretends to be working on.

use rand::Rng;

use crate::config::{DEMO, FeedSettings};
use crate::engine::timer::Interval;
use crate::utils::{AppInstant, ms};

const COMPLETE_AT: f64 = 98.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskPriority {
    High,
    Medium,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentTask {
    pub id: u32,
    pub title: &'static str,
    pub priority: TaskPriority,
    /// Percent, capped at 100.
    pub progress: f64,
    eta_minutes: u32,
    complete: bool,
}

impl AgentTask {
    fn new(id: u32, title: &'static str, priority: TaskPriority, progress: f64, eta_minutes: u32) -> Self {
        Self {
            id,
            title,
            priority,
            progress,
            eta_minutes,
            complete: false,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn eta_label(&self) -> String {
        if self.complete {
            "Complete".to_string()
        } else {
            format!("{} min", self.eta_minutes)
        }
    }

    /// The ETA reflects progress as it stood before this step, so a task
    /// reads "Complete" one refresh after crossing the threshold.
    fn step(&mut self, gain: f64) {
        if self.progress >= COMPLETE_AT {
            self.complete = true;
        } else {
            self.eta_minutes = self.eta_minutes.saturating_sub(1).max(1);
        }
        self.progress = (self.progress + gain).min(100.0);
    }
}

#[derive(Debug)]
pub struct AgentTasks {
    tasks: Vec<AgentTask>,
    refresh: Interval,
    max_step: f64,
}

impl AgentTasks {
    pub fn new(now: AppInstant) -> Self {
        Self::with_settings(now, &DEMO.feeds)
    }

    pub fn with_settings(now: AppInstant, feeds: &FeedSettings) -> Self {
        Self {
            tasks: vec![
                AgentTask::new(1, "Q4 Revenue Forecast", TaskPriority::High, 87.0, 15),
                AgentTask::new(2, "Customer Health Score Update", TaskPriority::Medium, 45.0, 32),
                AgentTask::new(3, "Security Compliance Report", TaskPriority::High, 92.0, 8),
            ],
            refresh: Interval::new(now, ms(feeds.task_refresh_ms)),
            max_step: feeds.task_max_progress_step,
        }
    }

    pub fn tasks(&self) -> &[AgentTask] {
        &self.tasks
    }

    pub fn update<R: Rng>(&mut self, now: AppInstant, rng: &mut R) -> bool {
        let ticks = self.refresh.drain(now);
        for _ in 0..ticks {
            for task in &mut self.tasks {
                let gain = rng.gen_range(0.0..=self.max_step);
                task.step(gain);
            }
        }
        ticks > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{now, seeded_rng};

    #[test]
    fn progress_is_monotonic_and_capped() {
        let t0 = now();
        let mut rng = seeded_rng(11, 0);
        let mut tasks = AgentTasks::new(t0);
        let before: Vec<f64> = tasks.tasks().iter().map(|t| t.progress).collect();

        assert!(!tasks.update(t0 + ms(2_999), &mut rng));
        assert!(tasks.update(t0 + ms(3_000), &mut rng));
        for (task, old) in tasks.tasks().iter().zip(before) {
            assert!(task.progress >= old);
            assert!(task.progress <= old + 2.0);
        }

        tasks.update(t0 + ms(3_000 * 400), &mut rng);
        assert!(tasks.tasks().iter().all(|t| t.progress <= 100.0));
    }

    #[test]
    fn eta_counts_down_then_completes() {
        let mut task = AgentTask::new(9, "t", TaskPriority::High, 10.0, 3);
        task.step(0.0);
        assert_eq!(task.eta_label(), "2 min");
        task.step(0.0);
        task.step(0.0);
        assert_eq!(task.eta_label(), "1 min");

        task.step(90.0);
        assert!(!task.is_complete());
        task.step(0.0);
        assert!(task.is_complete());
        assert_eq!(task.eta_label(), "Complete");
        assert_eq!(task.progress, 100.0);
    }
}
