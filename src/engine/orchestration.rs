//! Scenario playback state machine.
//!
//! `Idle` (no scenario) -> `AtStep(scenario, index)` -> `Complete` (playing is
//! false, index stays on the last step). Typing is a nested lock: while it is
//! held, navigation is refused. Every operation reports what it did through
//! [`Transition`] instead of failing.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{Scenario, ScenarioCatalog, Step};

/// Snapshot of where playback is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoState {
    pub current_scenario: Option<String>,
    pub current_step: usize,
    pub is_playing: bool,
    pub is_typing: bool,
    /// Step ids passed during forward play. Truncated on rewind.
    pub completed_steps: Vec<String>,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed; playback continues.
    Applied,
    /// The last step was acknowledged; playback is over.
    Finished,
    /// Already at the first step, or already finished.
    IgnoredBoundary,
    /// A message is being typed.
    IgnoredTypingLock,
    IgnoredNoScenario,
    UnknownScenario,
}

impl Transition {
    /// True when the state actually moved.
    pub fn is_applied(self) -> bool {
        matches!(self, Transition::Applied | Transition::Finished)
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Transition::Applied => "applied",
            Transition::Finished => "finished",
            Transition::IgnoredBoundary => "ignored (boundary)",
            Transition::IgnoredTypingLock => "ignored (typing)",
            Transition::IgnoredNoScenario => "ignored (no scenario)",
            Transition::UnknownScenario => "unknown scenario",
        };
        write!(f, "{label}")
    }
}

/// Keys the dashboard listens to for the whole of its lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowRight,
    ArrowLeft,
    Space,
    Escape,
}

/// Anything that can hold the typing lock. The orchestrator is the real one;
/// tests plug in recorders.
pub trait TypingLock {
    fn set_typing(&mut self, typing: bool);
}

pub struct DemoOrchestrator {
    catalog: Arc<ScenarioCatalog>,
    state: DemoState,
}

impl DemoOrchestrator {
    pub fn new(catalog: Arc<ScenarioCatalog>) -> Self {
        Self {
            catalog,
            state: DemoState::default(),
        }
    }

    pub fn state(&self) -> &DemoState {
        &self.state
    }

    pub fn catalog(&self) -> &ScenarioCatalog {
        &self.catalog
    }

    pub fn current_scenario(&self) -> Option<&Scenario> {
        self.state
            .current_scenario
            .as_deref()
            .and_then(|id| self.catalog.get(id))
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.current_scenario()
            .and_then(|s| s.step(self.state.current_step))
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    pub fn is_typing(&self) -> bool {
        self.state.is_typing
    }

    // --- TRANSITIONS ---

    pub fn start(&mut self, scenario_id: &str) -> Transition {
        let outcome = if self.catalog.contains(scenario_id) {
            self.state = DemoState {
                current_scenario: Some(scenario_id.to_string()),
                current_step: 0,
                is_playing: true,
                is_typing: false,
                completed_steps: Vec::new(),
            };
            Transition::Applied
        } else {
            log::warn!("Cannot start unknown scenario '{}'", scenario_id);
            Transition::UnknownScenario
        };
        self.trace("start", outcome);
        outcome
    }

    pub fn advance(&mut self) -> Transition {
        let outcome = self.advance_inner();
        self.trace("advance", outcome);
        outcome
    }

    fn advance_inner(&mut self) -> Transition {
        let Some(scenario) = self.current_scenario() else {
            return Transition::IgnoredNoScenario;
        };
        if self.state.is_typing {
            return Transition::IgnoredTypingLock;
        }

        let index = self.state.current_step;
        let last = scenario.last_index();
        if index == last && !self.state.is_playing {
            return Transition::IgnoredBoundary;
        }
        let Some(step_id) = scenario.step(index).map(|s| s.id.clone()) else {
            return Transition::IgnoredBoundary;
        };

        self.state.completed_steps.push(step_id);
        if index < last {
            self.state.current_step += 1;
            Transition::Applied
        } else {
            self.state.is_playing = false;
            Transition::Finished
        }
    }

    pub fn previous(&mut self) -> Transition {
        let outcome = if self.current_scenario().is_none() {
            Transition::IgnoredNoScenario
        } else if self.state.is_typing {
            Transition::IgnoredTypingLock
        } else if self.state.current_step == 0 {
            Transition::IgnoredBoundary
        } else {
            self.state.current_step -= 1;
            self.state.completed_steps.pop();
            Transition::Applied
        };
        self.trace("previous", outcome);
        outcome
    }

    pub fn reset(&mut self) -> Transition {
        let outcome = if self.current_scenario().is_some() {
            self.state.current_step = 0;
            self.state.is_playing = true;
            self.state.is_typing = false;
            self.state.completed_steps.clear();
            Transition::Applied
        } else {
            Transition::IgnoredNoScenario
        };
        self.trace("reset", outcome);
        outcome
    }

    pub fn handle_key(&mut self, key: NavKey) -> Transition {
        match key {
            NavKey::ArrowRight | NavKey::Space => self.advance(),
            NavKey::ArrowLeft => self.previous(),
            NavKey::Escape => self.reset(),
        }
    }

    #[allow(unused_variables)]
    fn trace(&self, op: &str, outcome: Transition) {
        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_transitions {
            log::info!(
                "[demo] {} -> {} (scenario={:?} step={} playing={} completed={})",
                op,
                outcome,
                self.state.current_scenario,
                self.state.current_step,
                self.state.is_playing,
                self.state.completed_steps.len()
            );
        }
    }
}

impl TypingLock for DemoOrchestrator {
    fn set_typing(&mut self, typing: bool) {
        self.state.is_typing = typing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn orchestrator() -> DemoOrchestrator {
        DemoOrchestrator::new(Arc::new(ScenarioCatalog::builtin()))
    }

    #[test]
    fn start_rejects_unknown_ids() {
        let mut o = orchestrator();
        assert_eq!(o.start("no-such-scene"), Transition::UnknownScenario);
        assert_eq!(o.state(), &DemoState::default());
        assert!(o.current_step().is_none());
    }

    #[test]
    fn advance_moves_forward_and_records_history() {
        let mut o = orchestrator();
        assert_eq!(o.start("weekend-insight"), Transition::Applied);
        let first = o.current_step().unwrap().id.clone();

        assert_eq!(o.advance(), Transition::Applied);
        assert_eq!(o.state().current_step, 1);
        assert!(o.is_playing());
        assert_eq!(o.state().completed_steps, vec![first]);
    }

    #[test]
    fn advance_at_last_step_finishes_once() {
        let mut o = orchestrator();
        o.start("onboarding-care");
        assert_eq!(o.advance(), Transition::Applied);
        assert_eq!(o.advance(), Transition::Applied);
        assert_eq!(o.state().current_step, 2);

        assert_eq!(o.advance(), Transition::Finished);
        assert!(!o.is_playing());
        assert_eq!(o.state().current_step, 2);
        assert_eq!(o.state().completed_steps.len(), 3);

        let before = o.state().clone();
        assert_eq!(o.advance(), Transition::IgnoredBoundary);
        assert_eq!(o.state(), &before);
    }

    #[test]
    fn navigation_is_locked_while_typing() {
        let mut o = orchestrator();
        o.start("crisis-prevention");
        o.advance();
        o.set_typing(true);
        let before = o.state().clone();

        assert_eq!(o.advance(), Transition::IgnoredTypingLock);
        assert_eq!(o.previous(), Transition::IgnoredTypingLock);
        assert_eq!(o.state(), &before);

        o.set_typing(false);
        assert_eq!(o.previous(), Transition::Applied);
    }

    #[test]
    fn previous_at_first_step_is_a_boundary() {
        let mut o = orchestrator();
        o.start("morning-synthesis");
        assert_eq!(o.previous(), Transition::IgnoredBoundary);
        assert_eq!(o.state().current_step, 0);
        assert!(o.state().completed_steps.is_empty());
    }

    #[test]
    fn previous_pops_history() {
        let mut o = orchestrator();
        o.start("morning-synthesis");
        o.advance();
        o.advance();
        assert_eq!(o.state().completed_steps.len(), 2);

        assert_eq!(o.previous(), Transition::Applied);
        assert_eq!(o.state().current_step, 1);
        assert_eq!(o.state().completed_steps.len(), 1);
    }

    #[test]
    fn reset_returns_to_first_step() {
        let mut o = orchestrator();
        assert_eq!(o.reset(), Transition::IgnoredNoScenario);

        o.start("onboarding-care");
        o.advance();
        o.advance();
        o.advance();
        o.set_typing(true);

        assert_eq!(o.reset(), Transition::Applied);
        let state = o.state();
        assert_eq!(state.current_step, 0);
        assert!(state.is_playing);
        assert!(!state.is_typing);
        assert!(state.completed_steps.is_empty());
    }

    #[test]
    fn nothing_moves_without_a_scenario() {
        let mut o = orchestrator();
        assert_eq!(o.advance(), Transition::IgnoredNoScenario);
        assert_eq!(o.previous(), Transition::IgnoredNoScenario);
    }

    #[test]
    fn keys_map_to_transitions() {
        let mut o = orchestrator();
        o.start("weekend-insight");
        assert_eq!(o.handle_key(NavKey::ArrowRight), Transition::Applied);
        assert_eq!(o.handle_key(NavKey::Space), Transition::Applied);
        assert_eq!(o.state().current_step, 2);
        assert_eq!(o.handle_key(NavKey::ArrowLeft), Transition::Applied);
        assert_eq!(o.state().current_step, 1);
        assert_eq!(o.handle_key(NavKey::Escape), Transition::Applied);
        assert_eq!(o.state().current_step, 0);
    }
}
