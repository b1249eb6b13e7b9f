use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;

use crate::config::DEMO;
use crate::domain::{ActorKind, Scenario, ScenarioCatalog, Step};
use crate::models::{DashboardFeeds, stack_lengths};
use crate::utils::{AppInstant, DemoRng, ms, rng_for};

use super::messages::{Message, MessageLog, NewMessage};
use super::orchestration::{DemoOrchestrator, DemoState, NavKey, Transition, TypingLock};
use super::rotation::RotationSet;
use super::timer::Deadline;
use super::typing::{TypingEvent, TypingRequest, TypingSimulator};

pub const CANNED_REPLIES: [&str; 3] = [
    "That's a great question! Let me analyze the data and provide you with actionable insights.",
    "I've processed your request and found some interesting patterns in your business metrics.",
    "Based on your query, I can see several optimization opportunities we should explore.",
];

// RNG stream ids, so one --seed drives independent sequences
const FEED_STREAM: u64 = 0;
const ROTATION_STREAM: u64 = 1;

/// Why a manual chat message was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A scenario is playing; the chat belongs to the script.
    ScenarioRunning,
    /// Something is being typed or a reply is queued.
    TypingInProgress,
    EmptyMessage,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::ScenarioRunning => write!(f, "a scenario is playing"),
            EngineError::TypingInProgress => write!(f, "Adam is still typing"),
            EngineError::EmptyMessage => write!(f, "message is empty"),
        }
    }
}

impl std::error::Error for EngineError {}

pub struct DemoEngine {
    /// Shared immutable catalog
    pub catalog: Arc<ScenarioCatalog>,

    orchestrator: DemoOrchestrator,
    typing: TypingSimulator,
    log: MessageLog,

    /// Card stack rotation for the KPI row
    pub widgets: RotationSet,

    /// Background mock feeds
    pub feeds: DashboardFeeds,

    /// Bumped on every applied transition. A step is presented once per generation.
    generation: u64,
    presented: Option<u64>,
    pending_step: Option<(Deadline, u64)>,

    autoplay: Option<Duration>,
    autoplay_at: Option<Deadline>,

    pending_reply: Option<Deadline>,
    rng: DemoRng,
    disposed: bool,
}

impl Default for DemoEngine {
    fn default() -> Self {
        Self::new(Arc::new(ScenarioCatalog::builtin()), None, crate::utils::now())
    }
}

impl DemoEngine {
    /// Mounts every widget and starts the feeds. `seed` makes the whole board
    /// deterministic.
    pub fn new(catalog: Arc<ScenarioCatalog>, seed: Option<u64>, now: AppInstant) -> Self {
        let mut widgets = RotationSet::new(rng_for(seed, ROTATION_STREAM));
        widgets.mount(&stack_lengths(), now);

        Self {
            orchestrator: DemoOrchestrator::new(Arc::clone(&catalog)),
            catalog,
            typing: TypingSimulator::new(),
            log: MessageLog::with_greeting(),
            widgets,
            feeds: DashboardFeeds::new(now),
            generation: 0,
            presented: None,
            pending_step: None,
            autoplay: None,
            autoplay_at: None,
            pending_reply: None,
            rng: rng_for(seed, FEED_STREAM),
            disposed: false,
        }
    }

    /// THE FRAME LOOP.
    /// Returns TRUE while something is in motion (typing, a queued step or
    /// reply, or a feed that changed this frame), so the UI keeps repainting.
    pub fn update(&mut self, now: AppInstant) -> bool {
        if self.disposed {
            return false;
        }

        // 1. Typing reveal
        let events = self.typing.update(now, &mut self.log, &mut self.orchestrator);
        let finished = events
            .iter()
            .any(|e| matches!(e, TypingEvent::Finished { .. }));
        if finished && self.orchestrator.is_playing() {
            if let Some(pause) = self.autoplay {
                self.autoplay_at = Some(Deadline::after(now, pause));
            }
        }

        // 2. Autoplay
        if self.autoplay_at.is_some_and(|d| d.is_due(now)) && !self.orchestrator.is_typing() {
            self.autoplay_at = None;
            self.advance();
        }

        // 3. Present the current step
        self.present_current_step(now);

        // 4. Queued reply to a manual message
        if self.pending_reply.is_some_and(|d| d.is_due(now)) {
            self.pending_reply = None;
            let reply = CANNED_REPLIES[self.rng.gen_range(0..CANNED_REPLIES.len())];
            let request =
                TypingRequest::plain(ActorKind::AiMessage, reply, DEMO.typing.synthetic_wpm);
            if let Err(e) = self.typing.start(request, now, &mut self.orchestrator) {
                log::warn!("Dropped canned reply: {}", e);
            }
        }

        // 5. Widgets and feeds
        let rotated = !self.widgets.update(now).is_empty();
        let refreshed = self.feeds.update(now, &mut self.rng);

        !events.is_empty()
            || rotated
            || refreshed
            || self.typing.is_active()
            || self.pending_step.is_some()
            || self.pending_reply.is_some()
            || self.autoplay_at.is_some()
    }

    fn present_current_step(&mut self, now: AppInstant) {
        if !self.orchestrator.is_playing()
            || self.orchestrator.is_typing()
            || self.typing.is_active()
            || self.presented == Some(self.generation)
        {
            return;
        }
        let Some(step) = self.orchestrator.current_step() else {
            return;
        };

        match self.pending_step {
            Some((deadline, generation)) if generation == self.generation => {
                if !deadline.is_due(now) {
                    return;
                }
            }
            _ => {
                let delay = step.start_delay();
                self.pending_step = Some((Deadline::after(now, delay), self.generation));
                if !delay.is_zero() {
                    return;
                }
            }
        }

        let request = TypingRequest::from_step(step);
        self.pending_step = None;
        self.presented = Some(self.generation);
        if let Err(e) = self.typing.start(request, now, &mut self.orchestrator) {
            log::warn!("Could not present step: {}", e);
        }
    }

    /// An applied transition supersedes whatever was scheduled for the old step.
    fn on_transition(&mut self, outcome: Transition) -> Transition {
        if outcome.is_applied() {
            self.generation += 1;
            self.pending_step = None;
            self.autoplay_at = None;
        }
        outcome
    }

    // --- PLAYBACK API ---

    pub fn start_scenario(&mut self, scenario_id: &str) -> Transition {
        let outcome = self.orchestrator.start(scenario_id);
        if outcome.is_applied() {
            self.typing.cancel();
            self.pending_reply = None;
        }
        self.on_transition(outcome)
    }

    pub fn advance(&mut self) -> Transition {
        let outcome = self.orchestrator.advance();
        self.on_transition(outcome)
    }

    pub fn previous(&mut self) -> Transition {
        let outcome = self.orchestrator.previous();
        self.on_transition(outcome)
    }

    pub fn reset(&mut self) -> Transition {
        let outcome = self.orchestrator.reset();
        if outcome.is_applied() {
            self.typing.cancel();
        }
        self.on_transition(outcome)
    }

    pub fn handle_key(&mut self, key: NavKey) -> Transition {
        match key {
            NavKey::ArrowRight | NavKey::Space => self.advance(),
            NavKey::ArrowLeft => self.previous(),
            NavKey::Escape => self.reset(),
        }
    }

    pub fn set_typing(&mut self, typing: bool) {
        self.orchestrator.set_typing(typing);
    }

    /// `None` turns autoplay off.
    pub fn set_autoplay(&mut self, pause: Option<Duration>) {
        self.autoplay = pause;
        if pause.is_none() {
            self.autoplay_at = None;
        }
    }

    pub fn autoplay(&self) -> Option<Duration> {
        self.autoplay
    }

    /// Posts a message from the user and queues a canned reply.
    pub fn send_user_message(&mut self, text: &str, now: AppInstant) -> Result<u64, EngineError> {
        if text.trim().is_empty() {
            return Err(EngineError::EmptyMessage);
        }
        if self.orchestrator.is_playing() {
            return Err(EngineError::ScenarioRunning);
        }
        if self.typing.is_active() || self.pending_reply.is_some() {
            return Err(EngineError::TypingInProgress);
        }

        let id = self
            .log
            .push(NewMessage::plain(ActorKind::UserMessage, text));
        self.pending_reply = Some(Deadline::after(
            now,
            ms(DEMO.playback.manual_reply_delay_ms),
        ));
        Ok(id)
    }

    /// Stops every timer the engine owns.
    pub fn dispose(&mut self) {
        self.typing.cancel();
        self.widgets.dispose();
        self.feeds.dispose();
        self.pending_step = None;
        self.pending_reply = None;
        self.autoplay_at = None;
        self.disposed = true;
    }

    /// Tears the KPI row down and mounts it again with fresh stacks, as when
    /// the page layout changes underneath it.
    pub fn remount_widgets(&mut self, now: AppInstant) {
        if self.disposed {
            return;
        }
        for (widget, _) in stack_lengths() {
            self.widgets.unmount(widget);
        }
        self.widgets.mount(&stack_lengths(), now);
    }

    /// Earliest scheduled deadline: a rotation tick, a resume, a queued step,
    /// a queued reply or the autoplay pause. `None` once disposed.
    pub fn next_wakeup(&self) -> Option<AppInstant> {
        if self.disposed {
            return None;
        }
        [
            self.widgets.next_wakeup(),
            self.pending_step.map(|(d, _)| d.due()),
            self.pending_reply.map(|d| d.due()),
            self.autoplay_at.map(|d| d.due()),
        ]
        .into_iter()
        .flatten()
        .min()
    }

    // --- ACCESSORS ---

    pub fn state(&self) -> &DemoState {
        self.orchestrator.state()
    }

    pub fn current_step(&self) -> Option<&Step> {
        self.orchestrator.current_step()
    }

    pub fn current_scenario(&self) -> Option<&Scenario> {
        self.orchestrator.current_scenario()
    }

    pub fn messages(&self) -> &[Message] {
        self.log.messages()
    }

    pub fn message_log(&self) -> &MessageLog {
        &self.log
    }

    /// Partially typed text of the current run.
    pub fn typing_text(&self) -> &str {
        self.typing.visible_text()
    }

    pub fn typing_actor(&self) -> Option<ActorKind> {
        self.typing.typing_actor()
    }

    pub fn is_typing(&self) -> bool {
        self.orchestrator.is_typing()
    }

    pub fn is_playing(&self) -> bool {
        self.orchestrator.is_playing()
    }

    /// True once the last step has been acknowledged.
    pub fn is_finished(&self) -> bool {
        let state = self.orchestrator.state();
        state.current_scenario.is_some() && !state.is_playing
    }

    pub fn can_chat(&self) -> bool {
        !self.orchestrator.is_playing() && !self.typing.is_active() && self.pending_reply.is_none()
    }
}
