//! Word-by-word typing simulation.
//!
//! A run reveals one word per tick at the requested words-per-minute rate,
//! then finalizes the untouched source text into the message log and
//! releases the typing lock. At most one run exists at a time.

use std::fmt;
use std::time::Duration;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::domain::{ActorKind, FileRef, Step, StepMetadata};
use crate::utils::AppInstant;

use super::messages::{MessageLog, NewMessage};
use super::orchestration::TypingLock;
use super::timer::Interval;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingError {
    /// A run is already in progress.
    AlreadyActive,
    /// Zero words per minute would never finish.
    ZeroRate,
}

impl fmt::Display for TypingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypingError::AlreadyActive => write!(f, "a typing simulation is already running"),
            TypingError::ZeroRate => write!(f, "typing rate must be at least one word per minute"),
        }
    }
}

impl std::error::Error for TypingError {}

/// Everything needed to type out one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingRequest {
    pub actor: ActorKind,
    pub content: String,
    pub wpm: u32,
    pub files: Vec<FileRef>,
    pub metadata: Option<StepMetadata>,
}

impl TypingRequest {
    pub fn from_step(step: &Step) -> Self {
        Self {
            actor: step.kind,
            content: step.content.clone(),
            wpm: step.words_per_minute(),
            files: step.files().to_vec(),
            metadata: step.metadata.clone(),
        }
    }

    pub fn plain(actor: ActorKind, content: impl Into<String>, wpm: u32) -> Self {
        Self {
            actor,
            content: content.into(),
            wpm,
            files: Vec::new(),
            metadata: None,
        }
    }

    /// 60 000 ms / wpm, kept in microseconds so 180 wpm does not round.
    pub fn word_delay(&self) -> Duration {
        Duration::from_micros(60_000_000 / u64::from(self.wpm.max(1)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypingEvent {
    /// Another word became visible. `words` is the count shown so far.
    Revealed { words: usize },
    /// The message landed in the log and the lock was released.
    Finished { message_id: u64 },
}

#[derive(Debug)]
struct TypingRun {
    request: TypingRequest,
    words: Vec<String>,
    revealed: usize,
    visible: String,
    ticker: Interval,
}

#[derive(Debug, Default)]
pub struct TypingSimulator {
    run: Option<TypingRun>,
}

impl TypingSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.run.is_some()
    }

    /// The partially typed text. Empty when idle.
    pub fn visible_text(&self) -> &str {
        self.run.as_ref().map(|r| r.visible.as_str()).unwrap_or("")
    }

    /// Who is typing right now, for the "Adam is typing..." indicator.
    pub fn typing_actor(&self) -> Option<ActorKind> {
        self.run.as_ref().map(|r| r.request.actor)
    }

    /// Takes the typing lock and schedules the first word one delay from `now`.
    pub fn start(
        &mut self,
        request: TypingRequest,
        now: AppInstant,
        lock: &mut impl TypingLock,
    ) -> Result<(), TypingError> {
        if self.run.is_some() {
            return Err(TypingError::AlreadyActive);
        }
        if request.wpm == 0 {
            return Err(TypingError::ZeroRate);
        }

        let words: Vec<String> = request.content.split(' ').map(str::to_string).collect();
        let ticker = Interval::new(now, request.word_delay());

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_typing {
            log::info!(
                "[typing] {} starts {} words at {} wpm",
                request.actor,
                words.len(),
                request.wpm
            );
        }

        lock.set_typing(true);
        self.run = Some(TypingRun {
            request,
            words,
            revealed: 0,
            visible: String::new(),
            ticker,
        });
        Ok(())
    }

    /// Reveals every word due by `now`. The tick that reveals the final word
    /// also finalizes the message, clears the buffer and releases the lock.
    pub fn update(
        &mut self,
        now: AppInstant,
        messages: &mut MessageLog,
        lock: &mut impl TypingLock,
    ) -> Vec<TypingEvent> {
        let mut events = Vec::new();
        let Some(run) = self.run.as_mut() else {
            return events;
        };

        let due = run.ticker.drain(now);
        for _ in 0..due {
            if let Some(word) = run.words.get(run.revealed) {
                if run.revealed > 0 {
                    run.visible.push(' ');
                }
                run.visible.push_str(word);
                run.revealed += 1;
                events.push(TypingEvent::Revealed {
                    words: run.revealed,
                });
            }
            if run.revealed >= run.words.len() {
                break;
            }
        }

        if run.revealed >= run.words.len() {
            if let Some(done) = self.run.take() {
                let message_id = messages.push(NewMessage {
                    actor: done.request.actor,
                    content: done.request.content,
                    files: done.request.files,
                    metadata: done.request.metadata,
                });
                lock.set_typing(false);

                #[cfg(debug_assertions)]
                if DEBUG_FLAGS.print_typing {
                    log::info!("[typing] message {} finalized", message_id);
                }

                events.push(TypingEvent::Finished { message_id });
            }
        }
        events
    }

    /// Abandons the current run without touching the log. The caller owns the
    /// lock state afterwards. Returns true if a run was cancelled.
    pub fn cancel(&mut self) -> bool {
        self.run.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{ms, now};

    #[derive(Default)]
    struct RecordingLock {
        calls: Vec<bool>,
    }

    impl TypingLock for RecordingLock {
        fn set_typing(&mut self, typing: bool) {
            self.calls.push(typing);
        }
    }

    #[test]
    fn types_one_word_per_second_at_sixty_wpm() {
        let text = "Hey Joe how's it going";
        let tokens: Vec<&str> = text.split(' ').collect();
        let t0 = now();
        let mut sim = TypingSimulator::new();
        let mut log = MessageLog::new();
        let mut lock = RecordingLock::default();

        sim.start(
            TypingRequest::plain(ActorKind::AiMessage, text, 60),
            t0,
            &mut lock,
        )
        .unwrap();
        assert_eq!(lock.calls, vec![true]);
        assert_eq!(sim.visible_text(), "");

        // Nothing before the first delay
        assert!(sim.update(t0 + ms(999), &mut log, &mut lock).is_empty());

        for k in 1..tokens.len() {
            let events = sim.update(t0 + ms(1_000 * k as u64), &mut log, &mut lock);
            assert_eq!(events, vec![TypingEvent::Revealed { words: k }]);
            assert_eq!(sim.visible_text(), tokens[..k].join(" "));
            assert!(log.is_empty());
            assert_eq!(lock.calls, vec![true]);
        }

        let events = sim.update(t0 + ms(5_000), &mut log, &mut lock);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], TypingEvent::Revealed { words: 5 });
        assert!(matches!(events[1], TypingEvent::Finished { .. }));

        assert_eq!(log.len(), 1);
        assert_eq!(log.messages()[0].content, text);
        assert_eq!(sim.visible_text(), "");
        assert!(!sim.is_active());
        assert_eq!(lock.calls, vec![true, false]);

        // Later frames never release twice
        assert!(sim.update(t0 + ms(9_000), &mut log, &mut lock).is_empty());
        assert_eq!(lock.calls, vec![true, false]);
    }

    #[test]
    fn slow_frame_catches_up_in_one_update() {
        let t0 = now();
        let mut sim = TypingSimulator::new();
        let mut log = MessageLog::new();
        let mut lock = RecordingLock::default();
        sim.start(TypingRequest::plain(ActorKind::AiMessage, "a b c", 60), t0, &mut lock)
            .unwrap();

        let events = sim.update(t0 + ms(10_000), &mut log, &mut lock);
        assert_eq!(events.len(), 4);
        assert_eq!(log.messages()[0].content, "a b c");
        assert_eq!(lock.calls, vec![true, false]);
    }

    #[test]
    fn second_run_is_rejected() {
        let t0 = now();
        let mut sim = TypingSimulator::new();
        let mut lock = RecordingLock::default();
        sim.start(TypingRequest::plain(ActorKind::AiMessage, "one", 180), t0, &mut lock)
            .unwrap();
        let err = sim
            .start(TypingRequest::plain(ActorKind::AiMessage, "two", 180), t0, &mut lock)
            .unwrap_err();
        assert_eq!(err, TypingError::AlreadyActive);
        assert_eq!(lock.calls, vec![true]);
    }

    #[test]
    fn zero_rate_is_rejected() {
        let mut sim = TypingSimulator::new();
        let mut lock = RecordingLock::default();
        let err = sim
            .start(TypingRequest::plain(ActorKind::AiMessage, "x", 0), now(), &mut lock)
            .unwrap_err();
        assert_eq!(err, TypingError::ZeroRate);
        assert!(lock.calls.is_empty());
    }

    #[test]
    fn cancel_drops_the_run() {
        let t0 = now();
        let mut sim = TypingSimulator::new();
        let mut log = MessageLog::new();
        let mut lock = RecordingLock::default();
        sim.start(TypingRequest::plain(ActorKind::AiMessage, "a b", 60), t0, &mut lock)
            .unwrap();
        assert!(sim.cancel());
        assert!(!sim.cancel());
        assert!(sim.update(t0 + ms(5_000), &mut log, &mut lock).is_empty());
        assert!(log.is_empty());
    }

    #[test]
    fn word_delay_matches_rate() {
        assert_eq!(TypingRequest::plain(ActorKind::AiMessage, "", 60).word_delay(), ms(1_000));
        assert_eq!(
            TypingRequest::plain(ActorKind::AiMessage, "", 180).word_delay(),
            Duration::from_micros(333_333)
        );
    }
}
