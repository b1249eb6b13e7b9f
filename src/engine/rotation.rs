//! Auto-rotating KPI card stacks.
//!
//! Each mounted widget owns an [`Interval`] with a period drawn once per
//! mount from the injected RNG, a paused flag, and at most one pending resume.
//! Hover and wheel pause a widget; leaving it (or scrolling) schedules a
//! resume after a quiet period, replacing whatever resume was pending.

use std::collections::BTreeMap;
use std::time::Duration;

use rand::Rng;

#[cfg(debug_assertions)]
use crate::config::DEBUG_FLAGS;
use crate::config::{DEMO, RotationSettings};
use crate::domain::{FlipDirection, WidgetId};
use crate::utils::{AppInstant, DemoRng, ms};

use super::timer::{Deadline, Interval};

/// Why a card index moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationCause {
    Auto,
    Wheel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationEvent {
    Advanced {
        widget: WidgetId,
        index: usize,
        cause: RotationCause,
        direction: FlipDirection,
    },
    Resumed {
        widget: WidgetId,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollOutcome {
    Stepped { index: usize },
    /// Still inside the flip animation of the previous step.
    Throttled,
    /// Unknown widget, empty stack, or a zero delta.
    Ignored,
}

/// Cyclic index arithmetic that tolerates negative steps.
pub fn step_index(index: usize, delta: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let len = len as i64;
    (((index as i64 + delta) % len + len) % len) as usize
}

#[derive(Debug)]
struct WidgetRotation {
    stack_len: usize,
    index: usize,
    paused: bool,
    direction: FlipDirection,
    ticker: Interval,
    resume_at: Option<Deadline>,
    flip_cooldown: Option<Deadline>,
}

impl WidgetRotation {
    fn advance(&mut self, widget: WidgetId, cause: RotationCause, direction: FlipDirection) -> Option<RotationEvent> {
        if self.stack_len == 0 {
            return None;
        }
        self.index = step_index(self.index, direction.step(), self.stack_len);
        Some(RotationEvent::Advanced {
            widget,
            index: self.index,
            cause,
            direction,
        })
    }

    fn auto_direction(&self, widget: WidgetId) -> FlipDirection {
        if widget.has_flip_direction() {
            self.direction
        } else {
            FlipDirection::Forward
        }
    }
}

/// Rotation state for every mounted card stack.
pub struct RotationSet<R: Rng = DemoRng> {
    widgets: BTreeMap<WidgetId, WidgetRotation>,
    settings: RotationSettings,
    rng: R,
}

impl<R: Rng> RotationSet<R> {
    pub fn new(rng: R) -> Self {
        Self::with_settings(rng, DEMO.rotation)
    }

    pub fn with_settings(rng: R, settings: RotationSettings) -> Self {
        Self {
            widgets: BTreeMap::new(),
            settings,
            rng,
        }
    }

    fn draw_period(&mut self) -> Duration {
        let min = self.settings.min_interval_ms;
        let max = self.settings.max_interval_ms.max(min);
        ms(self.rng.gen_range(min..=max))
    }

    /// Mounts (or re-mounts) widgets with their stack sizes. Existing indices
    /// survive a re-mount; timers do not.
    pub fn mount(&mut self, stacks: &[(WidgetId, usize)], now: AppInstant) {
        for &(widget, stack_len) in stacks {
            let period = self.draw_period();
            let previous = self.widgets.remove(&widget);
            let index = previous
                .as_ref()
                .map(|w| w.index.min(stack_len.saturating_sub(1)))
                .unwrap_or(0);

            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_rotation {
                log::info!("[rotation] mount {} ({} cards, every {:?})", widget, stack_len, period);
            }

            self.widgets.insert(
                widget,
                WidgetRotation {
                    stack_len,
                    index,
                    paused: previous.as_ref().map(|w| w.paused).unwrap_or(false),
                    direction: previous.as_ref().map(|w| w.direction).unwrap_or_default(),
                    ticker: Interval::new(now, period),
                    resume_at: previous.and_then(|w| w.resume_at),
                    flip_cooldown: None,
                },
            );
        }
    }

    pub fn unmount(&mut self, widget: WidgetId) {
        if self.widgets.remove(&widget).is_some() {
            #[cfg(debug_assertions)]
            if DEBUG_FLAGS.print_rotation {
                log::info!("[rotation] unmount {}", widget);
            }
        }
    }

    /// Drops every widget and with it every interval and pending resume.
    pub fn dispose(&mut self) {
        self.widgets.clear();
    }

    // --- INTERACTION ---

    pub fn pause(&mut self, widget: WidgetId) {
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.paused = true;
        }
    }

    /// Resumes immediately and drops any pending resume.
    pub fn resume(&mut self, widget: WidgetId) {
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.paused = false;
            w.resume_at = None;
        }
    }

    fn schedule_resume(&mut self, widget: WidgetId, now: AppInstant) {
        let quiet = ms(self.settings.resume_quiet_ms);
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.resume_at = Some(Deadline::after(now, quiet));
        }
    }

    /// Pointer entered the widget. A hovered widget stays paused until it is left.
    pub fn hover_start(&mut self, widget: WidgetId) {
        if let Some(w) = self.widgets.get_mut(&widget) {
            w.paused = true;
            w.resume_at = None;
        }
    }

    pub fn hover_end(&mut self, widget: WidgetId, now: AppInstant) {
        self.schedule_resume(widget, now);
    }

    /// Wheel over a widget: pause, reschedule the resume, and flip one card in
    /// the wheel direction unless the previous flip is still animating.
    pub fn scroll(&mut self, widget: WidgetId, delta_y: f32, now: AppInstant) -> ScrollOutcome {
        if delta_y == 0.0 || !self.widgets.contains_key(&widget) {
            return ScrollOutcome::Ignored;
        }
        self.pause(widget);
        self.schedule_resume(widget, now);

        let cooldown = ms(self.settings.scroll_cooldown_ms);
        let Some(w) = self.widgets.get_mut(&widget) else {
            return ScrollOutcome::Ignored;
        };
        if w.flip_cooldown.is_some_and(|d| !d.is_due(now)) {
            return ScrollOutcome::Throttled;
        }

        let direction = FlipDirection::from_wheel(delta_y);
        if widget.has_flip_direction() {
            w.direction = direction;
        }
        match w.advance(widget, RotationCause::Wheel, direction) {
            Some(_) => {
                w.flip_cooldown = Some(Deadline::after(now, cooldown));
                ScrollOutcome::Stepped { index: w.index }
            }
            None => ScrollOutcome::Ignored,
        }
    }

    // --- FRAME LOOP ---

    /// Fires every tick and resume due by `now`, in time order per widget.
    /// A resume and a tick landing on the same instant: the resume goes first.
    pub fn update(&mut self, now: AppInstant) -> Vec<RotationEvent> {
        let mut events = Vec::new();

        for (&widget, w) in self.widgets.iter_mut() {
            if w.flip_cooldown.is_some_and(|d| d.is_due(now)) {
                w.flip_cooldown = None;
            }
            loop {
                let next_tick = w.ticker.next_due();
                let due_resume = w.resume_at.filter(|d| d.is_due(now)).map(|d| d.due());

                if let Some(resume) = due_resume {
                    if resume <= next_tick {
                        w.paused = false;
                        w.resume_at = None;
                        events.push(RotationEvent::Resumed { widget });
                        continue;
                    }
                }

                if !w.ticker.fire_if_due(now) {
                    break;
                }
                if !w.paused {
                    let direction = w.auto_direction(widget);
                    if let Some(event) = w.advance(widget, RotationCause::Auto, direction) {
                        events.push(event);
                    }
                }
            }
        }

        #[cfg(debug_assertions)]
        if DEBUG_FLAGS.print_rotation {
            for event in &events {
                log::info!("[rotation] {:?}", event);
            }
        }

        events
    }

    // --- ACCESSORS ---

    pub fn index(&self, widget: WidgetId) -> Option<usize> {
        self.widgets.get(&widget).map(|w| w.index)
    }

    pub fn is_paused(&self, widget: WidgetId) -> bool {
        self.widgets.get(&widget).is_some_and(|w| w.paused)
    }

    pub fn direction(&self, widget: WidgetId) -> FlipDirection {
        self.widgets
            .get(&widget)
            .map(|w| w.direction)
            .unwrap_or_default()
    }

    pub fn period(&self, widget: WidgetId) -> Option<Duration> {
        self.widgets.get(&widget).map(|w| w.ticker.period())
    }

    pub fn has_pending_resume(&self, widget: WidgetId) -> bool {
        self.widgets
            .get(&widget)
            .is_some_and(|w| w.resume_at.is_some())
    }

    /// Live intervals plus pending resumes.
    pub fn active_timer_count(&self) -> usize {
        self.widgets
            .values()
            .map(|w| 1 + usize::from(w.resume_at.is_some()))
            .sum()
    }

    /// Earliest instant anything here wants to run.
    pub fn next_wakeup(&self) -> Option<AppInstant> {
        self.widgets
            .values()
            .flat_map(|w| {
                std::iter::once(w.ticker.next_due()).chain(w.resume_at.map(|d| d.due()))
            })
            .min()
    }
}

impl<R: Rng> Drop for RotationSet<R> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::{now, seeded_rng};

    fn set() -> RotationSet {
        RotationSet::new(seeded_rng(42, 0))
    }

    #[test]
    fn step_index_wraps_both_ways() {
        assert_eq!(step_index(2, 1, 3), 0);
        assert_eq!(step_index(0, -1, 3), 2);
        assert_eq!(step_index(0, -4, 3), 2);
        assert_eq!(step_index(1, 7, 3), 2);
        assert_eq!(step_index(0, 1, 0), 0);
    }

    #[test]
    fn periods_fall_inside_configured_range() {
        let mut rot = set();
        let t0 = now();
        rot.mount(
            &[
                (WidgetId::Revenue, 4),
                (WidgetId::Churn, 3),
                (WidgetId::Coordination, 3),
                (WidgetId::Risk, 3),
                (WidgetId::Performance, 3),
            ],
            t0,
        );
        for widget in [WidgetId::Revenue, WidgetId::Churn, WidgetId::Performance] {
            let p = rot.period(widget).unwrap();
            assert!(p >= ms(4_000) && p <= ms(10_000), "{p:?}");
        }
        assert_eq!(rot.active_timer_count(), 5);
    }

    #[test]
    fn untouched_stack_cycles_modulo_length() {
        let mut rot = set();
        let t0 = now();
        rot.mount(&[(WidgetId::Churn, 3)], t0);
        let p = rot.period(WidgetId::Churn).unwrap();

        for n in 1..=7u32 {
            rot.update(t0 + p * n);
            assert_eq!(rot.index(WidgetId::Churn), Some(n as usize % 3));
        }
    }

    #[test]
    fn catch_up_frame_applies_every_tick() {
        let mut rot = set();
        let t0 = now();
        rot.mount(&[(WidgetId::Risk, 3)], t0);
        let p = rot.period(WidgetId::Risk).unwrap();

        let events = rot.update(t0 + p * 5);
        assert_eq!(events.len(), 5);
        assert_eq!(rot.index(WidgetId::Risk), Some(2));
    }

    #[test]
    fn hover_pauses_until_quiet_period_after_leave() {
        let mut rot = set();
        let t0 = now();
        rot.mount(&[(WidgetId::Coordination, 3)], t0);
        let p = rot.period(WidgetId::Coordination).unwrap();

        rot.hover_start(WidgetId::Coordination);
        rot.update(t0 + p * 3);
        assert_eq!(rot.index(WidgetId::Coordination), Some(0));
        assert!(rot.is_paused(WidgetId::Coordination));

        let left = t0 + p * 3;
        rot.hover_end(WidgetId::Coordination, left);
        let events = rot.update(left + ms(2_999));
        assert!(events.iter().all(|e| !matches!(e, RotationEvent::Resumed { .. })));
        assert!(rot.is_paused(WidgetId::Coordination));

        let events = rot.update(left + ms(3_000));
        let resumes = events
            .iter()
            .filter(|e| matches!(e, RotationEvent::Resumed { .. }))
            .count();
        assert_eq!(resumes, 1);
        assert!(!rot.is_paused(WidgetId::Coordination));

        // Ticks count again once resumed
        let before = rot.index(WidgetId::Coordination).unwrap();
        rot.update(left + ms(3_000) + p);
        assert_eq!(rot.index(WidgetId::Coordination), Some((before + 1) % 3));
    }

    #[test]
    fn second_interaction_reschedules_instead_of_stacking() {
        let mut rot = set();
        let t0 = now();
        rot.mount(&[(WidgetId::Churn, 3)], t0);

        rot.hover_start(WidgetId::Churn);
        rot.hover_end(WidgetId::Churn, t0 + ms(1_000));
        assert_eq!(rot.scroll(WidgetId::Churn, 40.0, t0 + ms(2_000)), ScrollOutcome::Stepped { index: 1 });
        assert_eq!(rot.active_timer_count(), 2);

        // The first resume would have fired at 4 000 ms
        let events = rot.update(t0 + ms(4_500));
        assert!(events.iter().all(|e| !matches!(e, RotationEvent::Resumed { .. })));
        assert!(rot.is_paused(WidgetId::Churn));

        let events = rot.update(t0 + ms(5_000));
        let resumes = events
            .iter()
            .filter(|e| matches!(e, RotationEvent::Resumed { .. }))
            .count();
        assert_eq!(resumes, 1);
        assert!(!rot.has_pending_resume(WidgetId::Churn));
    }

    #[test]
    fn wheel_steps_and_throttles() {
        let mut rot = set();
        let t0 = now();
        rot.mount(&[(WidgetId::Performance, 3)], t0);

        assert_eq!(rot.scroll(WidgetId::Performance, -1.0, t0), ScrollOutcome::Stepped { index: 2 });
        assert_eq!(rot.scroll(WidgetId::Performance, -1.0, t0 + ms(100)), ScrollOutcome::Throttled);
        assert_eq!(rot.scroll(WidgetId::Performance, 0.0, t0 + ms(700)), ScrollOutcome::Ignored);
        rot.update(t0 + ms(700));
        assert_eq!(rot.scroll(WidgetId::Performance, 5.0, t0 + ms(700)), ScrollOutcome::Stepped { index: 0 });
        assert_eq!(rot.scroll(WidgetId::Risk, 5.0, t0), ScrollOutcome::Ignored);
    }

    #[test]
    fn revenue_follows_last_flip_direction() {
        let mut rot = set();
        let t0 = now();
        rot.mount(&[(WidgetId::Revenue, 4)], t0);

        assert_eq!(rot.scroll(WidgetId::Revenue, -10.0, t0), ScrollOutcome::Stepped { index: 3 });
        assert_eq!(rot.direction(WidgetId::Revenue), FlipDirection::Backward);

        rot.resume(WidgetId::Revenue);
        let p = rot.period(WidgetId::Revenue).unwrap();
        rot.update(t0 + p);
        assert_eq!(rot.index(WidgetId::Revenue), Some(2));

        // Auto ticks keep the wheel's direction instead of resetting it
        rot.update(t0 + p * 2);
        assert_eq!(rot.index(WidgetId::Revenue), Some(1));
        assert_eq!(rot.direction(WidgetId::Revenue), FlipDirection::Backward);
    }

    #[test]
    fn unmount_before_first_tick_silences_widget() {
        let mut rot = set();
        let t0 = now();
        rot.mount(&[(WidgetId::Churn, 3), (WidgetId::Risk, 3)], t0);
        rot.hover_end(WidgetId::Churn, t0);
        rot.unmount(WidgetId::Churn);

        let events = rot.update(t0 + ms(60_000));
        assert!(events.iter().all(|e| match e {
            RotationEvent::Advanced { widget, .. } | RotationEvent::Resumed { widget } =>
                *widget != WidgetId::Churn,
        }));
        assert_eq!(rot.index(WidgetId::Churn), None);
        assert_eq!(rot.active_timer_count(), 1);

        rot.dispose();
        assert!(rot.update(t0 + ms(120_000)).is_empty());
        assert_eq!(rot.active_timer_count(), 0);
    }

    #[test]
    fn stack_change_rearms_and_clamps() {
        let mut rot = set();
        let t0 = now();
        rot.mount(&[(WidgetId::Churn, 3), (WidgetId::Risk, 3)], t0);
        rot.scroll(WidgetId::Churn, -1.0, t0);
        assert_eq!(rot.index(WidgetId::Churn), Some(2));

        let later = t0 + ms(1_000);
        rot.mount(&[(WidgetId::Churn, 2), (WidgetId::Risk, 3)], later);
        assert_eq!(rot.index(WidgetId::Churn), Some(1));
        // Fresh periods are at least 4 s from the re-mount
        let events = rot.update(later + ms(3_999));
        assert!(events.iter().all(|e| !matches!(e, RotationEvent::Advanced { .. })));
        assert!(rot.next_wakeup().is_some());
    }
}
