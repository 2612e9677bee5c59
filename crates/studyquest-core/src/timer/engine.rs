//! Two-phase focus timer.
//!
//! The timer is a wall-clock-based state machine. It does not use internal
//! threads - the caller is responsible for calling `tick()` periodically.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Running(Focus) -> Running(Break) -> Completed
//! ```
//!
//! The Break phase begins in the same tick that Focus elapses; there is no
//! user action, cancellation, or error path in between. A fresh engine is
//! built per invocation, so nothing persists across cycles.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::cycle::{Cycle, Phase};
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Idle,
    Running,
    Completed,
}

/// Core focus-timer engine.
///
/// Operates on wall-clock deltas -- no internal thread. Tests drive the
/// `*_at` entry points with synthetic timestamps instead of real elapsed
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusTimer {
    cycle: Cycle,
    state: TimerState,
    phase: Phase,
    /// Remaining time in milliseconds for the current phase.
    remaining_ms: u64,
    /// Timestamp (ms since epoch) of the last start/tick.
    #[serde(default)]
    last_tick_epoch_ms: Option<u64>,
}

impl FocusTimer {
    pub fn new(cycle: Cycle) -> Self {
        Self {
            cycle,
            state: TimerState::Idle,
            phase: Phase::Focus,
            remaining_ms: cycle.phase_ms(Phase::Focus),
            last_tick_epoch_ms: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn remaining_ms(&self) -> u64 {
        self.remaining_ms
    }

    // ── Commands ─────────────────────────────────────────────────────

    pub fn start(&mut self) -> Option<Event> {
        self.start_at(now_ms())
    }

    /// Start at an explicit epoch timestamp. Only valid from `Idle`.
    pub fn start_at(&mut self, epoch_ms: u64) -> Option<Event> {
        if self.state != TimerState::Idle {
            return None;
        }
        self.state = TimerState::Running;
        self.last_tick_epoch_ms = Some(epoch_ms);
        Some(Event::TimerStarted {
            phase: self.phase,
            duration_secs: self.cycle.phase_secs(self.phase),
            at: Utc::now(),
        })
    }

    /// Call periodically. Returns a phase event when one elapses.
    pub fn tick(&mut self) -> Option<Event> {
        self.tick_at(now_ms())
    }

    /// Advance against an explicit timestamp.
    pub fn tick_at(&mut self, epoch_ms: u64) -> Option<Event> {
        if self.state != TimerState::Running {
            return None;
        }
        self.flush_elapsed(epoch_ms);
        if self.remaining_ms > 0 {
            return None;
        }
        match self.phase {
            Phase::Focus => {
                self.phase = Phase::Break;
                self.remaining_ms = self.cycle.phase_ms(Phase::Break);
                Some(Event::PhaseCompleted {
                    phase: Phase::Focus,
                    at: Utc::now(),
                })
            }
            Phase::Break => {
                self.state = TimerState::Completed;
                self.last_tick_epoch_ms = None;
                Some(Event::CycleCompleted { at: Utc::now() })
            }
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    fn flush_elapsed(&mut self, epoch_ms: u64) {
        if let Some(last) = self.last_tick_epoch_ms {
            let elapsed = epoch_ms.saturating_sub(last);
            self.remaining_ms = self.remaining_ms.saturating_sub(elapsed);
            self.last_tick_epoch_ms = Some(epoch_ms);
        }
    }
}

fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_walks_focus_then_break_then_completed() {
        let mut timer = FocusTimer::new(Cycle::new(60, 30));
        assert_eq!(timer.state(), TimerState::Idle);

        let started = timer.start_at(0).unwrap();
        assert!(matches!(
            started,
            Event::TimerStarted {
                phase: Phase::Focus,
                duration_secs: 60,
                ..
            }
        ));
        assert_eq!(timer.state(), TimerState::Running);

        assert!(timer.tick_at(59_000).is_none());
        let event = timer.tick_at(60_000).unwrap();
        assert!(matches!(
            event,
            Event::PhaseCompleted {
                phase: Phase::Focus,
                ..
            }
        ));
        assert_eq!(timer.phase(), Phase::Break);
        assert_eq!(timer.remaining_ms(), 30_000);

        assert!(timer.tick_at(89_000).is_none());
        let event = timer.tick_at(90_000).unwrap();
        assert!(matches!(event, Event::CycleCompleted { .. }));
        assert_eq!(timer.state(), TimerState::Completed);
    }

    #[test]
    fn completed_timer_ignores_further_ticks() {
        let mut timer = FocusTimer::new(Cycle::new(0, 0));
        timer.start_at(0);
        assert!(timer.tick_at(0).is_some()); // focus elapses immediately
        assert!(timer.tick_at(0).is_some()); // break elapses immediately
        assert_eq!(timer.state(), TimerState::Completed);
        assert!(timer.tick_at(1_000).is_none());
        assert!(timer.start_at(1_000).is_none());
    }

    #[test]
    fn start_is_only_valid_from_idle() {
        let mut timer = FocusTimer::new(Cycle::default());
        assert!(timer.start_at(0).is_some());
        assert!(timer.start_at(1).is_none());
    }

    #[test]
    fn tick_before_start_does_nothing() {
        let mut timer = FocusTimer::new(Cycle::new(1, 1));
        assert!(timer.tick_at(10_000).is_none());
        assert_eq!(timer.state(), TimerState::Idle);
        assert_eq!(timer.remaining_ms(), 1_000);
    }

    #[test]
    fn clock_going_backwards_does_not_underflow() {
        let mut timer = FocusTimer::new(Cycle::new(60, 30));
        timer.start_at(10_000);
        assert!(timer.tick_at(5_000).is_none());
        assert_eq!(timer.remaining_ms(), 60_000);
    }
}
