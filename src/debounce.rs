//! Stability debouncer
//!
//! A symbol is confirmed only after the classifier has reported it on every
//! frame for at least the hold duration. Any change of symbol, or a frame
//! without a hand, restarts the hold from zero. After a confirmation the
//! machine returns to `NoCandidate`, so holding the same sign confirms it
//! again only after another full hold.

use std::time::{Duration, Instant};

use crate::symbol::Symbol;

/// Default hold before a symbol is confirmed
pub const HOLD_DURATION: Duration = Duration::from_secs(2);

/// Debouncer state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StabilityState {
    #[default]
    NoCandidate,
    Candidate { symbol: Symbol, since: Instant },
}

/// Advance the state machine by one frame.
///
/// `observed` is the symbol classified on this frame, or `None` when there was
/// no usable hand. Returns the next state and the symbol confirmed on this
/// frame, if any.
pub fn step(
    state: StabilityState,
    observed: Option<Symbol>,
    now: Instant,
    hold: Duration,
) -> (StabilityState, Option<Symbol>) {
    match (state, observed) {
        (_, None) => (StabilityState::NoCandidate, None),
        (StabilityState::Candidate { symbol, since }, Some(s)) if s == symbol => {
            if now.saturating_duration_since(since) >= hold {
                (StabilityState::NoCandidate, Some(symbol))
            } else {
                (state, None)
            }
        }
        (_, Some(s)) => (StabilityState::Candidate { symbol: s, since: now }, None),
    }
}

/// Owns the debouncer state for one recognition session
#[derive(Debug)]
pub struct StabilityDebouncer {
    state: StabilityState,
    hold: Duration,
}

impl StabilityDebouncer {
    pub fn new(hold: Duration) -> Self {
        Self {
            state: StabilityState::NoCandidate,
            hold,
        }
    }

    /// Feed one frame's observation; returns the confirmed symbol, if any
    pub fn observe(&mut self, observed: Option<Symbol>, now: Instant) -> Option<Symbol> {
        let (next, confirmed) = step(self.state, observed, now, self.hold);
        self.state = next;
        confirmed
    }

    pub fn reset(&mut self) {
        self.state = StabilityState::NoCandidate;
    }

    pub fn state(&self) -> StabilityState {
        self.state
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }
}

impl Default for StabilityDebouncer {
    fn default() -> Self {
        Self::new(HOLD_DURATION)
    }
}
