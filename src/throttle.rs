//! Leading + trailing rate limiter for preview recomputation.
//!
//! The first request in a quiet period runs immediately. Requests arriving
//! inside the window are coalesced into one trailing run at the end of the
//! window. Two runs are never closer than the window.
//!
//! Time is passed in by the caller; the UI drives trailing runs with a
//! single-shot `slint::Timer` armed for the returned delay.

use log::debug;
use std::time::{Duration, Instant};

/// What the caller should do with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    /// Run now.
    Run,
    /// A trailing run is due after this delay; call [`Throttle::poll`] then.
    Defer(Duration),
    /// A trailing run is already scheduled and will pick this request up.
    Coalesced,
}

#[derive(Debug)]
pub struct Throttle {
    name: &'static str,
    window: Duration,
    last_run: Option<Instant>,
    pending: bool,
}

impl Throttle {
    pub fn new(name: &'static str, window: Duration) -> Self {
        Self {
            name,
            window,
            last_run: None,
            pending: false,
        }
    }

    pub fn request(&mut self, now: Instant) -> ThrottleDecision {
        match self.remaining(now) {
            None => {
                self.last_run = Some(now);
                self.pending = false;
                ThrottleDecision::Run
            }
            Some(_) if self.pending => ThrottleDecision::Coalesced,
            Some(remaining) => {
                debug!("{}: deferring recompute by {:?}", self.name, remaining);
                self.pending = true;
                ThrottleDecision::Defer(remaining)
            }
        }
    }

    /// Consumes a pending request if its window has elapsed.
    ///
    /// Returns `Err(remaining)` when the timer fired early and must be re-armed.
    pub fn poll(&mut self, now: Instant) -> Result<bool, Duration> {
        if !self.pending {
            return Ok(false);
        }
        match self.remaining(now) {
            Some(remaining) => Err(remaining),
            None => {
                self.pending = false;
                self.last_run = Some(now);
                Ok(true)
            }
        }
    }

    /// Time left in the current window, or `None` if a run may start now.
    fn remaining(&self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.last_run?);
        (elapsed < self.window).then(|| self.window - elapsed)
    }
}
