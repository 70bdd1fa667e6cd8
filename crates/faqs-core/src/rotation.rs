//! Rotator: a timed carousel over a fixed number of slides.
//!
//! Each rotating surface (promotional banner, testimonials) owns its own
//! [`Rotator`]; there is no shared "current index". Time is passed in, so the
//! owner decides where ticks come from (a UI loop, a test).
//!
//! Hovering maps to [`Rotator::stop`] / [`Rotator::start`]; clicking a dot
//! indicator maps to [`Rotator::show`], which jumps and restarts the timer.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Rotator {
    len: usize,
    current: usize,
    display: Duration,
    /// When the current slide started showing. `None` while stopped.
    shown_at: Option<Instant>,
}

impl Rotator {
    pub fn new(len: usize, display: Duration) -> Self {
        Self { len, current: 0, display, shown_at: None }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index of the slide currently shown.
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_running(&self) -> bool {
        self.shown_at.is_some()
    }

    /// Begin (or resume) auto-advance; the current slide gets a full window.
    pub fn start(&mut self, now: Instant) {
        if self.len > 1 {
            self.shown_at = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.shown_at = None;
    }

    /// Move to the next slide, wrapping at the end.
    pub fn advance(&mut self) -> usize {
        if self.len > 0 {
            self.current = (self.current + 1) % self.len;
        }
        self.current
    }

    /// Jump to `index` and, if running, restart the display window.
    /// Out-of-range indices are ignored.
    pub fn show(&mut self, index: usize, now: Instant) {
        if index >= self.len {
            return;
        }
        self.current = index;
        if self.is_running() {
            self.shown_at = Some(now);
        }
        tracing::debug!(index, "rotator: show");
    }

    /// Advance if the display window has elapsed. Returns `true` on change.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(shown_at) = self.shown_at else {
            return false;
        };
        if now.saturating_duration_since(shown_at) < self.display {
            return false;
        }
        self.advance();
        self.shown_at = Some(now);
        true
    }
}
