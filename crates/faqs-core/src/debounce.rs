//! Debounce: collapse bursts of input into one evaluation after a quiet window.
//!
//! Two shapes of the same cancellable timer:
//!
//! - [`Debouncer`] is synchronous and takes the current [`Instant`] as an
//!   argument. The TUI event loop pushes on every keystroke and polls on every
//!   tick, which keeps it deterministic under test.
//! - [`debounce`] wraps a `tokio` channel: it forwards the last value of every
//!   burst once the input has been quiet for the window.
//!
//! In both, a new value cancels whatever was scheduled and restarts the window.

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

/// Quiescence window used when the config does not override it.
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(300);

/// A single pending value with a deadline.
#[derive(Debug)]
pub struct Debouncer<T> {
    window: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debouncer<T> {
    pub fn new(window: Duration) -> Self {
        Self { window, pending: None }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Schedule `value` to fire at `now + window`, replacing any pending value.
    pub fn push(&mut self, value: T, now: Instant) {
        let replaced = self.pending.is_some();
        self.pending = Some((value, now + self.window));
        tracing::trace!(replaced, window_ms = self.window.as_millis() as u64, "debounce: scheduled");
    }

    /// Return the pending value if its deadline has passed. Fires at most once
    /// per scheduled value.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        match self.pending {
            Some((_, deadline)) if now >= deadline => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    /// Drop the pending value without firing it.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::trace!("debounce: cancelled");
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left until the pending value fires, if any.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, deadline)| deadline.saturating_duration_since(now))
    }
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW)
    }
}

/// Spawn a task that debounces `input` and returns the receiving end of the
/// debounced stream.
///
/// When `input` closes, a value still waiting out its window is flushed
/// immediately and the output channel closes after it. Must be called from
/// within a tokio runtime.
pub fn debounce<T>(mut input: mpsc::Receiver<T>, window: Duration) -> mpsc::Receiver<T>
where
    T: Send + 'static,
{
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut pending: Option<T> = None;
        loop {
            if pending.is_none() {
                match input.recv().await {
                    Some(value) => pending = Some(value),
                    None => break,
                }
                continue;
            }

            tokio::select! {
                next = input.recv() => match next {
                    Some(value) => pending = Some(value),
                    None => break,
                },
                _ = tokio::time::sleep(window) => {
                    if let Some(value) = pending.take() {
                        if tx.send(value).await.is_err() {
                            return;
                        }
                    }
                }
            }
        }

        if let Some(value) = pending.take() {
            let _ = tx.send(value).await;
        }
        tracing::debug!("debounce: input closed");
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WINDOW: Duration = Duration::from_millis(300);

    #[test]
    fn does_not_fire_inside_window() {
        let start = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.push("dep", start);
        assert_eq!(d.poll(start + Duration::from_millis(299)), None);
        assert!(d.is_pending());
    }

    #[test]
    fn fires_once_after_window() {
        let start = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.push("deposit", start);
        assert_eq!(d.poll(start + WINDOW), Some("deposit"));
        assert_eq!(d.poll(start + WINDOW * 2), None);
    }

    #[test]
    fn new_push_restarts_window_and_replaces_value() {
        let start = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.push("d", start);
        d.push("de", start + Duration::from_millis(200));
        d.push("dep", start + Duration::from_millis(400));
        // first deadline has passed but was cancelled by later pushes
        assert_eq!(d.poll(start + Duration::from_millis(500)), None);
        assert_eq!(d.poll(start + Duration::from_millis(700)), Some("dep"));
    }

    #[test]
    fn cancel_drops_pending() {
        let start = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        d.push(1, start);
        d.cancel();
        assert!(!d.is_pending());
        assert_eq!(d.poll(start + WINDOW), None);
    }

    #[test]
    fn remaining_counts_down() {
        let start = Instant::now();
        let mut d = Debouncer::new(WINDOW);
        assert_eq!(d.remaining(start), None);
        d.push((), start);
        assert_eq!(d.remaining(start + Duration::from_millis(100)), Some(Duration::from_millis(200)));
        assert_eq!(d.remaining(start + Duration::from_secs(1)), Some(Duration::ZERO));
    }

    #[tokio::test(start_paused = true)]
    async fn async_burst_collapses_to_last_value() {
        let (tx, rx) = mpsc::channel(16);
        let mut out = debounce(rx, WINDOW);

        for q in ["w", "wi", "wit", "with"] {
            tx.send(q.to_string()).await.unwrap();
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        tokio::time::sleep(WINDOW).await;
        assert_eq!(out.recv().await.as_deref(), Some("with"));

        tx.send("fee".to_string()).await.unwrap();
        drop(tx);
        assert_eq!(out.recv().await.as_deref(), Some("fee"));
        assert_eq!(out.recv().await, None);
    }

    #[tokio::test(start_paused = true)]
    async fn async_separated_inputs_each_fire() {
        let (tx, rx) = mpsc::channel(16);
        let mut out = debounce(rx, WINDOW);

        tx.send(1).await.unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        tx.send(2).await.unwrap();
        tokio::time::sleep(Duration::from_millis(400)).await;
        drop(tx);

        assert_eq!(out.recv().await, Some(1));
        assert_eq!(out.recv().await, Some(2));
        assert_eq!(out.recv().await, None);
    }
}
