use std::time::{Duration, Instant, SystemTime};

use tracing::{debug, info};

use crate::error::TypingError;
use crate::keys::{KeyEventProcessor, KeyOutcome};
use crate::layout::next_key_name;
use crate::metrics::Metrics;
use crate::runtime::MetricsTimer;
use crate::session::{SessionState, TypingSession};
use crate::text_buffer::{LoadReport, TextBuffer};

/// Owns the live session and everything tied to its lifecycle: the key
/// processor, the refresh timer and the figures last shown to the user.
#[derive(Debug)]
pub struct Practice {
    session: Option<TypingSession>,
    processor: KeyEventProcessor,
    timer: MetricsTimer,
    metrics: Metrics,
}

impl Practice {
    pub fn new(tick_interval: Duration) -> Self {
        Self {
            session: None,
            processor: KeyEventProcessor::new(),
            timer: MetricsTimer::new(tick_interval),
            metrics: Metrics::default(),
        }
    }

    pub fn session(&self) -> Option<&TypingSession> {
        self.session.as_ref()
    }

    pub fn is_loaded(&self) -> bool {
        self.session.is_some()
    }

    pub fn state(&self) -> Option<SessionState> {
        self.session.as_ref().map(|s| s.state())
    }

    /// Figures as of the last refresh.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn timer(&self) -> &MetricsTimer {
        &self.timer
    }

    pub fn next_key(&self) -> Option<String> {
        self.session.as_ref().and_then(next_key_name)
    }

    /// Replace the current text. On `EmptyInput` the previous session is
    /// kept as it was.
    pub fn load(&mut self, raw: &str, now: SystemTime) -> Result<LoadReport, TypingError> {
        let (buffer, report) = TextBuffer::load(raw)?;
        info!(
            target: "practice",
            chars = report.chars,
            words = report.words,
            truncated = report.truncated,
            "text_loaded"
        );
        self.timer.cancel();
        self.session = Some(TypingSession::new(buffer));
        self.refresh(now);
        Ok(report)
    }

    /// Explicit start action. Restarts the clock and the refresh timer even
    /// mid-session. Returns false when there is nothing loaded.
    pub fn start(&mut self, now: SystemTime, clock: Instant) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        if session.is_complete() {
            return false;
        }
        session.start(now);
        self.timer.arm(clock);
        self.refresh(now);
        true
    }

    pub fn reset(&mut self, now: SystemTime) {
        self.timer.cancel();
        if let Some(session) = self.session.as_mut() {
            session.reset();
        }
        self.refresh(now);
    }

    /// Forward one raw key to the session.
    pub fn handle_key(&mut self, raw: &str, now: SystemTime, clock: Instant) -> Option<KeyOutcome> {
        let session = self.session.as_mut()?;
        let was_complete = session.is_complete();
        let outcome = self.processor.process(raw, session, now);

        if outcome.completed {
            self.timer.cancel();
        } else if outcome.started || (was_complete && outcome.changed) {
            self.timer.arm(clock);
        }

        if outcome.changed || outcome.started {
            self.refresh(now);
        }
        if outcome.completed {
            info!(
                target: "practice",
                wpm = self.metrics.wpm,
                accuracy = self.metrics.accuracy,
                errors = self.metrics.errors,
                seconds = self.metrics.elapsed_seconds,
                "practice_complete"
            );
        }
        Some(outcome)
    }

    /// Periodic refresh. Returns true when the displayed figures were
    /// recomputed.
    pub fn on_tick(&mut self, now: SystemTime, clock: Instant) -> bool {
        if self.timer.poll(clock) {
            self.refresh(now);
            true
        } else {
            false
        }
    }

    fn refresh(&mut self, now: SystemTime) {
        self.metrics = Metrics::compute(self.session.as_ref(), now);
        debug!(
            target: "practice",
            wpm = self.metrics.wpm,
            accuracy = self.metrics.accuracy,
            "metrics_refreshed"
        );
    }
}
