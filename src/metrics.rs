use std::time::SystemTime;

use crate::session::TypingSession;

/// Figures shown in the heads-up display, derived on demand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Metrics {
    pub elapsed_seconds: u64,
    pub words_typed: usize,
    pub wpm: u64,
    pub accuracy: u64,
    pub progress_percent: f64,
    pub errors: usize,
}

impl Default for Metrics {
    fn default() -> Self {
        Self {
            elapsed_seconds: 0,
            words_typed: 0,
            wpm: 0,
            accuracy: 100,
            progress_percent: 0.0,
            errors: 0,
        }
    }
}

impl Metrics {
    /// `None` means no text is loaded yet.
    pub fn compute(session: Option<&TypingSession>, now: SystemTime) -> Self {
        let Some(session) = session else {
            return Self::default();
        };

        let elapsed_seconds = elapsed_seconds(session, now);
        let words_typed = session.text().words_before(session.cursor());

        Self {
            elapsed_seconds,
            words_typed,
            wpm: wpm(words_typed, elapsed_seconds),
            accuracy: accuracy(session.correct_count(), session.cursor()),
            progress_percent: progress_percent(session.cursor(), session.text().len()),
            errors: session.error_count(),
        }
    }
}

/// Whole seconds since the session started; 0 before start or when the
/// clock went backwards.
pub fn elapsed_seconds(session: &TypingSession, now: SystemTime) -> u64 {
    session
        .started_at()
        .and_then(|started| now.duration_since(started).ok())
        .map_or(0, |d| d.as_secs())
}

/// Floored at one second worth of minutes so the figure stays sane right
/// after the start.
pub fn wpm(words_typed: usize, elapsed_seconds: u64) -> u64 {
    let minutes = (elapsed_seconds as f64 / 60.0).max(1.0 / 60.0);
    (words_typed as f64 / minutes).round() as u64
}

pub fn accuracy(correct: usize, attempted: usize) -> u64 {
    if attempted == 0 {
        return 100;
    }
    ((correct as f64 / attempted as f64) * 100.0).round() as u64
}

pub fn progress_percent(cursor: usize, len: usize) -> f64 {
    if len == 0 {
        return 0.0;
    }
    ((cursor as f64 / len as f64) * 100.0).clamp(0.0, 100.0)
}
