use std::time::SystemTime;

use tracing::{debug, info};

use crate::error::TypingError;
use crate::text_buffer::TextBuffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Complete,
}

/// Result of a forward keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The cursor moved forward and the session is still open.
    Advanced,
    /// The keystroke filled the last position.
    Completed,
}

/// Read-only view handed to whoever renders the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSnapshot<'a> {
    pub cursor: usize,
    pub flags: &'a [bool],
    pub correct_count: usize,
    pub error_count: usize,
    pub state: SessionState,
}

/// represents one attempt at typing a loaded text
#[derive(Debug, Clone)]
pub struct TypingSession {
    text: TextBuffer,
    cursor: usize,
    flags: Vec<bool>,
    correct_count: usize,
    error_count: usize,
    started_at: Option<SystemTime>,
}

impl TypingSession {
    pub fn new(text: TextBuffer) -> Self {
        Self {
            text,
            cursor: 0,
            flags: Vec::new(),
            correct_count: 0,
            error_count: 0,
            started_at: None,
        }
    }

    pub fn text(&self) -> &TextBuffer {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn flags(&self) -> &[bool] {
        &self.flags
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn started_at(&self) -> Option<SystemTime> {
        self.started_at
    }

    pub fn state(&self) -> SessionState {
        if self.cursor == self.text.len() {
            SessionState::Complete
        } else if self.started_at.is_some() {
            SessionState::InProgress
        } else {
            SessionState::NotStarted
        }
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.state() == SessionState::Complete
    }

    /// Character awaiting the next keystroke, `None` once complete.
    pub fn expected(&self) -> Option<char> {
        self.text.char_at(self.cursor).ok()
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_> {
        SessionSnapshot {
            cursor: self.cursor,
            flags: &self.flags,
            correct_count: self.correct_count,
            error_count: self.error_count,
            state: self.state(),
        }
    }

    /// Explicit start. Always (re)starts the clock at `now`; returns true
    /// when this call moved the session out of `NotStarted`.
    pub fn start(&mut self, now: SystemTime) -> bool {
        let first = self.started_at.replace(now).is_none();
        info!(target: "session", len = self.text.len(), first, "session_started");
        first
    }

    /// Record one keystroke at the cursor.
    pub fn record(&mut self, correct: bool, now: SystemTime) -> Result<Transition, TypingError> {
        if self.is_complete() {
            return Err(TypingError::SessionComplete);
        }
        if self.started_at.is_none() {
            self.start(now);
        }

        self.flags.push(correct);
        if correct {
            self.correct_count += 1;
        } else {
            self.error_count += 1;
        }
        self.cursor += 1;

        if self.is_complete() {
            info!(
                target: "session",
                correct = self.correct_count,
                errors = self.error_count,
                "session_complete"
            );
            Ok(Transition::Completed)
        } else {
            Ok(Transition::Advanced)
        }
    }

    /// Undo the last keystroke. Returns false when there is nothing to undo.
    pub fn backspace(&mut self) -> bool {
        match self.flags.pop() {
            Some(was_correct) => {
                if was_correct {
                    self.correct_count -= 1;
                } else {
                    self.error_count -= 1;
                }
                self.cursor -= 1;
                debug!(target: "session", cursor = self.cursor, was_correct, "backspace");
                true
            }
            None => false,
        }
    }

    pub fn reset(&mut self) {
        self.cursor = 0;
        self.flags.clear();
        self.correct_count = 0;
        self.error_count = 0;
        self.started_at = None;
        debug!(target: "session", "session_reset");
    }
}
