use std::time::SystemTime;

use tracing::trace;

use crate::session::{Transition, TypingSession};

pub const KEY_ENTER: &str = "Enter";
pub const KEY_TAB: &str = "Tab";
pub const KEY_BACKSPACE: &str = "Backspace";

/// Decision taken for one raw key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Accept { correct: bool },
    Backspace,
    Ignore,
}

/// What a processed key did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyOutcome {
    pub action: Action,
    /// The session moved out of `NotStarted` on this key.
    pub started: bool,
    /// The session state changed (cursor, flags or counters).
    pub changed: bool,
    pub completed: bool,
}

impl KeyOutcome {
    fn unchanged(action: Action) -> Self {
        Self {
            action,
            started: false,
            changed: false,
            completed: false,
        }
    }
}

/// Turns raw key names into session mutations.
#[derive(Debug, Default, Clone, Copy)]
pub struct KeyEventProcessor;

impl KeyEventProcessor {
    pub fn new() -> Self {
        Self
    }

    /// Classify `raw` against the session's next expected character.
    ///
    /// Correctness is an exact, case-sensitive comparison of the pressed
    /// character (after `Enter`/`Tab` substitution) with the target text.
    pub fn handle(&self, raw: &str, session: &TypingSession) -> Action {
        if raw == KEY_BACKSPACE {
            return Action::Backspace;
        }

        let Some(pressed) = pressed_char(raw) else {
            trace!(target: "keys", key = raw, "ignored");
            return Action::Ignore;
        };

        match session.expected() {
            Some(expected) => Action::Accept {
                correct: pressed == expected,
            },
            None => Action::Ignore,
        }
    }

    /// Classify and apply one key press.
    pub fn process(&self, raw: &str, session: &mut TypingSession, now: SystemTime) -> KeyOutcome {
        let action = self.handle(raw, session);
        match action {
            Action::Ignore => KeyOutcome::unchanged(action),
            Action::Backspace => KeyOutcome {
                changed: session.backspace(),
                ..KeyOutcome::unchanged(action)
            },
            Action::Accept { correct } => {
                let was_started = session.has_started();
                match session.record(correct, now) {
                    Ok(transition) => KeyOutcome {
                        action,
                        started: !was_started,
                        changed: true,
                        completed: transition == Transition::Completed,
                    },
                    Err(_) => KeyOutcome::unchanged(Action::Ignore),
                }
            }
        }
    }
}

/// The character a raw key stands for, or `None` for keys that must not
/// touch the session (modifiers, arrows, function keys, ...).
fn pressed_char(raw: &str) -> Option<char> {
    match raw {
        KEY_ENTER => Some('\n'),
        KEY_TAB => Some('\t'),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        }
    }
}

/// Canonical key name used to look a character up on the keyboard layout.
pub fn normalize_key(c: char) -> String {
    match c {
        ' ' => "space".to_string(),
        '\n' | '\r' => "enter".to_string(),
        '\t' => "tab".to_string(),
        _ => c.to_lowercase().collect(),
    }
}

/// Same as [`normalize_key`] for raw key names coming from the input layer.
pub fn normalize_raw_key(raw: &str) -> String {
    match pressed_char(raw) {
        Some(c) => normalize_key(c),
        None => raw.to_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionState;
    use crate::text_buffer::TextBuffer;

    fn session(text: &str) -> TypingSession {
        let (buffer, _) = TextBuffer::load(text).unwrap();
        TypingSession::new(buffer)
    }

    #[test]
    fn test_correct_and_incorrect() {
        let s = session("ab");
        let p = KeyEventProcessor::new();
        assert_eq!(p.handle("a", &s), Action::Accept { correct: true });
        assert_eq!(p.handle("b", &s), Action::Accept { correct: false });
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        let s = session("Hello");
        let p = KeyEventProcessor::new();
        assert_eq!(p.handle("h", &s), Action::Accept { correct: false });
        assert_eq!(p.handle("H", &s), Action::Accept { correct: true });
    }

    #[test]
    fn test_enter_and_tab_substitution() {
        let p = KeyEventProcessor::new();
        let mut s = session("a\nb\tc");
        let now = SystemTime::now();
        p.process("a", &mut s, now);
        assert_eq!(p.handle("Enter", &s), Action::Accept { correct: true });
        p.process("Enter", &mut s, now);
        p.process("b", &mut s, now);
        assert_eq!(p.handle("Tab", &s), Action::Accept { correct: true });
        assert_eq!(p.handle(" ", &s), Action::Accept { correct: false });
    }

    #[test]
    fn test_modifier_keys_are_ignored() {
        let p = KeyEventProcessor::new();
        let mut s = session("abc");
        for key in ["Shift", "Control", "Alt", "Meta", "CapsLock", "ArrowLeft", "F5", ""] {
            let outcome = p.process(key, &mut s, SystemTime::now());
            assert_eq!(outcome.action, Action::Ignore);
            assert!(!outcome.changed);
        }
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.state(), SessionState::NotStarted);
    }

    #[test]
    fn test_backspace_at_cursor_zero_is_noop() {
        let p = KeyEventProcessor::new();
        let mut s = session("abc");
        let outcome = p.process("Backspace", &mut s, SystemTime::now());
        assert_eq!(outcome.action, Action::Backspace);
        assert!(!outcome.changed);
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.state(), SessionState::NotStarted);
    }

    #[test]
    fn test_process_reports_start_and_completion() {
        let p = KeyEventProcessor::new();
        let mut s = session("ab");
        let now = SystemTime::now();

        let first = p.process("a", &mut s, now);
        assert!(first.started && first.changed && !first.completed);

        let second = p.process("x", &mut s, now);
        assert_eq!(second.action, Action::Accept { correct: false });
        assert!(!second.started && second.completed);
    }

    #[test]
    fn test_complete_session_ignores_characters_but_allows_backspace() {
        let p = KeyEventProcessor::new();
        let mut s = session("a");
        let now = SystemTime::now();
        p.process("a", &mut s, now);

        assert_eq!(p.handle("a", &s), Action::Ignore);
        assert_eq!(p.handle("Backspace", &s), Action::Backspace);
        assert!(p.process("Backspace", &mut s, now).changed);
        assert_eq!(s.state(), SessionState::InProgress);
    }

    #[test]
    fn test_normalize_key() {
        assert_eq!(normalize_key(' '), "space");
        assert_eq!(normalize_key('\n'), "enter");
        assert_eq!(normalize_key('\r'), "enter");
        assert_eq!(normalize_key('\t'), "tab");
        assert_eq!(normalize_key('Q'), "q");
        assert_eq!(normalize_key(';'), ";");
    }

    #[test]
    fn test_normalize_raw_key() {
        assert_eq!(normalize_raw_key("Enter"), "enter");
        assert_eq!(normalize_raw_key("Tab"), "tab");
        assert_eq!(normalize_raw_key("Backspace"), "backspace");
        assert_eq!(normalize_raw_key("Shift"), "shift");
        assert_eq!(normalize_raw_key("A"), "a");
    }
}
