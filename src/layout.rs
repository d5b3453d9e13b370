//! Static US-QWERTY layout with the finger expected to strike each key.

use crate::keys::normalize_key;
use crate::session::TypingSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum Finger {
    LeftPinky,
    LeftRing,
    LeftMiddle,
    LeftIndex,
    RightIndex,
    RightMiddle,
    RightRing,
    RightPinky,
    Thumb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyWidth {
    Normal,
    Wide,
    Space,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCap {
    pub label: &'static str,
    pub width: KeyWidth,
    pub finger: Finger,
}

impl KeyCap {
    const fn new(label: &'static str, width: KeyWidth, finger: Finger) -> Self {
        Self {
            label,
            width,
            finger,
        }
    }

    /// Name used for highlight lookups: the lower-cased label.
    pub fn lookup_name(&self) -> String {
        self.label.to_lowercase()
    }

    pub fn matches(&self, name: &str) -> bool {
        self.label.eq_ignore_ascii_case(name)
            || self.label.eq_ignore_ascii_case(label_alias(name))
    }
}

/// Input-layer key names whose cap carries a shorter label.
fn label_alias(name: &str) -> &str {
    match name {
        "capslock" => "caps",
        "control" => "ctrl",
        "altgraph" => "alt",
        other => other,
    }
}

use Finger::*;
use KeyWidth::{Normal as N, Space as S, Wide as W};

const ROW_NUMBERS: &[KeyCap] = &[
    KeyCap::new("`", N, RightPinky),
    KeyCap::new("1", N, LeftPinky),
    KeyCap::new("2", N, LeftRing),
    KeyCap::new("3", N, LeftMiddle),
    KeyCap::new("4", N, LeftIndex),
    KeyCap::new("5", N, LeftIndex),
    KeyCap::new("6", N, RightIndex),
    KeyCap::new("7", N, RightIndex),
    KeyCap::new("8", N, RightMiddle),
    KeyCap::new("9", N, RightRing),
    KeyCap::new("0", N, RightPinky),
    KeyCap::new("-", N, RightPinky),
    KeyCap::new("=", N, RightPinky),
    KeyCap::new("Backspace", W, RightPinky),
];

const ROW_TOP: &[KeyCap] = &[
    KeyCap::new("Tab", W, LeftPinky),
    KeyCap::new("q", N, LeftPinky),
    KeyCap::new("w", N, LeftRing),
    KeyCap::new("e", N, LeftMiddle),
    KeyCap::new("r", N, LeftIndex),
    KeyCap::new("t", N, LeftIndex),
    KeyCap::new("y", N, RightIndex),
    KeyCap::new("u", N, RightIndex),
    KeyCap::new("i", N, RightMiddle),
    KeyCap::new("o", N, RightRing),
    KeyCap::new("p", N, RightPinky),
    KeyCap::new("[", N, RightPinky),
    KeyCap::new("]", N, RightPinky),
    KeyCap::new("\\", W, RightPinky),
];

const ROW_HOME: &[KeyCap] = &[
    KeyCap::new("Caps", W, LeftPinky),
    KeyCap::new("a", N, LeftPinky),
    KeyCap::new("s", N, LeftRing),
    KeyCap::new("d", N, LeftMiddle),
    KeyCap::new("f", N, LeftIndex),
    KeyCap::new("g", N, LeftIndex),
    KeyCap::new("h", N, RightIndex),
    KeyCap::new("j", N, RightIndex),
    KeyCap::new("k", N, RightMiddle),
    KeyCap::new("l", N, RightRing),
    KeyCap::new(";", N, RightPinky),
    KeyCap::new("'", N, RightPinky),
    KeyCap::new("Enter", W, RightPinky),
];

const ROW_BOTTOM: &[KeyCap] = &[
    KeyCap::new("Shift", W, LeftPinky),
    KeyCap::new("z", N, LeftPinky),
    KeyCap::new("x", N, LeftRing),
    KeyCap::new("c", N, LeftMiddle),
    KeyCap::new("v", N, LeftIndex),
    KeyCap::new("b", N, LeftIndex),
    KeyCap::new("n", N, RightIndex),
    KeyCap::new("m", N, RightIndex),
    KeyCap::new(",", N, RightMiddle),
    KeyCap::new(".", N, RightRing),
    KeyCap::new("/", N, RightPinky),
    KeyCap::new("Shift", W, RightPinky),
];

const ROW_SPACE: &[KeyCap] = &[
    KeyCap::new("Ctrl", W, LeftPinky),
    KeyCap::new("Alt", W, LeftRing),
    KeyCap::new("Space", S, Thumb),
    KeyCap::new("Alt", W, RightRing),
    KeyCap::new("Ctrl", W, RightPinky),
];

const QWERTY: &[&[KeyCap]] = &[ROW_NUMBERS, ROW_TOP, ROW_HOME, ROW_BOTTOM, ROW_SPACE];

#[derive(Debug, Clone, Copy)]
pub struct KeyboardLayout {
    rows: &'static [&'static [KeyCap]],
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self::qwerty()
    }
}

impl KeyboardLayout {
    pub fn qwerty() -> Self {
        Self { rows: QWERTY }
    }

    pub fn rows(&self) -> &'static [&'static [KeyCap]] {
        self.rows
    }

    /// First key whose lookup name equals `name` (already normalized).
    pub fn find(&self, name: &str) -> Option<&'static KeyCap> {
        self.rows
            .iter()
            .flat_map(|row| row.iter())
            .find(|key| key.matches(name))
    }

    pub fn finger_for(&self, name: &str) -> Option<Finger> {
        self.find(name).map(|key| key.finger)
    }

    /// Position (row, column) of the first key named `name`.
    pub fn position(&self, name: &str) -> Option<(usize, usize)> {
        self.rows.iter().enumerate().find_map(|(r, row)| {
            row.iter()
                .position(|key| key.matches(name))
                .map(|c| (r, c))
        })
    }
}

/// Highlight name of the key that types the session's next character.
pub fn next_key_name(session: &TypingSession) -> Option<String> {
    session.expected().map(normalize_key)
}
