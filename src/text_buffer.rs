use crate::error::TypingError;

/// Maximum number of whitespace-delimited words accepted for one session.
pub const MAX_WORDS: usize = 1000;

/// Immutable target text of a typing session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    chars: Vec<char>,
}

/// Summary of what `TextBuffer::load` kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub chars: usize,
    pub words: usize,
    pub truncated: bool,
}

impl TextBuffer {
    /// Trim, normalize line endings and cap at [`MAX_WORDS`] words.
    ///
    /// Excess words are dropped silently. Fails with `EmptyInput` when
    /// nothing but whitespace was supplied.
    pub fn load(raw: &str) -> Result<(Self, LoadReport), TypingError> {
        let normalized = normalize_line_endings(raw.trim());
        let (kept, truncated) = truncate_words(&normalized, MAX_WORDS);
        let kept = kept.trim_end();

        if kept.is_empty() {
            return Err(TypingError::EmptyInput);
        }

        let buffer = Self {
            chars: kept.chars().collect(),
        };
        let report = LoadReport {
            chars: buffer.len(),
            words: count_words(kept),
            truncated,
        };
        Ok((buffer, report))
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn char_at(&self, index: usize) -> Result<char, TypingError> {
        self.chars
            .get(index)
            .copied()
            .ok_or(TypingError::Index {
                index,
                len: self.len(),
            })
    }

    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of words within the first `end` characters.
    pub fn words_before(&self, end: usize) -> usize {
        let end = end.min(self.len());
        let mut words = 0;
        let mut in_word = false;
        for c in &self.chars[..end] {
            if c.is_whitespace() {
                in_word = false;
            } else if !in_word {
                in_word = true;
                words += 1;
            }
        }
        words
    }

    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// `\r\n` and lone `\r` both become `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Cut `text` right after its `max_words`-th word, keeping the original
/// whitespace between the words that survive. Trailing whitespace is only
/// dropped when a word beyond the limit follows it.
pub fn truncate_words(text: &str, max_words: usize) -> (&str, bool) {
    let mut words = 0;
    let mut in_word = false;
    let mut cut = None;
    for (idx, c) in text.char_indices() {
        if c.is_whitespace() {
            if in_word && words == max_words && cut.is_none() {
                cut = Some(idx);
            }
            in_word = false;
        } else if !in_word {
            if words == max_words {
                return (&text[..cut.unwrap_or(idx)], true);
            }
            in_word = true;
            words += 1;
        }
    }
    (text, false)
}
