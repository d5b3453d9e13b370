use crate::text_buffer::{count_words, truncate_words, MAX_WORDS};

/// Text being composed before it is loaded for practice. Every edit keeps
/// it within the word limit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    text: String,
}

impl Draft {
    pub fn new(text: &str) -> Self {
        let mut draft = Self::default();
        draft.push_str(text);
        draft
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
        self.enforce_limit();
    }

    pub fn push_str(&mut self, s: &str) {
        self.text.push_str(&s.replace("\r\n", "\n"));
        self.enforce_limit();
    }

    pub fn pop(&mut self) -> Option<char> {
        self.text.pop()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn word_count(&self) -> usize {
        count_words(&self.text)
    }

    /// "{count} / 1000 words"
    pub fn counter_label(&self) -> String {
        format!("{} / {} words", self.word_count(), MAX_WORDS)
    }

    fn enforce_limit(&mut self) {
        let (kept, truncated) = truncate_words(&self.text, MAX_WORDS);
        if truncated {
            let len = kept.len();
            self.text.truncate(len);
        }
    }
}
