/// Errors raised by the typing core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypingError {
    /// The text offered for practice was empty after trimming.
    #[error("Please paste or type some text (up to 1000 words).")]
    EmptyInput,
    /// Out-of-bounds access into a text buffer. Indicates a bug in the caller.
    #[error("index {index} out of bounds for text of length {len}")]
    Index { index: usize, len: usize },
    /// A forward keystroke was offered to a finished session.
    #[error("session is complete")]
    SessionComplete,
}
