// Library surface for the binary, headless integration tests and reuse.
pub mod app;
pub mod config;
pub mod draft;
pub mod error;
pub mod keys;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod practice;
pub mod runtime;
pub mod session;
pub mod text_buffer;
pub mod ui;

pub use error::TypingError;
pub use keys::{Action, KeyEventProcessor};
pub use metrics::Metrics;
pub use session::{SessionState, TypingSession};
pub use text_buffer::TextBuffer;
