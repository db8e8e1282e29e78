//! dictanote - Live dictation notepad
//!
//! Continuous speech recognition with interim text, transcript statistics,
//! and local abstractive summarization.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

#[cfg(feature = "cli")]
pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod languages;
pub mod recognition;
pub mod stats;
pub mod store;
pub mod summary;

// Core traits (capability seams)
pub use recognition::recognizer::Recognizer;
pub use summary::summarizer::Summarizer;

// Recognition
pub use recognition::{
    InterimTimer, PushRecognizer, PushRecognizerHandle, RecognitionResult, RecognitionSession,
    RecognitionStatus, RecognizerEvent, TranscriptState, UnsupportedRecognizer,
};

// Summarization
pub use summary::{
    ExtractiveSummarizer, GenerationParams, MockSummarizer, ModelStatus, SummarizationService,
    SummaryChunk,
};

// Statistics
pub use stats::{TranscriptStats, stats};

// Error handling
pub use error::{DictanoteError, Result};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.2+abc1234"` when git hash is available, `"0.1.2"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
