//! Error types for dictanote.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DictanoteError {
    // Configuration errors
    #[error("Failed to parse configuration: {message}")]
    ConfigParse { message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Recognition errors
    #[error("Speech recognition is not supported on this platform")]
    UnsupportedPlatform,

    #[error("Speech recognition failed to start: {message}")]
    RecognizerStart { message: String },

    #[error("Unknown language code: {code}")]
    UnknownLanguage { code: String },

    // Summarization errors
    #[error("Please record some text before generating a summary.")]
    EmptyInput,

    #[error("Summarization model is not ready. Please wait for it to load or check console for errors.")]
    ModelNotReady,

    #[error("A summary is already being generated")]
    Busy,

    #[error("Summary generation failed: {message}")]
    GenerationFailed { message: String },

    #[error("Failed to load summarization model: {message}")]
    ModelLoadFailed { message: String },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DictanoteError>;
