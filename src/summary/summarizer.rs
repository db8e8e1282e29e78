//! Summarizer trait for text-in/text-out summarization backends.

use crate::defaults;
use crate::error::{DictanoteError, Result};
use std::time::Duration;

/// Fixed generation parameters for a summarization call.
///
/// These are policy constants of the application, not user-configurable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationParams {
    /// Maximum number of new tokens to generate.
    pub max_new_tokens: usize,
    /// Minimum number of new tokens to generate.
    pub min_new_tokens: usize,
    /// Whether to sample during decoding. False means deterministic decoding.
    pub sample: bool,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_new_tokens: defaults::SUMMARY_MAX_NEW_TOKENS,
            min_new_tokens: defaults::SUMMARY_MIN_NEW_TOKENS,
            sample: false,
        }
    }
}

/// One element of a summarization response.
///
/// Backends may return several chunks; the service uses the first chunk's
/// text and treats an empty response as a generation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryChunk {
    pub summary_text: String,
}

/// Trait for text summarization.
///
/// This trait allows swapping implementations (local T5 model, extractive
/// fallback, mock). Implementations run on the service's worker thread and
/// may block for seconds.
pub trait Summarizer: Send + 'static {
    /// Summarize `text` under the given parameters.
    ///
    /// # Errors
    /// Returns an error if the backend fails; the service converts it into
    /// the user-facing fallback summary.
    fn summarize(&mut self, text: &str, params: &GenerationParams) -> Result<Vec<SummaryChunk>>;

    /// Return the name of this summarizer for logging.
    fn name(&self) -> &str;
}

/// Lead-based extractive summarizer.
///
/// Keeps the first [`defaults::EXTRACTIVE_LEAD_CHARS`] characters of the
/// input with an ellipsis when truncated. Used when no local model backend
/// is available; fast and dependency-free.
pub struct ExtractiveSummarizer {
    lead_chars: usize,
}

impl ExtractiveSummarizer {
    pub fn new() -> Self {
        Self {
            lead_chars: defaults::EXTRACTIVE_LEAD_CHARS,
        }
    }
}

impl Default for ExtractiveSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer for ExtractiveSummarizer {
    fn summarize(&mut self, text: &str, _params: &GenerationParams) -> Result<Vec<SummaryChunk>> {
        let lead: String = text.chars().take(self.lead_chars).collect();
        let truncated = text.chars().count() > self.lead_chars;
        let summary_text = if truncated {
            format!("Summary: {}...", lead)
        } else {
            format!("Summary: {}", lead)
        };
        Ok(vec![SummaryChunk { summary_text }])
    }

    fn name(&self) -> &str {
        "extractive"
    }
}

/// Mock summarizer for testing.
pub struct MockSummarizer {
    response: String,
    delay: Option<Duration>,
    should_fail: bool,
    empty_response: bool,
}

impl MockSummarizer {
    /// Create a new mock summarizer with default settings.
    pub fn new() -> Self {
        Self {
            response: "mock summary".to_string(),
            delay: None,
            should_fail: false,
            empty_response: false,
        }
    }

    /// Configure the mock to return a specific summary.
    pub fn with_response(mut self, response: &str) -> Self {
        self.response = response.to_string();
        self
    }

    /// Configure the mock to block for `delay` before responding.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Configure the mock to fail on summarize.
    pub fn with_failure(mut self) -> Self {
        self.should_fail = true;
        self
    }

    /// Configure the mock to return a malformed (empty) response.
    pub fn with_empty_response(mut self) -> Self {
        self.empty_response = true;
        self
    }
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Summarizer for MockSummarizer {
    fn summarize(&mut self, _text: &str, _params: &GenerationParams) -> Result<Vec<SummaryChunk>> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        if self.should_fail {
            return Err(DictanoteError::GenerationFailed {
                message: "mock summarization failure".to_string(),
            });
        }
        if self.empty_response {
            return Ok(Vec::new());
        }
        Ok(vec![SummaryChunk {
            summary_text: self.response.clone(),
        }])
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extractive_keeps_short_text_whole() {
        let mut summarizer = ExtractiveSummarizer::new();
        let chunks = summarizer
            .summarize("short input", &GenerationParams::default())
            .expect("summarize");
        assert_eq!(chunks[0].summary_text, "Summary: short input");
    }

    #[test]
    fn extractive_truncates_long_text_with_ellipsis() {
        let mut summarizer = ExtractiveSummarizer::new();
        let input = "a".repeat(150);
        let chunks = summarizer
            .summarize(&input, &GenerationParams::default())
            .expect("summarize");

        let expected = format!("Summary: {}...", "a".repeat(100));
        assert_eq!(chunks[0].summary_text, expected);
    }

    #[test]
    fn extractive_exact_boundary_is_not_truncated() {
        let mut summarizer = ExtractiveSummarizer::new();
        let input = "b".repeat(100);
        let chunks = summarizer
            .summarize(&input, &GenerationParams::default())
            .expect("summarize");
        assert!(!chunks[0].summary_text.ends_with("..."));
    }

    #[test]
    fn extractive_respects_char_boundaries() {
        let mut summarizer = ExtractiveSummarizer::new();
        let input = "é".repeat(150);
        let chunks = summarizer
            .summarize(&input, &GenerationParams::default())
            .expect("summarize");
        assert!(chunks[0].summary_text.starts_with("Summary: é"));
    }

    #[test]
    fn mock_returns_configured_response() {
        let mut summarizer = MockSummarizer::new().with_response("configured");
        let chunks = summarizer
            .summarize("text", &GenerationParams::default())
            .expect("summarize");
        assert_eq!(chunks[0].summary_text, "configured");
    }

    #[test]
    fn mock_failure_is_error() {
        let mut summarizer = MockSummarizer::new().with_failure();
        let result = summarizer.summarize("text", &GenerationParams::default());
        assert!(matches!(
            result,
            Err(DictanoteError::GenerationFailed { .. })
        ));
    }

    #[test]
    fn default_params_match_policy_constants() {
        let params = GenerationParams::default();
        assert_eq!(params.max_new_tokens, 100);
        assert_eq!(params.min_new_tokens, 30);
        assert!(!params.sample);
    }

    #[test]
    fn summarizer_trait_is_object_safe() {
        let boxed: Box<dyn Summarizer> = Box::new(MockSummarizer::new());
        assert_eq!(boxed.name(), "mock");
    }
}
