//! Default configuration constants for dictanote.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

use std::time::Duration;

/// How long interim text survives without a fresh interim result, in milliseconds.
///
/// If the recognizer stalls between interim updates, the pending hypothesis is
/// blanked after this window rather than lingering on screen indefinitely.
pub const INTERIM_TIMEOUT_MS: u64 = 2000;

/// Interim timeout as a [`Duration`].
pub const INTERIM_TIMEOUT: Duration = Duration::from_millis(INTERIM_TIMEOUT_MS);

/// Maximum number of new tokens a summary may contain.
///
/// Fixed generation policy, not user-configurable.
pub const SUMMARY_MAX_NEW_TOKENS: usize = 100;

/// Minimum number of new tokens a summary must contain.
///
/// Fixed generation policy, not user-configurable.
pub const SUMMARY_MIN_NEW_TOKENS: usize = 30;

/// User-facing text shown when summary generation fails.
///
/// The underlying cause is logged; this string is what reaches the user.
pub const FALLBACK_SUMMARY: &str = "Failed to generate summary. Please try again.";

/// Default recognition language (BCP 47 tag as the recognizer expects it).
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Default summarization model name.
///
/// Resolved against the summary model catalog when the `local-model` feature
/// is enabled; otherwise the extractive fallback backend is used.
pub const DEFAULT_SUMMARY_MODEL: &str = "flan-t5-small";

/// Key under which the committed transcript is persisted between runs.
pub const SAVED_TRANSCRIPT_KEY: &str = "savedTranscript";

/// Number of leading characters the extractive summarizer keeps.
pub const EXTRACTIVE_LEAD_CHARS: usize = 100;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interim_timeout_duration_matches_ms() {
        assert_eq!(INTERIM_TIMEOUT, Duration::from_millis(INTERIM_TIMEOUT_MS));
    }

    #[test]
    fn summary_bounds_are_ordered() {
        assert!(SUMMARY_MIN_NEW_TOKENS < SUMMARY_MAX_NEW_TOKENS);
    }
}
