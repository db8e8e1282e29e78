//! Transcript statistics.
//!
//! Pure text-counting helpers over the committed transcript. No state, no
//! normalization; the splitting rules are part of the observable contract.

/// Character, word, and sentence counts for a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TranscriptStats {
    pub character_count: usize,
    pub word_count: usize,
    pub sentence_count: usize,
}

/// Sentence-terminating characters. A run of one or more counts as one break.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Compute statistics for `text`.
///
/// - `character_count` is the Unicode scalar count of the raw string.
/// - `word_count` counts maximal whitespace-delimited non-empty tokens.
/// - `sentence_count` counts maximal non-empty segments between runs of
///   `.`, `!` and `?`. A whitespace-only string has no terminators and so
///   still counts as one sentence segment; callers rely on that.
pub fn stats(text: &str) -> TranscriptStats {
    TranscriptStats {
        character_count: text.chars().count(),
        word_count: text.split_whitespace().count(),
        sentence_count: text
            .split(SENTENCE_TERMINATORS)
            .filter(|segment| !segment.is_empty())
            .count(),
    }
}
