//! Abstractive summarization: capability seam, model catalog, gated service.

#[cfg(feature = "local-model")]
pub mod candle_t5;
#[cfg(feature = "local-model")]
pub mod catalog;
pub mod service;
pub mod summarizer;

pub use service::{ModelStatus, SummarizationService, SummarizerLoader};
pub use summarizer::{
    ExtractiveSummarizer, GenerationParams, MockSummarizer, Summarizer, SummaryChunk,
};
