//! Summarization service: model readiness gating and single-flight generation.
//!
//! The summarization capability is slow to load and not safe for concurrent
//! invocation, so it lives on a dedicated worker thread that owns the model
//! exclusively. Callers talk to it by message passing: each request carries
//! its own reply channel, and at most one request is pending at a time.

use crate::defaults;
use crate::error::{DictanoteError, Result};
use crate::summary::summarizer::{GenerationParams, Summarizer, SummaryChunk};
use crossbeam_channel::{Receiver, Sender};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use tokio::sync::{oneshot, watch};

/// Load state of the summarization model.
///
/// Starts at Loading; Ready and Error are terminal (a retry requires a fresh
/// service instance).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelStatus {
    Loading,
    Ready,
    Error,
}

/// Deferred constructor for the summarization backend.
///
/// Runs on the worker thread, where the loaded model will live.
pub type SummarizerLoader = Box<dyn FnOnce() -> Result<Box<dyn Summarizer>> + Send + 'static>;

enum WorkerRequest {
    Summarize {
        text: String,
        params: GenerationParams,
        reply: oneshot::Sender<Result<String>>,
    },
}

/// Everything the worker thread takes ownership of at `initialize`.
struct PendingInit {
    loader: SummarizerLoader,
    request_rx: Receiver<WorkerRequest>,
    status_tx: watch::Sender<ModelStatus>,
}

/// Gate in front of the summarization capability.
///
/// Dropping the service closes the request channel, which stops the worker;
/// call [`SummarizationService::shutdown`] to also join it.
pub struct SummarizationService {
    request_tx: Mutex<Option<Sender<WorkerRequest>>>,
    pending: Mutex<Option<PendingInit>>,
    status_rx: watch::Receiver<ModelStatus>,
    is_generating: AtomicBool,
    summary: Mutex<String>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl SummarizationService {
    /// Create a service that will load its backend with `loader`.
    ///
    /// Nothing happens until [`SummarizationService::initialize`] is called;
    /// until the load finishes the status stays [`ModelStatus::Loading`].
    pub fn new(loader: SummarizerLoader) -> Self {
        let (request_tx, request_rx) = crossbeam_channel::unbounded();
        let (status_tx, status_rx) = watch::channel(ModelStatus::Loading);
        Self {
            request_tx: Mutex::new(Some(request_tx)),
            pending: Mutex::new(Some(PendingInit {
                loader,
                request_rx,
                status_tx,
            })),
            status_rx,
            is_generating: AtomicBool::new(false),
            summary: Mutex::new(String::new()),
            worker: Mutex::new(None),
        }
    }

    /// Create a service around an already-constructed backend.
    pub fn with_summarizer<S: Summarizer>(summarizer: S) -> Self {
        Self::new(Box::new(move || Ok(Box::new(summarizer) as Box<dyn Summarizer>)))
    }

    /// Begin the asynchronous model load, exactly once per service lifetime.
    ///
    /// Subsequent calls are no-ops, so racing callers cannot trigger a
    /// duplicate load. The status moves Loading→Ready or Loading→Error when
    /// the worker finishes loading.
    pub fn initialize(&self) {
        let Some(init) = self.pending.lock().expect("pending lock").take() else {
            return;
        };
        let handle =
            thread::spawn(move || worker_loop(init.loader, init.request_rx, init.status_tx));
        *self.worker.lock().expect("worker lock") = Some(handle);
    }

    /// Suspend until the model load has finished.
    ///
    /// # Errors
    /// Returns `ModelNotReady` if the load failed.
    pub async fn wait_until_ready(&self) -> Result<()> {
        let mut status_rx = self.status_rx.clone();
        loop {
            let status = *status_rx.borrow_and_update();
            match status {
                ModelStatus::Ready => return Ok(()),
                ModelStatus::Error => return Err(DictanoteError::ModelNotReady),
                ModelStatus::Loading => {
                    if status_rx.changed().await.is_err() {
                        return Err(DictanoteError::ModelNotReady);
                    }
                }
            }
        }
    }

    /// Generate a summary of `text`.
    ///
    /// Precondition failures are typed rejections, checked in order:
    /// `EmptyInput` for blank text, `ModelNotReady` unless the status is
    /// Ready (an Error status counts as not ready), `Busy` while another
    /// generation is in flight. A backend failure or malformed response is
    /// absorbed: the call resolves to the fixed fallback summary and the
    /// cause is logged, never surfaced raw.
    ///
    /// The single-flight gate is released before the result is observable.
    pub async fn generate(&self, text: &str) -> Result<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(DictanoteError::EmptyInput);
        }
        if self.model_status() != ModelStatus::Ready {
            return Err(DictanoteError::ModelNotReady);
        }
        if self
            .is_generating
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Err(DictanoteError::Busy);
        }

        let result = self.run_generation(trimmed).await;
        self.is_generating.store(false, Ordering::Release);
        result
    }

    /// Clear the stored summary without affecting the model status.
    pub fn reset(&self) {
        self.summary.lock().expect("summary lock").clear();
    }

    /// Last generated summary (or the fallback text), empty after `reset`.
    pub fn summary(&self) -> String {
        self.summary.lock().expect("summary lock").clone()
    }

    /// Current model status.
    pub fn model_status(&self) -> ModelStatus {
        *self.status_rx.borrow()
    }

    /// Whether a generation request is currently in flight.
    pub fn is_generating(&self) -> bool {
        self.is_generating.load(Ordering::Acquire)
    }

    /// Stop the worker and wait for it to exit.
    ///
    /// An in-flight request is finished first and its result delivered (or
    /// discarded if the caller is gone). Subsequent `generate` calls fail.
    pub fn shutdown(&self) {
        self.request_tx.lock().expect("request sender lock").take();
        if let Some(worker) = self.worker.lock().expect("worker lock").take()
            && worker.join().is_err()
        {
            eprintln!("dictanote: summarization worker panicked during shutdown");
        }
    }

    async fn run_generation(&self, text: &str) -> Result<String> {
        let (reply_tx, reply_rx) = oneshot::channel();
        let request = WorkerRequest::Summarize {
            text: text.to_string(),
            params: GenerationParams::default(),
            reply: reply_tx,
        };

        let sent = {
            let request_tx = self.request_tx.lock().expect("request sender lock");
            match request_tx.as_ref() {
                Some(tx) => tx.send(request).is_ok(),
                None => false,
            }
        };
        if !sent {
            return Err(DictanoteError::GenerationFailed {
                message: "summarization worker is not running".to_string(),
            });
        }

        let summary = match reply_rx.await {
            Ok(Ok(summary)) => summary,
            Ok(Err(e)) => {
                eprintln!("dictanote: summary generation failed: {}", e);
                defaults::FALLBACK_SUMMARY.to_string()
            }
            Err(_) => {
                eprintln!("dictanote: summarization worker dropped the request");
                defaults::FALLBACK_SUMMARY.to_string()
            }
        };

        *self.summary.lock().expect("summary lock") = summary.clone();
        Ok(summary)
    }
}

/// Worker loop: load the backend once, then serve requests until the
/// request channel closes.
fn worker_loop(
    loader: SummarizerLoader,
    request_rx: Receiver<WorkerRequest>,
    status_tx: watch::Sender<ModelStatus>,
) {
    let mut summarizer = match loader() {
        Ok(summarizer) => {
            let _ = status_tx.send(ModelStatus::Ready);
            summarizer
        }
        Err(e) => {
            eprintln!("dictanote: failed to load summarization model: {}", e);
            let _ = status_tx.send(ModelStatus::Error);
            // Reject anything that raced the status change, then exit.
            while let Ok(WorkerRequest::Summarize { reply, .. }) = request_rx.recv() {
                let _ = reply.send(Err(DictanoteError::ModelNotReady));
            }
            return;
        }
    };

    while let Ok(WorkerRequest::Summarize {
        text,
        params,
        reply,
    }) = request_rx.recv()
    {
        let result = summarizer
            .summarize(&text, &params)
            .and_then(extract_summary);
        // The caller may have gone away; its result is simply discarded.
        let _ = reply.send(result);
    }
}

/// Pull the summary text out of a backend response.
fn extract_summary(chunks: Vec<SummaryChunk>) -> Result<String> {
    match chunks.into_iter().next() {
        Some(chunk) if !chunk.summary_text.is_empty() => Ok(chunk.summary_text),
        _ => Err(DictanoteError::GenerationFailed {
            message: "empty summary response".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::summarizer::MockSummarizer;
    use std::sync::Arc;
    use std::time::Duration;

    fn ready_service(summarizer: MockSummarizer) -> SummarizationService {
        let service = SummarizationService::with_summarizer(summarizer);
        service.initialize();
        service
    }

    #[test]
    fn initial_status_is_loading() {
        let service = SummarizationService::with_summarizer(MockSummarizer::new());
        assert_eq!(service.model_status(), ModelStatus::Loading);
        assert!(!service.is_generating());
    }

    #[tokio::test]
    async fn generate_before_ready_is_model_not_ready() {
        let service = SummarizationService::with_summarizer(MockSummarizer::new());
        let result = service.generate("some text").await;
        assert!(matches!(result, Err(DictanoteError::ModelNotReady)));
    }

    #[tokio::test]
    async fn empty_input_is_checked_before_model_status() {
        let service = SummarizationService::with_summarizer(MockSummarizer::new());

        for blank in ["", "   ", "\t\n"] {
            let result = service.generate(blank).await;
            assert!(
                matches!(result, Err(DictanoteError::EmptyInput)),
                "{:?} should reject with EmptyInput",
                blank
            );
        }

        assert_eq!(service.model_status(), ModelStatus::Loading);
        assert!(!service.is_generating());
    }

    #[tokio::test]
    async fn generate_returns_backend_summary() {
        let service = ready_service(MockSummarizer::new().with_response("a fine summary"));
        service.wait_until_ready().await.expect("ready");

        let summary = service.generate("a long transcript").await.expect("generate");
        assert_eq!(summary, "a fine summary");
        assert_eq!(service.summary(), "a fine summary");
        assert!(!service.is_generating());
    }

    #[tokio::test]
    async fn backend_failure_resolves_to_fallback() {
        let service = ready_service(MockSummarizer::new().with_failure());
        service.wait_until_ready().await.expect("ready");

        let summary = service.generate("text").await.expect("generate");
        assert_eq!(summary, defaults::FALLBACK_SUMMARY);
        assert_eq!(service.summary(), defaults::FALLBACK_SUMMARY);
    }

    #[tokio::test]
    async fn malformed_response_resolves_to_fallback() {
        let service = ready_service(MockSummarizer::new().with_empty_response());
        service.wait_until_ready().await.expect("ready");

        let summary = service.generate("text").await.expect("generate");
        assert_eq!(summary, defaults::FALLBACK_SUMMARY);
    }

    #[tokio::test]
    async fn load_failure_is_terminal_error_status() {
        let service = SummarizationService::new(Box::new(|| {
            Err(DictanoteError::ModelLoadFailed {
                message: "no such model".to_string(),
            })
        }));
        service.initialize();

        assert!(service.wait_until_ready().await.is_err());
        assert_eq!(service.model_status(), ModelStatus::Error);

        // Error is treated as "not ready", not a distinct failure.
        let result = service.generate("text").await;
        assert!(matches!(result, Err(DictanoteError::ModelNotReady)));
    }

    #[tokio::test]
    async fn initialize_is_idempotent() {
        let service = ready_service(MockSummarizer::new());
        service.initialize();
        service.initialize();
        service.wait_until_ready().await.expect("ready");

        let summary = service.generate("text").await.expect("generate");
        assert_eq!(summary, "mock summary");
    }

    #[tokio::test]
    async fn concurrent_generate_is_busy() {
        let service = Arc::new(ready_service(
            MockSummarizer::new()
                .with_response("first wins")
                .with_delay(Duration::from_millis(400)),
        ));
        service.wait_until_ready().await.expect("ready");

        let first = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.generate("one").await }
        });

        // Let the first call claim the single-flight gate.
        tokio::time::sleep(Duration::from_millis(100)).await;
        let second = service.generate("two").await;
        assert!(matches!(second, Err(DictanoteError::Busy)));

        let first = first.await.expect("join").expect("first generate");
        assert_eq!(first, "first wins");
        assert!(!service.is_generating());
    }

    #[tokio::test]
    async fn gate_is_released_after_fallback() {
        let service = ready_service(MockSummarizer::new().with_failure());
        service.wait_until_ready().await.expect("ready");

        service.generate("text").await.expect("first");
        let second = service.generate("text").await.expect("second");
        assert_eq!(second, defaults::FALLBACK_SUMMARY);
    }

    #[tokio::test]
    async fn reset_clears_summary_but_not_status() {
        let service = ready_service(MockSummarizer::new());
        service.wait_until_ready().await.expect("ready");
        service.generate("text").await.expect("generate");

        service.reset();

        assert_eq!(service.summary(), "");
        assert_eq!(service.model_status(), ModelStatus::Ready);
    }

    #[tokio::test]
    async fn generate_after_shutdown_fails_without_fallback_panic() {
        let service = ready_service(MockSummarizer::new());
        service.wait_until_ready().await.expect("ready");
        service.shutdown();

        let result = service.generate("text").await;
        assert!(matches!(
            result,
            Err(DictanoteError::GenerationFailed { .. })
        ));
        assert!(!service.is_generating());
    }

    #[test]
    fn extract_summary_takes_first_chunk() {
        let chunks = vec![
            SummaryChunk {
                summary_text: "first".to_string(),
            },
            SummaryChunk {
                summary_text: "second".to_string(),
            },
        ];
        assert_eq!(extract_summary(chunks).expect("extract"), "first");
    }

    #[test]
    fn extract_summary_rejects_empty_response() {
        assert!(extract_summary(Vec::new()).is_err());
        assert!(
            extract_summary(vec![SummaryChunk {
                summary_text: String::new()
            }])
            .is_err()
        );
    }
}
