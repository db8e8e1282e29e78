//! Recognizer seam: the platform speech-recognition capability as a trait.

use crate::error::{DictanoteError, Result};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc::UnboundedSender;

/// One recognition hypothesis inside a result batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionResult {
    pub text: String,
    /// Final results will not be revised further; non-final results are
    /// tentative and may be replaced by a later batch.
    pub is_final: bool,
}

impl RecognitionResult {
    /// A final hypothesis.
    pub fn final_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }

    /// A tentative (interim) hypothesis.
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }
}

/// Events a recognizer delivers while listening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerEvent {
    /// A batch of new results since the last event, in index order.
    Results(Vec<RecognitionResult>),
    /// The engine stopped on its own (end of stream, engine timeout).
    Ended,
    /// A non-fatal engine error.
    Error(String),
}

/// Trait for a continuous, interim-enabled speech recognizer.
///
/// Implementations deliver [`RecognizerEvent`]s on the given sender from
/// `start` until `stop` or an engine-initiated end. The session owns the
/// recognizer handle exclusively; implementations are swappable (platform
/// engine vs push-driven test double).
pub trait Recognizer: Send + 'static {
    /// Begin continuous recognition with interim results in `language`.
    ///
    /// # Errors
    /// Returns an error if the engine refuses to start.
    fn start(&mut self, language: &str, events: UnboundedSender<RecognizerEvent>) -> Result<()>;

    /// Halt recognition. No events are delivered after this returns, though
    /// events already queued may still be drained by the session.
    fn stop(&mut self);

    /// Whether the platform capability exists at all.
    fn is_supported(&self) -> bool {
        true
    }

    /// Name of this recognizer for logging.
    fn name(&self) -> &'static str;
}

#[derive(Default)]
struct PushShared {
    events: Option<UnboundedSender<RecognizerEvent>>,
    language: Option<String>,
    fail_start: bool,
}

/// Recognizer driven by the caller.
///
/// Backs the console demo (typed lines become result batches) and tests.
/// Events pushed through the [`PushRecognizerHandle`] are delivered only
/// while the recognizer is started.
pub struct PushRecognizer {
    shared: Arc<Mutex<PushShared>>,
}

/// Handle used to feed results into a [`PushRecognizer`].
#[derive(Clone)]
pub struct PushRecognizerHandle {
    shared: Arc<Mutex<PushShared>>,
}

impl PushRecognizer {
    /// Create a recognizer and the handle that feeds it.
    pub fn new() -> (Self, PushRecognizerHandle) {
        let shared = Arc::new(Mutex::new(PushShared::default()));
        (
            Self {
                shared: Arc::clone(&shared),
            },
            PushRecognizerHandle { shared },
        )
    }

    /// Configure the recognizer to refuse to start.
    pub fn with_start_failure(self) -> Self {
        self.shared.lock().expect("push recognizer lock").fail_start = true;
        self
    }
}

impl Recognizer for PushRecognizer {
    fn start(&mut self, language: &str, events: UnboundedSender<RecognizerEvent>) -> Result<()> {
        let mut shared = self.shared.lock().expect("push recognizer lock");
        if shared.fail_start {
            return Err(DictanoteError::RecognizerStart {
                message: "push recognizer configured to fail".to_string(),
            });
        }
        shared.events = Some(events);
        shared.language = Some(language.to_string());
        Ok(())
    }

    fn stop(&mut self) {
        let mut shared = self.shared.lock().expect("push recognizer lock");
        shared.events = None;
    }

    fn name(&self) -> &'static str {
        "push"
    }
}

impl PushRecognizerHandle {
    /// Deliver a batch of results. Returns false if the recognizer is not
    /// currently listening (the batch is dropped, as a stopped engine would).
    pub fn results(&self, batch: Vec<RecognitionResult>) -> bool {
        self.send(RecognizerEvent::Results(batch))
    }

    /// Deliver an engine-initiated end and stop the stream.
    pub fn end(&self) -> bool {
        let sent = self.send(RecognizerEvent::Ended);
        self.shared.lock().expect("push recognizer lock").events = None;
        sent
    }

    /// Deliver a non-fatal engine error.
    pub fn error(&self, message: impl Into<String>) -> bool {
        self.send(RecognizerEvent::Error(message.into()))
    }

    /// Language the recognizer was last started with.
    pub fn language(&self) -> Option<String> {
        self.shared
            .lock()
            .expect("push recognizer lock")
            .language
            .clone()
    }

    /// Whether the recognizer is currently listening.
    pub fn is_listening(&self) -> bool {
        self.shared
            .lock()
            .expect("push recognizer lock")
            .events
            .is_some()
    }

    fn send(&self, event: RecognizerEvent) -> bool {
        let shared = self.shared.lock().expect("push recognizer lock");
        match &shared.events {
            Some(tx) => tx.send(event).is_ok(),
            None => false,
        }
    }
}

/// Recognizer for platforms without a speech-recognition capability.
///
/// `is_supported` is false; the session reports the condition once at
/// construction and turns `start` into a no-op.
pub struct UnsupportedRecognizer;

impl Recognizer for UnsupportedRecognizer {
    fn start(&mut self, _language: &str, _events: UnboundedSender<RecognizerEvent>) -> Result<()> {
        Err(DictanoteError::UnsupportedPlatform)
    }

    fn stop(&mut self) {}

    fn is_supported(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "unsupported"
    }
}
