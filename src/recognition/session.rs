//! Recognition session: turns the recognizer event stream into stable state.
//!
//! Owns the recognizer handle and a single interim-expiry timer, and reduces
//! incremental result batches into `{committed, interim}` text. All mutation
//! happens through `&mut self`, so observers never see a half-applied batch.

use crate::defaults;
use crate::error::Result;
use crate::recognition::interim_timer::InterimTimer;
use crate::recognition::recognizer::{RecognitionResult, Recognizer, RecognizerEvent};
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Whether the session is currently listening.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionStatus {
    Idle,
    Listening,
}

/// Observable transcript state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TranscriptState {
    /// Append-only within a session; cleared only on explicit reset.
    pub committed: String,
    /// The latest batch's aggregated tentative text; transient.
    pub interim: String,
}

/// State machine over a continuous, interim-enabled recognizer.
///
/// `start` moves Idle to Listening; `stop` or an engine-initiated end moves
/// Listening back to Idle. There are no other states.
pub struct RecognitionSession {
    recognizer: Box<dyn Recognizer>,
    supported: bool,
    status: RecognitionStatus,
    committed: String,
    interim: String,
    language: String,
    timer: InterimTimer,
    event_tx: UnboundedSender<RecognizerEvent>,
    event_rx: UnboundedReceiver<RecognizerEvent>,
    expiry_rx: UnboundedReceiver<u64>,
}

impl RecognitionSession {
    /// Create a session with the default interim timeout.
    ///
    /// If the recognizer reports the platform capability as absent, that is
    /// reported once here and `start` becomes a no-op.
    pub fn new(recognizer: Box<dyn Recognizer>) -> Self {
        Self::with_interim_timeout(recognizer, defaults::INTERIM_TIMEOUT)
    }

    /// Create a session with a custom interim timeout.
    pub fn with_interim_timeout(recognizer: Box<dyn Recognizer>, timeout: Duration) -> Self {
        let supported = recognizer.is_supported();
        if !supported {
            eprintln!("dictanote: speech recognition is not supported here; recording is disabled");
        }
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (timer, expiry_rx) = InterimTimer::new(timeout);
        Self {
            recognizer,
            supported,
            status: RecognitionStatus::Idle,
            committed: String::new(),
            interim: String::new(),
            language: String::new(),
            timer,
            event_tx,
            event_rx,
            expiry_rx,
        }
    }

    /// Start listening in `language`, resetting the transcript.
    ///
    /// A no-op on an unsupported platform (already reported at construction).
    /// Starting while listening restarts the engine with the new language.
    ///
    /// # Errors
    /// Returns an error if the recognizer refuses to start; the session stays
    /// Idle with an empty transcript.
    pub fn start(&mut self, language: &str) -> Result<()> {
        if !self.supported {
            return Ok(());
        }
        if self.status == RecognitionStatus::Listening {
            self.recognizer.stop();
            self.status = RecognitionStatus::Idle;
        }
        self.committed.clear();
        self.interim.clear();
        self.timer.cancel();
        self.recognizer.start(language, self.event_tx.clone())?;
        self.language = language.to_string();
        self.status = RecognitionStatus::Listening;
        Ok(())
    }

    /// Stop listening. Clears interim text immediately and cancels any
    /// pending interim expiry; the committed transcript is kept.
    pub fn stop(&mut self) {
        if self.status == RecognitionStatus::Listening {
            self.recognizer.stop();
        }
        self.interim.clear();
        self.timer.cancel();
        self.status = RecognitionStatus::Idle;
    }

    /// Clear both committed and interim text without changing status.
    pub fn clear_transcript(&mut self) {
        self.committed.clear();
        self.interim.clear();
    }

    /// Seed the committed transcript from a previous run.
    ///
    /// Intended for startup restore while Idle; `start` clears it again.
    pub fn restore_transcript(&mut self, text: &str) {
        self.committed = text.to_string();
    }

    /// Apply one recognizer event.
    pub fn handle_event(&mut self, event: RecognizerEvent) {
        match event {
            RecognizerEvent::Results(batch) => self.apply_results(batch),
            RecognizerEvent::Ended => {
                // Engine-initiated end: no zombie Listening state.
                if self.status == RecognitionStatus::Listening {
                    self.recognizer.stop();
                    self.interim.clear();
                    self.timer.cancel();
                    self.status = RecognitionStatus::Idle;
                }
            }
            RecognizerEvent::Error(message) => {
                eprintln!("dictanote: recognition error: {}", message);
            }
        }
    }

    /// Apply an interim-expiry notice from the timer.
    ///
    /// Stale notices (raced by a re-arm or cancel) are ignored.
    pub fn handle_interim_expiry(&mut self, generation: u64) {
        if self.timer.is_current(generation) {
            self.interim.clear();
        }
    }

    /// Wait for the next recognizer or timer event and apply it.
    ///
    /// Returns false if the event channel has closed (cannot happen while the
    /// session itself is alive; callers may treat false as "shut down").
    pub async fn pump(&mut self) -> bool {
        tokio::select! {
            event = self.event_rx.recv() => match event {
                Some(event) => {
                    self.handle_event(event);
                    true
                }
                None => false,
            },
            Some(generation) = self.expiry_rx.recv() => {
                self.handle_interim_expiry(generation);
                true
            }
        }
    }

    /// Current status.
    pub fn status(&self) -> RecognitionStatus {
        self.status
    }

    /// Committed transcript text.
    pub fn committed(&self) -> &str {
        &self.committed
    }

    /// Current interim text.
    pub fn interim(&self) -> &str {
        &self.interim
    }

    /// Language the session was last started with.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Whether the platform capability exists.
    pub fn is_supported(&self) -> bool {
        self.supported
    }

    /// Copy of the observable transcript state.
    pub fn snapshot(&self) -> TranscriptState {
        TranscriptState {
            committed: self.committed.clone(),
            interim: self.interim.clone(),
        }
    }

    /// Reduce one result batch into transcript state.
    ///
    /// Finals are concatenated in index order and appended with no separator;
    /// non-finals are concatenated in index order into a single aggregated
    /// interim string that replaces the previous one wholesale.
    fn apply_results(&mut self, batch: Vec<RecognitionResult>) {
        if self.status != RecognitionStatus::Listening {
            // Late batch from an engine we already stopped.
            return;
        }

        let mut final_text = String::new();
        let mut interim_text = String::new();
        for result in batch {
            if result.is_final {
                final_text.push_str(&result.text);
            } else {
                interim_text.push_str(&result.text);
            }
        }

        if !final_text.is_empty() {
            self.committed.push_str(&final_text);
            self.interim.clear();
            self.timer.cancel();
        }

        if !interim_text.is_empty() {
            self.interim = interim_text;
            self.timer.arm();
        }
    }
}
