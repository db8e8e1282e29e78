//! Continuous speech recognition: recognizer seam, interim expiry, session state.

pub mod interim_timer;
pub mod recognizer;
pub mod session;

pub use interim_timer::InterimTimer;
pub use recognizer::{
    PushRecognizer, PushRecognizerHandle, RecognitionResult, Recognizer, RecognizerEvent,
    UnsupportedRecognizer,
};
pub use session::{RecognitionSession, RecognitionStatus, TranscriptState};
