//! End-to-end flows over the public API: a recognition session fed by a
//! push recognizer, combined with the summarization service.

use dictanote::{
    MockSummarizer, ModelStatus, PushRecognizer, RecognitionResult, RecognitionSession,
    RecognitionStatus, SummarizationService, UnsupportedRecognizer, stats,
};
use std::time::Duration;

fn make_session() -> (RecognitionSession, dictanote::PushRecognizerHandle) {
    let (recognizer, handle) = PushRecognizer::new();
    (RecognitionSession::new(Box::new(recognizer)), handle)
}

#[tokio::test]
async fn record_transcribe_stop_flow() {
    let (mut session, handle) = make_session();

    session.start("es-ES").expect("start");
    assert_eq!(handle.language(), Some("es-ES".to_string()));

    handle.results(vec![RecognitionResult::final_text("Hola")]);
    handle.results(vec![RecognitionResult::interim("mundo")]);
    session.pump().await;
    session.pump().await;

    assert_eq!(session.committed(), "Hola");
    assert_eq!(session.interim(), "mundo");

    session.stop();
    assert_eq!(session.committed(), "Hola");
    assert_eq!(session.interim(), "");
    assert_eq!(session.status(), RecognitionStatus::Idle);
}

#[tokio::test]
async fn committed_text_feeds_statistics() {
    let (mut session, handle) = make_session();
    session.start("en-US").expect("start");

    handle.results(vec![RecognitionResult::final_text("Hello world. ")]);
    handle.results(vec![RecognitionResult::final_text("How are you?")]);
    session.pump().await;
    session.pump().await;

    let counts = stats(session.committed());
    assert_eq!(counts.word_count, 5);
    assert_eq!(counts.sentence_count, 2);
}

#[tokio::test(start_paused = true)]
async fn stalled_interim_expires_through_pump() {
    let (recognizer, handle) = PushRecognizer::new();
    let mut session = RecognitionSession::with_interim_timeout(
        Box::new(recognizer),
        Duration::from_millis(2000),
    );
    session.start("en-US").expect("start");

    handle.results(vec![RecognitionResult::interim("going, going")]);
    session.pump().await;
    assert_eq!(session.interim(), "going, going");

    tokio::time::advance(Duration::from_millis(2100)).await;
    session.pump().await;
    assert_eq!(session.interim(), "", "stalled interim text must expire");
    assert_eq!(session.status(), RecognitionStatus::Listening);
}

#[tokio::test]
async fn transcript_summary_roundtrip() {
    let (mut session, handle) = make_session();
    session.start("en-US").expect("start");
    handle.results(vec![RecognitionResult::final_text(
        "The meeting covered the quarterly roadmap in detail.",
    )]);
    session.pump().await;

    let service = SummarizationService::with_summarizer(
        MockSummarizer::new().with_response("Quarterly roadmap discussed."),
    );
    service.initialize();
    service.wait_until_ready().await.expect("model ready");
    assert_eq!(service.model_status(), ModelStatus::Ready);

    let summary = service
        .generate(session.committed())
        .await
        .expect("generate");
    assert_eq!(summary, "Quarterly roadmap discussed.");

    service.shutdown();
}

#[tokio::test]
async fn summarizing_an_empty_recording_is_rejected() {
    let (session, _handle) = make_session();
    let service = SummarizationService::with_summarizer(MockSummarizer::new());
    service.initialize();
    service.wait_until_ready().await.expect("model ready");

    let result = service.generate(session.committed()).await;
    assert!(matches!(result, Err(dictanote::DictanoteError::EmptyInput)));
}

#[tokio::test]
async fn unsupported_platform_leaves_controls_inert() {
    let mut session = RecognitionSession::new(Box::new(UnsupportedRecognizer));

    session.start("en-US").expect("start is a no-op");
    assert_eq!(session.status(), RecognitionStatus::Idle);

    // Stop and clear must not panic either.
    session.stop();
    session.clear_transcript();
}
