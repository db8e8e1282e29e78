//! Dictation application entry points.
//!
//! Wires the recognition session, the summarization service and the
//! transcript store into a line-oriented terminal shell: typed lines become
//! recognition result batches, `:`-commands drive the session.

use crate::config::Config;
use crate::error::{DictanoteError, Result};
use crate::languages;
use crate::recognition::{
    PushRecognizer, PushRecognizerHandle, RecognitionResult, RecognitionSession, RecognitionStatus,
};
use crate::stats::stats;
use crate::store::TranscriptStore;
use crate::summary::SummarizationService;
use crate::version_string;
use owo_colors::OwoColorize;
use std::io::Read;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// Run the interactive dictation shell.
///
/// # Arguments
/// * `config` - Base configuration (can be overridden by CLI args)
/// * `language` - Optional language override from CLI
/// * `summary_model` - Optional summarization model override from CLI
/// * `no_restore` - Skip restoring the saved transcript
pub async fn run_dictation(
    mut config: Config,
    language: Option<String>,
    summary_model: Option<String>,
    no_restore: bool,
) -> Result<()> {
    // Apply CLI overrides
    if let Some(code) = language {
        validate_language(&code)?;
        config.recognition.language = code;
    }
    if let Some(model) = summary_model {
        config.summary.model = model;
    }

    let store = TranscriptStore::default_location();
    let service = Arc::new(build_service(&config));
    service.initialize();

    let (mut session, mut handle) = make_session(&config);
    if config.summary.restore_transcript
        && !no_restore
        && let Some(saved) = store.load()
        && !saved.is_empty()
    {
        session.restore_transcript(&saved);
        eprintln!("dictanote: restored saved transcript");
    }

    eprintln!("dictanote {}", version_string());
    print_help();

    let mut lines = stdin_lines();
    session.start(&config.recognition.language)?;
    render(&session);

    enum Tick {
        Line(Option<String>),
        Pumped,
    }

    loop {
        let tick = tokio::select! {
            line = lines.recv() => Tick::Line(line),
            _ = session.pump() => Tick::Pumped,
        };

        match tick {
            Tick::Pumped => render(&session),
            Tick::Line(None) => break, // stdin closed
            Tick::Line(Some(line)) => {
                let line = line.trim_end().to_string();
                if line.is_empty() {
                    continue;
                }
                if let Some(command) = line.strip_prefix(':') {
                    match run_command(command, &mut session, &mut handle, &service, &mut config) {
                        Flow::Continue => {}
                        Flow::Quit => break,
                    }
                } else {
                    dictate(&handle, &line);
                }
            }
        }
    }

    // Teardown: persist the transcript best-effort, then release the worker.
    if let Err(e) = store.save(session.committed()) {
        eprintln!("dictanote: could not save transcript: {}", e);
    }
    session.stop();
    service.shutdown();
    Ok(())
}

/// Count characters, words and sentences of stdin.
pub fn run_stats_command() -> Result<()> {
    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;

    let counts = stats(&text);
    println!("Characters: {}", counts.character_count);
    println!("Words: {}", counts.word_count);
    println!("Sentences: {}", counts.sentence_count);
    Ok(())
}

/// Summarize stdin once and print the result.
pub async fn run_summarize_command(mut config: Config, summary_model: Option<String>) -> Result<()> {
    if let Some(model) = summary_model {
        config.summary.model = model;
    }

    let mut text = String::new();
    std::io::stdin().read_to_string(&mut text)?;

    let service = build_service(&config);
    eprintln!("Loading summarization model '{}'...", config.summary.model);
    service.initialize();
    service.wait_until_ready().await?;

    let summary = service.generate(&text).await?;
    println!("{}", summary);
    service.shutdown();
    Ok(())
}

/// Construct the summarization service for the configured backend.
///
/// With the `local-model` feature the configured catalog model is loaded on
/// the worker thread; otherwise the extractive fallback backend is used and
/// the model name is ignored.
fn build_service(config: &Config) -> SummarizationService {
    #[cfg(feature = "local-model")]
    {
        let model_name = config.summary.model.clone();
        SummarizationService::new(Box::new(move || {
            let info = crate::summary::catalog::get_summary_model(&model_name).ok_or_else(|| {
                DictanoteError::ModelLoadFailed {
                    message: format!("unknown summarization model '{}'", model_name),
                }
            })?;
            let summarizer = crate::summary::candle_t5::CandleT5Summarizer::load(info)?;
            Ok(Box::new(summarizer) as Box<dyn crate::summary::Summarizer>)
        }))
    }
    #[cfg(not(feature = "local-model"))]
    {
        let _ = config;
        SummarizationService::with_summarizer(crate::summary::ExtractiveSummarizer::new())
    }
}

fn make_session(config: &Config) -> (RecognitionSession, PushRecognizerHandle) {
    let (recognizer, handle) = PushRecognizer::new();
    let session = RecognitionSession::with_interim_timeout(
        Box::new(recognizer),
        Duration::from_millis(config.recognition.interim_timeout_ms),
    );
    (session, handle)
}

fn validate_language(code: &str) -> Result<()> {
    match languages::get_language(code) {
        Some(_) => Ok(()),
        None => Err(DictanoteError::UnknownLanguage {
            code: code.to_string(),
        }),
    }
}

enum Flow {
    Continue,
    Quit,
}

fn run_command(
    command: &str,
    session: &mut RecognitionSession,
    handle: &mut PushRecognizerHandle,
    service: &Arc<SummarizationService>,
    config: &mut Config,
) -> Flow {
    let mut parts = command.split_whitespace();
    match parts.next().unwrap_or("") {
        "q" | "quit" => return Flow::Quit,
        "help" => print_help(),
        "start" => {
            if let Err(e) = session.start(&config.recognition.language) {
                eprintln!("dictanote: {}", e);
            }
            render(session);
        }
        "stop" => {
            session.stop();
            render(session);
        }
        "clear" => {
            session.clear_transcript();
            render(session);
        }
        "stats" => {
            let counts = stats(session.committed());
            println!(
                "Characters: {}  Words: {}  Sentences: {}",
                counts.character_count, counts.word_count, counts.sentence_count
            );
        }
        "summary" => {
            // Runs in the background; the shell stays responsive and a second
            // request while one is in flight reports Busy.
            let service = Arc::clone(service);
            let text = session.committed().to_string();
            tokio::spawn(async move {
                match service.generate(&text).await {
                    Ok(summary) => println!("\n--- Summary ---\n{}\n", summary),
                    Err(e) => eprintln!("dictanote: {}", e),
                }
            });
        }
        "reset" => {
            service.reset();
            println!("Summary cleared.");
        }
        "lang" => match parts.next() {
            Some(code) => match validate_language(code) {
                Ok(()) => {
                    // A different language needs a reconfigured recognizer:
                    // tear the session down and start fresh.
                    config.recognition.language = code.to_string();
                    session.stop();
                    let (new_session, new_handle) = make_session(config);
                    *session = new_session;
                    *handle = new_handle;
                    if let Err(e) = session.start(code) {
                        eprintln!("dictanote: {}", e);
                    }
                    render(session);
                }
                Err(e) => eprintln!("dictanote: {} (try :langs)", e),
            },
            None => print_languages(),
        },
        "langs" => print_languages(),
        other => eprintln!("dictanote: unknown command ':{}' (try :help)", other),
    }
    Flow::Continue
}

/// Feed a typed line into the recognizer.
///
/// A line ending in `...` stays interim-only, so the expiry window is
/// observable; anything else arrives as a final result.
fn dictate(handle: &PushRecognizerHandle, line: &str) {
    let delivered = if let Some(text) = line.strip_suffix("...") {
        handle.results(vec![RecognitionResult::interim(text.to_string())])
    } else {
        handle.results(vec![RecognitionResult::final_text(format!("{} ", line))])
    };
    if !delivered {
        eprintln!("dictanote: not recording (use :start)");
    }
}

fn render(session: &RecognitionSession) {
    let status = match session.status() {
        RecognitionStatus::Listening => format!("{}", "● rec".red()),
        RecognitionStatus::Idle => format!("{}", "○ idle".dimmed()),
    };
    println!(
        "[{}] {}{}",
        status,
        session.committed(),
        session.interim().dimmed()
    );
}

fn print_languages() {
    for lang in languages::LANGUAGES {
        println!("{:6}  {}", lang.code, lang.label);
    }
}

fn print_help() {
    eprintln!("Type a line to dictate it; end it with '...' to leave it interim-only.");
    eprintln!(
        "Commands: :start :stop :clear :stats :summary :reset :lang <code> :langs :help :quit"
    );
}

fn stdin_lines() -> UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        use std::io::BufRead;
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}
