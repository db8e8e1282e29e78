//! Command-line interface for dictanote
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Live dictation notepad
#[derive(Parser, Debug)]
#[command(name = "dictanote", version, about = "Live dictation notepad")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Recognition language code. Examples: en-US, es-ES, de-DE
    #[arg(long, short = 'l', value_name = "LANG")]
    pub language: Option<String>,

    /// Summarization model (flan-t5-small, flan-t5-base, flan-t5-large)
    #[arg(long, value_name = "MODEL")]
    pub summary_model: Option<String>,

    /// Do not restore the saved transcript from the previous run
    #[arg(long)]
    pub no_restore: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available recognition languages
    Languages,

    /// Count characters, words and sentences of text read from stdin
    Stats,

    /// Summarize text read from stdin and print the summary
    Summarize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_no_args() {
        let cli = Cli::try_parse_from(["dictanote"]).expect("parse");
        assert!(cli.command.is_none());
        assert!(cli.language.is_none());
        assert!(!cli.no_restore);
    }

    #[test]
    fn test_cli_parses_language_override() {
        let cli = Cli::try_parse_from(["dictanote", "--language", "de-DE"]).expect("parse");
        assert_eq!(cli.language.as_deref(), Some("de-DE"));
    }

    #[test]
    fn test_cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["dictanote", "languages"]).expect("parse");
        assert!(matches!(cli.command, Some(Commands::Languages)));

        let cli = Cli::try_parse_from(["dictanote", "stats"]).expect("parse");
        assert!(matches!(cli.command, Some(Commands::Stats)));

        let cli = Cli::try_parse_from(["dictanote", "summarize"]).expect("parse");
        assert!(matches!(cli.command, Some(Commands::Summarize)));
    }

    #[test]
    fn test_cli_rejects_unknown_subcommand() {
        assert!(Cli::try_parse_from(["dictanote", "bogus"]).is_err());
    }
}
