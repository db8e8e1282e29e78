use anyhow::Result;
use clap::Parser;
use dictanote::app::{run_dictation, run_stats_command, run_summarize_command};
use dictanote::cli::{Cli, Commands};
use dictanote::config::Config;
use dictanote::languages;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let config = load_config(cli.config.as_deref());
            run_dictation(config, cli.language, cli.summary_model, cli.no_restore).await?;
        }
        Some(Commands::Languages) => {
            for lang in languages::LANGUAGES {
                println!("{:6}  {}", lang.code, lang.label);
            }
        }
        Some(Commands::Stats) => {
            run_stats_command()?;
        }
        Some(Commands::Summarize) => {
            let config = load_config(cli.config.as_deref());
            run_summarize_command(config, cli.summary_model).await?;
        }
    }

    Ok(())
}

/// Load config from the given path, or the default location.
fn load_config(path: Option<&Path>) -> Config {
    let config = match path {
        Some(path) => Config::load_or_default(path),
        None => Config::load_or_default(&Config::default_path()),
    };
    config.with_env_overrides()
}
