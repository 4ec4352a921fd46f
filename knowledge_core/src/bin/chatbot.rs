//! Chatbot CLI entry point.

use dialogue_rules::Settings;
use knowledge_core::{Chatbot, Repl};
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// CLI configuration parsed from arguments.
#[derive(Default)]
struct CliConfig {
    config_file: Option<PathBuf>,
    knowledge_file: Option<PathBuf>,
    show_help: bool,
    show_version: bool,
}

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn parse_args(args: Vec<String>) -> Result<CliConfig, Box<dyn std::error::Error>> {
    let mut config = CliConfig::default();

    let mut args = args.into_iter().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => config.show_help = true,
            "-V" | "--version" => config.show_version = true,
            "-c" | "--config" => {
                let value = args.next().ok_or("--config requires a file")?;
                config.config_file = Some(PathBuf::from(value));
            }
            "-k" | "--knowledge" => {
                let value = args.next().ok_or("--knowledge requires a file")?;
                config.knowledge_file = Some(PathBuf::from(value));
            }
            other => return Err(format!("unknown argument: {other}").into()),
        }
    }

    Ok(config)
}

fn init_logging(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: Vec<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = parse_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("chatbot {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let mut settings = match &config.config_file {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(path) = config.knowledge_file {
        settings = settings.with_knowledge_file(path);
    }

    init_logging(&settings);

    let mut chatbot = Chatbot::new(settings);
    match chatbot.preload() {
        Ok(Some(report)) => {
            tracing::info!(loaded = report.loaded, skipped = report.skipped, "preloaded knowledge");
        }
        Ok(None) => {}
        Err(e) => {
            tracing::warn!(error = %e, "could not preload knowledge");
            eprintln!("Warning: {e}");
        }
    }

    Repl::new(chatbot)?.run()?;
    Ok(())
}

fn print_help() {
    println!(
        "\
chatbot - answers who/what/where/when/why/how questions and learns the ones it can't

USAGE:
    chatbot [OPTIONS]

OPTIONS:
    -c, --config <FILE>      Read settings from a TOML file
    -k, --knowledge <FILE>   Load a knowledge file before the first prompt
    -h, --help               Print this help
    -V, --version            Print the version

IN THE CONVERSATION:
    what is <entity>         Ask a question (also who, where, when, why, how)
    load from <file>         Merge a knowledge file into memory
    save as <file>           Write everything learned to a file
    reset                    Forget everything
    exit, quit               Leave

Set RUST_LOG (e.g. RUST_LOG=debug) to see diagnostics on stderr."
    );
}
