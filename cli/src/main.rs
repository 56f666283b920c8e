//! CLI entrypoint for AI Council
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use council_application::{
    DispatchConsensusUseCase, DispatchError, DispatchInput, DispatchProgress, NoProgress,
    OperationRecorder, ReportStatusUseCase,
};
use council_domain::{OutputFormat, RequestKind};
use council_infrastructure::config::FileLoggingConfig;
use council_infrastructure::{
    ConfigLoader, FileConfig, JsonlOperationJournal, MoodTracker, build_registry,
};
use council_presentation::{
    ChatRepl, ChatSession, Cli, Command, ConsoleFormatter, ProgressReporter, SimpleProgress,
};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(ExitCode::SUCCESS);
    }

    let config = load_config(&cli)?;
    let _log_guard = init_logging(cli.verbose, &config.logging);

    info!("Starting AI Council");

    if !config.output.color {
        ConsoleFormatter::disable_color();
    }

    // === Dependency Injection ===
    let council_config = config.council_config();
    let registry = Arc::new(build_registry(
        config.provider_profiles()?,
        config.council.parse_enabled()?.as_deref(),
    ));
    for name in &cli.disable {
        registry.disable_named(name)?;
    }

    let recorder = Arc::new(OperationRecorder::new());
    let mood = Arc::new(MoodTracker::new());

    let mut dispatch = DispatchConsensusUseCase::new(
        Arc::clone(&registry),
        Arc::clone(&recorder),
        council_config.clone(),
    )
    .with_persona(mood.clone());

    if let Some(path) = &config.logging.journal {
        match JsonlOperationJournal::open(path) {
            Some(journal) => {
                info!("Journaling dispatches to {}", journal.path().display());
                dispatch = dispatch.with_journal(Arc::new(journal));
            }
            None => warn!("Journal disabled"),
        }
    }

    let status = ReportStatusUseCase::new(
        Arc::clone(&registry),
        Arc::clone(&recorder),
        council_config.recent_limit,
    );

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();
    let timeout = cli.timeout_ms.map(Duration::from_millis);

    let (kind, input) = match cli.command.clone().unwrap_or(Command::Chat) {
        Command::Chat => {
            let session = ChatSession::new(Arc::new(dispatch), status, registry, mood)
                .with_format(format)
                .with_timeout(timeout)
                .with_progress(!cli.quiet && config.repl.show_progress);
            ChatRepl::new(session)
                .with_history_path(config.repl.history_path())
                .run()
                .await?;
            return Ok(ExitCode::SUCCESS);
        }
        Command::Status => {
            let snapshot = status.status();
            let output = match format {
                OutputFormat::Json => ConsoleFormatter::format_status_json(&snapshot),
                _ => ConsoleFormatter::format_status(&snapshot),
            };
            println!("{}", output);
            return Ok(ExitCode::SUCCESS);
        }
        Command::Generate { prompt } => (RequestKind::GenerateCode, prompt.join(" ")),
        Command::Analyze { code, file } => {
            let code = match file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Could not read {}", path.display()))?,
                None => code.join(" "),
            };
            (RequestKind::AnalyzeCode, code)
        }
        Command::Ask { question } => (RequestKind::AnswerQuestion, question.join(" ")),
    };

    let mut request = DispatchInput::new(kind, input);
    if let Some(timeout) = timeout {
        request = request.with_timeout(timeout);
    }

    let token = CancellationToken::new();
    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });
    }
    let request = request.with_cancellation(token);

    let progress: Box<dyn DispatchProgress> = if cli.quiet || format == OutputFormat::Json {
        Box::new(NoProgress)
    } else if cli.verbose > 0 {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    match dispatch.execute_with_progress(request, progress.as_ref()).await {
        Ok(result) => {
            println!("{}", ConsoleFormatter::render(&result, format));
            Ok(ExitCode::SUCCESS)
        }
        Err(DispatchError::NoProvidersAvailable { failures }) => {
            eprintln!("{}", ConsoleFormatter::format_no_response(&failures));
            Ok(ExitCode::FAILURE)
        }
        Err(DispatchError::Cancelled) => {
            eprintln!("Cancelled");
            Ok(ExitCode::from(130))
        }
    }
}

fn load_config(cli: &Cli) -> Result<FileConfig> {
    if cli.no_config {
        return Ok(ConfigLoader::load_defaults());
    }

    if let Some(path) = &cli.config
        && !path.exists()
    {
        bail!("Config file not found: {}", path.display());
    }

    let config = ConfigLoader::load(cli.config.as_deref()).map_err(|e| anyhow!("{}", e))?;
    config.validate()?;
    Ok(config)
}

/// Install the tracing subscriber; the returned guard flushes file logs on drop
fn init_logging(verbose: u8, logging: &FileLoggingConfig) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match &logging.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, "ai-council.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new("debug"));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::new(level)),
        )
        .with(file_layer)
        .init();

    guard
}
