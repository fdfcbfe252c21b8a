//! CLI entrypoint for model-debate
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use debate_application::{
    CompositeProgress, DebateProgressNotifier, InteractiveDebateUseCase, NoProgress,
    RunDebateInput, RunDebateUseCase, SessionStore,
};
use debate_domain::{OutputFormat, Topic};
use debate_infrastructure::{ConfigLoader, FileConfig, JsonlTranscriptLogger, OpenAiCompatibleGateway};
use debate_presentation::{
    Cli, ConsoleFormatter, HostRepl, OutputFormatter, ProgressReporter, SimpleProgress,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Held until exit so buffered log lines are flushed
    let _log_guard = init_tracing(cli.verbose, cli.log_dir.as_deref())?;

    info!("Starting model-debate");

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_deref())?
    };
    check_config(&config)?;

    if !config.output.color {
        ConsoleFormatter::set_color(false);
    }

    let registry = Arc::new(config.provider_registry());

    if cli.list_providers {
        for provider in registry.list() {
            println!(
                "{:<12} {}{}",
                provider.name,
                provider.endpoint,
                provider
                    .default_model
                    .as_deref()
                    .map(|m| format!(" (default model: {})", m))
                    .unwrap_or_default()
            );
        }
        return Ok(());
    }

    let topic = match cli.topic.as_deref().and_then(Topic::try_new) {
        Some(topic) => topic,
        None => bail!("A topic is required, e.g. model-debate -m openai:gpt-4o \"Tabs or spaces?\""),
    };

    let models = if cli.model.is_empty() {
        config.debate.models.clone()
    } else {
        cli.model.clone()
    };
    if models.is_empty() {
        bail!(
            "No models given. Use -m provider:model or set [debate] models in debate.toml (providers: {})",
            registry.names().join(", ")
        );
    }

    let mut input = RunDebateInput::new(topic, models, cli.rounds.unwrap_or(config.debate.rounds));
    if let Some(synthesizer) = cli.synthesizer.as_ref().or(config.debate.synthesizer.as_ref()) {
        input = input.with_synthesizer(synthesizer);
    }
    if let Some(instruction) = &cli.instruction {
        input = input.with_instruction(instruction);
    }

    let format: OutputFormat = cli
        .output
        .map(Into::into)
        .or(config.output.format)
        .unwrap_or_default();

    // === Dependency Injection ===
    let gateway = Arc::new(OpenAiCompatibleGateway::new());
    let behavior = config.debate.to_behavior_config();

    let transcript = match &cli.transcript {
        Some(path) => Some(
            JsonlTranscriptLogger::new(path)
                .with_context(|| format!("Could not create transcript file {}", path.display()))?,
        ),
        None => None,
    };

    let reporter: Box<dyn DebateProgressNotifier> = if cli.quiet {
        Box::new(NoProgress)
    } else if cli.interactive {
        Box::new(SimpleProgress)
    } else {
        Box::new(ProgressReporter::new())
    };

    let mut sinks: Vec<&dyn DebateProgressNotifier> = vec![reporter.as_ref()];
    if let Some(logger) = &transcript {
        sinks.push(logger);
    }
    let progress = CompositeProgress::new(sinks);

    let result = if cli.interactive {
        let use_case = InteractiveDebateUseCase::new(
            gateway,
            registry,
            behavior,
            Arc::new(SessionStore::new()),
        );
        match HostRepl::new(&use_case, &progress).run(input).await? {
            Some(result) => result,
            None => return Ok(()),
        }
    } else {
        let use_case = RunDebateUseCase::new(gateway, registry, behavior);
        use_case.execute_with_progress(input, &progress).await?
    };

    if result.all_models_failed() {
        warn!("No model produced a response");
        eprintln!("Warning: every model failed; see the errors in the transcript below.");
    }

    println!("{}", ConsoleFormatter.render(format, &result));

    if let Some(logger) = &transcript {
        info!("Transcript written to {}", logger.path().display());
    }

    Ok(())
}

/// Install the tracing subscriber. `-v` count picks the default level;
/// `RUST_LOG` overrides it.
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Could not create log directory {}", dir.display()))?;
            let appender = tracing_appender::rolling::daily(dir, "model-debate.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}

/// Print configuration warnings and refuse to run on errors.
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in issues.iter().filter(|i| !i.is_error()) {
        warn!("{}", issue);
        eprintln!("Warning: {}", issue);
    }

    let errors: Vec<String> = issues
        .iter()
        .filter(|i| i.is_error())
        .map(ToString::to_string)
        .collect();
    if !errors.is_empty() {
        bail!("Invalid configuration:\n  {}", errors.join("\n  "));
    }
    Ok(())
}
