//! CLI entrypoint for Clarity
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use clarity_application::{
    EndSessionUseCase, IntentClassifier, ListSessionsUseCase, RuleBasedIntentClassifier,
    RunTurnInput, RunTurnUseCase, SessionStore, StartSessionUseCase,
};
use clarity_domain::Model;
use clarity_infrastructure::{
    ConfigLoader, InMemorySessionStore, JsonlConversationLogger, JsonlSessionStore,
    ModelIntentClassifier, OpenAiCompletionGateway,
};
use clarity_presentation::{ChatRepl, Cli, ConsoleFormatter, OutputFormat, WaitSpinner};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    // Load configuration
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow::anyhow!("failed to load configuration: {e}"))?
    };
    for issue in config.validate() {
        warn!("config: {issue}");
    }

    // Model: CLI flag beats config beats default
    let model: Model = match &cli.model {
        Some(name) => name.parse().unwrap(),
        None => config.parse_model(),
    };

    let mut params = config.conversation_params();
    if let Some(max_turns) = cli.max_turns {
        params = params.with_max_turns(max_turns);
    }
    let persona = config.persona();

    info!("Starting Clarity (model {model})");

    // === Dependency Injection ===

    // Session store
    let store: Arc<dyn SessionStore> = if cli.ephemeral {
        Arc::new(InMemorySessionStore::new())
    } else {
        let dir = dirs::data_dir()
            .context("no data directory available; use --ephemeral")?
            .join("clarity")
            .join("sessions");
        Arc::new(JsonlSessionStore::new(dir)?)
    };

    if cli.list_sessions {
        let sessions = ListSessionsUseCase::new(store).execute(&cli.owner).await?;
        println!("{}", ConsoleFormatter::format_sessions(&sessions));
        return Ok(());
    }

    // Completion gateway
    let api_key = std::env::var(&config.provider.api_key_env).unwrap_or_default();
    if api_key.is_empty() {
        warn!(
            "{} is not set; provider requests will be unauthenticated",
            config.provider.api_key_env
        );
    }
    let gateway = Arc::new(OpenAiCompletionGateway::new(
        &config.provider.base_url,
        &api_key,
    ));

    // Wrap-up intent classifier
    let classifier: Arc<dyn IntentClassifier> = if config.wrapup.use_model_classifier {
        Arc::new(
            ModelIntentClassifier::new(gateway.clone(), model.clone())
                .with_fallback(config.detector()),
        )
    } else {
        Arc::new(RuleBasedIntentClassifier::new(config.detector()))
    };

    // Run-turn use case, with transcript logging when configured
    let mut run_turn = RunTurnUseCase::new(gateway, store.clone(), classifier);
    if let Some(dir) = config.transcript_dir() {
        if let Some(logger) = JsonlConversationLogger::new(dir.join("transcript.jsonl")) {
            info!("Transcripts -> {}", logger.path().display());
            run_turn = run_turn.with_conversation_logger(Arc::new(logger));
        }
    }

    // Resolve the session: resume an existing one or start fresh
    let (session_id, created) = match &cli.session {
        Some(id) => {
            let session = store.get_session(id).await?;
            (session.id().to_string(), false)
        }
        None => {
            let session = StartSessionUseCase::new(store.clone())
                .execute(&cli.owner)
                .await?;
            (session.id().to_string(), true)
        }
    };

    match cli.message {
        // One-shot mode: a single turn, reply on stdout
        Some(text) => {
            if created && !cli.quiet {
                eprintln!("session: {session_id}  (pass --session {session_id} to continue)");
            }

            let input = RunTurnInput::new(&session_id, text)
                .with_model(model)
                .with_persona(persona)
                .with_params(params);

            let spinner = (!cli.quiet).then(|| WaitSpinner::start("thinking..."));
            let result = run_turn.execute(input).await;
            if let Some(spinner) = spinner {
                spinner.finish();
            }

            let output = result?;
            match cli.output {
                OutputFormat::Text => println!("{}", ConsoleFormatter::format_reply(&output)),
                OutputFormat::Json => println!("{}", ConsoleFormatter::format_reply_json(&output)),
            }
        }
        // Interactive chat
        None => {
            let repl = ChatRepl::new(
                run_turn,
                EndSessionUseCase::new(store.clone()),
                session_id,
                model,
            )
            .with_persona(persona)
            .with_params(params)
            .with_spinner(!cli.quiet);

            repl.run().await?;
        }
    }

    Ok(())
}
