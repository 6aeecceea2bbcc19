//! CLI entrypoint for Conclave
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result};
use clap::Parser;
use conclave_application::ports::{CompletionGateway, NoTranscript, SyntaxChecker, TranscriptSink};
use conclave_application::{
    ArtifactCell, ConsensusSignal, Coordinator, Producer, Reviewer, ReviewWorkflow, Scheduler,
    WorkflowStatus,
};
use conclave_domain::{seed_artifact, AgentId, ReviewerProfile};
use conclave_infrastructure::{
    persist_artifact, ConfigLoader, FileTranscript, OpenAiCompletionGateway, PythonSyntaxChecker,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "conclave")]
#[command(about = "Multi-agent code review and fix orchestration", long_about = None)]
struct Cli {
    /// Path to a config file (overrides discovered configs)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Python file to submit for review (defaults to a built-in sample)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Maximum review rounds before giving up
    #[arg(short, long)]
    rounds: Option<usize>,

    /// Where to write the final artifact
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Where to write the message transcript
    #[arg(short, long)]
    transcript: Option<PathBuf>,

    /// Disable the transcript file entirely
    #[arg(long)]
    no_transcript: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress the console summary
    #[arg(short, long)]
    quiet: bool,
}

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
        .init();

    info!("Starting Conclave");

    let config =
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let max_rounds = cli.rounds.unwrap_or(config.workflow.max_rounds);
    let output_path = cli
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.artifact));
    let transcript_path = cli
        .transcript
        .unwrap_or_else(|| PathBuf::from(&config.output.transcript));

    let seed = match &cli.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?,
        None => seed_artifact().to_string(),
    };

    // === Dependency Injection ===
    let api_key = std::env::var(&config.endpoint.api_key_env).ok();
    if api_key.is_none() {
        warn!(
            var = %config.endpoint.api_key_env,
            "API key environment variable is not set; requests go out unauthenticated"
        );
    }
    let gateway: Arc<dyn CompletionGateway> = Arc::new(OpenAiCompletionGateway::new(
        &config.endpoint.base_url,
        &config.endpoint.model,
        api_key,
        Duration::from_secs(config.endpoint.timeout_secs),
    )?);
    let syntax: Arc<dyn SyntaxChecker> = Arc::new(PythonSyntaxChecker::new());
    let transcript: Arc<dyn TranscriptSink> = if cli.no_transcript {
        Arc::new(NoTranscript)
    } else {
        match FileTranscript::new(&transcript_path) {
            Some(sink) => Arc::new(sink),
            None => {
                warn!(
                    path = %transcript_path.display(),
                    "Could not open transcript file; continuing without one"
                );
                Arc::new(NoTranscript)
            }
        }
    };

    // Assemble the agent roster
    let producer_id = AgentId::new("developer");
    let coordinator_id = AgentId::new("coordinator");
    let profiles = [
        ReviewerProfile::team_lead(),
        ReviewerProfile::senior_architect(),
    ];
    let reviewer_ids: Vec<AgentId> = profiles.iter().map(|p| AgentId::new(p.id)).collect();

    let artifact = ArtifactCell::new(seed);
    let signal = ConsensusSignal::new();

    let mut scheduler = Scheduler::new(transcript.clone());
    scheduler.register(Box::new(Producer::new(
        producer_id.clone(),
        artifact.clone(),
        reviewer_ids.clone(),
        gateway.clone(),
        syntax,
        transcript.clone(),
    )));
    for profile in profiles {
        scheduler.register(Box::new(Reviewer::new(
            profile,
            coordinator_id.clone(),
            gateway.clone(),
            transcript.clone(),
        )));
    }
    scheduler.register(Box::new(Coordinator::new(
        coordinator_id,
        producer_id.clone(),
        reviewer_ids,
        signal.clone(),
    )));

    // Ctrl-C stops the workflow at the next round boundary
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received; stopping after the current round");
            ctrl_c_cancel.cancel();
        }
    });

    let workflow = ReviewWorkflow::new(scheduler, producer_id, signal, artifact, transcript)
        .with_max_rounds(max_rounds)
        .with_cancellation(cancel);

    let outcome = workflow.run().await?;

    persist_artifact(&output_path, &outcome.artifact)
        .with_context(|| format!("Failed to write artifact to {}", output_path.display()))?;

    if !cli.quiet {
        println!();
        println!("Result: {}", outcome.status);
        println!("Rounds: {}", outcome.rounds_run);
        println!("Artifact written to {}", output_path.display());
        println!();
        println!("{}", outcome.artifact);
    }

    if matches!(outcome.status, WorkflowStatus::Approved) {
        info!("Full approval reached");
    }

    Ok(())
}
