use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use career_parser::models::resume::ParseOutcome;
use career_parser::nlp_client::EmbeddingClient;
use career_parser::{Config, JobPostingAnalyzer, NlpCapabilities, ResumeParser};

#[derive(Parser)]
#[command(name = "career-parser")]
#[command(version, about = "Parse résumés and job postings into structured JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a résumé (.pdf, .docx or .doc)
    Resume {
        path: PathBuf,

        /// Owner id stamped into the record metadata
        #[arg(long)]
        owner: Option<Uuid>,
    },
    /// Analyze a plain-text job posting
    Job { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    // stdout carries the JSON, so logs go to stderr
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("career_parser={}", &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting career-parser v{}", env!("CARGO_PKG_VERSION"));

    let nlp = build_nlp(&config)?;

    match cli.command {
        Commands::Resume { path, owner } => {
            let parser = ResumeParser::new(config, nlp);
            let outcome = match parser.parse_file(&path, owner) {
                Ok(record) => ParseOutcome::parsed(record),
                Err(e) => ParseOutcome::failed(&e),
            };
            println!("{}", serde_json::to_string_pretty(&outcome)?);
            Ok(if outcome.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
        Commands::Job { path } => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read job posting {}", path.display()))?;
            let profile = JobPostingAnalyzer::new(config, nlp).analyze(&text).await;
            println!("{}", serde_json::to_string_pretty(&profile)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Semantic matching is enabled only when an embedding endpoint is configured.
fn build_nlp(config: &Config) -> Result<NlpCapabilities> {
    let Some(url) = &config.embedding_api_url else {
        info!("No EMBEDDING_API_URL set; job analysis runs in keyword mode");
        return Ok(NlpCapabilities::none());
    };

    let client = EmbeddingClient::new(url, config.embedding_model.clone())
        .context("Failed to build embedding client")?;
    info!("Embedding client initialized (model: {})", client.model());
    Ok(NlpCapabilities::none().with_encoder(Arc::new(client)))
}
