// src/main.rs

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;

use topic_classifier::classifier::{Classifier, SCHEMA_NAME};
use topic_classifier::config::CONFIG;
use topic_classifier::llm::{ClientConfig, OpenAiClient, ResponseSchema};
use topic_classifier::{ClassificationResult, Taxonomy};

#[derive(Parser)]
#[command(name = "classify")]
#[command(about = "Classify a conversation into a topic taxonomy using an LLM", long_about = None)]
struct Cli {
    /// Conversation text (reads --file or stdin when omitted)
    conversation: Option<String>,

    /// Read the conversation from a file
    #[arg(short, long, conflicts_with = "conversation")]
    file: Option<PathBuf>,

    /// TOML taxonomy replacing the built-in categories
    #[arg(short, long)]
    taxonomy: Option<PathBuf>,

    /// Model override
    #[arg(short, long)]
    model: Option<String>,

    /// Maximum classification attempts
    #[arg(long)]
    max_attempts: Option<u32>,

    /// Print only topic, tags and title
    #[arg(long, default_value_t = false)]
    summary: bool,

    /// Single-line JSON output
    #[arg(long, default_value_t = false)]
    compact: bool,

    /// Print the response JSON schema and exit
    #[arg(long, default_value_t = false)]
    print_schema: bool,

    /// Enable debug logging
    #[arg(short, long, default_value_t = false)]
    debug: bool,
}

fn read_conversation(cli: &Cli) -> Result<String> {
    let text = match (&cli.conversation, &cli.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read conversation from {}", path.display()))?,
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read conversation from stdin")?;
            buf
        }
    };

    if text.trim().is_empty() {
        bail!("Conversation is empty");
    }
    Ok(text)
}

fn load_taxonomy(cli: &Cli) -> Result<Taxonomy> {
    let path = cli
        .taxonomy
        .clone()
        .or_else(|| CONFIG.taxonomy_path.as_ref().map(PathBuf::from));

    match path {
        Some(path) => Taxonomy::from_toml_file(&path)
            .with_context(|| format!("Failed to load taxonomy from {}", path.display())),
        None => Ok(Taxonomy::builtin()),
    }
}

fn to_json<T: serde::Serialize>(value: &T, compact: bool) -> Result<String> {
    Ok(if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        CONFIG.log_level()
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    if cli.print_schema {
        let schema = ResponseSchema::for_type::<ClassificationResult>(SCHEMA_NAME);
        println!("{}", to_json(&schema.schema, cli.compact)?);
        return Ok(());
    }

    let taxonomy = load_taxonomy(&cli)?;
    let conversation = read_conversation(&cli)?;

    let mut client_config = ClientConfig::from_env(&CONFIG)?;
    if let Some(model) = &cli.model {
        client_config.model = model.clone();
    }
    let client = OpenAiClient::new(client_config)?;

    let mut policy = CONFIG.retry_policy();
    if let Some(max_attempts) = cli.max_attempts {
        policy = topic_classifier::RetryPolicy::new(max_attempts).with_backoff(policy.backoff());
    }

    info!("Using {} categories: {:?}", taxonomy.len(), taxonomy.topics());

    let classifier = Classifier::new(Arc::new(client), taxonomy).with_policy(policy);
    let result = classifier.classify(&conversation).await?;

    let output = if cli.summary {
        to_json(&result.summary(), cli.compact)?
    } else {
        to_json(&result, cli.compact)?
    };
    println!("{}", output);

    Ok(())
}
