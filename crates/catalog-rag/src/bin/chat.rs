//! Interactive catalog chat binary
//!
//! Run with: cargo run -p catalog-rag --bin catalog-chat

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use catalog_rag::providers::{ChatProvider, EmbeddingProvider, OllamaProvider};
use catalog_rag::{build_index, Catalog, ChatSession, RagConfig, Retriever, TurnOutcome};

#[derive(Parser)]
#[command(name = "catalog-chat", about = "Chat with a product catalog", version)]
struct Args {
    /// Path to the catalog JSON file (overrides config)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Products retrieved per turn (overrides config)
    #[arg(long)]
    top_k: Option<usize>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_rag=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => RagConfig::load(path)?,
        None => RagConfig::default(),
    };
    if let Some(path) = args.catalog {
        config.catalog.path = path;
    }
    if let Some(top_k) = args.top_k {
        config.retrieval.top_k = top_k;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Embedding model: {}", config.llm.embed_model);
    tracing::info!("  - Embedding dimensions: {}", config.embeddings.dimensions);
    tracing::info!("  - Chat model: {}", config.llm.chat_model);
    tracing::info!("  - Top-k: {}", config.retrieval.top_k);

    let catalog = Arc::new(Catalog::load(&config.catalog.path)?);

    let (embedder, chat) =
        OllamaProvider::new(&config.llm, config.embeddings.dimensions)?.split();
    let embedder: Arc<dyn EmbeddingProvider> = Arc::new(embedder);
    let chat: Arc<dyn ChatProvider> = Arc::new(chat);

    if !embedder.health_check().await.unwrap_or(false) {
        tracing::warn!("Ollama not available at {}", config.llm.base_url);
        tracing::warn!("Please start Ollama:");
        tracing::warn!("  1. Install: brew install ollama");
        tracing::warn!("  2. Start: ollama serve");
        tracing::warn!(
            "  3. Pull models: ollama pull {} && ollama pull {}",
            config.llm.embed_model,
            config.llm.chat_model
        );
    }

    // The chat loop must not start before the index build completes
    let index = Arc::new(build_index(&catalog, embedder.as_ref()).await?);

    let retriever = Retriever::new(Arc::clone(&catalog), index, embedder);
    let mut session = ChatSession::new(retriever, chat, &config);

    println!("Welcome to the gift store!");
    println!(
        "Ask about our {} products (type \"{}\" to quit).",
        catalog.len(),
        config.chat.exit_token
    );

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input).is_err() || input.is_empty() {
            break;
        }

        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        match session.submit_turn(input).await {
            Ok(TurnOutcome::Reply(reply)) => {
                println!("{}\n", reply);
            }
            Ok(TurnOutcome::Closed) => {
                println!("Goodbye!");
                break;
            }
            Err(e) if !e.is_fatal() => {
                tracing::warn!("Turn failed: {}", e);
                println!("Sorry, I could not process that query. Please try again.\n");
            }
            Err(e) => return Err(e.into()),
        }
    }

    Ok(())
}
