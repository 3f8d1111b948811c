//! PDF chat server binary
//!
//! Run with: cargo run -p chat-pdf --bin chat-pdf-server -- --config chat-pdf.toml

use std::path::PathBuf;

use chat_pdf::{config::RagConfig, server::ChatServer};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "chat-pdf-server", version, about = "Ask questions about an uploaded PDF")]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "CHAT_PDF_CONFIG")]
    config: Option<PathBuf>,

    /// Env file to read before resolving the API key (default: .env lookup)
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chat_pdf=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // API keys may live in a .env file next to the server
    RagConfig::load_env_file(args.env_file.as_deref());

    // Load configuration
    let mut config = RagConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("  - Backend: {:?}", config.backend);
    if config.backend.requires_credential() {
        tracing::info!(
            "  - Credential: {} ({})",
            config.credentials.api_key_env,
            if config.api_key().is_some() { "set" } else { "not set" }
        );
    }
    tracing::info!(
        "  - Chunk size: {} (overlap {})",
        config.chunking.chunk_size,
        config.chunking.chunk_overlap
    );
    tracing::info!("  - Top k: {}", config.retrieval.top_k);
    tracing::info!("  - Index root: {}", config.index.root_dir.display());

    let server = ChatServer::new(config)?;

    // Check providers
    match server.state().pipeline() {
        Ok(pipeline) => {
            let providers = pipeline.providers();
            for (kind, name, model, healthy) in [
                (
                    "Embeddings",
                    providers.embedder.name(),
                    providers.embedder.model(),
                    providers.embedder.health_check().await.unwrap_or(false),
                ),
                (
                    "Generation",
                    providers.llm.name(),
                    providers.llm.model(),
                    providers.llm.health_check().await.unwrap_or(false),
                ),
            ] {
                if healthy {
                    tracing::info!("{}: {} ({}) is reachable", kind, name, model);
                } else {
                    tracing::warn!("{}: {} ({}) is not reachable", kind, name, model);
                }
            }
        }
        Err(e) => tracing::warn!("{}", e.user_message()),
    }

    println!("\nServer starting...");
    println!("  Form: http://{}/", server.address());
    println!("  Health: http://{}/health", server.address());
    println!("\nPress Ctrl+C to stop\n");

    server.start().await?;

    Ok(())
}
