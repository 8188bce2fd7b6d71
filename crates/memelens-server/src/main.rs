//! MemeLens HTTP server binary.

use anyhow::Context;
use clap::Parser;
use log::info;
use memelens_config::{MemeLensConfig, ProviderKind};
use memelens_core::{
    DEFAULT_USER_AGENT, ExplainService, HttpMemeFetcher, MemeAnalyzer, MemoryStore,
};
use memelens_providers::{GeminiAnalyzer, OpenAiAnalyzer};
use memelens_server::{AppState, router};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Command-line options for the MemeLens server.
#[derive(Parser)]
#[command(name = "memelens-server", version)]
struct Cli {
    /// Optional path to a memelens.json5 config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Listen host override
    #[arg(long)]
    host: Option<String>,
    /// Listen port override
    #[arg(long)]
    port: Option<u16>,
    /// AI provider override (openai or gemini)
    #[arg(long)]
    provider: Option<ProviderKind>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = env_logger::builder()
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();

    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => MemeLensConfig::load_from_path(path).context("failed to load config")?,
        None => MemeLensConfig::default(),
    };
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }
    if let Some(provider) = cli.provider {
        config.provider.kind = provider;
    }
    info!(
        "starting server (provider={}, recent_limit={})",
        config.provider.kind, config.recent_limit
    );

    let fetcher = HttpMemeFetcher::new(
        Duration::from_secs(config.fetch.timeout_secs),
        config.fetch.max_bytes,
        config
            .fetch
            .user_agent
            .as_deref()
            .unwrap_or(DEFAULT_USER_AGENT),
    )
    .context("failed to build meme fetcher")?;
    let analyzer = build_analyzer(&config)?;
    let service = ExplainService::new(Arc::new(fetcher), analyzer, Arc::new(MemoryStore::new()));
    let state = AppState::new(service, config.recent_limit);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("serving on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Build the configured analyzer, reading its API key from the environment.
fn build_analyzer(config: &MemeLensConfig) -> anyhow::Result<Arc<dyn MemeAnalyzer>> {
    let key_env = config
        .provider
        .api_key_env
        .clone()
        .unwrap_or_else(|| config.provider.kind.default_api_key_env().to_string());
    let api_key = std::env::var(&key_env).with_context(|| {
        format!(
            "{key_env} is required for the {} provider",
            config.provider.kind
        )
    })?;

    info!("building analyzer (provider={})", config.provider.kind);
    let analyzer: Arc<dyn MemeAnalyzer> = match config.provider.kind {
        ProviderKind::OpenAi => {
            let mut analyzer = OpenAiAnalyzer::new(api_key);
            if let Some(model) = config.provider.model.clone() {
                analyzer = analyzer.with_model(model);
            }
            Arc::new(analyzer)
        }
        ProviderKind::Gemini => {
            let mut analyzer = GeminiAnalyzer::new(api_key);
            if let Some(model) = config.provider.model.clone() {
                analyzer = analyzer.with_model(model);
            }
            Arc::new(analyzer)
        }
    };
    Ok(analyzer)
}
