use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use news_search::api::create_router;
use news_search::config::CONFIG;
use news_search::engine::EngineClient;
use news_search::search::NewsSearch;

#[derive(Parser, Debug)]
#[command(name = "news-search", about = "HTTP search API over the policy news index")]
struct Args {
    /// Port to listen on (overrides PORT)
    #[arg(long)]
    port: Option<u16>,

    /// Directory holding the landing page (overrides STATIC_DIR)
    #[arg(long)]
    static_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber (handles both tracing and log crate)
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(true)
        .init();

    let args = Args::parse();
    let port = args.port.unwrap_or(CONFIG.port);
    let static_dir = args.static_dir.unwrap_or_else(|| CONFIG.static_dir.clone());

    let engine = EngineClient::from_config().context("Failed to create search engine client")?;
    match engine.ping().await {
        Ok(()) => tracing::info!(host = %CONFIG.elasticsearch_host, "Search engine reachable"),
        Err(e) => tracing::warn!(host = %CONFIG.elasticsearch_host, "Search engine not reachable yet: {:#}", e),
    }

    let router = create_router(Arc::new(NewsSearch::new(engine)), &static_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Server is listening on port: {port}");

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Shutting down");
        })
        .await
        .context("Server error")?;
    Ok(())
}
