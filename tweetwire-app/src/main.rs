use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tweetwire_app::{AppState, create_router};
use tweetwire_common::init_logging;
use tweetwire_config::{TweetwireConfig, TweetwireConfigLoader};
use tweetwire_social::twitter::TwitterApi;

/// Serve normalized tweets by hashtag or by user.
#[derive(Debug, Parser)]
#[command(name = "tweetwire", version)]
struct Cli {
    /// YAML config file; skipped if missing so env-only deployments work.
    #[arg(long, env = "TWEETWIRE_CONFIG", default_value = "tweetwire.yaml")]
    config: PathBuf,

    /// Listen address, overriding `server.bind`.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1) Load config (env wins over file)
    let cfg: TweetwireConfig = TweetwireConfigLoader::new()
        .with_optional_file(&cli.config)
        .load()
        .with_context(|| format!("loading configuration from {}", cli.config.display()))?;

    let log_path = init_logging("tweetwire", &cfg.logging)?;

    let api = TwitterApi::with_base_url(
        &cfg.twitter.base_url,
        cfg.twitter.bearer_token.clone(),
        Duration::from_secs(cfg.twitter.timeout_secs),
    )
    .context("building twitter client")?;

    let state = AppState::new(Arc::new(api), cfg.server.default_limit);
    let app = create_router(state);

    let bind = cli.bind.unwrap_or(cfg.server.bind);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("binding {bind}"))?;

    tracing::info!(
        %bind,
        upstream = %cfg.twitter.base_url,
        default_limit = cfg.server.default_limit,
        log_file = %log_path.display(),
        "tweetwire.listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("tweetwire.stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for ctrl-c; running until killed");
        std::future::pending::<()>().await;
    }
}
