use anyhow::Context;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use dira_odds::api::DiraClient;
use dira_odds::config::{Config, CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use dira_odds::diagnostics::TracingSink;
use dira_odds::pipeline;
use dira_odds::report::timestamp;

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_or_default(&path)
        .with_context(|| format!("failed to load config from {}", path));

    let level = match &cfg {
        Ok(cfg) => cfg.general.log_level.clone(),
        Err(_) => "info".to_string(),
    };
    init_tracing(&level);

    match run(cfg).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cfg: anyhow::Result<Config>) -> anyhow::Result<()> {
    let cfg = cfg?;
    tracing::debug!(?cfg, "loaded config");

    let client = DiraClient::new(&cfg.api)?;
    let stamp = timestamp(chrono::Local::now());

    let summary = pipeline::run(&client, &TracingSink, &cfg.output.dir, &stamp).await?;

    if summary.undefined_projects > 0 {
        tracing::warn!(
            count = summary.undefined_projects,
            "some projects have no subscribers; their win chance is reported as undefined"
        );
    }
    tracing::info!(
        projects = summary.projects,
        cities = summary.cities,
        "done"
    );
    Ok(())
}

/// `RUST_LOG` wins over the configured level.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
