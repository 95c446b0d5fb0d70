use anyhow::Context;
use regional_news::{app, config};
use std::{
    net::SocketAddr,
    path::{Path, PathBuf},
    sync::OnceLock,
};
use tokio::net::TcpListener;
use tracing_appender::{
    non_blocking::{NonBlocking, WorkerGuard},
    rolling,
};
use tracing_subscriber::{
    filter::filter_fn, fmt::layer as fmt_layer, prelude::*, EnvFilter, Registry,
};

const CRATE_TARGET: &str = "regional_news";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::AppConfig::from_env().context("failed to load configuration")?;
    setup_tracing(&config)?;
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .context("invalid SERVER_BIND address")?;

    let state = app::build_state(&config)?;
    let router = app::build_router(state);

    tracing::info!(
        %addr,
        concurrency = config.fetcher.concurrency,
        timeout_secs = config.fetcher.request_timeout_secs,
        "starting server"
    );

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await.context("server failed")?;

    Ok(())
}

/// Without `RUST_LOG`, the configured level applies to this crate only; dependencies
/// stay at `warn` apart from the per-request spans from `tower_http`.
fn default_filter(config: &config::AppConfig) -> EnvFilter {
    let level = config.logging.level.as_deref().unwrap_or("info");
    EnvFilter::new(format!("warn,tower_http=info,{CRATE_TARGET}={level}"))
}

fn log_file_writer(path: &str) -> anyhow::Result<NonBlocking> {
    let log_path = Path::new(path);
    let file_name = log_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("log file path {path:?} has no file name"))?;
    let directory = match log_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    };
    std::fs::create_dir_all(&directory)
        .with_context(|| format!("failed to create log directory {:?}", directory))?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::never(directory, file_name));

    static FILE_GUARD: OnceLock<WorkerGuard> = OnceLock::new();
    let _ = FILE_GUARD.set(guard);

    Ok(writer)
}

fn setup_tracing(config: &config::AppConfig) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(config));
    let file_writer = log_file_writer(&config.logging.file)?;

    let ours = |meta: &tracing::Metadata<'_>| meta.target().starts_with(CRATE_TARGET);

    let stdout_crate = fmt_layer()
        .with_writer(std::io::stdout)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter_fn(ours));

    let stdout_general = fmt_layer()
        .with_writer(std::io::stdout)
        .with_filter(filter_fn(move |meta| !ours(meta)));

    let file_layer = fmt_layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(filter_fn(ours));

    Registry::default()
        .with(env_filter)
        .with(stdout_crate)
        .with(stdout_general)
        .with(file_layer)
        .try_init()
        .context("failed to init tracing subscriber")?;

    Ok(())
}
