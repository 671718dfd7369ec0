use std::io;
use std::path::Path;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware, web, App, HttpServer};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt, Layer};

mod api;
mod cli;
mod config;
mod db;
mod shutdown;
#[cfg(test)]
mod test_support;

use crate::api::state::AppState;
use crate::cli::{Cli, Command};
use crate::config::Config;
use crate::shutdown::ShutdownCoordinator;

#[actix_web::main]
async fn main() -> io::Result<()> {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Check => {
            if !cli::check().await? {
                std::process::exit(1);
            }
            Ok(())
        }
        Command::Serve { host, port } => serve(host, port).await,
    }
}

async fn serve(host: Option<String>, port: Option<u16>) -> io::Result<()> {
    let mut config = Config::from_env().map_err(|e| {
        eprintln!("Configuration error: {e}");
        eprintln!("Production needs DATABASE_URL_PROD; other environments need SUPABASE_URL and SUPABASE_KEY.");
        eprintln!("Set them in the environment or in a .env file in the working directory.");
        io::Error::other(e)
    })?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    init_tracing(&config.log_dir)?;

    info!("Starting MiniChangApp backend");
    info!("Configuration loaded successfully:");
    info!("  - Environment: {}", config.environment);
    info!("  - Backend: {}", config.data_source.kind());
    info!("  - Max payload size: {} bytes", config.max_payload_size);

    let store = db::open_store(&config).await.map_err(io::Error::other)?;
    let state = web::Data::new(AppState::new(config.environment, store.clone()));

    let public_dir = config.public_dir.is_dir().then(|| config.public_dir.clone());
    match &public_dir {
        Some(dir) => info!("Serving static frontend from {}", dir.display()),
        None => warn!("Static directory {} not found, frontend disabled", config.public_dir.display()),
    }

    let max_payload_size = config.max_payload_size;
    let server = HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::NormalizePath::trim())
            .app_data(web::PayloadConfig::default().limit(max_payload_size))
            .configure(api::configure(state.clone(), max_payload_size))
            .configure(|cfg| {
                if let Some(dir) = &public_dir {
                    cfg.service(Files::new("/", dir.clone()));
                }
            })
    })
    .disable_signals()
    .bind((config.host.as_str(), config.port))?
    .run();

    info!("Server listening on http://{}:{}", config.host, config.port);

    let server_handle = server.handle();
    let server_task = tokio::spawn(server);

    ShutdownCoordinator::new(server_handle, server_task, store)
        .wait_for_shutdown()
        .await
}

/// Console output plus daily-rotating per-level files under `log_dir`
/// (e.g. logs/info.log.2024-12-22, logs/error.log.2024-12-22).
fn init_tracing(log_dir: &Path) -> io::Result<()> {
    std::fs::create_dir_all(log_dir)?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());

    let info_file = tracing_appender::rolling::daily(log_dir, "info.log");
    let warn_file = tracing_appender::rolling::daily(log_dir, "warn.log");
    let error_file = tracing_appender::rolling::daily(log_dir, "error.log");

    let info_layer = tracing_subscriber::fmt::layer()
        .with_writer(info_file)
        .with_ansi(false)
        .with_filter(LevelFilter::INFO);

    let warn_layer = tracing_subscriber::fmt::layer()
        .with_writer(warn_file)
        .with_ansi(false)
        .with_filter(LevelFilter::WARN);

    let error_layer = tracing_subscriber::fmt::layer()
        .with_writer(error_file)
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_ansi(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(info_layer)
        .with(warn_layer)
        .with(error_layer)
        .init();

    Ok(())
}
