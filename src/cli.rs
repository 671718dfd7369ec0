use std::path::Path;

use clap::{Parser, Subcommand};

use crate::config::{Config, DataSource};
use crate::db;

#[derive(Debug, Parser)]
#[command(name = "minichangapp", version, about = "Job-board backend: users, jobs and applications over HTTP")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve {
        /// Bind address, overrides HOST
        #[arg(long)]
        host: Option<String>,

        /// Bind port, overrides PORT
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print configuration diagnostics and test the database connection
    Check,
}

/// Report where configuration comes from and whether the selected backend answers.
/// Secrets are only reported as present or absent.
pub async fn check() -> std::io::Result<bool> {
    let cwd = std::env::current_dir()?;
    let env_file = cwd.join(".env");
    println!("Working directory: {}", cwd.display());
    println!(".env file:         {}", presence(&env_file));

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration:     INVALID ({e})");
            return Ok(false);
        }
    };

    println!("Environment:       {}", config.environment);
    match &config.data_source {
        DataSource::Sql { .. } => {
            println!("Backend:           direct SQL");
            println!("DATABASE_URL_PROD: set");
        }
        DataSource::Rest { url, .. } => {
            println!("Backend:           hosted REST API");
            println!("SUPABASE_URL:      {url}");
            println!("SUPABASE_KEY:      set");
        }
    }
    println!("Public directory:  {} ({})", config.public_dir.display(), presence(&config.public_dir));

    let store = match db::open_store(&config).await {
        Ok(store) => store,
        Err(e) => {
            println!("Connection:        FAILED ({e})");
            return Ok(false);
        }
    };

    let reachable = match store.ping().await {
        Ok(()) => {
            println!("Connection:        OK");
            true
        }
        Err(e) => {
            println!("Connection:        FAILED ({e})");
            false
        }
    };
    store.close().await;

    Ok(reachable)
}

fn presence(path: &Path) -> &'static str {
    if path.exists() {
        "found"
    } else {
        "missing"
    }
}
