//! `schemasync` compares a production PostgreSQL schema against development
//! with an external diff tool (`migra` by default) and writes the SQL that
//! brings production in line, wrapped in a transaction.
//!
//! ```bash
//! schemasync --dev-db app --dev-user dev \
//!     --prod-host db.example.com --prod-db app --prod-user owner \
//!     -o sync.sql
//! ```

mod app;
mod args;
mod banner;
mod credentials;

use anyhow::Context;
use clap::Parser;
use schemasync_config::ConfigLoader;
use schemasync_diff::SystemCommand;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::args::Args;
use crate::credentials::TerminalPrompt;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let now = chrono::Local::now();

    if let Err(e) = run(&args, now).await {
        eprintln!("✗ {e:#}");
        std::process::exit(1);
    }
}

async fn run(args: &Args, now: chrono::DateTime<chrono::Local>) -> anyhow::Result<()> {
    let config = ConfigLoader::load(args.config.as_deref()).context("failed to load config")?;
    let mut stdout = std::io::stdout().lock();

    let outcome = app::run(
        args,
        &config,
        &SystemCommand,
        &TerminalPrompt,
        &mut stdout,
        now,
    )
    .await?;

    if let app::Outcome::Written(path) = outcome {
        debug!("migration file: {}", path.display());
    }
    Ok(())
}
