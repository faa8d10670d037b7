use std::path::PathBuf;

use clap::Parser;

/// Generate SQL to sync production schema with development.
#[derive(Parser, Debug, Clone)]
#[command(name = "schemasync", version, about, long_about = None)]
pub struct Args {
    /// Development database host
    #[arg(long, default_value = "localhost")]
    pub dev_host: String,

    /// Development database port
    #[arg(long, default_value = "5432")]
    pub dev_port: String,

    /// Development database name
    #[arg(long)]
    pub dev_db: String,

    /// Development database username
    #[arg(long)]
    pub dev_user: String,

    /// Development database password (prompted when omitted)
    #[arg(long, env = "SCHEMASYNC_DEV_PASSWORD", hide_env_values = true)]
    pub dev_password: Option<String>,

    /// Production database host
    #[arg(long)]
    pub prod_host: String,

    /// Production database port
    #[arg(long, default_value = "5432")]
    pub prod_port: String,

    /// Production database name
    #[arg(long)]
    pub prod_db: String,

    /// Production database username
    #[arg(long)]
    pub prod_user: String,

    /// Production database password (prompted when omitted)
    #[arg(long, env = "SCHEMASYNC_PROD_PASSWORD", hide_env_values = true)]
    pub prod_password: Option<String>,

    /// Output file for migration SQL
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Include privilege changes
    #[arg(long)]
    pub with_privileges: bool,

    /// Show migration SQL without saving
    #[arg(long)]
    pub dry_run: bool,

    /// Schema diff program to run (defaults to the config file, then `migra`)
    #[arg(long, env = "SCHEMASYNC_TOOL")]
    pub tool: Option<String>,

    /// Fail instead of installing the diff tool when it is missing
    #[arg(long)]
    pub no_install: bool,

    /// Config file (YAML or TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,
}
