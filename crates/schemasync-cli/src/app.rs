use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use chrono::{DateTime, Local};
use schemasync_common::Error;
use schemasync_config::AppConfig;
use schemasync_diff::{
    ConnectionTarget, DiffInvoker, ExternalCommand, MigrationWriter, TargetRole,
    ToolAvailability, default_file_name,
};
use tracing::debug;

use crate::args::Args;
use crate::banner::{print_banner, print_preview};
use crate::credentials::{CredentialProvider, dev_password_label, prod_password_label};

/// How a successful run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The tool reported no differences; nothing was written.
    InSync,
    /// Dry run: SQL printed, nothing written.
    Previewed,
    /// Migration file written to this path.
    Written(PathBuf),
}

/// Run the whole sync: make sure the tool exists, collect passwords, diff,
/// then print or persist the result.
///
/// `now` is the invocation time used for the default file name.
pub async fn run(
    args: &Args,
    config: &AppConfig,
    command: &dyn ExternalCommand,
    credentials: &dyn CredentialProvider,
    out: &mut dyn Write,
    now: DateTime<Local>,
) -> Result<Outcome> {
    let mut tool = config.tool.clone();
    if let Some(program) = &args.tool {
        tool.program = program.clone();
    }

    let availability = ToolAvailability::new(command, &tool);
    ensure_tool(&availability, !args.no_install, out).await?;

    // An empty flag value counts as missing and is prompted for.
    let dev_password = match supplied(&args.dev_password) {
        Some(password) => Some(password),
        None => credentials.secret(&dev_password_label(&args.dev_user))?,
    };
    let prod_password = match supplied(&args.prod_password) {
        Some(password) => Some(password),
        None => credentials.secret(&prod_password_label(&args.prod_user))?,
    };

    let reference = ConnectionTarget::new(
        TargetRole::Development,
        &args.dev_host,
        &args.dev_port,
        &args.dev_db,
        &args.dev_user,
        dev_password,
    );
    let comparison = ConnectionTarget::new(
        TargetRole::Production,
        &args.prod_host,
        &args.prod_port,
        &args.prod_db,
        &args.prod_user,
        prod_password,
    );

    print_banner(out, &reference, &comparison)?;

    let output_path = output_path(args, config, now);
    debug!("output path: {output_path:?}");

    writeln!(out, "Running: {} [PROD_URL] [DEV_URL]", tool.program)?;
    let artifact = DiffInvoker::new(command, &tool.program)
        .diff(&reference, &comparison, args.with_privileges)
        .await?;

    let Some(artifact) = artifact else {
        writeln!(out, "✓ No differences found! Schemas are already in sync.")?;
        writeln!(out)?;
        writeln!(out, "✓ Schema comparison completed!")?;
        return Ok(Outcome::InSync);
    };

    if let Some(path) = &output_path {
        MigrationWriter::write(&artifact, path)?;
        writeln!(out, "✓ Migration SQL saved to: {}", path.display())?;
    }

    print_preview(out, &artifact.sql)?;

    let outcome = match output_path {
        Some(path) => {
            writeln!(out)?;
            writeln!(
                out,
                "⚠️  IMPORTANT: Review the generated SQL in '{}' before running it on production!",
                path.display()
            )?;
            writeln!(out, "   This SQL will modify your production database schema.")?;
            Outcome::Written(path)
        }
        None => {
            writeln!(out)?;
            writeln!(
                out,
                "💡 This was a dry run. Use --output to save the migration SQL to a file."
            )?;
            Outcome::Previewed
        }
    };

    writeln!(out)?;
    writeln!(out, "✓ Schema comparison completed!")?;
    Ok(outcome)
}

fn supplied(password: &Option<String>) -> Option<String> {
    password.clone().filter(|p| !p.is_empty())
}

async fn ensure_tool(
    availability: &ToolAvailability<'_>,
    allow_install: bool,
    out: &mut dyn Write,
) -> Result<()> {
    let program = availability.program();
    if availability.probe().await {
        writeln!(out, "✓ {program} is already installed")?;
        return Ok(());
    }

    if !allow_install {
        return Err(Error::ToolInstall(format!(
            "{program} not found and installation is disabled"
        ))
        .into());
    }

    writeln!(out, "Installing {program}...")?;
    availability.install().await?;
    writeln!(out, "✓ {program} installed successfully")?;
    Ok(())
}

/// Where the migration goes: nowhere on a dry run, `--output` when given,
/// otherwise a timestamped name in the configured output directory.
fn output_path(args: &Args, config: &AppConfig, now: DateTime<Local>) -> Option<PathBuf> {
    if args.dry_run {
        return None;
    }
    if let Some(path) = &args.output {
        return Some(path.clone());
    }

    let name = default_file_name(now);
    Some(match &config.output_dir {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    })
}
