use chrono::{DateTime, Local};
use schemasync_common::{Error, Result};
use tracing::{debug, info};

use crate::command::ExternalCommand;
use crate::target::{ConnectionTarget, TargetRole};

pub const WITH_PRIVILEGES_FLAG: &str = "--with-privileges";

/// SQL produced by one diff run.
#[derive(Debug, Clone, PartialEq)]
pub struct MigrationArtifact {
    pub sql: String,
    /// Role of the reference schema (the desired shape).
    pub source: TargetRole,
    /// Role of the schema the SQL is meant to run against.
    pub target: TargetRole,
    pub generated_at: DateTime<Local>,
}

/// Runs the external diff tool against two databases.
pub struct DiffInvoker<'a> {
    command: &'a dyn ExternalCommand,
    program: &'a str,
}

impl<'a> DiffInvoker<'a> {
    pub fn new(command: &'a dyn ExternalCommand, program: &'a str) -> Self {
        Self { command, program }
    }

    /// Tool arguments: comparison first, reference second. The tool emits SQL
    /// that moves the first database toward the second.
    pub fn args(
        reference: &ConnectionTarget,
        comparison: &ConnectionTarget,
        with_privileges: bool,
    ) -> Vec<String> {
        let mut args = vec![comparison.url(), reference.url()];
        if with_privileges {
            args.push(WITH_PRIVILEGES_FLAG.to_string());
        }
        args
    }

    /// Compute the SQL that turns `comparison` into `reference`.
    ///
    /// `Ok(None)` means the schemas already match.
    pub async fn diff(
        &self,
        reference: &ConnectionTarget,
        comparison: &ConnectionTarget,
        with_privileges: bool,
    ) -> Result<Option<MigrationArtifact>> {
        let args = Self::args(reference, comparison, with_privileges);
        info!(
            "running {} {} {}{}",
            self.program,
            comparison.redacted_url(),
            reference.redacted_url(),
            if with_privileges { " --with-privileges" } else { "" }
        );

        let output = self
            .command
            .run(self.program, &args)
            .await
            .map_err(|e| Error::Unexpected(format!("failed to run {}: {e}", self.program)))?;

        if !output.success() {
            return Err(Error::ToolExecution {
                code: output.code,
                stderr: output.stderr.trim_end().to_string(),
            });
        }

        let sql = String::from_utf8(output.stdout).map_err(|e| {
            Error::Unexpected(format!("{} wrote non-UTF-8 output: {e}", self.program))
        })?;

        if sql.trim().is_empty() {
            debug!("{} produced no statements", self.program);
            return Ok(None);
        }

        Ok(Some(MigrationArtifact {
            sql,
            source: reference.role(),
            target: comparison.role(),
            generated_at: Local::now(),
        }))
    }
}
