use std::process::Stdio;

use async_trait::async_trait;
use tracing::debug;

/// Captured result of one finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Raw bytes; decoding is left to the caller once the exit status is known.
    pub stdout: Vec<u8>,
    pub stderr: String,
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a program with arguments and captures its output.
///
/// Spawn failures (missing binary, permissions) are returned as `Err`; a
/// process that ran and exited non-zero is an `Ok` with a non-zero `code`.
#[async_trait]
pub trait ExternalCommand: Send + Sync {
    async fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput>;
}

/// Spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemCommand;

#[async_trait]
impl ExternalCommand for SystemCommand {
    async fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        debug!("spawning {program} with {} args", args.len());

        let output = tokio::process::Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .await?;

        Ok(CommandOutput {
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            code: output.status.code(),
        })
    }
}
