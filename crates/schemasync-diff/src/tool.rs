use schemasync_common::{Error, Result, error::describe_exit};
use schemasync_config::ToolConfig;
use tracing::{debug, info};

use crate::command::ExternalCommand;

/// Checks that the diff tool can be executed and installs it on demand.
pub struct ToolAvailability<'a> {
    command: &'a dyn ExternalCommand,
    config: &'a ToolConfig,
}

impl<'a> ToolAvailability<'a> {
    pub fn new(command: &'a dyn ExternalCommand, config: &'a ToolConfig) -> Self {
        Self { command, config }
    }

    pub fn program(&self) -> &str {
        &self.config.program
    }

    /// Whether `<tool> --help` spawns and exits cleanly.
    pub async fn probe(&self) -> bool {
        let args = ["--help".to_string()];
        match self.command.run(&self.config.program, &args).await {
            Ok(output) => output.success(),
            Err(e) => {
                debug!("{} not runnable: {e}", self.config.program);
                false
            }
        }
    }

    /// Run the configured install command, then check the tool again.
    pub async fn install(&self) -> Result<()> {
        let install = &self.config.install;
        info!(
            "installing {}: {} {}",
            self.config.program,
            install.program,
            install.args.join(" ")
        );

        let output = self
            .command
            .run(&install.program, &install.args)
            .await
            .map_err(|e| Error::ToolInstall(format!("failed to spawn {}: {e}", install.program)))?;

        if !output.success() {
            return Err(Error::ToolInstall(format!(
                "{} exited with {}: {}",
                install.program,
                describe_exit(&output.code),
                output.stderr.trim()
            )));
        }

        if !self.probe().await {
            return Err(Error::ToolInstall(format!(
                "{} is still not runnable after installation",
                self.config.program
            )));
        }

        Ok(())
    }
}
