use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("tool installation failed: {0}")]
    ToolInstall(String),

    #[error("diff tool failed ({}): {stderr}", describe_exit(.code))]
    ToolExecution { code: Option<i32>, stderr: String },

    #[error("failed to write {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

/// Render a process exit code, `None` meaning the process was killed by a signal.
pub fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}
