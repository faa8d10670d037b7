//! Test doubles for [`ExternalCommand`], shared with downstream crates through
//! the `testing` feature.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::command::{CommandOutput, ExternalCommand};

/// Replays queued results in order and records every invocation.
#[derive(Default)]
pub struct FakeCommand {
    responses: Mutex<VecDeque<std::io::Result<CommandOutput>>>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl FakeCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn then(self, response: std::io::Result<CommandOutput>) -> Self {
        self.responses.lock().unwrap().push_back(response);
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExternalCommand for FakeCommand {
    async fn run(&self, program: &str, args: &[String]) -> std::io::Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected call to {program}"))
    }
}

pub fn exited(code: i32, stdout: &str, stderr: &str) -> std::io::Result<CommandOutput> {
    exited_with_bytes(code, stdout.as_bytes(), stderr)
}

pub fn exited_with_bytes(
    code: i32,
    stdout: &[u8],
    stderr: &str,
) -> std::io::Result<CommandOutput> {
    Ok(CommandOutput {
        stdout: stdout.to_vec(),
        stderr: stderr.to_string(),
        code: Some(code),
    })
}

pub fn not_found() -> std::io::Result<CommandOutput> {
    Err(std::io::Error::new(
        std::io::ErrorKind::NotFound,
        "No such file or directory",
    ))
}
