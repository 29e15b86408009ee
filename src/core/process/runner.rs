// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution and output capture.
//!
//! ```text
//! ShellRunner::run(&CommandLine)
//!              |
//!              v
//!     /bin/sh -c (pwsh on Windows)
//!              |
//!      stdout/stderr reader tasks
//!      one mpsc channel, arrival order
//!      lines forwarded to tracing unless suppressed
//!              |
//!              v
//!     CommandResult { exit_code, output }
//! ```
//!
//! A non-zero exit resolves to `Ok(CommandResult)`. Only spawn and stream
//! failures are errors.

use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

use crate::error::{ProcessError, Result};

use super::command::{CommandLine, CommandResult};

/// Executes external command lines.
///
/// The trait seam exists so the pipeline can run against a scripted fake in
/// tests; production code uses [`ShellRunner`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Runs the command to completion and returns its exit code and
    /// combined output.
    ///
    /// # Errors
    ///
    /// Returns an error only if the process cannot be spawned or its output
    /// streams cannot be read. A non-zero exit code is returned as data.
    async fn run(&self, cmd: &CommandLine) -> Result<CommandResult>;
}

/// Runs commands through the system shell.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellRunner;

impl ShellRunner {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn build_command(cmd: &CommandLine) -> Command {
        #[cfg(windows)]
        let mut command = {
            let mut c = Command::new("pwsh");
            c.arg("-NoProfile").arg("-NonInteractive").arg("-Command");
            c.arg(cmd.command());
            c
        };
        #[cfg(not(windows))]
        let mut command = {
            let mut c = Command::new("/bin/sh");
            c.arg("-c").arg(cmd.command());
            c
        };

        if let Some(cwd) = cmd.working_dir() {
            command.current_dir(cwd);
        }
        command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        command
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, cmd: &CommandLine) -> Result<CommandResult> {
        let name = cmd.display_name().to_string();

        if !cmd.is_log_suppressed() {
            if let Some(cwd) = cmd.working_dir() {
                debug!(cwd = %cwd.display(), "cd");
            }
            debug!(cmd = %cmd.display_line(), "exec");
        }

        let mut command = Self::build_command(cmd);
        let mut child = command.spawn().map_err(|e| ProcessError::SpawnFailed {
            command: cmd.display_line().to_string(),
            source: e,
        })?;

        trace!(process = %name, pid = ?child.id(), "spawned");

        // Both streams feed one channel so the combined output preserves
        // arrival order.
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let stdout_handle = child
            .stdout
            .take()
            .map(|s| spawn_reader(s, tx.clone(), name.clone(), cmd.is_log_suppressed()));
        let stderr_handle = child
            .stderr
            .take()
            .map(|s| spawn_reader(s, tx, name.clone(), cmd.is_log_suppressed()));

        let status = child.wait().await.map_err(|e| ProcessError::OutputError {
            command: cmd.display_line().to_string(),
            message: e.to_string(),
        })?;

        if let Some(handle) = stdout_handle {
            let _ = handle.await;
        }
        if let Some(handle) = stderr_handle {
            let _ = handle.await;
        }

        let mut output = String::new();
        while let Ok(line) = rx.try_recv() {
            if !output.is_empty() {
                output.push('\n');
            }
            output.push_str(&line);
        }

        let exit_code = status.code().unwrap_or(-1);
        if !cmd.is_log_suppressed() {
            trace!(process = %name, exit_code, "completed");
        }

        Ok(CommandResult::new(exit_code, output))
    }
}

/// Reads a stream line by line, forwarding to the log sink and the capture
/// channel.
fn spawn_reader<R>(
    reader: R,
    tx: mpsc::UnboundedSender<String>,
    process_name: String,
    suppress_log: bool,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut lines = BufReader::new(reader).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if !suppress_log {
                        trace!(process = %process_name, line = %line, "output");
                    }
                    let _ = tx.send(line);
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(process = %process_name, error = %e, "error reading stream");
                    break;
                }
            }
        }
    })
}

/// Deterministic runner for tests: records every command line it receives
/// and answers from a caller-supplied script.
pub struct ScriptedRunner {
    calls: std::sync::Mutex<Vec<String>>,
    script: Box<dyn Fn(&str) -> CommandResult + Send + Sync>,
}

impl ScriptedRunner {
    /// Creates a runner answering each command with `script(command_line)`.
    pub fn new(script: impl Fn(&str) -> CommandResult + Send + Sync + 'static) -> Self {
        Self {
            calls: std::sync::Mutex::new(Vec::new()),
            script: Box::new(script),
        }
    }

    /// Creates a runner that reports success with empty output for every
    /// command.
    #[must_use]
    pub fn ok() -> Self {
        Self::new(|_| CommandResult::new(0, String::new()))
    }

    /// Returns the command lines received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, cmd: &CommandLine) -> Result<CommandResult> {
        self.calls
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(cmd.command().to_string());
        Ok((self.script)(cmd.command()))
    }
}
