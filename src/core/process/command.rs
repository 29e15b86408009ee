// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command line description and result types.
//!
//! ```text
//! CommandLine
//!  • raw (shell-interpreting: the caller-built string is not re-escaped)
//!  • cwd / name / suppress_log / logged_as
//!
//! CommandResult { exit_code, output }
//!  exit_code == 0 is the sole success signal; stages must never infer
//!  success from output text.
//! ```

use std::path::{Path, PathBuf};

/// Outcome of one external command invocation.
///
/// Combined stdout and stderr, in arrival order. Non-zero exit codes are a
/// normal, reportable outcome, not an error.
#[derive(Debug, Clone, Default)]
pub struct CommandResult {
    exit_code: i32,
    output: String,
}

impl CommandResult {
    #[must_use]
    pub const fn new(exit_code: i32, output: String) -> Self {
        Self { exit_code, output }
    }

    /// Returns the process exit code (0 = success).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Returns the combined stdout/stderr text.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Returns true if the command exited with code 0.
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// A shell-interpreted command line to execute.
///
/// The command text is passed to the shell verbatim; callers quote their own
/// arguments with [`sh_quote`].
#[derive(Debug, Clone)]
pub struct CommandLine {
    command: String,
    cwd: Option<PathBuf>,
    name: Option<String>,
    suppress_log: bool,
    logged_as: Option<String>,
}

impl CommandLine {
    /// Creates a command from a raw shell string.
    pub fn raw(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            cwd: None,
            name: None,
            suppress_log: false,
            logged_as: None,
        }
    }

    /// Sets the working directory for the command.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sets a display name for logging.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Suppresses live logging of the command and its output chunks.
    ///
    /// Used when the working directory is mid-transition (a repository
    /// clone) and per-chunk logging would be misleading.
    #[must_use]
    pub const fn suppress_log(mut self, suppress: bool) -> Self {
        self.suppress_log = suppress;
        self
    }

    /// Sets the text written to logs in place of the real command line.
    ///
    /// Masking must happen here, before any log write; the raw command may
    /// carry an injected credential.
    #[must_use]
    pub fn logged_as(mut self, masked: impl Into<String>) -> Self {
        self.logged_as = Some(masked.into());
        self
    }

    /// Returns the raw shell command text.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns the working directory, if set.
    #[must_use]
    pub fn working_dir(&self) -> Option<&Path> {
        self.cwd.as_deref()
    }

    /// Returns whether live logging is suppressed.
    #[must_use]
    pub const fn is_log_suppressed(&self) -> bool {
        self.suppress_log
    }

    /// Returns the display name for this command.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name.as_deref().map_or_else(
            || {
                self.command
                    .split_whitespace()
                    .next()
                    .unwrap_or("command")
            },
            |n| n,
        )
    }

    /// Returns the command line as it may appear in logs.
    #[must_use]
    pub fn display_line(&self) -> &str {
        self.logged_as.as_deref().unwrap_or(&self.command)
    }
}

/// Quotes a string for safe inclusion in a shell command line.
///
/// Single-quotes the value and escapes embedded single quotes.
#[must_use]
pub fn sh_quote(value: &str) -> String {
    if !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '/' | ':'))
    {
        return value.to_string();
    }
    format!("'{}'", value.replace('\'', r"'\''"))
}
