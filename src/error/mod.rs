// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!              PubError (~24 bytes)
//!                     |
//!      +---------+----+----+---------+
//!      |         |         |         |
//!      v         v         v         v
//!    Bail      Config    Process   Git / Retrieve / Io
//!              Box       Box       Box
//!
//! Sub-errors (unboxed internally):
//!   Config    MissingKey, InvalidValue
//!   Process   ExecutableNotFound, SpawnFailed, OutputError
//!   Git       CommandFailed, InvalidBranchName, InvalidRemoteUrl
//!   Retrieve  ManifestNotFound, ManifestUnreadable, MissingDescription
//!
//! External tool failures (non-zero exits) are NOT errors: they travel as
//! `CommandResult`/`RetrievalResult` data so the batch can continue.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`PubError`].
pub type PubResult<T> = std::result::Result<T, PubError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum PubError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Process execution error.
    #[error("process error: {0}")]
    Process(#[from] Box<ProcessError>),

    /// Git operation failed.
    #[error("git error: {0}")]
    Git(#[from] Box<GitError>),

    /// Metadata retrieval error.
    #[error("retrieve error: {0}")]
    Retrieve(#[from] Box<RetrieveError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),
}

/// Create a fatal [`PubError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> PubError {
    PubError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for PubError {
                fn from(err: $error) -> Self {
                    PubError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    ProcessError => Process,
    GitError => Git,
    RetrieveError => Retrieve,
    std::io::Error => Io,
}

// --- Config Errors ---

/// Configuration-related errors.
///
/// All of these are fatal to the whole run: they are detected before any
/// pipeline work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
///
/// A non-zero exit code is deliberately absent here: failing external
/// commands are reported as `CommandResult` values, not errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read process output.
    #[error("failed to read output from process '{command}': {message}")]
    OutputError { command: String, message: String },
}

// --- Git Errors ---

/// Git operation errors.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// A label produced an empty branch name.
    #[error("label '{label}' derives to an empty branch name")]
    InvalidBranchName { label: String },

    /// Remote URL has no recognized scheme for credential injection.
    #[error("cannot inject credentials into remote url: {url}")]
    InvalidRemoteUrl { url: String },
}

// --- Retrieve Errors ---

/// Metadata retrieval errors.
///
/// `MissingDescription` is a data-quality condition: the retrieval tool
/// itself succeeded, but the retrieved manifest cannot drive a commit.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// No manifest found in the retrieved content.
    #[error("no manifest (package.xml) found under {path}")]
    ManifestNotFound { path: String },

    /// Manifest exists but could not be read.
    #[error("failed to read manifest '{path}': {message}")]
    ManifestUnreadable { path: String, message: String },

    /// Manifest has no description to derive the commit message from.
    #[error("retrieved manifest for '{label}' has no description")]
    MissingDescription { label: String },
}

#[cfg(test)]
mod tests;
