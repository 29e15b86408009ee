// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for sfpub.
//!
//! ```text
//! Config: GlobalConfig, PipelineConfig, ToolsConfig, RemoteConfig, WatchConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalConfig {
    /// Log planned commands without invoking external tools.
    pub dry: bool,
    /// Log level for stdout output (0-5).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-5).
    pub file_log_level: LogLevel,
    /// Path to the audit-trail log file.
    pub log_file: PathBuf,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::from("sfpub.log"),
        }
    }
}

/// Pipeline behavior configuration.
///
/// Loaded once at startup and immutable for the run; every stage reads it
/// by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Skip retrieval when a download directory for the label already exists.
    pub skip_existing_work: bool,
    /// Directory the retrieval tool downloads into (one subdirectory per label).
    pub download_root: PathBuf,
    /// Root of the git working tree that receives the metadata.
    pub project_root: PathBuf,
    /// Submit a pull request after a successful push.
    pub auto_create_pull_request: bool,
    /// Let the hosting tool derive PR title/body from the commit history.
    pub autofill_pull_request_details: bool,
    /// Merge-copy retrieved content into the project tree after retrieval.
    pub merge_into_project: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            skip_existing_work: true,
            download_root: PathBuf::new(),
            project_root: PathBuf::new(),
            auto_create_pull_request: false,
            autofill_pull_request_details: true,
            merge_into_project: true,
        }
    }
}

/// External tool commands.
///
/// These are shell command names or absolute paths; all three are treated
/// as black-box executors returning an exit code and combined output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Git executable.
    pub git: PathBuf,
    /// Salesforce metadata-retrieval CLI.
    pub retrieve: PathBuf,
    /// Code-hosting CLI used for pull-request submission.
    pub hosting: PathBuf,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            git: PathBuf::from("git"),
            retrieve: PathBuf::from("sf"),
            hosting: PathBuf::from("gh"),
        }
    }
}

/// Remote repository settings used by the setup (clone) command.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RemoteConfig {
    /// HTTPS URL of the repository to clone.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
    /// Username injected into the clone URL.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub username: String,
    /// Access token injected into the clone URL. Never logged.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,
}

/// Change-watcher settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WatchConfig {
    /// File-name suffixes recognized as metadata. Anything else the
    /// retrieval tool writes (logs, archives) is ignored.
    pub suffixes: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            suffixes: [
                ".xml", ".cls", ".trigger", ".page", ".component", ".resource", ".app", ".object",
                ".labels", ".workflow", ".layout", ".js",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
        }
    }
}
