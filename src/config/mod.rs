// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for sfpub.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. sfpub.toml (cwd)
//! 3. --config files
//! 4. SFPUB_* env vars
//! ```
//!
//! # Environment Variable Mapping
//!
//! Section and key are separated by a double underscore so multi-word keys
//! map unambiguously:
//!
//! ```text
//! SFPUB_GLOBAL__DRY=true                       → global.dry = true
//! SFPUB_PIPELINE__PROJECT_ROOT=/repo           → pipeline.project_root = "/repo"
//! SFPUB_PIPELINE__SKIP_EXISTING_WORK=false     → pipeline.skip_existing_work = false
//! SFPUB_REMOTE__TOKEN=...                      → remote.token = "..."
//! ```

pub mod loader;
pub mod types;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use types::{GlobalConfig, PipelineConfig, RemoteConfig, ToolsConfig, WatchConfig};

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Pipeline behavior.
    pub pipeline: PipelineConfig,
    /// External tool commands.
    pub tools: ToolsConfig,
    /// Remote repository settings (setup command).
    pub remote: RemoteConfig,
    /// Change-watcher settings.
    pub watch: WatchConfig,
}

impl Config {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match
    /// the `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Validate that all keys required before any pipeline work are present.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError::MissingKey`] for the first empty required
    /// path. This aborts the whole run; no stage is allowed to start with an
    /// incomplete configuration.
    pub fn validate(&self) -> Result<()> {
        let required: [(&str, &PathBuf); 2] = [
            ("download_root", &self.pipeline.download_root),
            ("project_root", &self.pipeline.project_root),
        ];
        for (key, path) in required {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::MissingKey {
                    section: "pipeline".to_string(),
                    key: key.to_string(),
                }
                .into());
            }
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Sensitive fields (the remote token) are hidden with a `[hidden]`
    /// marker. Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_pipeline_options(&mut options);
        self.format_tools_options(&mut options);
        self.format_remote_options(&mut options);
        self.format_watch_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("global.dry".into(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
    }

    fn format_pipeline_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "pipeline.skip_existing_work".into(),
            self.pipeline.skip_existing_work.to_string(),
        );
        options.insert(
            "pipeline.download_root".into(),
            self.pipeline.download_root.display().to_string(),
        );
        options.insert(
            "pipeline.project_root".into(),
            self.pipeline.project_root.display().to_string(),
        );
        options.insert(
            "pipeline.auto_create_pull_request".into(),
            self.pipeline.auto_create_pull_request.to_string(),
        );
        options.insert(
            "pipeline.autofill_pull_request_details".into(),
            self.pipeline.autofill_pull_request_details.to_string(),
        );
        options.insert(
            "pipeline.merge_into_project".into(),
            self.pipeline.merge_into_project.to_string(),
        );
    }

    fn format_tools_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("tools.git".into(), self.tools.git.display().to_string());
        options.insert(
            "tools.retrieve".into(),
            self.tools.retrieve.display().to_string(),
        );
        options.insert(
            "tools.hosting".into(),
            self.tools.hosting.display().to_string(),
        );
    }

    fn format_remote_options(&self, options: &mut BTreeMap<String, String>) {
        if !self.remote.url.is_empty() {
            options.insert("remote.url".into(), self.remote.url.clone());
        }
        if !self.remote.username.is_empty() {
            options.insert("remote.username".into(), self.remote.username.clone());
        }
        if !self.remote.token.is_empty() {
            options.insert("remote.token".into(), "[hidden]".into());
        }
    }

    fn format_watch_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("watch.suffixes".into(), self.watch.suffixes.join(" "));
    }
}
