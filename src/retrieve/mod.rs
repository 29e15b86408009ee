// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Retrieval stage: pulls one work unit's metadata out of the org.
//!
//! ```text
//! RetrievalStage::retrieve(unit)
//!   skip check ------ destination exists + skip_existing_work
//!   watcher.start(download_root)
//!   run retrieval tool
//!   watcher.stop() -> touched files
//!   merge-copy into project tree (optional)
//!   normalize paths to project-root-relative
//! ```
//!
//! The watcher is stopped on every path, including when the tool itself
//! fails, so no watch leaks into the next unit.

pub mod manifest;


use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::core::process::{CommandLine, CommandRunner, sh_quote};
use crate::error::Result;
use crate::pipeline::{WorkKind, WorkUnit};
use crate::utility::fs::merge_copy_dir;
use crate::watch::ChangeWatcher;

pub use manifest::{find_manifest, manifest_description};

/// Outcome of one retrieval.
#[derive(Debug, Clone)]
pub struct RetrievalResult {
    exit_code: i32,
    output: String,
    touched_files: BTreeSet<PathBuf>,
    skipped: bool,
}

impl RetrievalResult {
    /// A unit skipped because its destination already exists.
    #[must_use]
    pub fn skipped() -> Self {
        Self {
            exit_code: 0,
            output: String::new(),
            touched_files: BTreeSet::new(),
            skipped: true,
        }
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Files the retrieval wrote, relative to the project root.
    #[must_use]
    pub const fn touched_files(&self) -> &BTreeSet<PathBuf> {
        &self.touched_files
    }

    #[must_use]
    pub const fn was_skipped(&self) -> bool {
        self.skipped
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Drives the retrieval tool for one work unit.
pub struct RetrievalStage<'a> {
    config: &'a Config,
    runner: Arc<dyn CommandRunner>,
}

impl<'a> RetrievalStage<'a> {
    #[must_use]
    pub fn new(config: &'a Config, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    /// Destination directory for a unit's downloaded metadata.
    #[must_use]
    pub fn destination(&self, unit: &WorkUnit) -> PathBuf {
        self.config.pipeline.download_root.join(unit.label())
    }

    fn build_command(&self, unit: &WorkUnit, dest: &Path) -> CommandLine {
        let tool = self.config.tools.retrieve.display();
        let label = unit.label();
        let line = match unit.kind() {
            WorkKind::Changeset => format!(
                "{tool} retrieve -p {} -r {} -u -n {}",
                sh_quote(label),
                sh_quote(&dest.to_string_lossy()),
                sh_quote(&format!("{label}.zip")),
            ),
            WorkKind::Manifest(path) => format!(
                "{tool} retrieve -p {} -r {} -u -n {} -k {}",
                sh_quote(label),
                sh_quote(&dest.to_string_lossy()),
                sh_quote(&format!("{label}.zip")),
                sh_quote(&path.to_string_lossy()),
            ),
        };
        CommandLine::raw(line)
            .cwd(&self.config.pipeline.project_root)
            .name("retrieve")
    }

    /// Runs the retrieval for one unit, observing which files it writes.
    ///
    /// When `skip_existing_work` is set and the destination directory
    /// already exists, the tool is not invoked at all and a skipped result
    /// with an empty touched set is returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the tool cannot be spawned or the watcher fails.
    /// A non-zero tool exit is data in the returned result.
    pub async fn retrieve(
        &self,
        watcher: &mut dyn ChangeWatcher,
        unit: &WorkUnit,
    ) -> Result<RetrievalResult> {
        let dest = self.destination(unit);

        if self.config.pipeline.skip_existing_work && dest.exists() {
            info!(
                label = %unit.label(),
                dest = %dest.display(),
                "destination already present, skipping retrieval"
            );
            return Ok(RetrievalResult::skipped());
        }

        let download_root = &self.config.pipeline.download_root;
        let cmd = self.build_command(unit, &dest);

        watcher.start(download_root)?;
        let run = self.runner.run(&cmd).await;
        // Stop before propagating a run error; a leaked watch would
        // misattribute the next unit's changes.
        let observed = watcher.stop()?;
        let result = run?;

        if result.success() && self.config.pipeline.merge_into_project && dest.is_dir() {
            debug!(
                from = %dest.display(),
                to = %self.config.pipeline.project_root.display(),
                "merging retrieved metadata into project tree"
            );
            merge_copy_dir(&dest, &self.config.pipeline.project_root).await?;
        } else if !result.success() {
            warn!(label = %unit.label(), exit_code = result.exit_code(), "retrieval failed");
        }

        let touched_files = self.normalize_paths(observed);
        info!(
            label = %unit.label(),
            files = touched_files.len(),
            "retrieval finished"
        );

        Ok(RetrievalResult {
            exit_code: result.exit_code(),
            output: result.output().to_string(),
            touched_files,
            skipped: false,
        })
    }

    /// Rewrites watcher paths (relative to the download root) into paths
    /// relative to the project root, matching where the files end up.
    ///
    /// In merge mode the leading `<label>/` component is dropped because
    /// the merge copy flattens it away. Otherwise the download root's own
    /// position under the project root is prepended.
    fn normalize_paths(&self, observed: BTreeSet<PathBuf>) -> BTreeSet<PathBuf> {
        let pipeline = &self.config.pipeline;
        observed
            .into_iter()
            .filter_map(|path| {
                if pipeline.merge_into_project {
                    let mut components = path.components();
                    match components.next() {
                        Some(Component::Normal(_)) => Some(components.as_path().to_path_buf()),
                        _ => None,
                    }
                    .filter(|p| !p.as_os_str().is_empty())
                } else {
                    let prefix = pipeline
                        .download_root
                        .strip_prefix(&pipeline.project_root)
                        .unwrap_or(&pipeline.download_root);
                    Some(prefix.join(path))
                }
            })
            .collect()
    }
}
