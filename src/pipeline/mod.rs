// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Pipeline orchestrator: runs each work unit through the fixed stage
//! sequence and contains failures per unit.
//!
//! ```text
//! for unit in units (input order):
//!   ensure branch -> checkout -> retrieve -> stage -> commit -> push -> PR?
//!   any stage failing: record outcome, continue with next unit
//! ```
//!
//! A batch is best-effort: one broken change set must not block the rest
//! of the publishing run.

pub mod batch;

#[cfg(test)]
mod tests;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

use crate::config::Config;
use crate::core::process::{CommandResult, CommandRunner};
use crate::error::Result;
use crate::git;
use crate::retrieve::{RetrievalStage, manifest_description};
use crate::watch::ChangeWatcher;

pub use batch::read_batch_file;

/// What a work unit retrieves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkKind {
    /// A named change set defined in the org.
    Changeset,
    /// An explicit package manifest file.
    Manifest(PathBuf),
}

/// One publishable unit of work: a label plus how to retrieve it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkUnit {
    label: String,
    kind: WorkKind,
}

impl WorkUnit {
    #[must_use]
    pub fn changeset(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind: WorkKind::Changeset,
        }
    }

    #[must_use]
    pub fn manifest(label: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            label: label.into(),
            kind: WorkKind::Manifest(path.into()),
        }
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn kind(&self) -> &WorkKind {
        &self.kind
    }

    /// The branch this unit publishes to.
    #[must_use]
    pub fn branch_name(&self) -> String {
        git::derive_branch_name(&self.label)
    }
}

/// How far a unit got before finishing or failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StageState {
    NotStarted,
    BranchReady,
    CheckedOut,
    Retrieved,
    Staged,
    Committed,
    Pushed,
    PrSubmitted,
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::NotStarted => "not started",
            Self::BranchReady => "branch ready",
            Self::CheckedOut => "checked out",
            Self::Retrieved => "retrieved",
            Self::Staged => "staged",
            Self::Committed => "committed",
            Self::Pushed => "pushed",
            Self::PrSubmitted => "pull request submitted",
        };
        f.write_str(label)
    }
}

/// Result of running one unit through the pipeline.
#[derive(Debug, Clone)]
pub struct UnitOutcome {
    /// The unit's label.
    pub label: String,
    /// Last stage that completed.
    pub state: StageState,
    /// True when retrieval was skipped for existing work.
    pub skipped: bool,
    /// Failure description, if the unit did not finish.
    pub error: Option<String>,
    /// Pull request address, when one was submitted and reported.
    pub pr_url: Option<String>,
}

impl UnitOutcome {
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.error.is_none()
    }
}

struct StageFailure {
    state: StageState,
    message: String,
}

/// Drives work units through the stage sequence.
pub struct Pipeline<'a> {
    config: &'a Config,
    runner: Arc<dyn CommandRunner>,
    commit_message: Option<String>,
}

impl<'a> Pipeline<'a> {
    #[must_use]
    pub fn new(config: &'a Config, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            config,
            runner,
            commit_message: None,
        }
    }

    /// Overrides the commit message instead of deriving it from the
    /// retrieved manifest. Required for manifest units, whose package file
    /// carries no change set description.
    #[must_use]
    pub fn with_commit_message(mut self, message: Option<String>) -> Self {
        self.commit_message = message;
        self
    }

    /// Runs every unit, in input order, containing failures per unit.
    ///
    /// Never short-circuits: a failed unit is recorded and the next one
    /// starts fresh.
    ///
    /// # Errors
    ///
    /// Per-unit failures land in the outcomes, not here. This only fails
    /// on infrastructure errors that make continuing pointless, which the
    /// current stages never produce.
    pub async fn run(
        &self,
        watcher: &mut dyn ChangeWatcher,
        units: &[WorkUnit],
    ) -> Result<Vec<UnitOutcome>> {
        let mut outcomes = Vec::with_capacity(units.len());
        for unit in units {
            info!(label = %unit.label(), branch = %unit.branch_name(), "processing unit");
            let outcome = self.run_unit(watcher, unit).await;
            if let Some(message) = &outcome.error {
                error!(label = %unit.label(), state = %outcome.state, error = %message, "unit failed");
            } else {
                info!(label = %unit.label(), state = %outcome.state, "unit finished");
            }
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    async fn run_unit(&self, watcher: &mut dyn ChangeWatcher, unit: &WorkUnit) -> UnitOutcome {
        match self.drive_unit(watcher, unit).await {
            Ok(outcome) => outcome,
            Err(e) => UnitOutcome {
                label: unit.label().to_string(),
                state: StageState::NotStarted,
                skipped: false,
                error: Some(e.to_string()),
                pr_url: None,
            },
        }
    }

    async fn drive_unit(
        &self,
        watcher: &mut dyn ChangeWatcher,
        unit: &WorkUnit,
    ) -> Result<UnitOutcome> {
        let git_tool = self.config.tools.git.display().to_string();
        let project_root = &self.config.pipeline.project_root;
        let branch = unit.branch_name();
        if branch.is_empty() {
            return Err(crate::error::GitError::InvalidBranchName {
                label: unit.label().to_string(),
            }
            .into());
        }

        let mut outcome = UnitOutcome {
            label: unit.label().to_string(),
            state: StageState::NotStarted,
            skipped: false,
            error: None,
            pr_url: None,
        };

        let fail = |outcome: &mut UnitOutcome, failure: StageFailure| {
            outcome.state = failure.state;
            outcome.error = Some(failure.message);
        };

        // Branch lifecycle.
        let result = git::ensure_branch(&*self.runner, &git_tool, project_root, &branch).await?;
        if let Some(failure) = check(StageState::NotStarted, "branch creation", &result) {
            fail(&mut outcome, failure);
            return Ok(outcome);
        }
        outcome.state = StageState::BranchReady;

        let result = git::checkout(&*self.runner, &git_tool, project_root, &branch).await?;
        if let Some(failure) = check(StageState::BranchReady, "checkout", &result) {
            fail(&mut outcome, failure);
            return Ok(outcome);
        }
        outcome.state = StageState::CheckedOut;

        // Retrieval.
        let stage = RetrievalStage::new(self.config, Arc::clone(&self.runner));
        let retrieval = stage.retrieve(watcher, unit).await?;
        if retrieval.was_skipped() {
            outcome.state = StageState::Retrieved;
            outcome.skipped = true;
            return Ok(outcome);
        }
        if !retrieval.success() {
            fail(
                &mut outcome,
                StageFailure {
                    state: StageState::CheckedOut,
                    message: format!(
                        "retrieval exited with code {}: {}",
                        retrieval.exit_code(),
                        retrieval.output().trim()
                    ),
                },
            );
            return Ok(outcome);
        }
        outcome.state = StageState::Retrieved;

        // Publication.
        let result =
            git::stage_files(&*self.runner, &git_tool, project_root, retrieval.touched_files())
                .await?;
        if let Some(failure) = check(StageState::Retrieved, "staging", &result) {
            fail(&mut outcome, failure);
            return Ok(outcome);
        }
        outcome.state = StageState::Staged;

        let message = match self.commit_message(unit) {
            Ok(message) => message,
            Err(e) => {
                fail(
                    &mut outcome,
                    StageFailure {
                        state: StageState::Staged,
                        message: e.to_string(),
                    },
                );
                return Ok(outcome);
            }
        };

        let result = git::commit(&*self.runner, &git_tool, project_root, &message).await?;
        if let Some(failure) = check(StageState::Staged, "commit", &result) {
            fail(&mut outcome, failure);
            return Ok(outcome);
        }
        outcome.state = StageState::Committed;

        let result = git::push(&*self.runner, &git_tool, project_root, &branch).await?;
        if let Some(failure) = check(StageState::Committed, "push", &result) {
            fail(&mut outcome, failure);
            return Ok(outcome);
        }
        outcome.state = StageState::Pushed;

        if self.config.pipeline.auto_create_pull_request {
            let (title, body) = if self.config.pipeline.autofill_pull_request_details {
                (None, None)
            } else {
                (Some(unit.label()), Some(message.as_str()))
            };
            let hosting = self.config.tools.hosting.display().to_string();
            let result = git::submit_pull_request(
                &*self.runner,
                &hosting,
                project_root,
                unit.label(),
                title,
                body,
            )
            .await?;
            if let Some(failure) = check(StageState::Pushed, "pull request", &result) {
                fail(&mut outcome, failure);
                return Ok(outcome);
            }
            outcome.pr_url = git::extract_url(result.output());
            outcome.state = StageState::PrSubmitted;
        }

        Ok(outcome)
    }

    fn commit_message(&self, unit: &WorkUnit) -> Result<String> {
        if let Some(message) = &self.commit_message {
            return Ok(message.clone());
        }
        match unit.kind() {
            WorkKind::Changeset => {
                let dest = self.config.pipeline.download_root.join(unit.label());
                Ok(manifest_description(&dest, unit.label())?)
            }
            WorkKind::Manifest(_) => Err(anyhow::anyhow!(
                "manifest unit {:?} needs an explicit commit message",
                unit.label()
            )),
        }
    }
}

fn check(state: StageState, what: &str, result: &CommandResult) -> Option<StageFailure> {
    if result.success() {
        return None;
    }
    Some(StageFailure {
        state,
        message: format!(
            "{what} exited with code {}: {}",
            result.exit_code(),
            result.output().trim()
        ),
    })
}
