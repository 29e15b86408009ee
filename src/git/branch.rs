// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch naming and lifecycle.
//!
//! One work unit maps to one branch. The branch name is derived from the
//! unit's label by collapsing every whitespace run into a single hyphen, so
//! "My Change Set" and "My  Change  Set" land on the same branch.

use std::path::Path;
use tracing::{debug, info};

use crate::core::process::{CommandLine, CommandResult, CommandRunner, sh_quote};
use crate::error::Result;

/// Derives a branch name from a work unit label.
///
/// Splits on whitespace runs and rejoins with hyphens; leading and trailing
/// whitespace falls away. Idempotent: deriving from an already-derived name
/// returns it unchanged.
#[must_use]
pub fn derive_branch_name(label: &str) -> String {
    label.split_whitespace().collect::<Vec<_>>().join("-")
}

/// Reports whether a local branch with this name already exists.
///
/// # Errors
///
/// Returns an error if git cannot be executed.
pub async fn branch_exists(
    runner: &dyn CommandRunner,
    git: &str,
    project_root: &Path,
    name: &str,
) -> Result<bool> {
    let cmd = CommandLine::raw(format!(
        "{git} rev-parse --verify --quiet refs/heads/{}",
        sh_quote(name)
    ))
    .cwd(project_root)
    .name("git");
    Ok(runner.run(&cmd).await?.success())
}

/// Creates the branch for `name` if it does not exist yet.
///
/// A fresh branch is created with `checkout -b`, which also switches to it.
/// When the branch already exists nothing is run and a synthetic success is
/// returned, so a rerun of the same label lands on the prior branch.
///
/// # Errors
///
/// Returns an error if git cannot be executed.
pub async fn ensure_branch(
    runner: &dyn CommandRunner,
    git: &str,
    project_root: &Path,
    name: &str,
) -> Result<CommandResult> {
    if branch_exists(runner, git, project_root, name).await? {
        debug!(branch = %name, "branch already exists");
        return Ok(CommandResult::new(0, String::new()));
    }

    info!(branch = %name, "creating branch");
    let cmd = CommandLine::raw(format!("{git} checkout -b {}", sh_quote(name)))
        .cwd(project_root)
        .name("git");
    runner.run(&cmd).await
}

/// Switches the working tree to `name`.
///
/// # Errors
///
/// Returns an error if git cannot be executed.
pub async fn checkout(
    runner: &dyn CommandRunner,
    git: &str,
    project_root: &Path,
    name: &str,
) -> Result<CommandResult> {
    let cmd = CommandLine::raw(format!("{git} checkout {}", sh_quote(name)))
        .cwd(project_root)
        .name("git");
    runner.run(&cmd).await
}
