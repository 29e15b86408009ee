// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Staging, committing, pushing and pull-request submission.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::core::process::{CommandLine, CommandResult, CommandRunner, sh_quote};
use crate::error::Result;
use crate::git::branch::derive_branch_name;

/// Stages each path individually with `git add -- <path>`.
///
/// Staging stops at the first failing path and its result is returned, so
/// the caller sees which file git rejected. An empty set stages nothing and
/// reports success.
///
/// # Errors
///
/// Returns an error if git cannot be executed.
pub async fn stage_files(
    runner: &dyn CommandRunner,
    git: &str,
    project_root: &Path,
    paths: &BTreeSet<PathBuf>,
) -> Result<CommandResult> {
    for path in paths {
        let cmd = CommandLine::raw(format!(
            "{git} add -- {}",
            sh_quote(&path.to_string_lossy())
        ))
        .cwd(project_root)
        .name("git");
        let result = runner.run(&cmd).await?;
        if !result.success() {
            return Ok(result);
        }
        debug!(path = %path.display(), "staged");
    }
    Ok(CommandResult::new(0, String::new()))
}

/// Commits the staged work with the given message.
///
/// # Errors
///
/// Returns an error if git cannot be executed.
pub async fn commit(
    runner: &dyn CommandRunner,
    git: &str,
    project_root: &Path,
    message: &str,
) -> Result<CommandResult> {
    let cmd = CommandLine::raw(format!("{git} commit -a -m {}", sh_quote(message)))
        .cwd(project_root)
        .name("git");
    runner.run(&cmd).await
}

/// Pushes the branch, setting its upstream so later pushes need no
/// arguments.
///
/// # Errors
///
/// Returns an error if git cannot be executed.
pub async fn push(
    runner: &dyn CommandRunner,
    git: &str,
    project_root: &Path,
    branch: &str,
) -> Result<CommandResult> {
    info!(branch = %branch, "pushing");
    let cmd = CommandLine::raw(format!(
        "{git} push --set-upstream origin {}",
        sh_quote(branch)
    ))
    .cwd(project_root)
    .name("git");
    runner.run(&cmd).await
}

/// Opens a pull request for the unit's branch through the hosting CLI.
///
/// With an explicit title and body those are passed through; otherwise the
/// hosting tool fills the details from the branch's commits (`--fill`).
///
/// # Errors
///
/// Returns an error if the hosting tool cannot be executed.
pub async fn submit_pull_request(
    runner: &dyn CommandRunner,
    hosting: &str,
    project_root: &Path,
    label: &str,
    title: Option<&str>,
    body: Option<&str>,
) -> Result<CommandResult> {
    let branch = derive_branch_name(label);
    let mut line = format!("{hosting} pr create --head {}", sh_quote(&branch));
    match (title, body) {
        (Some(title), Some(body)) => {
            line.push_str(&format!(
                " --title {} --body {}",
                sh_quote(title),
                sh_quote(body)
            ));
        }
        _ => line.push_str(" --fill"),
    }

    info!(branch = %branch, "submitting pull request");
    let cmd = CommandLine::raw(line).cwd(project_root).name("hosting");
    runner.run(&cmd).await
}

/// Pulls the first URL out of a tool's output, if any.
///
/// Hosting CLIs print the created pull request's address somewhere in their
/// output; the exact surrounding text varies by tool and version.
#[must_use]
pub fn extract_url(output: &str) -> Option<String> {
    for scheme in ["https://", "http://"] {
        if let Some(start) = output.find(scheme) {
            let tail = &output[start..];
            let end = tail
                .find(char::is_whitespace)
                .unwrap_or(tail.len());
            return Some(tail[..end].to_string());
        }
    }
    None
}
