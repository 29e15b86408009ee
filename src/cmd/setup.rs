// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `setup` subcommand: clones the configured remote into the project root.

use tracing::{info, warn};

use crate::config::Config;
use crate::core::process::{CommandLine, CommandRunner, ShellRunner, sh_quote};
use crate::error::{ConfigError, GitError, Result};
use crate::git::AuthenticatedUrl;

use super::ensure_tool_available;

/// Clones the remote repository into the project root.
///
/// A project root that already holds content is left alone; setup is only
/// for bootstrapping an empty workspace.
///
/// # Errors
///
/// Returns an error when the remote is not configured, the URL cannot
/// carry credentials, or the clone fails.
pub async fn run_setup_command(config: &Config) -> Result<()> {
    let project_root = &config.pipeline.project_root;
    if project_root.is_dir()
        && std::fs::read_dir(project_root)?.next().is_some()
    {
        warn!(
            project_root = %project_root.display(),
            "project root is not empty, skipping clone"
        );
        return Ok(());
    }

    if config.remote.url.is_empty() {
        return Err(ConfigError::MissingKey {
            section: "remote".to_string(),
            key: "url".to_string(),
        }
        .into());
    }

    let auth =
        AuthenticatedUrl::with_credentials(&config.remote.url, &config.remote.username, &config.remote.token)?;

    let git = config.tools.git.display();
    let dest = sh_quote(&project_root.to_string_lossy());
    // The credentialed URL must never reach a log line; the command is
    // logged in its masked form instead.
    let cmd = CommandLine::raw(format!("{git} clone {} {dest}", sh_quote(auth.url())))
        .name("git")
        .suppress_log(true)
        .logged_as(format!("{git} clone {} {dest}", sh_quote(auth.masked())));

    if config.global.dry {
        info!(cmd = %cmd.display_line(), "dry run: would clone");
        return Ok(());
    }

    ensure_tool_available(&config.tools.git)?;
    info!(cmd = %cmd.display_line(), "cloning remote");
    let result = ShellRunner::new().run(&cmd).await?;
    if !result.success() {
        return Err(GitError::CommandFailed {
            command: cmd.display_line().to_string(),
            message: format!("exit code {}", result.exit_code()),
        }
        .into());
    }

    info!(project_root = %project_root.display(), "clone finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::run_setup_command;
    use crate::config::Config;

    #[tokio::test]
    async fn test_non_empty_project_root_skips_clone() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("existing.txt"), "content").unwrap();

        let mut config = Config::default();
        config.pipeline.project_root = temp.path().to_path_buf();
        // No remote configured; the skip must win before that is checked.
        assert!(run_setup_command(&config).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_never_spawns_the_clone() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.global.dry = true;
        config.pipeline.project_root = temp.path().join("fresh");
        config.remote.url = "https://unreachable.invalid/org/repo.git".to_string();
        config.remote.username = "bot".to_string();
        config.remote.token = "t0k3n".to_string();

        assert!(run_setup_command(&config).await.is_ok());
        // Nothing was cloned.
        assert!(!config.pipeline.project_root.exists());
    }

    #[tokio::test]
    async fn test_missing_remote_url_is_an_error() {
        let temp = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.pipeline.project_root = temp.path().join("fresh");

        let err = run_setup_command(&config).await.unwrap_err();
        assert!(err.to_string().contains("remote"));
    }
}
