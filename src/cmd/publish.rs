// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! `publish` and `batch` subcommands.

use dialoguer::Input;
use std::sync::Arc;
use tracing::info;

use crate::cli::{BatchArgs, PublishArgs};
use crate::config::Config;
use crate::core::process::ShellRunner;
use crate::error::{Result, bail_out};
use crate::pipeline::{Pipeline, UnitOutcome, WorkUnit, read_batch_file};
use crate::watch::{FsEventWatcher, SuffixFilter};

use super::ensure_tool_available;

/// Publishes a single change set or manifest.
///
/// # Errors
///
/// Returns an error on configuration or infrastructure problems, and a
/// bail when the unit itself failed, so the process exits non-zero.
pub async fn run_publish_command(config: &Config, args: &PublishArgs) -> Result<()> {
    let (unit, message) = build_unit(args)?;
    run_units(config, &[unit], message).await
}

/// Publishes every change set named in a batch file.
///
/// # Errors
///
/// Returns an error if the batch file is unreadable; unit failures are
/// collected and reported as one bail at the end.
pub async fn run_batch_command(config: &Config, args: &BatchArgs) -> Result<()> {
    let units = read_batch_file(&args.file)?;
    if units.is_empty() {
        info!(file = %args.file.display(), "batch file holds no units, nothing to do");
        return Ok(());
    }
    run_units(config, &units, None).await
}

fn build_unit(args: &PublishArgs) -> Result<(WorkUnit, Option<String>)> {
    if let Some(manifest) = &args.manifest {
        let label = match &args.label {
            Some(label) => label.clone(),
            None => manifest
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .ok_or_else(|| bail_out("manifest path has no file name to derive a label from"))?,
        };
        // A manifest carries no change set description, so the commit
        // message must come from the operator.
        let message = match &args.message {
            Some(message) => message.clone(),
            None => Input::new()
                .with_prompt("Commit message")
                .interact_text()
                .map_err(|e| bail_out(format!("failed to read commit message: {e}")))?,
        };
        return Ok((WorkUnit::manifest(label, manifest), Some(message)));
    }

    let Some(label) = &args.label else {
        return Err(bail_out("a change set label or a manifest file is required").into());
    };
    Ok((WorkUnit::changeset(label), args.message.clone()))
}

async fn run_units(config: &Config, units: &[WorkUnit], message: Option<String>) -> Result<()> {
    if config.global.dry {
        for unit in units {
            info!(
                label = %unit.label(),
                branch = %unit.branch_name(),
                "dry run: would retrieve, commit and push"
            );
        }
        return Ok(());
    }

    ensure_tool_available(&config.tools.git)?;
    ensure_tool_available(&config.tools.retrieve)?;
    if config.pipeline.auto_create_pull_request {
        ensure_tool_available(&config.tools.hosting)?;
    }

    let runner = Arc::new(ShellRunner::new());
    let mut watcher = FsEventWatcher::new(SuffixFilter::new(config.watch.suffixes.clone()));
    let pipeline = Pipeline::new(config, runner).with_commit_message(message);

    let outcomes = pipeline.run(&mut watcher, units).await?;
    report(&outcomes);

    let failed = outcomes.iter().filter(|o| !o.succeeded()).count();
    if failed > 0 {
        return Err(bail_out(format!(
            "{failed} of {} unit(s) failed",
            outcomes.len()
        ))
        .into());
    }
    Ok(())
}

fn report(outcomes: &[UnitOutcome]) {
    for outcome in outcomes {
        let status = if outcome.skipped {
            "skipped".to_string()
        } else if let Some(error) = &outcome.error {
            format!("failed at {}: {error}", outcome.state)
        } else {
            outcome.state.to_string()
        };
        println!("{:<40} {status}", outcome.label);
        if let Some(url) = &outcome.pr_url {
            println!("{:<40} {url}", "");
        }
    }
}
