// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Batch input: a JSON array of change set labels.

use anyhow::Context as _;
use std::path::Path;
use tracing::debug;

use crate::error::Result;

use super::WorkUnit;

/// Reads a batch file into work units, preserving input order.
///
/// The file holds a JSON array of change set labels:
///
/// ```json
/// ["Change Set One", "Change Set Two"]
/// ```
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// strings.
pub fn read_batch_file(path: &Path) -> Result<Vec<WorkUnit>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read batch file {}", path.display()))?;
    let labels: Vec<String> = serde_json::from_str(&content)
        .with_context(|| format!("batch file {} is not a JSON array of labels", path.display()))?;

    debug!(path = %path.display(), units = labels.len(), "batch file loaded");
    Ok(labels.into_iter().map(WorkUnit::changeset).collect())
}
