// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::Args;
use std::path::PathBuf;

/// Arguments for `sfpub publish`.
#[derive(Debug, Args)]
pub struct PublishArgs {
    /// Change set label to retrieve and publish.
    #[arg(value_name = "LABEL", required_unless_present = "manifest")]
    pub label: Option<String>,

    /// Retrieve from a package manifest instead of a change set.
    #[arg(short = 'k', long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,

    /// Commit message. Required with --manifest; otherwise the change
    /// set's description is used.
    #[arg(short, long, value_name = "MESSAGE")]
    pub message: Option<String>,
}

/// Arguments for `sfpub batch`.
#[derive(Debug, Args)]
pub struct BatchArgs {
    /// JSON file holding an array of change set labels.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}
