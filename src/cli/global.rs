// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use clap::Args;
use std::path::PathBuf;

/// Options accepted by every subcommand.
#[derive(Debug, Default, Args)]
pub struct GlobalOptions {
    /// Additional configuration files, applied in order.
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Vec<PathBuf>,

    /// Console log level (0=silent, 5=trace).
    #[arg(short = 'l', long, global = true, value_name = "LEVEL")]
    pub log_level: Option<u8>,

    /// File log level (0=silent, 5=trace).
    #[arg(long, global = true, value_name = "LEVEL")]
    pub file_log_level: Option<u8>,

    /// Path of the log file.
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Log planned commands without invoking external tools.
    #[arg(short = 'd', long, global = true)]
    pub dry: bool,
}
