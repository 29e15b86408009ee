// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command-line interface definitions.

mod global;
mod publish;


use clap::Parser;

pub use global::GlobalOptions;
pub use publish::{BatchArgs, PublishArgs};

/// Publishes Salesforce metadata change sets to a git repository.
#[derive(Debug, Parser)]
#[command(name = "sfpub", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Retrieve one change set and publish it to its branch.
    Publish(PublishArgs),
    /// Publish every change set listed in a batch file.
    Batch(BatchArgs),
    /// Clone the configured remote into the project root.
    Setup,
    /// Print the effective configuration.
    Options,
    /// Print version information.
    Version,
}

/// Parses the process arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses the given arguments; used by tests.
#[must_use]
pub fn parse_from<I, T>(args: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(args)
}
