// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! External process execution.

pub mod command;
pub mod runner;

#[cfg(test)]
mod tests;

pub use command::{CommandLine, CommandResult, sh_quote};
pub use runner::{CommandRunner, ScriptedRunner, ShellRunner};
