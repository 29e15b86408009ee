// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations behind the CLI subcommands.

mod publish;
mod setup;

use std::path::Path;

use crate::config::Config;
use crate::error::{ProcessError, Result};

pub use publish::{run_batch_command, run_publish_command};
pub use setup::run_setup_command;

/// Prints the effective configuration, one option per line.
pub fn run_options_command(config: &Config) {
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Verifies that a configured tool resolves to an executable.
///
/// Absolute paths are checked directly; bare names are resolved through
/// `PATH`. Catching this before the pipeline starts turns a cryptic
/// mid-batch shell error into one clear message.
fn ensure_tool_available(tool: &Path) -> Result<()> {
    if which::which(tool).is_err() {
        return Err(ProcessError::ExecutableNotFound {
            name: tool.display().to_string(),
        }
        .into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::ensure_tool_available;
    use std::path::Path;

    #[test]
    fn test_known_tool_resolves() {
        assert!(ensure_tool_available(Path::new("sh")).is_ok());
    }

    #[test]
    fn test_unknown_tool_is_reported() {
        let err = ensure_tool_available(Path::new("definitely-not-a-real-tool-xyz")).unwrap_err();
        assert!(err.to_string().contains("not in PATH"));
    }
}
