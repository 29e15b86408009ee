// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Publish | Batch | Setup | Options | Version
//! ```
//!
//! The config loads before logging so the audit-trail file settings in
//! `[global]` take effect; CLI flags override them.

use std::process::ExitCode;

use sfpub::cli::{self, Command, GlobalOptions};
use sfpub::cmd::{run_batch_command, run_options_command, run_publish_command, run_setup_command};
use sfpub::config::Config;
use sfpub::config::loader::ConfigLoader;
use sfpub::config::types::GlobalConfig;
use sfpub::logging::{LogConfig, LogLevel, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    if let Some(Command::Version) = cli.command {
        handle_version_command();
        return ExitCode::SUCCESS;
    }

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&cli.global, &config.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config).await
}

fn build_log_config(cli: &GlobalOptions, global: &GlobalConfig) -> LogConfig {
    let console_level = cli
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(global.output_log_level);

    let file_level = cli
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(global.file_log_level);

    let log_file = cli
        .log_file
        .clone()
        .unwrap_or_else(|| global.log_file.clone());

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .with_log_file(log_file.display().to_string())
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Publish(args)) => run_publish_command(config, args).await,
        Some(Command::Batch(args)) => run_batch_command(config, args).await,
        Some(Command::Setup) => run_setup_command(config).await,
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new().add_toml_file_optional("sfpub.toml");
    for config_path in &global.config {
        loader = loader.add_toml_file(config_path);
    }
    loader.with_env_prefix("SFPUB")
}

fn load_config(global: &GlobalOptions) -> sfpub::error::Result<Config> {
    let loader = build_config_loader(global);
    let mut config = loader.build()?;
    if global.dry {
        config.global.dry = true;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::build_log_config;
    use sfpub::cli::GlobalOptions;
    use sfpub::config::types::GlobalConfig;
    use sfpub::logging::LogLevel;

    #[test]
    fn test_audit_trail_is_on_by_default() {
        let log = build_log_config(&GlobalOptions::default(), &GlobalConfig::default());
        assert_eq!(log.console_level(), LogLevel::INFO);
        assert_eq!(log.file_level(), LogLevel::TRACE);
        assert_eq!(log.log_file(), Some("sfpub.log"));
    }

    #[test]
    fn test_cli_flags_override_config_levels() {
        let cli = GlobalOptions {
            log_level: Some(1),
            log_file: Some("custom.log".into()),
            ..GlobalOptions::default()
        };
        let mut global = GlobalConfig::default();
        global.output_log_level = LogLevel::DEBUG;

        let log = build_log_config(&cli, &global);
        assert_eq!(log.console_level(), LogLevel::ERROR);
        assert_eq!(log.log_file(), Some("custom.log"));
    }

    #[test]
    fn test_config_levels_apply_without_cli_flags() {
        let mut global = GlobalConfig::default();
        global.output_log_level = LogLevel::WARN;
        global.file_log_level = LogLevel::DEBUG;
        global.log_file = "audit/run.log".into();

        let log = build_log_config(&GlobalOptions::default(), &global);
        assert_eq!(log.console_level(), LogLevel::WARN);
        assert_eq!(log.file_level(), LogLevel::DEBUG);
        assert_eq!(log.log_file(), Some("audit/run.log"));
    }
}
