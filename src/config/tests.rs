// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Config;
use std::path::PathBuf;

const MINIMAL: &str = r#"
[pipeline]
download_root = "/tmp/downloads"
project_root = "/tmp/project"
"#;

#[test]
fn test_parse_minimal_config() {
    let config = Config::parse(MINIMAL).expect("minimal config should parse");
    assert_eq!(config.pipeline.download_root, PathBuf::from("/tmp/downloads"));
    assert_eq!(config.pipeline.project_root, PathBuf::from("/tmp/project"));
    // Defaults
    assert!(config.pipeline.skip_existing_work);
    assert!(!config.pipeline.auto_create_pull_request);
    assert!(config.pipeline.autofill_pull_request_details);
    assert!(config.pipeline.merge_into_project);
    assert_eq!(config.tools.git, PathBuf::from("git"));
    assert_eq!(config.tools.retrieve, PathBuf::from("sf"));
    assert_eq!(config.tools.hosting, PathBuf::from("gh"));
}

#[test]
fn test_missing_required_key_aborts() {
    let err = Config::parse("[pipeline]\ndownload_root = \"/tmp/d\"\n")
        .expect_err("missing project_root must fail");
    let msg = format!("{err:#}");
    assert!(msg.contains("project_root"), "unexpected error: {msg}");
}

#[test]
fn test_empty_required_key_aborts() {
    let toml = r#"
[pipeline]
download_root = ""
project_root = "/tmp/project"
"#;
    assert!(Config::parse(toml).is_err());
}

#[test]
fn test_unknown_pipeline_key_rejected() {
    let toml = r#"
[pipeline]
download_root = "/tmp/d"
project_root = "/tmp/p"
retry_count = 3
"#;
    assert!(Config::parse(toml).is_err());
}

#[test]
fn test_override_defaults() {
    let toml = r#"
[global]
dry = true
output_log_level = 4

[pipeline]
download_root = "/tmp/d"
project_root = "/tmp/p"
skip_existing_work = false
auto_create_pull_request = true

[tools]
retrieve = "/opt/sf/bin/sf"
"#;
    let config = Config::parse(toml).unwrap();
    assert!(config.global.dry);
    assert_eq!(config.global.output_log_level.as_u8(), 4);
    assert!(!config.pipeline.skip_existing_work);
    assert!(config.pipeline.auto_create_pull_request);
    assert_eq!(config.tools.retrieve, PathBuf::from("/opt/sf/bin/sf"));
}

#[test]
fn test_format_options_hides_token() {
    let toml = r#"
[pipeline]
download_root = "/tmp/d"
project_root = "/tmp/p"

[remote]
url = "https://example.com/org/repo.git"
username = "deployer"
token = "s3cr3t"
"#;
    let config = Config::parse(toml).unwrap();
    let lines = config.format_options().join("\n");
    assert!(lines.contains("[hidden]"));
    assert!(!lines.contains("s3cr3t"));
    assert!(lines.contains("deployer"));
}

#[test]
fn test_env_override_reaches_multi_word_key() {
    // Unique prefix so other tests never see this variable.
    unsafe { std::env::set_var("SFPUBENVTEST_PIPELINE__SKIP_EXISTING_WORK", "false") };
    let config = Config::builder()
        .add_toml_str(MINIMAL)
        .with_env_prefix("SFPUBENVTEST")
        .build()
        .expect("multi-word env key must map onto the config");
    unsafe { std::env::remove_var("SFPUBENVTEST_PIPELINE__SKIP_EXISTING_WORK") };

    assert!(!config.pipeline.skip_existing_work);
}

#[test]
fn test_default_watch_suffixes() {
    let config = Config::parse(MINIMAL).unwrap();
    assert!(config.watch.suffixes.iter().any(|s| s == ".xml"));
    assert!(config.watch.suffixes.iter().any(|s| s == ".cls"));
}
