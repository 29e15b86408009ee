// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, GitError, PubError, RetrieveError, bail_out};

#[test]
fn test_bail_out_message() {
    let err = bail_out("disk on fire");
    assert_eq!(err.to_string(), "fatal error: disk on fire");
}

#[test]
fn test_config_error_boxes_into_pub_error() {
    let err: PubError = ConfigError::MissingKey {
        section: "pipeline".to_string(),
        key: "project_root".to_string(),
    }
    .into();
    assert_eq!(
        err.to_string(),
        "config error: missing required config key 'project_root' in section '[pipeline]'"
    );
}

#[test]
fn test_git_command_failed_display() {
    let err = GitError::CommandFailed {
        command: "git push --set-upstream origin Change-Set-One".to_string(),
        message: "remote rejected".to_string(),
    };
    assert!(err.to_string().contains("git push"));
    assert!(err.to_string().contains("remote rejected"));
}

#[test]
fn test_missing_description_is_distinct_from_tool_failure() {
    let err: PubError = RetrieveError::MissingDescription {
        label: "Spring Release".to_string(),
    }
    .into();
    let msg = err.to_string();
    assert!(msg.starts_with("retrieve error:"));
    assert!(msg.contains("no description"));
}

#[test]
fn test_io_error_boxes_into_pub_error() {
    let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let err: PubError = io.into();
    assert!(matches!(err, PubError::Io(_)));
}
