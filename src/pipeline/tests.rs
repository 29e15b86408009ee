// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::Path;
use std::sync::Arc;

use super::batch::read_batch_file;
use super::{Pipeline, StageState, WorkUnit};
use crate::config::Config;
use crate::core::process::{CommandResult, ScriptedRunner};
use crate::watch::ScriptedWatcher;

fn seeded_config(temp: &Path, label: &str, description: &str) -> Config {
    let download_root = temp.join("retrieved");
    let project_root = temp.join("repo");
    std::fs::create_dir_all(&project_root).unwrap();

    let dest = download_root.join(label);
    std::fs::create_dir_all(&dest).unwrap();
    std::fs::write(
        dest.join("package.xml"),
        format!("<Package><description>{description}</description></Package>"),
    )
    .unwrap();

    let mut config = Config::default();
    config.pipeline.download_root = download_root;
    config.pipeline.project_root = project_root;
    config.pipeline.skip_existing_work = false;
    config
}

#[tokio::test]
async fn test_happy_path_runs_stages_in_order() {
    let temp = tempfile::tempdir().unwrap();
    let config = {
        let mut c = seeded_config(temp.path(), "Weekly", "Weekly sync");
        c.pipeline.auto_create_pull_request = true;
        c
    };

    let runner = Arc::new(ScriptedRunner::new(|cmd| {
        if cmd.contains("rev-parse") {
            CommandResult::new(1, String::new())
        } else if cmd.contains("pr create") {
            CommandResult::new(0, "https://example.com/org/repo/pull/7\n".to_string())
        } else {
            CommandResult::new(0, String::new())
        }
    }));

    let mut watcher = ScriptedWatcher::new();
    watcher.push_touched(["Weekly/classes/Foo.cls"]);

    let pipeline = Pipeline::new(&config, runner.clone());
    let outcomes = pipeline
        .run(&mut watcher, &[WorkUnit::changeset("Weekly")])
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 1);
    let outcome = &outcomes[0];
    assert!(outcome.succeeded(), "{:?}", outcome.error);
    assert_eq!(outcome.state, StageState::PrSubmitted);
    assert_eq!(
        outcome.pr_url.as_deref(),
        Some("https://example.com/org/repo/pull/7")
    );

    let calls = runner.calls();
    assert_eq!(calls[0], "git rev-parse --verify --quiet refs/heads/Weekly");
    assert_eq!(calls[1], "git checkout -b Weekly");
    assert_eq!(calls[2], "git checkout Weekly");
    assert!(calls[3].starts_with("sf retrieve -p Weekly"));
    assert_eq!(calls[4], "git add -- classes/Foo.cls");
    assert_eq!(calls[5], "git commit -a -m 'Weekly sync'");
    assert_eq!(calls[6], "git push --set-upstream origin Weekly");
    assert_eq!(calls[7], "gh pr create --head Weekly --fill");
    assert_eq!(calls.len(), 8);
}

#[tokio::test]
async fn test_failed_unit_does_not_block_the_rest() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = seeded_config(temp.path(), "First", "First description");
    // Second unit's manifest, same layout.
    let second_dest = config.pipeline.download_root.join("Second");
    std::fs::create_dir_all(&second_dest).unwrap();
    std::fs::write(
        second_dest.join("package.xml"),
        "<Package><description>Second description</description></Package>",
    )
    .unwrap();
    config.pipeline.merge_into_project = false;

    let runner = Arc::new(ScriptedRunner::new(|cmd| {
        if cmd.contains("retrieve") && cmd.contains("First") {
            CommandResult::new(1, "INVALID_CROSS_REFERENCE_KEY".to_string())
        } else if cmd.contains("rev-parse") {
            CommandResult::new(1, String::new())
        } else {
            CommandResult::new(0, String::new())
        }
    }));

    let mut watcher = ScriptedWatcher::new();
    watcher.push_touched(Vec::<&str>::new());
    watcher.push_touched(["Second/package.xml"]);

    let pipeline = Pipeline::new(&config, runner);
    let outcomes = pipeline
        .run(
            &mut watcher,
            &[WorkUnit::changeset("First"), WorkUnit::changeset("Second")],
        )
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].succeeded());
    assert_eq!(outcomes[0].state, StageState::CheckedOut);
    assert!(
        outcomes[0]
            .error
            .as_deref()
            .unwrap_or_default()
            .contains("INVALID_CROSS_REFERENCE_KEY")
    );

    assert!(outcomes[1].succeeded(), "{:?}", outcomes[1].error);
    assert_eq!(outcomes[1].state, StageState::Pushed);
    // Both watches were balanced.
    assert_eq!(watcher.starts(), 2);
    assert_eq!(watcher.stops(), 2);
}

#[tokio::test]
async fn test_skipped_unit_stops_after_retrieval() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = seeded_config(temp.path(), "Weekly", "Weekly sync");
    config.pipeline.skip_existing_work = true;

    let runner = Arc::new(ScriptedRunner::new(|cmd| {
        if cmd.contains("rev-parse") {
            CommandResult::new(1, String::new())
        } else {
            CommandResult::new(0, String::new())
        }
    }));

    let mut watcher = ScriptedWatcher::new();
    let pipeline = Pipeline::new(&config, runner.clone());
    let outcomes = pipeline
        .run(&mut watcher, &[WorkUnit::changeset("Weekly")])
        .await
        .unwrap();

    let outcome = &outcomes[0];
    assert!(outcome.succeeded());
    assert!(outcome.skipped);
    assert_eq!(outcome.state, StageState::Retrieved);
    // Branch work ran, nothing was retrieved, staged or pushed.
    let calls = runner.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| !c.contains("push")));
}

#[tokio::test]
async fn test_manifest_unit_requires_explicit_message() {
    let temp = tempfile::tempdir().unwrap();
    let config = seeded_config(temp.path(), "Weekly", "ignored");

    let runner = Arc::new(ScriptedRunner::new(|cmd| {
        if cmd.contains("rev-parse") {
            CommandResult::new(1, String::new())
        } else {
            CommandResult::new(0, String::new())
        }
    }));

    let mut watcher = ScriptedWatcher::new();
    watcher.push_touched(["Weekly/package.xml"]);

    let unit = WorkUnit::manifest("Weekly", "/manifests/weekly.xml");
    let pipeline = Pipeline::new(&config, runner);
    let outcomes = pipeline.run(&mut watcher, &[unit]).await.unwrap();

    assert!(!outcomes[0].succeeded());
    assert_eq!(outcomes[0].state, StageState::Staged);
}

#[tokio::test]
async fn test_explicit_message_overrides_manifest() {
    let temp = tempfile::tempdir().unwrap();
    let config = seeded_config(temp.path(), "Weekly", "from manifest");

    let runner = Arc::new(ScriptedRunner::new(|cmd| {
        if cmd.contains("rev-parse") {
            CommandResult::new(1, String::new())
        } else {
            CommandResult::new(0, String::new())
        }
    }));

    let mut watcher = ScriptedWatcher::new();
    watcher.push_touched(["Weekly/package.xml"]);

    let pipeline = Pipeline::new(&config, runner.clone())
        .with_commit_message(Some("release: weekly drop".to_string()));
    let outcomes = pipeline
        .run(&mut watcher, &[WorkUnit::changeset("Weekly")])
        .await
        .unwrap();

    assert!(outcomes[0].succeeded(), "{:?}", outcomes[0].error);
    assert!(
        runner
            .calls()
            .iter()
            .any(|c| c == "git commit -a -m 'release: weekly drop'")
    );
}

#[test]
fn test_branch_name_comes_from_label() {
    let unit = WorkUnit::changeset("My Change Set");
    assert_eq!(unit.branch_name(), "My-Change-Set");
}

#[test]
fn test_batch_file_preserves_order() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("batch.json");
    std::fs::write(&path, r#"["Change Set One", "Change Set Two"]"#).unwrap();

    let units = read_batch_file(&path).unwrap();
    assert_eq!(
        units,
        vec![
            WorkUnit::changeset("Change Set One"),
            WorkUnit::changeset("Change Set Two"),
        ]
    );
}

#[test]
fn test_batch_file_rejects_non_array() {
    let temp = tempfile::tempdir().unwrap();
    let path = temp.path().join("batch.json");
    std::fs::write(&path, r#"{"labels": []}"#).unwrap();
    assert!(read_batch_file(&path).is_err());

    assert!(read_batch_file(&temp.path().join("missing.json")).is_err());
}
