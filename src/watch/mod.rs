// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Change watcher: observes a directory subtree for the duration of one
//! retrieval and reports which metadata files were written.
//!
//! ```text
//! ChangeWatcher (trait)
//!   start(root) ---------- watch begins, recursive
//!   ...retrieval runs...
//!   stop() --> BTreeSet<relative path>   (deduplicated, suffix-filtered)
//! ```
//!
//! The retrieval tool's own manifest is not a reliable description of what
//! it physically wrote (wildcard retrieval, partial failures), so observed
//! filesystem activity is the source of truth for what to stage.

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as _};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, trace};

use crate::error::Result;


/// Filters observed paths down to recognized metadata files.
#[derive(Debug, Clone)]
pub struct SuffixFilter {
    suffixes: Vec<String>,
}

impl SuffixFilter {
    #[must_use]
    pub fn new(suffixes: Vec<String>) -> Self {
        Self { suffixes }
    }

    /// Returns true when the file name ends in a recognized suffix.
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.suffixes.iter().any(|s| name.ends_with(s.as_str()))
    }
}

/// Scoped filesystem observation for one retrieval invocation.
///
/// Implementations must tolerate `stop()` without a prior `start()` (empty
/// set) and must be restartable across work units. Callers are responsible
/// for stopping on every exit path; a leaked watch would attribute a later
/// unit's file changes to an earlier one.
pub trait ChangeWatcher: Send {
    /// Begins observing `root` recursively.
    ///
    /// # Errors
    ///
    /// Returns an error if the watch cannot be established.
    fn start(&mut self, root: &Path) -> Result<()>;

    /// Ends observation and returns the set of created/modified paths,
    /// relative to the watched root, filtered and deduplicated.
    ///
    /// # Errors
    ///
    /// Returns an error if collecting the observed events fails.
    fn stop(&mut self) -> Result<BTreeSet<PathBuf>>;
}

struct ActiveWatch {
    root: PathBuf,
    watcher: RecommendedWatcher,
    rx: mpsc::Receiver<notify::Result<Event>>,
}

/// [`ChangeWatcher`] backed by OS filesystem events via the `notify` crate.
pub struct FsEventWatcher {
    filter: SuffixFilter,
    active: Option<ActiveWatch>,
}

impl FsEventWatcher {
    /// How long the event stream must stay quiet before `stop()` considers
    /// the backend drained. Events for writes that finished just before the
    /// stop may still be in flight on the backend thread.
    const SETTLE: Duration = Duration::from_millis(100);

    #[must_use]
    pub fn new(filter: SuffixFilter) -> Self {
        Self {
            filter,
            active: None,
        }
    }

    fn collect(&self, root: &Path, event: notify::Result<Event>, touched: &mut BTreeSet<PathBuf>) {
        let Ok(event) = event else { return };
        if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
            return;
        }
        for path in event.paths {
            if !self.filter.matches(&path) {
                trace!(path = %path.display(), "ignoring non-metadata change");
                continue;
            }
            let rel = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            touched.insert(rel);
        }
    }
}

impl ChangeWatcher for FsEventWatcher {
    fn start(&mut self, root: &Path) -> Result<()> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(move |event| {
            let _ = tx.send(event);
        })?;
        watcher.watch(root, RecursiveMode::Recursive)?;
        debug!(root = %root.display(), "watching for file changes");

        self.active = Some(ActiveWatch {
            root: root.to_path_buf(),
            watcher,
            rx,
        });
        Ok(())
    }

    fn stop(&mut self) -> Result<BTreeSet<PathBuf>> {
        let Some(active) = self.active.take() else {
            return Ok(BTreeSet::new());
        };
        let ActiveWatch {
            root,
            mut watcher,
            rx,
        } = active;

        // Bounded drain: read until the stream has been quiet for the
        // settle window, then tear the watch down and sweep up whatever
        // arrived during the teardown.
        let mut touched = BTreeSet::new();
        while let Ok(event) = rx.recv_timeout(Self::SETTLE) {
            self.collect(&root, event, &mut touched);
        }

        let _ = watcher.unwatch(&root);
        drop(watcher);
        while let Ok(event) = rx.try_recv() {
            self.collect(&root, event, &mut touched);
        }

        debug!(
            root = %root.display(),
            touched = touched.len(),
            "watch ended"
        );
        Ok(touched)
    }
}

/// Deterministic watcher for tests: each `stop()` pops a queued set instead
/// of relying on real filesystem timing.
#[derive(Debug, Default)]
pub struct ScriptedWatcher {
    queued: std::collections::VecDeque<BTreeSet<PathBuf>>,
    active: bool,
    starts: usize,
    stops: usize,
}

impl ScriptedWatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a set of paths to be returned by the next unanswered `stop()`.
    pub fn push_touched<I, P>(&mut self, paths: I)
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.queued
            .push_back(paths.into_iter().map(Into::into).collect());
    }

    /// Number of `start()` calls seen.
    #[must_use]
    pub const fn starts(&self) -> usize {
        self.starts
    }

    /// Number of `stop()` calls seen.
    #[must_use]
    pub const fn stops(&self) -> usize {
        self.stops
    }

    /// Returns true while a started watch has not been stopped.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }
}

impl ChangeWatcher for ScriptedWatcher {
    fn start(&mut self, _root: &Path) -> Result<()> {
        self.starts += 1;
        self.active = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<BTreeSet<PathBuf>> {
        self.stops += 1;
        self.active = false;
        Ok(self.queued.pop_front().unwrap_or_default())
    }
}
