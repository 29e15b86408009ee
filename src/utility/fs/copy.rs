// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use tracing::trace;

use crate::error::Result;

/// Recursively copies the contents of `src` into `dst`, merging with what
/// is already there.
///
/// Directories are created as needed; files that exist in both trees are
/// overwritten with the source version. Nothing under `dst` is deleted, so
/// files retrieved by an earlier run survive a later partial retrieval.
///
/// # Errors
///
/// Returns an error if a directory cannot be read or a file cannot be
/// copied.
pub fn merge_copy_dir<'a>(
    src: &'a Path,
    dst: &'a Path,
) -> Pin<Box<dyn Future<Output = Result<()>> + Send + 'a>> {
    Box::pin(async move {
        tokio::fs::create_dir_all(dst).await?;

        let mut entries = tokio::fs::read_dir(src).await?;
        while let Some(entry) = entries.next_entry().await? {
            let from = entry.path();
            let to = dst.join(entry.file_name());
            if entry.file_type().await?.is_dir() {
                merge_copy_dir(&from, &to).await?;
            } else {
                trace!(from = %from.display(), to = %to.display(), "copy");
                tokio::fs::copy(&from, &to).await?;
            }
        }
        Ok(())
    })
}
