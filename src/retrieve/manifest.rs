// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Package manifest inspection.
//!
//! The retrieval tool writes a `package.xml` next to the retrieved
//! metadata. Its `<description>` element carries the change set's human
//! description, which becomes the commit message.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use crate::error::{PubResult, RetrieveError};

fn description_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)<description>(.*?)</description>").unwrap_or_else(|_| unreachable!())
    })
}

/// Locates the manifest under a retrieval destination.
///
/// Depending on tool version the manifest lands either at the destination
/// root or inside an `unpackaged/` subdirectory.
#[must_use]
pub fn find_manifest(dest: &Path) -> Option<PathBuf> {
    for candidate in [dest.join("package.xml"), dest.join("unpackaged/package.xml")] {
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    None
}

/// Reads the change set description out of the retrieved manifest.
///
/// # Errors
///
/// Returns [`RetrieveError::ManifestNotFound`] when no manifest exists
/// under `dest`, [`RetrieveError::ManifestUnreadable`] when it cannot be
/// read, and [`RetrieveError::MissingDescription`] when the element is
/// absent or blank. A commit without a message is worse than a loud
/// failure here.
pub fn manifest_description(dest: &Path, label: &str) -> PubResult<String> {
    let Some(manifest) = find_manifest(dest) else {
        return Err(RetrieveError::ManifestNotFound {
            path: dest.display().to_string(),
        }
        .into());
    };

    let content =
        std::fs::read_to_string(&manifest).map_err(|e| RetrieveError::ManifestUnreadable {
            path: manifest.display().to_string(),
            message: e.to_string(),
        })?;

    let description = description_re()
        .captures(&content)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .unwrap_or_default();

    if description.is_empty() {
        return Err(RetrieveError::MissingDescription {
            label: label.to_string(),
        }
        .into());
    }
    Ok(description)
}
