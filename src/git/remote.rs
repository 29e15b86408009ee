// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Remote URLs with embedded credentials.
//!
//! The credentialed form is only ever handed to the spawned git process;
//! anything that reaches a log line uses the masked form.

use crate::error::{GitError, PubResult};

const HTTPS_PREFIX: &str = "https://";

/// A remote URL paired with a log-safe rendering of itself.
#[derive(Debug, Clone)]
pub struct AuthenticatedUrl {
    url: String,
    masked: String,
}

impl AuthenticatedUrl {
    /// Embeds `username:token` into an `https://` remote URL.
    ///
    /// An empty token yields the URL unchanged, for remotes that
    /// authenticate through a credential helper instead.
    ///
    /// # Errors
    ///
    /// Returns [`GitError::InvalidRemoteUrl`] when the URL is not `https`.
    pub fn with_credentials(url: &str, username: &str, token: &str) -> PubResult<Self> {
        let Some(rest) = url.strip_prefix(HTTPS_PREFIX) else {
            return Err(GitError::InvalidRemoteUrl {
                url: url.to_string(),
            }
            .into());
        };

        if token.is_empty() {
            return Ok(Self {
                url: url.to_string(),
                masked: url.to_string(),
            });
        }

        Ok(Self {
            url: format!("{HTTPS_PREFIX}{username}:{token}@{rest}"),
            masked: format!("{HTTPS_PREFIX}{username}:***@{rest}"),
        })
    }

    /// The credentialed URL. Must never appear in logs.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// The rendering safe to log, with the token replaced by `***`.
    #[must_use]
    pub fn masked(&self) -> &str {
        &self.masked
    }
}
