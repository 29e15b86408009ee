// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git operations, expressed as invocations of the configured git binary.
//!
//! Every mutation goes through the shared [`CommandRunner`](crate::core::process::CommandRunner)
//! so tests can script the repository's answers without a real checkout.

pub mod branch;
pub mod publish;
pub mod remote;

#[cfg(test)]
mod tests;

pub use branch::{branch_exists, checkout, derive_branch_name, ensure_branch};
pub use publish::{commit, extract_url, push, stage_files, submit_pull_request};
pub use remote::AuthenticatedUrl;
