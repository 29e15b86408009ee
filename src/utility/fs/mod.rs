// sfpub: Salesforce Metadata Publisher
//
// SPDX-FileCopyrightText: 2026 sfpub contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem helpers.

mod copy;

#[cfg(test)]
mod tests;

pub use copy::merge_copy_dir;
