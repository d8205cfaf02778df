// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Duplicate-document removal.
//!
//! Two documents are duplicates when they contain the same set of terms -
//! frequencies are deliberately ignored, so "kot kot hvost" duplicates
//! "kot hvost hvost". Walking ids in ascending order makes the outcome
//! deterministic: the lowest id of each duplicate group survives.
//!
//! **Invariant**: after [`remove_duplicates`] returns, all remaining
//! documents have pairwise distinct term sets.

use std::collections::HashSet;

use tracing::debug;

use crate::server::SearchServer;
use crate::types::Term;

/// Remove every document whose term set equals that of a lower-id document.
///
/// Prints `Found duplicate document id <id>` per removal, in ascending id
/// order, and returns the removed ids.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<i32> {
    let mut seen: HashSet<Vec<Term>> = HashSet::new();
    let mut duplicates = Vec::new();

    for document_id in &*server {
        let words: Vec<Term> = server.word_frequencies(document_id).keys().cloned().collect();
        if !seen.insert(words) {
            duplicates.push(document_id);
        }
    }

    for &document_id in &duplicates {
        println!("Found duplicate document id {document_id}");
        server.remove_document(document_id);
    }
    debug!(removed = duplicates.len(), "duplicate sweep finished");
    duplicates
}
