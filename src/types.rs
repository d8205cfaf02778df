// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the search engine.
//!
//! These types are deliberately plain data. A [`Document`] is what callers get
//! back from a search; [`DocumentStatus`] is what they attach when adding one.
//! Both derive serde because that's where these values end up - serialized
//! into whatever transport the host application speaks.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An interned term handle.
///
/// The server owns each distinct term exactly once; posting lists and the
/// per-document frequency maps share the same allocation. Cloning a `Term` is
/// a refcount bump, and ordering/hashing delegate to the underlying bytes, so
/// a `Term` can key an ordered map and still be looked up by a borrowed
/// `&str`.
pub type Term = Arc<str>;

/// Lifecycle status attached to a document when it is added.
///
/// There is no ordering between statuses; the engine only ever compares them
/// for equality when filtering results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    /// Live content, the default search target.
    #[default]
    Actual,
    /// Kept in the index but normally filtered out of results.
    Irrelevant,
    /// Blocked content; only surfaced when explicitly requested.
    Banned,
    /// Marked for deletion but not yet physically removed.
    Removed,
}

/// A single ranked search result.
///
/// `relevance` is the TF-IDF sum over the query's plus terms; `rating` is the
/// truncated mean of the ratings supplied at add time. The ordering used for
/// ranking lives in [`compare_documents`](crate::compare_documents), not in
/// an `Ord` impl - relevance is a float and the tie-break rules carry an
/// epsilon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: i32,
    pub relevance: f64,
    pub rating: i32,
}

/// Per-document record stored alongside the index.
///
/// The word frequencies live in the server's reverse map, keyed by the same
/// id; this struct only carries what the ranking predicate needs.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DocumentData {
    pub rating: i32,
    pub status: DocumentStatus,
}
