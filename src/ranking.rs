// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ordering, filters, and execution policy.
//!
//! Ranking is relevance-first: two documents whose relevance differs by at
//! least [`RELEVANCE_EPSILON`] are ordered by relevance alone. Inside an
//! epsilon cluster the rating decides, and the document id breaks the final
//! tie so that both execution modes produce the same sequence.
//!
//! # Invariant: EPSILON_ABSORBS_SUMMATION_ORDER
//!
//! The parallel scoring pass accumulates per-document relevance in a
//! different term order than the sequential one, so the two sums may disagree
//! in the last ulp. `RELEVANCE_EPSILON` is ten orders of magnitude wider than
//! that noise; any pair the modes could disagree on falls into the same
//! cluster and is ordered by the float-free keys instead.

use std::cmp::Ordering;

use crate::types::{Document, DocumentStatus};

/// Maximum number of documents in a search result.
pub const MAX_RESULT_COUNT: usize = 5;

/// Width of a relevance cluster for tie-breaking.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Ranking order: relevance descending, then rating descending within an
/// epsilon cluster, then id ascending.
pub fn compare_documents(lhs: &Document, rhs: &Document) -> Ordering {
    if (lhs.relevance - rhs.relevance).abs() < RELEVANCE_EPSILON {
        rhs.rating.cmp(&lhs.rating).then(lhs.id.cmp(&rhs.id))
    } else {
        rhs.relevance.total_cmp(&lhs.relevance)
    }
}

/// How a search call is executed internally.
///
/// Results are identical either way; `Parallel` only changes how the work is
/// scheduled. With the `parallel` cargo feature disabled, `Parallel` degrades
/// to the sequential path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionPolicy {
    #[default]
    Sequential,
    Parallel,
}

/// Result filter applied during the scoring pass.
///
/// The status variant keeps the hot loop free of indirect calls for the
/// common "status equals ..." case; arbitrary predicates take the dynamic
/// path. Predicates must be `Sync` because the parallel pass evaluates them
/// from worker threads.
#[derive(Clone, Copy)]
pub enum DocumentFilter<'a> {
    /// Keep documents whose status equals the given one.
    ByStatus(DocumentStatus),
    /// Keep documents for which `predicate(id, status, rating)` holds.
    ByPredicate(&'a (dyn Fn(i32, DocumentStatus, i32) -> bool + Sync)),
}

impl DocumentFilter<'_> {
    #[inline]
    pub(crate) fn matches(&self, id: i32, status: DocumentStatus, rating: i32) -> bool {
        match self {
            DocumentFilter::ByStatus(wanted) => status == *wanted,
            DocumentFilter::ByPredicate(predicate) => predicate(id, status, rating),
        }
    }
}

impl Default for DocumentFilter<'_> {
    fn default() -> Self {
        DocumentFilter::ByStatus(DocumentStatus::Actual)
    }
}

impl From<DocumentStatus> for DocumentFilter<'_> {
    fn from(status: DocumentStatus) -> Self {
        DocumentFilter::ByStatus(status)
    }
}

impl std::fmt::Debug for DocumentFilter<'_> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentFilter::ByStatus(status) => {
                formatter.debug_tuple("ByStatus").field(status).finish()
            }
            DocumentFilter::ByPredicate(_) => formatter.write_str("ByPredicate(..)"),
        }
    }
}
