// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Typed errors for every way a call into the engine can be refused.
//!
//! All failures are synchronous and surfaced at the call site. A failed call
//! never leaves partial state behind: validation happens before the first
//! mutation, so callers that batch many adds can log-and-skip individual
//! failures without corrupting the index.

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything the engine can refuse to do, and why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A stop word given at construction contains a control byte.
    #[error("stop word {0:?} contains a control byte")]
    InvalidStopWord(String),

    /// The document id is negative, already taken, or (for lookups that
    /// require an existing document) unknown.
    #[error("invalid document id {0}")]
    InvalidDocumentId(i32),

    /// A word of the document text contains a control byte.
    #[error("document word {0:?} contains a control byte")]
    InvalidDocumentWord(String),

    /// A query token is a bare `-`, starts with `--`, or contains a control
    /// byte.
    #[error("invalid query word {0:?}")]
    InvalidQuery(String),

    /// Pagination was requested with a page size of zero.
    #[error("page size must be positive")]
    InvalidPageSize,

    /// Positional document-id access past the end of the id set.
    #[error("document index {index} out of range (document count {count})")]
    IndexOutOfRange { index: usize, count: usize },
}
