// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Batch query evaluation.
//!
//! Queries in a batch are independent, so they parallelize trivially: one
//! rayon task per query, results collected back in query order. The joined
//! variant flattens the per-query result lists without reordering them.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Result;
use crate::server::SearchServer;
use crate::types::Document;

/// Evaluate every query against the server, preserving query order.
///
/// The first malformed query fails the whole batch; callers that want
/// per-query error handling should loop over
/// [`SearchServer::find_top_documents`] themselves.
#[cfg(feature = "parallel")]
pub fn process_queries(
    server: &SearchServer,
    queries: &[String],
) -> Result<Vec<Vec<Document>>> {
    queries
        .par_iter()
        .map(|raw_query| server.find_top_documents(raw_query))
        .collect()
}

/// Sequential body used when the `parallel` feature is disabled.
#[cfg(not(feature = "parallel"))]
pub fn process_queries(
    server: &SearchServer,
    queries: &[String],
) -> Result<Vec<Vec<Document>>> {
    queries
        .iter()
        .map(|raw_query| server.find_top_documents(raw_query))
        .collect()
}

/// Like [`process_queries`], flattened into one list in query order.
pub fn process_queries_joined(
    server: &SearchServer,
    queries: &[String],
) -> Result<Vec<Document>> {
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}
