//! Shared test fixtures.

#![allow(dead_code)]

use talpa::{DocumentStatus, SearchServer};

// Re-export canonical fixtures from talpa::testing
pub use talpa::testing::{empty_server, sample_server, SAMPLE_QUERY};

/// Relevance values the sample corpus produces for [`SAMPLE_QUERY`].
pub const SAMPLE_TOP_RELEVANCE: f64 = 0.866434;
pub const SAMPLE_TAIL_RELEVANCE: f64 = 0.173287;
pub const SAMPLE_BANNED_RELEVANCE: f64 = 0.231049;

/// Comparison width for hand-computed relevance values.
pub const RELEVANCE_TOLERANCE: f64 = 1e-6;

/// Build a server with the given stop words and `Actual` documents.
pub fn server_with_actual_docs(stop_words: &str, docs: &[(i32, &str)]) -> SearchServer {
    let mut server = SearchServer::from_text(stop_words).expect("valid stop words");
    for &(id, text) in docs {
        server
            .add_document(id, text, DocumentStatus::Actual, &[1, 2, 3])
            .expect("valid fixture document");
    }
    server
}

/// Collect result ids in rank order.
pub fn result_ids(results: &[talpa::Document]) -> Vec<i32> {
    results.iter().map(|doc| doc.id).collect()
}
