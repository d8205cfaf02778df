// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical fixtures so the same corpus backs unit tests,
//! integration tests, and property suites.

#![doc(hidden)]

use crate::server::SearchServer;
use crate::types::DocumentStatus;

/// The reference corpus: three actual cat/dog documents and one banned one,
/// with the stop words `i v na`.
///
/// Searching it for `"pushistiy uhozhenniy kot"` yields ids `1, 0, 2` with
/// relevances `~0.866434, ~0.173287, ~0.173287` and ratings `5, 2, -1`.
pub fn sample_server() -> SearchServer {
    let mut server = SearchServer::from_text("i v na").expect("valid stop words");
    let docs: [(i32, &str, DocumentStatus, &[i32]); 4] = [
        (0, "beliy kot i modniy osheynik", DocumentStatus::Actual, &[8, -3]),
        (1, "pushistiy kot pushistiy hvost", DocumentStatus::Actual, &[7, 2, 7]),
        (
            2,
            "uhozhenniy pes vyrazitelnye glaza",
            DocumentStatus::Actual,
            &[5, -12, 2, 1],
        ),
        (3, "uhozhenniy skvorets evgeniy", DocumentStatus::Banned, &[9]),
    ];
    for (id, text, status, ratings) in docs {
        server
            .add_document(id, text, status, ratings)
            .expect("valid fixture document");
    }
    server
}

/// The reference query for [`sample_server`].
pub const SAMPLE_QUERY: &str = "pushistiy uhozhenniy kot";

/// An empty server with no stop words.
pub fn empty_server() -> SearchServer {
    SearchServer::from_text("").expect("empty stop words are valid")
}
