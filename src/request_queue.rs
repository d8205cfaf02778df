// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Rolling-window statistics over search requests.
//!
//! A [`RequestQueue`] wraps a borrowed server and counts how many of the
//! requests inside a fixed horizon came back empty. Every request is one
//! tick; once the queue is full, each new tick expires the oldest one. The
//! queue is a single-threaded bookkeeping tool - it holds `&SearchServer`
//! and is not meant to be shared.

use std::collections::VecDeque;

use tracing::trace;

use crate::error::Result;
use crate::server::SearchServer;
use crate::types::{Document, DocumentStatus};

/// Horizon of the rolling window, in ticks. One tick per request.
pub const WINDOW: usize = 1440;

#[derive(Debug)]
struct StoredRequest {
    query: String,
    result_count: usize,
}

/// FIFO of the last [`WINDOW`] requests with an empty-result counter.
#[derive(Debug)]
pub struct RequestQueue<'a> {
    server: &'a SearchServer,
    requests: VecDeque<StoredRequest>,
    empty_requests: usize,
}

impl<'a> RequestQueue<'a> {
    /// Wrap a server. The queue lives no longer than the server it borrows.
    pub fn new(server: &'a SearchServer) -> Self {
        Self {
            server,
            requests: VecDeque::new(),
            empty_requests: 0,
        }
    }

    /// Run a default (`Actual`-filtered) search and record the outcome.
    ///
    /// A query that fails to parse propagates the error and consumes no
    /// tick. The results are returned unchanged.
    pub fn add_find_request(&mut self, raw_query: &str) -> Result<Vec<Document>> {
        let results = self.server.find_top_documents(raw_query)?;
        self.record(raw_query, results.len());
        Ok(results)
    }

    /// Status-filtered variant of [`add_find_request`](Self::add_find_request).
    pub fn add_find_request_with_status(
        &mut self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        let results = self
            .server
            .find_top_documents_with_status(raw_query, status)?;
        self.record(raw_query, results.len());
        Ok(results)
    }

    /// Predicate-filtered variant of [`add_find_request`](Self::add_find_request).
    pub fn add_find_request_with_filter<P>(
        &mut self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(i32, DocumentStatus, i32) -> bool + Sync,
    {
        let results = self
            .server
            .find_top_documents_with_filter(raw_query, predicate)?;
        self.record(raw_query, results.len());
        Ok(results)
    }

    /// How many requests inside the window returned no results.
    pub fn no_result_requests(&self) -> usize {
        self.empty_requests
    }

    fn record(&mut self, raw_query: &str, result_count: usize) {
        self.requests.push_back(StoredRequest {
            query: raw_query.to_string(),
            result_count,
        });
        if self.requests.len() > WINDOW {
            if let Some(expired) = self.requests.pop_front() {
                if expired.result_count == 0 {
                    self.empty_requests -= 1;
                }
                trace!(query = %expired.query, "request expired from window");
            }
        }
        if result_count == 0 {
            self.empty_requests += 1;
        }
    }

}
