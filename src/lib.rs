// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory full-text search over short documents.
//!
//! This crate indexes whitespace-delimited text under caller-chosen ids,
//! answers queries ranked by TF-IDF with plus/minus term filtering, and can
//! run the scoring pass across worker threads without a global lock.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌──────────────────┐
//! │ tokenizer.rs │────▶│  query.rs   │────▶│    server.rs     │
//! │ (split_words,│     │ (plus/minus │     │ (SearchServer:   │
//! │  validation) │     │  /stop sets)│     │  index + search) │
//! └──────────────┘     └─────────────┘     └──────────────────┘
//!                                            │            │
//!                             ┌──────────────┘            └───────────┐
//!                             ▼                                       ▼
//!                      ┌──────────────┐                       ┌──────────────┐
//!                      │ concurrent.rs│                       │  ranking.rs  │
//!                      │ (sharded     │                       │ (comparator, │
//!                      │  accumulator)│                       │  filters)    │
//!                      └──────────────┘                       └──────────────┘
//! ```
//!
//! Around the engine sit three small tools: [`paginate`] windows a result
//! list, [`RequestQueue`] counts empty-result requests over a rolling
//! horizon, and [`remove_duplicates`] evicts documents whose term set
//! already exists under a lower id.
//!
//! # Usage
//!
//! ```ignore
//! use talpa::{DocumentStatus, SearchServer};
//!
//! let mut server = SearchServer::from_text("i v na")?;
//! server.add_document(0, "beliy kot i modniy osheynik", DocumentStatus::Actual, &[8, -3])?;
//! server.add_document(1, "pushistiy kot pushistiy hvost", DocumentStatus::Actual, &[7, 2, 7])?;
//!
//! for doc in server.find_top_documents("pushistiy kot")? {
//!     println!("id={} relevance={:.6} rating={}", doc.id, doc.relevance, doc.rating);
//! }
//! ```
//!
//! # Concurrency model
//!
//! Search paths take `&self` and are safe to call from many threads at once;
//! writers take `&mut self`, so exclusive access is enforced by the borrow
//! checker rather than by runtime locks. During a parallel search the only
//! mutated state is the sharded accumulator, which owns its synchronization.
//! The `parallel` cargo feature (default on) provides the rayon execution
//! paths; without it, [`ExecutionPolicy::Parallel`] degrades to the
//! sequential implementation.

// Module declarations
mod concurrent;
mod dedup;
mod error;
mod paginate;
mod process;
mod query;
mod ranking;
mod request_queue;
mod server;
pub mod testing;
mod tokenizer;
mod types;

// Re-exports for public API
pub use concurrent::{ConcurrentMap, DEFAULT_SHARD_COUNT};
pub use dedup::remove_duplicates;
pub use error::{Error, Result};
pub use paginate::{paginate, Paginate};
pub use process::{process_queries, process_queries_joined};
pub use ranking::{
    compare_documents, DocumentFilter, ExecutionPolicy, MAX_RESULT_COUNT, RELEVANCE_EPSILON,
};
pub use request_queue::{RequestQueue, WINDOW};
pub use server::SearchServer;
pub use tokenizer::{is_valid_word, split_words};
pub use types::{Document, DocumentStatus, Term};
