// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The inverted index and its public contract.
//!
//! A [`SearchServer`] owns four views of the same corpus: a term-to-postings
//! map, a per-document reverse map, the document metadata, and the id set.
//! The maps are ordered end to end, so iteration over documents, terms, and
//! postings is stable between runs.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! 1. **KEYS_LINE_UP**: `document_ids`, `documents`, and `doc_words` contain
//!    exactly the same id set.
//! 2. **NO_EMPTY_POSTINGS**: a term is present in `postings` iff some
//!    document contains it; posting entries are pruned when their last
//!    document is removed.
//! 3. **MIRRORED_FREQUENCIES**: `postings[term][id] == doc_words[id][term]`
//!    for every pair that exists.
//! 4. **CLEAN_TERMS**: every indexed term is a valid token and not a stop
//!    word.
//! 5. **UNIT_MASS**: the frequencies of a document with at least one retained
//!    token sum to 1.
//!
//! Rather than trusting yourself to remember these, `well_formed()` checks
//! them all; it is compiled in debug and test builds only.

use std::collections::{BTreeMap, BTreeSet};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use crate::concurrent::{ConcurrentMap, DEFAULT_SHARD_COUNT};
use crate::error::{Error, Result};
use crate::query::{parse_query, ParsedQuery};
use crate::ranking::{
    compare_documents, DocumentFilter, ExecutionPolicy, MAX_RESULT_COUNT,
};
use crate::tokenizer::{is_valid_word, split_words};
use crate::types::{Document, DocumentData, DocumentStatus, Term};

/// In-memory full-text search engine over short documents.
///
/// Documents are added under caller-chosen non-negative ids, never mutated in
/// place, and removed by id. Queries are ranked by TF-IDF with plus/minus
/// term filtering; [`compare_documents`](crate::compare_documents) defines
/// the ordering rules.
///
/// Concurrent readers on one server are fine - every search path takes
/// `&self`. Writers take `&mut self`, so the borrow checker enforces the
/// exclusive-writer discipline at compile time.
pub struct SearchServer {
    stop_words: BTreeSet<String>,
    /// term -> (document id -> term frequency)
    postings: BTreeMap<Term, BTreeMap<i32, f64>>,
    /// document id -> (term -> term frequency)
    doc_words: BTreeMap<i32, BTreeMap<Term, f64>>,
    documents: BTreeMap<i32, DocumentData>,
    document_ids: BTreeSet<i32>,
}

impl SearchServer {
    /// Create a server from a collection of stop words.
    ///
    /// Empty tokens are dropped; a token with a control byte is
    /// [`Error::InvalidStopWord`]. The stop-word set is immutable for the
    /// lifetime of the server.
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = BTreeSet::new();
        for word in stop_words {
            let word = word.as_ref();
            if word.is_empty() {
                continue;
            }
            if !is_valid_word(word) {
                return Err(Error::InvalidStopWord(word.to_string()));
            }
            words.insert(word.to_string());
        }
        Ok(Self {
            stop_words: words,
            postings: BTreeMap::new(),
            doc_words: BTreeMap::new(),
            documents: BTreeMap::new(),
            document_ids: BTreeSet::new(),
        })
    }

    /// Create a server from a space-separated stop-word text.
    pub fn from_text(stop_words_text: &str) -> Result<Self> {
        Self::new(split_words(stop_words_text))
    }

    /// Add a document under an explicit id.
    ///
    /// Fails with [`Error::InvalidDocumentId`] if the id is negative or
    /// already present, and with [`Error::InvalidDocumentWord`] if any token
    /// contains a control byte. A failed call changes nothing: validation
    /// runs to completion before the first index write.
    ///
    /// Each retained (non-stop) token contributes `1/N` to its frequency in
    /// this document, where `N` is the retained-token count. The rating is
    /// the mean of `ratings` truncated toward zero, 0 when empty.
    pub fn add_document(
        &mut self,
        document_id: i32,
        document: &str,
        status: DocumentStatus,
        ratings: &[i32],
    ) -> Result<()> {
        if document_id < 0 || self.documents.contains_key(&document_id) {
            return Err(Error::InvalidDocumentId(document_id));
        }
        let words = self.split_into_words_no_stop(document)?;

        let inverse_word_count = 1.0 / words.len() as f64;
        let mut word_freqs: BTreeMap<Term, f64> = BTreeMap::new();
        for word in words {
            // Reuse the allocation of an already-known term so the postings
            // key and every reverse-map key point at the same bytes.
            let term = match self.postings.get_key_value(word) {
                Some((term, _)) => Term::clone(term),
                None => Term::from(word),
            };
            *self
                .postings
                .entry(Term::clone(&term))
                .or_default()
                .entry(document_id)
                .or_insert(0.0) += inverse_word_count;
            *word_freqs.entry(term).or_insert(0.0) += inverse_word_count;
        }

        debug!(document_id, unique_words = word_freqs.len(), "added document");
        self.doc_words.insert(document_id, word_freqs);
        self.documents.insert(
            document_id,
            DocumentData {
                rating: average_rating(ratings),
                status,
            },
        );
        self.document_ids.insert(document_id);
        Ok(())
    }

    /// Remove a document by id. A no-op if the id is unknown.
    pub fn remove_document(&mut self, document_id: i32) {
        self.remove_document_with(ExecutionPolicy::Sequential, document_id);
    }

    /// Policy-taking variant of [`remove_document`](Self::remove_document).
    ///
    /// Pruning posting entries rebalances the term map, which is an
    /// inherently serial mutation, so both policies share one body.
    pub fn remove_document_with(&mut self, _policy: ExecutionPolicy, document_id: i32) {
        let Some(word_freqs) = self.doc_words.remove(&document_id) else {
            return;
        };
        for term in word_freqs.keys() {
            let word: &str = term;
            let prune = match self.postings.get_mut(word) {
                Some(postings) => {
                    postings.remove(&document_id);
                    postings.is_empty()
                }
                None => false,
            };
            if prune {
                self.postings.remove(word);
            }
        }
        self.documents.remove(&document_id);
        self.document_ids.remove(&document_id);
        debug!(document_id, "removed document");
    }

    /// Top results for a query, filtered to `Actual` documents.
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with(
            ExecutionPolicy::Sequential,
            raw_query,
            DocumentFilter::default(),
        )
    }

    /// Top results filtered by document status.
    pub fn find_top_documents_with_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_with(
            ExecutionPolicy::Sequential,
            raw_query,
            DocumentFilter::ByStatus(status),
        )
    }

    /// Top results filtered by an arbitrary predicate over
    /// `(id, status, rating)`.
    pub fn find_top_documents_with_filter<P>(
        &self,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(i32, DocumentStatus, i32) -> bool + Sync,
    {
        self.find_top_documents_with(
            ExecutionPolicy::Sequential,
            raw_query,
            DocumentFilter::ByPredicate(&predicate),
        )
    }

    /// The full search pipeline: parse, score, filter, exclude minus
    /// matches, sort, truncate to [`MAX_RESULT_COUNT`].
    ///
    /// Both policies produce the same result sequence; `Parallel` scores
    /// plus terms across worker threads through a sharded accumulator.
    pub fn find_top_documents_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        filter: DocumentFilter<'_>,
    ) -> Result<Vec<Document>> {
        let query = parse_query(raw_query, &self.stop_words)?;
        let mut matched = match policy {
            ExecutionPolicy::Sequential => self.find_all_documents(&query, &filter),
            ExecutionPolicy::Parallel => self.find_all_documents_parallel(&query, &filter),
        };
        sort_documents(policy, &mut matched);
        matched.truncate(MAX_RESULT_COUNT);
        trace!(
            query = raw_query,
            results = matched.len(),
            "find_top_documents"
        );
        Ok(matched)
    }

    /// Which plus terms of `raw_query` does the document contain?
    ///
    /// Returns the sorted, deduplicated subset of plus terms present in the
    /// document, together with the document's status - or an empty term list
    /// if any minus term is present. An unknown id is
    /// [`Error::InvalidDocumentId`].
    pub fn match_document(
        &self,
        raw_query: &str,
        document_id: i32,
    ) -> Result<(Vec<Term>, DocumentStatus)> {
        self.match_document_with(ExecutionPolicy::Sequential, raw_query, document_id)
    }

    /// Policy-taking variant of [`match_document`](Self::match_document).
    pub fn match_document_with(
        &self,
        policy: ExecutionPolicy,
        raw_query: &str,
        document_id: i32,
    ) -> Result<(Vec<Term>, DocumentStatus)> {
        let query = parse_query(raw_query, &self.stop_words)?;
        let Some(data) = self.documents.get(&document_id) else {
            return Err(Error::InvalidDocumentId(document_id));
        };
        let word_freqs = self.word_frequencies(document_id);

        if query.minus.iter().any(|word| word_freqs.contains_key(*word)) {
            return Ok((Vec::new(), data.status));
        }
        let matched = match policy {
            ExecutionPolicy::Sequential => query
                .plus
                .iter()
                .filter_map(|word| interned(word_freqs, word))
                .collect(),
            ExecutionPolicy::Parallel => matched_plus_terms_parallel(&query, word_freqs),
        };
        Ok((matched, data.status))
    }

    /// Term frequencies of one document, ordered by term.
    ///
    /// Unknown ids get an empty map rather than an error - the common caller
    /// is iterating ids it read from somewhere else and just wants the view.
    pub fn word_frequencies(&self, document_id: i32) -> &BTreeMap<Term, f64> {
        static EMPTY: BTreeMap<Term, f64> = BTreeMap::new();
        self.doc_words.get(&document_id).unwrap_or(&EMPTY)
    }

    /// Number of stored documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// All document ids in ascending order.
    pub fn document_ids(&self) -> impl Iterator<Item = i32> + '_ {
        self.document_ids.iter().copied()
    }

    /// The id at `index` in ascending id order.
    pub fn get_document_id(&self, index: usize) -> Result<i32> {
        self.document_ids
            .iter()
            .nth(index)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index,
                count: self.document_ids.len(),
            })
    }

    fn split_into_words_no_stop<'a>(&self, text: &'a str) -> Result<Vec<&'a str>> {
        let mut words = Vec::new();
        for word in split_words(text) {
            if !is_valid_word(word) {
                return Err(Error::InvalidDocumentWord(word.to_string()));
            }
            if !self.stop_words.contains(word) {
                words.push(word);
            }
        }
        Ok(words)
    }

    /// `ln(total documents / documents containing the term)`.
    ///
    /// The numerator is the full corpus size, not the filtered subset.
    fn inverse_document_freq(&self, postings: &BTreeMap<i32, f64>) -> f64 {
        (self.document_count() as f64 / postings.len() as f64).ln()
    }

    fn find_all_documents(
        &self,
        query: &ParsedQuery<'_>,
        filter: &DocumentFilter<'_>,
    ) -> Vec<Document> {
        let mut doc_to_relevance: BTreeMap<i32, f64> = BTreeMap::new();
        for word in &query.plus {
            let Some(postings) = self.postings.get(*word) else {
                continue;
            };
            let inverse_document_freq = self.inverse_document_freq(postings);
            for (&document_id, &term_freq) in postings {
                let Some(data) = self.documents.get(&document_id) else {
                    continue;
                };
                if filter.matches(document_id, data.status, data.rating) {
                    *doc_to_relevance.entry(document_id).or_insert(0.0) +=
                        term_freq * inverse_document_freq;
                }
            }
        }
        self.erase_minus_matches(query, &mut doc_to_relevance);
        self.materialize(doc_to_relevance)
    }

    #[cfg(feature = "parallel")]
    fn find_all_documents_parallel(
        &self,
        query: &ParsedQuery<'_>,
        filter: &DocumentFilter<'_>,
    ) -> Vec<Document> {
        let accumulator: ConcurrentMap<i32, f64> = ConcurrentMap::new(DEFAULT_SHARD_COUNT);
        query.plus.par_iter().for_each(|word| {
            let Some(postings) = self.postings.get(*word) else {
                return;
            };
            let inverse_document_freq = self.inverse_document_freq(postings);
            for (&document_id, &term_freq) in postings {
                let Some(data) = self.documents.get(&document_id) else {
                    continue;
                };
                if filter.matches(document_id, data.status, data.rating) {
                    *accumulator.get_mut(document_id) += term_freq * inverse_document_freq;
                }
            }
        });
        let mut doc_to_relevance = accumulator.build_ordered();
        self.erase_minus_matches(query, &mut doc_to_relevance);
        self.materialize(doc_to_relevance)
    }

    #[cfg(not(feature = "parallel"))]
    fn find_all_documents_parallel(
        &self,
        query: &ParsedQuery<'_>,
        filter: &DocumentFilter<'_>,
    ) -> Vec<Document> {
        self.find_all_documents(query, filter)
    }

    fn erase_minus_matches(
        &self,
        query: &ParsedQuery<'_>,
        doc_to_relevance: &mut BTreeMap<i32, f64>,
    ) {
        for word in &query.minus {
            if let Some(postings) = self.postings.get(*word) {
                for document_id in postings.keys() {
                    doc_to_relevance.remove(document_id);
                }
            }
        }
    }

    fn materialize(&self, doc_to_relevance: BTreeMap<i32, f64>) -> Vec<Document> {
        doc_to_relevance
            .into_iter()
            .map(|(id, relevance)| Document {
                id,
                relevance,
                rating: self.documents.get(&id).map_or(0, |data| data.rating),
            })
            .collect()
    }

    /// Full invariant sweep over all four views. Debug and test builds only.
    #[cfg(any(debug_assertions, test))]
    pub fn well_formed(&self) -> bool {
        // KEYS_LINE_UP
        if self.documents.len() != self.document_ids.len()
            || self.doc_words.len() != self.document_ids.len()
        {
            return false;
        }
        for &id in &self.document_ids {
            if id < 0 || !self.documents.contains_key(&id) || !self.doc_words.contains_key(&id) {
                return false;
            }
        }

        // NO_EMPTY_POSTINGS, CLEAN_TERMS, and the forward half of
        // MIRRORED_FREQUENCIES
        for (term, postings) in &self.postings {
            let word: &str = term;
            if postings.is_empty() {
                return false;
            }
            if !is_valid_word(word) || self.stop_words.contains(word) {
                return false;
            }
            for (id, &term_freq) in postings {
                match self.doc_words.get(id).and_then(|freqs| freqs.get(word)) {
                    Some(&reverse_freq) if reverse_freq == term_freq => {}
                    _ => return false,
                }
            }
        }

        // The reverse half of MIRRORED_FREQUENCIES plus UNIT_MASS
        for (id, freqs) in &self.doc_words {
            let mut total = 0.0;
            for (term, &term_freq) in freqs {
                let word: &str = term;
                total += term_freq;
                match self.postings.get(word).and_then(|postings| postings.get(id)) {
                    Some(&forward_freq) if forward_freq == term_freq => {}
                    _ => return false,
                }
            }
            if !freqs.is_empty() && (total - 1.0).abs() > 1e-9 {
                return false;
            }
        }
        true
    }
}

/// Ascending iteration over document ids, mirroring the map-style `for id in
/// &server` loop the auxiliary tools use.
impl<'a> IntoIterator for &'a SearchServer {
    type Item = i32;
    type IntoIter = std::iter::Copied<std::collections::btree_set::Iter<'a, i32>>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids.iter().copied()
    }
}

impl std::fmt::Debug for SearchServer {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("SearchServer")
            .field("documents", &self.documents.len())
            .field("terms", &self.postings.len())
            .field("stop_words", &self.stop_words.len())
            .finish()
    }
}

/// Mean of the ratings, truncated toward zero; 0 for an empty slice.
fn average_rating(ratings: &[i32]) -> i32 {
    if ratings.is_empty() {
        return 0;
    }
    ratings.iter().sum::<i32>() / ratings.len() as i32
}

fn interned(word_freqs: &BTreeMap<Term, f64>, word: &str) -> Option<Term> {
    word_freqs
        .get_key_value(word)
        .map(|(term, _)| Term::clone(term))
}

#[cfg(feature = "parallel")]
fn matched_plus_terms_parallel(
    query: &ParsedQuery<'_>,
    word_freqs: &BTreeMap<Term, f64>,
) -> Vec<Term> {
    query
        .plus
        .par_iter()
        .filter_map(|word| interned(word_freqs, word))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn matched_plus_terms_parallel(
    query: &ParsedQuery<'_>,
    word_freqs: &BTreeMap<Term, f64>,
) -> Vec<Term> {
    query
        .plus
        .iter()
        .filter_map(|word| interned(word_freqs, word))
        .collect()
}

fn sort_documents(policy: ExecutionPolicy, documents: &mut [Document]) {
    match policy {
        ExecutionPolicy::Sequential => documents.sort_by(compare_documents),
        #[cfg(feature = "parallel")]
        ExecutionPolicy::Parallel => documents.par_sort_by(compare_documents),
        #[cfg(not(feature = "parallel"))]
        ExecutionPolicy::Parallel => documents.sort_by(compare_documents),
    }
}
