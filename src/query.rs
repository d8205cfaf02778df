// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query parsing: raw text to plus/minus/stop term sets.
//!
//! A leading `-` marks a minus term and is stripped before anything else is
//! checked. Stop words are classified and then contribute nothing - a query
//! consisting only of stop words is valid and matches nothing. Plus and minus
//! sets come out sorted and deduplicated, which the parallel scoring pass
//! relies on for deterministic output.

use std::collections::BTreeSet;

use crate::error::{Error, Result};
use crate::tokenizer::{is_valid_word, split_words};

/// One token of a raw query, classified.
#[derive(Debug, Clone, Copy)]
struct QueryWord<'a> {
    data: &'a str,
    is_minus: bool,
    is_stop: bool,
}

/// A parsed query: sorted, deduplicated plus and minus terms, and the stop
/// terms that were recognized and dropped.
#[derive(Debug, Default)]
pub(crate) struct ParsedQuery<'a> {
    pub plus: Vec<&'a str>,
    pub minus: Vec<&'a str>,
    pub stop: Vec<&'a str>,
}

fn parse_query_word<'a>(text: &'a str, stop_words: &BTreeSet<String>) -> Result<QueryWord<'a>> {
    let (data, is_minus) = match text.strip_prefix('-') {
        Some(rest) => (rest, true),
        None => (text, false),
    };
    if data.is_empty() || data.starts_with('-') || !is_valid_word(data) {
        return Err(Error::InvalidQuery(text.to_string()));
    }
    Ok(QueryWord {
        data,
        is_minus,
        is_stop: stop_words.contains(data),
    })
}

/// Parse a raw query against a stop-word set.
///
/// Fails on the first malformed token; a failed parse reports the token as it
/// appeared in the query, minus sign included.
pub(crate) fn parse_query<'a>(
    text: &'a str,
    stop_words: &BTreeSet<String>,
) -> Result<ParsedQuery<'a>> {
    let mut query = ParsedQuery::default();
    for word in split_words(text) {
        let parsed = parse_query_word(word, stop_words)?;
        if parsed.is_stop {
            query.stop.push(parsed.data);
        } else if parsed.is_minus {
            query.minus.push(parsed.data);
        } else {
            query.plus.push(parsed.data);
        }
    }
    query.plus.sort_unstable();
    query.plus.dedup();
    query.minus.sort_unstable();
    query.minus.dedup();
    Ok(query)
}
