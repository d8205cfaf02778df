// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Word splitting and token validation.
//!
//! The splitting rule is narrower than it looks: the separator is the single
//! byte `0x20`, not "whitespace". Tabs and newlines are not separators - they
//! are control bytes, and a token containing one is rejected by
//! [`is_valid_word`]. The engine is otherwise encoding-agnostic; tokens are
//! compared bytewise and never case-folded or normalized.

/// Split a text into maximal runs of non-space bytes.
///
/// Consecutive separators produce no empty tokens; leading and trailing
/// separators are ignored. Validation is the caller's job.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A word is valid iff it contains no byte in `[0x00, 0x20)`.
///
/// The space byte itself can never appear in a word - [`split_words`] consumed
/// it - so this is exactly the "no control bytes" rule.
pub fn is_valid_word(word: &str) -> bool {
    !word.bytes().any(|byte| byte < 0x20)
}
