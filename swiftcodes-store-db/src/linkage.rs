// SPDX-FileCopyrightText: 2025 Jörg Thalheim
// SPDX-License-Identifier: MIT

//! Headquarters/branch linkage rules.
//!
//! A SWIFT/BIC code is 8 or 11 characters. The first 8 identify the
//! institution; the optional last 3 identify a branch, with `XXX` reserved
//! for the headquarters entry. A branch belongs to the headquarters that
//! shares its institution prefix.

use std::collections::BTreeSet;

/// Branch suffix reserved for headquarters entries.
pub const HEADQUARTERS_SUFFIX: &str = "XXX";

/// Number of leading characters identifying the institution.
pub const INSTITUTION_PREFIX_LEN: usize = 8;

/// Whether `code` denotes a headquarters entry.
pub fn is_headquarters(code: &str) -> bool {
    code.ends_with(HEADQUARTERS_SUFFIX)
}

/// The institution part of a code, or `None` if the code is too short.
pub fn institution_prefix(code: &str) -> Option<&str> {
    let end = code
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(code.len()))
        .nth(INSTITUTION_PREFIX_LEN)?;
    Some(&code[..end])
}

/// The headquarters code a branch would belong to.
///
/// Returns `None` if `code` is shorter than the institution prefix or is
/// itself that headquarters code.
pub fn headquarters_candidate(code: &str) -> Option<String> {
    let candidate = format!("{}{HEADQUARTERS_SUFFIX}", institution_prefix(code)?);
    (candidate != code).then_some(candidate)
}

/// Find the headquarters `code` belongs to among `known_headquarters`.
pub fn resolve_headquarters(code: &str, known_headquarters: &BTreeSet<String>) -> Option<String> {
    headquarters_candidate(code).filter(|candidate| known_headquarters.contains(candidate))
}
