//! Lead deduplication
//!
//! A candidate is a duplicate when its identity key (lower-cased email) is
//! already used by a lead in the corpus or by an earlier accepted candidate of
//! the same batch. Candidates without an email have no identity and are always
//! accepted.

use std::collections::HashSet;

use crate::models::Lead;

/// Deduplication result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DedupOutcome {
    /// Accepted candidates, in input order
    pub unique: Vec<Lead>,
    /// Rejected candidate count
    pub duplicates: usize,
}

/// Drop candidates whose identity collides with `existing` or an earlier candidate
///
/// **Algorithm:**
/// 1. Collect identity keys of the existing corpus
/// 2. Scan candidates in order; reject keyed candidates whose key is known
/// 3. Remember the key of every accepted candidate
pub fn dedupe(candidates: Vec<Lead>, existing: &[Lead]) -> DedupOutcome {
    let mut known: HashSet<String> = existing.iter().filter_map(Lead::identity_key).collect();

    let mut outcome = DedupOutcome {
        unique: Vec::with_capacity(candidates.len()),
        duplicates: 0,
    };

    for candidate in candidates {
        if let Some(key) = candidate.identity_key() {
            if !known.insert(key) {
                outcome.duplicates += 1;
                continue;
            }
        }
        outcome.unique.push(candidate);
    }

    if outcome.duplicates > 0 {
        tracing::debug!(
            accepted = outcome.unique.len(),
            duplicates = outcome.duplicates,
            "Removed duplicate leads"
        );
    }

    outcome
}
