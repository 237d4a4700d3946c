//! Problem statement identity and fuzzy matching.
//!
//! A statement is canonicalized (casefold, whitespace collapse, synonym
//! substitution) and content-hashed for exact-duplicate lookup; when the
//! hash misses, a pluggable matcher scans the stored corpus for the best
//! sequence-similarity ratio above a threshold.

use std::sync::LazyLock;

use rayon::prelude::*;
use regex::Regex;
use serde::{Deserialize, Serialize};
use similar::TextDiff;

/// Default acceptance threshold for fuzzy statement matches.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Fixed synonym table, applied in order after casefolding. Trivially
/// reworded statements normalize to the same text and therefore hash-match
/// without the fuzzy fallback.
const SYNONYMS: &[(&str, &str)] = &[
    ("array", "list"),
    ("maximum", "max"),
    ("minimum", "min"),
    ("integer", "int"),
    ("string", "str"),
];

static WS_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Canonical textual form of a problem statement.
///
/// Lowercase, single-space separated, trimmed, synonyms substituted.
/// Idempotent: `normalize(normalize(s)) == normalize(s)`.
pub fn normalize(statement: &str) -> String {
    let lowered = statement.to_lowercase();
    let mut out = WS_RUN.replace_all(lowered.trim(), " ").into_owned();

    for (from, to) in SYNONYMS {
        out = out.replace(from, to);
    }

    out
}

/// Content hash of the normalized statement (identity, not security).
pub fn statement_hash(statement: &str) -> String {
    blake3::hash(normalize(statement).as_bytes())
        .to_hex()
        .to_string()
}

/// Symmetric LCS-based sequence similarity in `[0, 1]`.
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    f64::from(TextDiff::from_chars(a, b).ratio())
}

/// One stored problem as seen by the matcher: its id and normalized text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemDigest {
    pub id: i64,
    pub normalized: String,
}

/// A fuzzy match against the stored corpus.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarityHit {
    pub id: i64,
    pub score: f64,
}

/// Pluggable fuzzy-match strategy over the stored problem corpus.
///
/// The contract is best-ratio-at-or-above-threshold with ties broken
/// toward earlier insertion order; an indexed approximate-match structure
/// may replace the default scan as long as that holds.
pub trait SimilarityMatcher: Send + Sync {
    /// Best match for `normalized` (already in `normalize()` form) among
    /// `corpus`, or `None` when nothing reaches `threshold`.
    fn find_similar(
        &self,
        normalized: &str,
        corpus: &[ProblemDigest],
        threshold: f64,
    ) -> Option<SimilarityHit>;
}

/// Default matcher: full-corpus sequence-ratio scan.
///
/// Problem volume is assumed small; the scan is a parallel map with a
/// deterministic reduce (higher score wins, exact ties prefer the lower,
/// earlier-inserted id).
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffRatioMatcher;

impl SimilarityMatcher for DiffRatioMatcher {
    fn find_similar(
        &self,
        normalized: &str,
        corpus: &[ProblemDigest],
        threshold: f64,
    ) -> Option<SimilarityHit> {
        let best = corpus
            .par_iter()
            .map(|digest| SimilarityHit {
                id: digest.id,
                score: sequence_ratio(normalized, &digest.normalized),
            })
            .reduce_with(|lhs, rhs| {
                if rhs.score > lhs.score || (rhs.score == lhs.score && rhs.id < lhs.id) {
                    rhs
                } else {
                    lhs
                }
            })?;

        if best.score >= threshold {
            tracing::debug!(id = best.id, score = best.score, "fuzzy statement match");
            Some(best)
        } else {
            None
        }
    }
}
