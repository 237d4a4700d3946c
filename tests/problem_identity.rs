//! Problem identity: normalization, hashing, and upsert semantics.

mod util;

use ordo::core::identity::{normalize, statement_hash};

#[test]
fn test_normalize_is_idempotent()
{
    let samples = [
        "Find the maximum element in an array",
        "  SORT   the given integers  ",
        "Reverse\ta string\nin place",
    ];

    for s in samples
    {
        let once = normalize(s);
        assert_eq!(normalize(&once), once, "normalize must be idempotent for {s:?}");
    }
}

#[test]
fn test_synonym_rewordings_hash_identically()
{
    assert_eq!(
        statement_hash("Find the maximum element in an array"),
        statement_hash("find the max element in a list")
    );
    assert_eq!(
        statement_hash("Return the minimum integer"),
        statement_hash("return the min int")
    );
}

#[test]
fn test_example_scenario_merges_on_hash_not_similarity()
{
    let store = util::mem_store();

    let first = store
        .upsert_problem("Find the maximum element in an array")
        .expect("first upsert");
    assert!(first.created);

    // Synonym-normalized hash match; the fuzzy fallback is never consulted,
    // so no similarity score is reported
    let second = store
        .upsert_problem("find the max element in a list")
        .expect("second upsert");
    assert_eq!(second.id, first.id);
    assert!(!second.created);
    assert!(second.similarity.is_none());
}

#[test]
fn test_upsert_called_twice_returns_same_id()
{
    let store = util::mem_store();

    let a = store
        .upsert_problem("Compute the longest increasing subsequence")
        .expect("upsert");
    let b = store
        .upsert_problem("Compute the longest increasing subsequence")
        .expect("upsert again");

    assert_eq!(a.id, b.id);
    assert!(a.created);
    assert!(!b.created);
}

#[test]
fn test_fuzzy_fallback_reports_similarity()
{
    let store = util::mem_store();

    let base = store
        .upsert_problem("find the max element in a list")
        .expect("base upsert");

    let fuzzy = store
        .upsert_problem("find the max element in a list quickly")
        .expect("fuzzy upsert");
    assert_eq!(fuzzy.id, base.id);
    let score = fuzzy.similarity.expect("fuzzy path must report its ratio");
    assert!(score >= 0.85 && score <= 1.0, "score {score} out of range");
}

#[test]
fn test_dissimilar_statement_creates_new_problem()
{
    let store = util::mem_store();

    let base = store
        .upsert_problem("find the max element in a list")
        .expect("base upsert");
    let other = store
        .upsert_problem("detect a cycle in a directed graph")
        .expect("other upsert");

    assert_ne!(other.id, base.id);
    assert!(other.created);
    assert!(other.similarity.is_none());
}

#[test]
fn test_upsert_surfaces_canonical_cfg_once_designated()
{
    let store = util::mem_store();

    let up = store
        .upsert_problem("merge two sorted lists")
        .expect("upsert");
    assert!(up.canonical_cfg.is_none());

    store
        .save_reference(
            up.id,
            ordo::SolutionKind::Pseudocode,
            "two-finger merge",
            &util::sample_cfg("merge"),
            "O(n)",
            "O(1)",
            None,
            None,
        )
        .expect("save reference");

    let again = store
        .upsert_problem("merge two sorted lists")
        .expect("re-upsert");
    assert_eq!(again.id, up.id);
    assert!(again.canonical_cfg.is_some(), "canonical CFG must ride the upsert result");
}
