//! Store invariants: reference exclusivity, monotonic candidate retention,
//! typed conflicts, never-reused ids, and file-backed persistence.

mod util;

use ordo::{SolutionKind, StoreError};

#[test]
fn test_reference_exclusivity_across_redesignations()
{
    let store = util::mem_store();
    let pid = store
        .create_problem("rotate a matrix in place")
        .expect("create");

    for (i, content) in ["transpose then reverse rows", "layer-by-layer swap"]
        .iter()
        .enumerate()
    {
        store
            .save_reference(
                pid,
                SolutionKind::Pseudocode,
                content,
                &util::sample_cfg("rotate"),
                "O(n^2)",
                "O(1)",
                None,
                None,
            )
            .unwrap_or_else(|e| panic!("reference #{i} failed: {e}"));
    }

    let solutions = store
        .solutions_for(pid)
        .expect("list solutions");
    let references: Vec<_> = solutions
        .iter()
        .filter(|s| s.is_reference)
        .collect();

    assert_eq!(solutions.len(), 2, "demotion keeps history, never deletes");
    assert_eq!(references.len(), 1, "exactly one reference may exist");
    assert_eq!(references[0].content, "layer-by-layer swap");
}

#[test]
fn test_monotonic_candidate_retention()
{
    let store = util::mem_store();
    let pid = store
        .create_problem("two sum")
        .expect("create");

    let submit = |content: &str, score: i64| {
        store.upsert_candidate_solution(
            pid,
            "alice",
            SolutionKind::Pseudocode,
            content,
            &util::sample_cfg("two-sum"),
            score,
            None,
        )
    };

    let id = submit("hash map single pass", 85).expect("first submission");

    // A lower-scoring resubmission never lowers the recorded score
    let same = submit("brute force", 30).expect("lower resubmission");
    assert_eq!(same, id);
    let row = store
        .solution(id)
        .expect("read")
        .expect("row exists");
    assert_eq!(row.evaluation_score, Some(85));
    assert_eq!(row.content, "hash map single pass");

    // A higher-scoring one updates the same row
    let better = submit("hash map, early exit", 92).expect("higher resubmission");
    assert_eq!(better, id);
    let row = store
        .solution(id)
        .expect("read")
        .expect("row exists");
    assert_eq!(row.evaluation_score, Some(92));
}

#[test]
fn test_duplicate_create_is_a_typed_conflict()
{
    let store = util::mem_store();
    store
        .create_problem("count inversions in an array")
        .expect("create");

    let err = store
        .create_problem("Count inversions in a list")
        .expect_err("same normalized statement must conflict");
    assert!(matches!(err, StoreError::Conflict(_)), "got {err:?}");
}

#[test]
fn test_invariant_violation_rolls_back_cleanly()
{
    let store = util::mem_store();
    let pid = store
        .create_problem("validate parentheses")
        .expect("create");

    store
        .save_solution(
            pid,
            SolutionKind::Pseudocode,
            "stack walk",
            &util::sample_cfg("parens"),
            true,
            None,
            None,
            None,
        )
        .expect("first reference");

    // A second raw reference insert without demotion is rejected before
    // commit, leaving the store untouched
    let err = store
        .save_solution(
            pid,
            SolutionKind::Flowchart,
            "stack walk, drawn",
            &util::sample_cfg("parens"),
            true,
            None,
            None,
            None,
        )
        .expect_err("second reference must be rejected");
    assert!(matches!(err, StoreError::InvariantViolation(_)));

    assert_eq!(
        store
            .solutions_for(pid)
            .expect("list")
            .len(),
        1
    );
}

#[test]
fn test_problem_ids_are_never_reused()
{
    let store = util::mem_store();
    let a = store.create_problem("problem a").expect("a");
    let b = store.create_problem("problem b").expect("b");
    assert!(b > a);

    assert!(store.delete_problem(b).expect("delete"));

    let c = store.create_problem("problem c").expect("c");
    assert!(
        c > b,
        "id of deleted problem {b:?} must not be reassigned as {c:?}"
    );
}

#[test]
fn test_file_store_persists_across_reopen()
{
    let dir = tempfile::tempdir().expect("tempdir");

    let pid = {
        let store = util::file_store(&dir);
        let pid = store
            .create_problem("find the diameter of a tree")
            .expect("create");
        store
            .save_reference(
                pid,
                SolutionKind::Pseudocode,
                "two BFS passes",
                &util::sample_cfg("diameter"),
                "O(n)",
                "O(n)",
                Some("trees"),
                None,
            )
            .expect("reference");
        pid
    };

    // Reopen: ensure_schema is idempotent and the data is still there
    let store = util::file_store(&dir);
    store.ensure_schema().expect("schema is idempotent");

    let problem = store
        .problem(pid)
        .expect("read")
        .expect("problem survived reopen");
    assert_eq!(problem.optimal_time_complexity.as_deref(), Some("O(n)"));
    assert_eq!(problem.category.as_deref(), Some("trees"));

    let solutions = store
        .solutions_for(pid)
        .expect("solutions");
    assert_eq!(solutions.len(), 1);
    assert!(solutions[0].is_reference);
}

#[test]
fn test_comparison_history_newest_first()
{
    let store = util::mem_store();
    let pid = store
        .create_problem("merge intervals")
        .expect("create");

    let mut ids = Vec::new();
    for (owner, score) in [("alice", 90), ("bob", 70), ("carol", 50)]
    {
        let id = store
            .upsert_candidate_solution(
                pid,
                owner,
                SolutionKind::Pseudocode,
                "solution body",
                &util::sample_cfg("intervals"),
                score,
                None,
            )
            .expect("candidate");
        ids.push(id);
    }

    let verdict = serde_json::json!({ "note": "time tie, space decided" });
    store
        .record_comparison(pid, ids[0], ids[1], ordo::Winner::A, &verdict)
        .expect("first record");
    store
        .record_comparison(pid, ids[1], ids[2], ordo::Winner::Tie, &verdict)
        .expect("second record");

    let history = store
        .comparisons_for(pid, 10)
        .expect("history");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].winner, ordo::Winner::Tie, "newest first");
    assert_eq!(history[1].winner, ordo::Winner::A);

    let capped = store
        .comparisons_for(pid, 1)
        .expect("capped history");
    assert_eq!(capped.len(), 1);
}
