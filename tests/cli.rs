//! End-to-end CLI tests.

use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn ordo() -> Command
{
    Command::cargo_bin("ordo").expect("ordo binary builds")
}

#[test]
fn test_compare_orders_two_expressions()
{
    ordo()
        .args(["--no-color", "compare", "O(n)", "O(n^2)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("O(n) < O(n^2)"));

    ordo()
        .args(["--no-color", "compare", "O(n)", "O(k)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("O(n) = O(k)"));
}

#[test]
fn test_compare_json_output()
{
    ordo()
        .args(["compare", "O(n!)", "O(2^n)", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ordering\":\"greater\""));
}

#[test]
fn test_rank_uses_space_as_tiebreak()
{
    ordo()
        .args(["--no-color", "rank", "O(n)", "O(1)", "O(n)", "O(log n)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first solution wins"));
}

#[test]
fn test_rank_record_requires_solution_ids()
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let db = tmp.child("ordo.db");

    ordo()
        .current_dir(tmp.path())
        .args([
            "--db",
            db.path().to_str().expect("utf-8 path"),
            "rank",
            "O(n)",
            "O(1)",
            "O(n)",
            "O(1)",
            "--record",
            "1",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--first"));
}

#[test]
fn test_problem_upsert_is_idempotent()
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let db = tmp.child("ordo.db");
    let db_arg = db.path().to_str().expect("utf-8 path").to_string();

    ordo()
        .current_dir(tmp.path())
        .args(["--db", &db_arg, "problem", "upsert", "Find the maximum element in an array"])
        .assert()
        .success()
        .stdout(predicate::str::contains("problem 1 (new)"));

    // Synonym rewording lands on the same record via the hash path
    ordo()
        .current_dir(tmp.path())
        .args(["--db", &db_arg, "problem", "upsert", "find the max element in a list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("problem 1 (existing)"));
}

#[test]
fn test_reference_then_candidate_flow()
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let db = tmp.child("ordo.db");
    let db_arg = db.path().to_str().expect("utf-8 path").to_string();

    ordo()
        .current_dir(tmp.path())
        .args(["--db", &db_arg, "problem", "upsert", "reverse a linked list"])
        .assert()
        .success();

    ordo()
        .current_dir(tmp.path())
        .args([
            "--db", &db_arg,
            "reference", "1",
            "--content", "walk and relink",
            "--time", "O(n)",
            "--space", "O(1)",
            "--category", "lists",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("reference solution"));

    ordo()
        .current_dir(tmp.path())
        .args([
            "--db", &db_arg,
            "candidate", "1",
            "--owner", "alice",
            "--content", "recursive relink",
            "--score", "80",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("score 80"));

    // A lower-scoring resubmission is reported as kept, not replaced
    ordo()
        .current_dir(tmp.path())
        .args([
            "--db", &db_arg,
            "candidate", "1",
            "--owner", "alice",
            "--content", "array copy reversal",
            "--score", "35",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("kept earlier score 80"));

    ordo()
        .current_dir(tmp.path())
        .args(["--db", &db_arg, "problem", "show", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("[reference]")
                .and(predicate::str::contains("[candidate]"))
                .and(predicate::str::contains("optimal time:  O(n)")),
        );
}

#[test]
fn test_problem_list_renders_table()
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");
    let db = tmp.child("ordo.db");
    let db_arg = db.path().to_str().expect("utf-8 path").to_string();

    ordo()
        .current_dir(tmp.path())
        .args(["--db", &db_arg, "problem", "upsert", "sort a list of integers"])
        .assert()
        .success();

    ordo()
        .current_dir(tmp.path())
        .args(["--db", &db_arg, "problem", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sort a list of integers"));
}

#[test]
fn test_init_writes_config_once()
{
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    ordo()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .success();
    tmp.child("ordo.toml")
        .assert(predicate::path::exists());

    // A second init without --force must refuse
    ordo()
        .current_dir(tmp.path())
        .arg("init")
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[test]
fn test_completions_to_stdout()
{
    ordo()
        .args(["completions", "bash", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ordo"));
}
