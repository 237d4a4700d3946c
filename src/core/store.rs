//! Problem/solution persistence.
//!
//! The store exclusively owns durable identity: problems keyed by a
//! normalized-statement hash, at most one reference solution per problem,
//! and the best-scoring candidate per (problem, owner). Every write path is
//! a single connection-scoped transaction that rolls back entirely on error,
//! so a crash mid-update can never leave two reference solutions or a
//! downgraded score behind.

use std::cmp::Ordering;
use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, ErrorCode, OptionalExtension, Transaction, params};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use crate::core::identity::{
    self, DEFAULT_SIMILARITY_THRESHOLD, DiffRatioMatcher, ProblemDigest, SimilarityMatcher,
};

pub type Result<T> = std::result::Result<T, StoreError>;

/// Typed store failures; callers can tell "not found" from "conflict"
/// from genuine storage trouble.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Two inserts raced on the same statement hash
    #[error("a problem already exists for this statement (hash {0})")]
    Conflict(String),

    /// A write would break a store invariant before commit
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("storage failure: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("payload serialization failure: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProblemId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SolutionId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComparisonId(pub i64);

/// Representation a solution was submitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolutionKind {
    Flowchart,
    Pseudocode,
}

impl SolutionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SolutionKind::Flowchart => "flowchart",
            SolutionKind::Pseudocode => "pseudocode",
        }
    }

    fn from_db(s: &str) -> Self {
        match s {
            "flowchart" => SolutionKind::Flowchart,
            _ => SolutionKind::Pseudocode,
        }
    }
}

/// Outcome of an ordered (first vs. second) solution comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    A,
    B,
    Tie,
}

impl Winner {
    pub fn as_str(self) -> &'static str {
        match self {
            Winner::A => "a",
            Winner::B => "b",
            Winner::Tie => "tie",
        }
    }

    fn from_db(s: &str) -> Self {
        match s {
            "a" => Winner::A,
            "b" => Winner::B,
            _ => Winner::Tie,
        }
    }
}

impl From<Ordering> for Winner {
    fn from(ord: Ordering) -> Self {
        match ord {
            Ordering::Less => Winner::A,
            Ordering::Greater => Winner::B,
            Ordering::Equal => Winner::Tie,
        }
    }
}

/// A stored problem record.
#[derive(Debug, Clone, Serialize)]
pub struct Problem {
    pub id: ProblemId,
    pub statement: String,
    pub statement_hash: String,
    /// Opaque canonical CFG payload; null until a reference is designated
    pub canonical_cfg: Option<Json>,
    pub optimal_time_complexity: Option<String>,
    pub optimal_space_complexity: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A stored solution record.
#[derive(Debug, Clone, Serialize)]
pub struct Solution {
    pub id: SolutionId,
    pub problem_id: ProblemId,
    pub kind: SolutionKind,
    pub content: String,
    /// Opaque CFG payload
    pub cfg: Json,
    pub evaluation_score: Option<i64>,
    pub eval_result: Option<Json>,
    pub is_reference: bool,
    pub owner: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A recorded comparator outcome between two stored solutions.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRecord {
    pub id: ComparisonId,
    pub problem_id: ProblemId,
    pub solution_a: SolutionId,
    pub solution_b: SolutionId,
    pub winner: Winner,
    /// Opaque verdict payload (complexity strings, weights, upstream scores)
    pub verdict: Json,
    pub created_at: DateTime<Utc>,
}

/// Result of `upsert_problem`.
#[derive(Debug, Clone, Serialize)]
pub struct ProblemUpsert {
    pub id: ProblemId,
    pub canonical_cfg: Option<Json>,
    /// Set only when the fuzzy fallback matched; exact hits and fresh
    /// inserts leave it empty
    pub similarity: Option<f64>,
    pub created: bool,
}

/// Tunables carried by the store.
#[derive(Debug, Clone, Copy)]
pub struct StoreOptions {
    /// Acceptance threshold for fuzzy statement matches
    pub similarity_threshold: f64,
    /// Stored solution content is clipped to this many characters
    pub content_limit: usize,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            content_limit: 1000,
        }
    }
}

const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS problems (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    statement TEXT NOT NULL,
    statement_hash TEXT NOT NULL UNIQUE,
    canonical_cfg TEXT,
    optimal_time_complexity TEXT,
    optimal_space_complexity TEXT,
    category TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS solutions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    problem_id INTEGER NOT NULL REFERENCES problems (id) ON DELETE CASCADE,
    kind TEXT NOT NULL,
    content TEXT NOT NULL,
    cfg TEXT NOT NULL,
    evaluation_score INTEGER,
    eval_result TEXT,
    is_reference INTEGER NOT NULL DEFAULT 0,
    owner TEXT,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_solutions_problem ON solutions (problem_id);

CREATE UNIQUE INDEX IF NOT EXISTS uq_solutions_reference
    ON solutions (problem_id) WHERE is_reference = 1;

CREATE UNIQUE INDEX IF NOT EXISTS uq_solutions_candidate
    ON solutions (problem_id, owner) WHERE is_reference = 0 AND owner IS NOT NULL;

CREATE TABLE IF NOT EXISTS comparisons (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    problem_id INTEGER NOT NULL REFERENCES problems (id) ON DELETE CASCADE,
    solution_a INTEGER NOT NULL REFERENCES solutions (id) ON DELETE CASCADE,
    solution_b INTEGER NOT NULL REFERENCES solutions (id) ON DELETE CASCADE,
    winner TEXT NOT NULL,
    verdict TEXT NOT NULL,
    created_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_comparisons_problem ON comparisons (problem_id);
";

/// SQLite-backed problem/solution store.
///
/// Construction is explicit and runs the idempotent schema step once; there
/// is no import-time side effect. File-backed stores use WAL so concurrent
/// readers coexist with the single writer.
pub struct Store {
    conn: Mutex<Connection>,
    matcher: Box<dyn SimilarityMatcher>,
    options: StoreOptions,
}

impl Store {
    /// Open (or create) a store at the given path.
    pub fn open(path: &Path, options: StoreOptions) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self {
            conn: Mutex::new(conn),
            matcher: Box::new(DiffRatioMatcher),
            options,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Create an in-memory store (tests, throwaway runs).
    pub fn in_memory(options: StoreOptions) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self {
            conn: Mutex::new(conn),
            matcher: Box::new(DiffRatioMatcher),
            options,
        };
        store.ensure_schema()?;
        Ok(store)
    }

    /// Swap the fuzzy-match strategy (e.g. for an indexed matcher).
    pub fn with_matcher(mut self, matcher: Box<dyn SimilarityMatcher>) -> Self {
        self.matcher = matcher;
        self
    }

    /// Idempotent schema + pragma setup. Runs at construction; safe to call
    /// again at process startup.
    pub fn ensure_schema(&self) -> Result<()> {
        let conn = self.lock();

        conn.execute_batch(
            "PRAGMA synchronous = NORMAL;
             PRAGMA foreign_keys = ON;",
        )?;

        // WAL is rejected for in-memory databases; that is fine
        let _ = conn.execute_batch("PRAGMA journal_mode = WAL;");

        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    // ── Problems ───────────────────────────────────────────────────

    /// Insert a new problem. A duplicate normalized statement is a typed
    /// `Conflict`, not a crash; callers should retry as a lookup.
    pub fn create_problem(&self, statement: &str) -> Result<ProblemId> {
        let hash = identity::statement_hash(statement);
        let conn = self.lock();
        let id = Self::insert_problem(&conn, statement, &hash)?;
        tracing::info!(problem = id.0, "created problem");
        Ok(id)
    }

    /// Exact-hash lookup, then fuzzy fallback, then insert.
    ///
    /// An insert race on the hash is absorbed by one re-lookup (the
    /// retry-as-lookup the conflict contract prescribes).
    pub fn upsert_problem(&self, statement: &str) -> Result<ProblemUpsert> {
        let normalized = identity::normalize(statement);
        let hash = identity::statement_hash(statement);
        let conn = self.lock();

        if let Some(p) = Self::problem_by_hash_inner(&conn, &hash)? {
            return Ok(ProblemUpsert {
                id: p.id,
                canonical_cfg: p.canonical_cfg,
                similarity: None,
                created: false,
            });
        }

        let corpus = Self::digests(&conn)?;
        if let Some(hit) =
            self.matcher
                .find_similar(&normalized, &corpus, self.options.similarity_threshold)
        {
            let p = Self::problem_inner(&conn, ProblemId(hit.id))?
                .ok_or(StoreError::NotFound("problem"))?;
            return Ok(ProblemUpsert {
                id: p.id,
                canonical_cfg: p.canonical_cfg,
                similarity: Some(hit.score),
                created: false,
            });
        }

        match Self::insert_problem(&conn, statement, &hash) {
            Ok(id) => {
                tracing::info!(problem = id.0, "created problem");
                Ok(ProblemUpsert {
                    id,
                    canonical_cfg: None,
                    similarity: None,
                    created: true,
                })
            }
            Err(StoreError::Conflict(_)) => {
                let p = Self::problem_by_hash_inner(&conn, &hash)?
                    .ok_or(StoreError::Conflict(hash))?;
                Ok(ProblemUpsert {
                    id: p.id,
                    canonical_cfg: p.canonical_cfg,
                    similarity: None,
                    created: false,
                })
            }
            Err(e) => Err(e),
        }
    }

    /// Idempotent upsert of the canonical fields a reference designation
    /// produces. `category = None` leaves any previous category in place.
    pub fn set_reference_cfg(
        &self,
        problem_id: ProblemId,
        cfg: &Json,
        time_complexity: &str,
        space_complexity: &str,
        category: Option<&str>,
    ) -> Result<()> {
        let conn = self.lock();
        let cfg_json = serde_json::to_string(cfg)?;
        let changed = conn.execute(
            "UPDATE problems SET canonical_cfg = ?1,
                 optimal_time_complexity = ?2,
                 optimal_space_complexity = ?3,
                 category = COALESCE(?4, category),
                 updated_at = ?5
             WHERE id = ?6",
            params![
                cfg_json,
                time_complexity,
                space_complexity,
                category,
                now(),
                problem_id.0
            ],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound("problem"));
        }
        Ok(())
    }

    /// Remove a problem and everything hanging off it. Problem ids are
    /// never reused afterwards (AUTOINCREMENT semantics).
    pub fn delete_problem(&self, problem_id: ProblemId) -> Result<bool> {
        let conn = self.lock();
        let deleted = conn.execute("DELETE FROM problems WHERE id = ?1", params![problem_id.0])?;
        Ok(deleted > 0)
    }

    pub fn problem(&self, problem_id: ProblemId) -> Result<Option<Problem>> {
        let conn = self.lock();
        Self::problem_inner(&conn, problem_id)
    }

    pub fn problem_by_hash(&self, hash: &str) -> Result<Option<Problem>> {
        let conn = self.lock();
        Self::problem_by_hash_inner(&conn, hash)
    }

    pub fn list_problems(&self) -> Result<Vec<Problem>> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT * FROM problems ORDER BY id")?;
        let problems = stmt
            .query_map([], Self::row_to_problem)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(problems)
    }

    // ── Solutions ──────────────────────────────────────────────────

    /// Designate the canonical reference solution: demote the previous
    /// reference, insert the new one, and upsert the problem's canonical
    /// fields, all in one transaction.
    #[allow(clippy::too_many_arguments)]
    pub fn save_reference(
        &self,
        problem_id: ProblemId,
        kind: SolutionKind,
        content: &str,
        cfg: &Json,
        time_complexity: &str,
        space_complexity: &str,
        category: Option<&str>,
        owner: Option<&str>,
    ) -> Result<SolutionId> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        let cfg_json = serde_json::to_string(cfg)?;
        let changed = tx.execute(
            "UPDATE problems SET canonical_cfg = ?1,
                 optimal_time_complexity = ?2,
                 optimal_space_complexity = ?3,
                 category = COALESCE(?4, category),
                 updated_at = ?5
             WHERE id = ?6",
            params![
                cfg_json,
                time_complexity,
                space_complexity,
                category,
                now(),
                problem_id.0
            ],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound("problem"));
        }

        Self::demote_in_tx(&tx, problem_id)?;
        let id = Self::insert_solution(
            &tx,
            problem_id,
            kind,
            content,
            cfg,
            true,
            owner,
            None,
            None,
            self.options.content_limit,
        )?;

        tx.commit()?;
        tracing::info!(
            problem = problem_id.0,
            solution = id.0,
            "designated reference solution"
        );
        Ok(id)
    }

    /// Clear `is_reference` on any existing reference for the problem.
    pub fn demote_reference(&self, problem_id: ProblemId) -> Result<()> {
        let conn = self.lock();
        conn.execute(
            "UPDATE solutions SET is_reference = 0
             WHERE problem_id = ?1 AND is_reference = 1",
            params![problem_id.0],
        )?;
        Ok(())
    }

    /// Raw solution insert. Marking a second reference without demotion is
    /// rejected before commit (`InvariantViolation`).
    #[allow(clippy::too_many_arguments)]
    pub fn save_solution(
        &self,
        problem_id: ProblemId,
        kind: SolutionKind,
        content: &str,
        cfg: &Json,
        is_reference: bool,
        owner: Option<&str>,
        score: Option<i64>,
        eval_result: Option<&Json>,
    ) -> Result<SolutionId> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;
        let id = Self::insert_solution(
            &tx,
            problem_id,
            kind,
            content,
            cfg,
            is_reference,
            owner,
            score,
            eval_result,
            self.options.content_limit,
        )?;
        tx.commit()?;
        Ok(id)
    }

    /// Monotonic best-score retention for the (problem, owner) candidate
    /// row: missing -> insert; stored score >= new -> untouched; else
    /// update in place. A resubmission never lowers a recorded score.
    #[allow(clippy::too_many_arguments)]
    pub fn upsert_candidate_solution(
        &self,
        problem_id: ProblemId,
        owner: &str,
        kind: SolutionKind,
        content: &str,
        cfg: &Json,
        score: i64,
        eval_result: Option<&Json>,
    ) -> Result<SolutionId> {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        let existing: Option<(i64, Option<i64>)> = tx
            .query_row(
                "SELECT id, evaluation_score FROM solutions
                 WHERE problem_id = ?1 AND owner = ?2 AND is_reference = 0",
                params![problem_id.0, owner],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let id = match existing {
            Some((id, Some(stored))) if stored >= score => {
                tracing::debug!(
                    solution = id,
                    stored,
                    submitted = score,
                    "kept higher-scoring candidate"
                );
                SolutionId(id)
            }
            Some((id, _)) => {
                let cfg_json = serde_json::to_string(cfg)?;
                let eval_json = eval_result.map(serde_json::to_string).transpose()?;
                tx.execute(
                    "UPDATE solutions SET kind = ?1, content = ?2, cfg = ?3,
                         evaluation_score = ?4, eval_result = ?5
                     WHERE id = ?6",
                    params![
                        kind.as_str(),
                        clip(content, self.options.content_limit),
                        cfg_json,
                        score,
                        eval_json,
                        id
                    ],
                )?;
                SolutionId(id)
            }
            None => Self::insert_solution(
                &tx,
                problem_id,
                kind,
                content,
                cfg,
                false,
                Some(owner),
                Some(score),
                eval_result,
                self.options.content_limit,
            )?,
        };

        tx.commit()?;
        Ok(id)
    }

    pub fn solution(&self, solution_id: SolutionId) -> Result<Option<Solution>> {
        let conn = self.lock();
        conn.query_row(
            "SELECT * FROM solutions WHERE id = ?1",
            params![solution_id.0],
            Self::row_to_solution,
        )
        .optional()
        .map_err(StoreError::Sqlite)
    }

    pub fn solutions_for(&self, problem_id: ProblemId) -> Result<Vec<Solution>> {
        let conn = self.lock();
        let mut stmt = conn.prepare("SELECT * FROM solutions WHERE problem_id = ?1 ORDER BY id")?;
        let solutions = stmt
            .query_map(params![problem_id.0], Self::row_to_solution)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(solutions)
    }

    // ── Comparison records ─────────────────────────────────────────

    /// Persist a comparator outcome between two stored solutions.
    pub fn record_comparison(
        &self,
        problem_id: ProblemId,
        solution_a: SolutionId,
        solution_b: SolutionId,
        winner: Winner,
        verdict: &Json,
    ) -> Result<ComparisonId> {
        let conn = self.lock();
        let verdict_json = serde_json::to_string(verdict)?;
        conn.execute(
            "INSERT INTO comparisons (problem_id, solution_a, solution_b, winner, verdict, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                problem_id.0,
                solution_a.0,
                solution_b.0,
                winner.as_str(),
                verdict_json,
                now()
            ],
        )
        .map_err(|e| {
            if is_constraint(&e) {
                StoreError::NotFound("referenced problem or solution")
            } else {
                StoreError::Sqlite(e)
            }
        })?;

        Ok(ComparisonId(conn.last_insert_rowid()))
    }

    /// Most recent comparisons for a problem, newest first.
    pub fn comparisons_for(
        &self,
        problem_id: ProblemId,
        limit: usize,
    ) -> Result<Vec<ComparisonRecord>> {
        let conn = self.lock();
        let mut stmt = conn.prepare(
            "SELECT * FROM comparisons WHERE problem_id = ?1
             ORDER BY id DESC LIMIT ?2",
        )?;
        let records = stmt
            .query_map(params![problem_id.0, limit as i64], Self::row_to_comparison)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    // ── Internals ──────────────────────────────────────────────────

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().expect("ordo store mutex poisoned")
    }

    fn insert_problem(conn: &Connection, statement: &str, hash: &str) -> Result<ProblemId> {
        let ts = now();
        conn.execute(
            "INSERT INTO problems (statement, statement_hash, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?3)",
            params![statement, hash, ts],
        )
        .map_err(|e| {
            if is_constraint(&e) {
                StoreError::Conflict(hash.to_string())
            } else {
                StoreError::Sqlite(e)
            }
        })?;
        Ok(ProblemId(conn.last_insert_rowid()))
    }

    #[allow(clippy::too_many_arguments)]
    fn insert_solution(
        tx: &Transaction<'_>,
        problem_id: ProblemId,
        kind: SolutionKind,
        content: &str,
        cfg: &Json,
        is_reference: bool,
        owner: Option<&str>,
        score: Option<i64>,
        eval_result: Option<&Json>,
        content_limit: usize,
    ) -> Result<SolutionId> {
        let cfg_json = serde_json::to_string(cfg)?;
        let eval_json = eval_result.map(serde_json::to_string).transpose()?;

        tx.execute(
            "INSERT INTO solutions
                 (problem_id, kind, content, cfg, evaluation_score, eval_result,
                  is_reference, owner, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                problem_id.0,
                kind.as_str(),
                clip(content, content_limit),
                cfg_json,
                score,
                eval_json,
                is_reference,
                owner,
                now()
            ],
        )
        .map_err(|e| {
            if is_constraint(&e) {
                StoreError::InvariantViolation(format!(
                    "solution insert for problem {} breaks a uniqueness rule \
                     (second reference without demotion, duplicate candidate \
                     owner, or unknown problem)",
                    problem_id.0
                ))
            } else {
                StoreError::Sqlite(e)
            }
        })?;

        Ok(SolutionId(tx.last_insert_rowid()))
    }

    fn demote_in_tx(tx: &Transaction<'_>, problem_id: ProblemId) -> Result<()> {
        tx.execute(
            "UPDATE solutions SET is_reference = 0
             WHERE problem_id = ?1 AND is_reference = 1",
            params![problem_id.0],
        )?;
        Ok(())
    }

    /// Corpus view for the fuzzy matcher, in insertion (id) order.
    /// Normalized text is recomputed here; it is not persisted.
    fn digests(conn: &Connection) -> Result<Vec<ProblemDigest>> {
        let mut stmt = conn.prepare("SELECT id, statement FROM problems ORDER BY id")?;
        let digests = stmt
            .query_map([], |row| {
                let id: i64 = row.get(0)?;
                let statement: String = row.get(1)?;
                Ok((id, statement))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?
            .into_iter()
            .map(|(id, statement)| ProblemDigest {
                id,
                normalized: identity::normalize(&statement),
            })
            .collect();
        Ok(digests)
    }

    fn problem_inner(conn: &Connection, problem_id: ProblemId) -> Result<Option<Problem>> {
        conn.query_row(
            "SELECT * FROM problems WHERE id = ?1",
            params![problem_id.0],
            Self::row_to_problem,
        )
        .optional()
        .map_err(StoreError::Sqlite)
    }

    fn problem_by_hash_inner(conn: &Connection, hash: &str) -> Result<Option<Problem>> {
        conn.query_row(
            "SELECT * FROM problems WHERE statement_hash = ?1",
            params![hash],
            Self::row_to_problem,
        )
        .optional()
        .map_err(StoreError::Sqlite)
    }

    fn row_to_problem(row: &rusqlite::Row<'_>) -> rusqlite::Result<Problem> {
        let canonical_cfg: Option<String> = row.get("canonical_cfg")?;
        Ok(Problem {
            id: ProblemId(row.get("id")?),
            statement: row.get("statement")?,
            statement_hash: row.get("statement_hash")?,
            canonical_cfg: canonical_cfg.map(|s| parse_json(&s)),
            optimal_time_complexity: row.get("optimal_time_complexity")?,
            optimal_space_complexity: row.get("optimal_space_complexity")?,
            category: row.get("category")?,
            created_at: parse_ts(&row.get::<_, String>("created_at")?),
            updated_at: parse_ts(&row.get::<_, String>("updated_at")?),
        })
    }

    fn row_to_solution(row: &rusqlite::Row<'_>) -> rusqlite::Result<Solution> {
        let kind: String = row.get("kind")?;
        let cfg: String = row.get("cfg")?;
        let eval_result: Option<String> = row.get("eval_result")?;
        Ok(Solution {
            id: SolutionId(row.get("id")?),
            problem_id: ProblemId(row.get("problem_id")?),
            kind: SolutionKind::from_db(&kind),
            content: row.get("content")?,
            cfg: parse_json(&cfg),
            evaluation_score: row.get("evaluation_score")?,
            eval_result: eval_result.map(|s| parse_json(&s)),
            is_reference: row.get("is_reference")?,
            owner: row.get("owner")?,
            created_at: parse_ts(&row.get::<_, String>("created_at")?),
        })
    }

    fn row_to_comparison(row: &rusqlite::Row<'_>) -> rusqlite::Result<ComparisonRecord> {
        let winner: String = row.get("winner")?;
        let verdict: String = row.get("verdict")?;
        Ok(ComparisonRecord {
            id: ComparisonId(row.get("id")?),
            problem_id: ProblemId(row.get("problem_id")?),
            solution_a: SolutionId(row.get("solution_a")?),
            solution_b: SolutionId(row.get("solution_b")?),
            winner: Winner::from_db(&winner),
            verdict: parse_json(&verdict),
            created_at: parse_ts(&row.get::<_, String>("created_at")?),
        })
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

/// We wrote these columns as valid JSON; a decode miss degrades to null
/// rather than failing a read path.
fn parse_json(s: &str) -> Json {
    serde_json::from_str(s).unwrap_or(Json::Null)
}

fn parse_ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).map_or_else(|_| Utc::now(), |dt| dt.with_timezone(&Utc))
}

/// Char-boundary-safe clip to at most `limit` characters.
fn clip(content: &str, limit: usize) -> &str {
    match content.char_indices().nth(limit) {
        Some((idx, _)) => &content[..idx],
        None => content,
    }
}

fn is_constraint(e: &rusqlite::Error) -> bool {
    matches!(e, rusqlite::Error::SqliteFailure(f, _) if f.code == ErrorCode::ConstraintViolation)
}
