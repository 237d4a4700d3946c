//! **ordo** - Asymptotic-complexity ranking and problem/solution bookkeeping
//! for LLM-evaluated algorithm submissions
//!
//! Totally orders free-text Big-O expressions, decides problem-statement
//! identity (exact hash + fuzzy match), and keeps one canonical reference
//! solution per problem plus the best-scoring candidate per submitter.

/// Command-line interface with clap integration
pub mod cli;

/// Shell completion generation
pub mod completion;

/// Core domain - comparator, identity, and persistence
pub mod core {
    /// Permissive Big-O factor-vector parsing (never fails)
    pub mod complexity;
    pub use complexity::{FactorVector, parse};

    /// Total ordering over complexity expressions (time, then space)
    pub mod ordering;
    pub use ordering::{compare_complexity, compare_overall, weight};

    /// Statement normalization, identity hashing, fuzzy matching
    pub mod identity;
    pub use identity::{
        DiffRatioMatcher, ProblemDigest, SimilarityHit, SimilarityMatcher, normalize,
        statement_hash,
    };

    /// Durable problem/solution records and invariants (SQLite, WAL)
    pub mod store;
    pub use store::{Store, StoreError, StoreOptions};
}

/// Command glue for the CLI surface
pub mod cli_ext {
    /// Per-command runners (open store, call library, print)
    pub mod commands;
}

/// Infrastructure - Configuration (lean architecture)
pub mod infra {
    /// Configuration management with TOML support
    pub mod config;
    pub use config::{Config, init as config_init, load_config};
}

// Strategic re-exports for clean CLI interface
pub use cli::{AppContext, Cli, Commands};
pub use core::{compare_complexity, compare_overall, normalize, parse, statement_hash, weight};
pub use infra::{Config, load_config};

// Core types for external consumers
pub use core::store::{
    ComparisonId, ComparisonRecord, Problem, ProblemId, ProblemUpsert, Solution, SolutionId,
    SolutionKind, Store, StoreError, StoreOptions, Winner,
};
