//! Shared test utilities for integration tests
//!
//! Provides common fixture creation and helper functions
//! used across multiple test files.

#![allow(dead_code)]

use ordo::{Store, StoreOptions};
use serde_json::{Value as Json, json};

/// Minimal opaque CFG payload in the shape the upstream
/// canonicalization step hands over.
pub fn sample_cfg(label: &str) -> Json
{
    json!({
        "nodes": [
            { "id": "start", "type": "start" },
            { "id": "body", "type": "process", "label": label },
            { "id": "end", "type": "end" }
        ],
        "edges": [
            { "from": "start", "to": "body" },
            { "from": "body", "to": "end" }
        ]
    })
}

/// Open a throwaway on-disk store inside the given temp directory.
/// File-backed so WAL-mode persistence is part of what gets exercised.
pub fn file_store(dir: &tempfile::TempDir) -> Store
{
    Store::open(&dir.path().join("ordo.db"), StoreOptions::default()).expect("open store")
}

/// In-memory store for tests that do not care about the file system.
pub fn mem_store() -> Store
{
    Store::in_memory(StoreOptions::default()).expect("open in-memory store")
}
