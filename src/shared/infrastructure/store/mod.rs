// Persistence adapters shared by every bounded context.
//
// Purpose
// - Implement the repository ports declared in each module's core/ports.rs.
// - Enforce foreign-key integrity: rows referencing missing users or classes are rejected.
//
// Adapters
// - in_memory: tests and local development, can be toggled offline.
// - sqlite: durable storage backed by rusqlite.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("orphaned row: {0}")]
    Orphan(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store offline")]
    Offline,

    #[error("backend error: {0}")]
    Backend(String),
}

pub mod in_memory;
pub mod sqlite;
