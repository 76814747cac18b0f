//! Report persistence: a key-value backend and the report store on top of it.

pub mod kv;
pub mod reports;

pub use kv::*;
pub use reports::*;

use thiserror::Error;

use crate::db::DatabaseError;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Report encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Storage lock poisoned")]
    LockPoisoned,
}
