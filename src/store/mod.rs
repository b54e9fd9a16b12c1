//! Local dashboard stores
//!
//! Per-profile CRUD over projects, tasks, quick links and writeups. Writes
//! never refresh derived views on their own: every write returns a
//! [`Reload`] naming the view the caller must rebuild.

pub mod database;
pub mod records;
pub mod repository;

pub use database::{Database, ProjectWithTasks, QUICK_TODO_PROJECT_ID, Reload};
pub use records::{Project, QuickLink, Task, Writeup, derive_title};
pub use repository::{MemoryRepository, Record, RecordId, Repository};

/// Store failures
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("no {table} record with id {id}")]
    NotFound { table: &'static str, id: RecordId },
    #[error("id {0} is reserved")]
    ReservedId(RecordId),
    #[error("record already has id {0}")]
    AlreadyStored(RecordId),
    #[error("store snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
