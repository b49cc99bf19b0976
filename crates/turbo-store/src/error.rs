//! Store error types.

use thiserror::Error;

/// Errors that can occur when using a repository.
#[derive(Error, Debug)]
pub enum StoreError {
    /// An entity with the same id already exists.
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: String },

    /// The repository lock was poisoned by a panicking writer.
    #[error("Repository for {0} is poisoned")]
    Poisoned(&'static str),
}
