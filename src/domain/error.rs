//! Error taxonomy for the initialization sequence.
//!
//! No recovery or retry is defined anywhere in this crate: the first failure
//! aborts the remaining sequence and propagates out of `main`.

use thiserror::Error;

/// Boxed driver error attached as the source of a typed failure. Keeps the
/// domain layer free of the concrete driver types.
pub type ErrorSource = Box<dyn std::error::Error + Send + Sync>;

/// The external system rejected creation of the application principal,
/// typically because it already exists or the caller lacks administrative
/// privilege.
#[derive(Debug, Error)]
#[error("failed to create application user `{username}`")]
pub struct CredentialCreationError {
    pub username: String,
    #[source]
    pub source: ErrorSource,
}

/// The external system rejected an index declaration, typically because an
/// index with conflicting options already exists on the same key pattern or
/// the collection could not be created implicitly.
#[derive(Debug, Error)]
#[error("failed to create index {index}")]
pub struct IndexCreationError {
    /// `collection{field,...}` label of the rejected declaration.
    pub index: String,
    #[source]
    pub source: ErrorSource,
}

/// Any failure of the initialization sequence.
#[derive(Debug, Error)]
pub enum InitError {
    #[error(transparent)]
    Credential(#[from] CredentialCreationError),

    #[error(transparent)]
    Index(#[from] IndexCreationError),
}
