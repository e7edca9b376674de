//! Error types shared by the store layer and the handlers

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No record exists for the given identifier
    #[error("not found: {0}")]
    NotFound(String),

    /// Submitted text failed URL validation
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// Every generated identifier collided with an existing row
    #[error("could not generate a free identifier after {0} attempts")]
    IdSpaceExhausted(usize),

    /// Record serialization error
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Storage engine errors
    #[error("storage error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("storage error: {0}")]
    Table(#[from] redb::TableError),

    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("storage error: {0}")]
    Commit(#[from] redb::CommitError),
}
