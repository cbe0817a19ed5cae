use thiserror::Error;

#[derive(Debug, Error)]
pub enum QueryError {
    /// The pool could not hand out a connection: store unreachable or
    /// unopenable.
    #[error("could not connect to the database: {0}")]
    Connection(#[from] r2d2::Error),

    /// Preparing, binding or stepping the statement failed.
    #[error("query failed: {0}")]
    Execution(#[from] rusqlite::Error),

    #[error("missing required filter: {0}")]
    MissingFilter(&'static str),
}

impl QueryError {
    pub fn is_connection(&self) -> bool {
        matches!(self, QueryError::Connection(_))
    }
}
