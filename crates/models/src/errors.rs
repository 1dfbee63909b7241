use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ModelError {
    /// True when the database rejected an insert on a unique index, i.e. the
    /// storage-layer uniqueness guardian fired behind a passed pre-check.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, ModelError::Db(msg) if msg.contains("duplicate key value violates unique constraint"))
    }
}
