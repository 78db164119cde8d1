// src/domain/error.rs
use crate::domain::bookmark::BookmarkBuilderError;
use crate::domain::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Invalid tag: {0}")]
    InvalidTag(String),

    #[error("Bookmark not found: {0}")]
    BookmarkNotFound(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Bookmark operation failed: {0}")]
    BookmarkOperationFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

impl DomainError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            DomainError::BookmarkOperationFailed(msg) => {
                DomainError::BookmarkOperationFailed(format!("{}: {}", context.into(), msg))
            }
            DomainError::RepositoryError(msg) => {
                DomainError::RepositoryError(format!("{}: {}", context.into(), msg))
            }
            DomainError::Other(msg) => DomainError::Other(format!("{}: {}", context.into(), msg)),
            err => err,
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

impl From<BookmarkBuilderError> for DomainError {
    fn from(e: BookmarkBuilderError) -> Self {
        DomainError::BookmarkOperationFailed(e.to_string())
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation(errors)
    }
}
