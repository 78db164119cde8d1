// src/application/error.rs
use crate::domain::error::DomainError;
use crate::domain::validation::ValidationErrors;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Bookmark not found with ID {0}")]
    BookmarkNotFound(i32),

    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("{0}")]
    Other(String),
}

impl ApplicationError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            ApplicationError::Other(msg) => {
                ApplicationError::Other(format!("{}: {}", context.into(), msg))
            }
            ApplicationError::Domain(err) => ApplicationError::Domain(err.context(context)),
            err => err,
        }
    }

    /// True for every flavour of a missing bookmark, whichever layer noticed it
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ApplicationError::BookmarkNotFound(_)
                | ApplicationError::Domain(DomainError::BookmarkNotFound(_))
        )
    }
}

impl From<ValidationErrors> for ApplicationError {
    fn from(errors: ValidationErrors) -> Self {
        ApplicationError::Validation(errors)
    }
}

pub type ApplicationResult<T> = Result<T, ApplicationError>;
