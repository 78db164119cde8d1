// src/cli/error.rs
use crate::application::error::ApplicationError;
use crate::controller::ControllerError;
use crate::domain::error::DomainError;
use crate::domain::validation::ValidationErrors;
use crate::exitcode;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not authorized: {0}")]
    Denied(String),

    #[error("Rejected: {0}")]
    Rejected(ValidationErrors),

    #[error("{0}")]
    Controller(#[from] ControllerError),

    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub fn context<C: Into<String>>(self, context: C) -> Self {
        match self {
            CliError::CommandFailed(msg) => {
                CliError::CommandFailed(format!("{}: {}", context.into(), msg))
            }
            CliError::InvalidInput(msg) => {
                CliError::InvalidInput(format!("{}: {}", context.into(), msg))
            }
            CliError::Application(err) => CliError::Application(err.context(context)),
            CliError::Other(msg) => CliError::Other(format!("{}: {}", context.into(), msg)),
            err => CliError::Other(format!("{}: {}", context.into(), err)),
        }
    }

    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Denied(_) => exitcode::NOPERM,
            CliError::Rejected(_) => exitcode::DATAERR,
            CliError::Controller(ControllerError::NotFound(_)) => exitcode::NOINPUT,
            CliError::Application(err) if err.is_not_found() => exitcode::NOINPUT,
            CliError::Application(ApplicationError::Validation(_)) => exitcode::DATAERR,
            _ => exitcode::USAGE,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Application(ApplicationError::Domain(err))
    }
}

impl From<crate::infrastructure::repositories::sqlite::error::SqliteRepositoryError> for CliError {
    fn from(
        err: crate::infrastructure::repositories::sqlite::error::SqliteRepositoryError,
    ) -> Self {
        CliError::Application(ApplicationError::Domain(err.into()))
    }
}

pub type CliResult<T> = Result<T, CliError>;
