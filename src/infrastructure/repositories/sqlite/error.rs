// src/infrastructure/repositories/sqlite/error.rs

use crate::domain::error::DomainError;
use diesel::r2d2;
use diesel::result::Error as DieselError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SqliteRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DieselError),

    #[error("Connection pool error: {0}")]
    ConnectionPoolError(String),

    #[error("Bookmark not found with ID: {0}")]
    BookmarkNotFound(i32),

    #[error("Tag could not be resolved: {0}")]
    TagNotResolved(String),

    #[error("Failed to convert entity: {0}")]
    ConversionError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Migration error: {0}")]
    MigrationError(String),
}

pub type SqliteResult<T> = Result<T, SqliteRepositoryError>;

impl From<r2d2::Error> for SqliteRepositoryError {
    fn from(err: r2d2::Error) -> Self {
        SqliteRepositoryError::ConnectionPoolError(err.to_string())
    }
}

impl From<SqliteRepositoryError> for DomainError {
    fn from(err: SqliteRepositoryError) -> Self {
        match err {
            SqliteRepositoryError::BookmarkNotFound(id) => {
                DomainError::BookmarkNotFound(id.to_string())
            }
            SqliteRepositoryError::DatabaseError(diesel_err) => match diesel_err {
                DieselError::NotFound => {
                    DomainError::BookmarkNotFound("Resource not found".to_string())
                }
                DieselError::DatabaseError(_, info) => DomainError::RepositoryError(format!(
                    "Database error: {}",
                    info.message()
                )),
                _ => DomainError::RepositoryError(format!("Database error: {}", diesel_err)),
            },
            SqliteRepositoryError::ConnectionPoolError(e) => {
                DomainError::RepositoryError(format!("Connection pool error: {}", e))
            }
            SqliteRepositoryError::TagNotResolved(title) => {
                DomainError::RepositoryError(format!("Tag could not be resolved: {}", title))
            }
            SqliteRepositoryError::ConversionError(e) => {
                DomainError::RepositoryError(format!("Data conversion error: {}", e))
            }
            SqliteRepositoryError::IoError(e) => DomainError::Io(e),
            SqliteRepositoryError::MigrationError(e) => {
                DomainError::RepositoryError(format!("Migration error: {}", e))
            }
        }
    }
}
