// src/infrastructure/repositories/sqlite/tag_repository.rs

use diesel::prelude::*;
use tracing::instrument;

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use crate::domain::error::DomainError;
use crate::domain::repositories::repository::TagRepository;
use crate::domain::tag::Tag;
use crate::infrastructure::repositories::sqlite::model::DbTag;
use crate::infrastructure::repositories::sqlite::schema::tags;

#[derive(Clone, Debug)]
pub struct SqliteTagRepository {
    pool: ConnectionPool,
}

impl SqliteTagRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }
}

impl From<DbTag> for Tag {
    fn from(row: DbTag) -> Self {
        Tag::new(row.id, row.title)
    }
}

impl TagRepository for SqliteTagRepository {
    #[instrument(skip_all, level = "debug", fields(titles = ?titles))]
    fn find_by_titles(&self, titles: &[String]) -> Result<Vec<Tag>, DomainError> {
        if titles.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.get_connection()?;

        let rows = tags::table
            .filter(tags::title.eq_any(titles))
            .select(DbTag::as_select())
            .load(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }

    #[instrument(skip_all, level = "debug")]
    fn get_all(&self) -> Result<Vec<Tag>, DomainError> {
        let mut conn = self.get_connection()?;

        let rows = tags::table
            .order(tags::title.asc())
            .select(DbTag::as_select())
            .load(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(rows.into_iter().map(Tag::from).collect())
    }
}
