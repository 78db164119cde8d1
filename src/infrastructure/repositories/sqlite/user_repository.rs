// src/infrastructure/repositories/sqlite/user_repository.rs

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use tracing::{info, instrument};

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use crate::domain::error::DomainError;
use crate::domain::repositories::repository::UserRepository;
use crate::domain::user::User;
use crate::infrastructure::repositories::sqlite::model::{DbUser, NewUser};
use crate::infrastructure::repositories::sqlite::schema::users;

#[derive(Clone, Debug)]
pub struct SqliteUserRepository {
    pool: ConnectionPool,
}

impl SqliteUserRepository {
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }
}

impl From<DbUser> for User {
    fn from(row: DbUser) -> Self {
        User {
            id: row.id,
            email: row.email,
            created_at: DateTime::<Utc>::from_naive_utc_and_offset(row.created, Utc),
        }
    }
}

impl UserRepository for SqliteUserRepository {
    #[instrument(skip_all, level = "debug", fields(id = id))]
    fn get_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        let mut conn = self.get_connection()?;

        let row = users::table
            .find(id)
            .select(DbUser::as_select())
            .first(&mut conn)
            .optional()
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(row.map(User::from))
    }

    #[instrument(skip_all, level = "debug", fields(id = id))]
    fn exists(&self, id: i32) -> Result<bool, DomainError> {
        let mut conn = self.get_connection()?;

        let exists = diesel::select(diesel::dsl::exists(users::table.find(id)))
            .get_result::<bool>(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(exists)
    }

    #[instrument(skip_all, level = "debug", fields(email = email))]
    fn add(&self, email: &str) -> Result<User, DomainError> {
        let mut conn = self.get_connection()?;

        let row = diesel::insert_into(users::table)
            .values(&NewUser {
                email,
                created: Utc::now().naive_utc(),
            })
            .returning(DbUser::as_returning())
            .get_result(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        info!("Registered user {} <{}>", row.id, row.email);
        Ok(User::from(row))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::setup_test_db;

    #[test]
    fn given_new_email_when_add_then_user_retrievable() -> Result<(), DomainError> {
        let db = setup_test_db();
        let repo = db.user_repository();

        let user = repo.add("someone@example.com")?;
        assert!(repo.exists(user.id)?);
        assert_eq!(repo.get_by_id(user.id)?.unwrap().email, "someone@example.com");
        assert!(!repo.exists(user.id + 100)?);
        assert!(repo.get_by_id(user.id + 100)?.is_none());
        Ok(())
    }

    #[test]
    fn given_duplicate_email_when_add_then_error() {
        let db = setup_test_db();
        let repo = db.user_repository();
        repo.add("twice@example.com").unwrap();
        assert!(repo.add("twice@example.com").is_err());
    }
}
