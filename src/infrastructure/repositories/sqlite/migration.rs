// src/infrastructure/repositories/sqlite/migration.rs
use crate::infrastructure::repositories::sqlite::error::SqliteRepositoryError;
use diesel::{RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations};
use tracing::instrument;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("./migrations");

/// Checks whether a table exists in the connected database
#[instrument(skip(conn), level = "debug")]
pub fn table_exists(conn: &mut SqliteConnection, table: &str) -> Result<bool, SqliteRepositoryError> {
    use diesel::sql_query;
    use diesel::sql_types::{Integer, Text};
    use diesel::QueryableByName;

    #[derive(QueryableByName, Debug)]
    struct TableCheckResult {
        #[diesel(sql_type = Integer)]
        pub table_exists: i32,
    }

    let result: TableCheckResult = sql_query(
        "SELECT COUNT(*) as table_exists FROM sqlite_master WHERE type='table' AND name=?",
    )
    .bind::<Text, _>(table)
    .get_result(conn)
    .map_err(SqliteRepositoryError::DatabaseError)?;

    Ok(result.table_exists > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::testing::setup_test_db;

    #[test]
    fn given_fresh_database_when_migrated_then_all_tables_exist() {
        let db = setup_test_db();
        let mut conn = db.pool.get().unwrap();

        for table in ["users", "bookmarks", "tags", "bookmarks_tags", "__diesel_schema_migrations"] {
            assert!(table_exists(&mut conn, table).unwrap(), "missing table {}", table);
        }
        assert!(!table_exists(&mut conn, "bookmarks_fts").unwrap());
    }
}
