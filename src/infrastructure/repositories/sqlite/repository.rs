// src/infrastructure/repositories/sqlite/repository.rs

use chrono::{DateTime, NaiveDateTime, Utc};
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use itertools::Itertools;
use std::collections::HashMap;
use tracing::{debug, instrument};

use super::connection::{ConnectionPool, PooledConnection};
use super::error::{SqliteRepositoryError, SqliteResult};
use crate::domain::bookmark::{Bookmark, BookmarkBuilder};
use crate::domain::error::DomainError;
use crate::domain::repositories::query::{PageRequest, TagFilter};
use crate::domain::repositories::repository::BookmarkRepository;
use crate::domain::tag::Tag;
use crate::infrastructure::repositories::sqlite::model::{
    DbBookmark, DbBookmarkChanges, DbTag, NewBookmark, NewBookmarkTag, NewTag,
};
use crate::infrastructure::repositories::sqlite::schema::{bookmarks, bookmarks_tags, tags};

#[derive(Clone, Debug)]
pub struct SqliteBookmarkRepository {
    pool: ConnectionPool,
}

impl SqliteBookmarkRepository {
    /// Create a new SQLite repository with the provided connection pool
    pub fn new(pool: ConnectionPool) -> Self {
        Self { pool }
    }

    /// Get a connection from the pool
    #[instrument(skip_all, level = "debug")]
    pub fn get_connection(&self) -> SqliteResult<PooledConnection> {
        self.pool
            .get()
            .map_err(|e| SqliteRepositoryError::ConnectionPoolError(e.to_string()))
    }

    /// Load the tags of several bookmarks in one query, grouped by bookmark ID
    #[instrument(skip_all, level = "trace")]
    fn load_tags(
        conn: &mut SqliteConnection,
        bookmark_ids: &[i32],
    ) -> SqliteResult<HashMap<i32, Vec<Tag>>> {
        if bookmark_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows: Vec<(i32, DbTag)> = bookmarks_tags::table
            .inner_join(tags::table)
            .filter(bookmarks_tags::bookmark_id.eq_any(bookmark_ids))
            .order((bookmarks_tags::bookmark_id.asc(), tags::title.asc()))
            .select((bookmarks_tags::bookmark_id, DbTag::as_select()))
            .load(conn)?;

        Ok(rows
            .into_iter()
            .map(|(bookmark_id, tag)| (bookmark_id, Tag::new(tag.id, tag.title)))
            .into_group_map())
    }

    /// Convert database rows to domain entities, attaching their tags
    #[instrument(skip_all, level = "trace")]
    fn to_domain_models(
        conn: &mut SqliteConnection,
        rows: Vec<DbBookmark>,
    ) -> SqliteResult<Vec<Bookmark>> {
        let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
        let mut tags_by_bookmark = Self::load_tags(conn, &ids)?;

        rows.into_iter()
            .map(|row| {
                let tags = tags_by_bookmark.remove(&row.id).unwrap_or_default();
                Self::to_domain_model(row, tags)
            })
            .collect()
    }

    /// Convert a database model to a domain entity
    fn to_domain_model(db_bookmark: DbBookmark, tags: Vec<Tag>) -> SqliteResult<Bookmark> {
        let id = db_bookmark.id;
        BookmarkBuilder::default()
            .id(id)
            .user_id(db_bookmark.user_id)
            .title(db_bookmark.title)
            .description(db_bookmark.description)
            .url(db_bookmark.url)
            .tags(tags)
            .created_at(DateTime::<Utc>::from_naive_utc_and_offset(
                db_bookmark.created,
                Utc,
            ))
            .modified_at(DateTime::<Utc>::from_naive_utc_and_offset(
                db_bookmark.modified,
                Utc,
            ))
            .build()
            .map_err(|e| {
                SqliteRepositoryError::ConversionError(format!(
                    "Failed to create domain bookmark from DB model for ID {}: {}",
                    id, e
                ))
            })
    }

    /// Give every pending tag an ID, creating the row unless one with the same
    /// title exists already (possibly written by a concurrent save).
    fn resolve_tag_ids(
        conn: &mut SqliteConnection,
        pending: &mut [Tag],
        now: NaiveDateTime,
    ) -> SqliteResult<()> {
        for tag in pending.iter_mut().filter(|tag| !tag.is_persisted()) {
            diesel::insert_or_ignore_into(tags::table)
                .values(&NewTag {
                    title: tag.title(),
                    created: now,
                    modified: now,
                })
                .execute(conn)?;

            let id = tags::table
                .filter(tags::title.eq(tag.title()))
                .select(tags::id)
                .first::<i32>(conn)
                .optional()?
                .ok_or_else(|| SqliteRepositoryError::TagNotResolved(tag.title().to_string()))?;

            debug!("Resolved tag '{}' to ID {}", tag.title(), id);
            tag.set_id(id);
        }
        Ok(())
    }
}

impl BookmarkRepository for SqliteBookmarkRepository {
    #[instrument(skip_all, level = "debug", fields(id = id))]
    fn get_by_id(&self, id: i32) -> Result<Option<Bookmark>, DomainError> {
        let mut pooled = self.get_connection()?;
        let conn: &mut SqliteConnection = &mut pooled;

        let row = bookmarks::table
            .find(id)
            .select(DbBookmark::as_select())
            .first(conn)
            .optional()
            .map_err(SqliteRepositoryError::DatabaseError)?;

        match row {
            Some(row) => Ok(Self::to_domain_models(conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    #[instrument(skip_all, level = "debug", fields(user_id = user_id, page = page.page))]
    fn get_by_owner(
        &self,
        user_id: i32,
        page: PageRequest,
    ) -> Result<Vec<Bookmark>, DomainError> {
        let mut pooled = self.get_connection()?;
        let conn: &mut SqliteConnection = &mut pooled;

        // SQLite takes i64; anything larger lies past the last row anyway
        let limit = i64::try_from(page.limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let rows = bookmarks::table
            .filter(bookmarks::user_id.eq(user_id))
            .order(bookmarks::id.asc())
            .limit(limit)
            .offset(offset)
            .select(DbBookmark::as_select())
            .load(conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(Self::to_domain_models(conn, rows)?)
    }

    #[instrument(skip_all, level = "debug", fields(user_id = user_id))]
    fn count_by_owner(&self, user_id: i32) -> Result<usize, DomainError> {
        let mut conn = self.get_connection()?;

        let count: i64 = bookmarks::table
            .filter(bookmarks::user_id.eq(user_id))
            .count()
            .get_result(&mut conn)
            .map_err(SqliteRepositoryError::DatabaseError)?;

        Ok(count as usize)
    }

    #[instrument(skip_all, level = "debug", fields(filter = ?filter))]
    fn find_tagged(&self, filter: &TagFilter) -> Result<Vec<Bookmark>, DomainError> {
        let mut pooled = self.get_connection()?;
        let conn: &mut SqliteConnection = &mut pooled;

        let rows: Vec<DbBookmark> = match filter {
            TagFilter::Untagged => bookmarks::table
                .left_join(bookmarks_tags::table)
                .filter(bookmarks_tags::tag_id.is_null())
                .order(bookmarks::id.asc())
                .select(DbBookmark::as_select())
                .load(conn),
            TagFilter::AnyOf(titles) => bookmarks::table
                .inner_join(bookmarks_tags::table.inner_join(tags::table))
                .filter(tags::title.eq_any(titles))
                .order(bookmarks::id.asc())
                .select(DbBookmark::as_select())
                .distinct()
                .load(conn),
        }
        .map_err(SqliteRepositoryError::DatabaseError)?;

        debug!("Tag filter matched {} bookmark(s)", rows.len());
        Ok(Self::to_domain_models(conn, rows)?)
    }

    #[instrument(skip_all, level = "debug", fields(id = ?bookmark.id, user_id = bookmark.user_id))]
    fn save(&self, bookmark: &mut Bookmark) -> Result<(), DomainError> {
        let mut pooled = self.get_connection()?;
        let conn: &mut SqliteConnection = &mut pooled;
        let now = bookmark.modified_at.naive_utc();
        let mut pending_tags = bookmark.tags.clone();
        let entity: &Bookmark = bookmark;

        let (id, resolved_tags) = conn.transaction::<_, SqliteRepositoryError, _>(|conn| {
            let id = match entity.id {
                None => {
                    let row = NewBookmark {
                        user_id: entity.user_id,
                        title: entity.title.clone(),
                        description: entity.description.clone(),
                        url: entity.url.clone(),
                        created: entity.created_at.naive_utc(),
                        modified: now,
                    };
                    debug!("Inserting bookmark: {}", row);
                    diesel::insert_into(bookmarks::table)
                        .values(&row)
                        .returning(bookmarks::id)
                        .get_result::<i32>(conn)?
                }
                Some(id) => {
                    let changes = DbBookmarkChanges {
                        user_id: entity.user_id,
                        title: entity.title.clone(),
                        description: entity.description.clone(),
                        url: entity.url.clone(),
                        modified: now,
                    };
                    let updated = diesel::update(bookmarks::table.find(id))
                        .set(&changes)
                        .execute(conn)?;
                    if updated == 0 {
                        return Err(SqliteRepositoryError::BookmarkNotFound(id));
                    }
                    id
                }
            };

            Self::resolve_tag_ids(conn, &mut pending_tags, now)?;

            diesel::delete(bookmarks_tags::table.filter(bookmarks_tags::bookmark_id.eq(id)))
                .execute(conn)?;
            for tag_id in pending_tags.iter().filter_map(|tag| tag.id) {
                diesel::insert_or_ignore_into(bookmarks_tags::table)
                    .values(&NewBookmarkTag {
                        bookmark_id: id,
                        tag_id,
                    })
                    .execute(conn)?;
            }

            Ok((id, pending_tags))
        })?;

        bookmark.set_id(id);
        bookmark.set_tags(resolved_tags);
        debug!("Saved bookmark {} with {} tag(s)", id, bookmark.tags.len());
        Ok(())
    }

    #[instrument(skip_all, level = "debug", fields(id = id))]
    fn delete(&self, id: i32) -> Result<bool, DomainError> {
        let mut pooled = self.get_connection()?;
        let conn: &mut SqliteConnection = &mut pooled;

        let deleted = conn.transaction::<usize, SqliteRepositoryError, _>(|conn| {
            diesel::delete(bookmarks_tags::table.filter(bookmarks_tags::bookmark_id.eq(id)))
                .execute(conn)?;
            Ok(diesel::delete(bookmarks::table.find(id)).execute(conn)?)
        })?;

        Ok(deleted > 0)
    }
}
