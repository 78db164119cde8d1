use chrono::NaiveDateTime;
use diesel::{AsChangeset, Identifiable, Insertable, Queryable, Selectable};
use std::fmt;

use crate::infrastructure::repositories::sqlite::schema::{bookmarks, bookmarks_tags, tags, users};

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbBookmark {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub created: NaiveDateTime,
    pub modified: NaiveDateTime,
}

impl fmt::Display for DbBookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id: {}, user_id: {}, title: {}, url: {}, created: {}, modified: {}",
            self.id, self.user_id, self.title, self.url, self.created, self.modified
        )
    }
}

/// New bookmark for insertion
#[derive(Insertable, Debug)]
#[diesel(table_name = bookmarks)]
pub struct NewBookmark {
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub created: NaiveDateTime,
    pub modified: NaiveDateTime,
}

impl fmt::Display for NewBookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "user_id: {}, title: {}, url: {}, created: {}",
            self.user_id, self.title, self.url, self.created
        )
    }
}

/// Changes for updating a bookmark; `created` is never rewritten
#[derive(AsChangeset, Debug)]
#[diesel(table_name = bookmarks)]
pub struct DbBookmarkChanges {
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub url: String,
    pub modified: NaiveDateTime,
}

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbTag {
    pub id: i32,
    pub title: String,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = tags)]
pub struct NewTag<'a> {
    pub title: &'a str,
    pub created: NaiveDateTime,
    pub modified: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = bookmarks_tags)]
pub struct NewBookmarkTag {
    pub bookmark_id: i32,
    pub tag_id: i32,
}

#[derive(Queryable, Selectable, Identifiable, Clone, Debug)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DbUser {
    pub id: i32,
    pub email: String,
    pub created: NaiveDateTime,
}

#[derive(Insertable, Debug)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub created: NaiveDateTime,
}
