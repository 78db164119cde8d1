// src/application/services/bookmark_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::authorization::Action;
use crate::domain::bookmark::{Bookmark, BookmarkForm};
use crate::domain::repositories::query::{Page, PageRequest, TagFilter};
use crate::domain::user::{Identity, User};
use std::fmt::Debug;

/// Service interface for bookmark-related operations
pub trait BookmarkService: Send + Sync + Debug {
    /// One page of the bookmarks owned by `user_id`
    fn list_bookmarks(&self, user_id: i32, page: PageRequest) -> ApplicationResult<Page<Bookmark>>;

    /// Get a bookmark by ID, `BookmarkNotFound` if absent
    fn get_bookmark(&self, id: i32) -> ApplicationResult<Bookmark>;

    /// Get a bookmark together with its owner
    fn get_bookmark_with_owner(&self, id: i32) -> ApplicationResult<(Bookmark, User)>;

    /// Create a bookmark owned by `owner` from submitted fields
    fn create_bookmark(&self, owner: &Identity, form: &BookmarkForm) -> ApplicationResult<Bookmark>;

    /// Patch an existing bookmark from submitted fields; ownership moves to `owner`
    fn update_bookmark(
        &self,
        owner: &Identity,
        id: i32,
        form: &BookmarkForm,
    ) -> ApplicationResult<Bookmark>;

    /// Delete a bookmark by ID
    fn delete_bookmark(&self, id: i32) -> ApplicationResult<bool>;

    /// Bookmarks matching the tag filter
    fn find_tagged(&self, filter: &TagFilter) -> ApplicationResult<Vec<Bookmark>>;

    /// Owner-only access check for a single bookmark
    fn is_authorized(
        &self,
        user: &Identity,
        action: Action,
        bookmark_id: Option<i32>,
    ) -> ApplicationResult<bool>;
}
