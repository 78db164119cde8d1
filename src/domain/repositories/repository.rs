// src/domain/repositories/repository.rs

use crate::domain::bookmark::Bookmark;
use crate::domain::error::DomainError;
use crate::domain::repositories::query::{PageRequest, TagFilter};
use crate::domain::tag::Tag;
use crate::domain::user::User;

/// Repository trait for bookmark persistence operations
pub trait BookmarkRepository: std::fmt::Debug + Send + Sync {
    /// Get a bookmark by its ID, tags loaded
    fn get_by_id(&self, id: i32) -> Result<Option<Bookmark>, DomainError>;

    /// Bookmarks of one owner, ordered by ID
    fn get_by_owner(&self, user_id: i32, page: PageRequest) -> Result<Vec<Bookmark>, DomainError>;

    /// Number of bookmarks of one owner
    fn count_by_owner(&self, user_id: i32) -> Result<usize, DomainError>;

    /// Bookmarks matching a tag filter, each at most once
    fn find_tagged(&self, filter: &TagFilter) -> Result<Vec<Bookmark>, DomainError>;

    /// Insert or update the bookmark together with its tag set in one transaction.
    ///
    /// Pending tags are created, or resolved to an existing row of the same
    /// title, and receive their IDs. A new bookmark receives its ID.
    fn save(&self, bookmark: &mut Bookmark) -> Result<(), DomainError>;

    /// Delete a bookmark and its tag associations; false when nothing was deleted
    fn delete(&self, id: i32) -> Result<bool, DomainError>;
}

/// Repository trait for tag lookups
pub trait TagRepository: std::fmt::Debug + Send + Sync {
    /// Stored tags whose title is exactly one of `titles`
    fn find_by_titles(&self, titles: &[String]) -> Result<Vec<Tag>, DomainError>;

    /// All stored tags, ordered by title
    fn get_all(&self) -> Result<Vec<Tag>, DomainError>;
}

/// Repository trait for the owners of bookmarks
pub trait UserRepository: std::fmt::Debug + Send + Sync {
    fn get_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;

    fn exists(&self, id: i32) -> Result<bool, DomainError>;

    /// Register a user, returns it with its new ID
    fn add(&self, email: &str) -> Result<User, DomainError>;
}
