// src/application/services/bookmark_service_impl.rs
use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, info, instrument};

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::bookmark_service::BookmarkService;
use crate::domain::authorization::{self, Action};
use crate::domain::bookmark::{Bookmark, BookmarkForm};
use crate::domain::error::DomainError;
use crate::domain::repositories::query::{Page, PageRequest, TagFilter};
use crate::domain::repositories::repository::{BookmarkRepository, TagRepository, UserRepository};
use crate::domain::tag_normalizer::normalize_tags;
use crate::domain::user::{Identity, User};
use crate::domain::validation::ValidationErrors;

#[derive(Debug)]
pub struct BookmarkServiceImpl<R: BookmarkRepository> {
    repository: Arc<R>,
    tags: Arc<dyn TagRepository>,
    users: Arc<dyn UserRepository>,
}

impl<R: BookmarkRepository> BookmarkServiceImpl<R> {
    pub fn new(
        repository: Arc<R>,
        tags: Arc<dyn TagRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            repository,
            tags,
            users,
        }
    }

    #[instrument(skip(self), level = "trace")]
    fn validate_bookmark_id(&self, id: i32) -> ApplicationResult<()> {
        let mut errors = ValidationErrors::new();
        if id <= 0 {
            errors.add("id", format!("Invalid bookmark ID: {}", id));
        }
        Ok(errors.into_result()?)
    }

    /// Field rules plus the rule that the owner must exist
    fn validate(&self, bookmark: &Bookmark) -> ApplicationResult<()> {
        let mut errors = bookmark.validate().err().unwrap_or_default();
        if !self.users.exists(bookmark.user_id)? {
            errors.add("user_id", "This value does not exist");
        }
        Ok(errors.into_result()?)
    }

    /// The shared add/edit path: patch, force the owner, validate,
    /// recompute tags when tag text was submitted, stamp and persist.
    fn save(
        &self,
        owner: &Identity,
        mut bookmark: Bookmark,
        form: &BookmarkForm,
    ) -> ApplicationResult<Bookmark> {
        bookmark.patch(form);
        if form.user_id.is_some_and(|submitted| submitted != owner.id) {
            debug!(
                "Ignoring submitted user_id {:?}, owner is {}",
                form.user_id, owner.id
            );
        }
        bookmark.assign_owner(owner.id);

        self.validate(&bookmark)?;

        if let Some(tag_string) = form.tag_input() {
            bookmark.set_tags(normalize_tags(tag_string, self.tags.as_ref())?);
        }

        bookmark.touch(Utc::now());
        self.repository.save(&mut bookmark)?;
        Ok(bookmark)
    }
}

impl<R: BookmarkRepository> BookmarkService for BookmarkServiceImpl<R> {
    #[instrument(skip(self), level = "debug")]
    fn list_bookmarks(&self, user_id: i32, page: PageRequest) -> ApplicationResult<Page<Bookmark>> {
        let total = self.repository.count_by_owner(user_id)?;
        let items = self.repository.get_by_owner(user_id, page)?;
        Ok(Page {
            items,
            page: page.page,
            limit: page.limit,
            total,
        })
    }

    #[instrument(skip(self), level = "debug")]
    fn get_bookmark(&self, id: i32) -> ApplicationResult<Bookmark> {
        self.validate_bookmark_id(id)?;

        self.repository
            .get_by_id(id)?
            .ok_or(ApplicationError::BookmarkNotFound(id))
    }

    #[instrument(skip(self), level = "debug")]
    fn get_bookmark_with_owner(&self, id: i32) -> ApplicationResult<(Bookmark, User)> {
        let bookmark = self.get_bookmark(id)?;
        let owner = self.users.get_by_id(bookmark.user_id)?.ok_or_else(|| {
            DomainError::UserNotFound(format!(
                "{} (owner of bookmark {})",
                bookmark.user_id, id
            ))
        })?;
        Ok((bookmark, owner))
    }

    #[instrument(skip(self, owner, form), level = "debug", fields(owner = owner.id))]
    fn create_bookmark(&self, owner: &Identity, form: &BookmarkForm) -> ApplicationResult<Bookmark> {
        let bookmark = self.save(owner, Bookmark::new(owner.id), form)?;
        info!("Created bookmark {:?}", bookmark.id);
        Ok(bookmark)
    }

    #[instrument(skip(self, owner, form), level = "debug", fields(owner = owner.id))]
    fn update_bookmark(
        &self,
        owner: &Identity,
        id: i32,
        form: &BookmarkForm,
    ) -> ApplicationResult<Bookmark> {
        let existing = self.get_bookmark(id)?;
        let bookmark = self.save(owner, existing, form)?;
        info!("Updated bookmark {}", id);
        Ok(bookmark)
    }

    #[instrument(skip(self), level = "debug")]
    fn delete_bookmark(&self, id: i32) -> ApplicationResult<bool> {
        self.validate_bookmark_id(id)?;

        let deleted = self.repository.delete(id)?;
        info!("Delete bookmark {}: {}", id, deleted);
        Ok(deleted)
    }

    #[instrument(skip(self), level = "debug")]
    fn find_tagged(&self, filter: &TagFilter) -> ApplicationResult<Vec<Bookmark>> {
        Ok(self.repository.find_tagged(filter)?)
    }

    #[instrument(skip(self), level = "debug")]
    fn is_authorized(
        &self,
        user: &Identity,
        action: Action,
        bookmark_id: Option<i32>,
    ) -> ApplicationResult<bool> {
        Ok(authorization::is_authorized(
            self.repository.as_ref(),
            user,
            action,
            bookmark_id,
        )?)
    }
}
