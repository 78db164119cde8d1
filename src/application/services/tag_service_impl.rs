// src/application/services/tag_service_impl.rs
use std::sync::Arc;

use crate::application::error::ApplicationResult;
use crate::application::services::tag_service::TagService;
use crate::domain::repositories::repository::TagRepository;
use crate::domain::tag::Tag;
use crate::domain::tag_normalizer::normalize_tags;
use tracing::{debug, instrument};

#[derive(Debug)]
pub struct TagServiceImpl<R: TagRepository> {
    repository: Arc<R>,
}

impl<R: TagRepository> TagServiceImpl<R> {
    pub fn new(repository: Arc<R>) -> Self {
        debug!("Creating new TagServiceImpl");
        Self { repository }
    }
}

impl<R: TagRepository> TagService for TagServiceImpl<R> {
    #[instrument(skip(self), level = "debug", fields(repo_type = std::any::type_name::<R>()))]
    fn get_all_tags(&self) -> ApplicationResult<Vec<Tag>> {
        Ok(self.repository.get_all()?)
    }

    #[instrument(skip(self), level = "debug", fields(tag_str = %tag_str))]
    fn normalize_tags(&self, tag_str: &str) -> ApplicationResult<Vec<Tag>> {
        Ok(normalize_tags(tag_str, self.repository.as_ref())?)
    }
}
