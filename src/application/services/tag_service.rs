// src/application/services/tag_service.rs
use crate::application::error::ApplicationResult;
use crate::domain::tag::Tag;
use std::fmt::Debug;

/// Service interface for tag-related operations
pub trait TagService: Send + Sync + Debug {
    /// All known tags, for offering them on bookmark forms
    fn get_all_tags(&self) -> ApplicationResult<Vec<Tag>>;

    /// Resolve a raw tag string against the stored tags without writing anything
    fn normalize_tags(&self, tag_str: &str) -> ApplicationResult<Vec<Tag>>;
}
