// src/domain/tag.rs
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

use crate::domain::error::{DomainError, DomainResult};

/// A shared label, identified by its exact title.
///
/// `id` is `None` for a tag that has been constructed during normalization but
/// not written to the store yet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Tag {
    pub id: Option<i32>,
    title: String,
}

impl Tag {
    /// A stored tag
    pub fn new<S: Into<String>>(id: i32, title: S) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
        }
    }

    /// A tag that only exists in memory until its bookmark is saved
    pub fn pending<S: AsRef<str>>(title: S) -> DomainResult<Self> {
        let title = title.as_ref().trim();
        if title.is_empty() {
            return Err(DomainError::InvalidTag("Tag cannot be empty".to_string()));
        }
        Ok(Self {
            id: None,
            title: title.to_string(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }

    /// Split a comma-separated tag string into distinct, trimmed, non-empty titles.
    ///
    /// Matching is case-sensitive; the first occurrence of a title keeps its position.
    pub fn parse_titles<S: AsRef<str>>(tag_str: S) -> Vec<String> {
        tag_str
            .as_ref()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unique()
            .map(str::to_string)
            .collect()
    }

    /// Render tags back into the comma-separated input form
    pub fn format_tags(tags: &[Tag]) -> String {
        tags.iter().map(Tag::title).join(", ")
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}
