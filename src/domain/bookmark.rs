// src/domain/bookmark.rs
use crate::domain::tag::Tag;
use crate::domain::validation::ValidationErrors;
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TITLE_MAX_LEN: usize = 50;

/// Represents a bookmark domain entity
#[derive(Builder, Clone, PartialEq, Serialize)]
#[builder(setter(into))]
pub struct Bookmark {
    #[builder(default)]
    pub id: Option<i32>,
    pub user_id: i32,
    #[builder(default)]
    pub title: String,
    #[builder(default)]
    pub description: String,
    #[builder(default)]
    pub url: String,
    #[builder(default)]
    pub tags: Vec<Tag>,
    #[builder(default = "Utc::now()")]
    pub created_at: DateTime<Utc>,
    #[builder(default = "Utc::now()")]
    pub modified_at: DateTime<Utc>,
}

/// Caller-supplied fields for add and edit.
///
/// `None` leaves the corresponding bookmark field untouched when patching.
/// `user_id` is accepted so a submitted payload can be represented faithfully,
/// but it is never applied: ownership always comes from the current identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkForm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub tag_string: Option<String>,
    pub user_id: Option<i32>,
}

impl BookmarkForm {
    /// Prefill a form from a stored bookmark, current tags rendered into `tag_string`
    pub fn from_bookmark(bookmark: &Bookmark) -> Self {
        Self {
            title: Some(bookmark.title.clone()),
            description: Some(bookmark.description.clone()),
            url: Some(bookmark.url.clone()),
            tag_string: Some(bookmark.tag_string()),
            user_id: Some(bookmark.user_id),
        }
    }

    /// The raw tag text, only when it holds something besides whitespace
    pub fn tag_input(&self) -> Option<&str> {
        self.tag_string
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }
}

impl Bookmark {
    /// An empty, unsaved bookmark owned by `user_id`
    pub fn new(user_id: i32) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            user_id,
            title: String::new(),
            description: String::new(),
            url: String::new(),
            tags: Vec::new(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Copy the supplied scalar fields onto the entity. Tags and owner are
    /// handled separately by the save path.
    pub fn patch(&mut self, form: &BookmarkForm) {
        if let Some(title) = &form.title {
            self.title = title.clone();
        }
        if let Some(description) = &form.description {
            self.description = description.clone();
        }
        if let Some(url) = &form.url {
            self.url = url.clone();
        }
    }

    pub fn assign_owner(&mut self, user_id: i32) {
        self.user_id = user_id;
    }

    /// Replace the whole tag set
    pub fn set_tags(&mut self, tags: Vec<Tag>) {
        self.tags = tags;
    }

    /// Set the save timestamps; `created_at` only moves for a bookmark not stored yet
    pub fn touch(&mut self, now: DateTime<Utc>) {
        if self.id.is_none() {
            self.created_at = now;
        }
        self.modified_at = now;
    }

    /// Field rules that need no store access
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.title.chars().count() > TITLE_MAX_LEN {
            errors.add(
                "title",
                format!(
                    "The provided value must be at most {} characters long",
                    TITLE_MAX_LEN
                ),
            );
        }
        errors.into_result()
    }

    pub fn is_owned_by(&self, user_id: i32) -> bool {
        self.user_id == user_id
    }

    /// Current tags in the comma-separated input form
    pub fn tag_string(&self) -> String {
        Tag::format_tags(&self.tags)
    }

    pub fn tag_titles(&self) -> Vec<&str> {
        self.tags.iter().map(Tag::title).collect()
    }

    /// Set the ID (typically used after storage)
    pub fn set_id(&mut self, id: i32) {
        self.id = Some(id);
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {} ({})",
            self.id.map_or("new".to_string(), |id| id.to_string()),
            self.title,
            self.url,
            self.tag_string()
        )
    }
}

impl fmt::Debug for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bookmark")
            .field("id", &self.id)
            .field("user_id", &self.user_id)
            .field("title", &self.title)
            .field("url", &self.url)
            .field("tags", &self.tag_titles())
            .field("modified_at", &self.modified_at)
            .finish()
    }
}
