// src/controller/response.rs
use crate::domain::bookmark::{Bookmark, BookmarkForm};
use crate::domain::repositories::query::Page;
use crate::domain::tag::Tag;
use crate::domain::user::User;
use crate::domain::validation::ValidationErrors;
use serde::Serialize;

/// Redirect targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    /// The bookmark listing
    Index,
    /// The login page, used when an unauthorized request has no referer
    Login,
    Referer(String),
}

/// Data handed to the transport for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum View {
    Index(Page<Bookmark>),
    Detail {
        bookmark: Bookmark,
        owner: User,
    },
    Form {
        form: BookmarkForm,
        available_tags: Vec<Tag>,
        errors: ValidationErrors,
    },
    Tagged {
        bookmarks: Vec<Bookmark>,
        tags: Vec<String>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Render(View),
    Redirect(Location),
}

impl Response {
    pub fn is_redirect(&self) -> bool {
        matches!(self, Response::Redirect(_))
    }
}
