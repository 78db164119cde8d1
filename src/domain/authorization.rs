// src/domain/authorization.rs
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, instrument};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::repository::BookmarkRepository;
use crate::domain::user::Identity;

/// Actions a bookmark request can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Action {
    Index,
    View,
    Add,
    Edit,
    Delete,
    Tags,
}

impl Action {
    /// Actions any authenticated user may run without an ownership check
    pub const EXEMPT: [Action; 3] = [Action::Index, Action::Add, Action::Tags];

    pub fn is_exempt(self) -> bool {
        Self::EXEMPT.contains(&self)
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Index => "index",
            Action::View => "view",
            Action::Add => "add",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Tags => "tags",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Action {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "index" => Ok(Action::Index),
            "view" => Ok(Action::View),
            "add" => Ok(Action::Add),
            "edit" => Ok(Action::Edit),
            "delete" => Ok(Action::Delete),
            "tags" => Ok(Action::Tags),
            other => Err(DomainError::Other(format!("Unknown action: {}", other))),
        }
    }
}

/// Owner-only access to single bookmarks.
///
/// Exempt actions pass. Every other action needs a bookmark ID, and the
/// bookmark must belong to the user. A missing bookmark surfaces as
/// `BookmarkNotFound` instead of a denial.
#[instrument(skip(repository), level = "debug")]
pub fn is_authorized<R>(
    repository: &R,
    user: &Identity,
    action: Action,
    bookmark_id: Option<i32>,
) -> DomainResult<bool>
where
    R: BookmarkRepository + ?Sized,
{
    if action.is_exempt() {
        return Ok(true);
    }

    let Some(id) = bookmark_id else {
        debug!("No bookmark ID for '{}', denying", action);
        return Ok(false);
    };

    let bookmark = repository
        .get_by_id(id)?
        .ok_or_else(|| DomainError::BookmarkNotFound(id.to_string()))?;

    let owned = bookmark.is_owned_by(user.id);
    debug!(
        "User {} {} bookmark {}",
        user.id,
        if owned { "owns" } else { "does not own" },
        id
    );
    Ok(owned)
}
