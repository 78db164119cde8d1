// src/domain/user.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Owner of bookmarks. Authentication happens elsewhere; the store only keeps
/// enough of the user to check references and show the owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// The authenticated user on whose behalf a request runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub id: i32,
}

impl Identity {
    pub fn new(id: i32) -> Self {
        Self { id }
    }
}
