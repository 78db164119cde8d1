// src/controller/request.rs
use crate::controller::error::{ControllerError, ControllerResult};
use crate::domain::authorization::Action;
use crate::domain::bookmark::BookmarkForm;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }

    pub fn is_any(self, allowed: &[Method]) -> bool {
        allowed.contains(&self)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a controller action reads from the incoming request.
///
/// `pass` holds the positional path segments after the action name
/// (`/bookmarks/view/5` has pass `["5"]`, `/bookmarks/tags/a/b` has `["a", "b"]`).
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub action: Action,
    pub pass: Vec<String>,
    pub data: BookmarkForm,
    pub page: Option<usize>,
    pub referer: Option<String>,
}

impl Request {
    pub fn new(method: Method, action: Action) -> Self {
        Self {
            method,
            action,
            pass: Vec::new(),
            data: BookmarkForm::default(),
            page: None,
            referer: None,
        }
    }

    pub fn get(action: Action) -> Self {
        Self::new(Method::Get, action)
    }

    pub fn post(action: Action, data: BookmarkForm) -> Self {
        Self::new(Method::Post, action).with_data(data)
    }

    pub fn with_pass<I, S>(mut self, pass: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pass = pass.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_id(self, id: i32) -> Self {
        self.with_pass([id.to_string()])
    }

    pub fn with_data(mut self, data: BookmarkForm) -> Self {
        self.data = data;
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_referer<S: Into<String>>(mut self, referer: S) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// The bookmark ID from the first pass segment.
    ///
    /// `None` when there is no segment; a segment that is not an ID names no
    /// bookmark and is reported as not found.
    pub fn bookmark_id(&self) -> ControllerResult<Option<i32>> {
        match self.pass.first() {
            None => Ok(None),
            Some(segment) => segment
                .parse::<i32>()
                .map(Some)
                .map_err(|_| ControllerError::NotFound(format!("Invalid bookmark: {}", segment))),
        }
    }

    pub fn require_bookmark_id(&self) -> ControllerResult<i32> {
        self.bookmark_id()?
            .ok_or_else(|| ControllerError::NotFound("Invalid bookmark".to_string()))
    }
}
