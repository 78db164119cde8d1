// src/controller/mod.rs
//! Transport-agnostic request handling for bookmarks.
//!
//! A transport builds a [`Request`], passes the authenticated [`Identity`]
//! and a [`Flash`] channel, and turns the returned [`Response`] into output.
//!
//! [`Identity`]: crate::domain::user::Identity
pub mod bookmarks_controller;
pub mod error;
pub mod flash;
pub mod request;
pub mod response;

pub use bookmarks_controller::{Authorize, BookmarksController};
pub use error::{ControllerError, ControllerResult};
pub use flash::{Flash, FlashLevel, FlashMessage};
pub use request::{Method, Request};
pub use response::{Location, Response, View};
