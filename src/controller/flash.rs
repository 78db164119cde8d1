// src/controller/flash.rs
use serde::Serialize;
use std::fmt;

pub const SAVED: &str = "The bookmark has been saved.";
pub const NOT_SAVED: &str = "The bookmark could not be saved. Please, try again.";
pub const DELETED: &str = "The bookmark has been deleted.";
pub const NOT_DELETED: &str = "The bookmark could not be deleted. Please, try again.";
pub const UNAUTHORIZED: &str = "You are not authorized to access that location.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

impl fmt::Display for FlashMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// One-shot user feedback collected while a request runs
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Flash {
    messages: Vec<FlashMessage>,
}

impl Flash {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn success<S: Into<String>>(&mut self, text: S) {
        self.push(FlashLevel::Success, text);
    }

    pub fn error<S: Into<String>>(&mut self, text: S) {
        self.push(FlashLevel::Error, text);
    }

    fn push<S: Into<String>>(&mut self, level: FlashLevel, text: S) {
        self.messages.push(FlashMessage {
            level,
            text: text.into(),
        });
    }

    pub fn messages(&self) -> &[FlashMessage] {
        &self.messages
    }

    /// Hand the messages to the transport, leaving the channel empty
    pub fn take(&mut self) -> Vec<FlashMessage> {
        std::mem::take(&mut self.messages)
    }

    pub fn has_error(&self) -> bool {
        self.messages.iter().any(|m| m.level == FlashLevel::Error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains_messages() {
        let mut flash = Flash::new();
        flash.success(SAVED);
        flash.error(NOT_DELETED);
        assert!(flash.has_error());

        let taken = flash.take();
        assert_eq!(taken.len(), 2);
        assert_eq!(taken[0].level, FlashLevel::Success);
        assert!(flash.messages().is_empty());
    }
}
