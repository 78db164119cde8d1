// src/controller/error.rs
use crate::application::error::ApplicationError;
use crate::controller::request::Method;
use itertools::Itertools;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ControllerError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Method not allowed, expected one of: {}", .allowed.iter().join(", "))]
    MethodNotAllowed { allowed: Vec<Method> },

    #[error("Application error: {0}")]
    Application(ApplicationError),
}

impl From<ApplicationError> for ControllerError {
    fn from(error: ApplicationError) -> Self {
        if error.is_not_found() {
            ControllerError::NotFound(error.to_string())
        } else {
            ControllerError::Application(error)
        }
    }
}

pub type ControllerResult<T> = Result<T, ControllerError>;
