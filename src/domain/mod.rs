// src/domain/mod.rs
pub mod authorization;
pub mod bookmark;
pub mod error;
pub mod repositories;
pub mod tag;
pub mod tag_normalizer;
pub mod user;
pub mod validation;
