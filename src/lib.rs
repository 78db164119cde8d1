// src/lib.rs
#![crate_type = "lib"]
#![crate_name = "tagmarks"]

// Core modules
pub mod application;
pub mod domain;
pub mod infrastructure;

// Request/response glue
pub mod controller;

// CLI modules
pub mod cli;
pub mod config;
pub mod exitcode;
pub mod util;
