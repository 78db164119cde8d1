// src/cli/mod.rs
use crate::cli::args::{Cli, Commands};
use crate::cli::error::{CliError, CliResult};
use crate::config::Settings;
use crate::infrastructure::di::ServiceContainer;

pub mod args;
pub mod bookmark_commands;
pub mod display;
pub mod error;
pub mod tag_commands;
pub mod user_commands;

pub fn execute_command(cli: Cli, settings: &Settings) -> CliResult<()> {
    if cli.generate_config {
        println!("{}", crate::config::generate_default_config());
        return Ok(());
    }

    match &cli.command {
        None => Ok(()),
        Some(Commands::CreateDb { path }) => bookmark_commands::create_db(path),
        Some(command) => {
            let services = ServiceContainer::new(settings)
                .map_err(|e| CliError::from(e).context("Opening bookmark database"))?;
            match command {
                Commands::CreateUser { email } => {
                    user_commands::create_user(&services, email, cli.json)
                }
                Commands::NormalizeTags { tags } => {
                    tag_commands::normalize_tags(&services, tags, cli.json)
                }
                _ => bookmark_commands::execute(&services, &cli),
            }
        }
    }
}
