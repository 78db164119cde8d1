// src/cli/user_commands.rs
use crate::cli::error::{CliError, CliResult};
use crate::domain::repositories::repository::UserRepository;
use crate::infrastructure::di::ServiceContainer;
use tracing::instrument;

#[instrument(skip(services), level = "debug")]
pub fn create_user(services: &ServiceContainer, email: &str, json: bool) -> CliResult<()> {
    let email = email.trim();
    if email.is_empty() {
        return Err(CliError::InvalidInput("email must not be empty".to_string()));
    }

    let user = services
        .user_repository
        .add(email)
        .map_err(|e| CliError::CommandFailed(format!("Could not create user {}: {}", email, e)))?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&user).map_err(|e| CliError::Other(e.to_string()))?
        );
    } else {
        println!("Created user {} with ID {}", user.email, user.id);
    }
    Ok(())
}
