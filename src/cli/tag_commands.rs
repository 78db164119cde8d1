// src/cli/tag_commands.rs
use std::io::{self, Write};

use tracing::instrument;

use crate::cli::error::{CliError, CliResult};
use crate::domain::tag::Tag;
use crate::infrastructure::di::ServiceContainer;

/// Show how a tag string resolves against the stored tags; nothing is written
#[instrument(skip(services), level = "debug")]
pub fn normalize_tags(services: &ServiceContainer, tag_str: &str, json: bool) -> CliResult<()> {
    let tags = services
        .tag_service
        .normalize_tags(tag_str)
        .map_err(|e| CliError::from(e).context(format!("Resolving tags '{}'", tag_str)))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &tags).map_err(|e| CliError::Other(e.to_string()))?;
        writeln!(out)?;
    } else {
        write_resolution(&mut out, &tags)?;
    }
    Ok(())
}

fn write_resolution<W: Write>(out: &mut W, tags: &[Tag]) -> io::Result<()> {
    if tags.is_empty() {
        return writeln!(out, "No tags");
    }
    for tag in tags {
        match tag.id {
            Some(id) => writeln!(out, "{} (existing, ID {})", tag.title(), id)?,
            None => writeln!(out, "{} (new)", tag.title())?,
        }
    }
    Ok(())
}
