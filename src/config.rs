use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace};

pub const ENV_DB_URL: &str = "TAGMARKS_DB_URL";
pub const ENV_PAGE_SIZE: &str = "TAGMARKS_PAGE_SIZE";
pub const ENV_USER: &str = "TAGMARKS_USER";

pub const DEFAULT_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Path to the SQLite database file
    #[serde(default = "default_db_path")]
    pub db_url: String,

    /// Number of bookmarks per listing page (default: 20)
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config/tagmarks")
}

fn default_db_path() -> String {
    default_config_dir()
        .join("tagmarks.db")
        .to_string_lossy()
        .into_owned()
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            db_url: default_db_path(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

fn expand_path(path: &str) -> String {
    shellexpand::tilde(path).into_owned()
}

fn read_config_file(path: &Path) -> DomainResult<Settings> {
    let text = std::fs::read_to_string(path)?;
    toml::from_str::<Settings>(&text).map_err(|e| {
        DomainError::Other(format!("Invalid config file {}: {}", path.display(), e))
    })
}

/// Load settings from defaults, a config file and the environment, in increasing precedence.
///
/// An explicit `config_file` must exist and parse; the default location is
/// only read when present.
#[instrument(level = "debug")]
pub fn load_settings(config_file: Option<&Path>) -> DomainResult<Settings> {
    trace!("Loading settings");

    let mut settings = match config_file {
        Some(path) => {
            debug!("Loading config from: {:?}", path);
            read_config_file(path)?
        }
        None => {
            let default_path = default_config_dir().join("config.toml");
            if default_path.exists() {
                debug!("Loading config from: {:?}", default_path);
                read_config_file(&default_path)?
            } else {
                Settings::default()
            }
        }
    };

    if let Ok(db_url) = std::env::var(ENV_DB_URL) {
        trace!("Using {} from environment: {}", ENV_DB_URL, db_url);
        settings.db_url = db_url;
    }

    if let Ok(page_size) = std::env::var(ENV_PAGE_SIZE) {
        trace!("Using {} from environment: {}", ENV_PAGE_SIZE, page_size);
        settings.page_size = page_size.trim().parse().map_err(|_| {
            DomainError::Other(format!("{} must be a positive integer", ENV_PAGE_SIZE))
        })?;
    }

    if settings.page_size == 0 {
        return Err(DomainError::Other("page_size must be at least 1".to_string()));
    }

    settings.db_url = expand_path(&settings.db_url);

    trace!("Settings loaded: {:?}", settings);
    Ok(settings)
}

pub fn generate_default_config() -> String {
    let default_settings = Settings::default();
    toml::to_string_pretty(&default_settings)
        .unwrap_or_else(|_| "# Error generating default configuration".to_string())
}
