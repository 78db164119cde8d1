// src/util/testing.rs

use std::env;
use std::path::PathBuf;
use std::sync::OnceLock;
use tempfile::TempDir;
use tracing::{debug, info, instrument};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::config::{ENV_DB_URL, ENV_PAGE_SIZE, ENV_USER};
use crate::domain::repositories::repository::UserRepository;
use crate::infrastructure::repositories::sqlite::connection::{init_pool, ConnectionPool};
use crate::infrastructure::repositories::sqlite::repository::SqliteBookmarkRepository;
use crate::infrastructure::repositories::sqlite::tag_repository::SqliteTagRepository;
use crate::infrastructure::repositories::sqlite::user_repository::SqliteUserRepository;

static TEST_ENV: OnceLock<()> = OnceLock::new();

/// Initializes test logging exactly once.
pub fn init_test_env() {
    TEST_ENV.get_or_init(|| {
        setup_test_logging();
        info!("Test environment initialized");
    });
}

/// Logging setup only runs once; subsequent calls do nothing if `tracing` is already set.
fn setup_test_logging() {
    debug!("Attempting logger init from testing.rs");
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
        return;
    }

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter),
    );

    subscriber.try_init().unwrap_or_else(|e| {
        eprintln!("Error: Failed to set up logging: {}", e);
    });
}

/// Restores the tagmarks environment variables on drop
#[derive(Debug, Clone)]
pub struct EnvGuard {
    saved: Vec<(&'static str, Option<String>)>,
}

impl Default for EnvGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvGuard {
    pub fn new() -> Self {
        Self {
            saved: [ENV_DB_URL, ENV_PAGE_SIZE, ENV_USER]
                .into_iter()
                .map(|key| (key, env::var(key).ok()))
                .collect(),
        }
    }
}

impl Drop for EnvGuard {
    #[instrument(level = "trace")]
    fn drop(&mut self) {
        for (key, value) in &self.saved {
            match value {
                Some(val) => env::set_var(key, val),
                None => env::remove_var(key),
            }
        }
    }
}

/// A migrated database in its own temporary directory, removed on drop
#[derive(Debug)]
pub struct TestDb {
    _dir: TempDir,
    pub path: PathBuf,
    pub pool: ConnectionPool,
}

impl TestDb {
    pub fn db_url(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    pub fn bookmark_repository(&self) -> SqliteBookmarkRepository {
        SqliteBookmarkRepository::new(self.pool.clone())
    }

    pub fn tag_repository(&self) -> SqliteTagRepository {
        SqliteTagRepository::new(self.pool.clone())
    }

    pub fn user_repository(&self) -> SqliteUserRepository {
        SqliteUserRepository::new(self.pool.clone())
    }

    /// Register a user and return its ID
    pub fn create_user(&self, email: &str) -> i32 {
        self.user_repository()
            .add(email)
            .expect("Failed to create test user")
            .id
    }
}

/// Creates a fresh, fully migrated database for one test.
pub fn setup_test_db() -> TestDb {
    init_test_env();
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("tagmarks.db");
    let pool = init_pool(path.to_string_lossy().as_ref()).expect("Failed to initialize test DB");
    TestDb {
        _dir: dir,
        path,
        pool,
    }
}
