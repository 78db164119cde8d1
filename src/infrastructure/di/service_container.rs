use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::bookmark_service::BookmarkService;
use crate::application::services::tag_service::TagService;
use crate::application::{BookmarkServiceImpl, TagServiceImpl};
use crate::config::Settings;
use crate::controller::BookmarksController;
use crate::domain::repositories::repository::{TagRepository, UserRepository};
use crate::infrastructure::repositories::sqlite::connection::{init_pool, ConnectionPool};
use crate::infrastructure::repositories::sqlite::repository::SqliteBookmarkRepository;
use crate::infrastructure::repositories::sqlite::tag_repository::SqliteTagRepository;
use crate::infrastructure::repositories::sqlite::user_repository::SqliteUserRepository;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Production service container - single source of truth for service creation
pub struct ServiceContainer {
    // Repositories
    pub bookmark_repository: Arc<SqliteBookmarkRepository>,
    pub tag_repository: Arc<dyn TagRepository>,
    pub user_repository: Arc<dyn UserRepository>,

    // Services
    pub bookmark_service: Arc<dyn BookmarkService>,
    pub tag_service: Arc<dyn TagService>,

    pub controller: Arc<BookmarksController>,
}

impl ServiceContainer {
    /// Create all services with explicit dependency injection.
    ///
    /// The database must already exist; `create-db` is the way to make one.
    pub fn new(config: &Settings) -> ApplicationResult<Self> {
        if !Path::new(&config.db_url).exists() {
            return Err(ApplicationError::Other(format!(
                "Database not found at '{}'. Create one with 'tagmarks create-db <path>' \
                 or point TAGMARKS_DB_URL at an existing database",
                config.db_url
            )));
        }

        let pool = init_pool(&config.db_url).map_err(|e| {
            ApplicationError::Other(format!("Failed to open database {}: {}", config.db_url, e))
        })?;
        Ok(Self::from_pool(pool, config.page_size))
    }

    /// Wire everything on top of an already initialized pool
    pub fn from_pool(pool: ConnectionPool, page_size: usize) -> Self {
        debug!("Wiring services, page size {}", page_size);
        let bookmark_repository = Arc::new(SqliteBookmarkRepository::new(pool.clone()));
        let tag_repository: Arc<dyn TagRepository> =
            Arc::new(SqliteTagRepository::new(pool.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(SqliteUserRepository::new(pool.clone()));

        let bookmark_service: Arc<dyn BookmarkService> = Arc::new(BookmarkServiceImpl::new(
            bookmark_repository.clone(),
            tag_repository.clone(),
            user_repository.clone(),
        ));
        let tag_service: Arc<dyn TagService> =
            Arc::new(TagServiceImpl::new(Arc::new(SqliteTagRepository::new(pool))));

        let controller = Arc::new(BookmarksController::new(
            bookmark_service.clone(),
            tag_service.clone(),
            page_size,
        ));

        Self {
            bookmark_repository,
            tag_repository,
            user_repository,
            bookmark_service,
            tag_service,
            controller,
        }
    }
}

impl fmt::Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("bookmark_repository", &"Arc<SqliteBookmarkRepository>")
            .field("bookmark_service", &"Arc<dyn BookmarkService>")
            .field("tag_service", &"Arc<dyn TagService>")
            .field("controller", &self.controller)
            .finish()
    }
}
