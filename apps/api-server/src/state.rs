//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::ports::{
    CommentRepository, PasswordService, PostRepository, TokenService, UserRepository,
};
use blog_core::{CommentService, PostService};
use blog_infra::{Argon2PasswordService, JwtConfig, JwtTokenService, MemoryDatabase};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        if let Some(db_config) = &config.database {
            match connect(db_config, config).await {
                Ok(state) => return state,
                Err(e) => tracing::error!(
                    "Failed to prepare database: {}. Using in-memory fallback.",
                    e
                ),
            }
        }

        #[cfg(not(feature = "postgres"))]
        if config.database.is_some() {
            tracing::warn!("Built without the postgres feature; ignoring DATABASE_URL.");
        }

        if config.database.is_none() {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        }
        Self::in_memory(MemoryDatabase::new(), config.jwt.clone())
    }

    /// State over the in-memory store. Each call with a fresh
    /// `MemoryDatabase` is fully isolated.
    pub fn in_memory(db: MemoryDatabase, jwt: JwtConfig) -> Self {
        Self::from_repositories(
            Arc::new(db.users()),
            Arc::new(db.posts()),
            Arc::new(db.comments()),
            jwt,
        )
    }

    pub fn from_repositories(
        users: Arc<dyn UserRepository>,
        posts: Arc<dyn PostRepository>,
        comments: Arc<dyn CommentRepository>,
        jwt: JwtConfig,
    ) -> Self {
        tracing::info!("Application state initialized");

        Self {
            posts: Arc::new(PostService::new(posts.clone(), users.clone())),
            comments: Arc::new(CommentService::new(comments, posts)),
            users,
            tokens: Arc::new(JwtTokenService::new(jwt)),
            passwords: Arc::new(Argon2PasswordService::new()),
        }
    }
}

/// Connect, migrate, and build the PostgreSQL-backed state.
#[cfg(feature = "postgres")]
async fn connect(
    db_config: &blog_infra::DatabaseConfig,
    config: &AppConfig,
) -> Result<AppState, migration::DbErr> {
    use blog_infra::database::{
        PostgresCommentRepository, PostgresPostRepository, PostgresUserRepository,
    };
    use migration::{Migrator, MigratorTrait};

    let conn = blog_infra::DatabaseConnection::init(db_config).await?;
    if config.run_migrations {
        Migrator::up(&*conn.main, None).await?;
        tracing::info!("Database migrations applied");
    }

    Ok(AppState::from_repositories(
        Arc::new(PostgresUserRepository::new(conn.main.clone())),
        Arc::new(PostgresPostRepository::new(conn.main.clone())),
        Arc::new(PostgresCommentRepository::new(conn.main)),
        config.jwt.clone(),
    ))
}
