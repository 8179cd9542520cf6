//! Per-test fixture: every test gets its own in-memory store and state,
//! so nothing leaks between tests.

#![allow(dead_code)]

/// Build the service the way `main.rs` does, over `ctx`'s isolated state.
macro_rules! test_app {
    ($ctx:expr) => {
        ::actix_web::test::init_service(
            ::actix_web::App::new()
                .wrap(::actix_web::middleware::from_fn(
                    ::api_server::observability::request_id,
                ))
                .configure(::api_server::app_config($ctx.state.clone())),
        )
        .await
    };
}
pub(crate) use test_app;

use api_server::state::AppState;
use blog_core::domain::{Comment, NewComment, NewPost, NewUser, Post, User};
use blog_core::ports::{
    CommentRepository, PasswordService, PostRepository, TokenService, UserRepository,
};
use blog_infra::{JwtConfig, MemoryDatabase};

pub struct TestContext {
    pub db: MemoryDatabase,
    pub state: AppState,
}

impl TestContext {
    pub fn new() -> Self {
        let db = MemoryDatabase::new();
        let jwt = JwtConfig {
            secret: "integration-test-secret".to_string(),
            expiration_hours: 1,
            issuer: "blog-api-tests".to_string(),
        };
        let state = AppState::in_memory(db.clone(), jwt);
        Self { db, state }
    }

    /// A user that cannot log in; hashing is skipped to keep tests fast.
    pub async fn create_user(&self, username: &str) -> User {
        self.insert_user(username, "!unusable".to_string()).await
    }

    pub async fn create_user_with_password(&self, username: &str, password: &str) -> User {
        let hash = self.state.passwords.hash(password).unwrap();
        self.insert_user(username, hash).await
    }

    async fn insert_user(&self, username: &str, password_hash: String) -> User {
        self.db
            .users()
            .create(NewUser::new(username.to_string(), password_hash))
            .await
            .unwrap()
    }

    pub async fn create_post(&self, author: &User, title: &str, text: &str) -> Post {
        self.db
            .posts()
            .create(NewPost::new(author.id, title.to_string(), text.to_string()))
            .await
            .unwrap()
    }

    pub async fn create_comment(&self, post: Option<&Post>, text: &str) -> Comment {
        self.db
            .comments()
            .create(NewComment::new(post.map(|p| p.id), text.to_string()))
            .await
            .unwrap()
    }

    pub fn bearer(&self, user: &User) -> (&'static str, String) {
        let token = self
            .state
            .tokens
            .generate_token(user.id, &user.username)
            .unwrap();
        ("Authorization", format!("Bearer {token}"))
    }
}
