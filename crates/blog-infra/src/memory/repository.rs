use std::marker::PhantomData;

use async_trait::async_trait;

use blog_core::domain::{Comment, NewComment, NewPost, NewUser, Post, User};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};

use super::MemoryDatabase;
use super::tables::Stored;

/// Generic in-memory repository over one table.
pub struct MemoryRepository<T> {
    db: MemoryDatabase,
    _row: PhantomData<fn() -> T>,
}

impl<T> MemoryRepository<T> {
    pub fn new(db: MemoryDatabase) -> Self {
        Self {
            db,
            _row: PhantomData,
        }
    }
}

pub type InMemoryUserRepository = MemoryRepository<User>;
pub type InMemoryPostRepository = MemoryRepository<Post>;
pub type InMemoryCommentRepository = MemoryRepository<Comment>;

#[async_trait]
impl<T: Stored> BaseRepository<T, i64> for MemoryRepository<T> {
    async fn list(&self) -> Result<Vec<T>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(T::table(&tables).all())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<T>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(T::table(&tables).get(id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.db.tables.write().await;
        if !T::delete(&mut tables, id) {
            return Err(RepoError::NotFound);
        }
        tracing::debug!(table = T::NAME, id, "Deleted row");
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.db.tables.read().await;
        Ok(tables
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: NewUser) -> Result<User, RepoError> {
        let mut tables = self.db.tables.write().await;
        if tables.users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        let user = user.into_user(tables.users.next_id());
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn create(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut tables = self.db.tables.write().await;
        if !tables.users.contains(post.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                post.author_id
            )));
        }

        let post = post.into_post(tables.posts.next_id());
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.db.tables.write().await;
        if !tables.users.contains(post.author_id) {
            return Err(RepoError::Constraint(format!(
                "author {} does not exist",
                post.author_id
            )));
        }

        let Some(stored) = tables.posts.get(post.id) else {
            return Err(RepoError::NotFound);
        };
        let post = Post {
            created_date: stored.created_date,
            ..post
        };
        tables.posts.insert(post.id, post.clone());
        Ok(post)
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn create(&self, comment: NewComment) -> Result<Comment, RepoError> {
        let mut tables = self.db.tables.write().await;
        check_post(&tables, comment.post_id)?;

        let comment = comment.into_comment(tables.comments.next_id());
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }

    async fn update(&self, comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.db.tables.write().await;
        check_post(&tables, comment.post_id)?;

        let Some(stored) = tables.comments.get(comment.id) else {
            return Err(RepoError::NotFound);
        };
        let comment = Comment {
            created_date: stored.created_date,
            ..comment
        };
        tables.comments.insert(comment.id, comment.clone());
        Ok(comment)
    }
}

fn check_post(tables: &super::Tables, post_id: Option<i64>) -> Result<(), RepoError> {
    match post_id {
        Some(id) if !tables.posts.contains(id) => Err(RepoError::Constraint(format!(
            "post {id} does not exist"
        ))),
        _ => Ok(()),
    }
}
