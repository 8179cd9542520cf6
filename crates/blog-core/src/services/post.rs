use std::sync::Arc;

use crate::domain::{NewPost, Post};
use crate::error::DomainError;
use crate::ports::{PostRepository, UserRepository};
use crate::validation::{PostDraft, ValidationErrors, does_not_exist};

use super::missing;

/// Post resource operations.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
    users: Arc<dyn UserRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { posts, users }
    }

    pub async fn list(&self) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Post, DomainError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Post", id))
    }

    pub async fn create(&self, draft: PostDraft) -> Result<Post, DomainError> {
        let errors = self.check_author(draft.author.value().copied()).await?;
        let fields = draft.validate(errors)?;

        let post = self
            .posts
            .create(NewPost::new(fields.author_id, fields.title, fields.text))
            .await?;
        tracing::info!(post_id = post.id, author_id = post.author_id, "Post created");
        Ok(post)
    }

    /// Replace title, text and author of an existing post.
    pub async fn update(&self, id: i64, draft: PostDraft) -> Result<Post, DomainError> {
        let mut post = self.get(id).await?;
        let errors = self.check_author(draft.author.value().copied()).await?;
        let fields = draft.validate(errors)?;

        post.title = fields.title;
        post.text = fields.text;
        post.author_id = fields.author_id;
        self.save(post).await
    }

    /// Apply only the fields present in the payload.
    pub async fn partial_update(&self, id: i64, draft: PostDraft) -> Result<Post, DomainError> {
        let mut post = self.get(id).await?;
        let errors = self.check_author(draft.author.value().copied()).await?;
        let changes = draft.validate_partial(errors)?;

        if let Some(title) = changes.title {
            post.title = title;
        }
        if let Some(text) = changes.text {
            post.text = text;
        }
        if let Some(author_id) = changes.author_id {
            post.author_id = author_id;
        }
        self.save(post).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.posts.delete(id).await.map_err(missing("Post", id))?;
        tracing::info!(post_id = id, "Post deleted");
        Ok(())
    }

    /// Publish a post on behalf of `requester`, who must be its author.
    pub async fn publish(&self, id: i64, requester: Option<i64>) -> Result<Post, DomainError> {
        let Some(user_id) = requester else {
            return Err(DomainError::Forbidden(
                "Authentication credentials were not provided.".to_string(),
            ));
        };

        let mut post = self.get(id).await?;
        if !post.is_authored_by(user_id) {
            tracing::warn!(post_id = id, user_id, "Publish attempt by non-author");
            return Err(DomainError::Forbidden(
                "Only the author may publish this post.".to_string(),
            ));
        }

        if post.is_published {
            return Ok(post);
        }
        post.publish();
        let post = self.save(post).await?;
        tracing::info!(post_id = id, "Post published");
        Ok(post)
    }

    async fn save(&self, post: Post) -> Result<Post, DomainError> {
        let id = post.id;
        self.posts.update(post).await.map_err(missing("Post", id))
    }

    /// Referential check for the author field, run before the schema step
    /// so both kinds of error are reported together.
    async fn check_author(&self, author_id: Option<i64>) -> Result<ValidationErrors, DomainError> {
        let mut errors = ValidationErrors::new();
        if let Some(author_id) = author_id {
            if self.users.find_by_id(author_id).await?.is_none() {
                errors.add("author", does_not_exist(author_id));
            }
        }
        Ok(errors)
    }
}
