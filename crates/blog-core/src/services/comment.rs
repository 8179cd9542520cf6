use std::sync::Arc;

use crate::domain::{Comment, NewComment};
use crate::error::DomainError;
use crate::ports::{CommentRepository, PostRepository};
use crate::validation::{CommentDraft, ValidationErrors, does_not_exist};

use super::missing;

/// Comment resource operations.
pub struct CommentService {
    comments: Arc<dyn CommentRepository>,
    posts: Arc<dyn PostRepository>,
}

impl CommentService {
    pub fn new(comments: Arc<dyn CommentRepository>, posts: Arc<dyn PostRepository>) -> Self {
        Self { comments, posts }
    }

    pub async fn list(&self) -> Result<Vec<Comment>, DomainError> {
        Ok(self.comments.list().await?)
    }

    pub async fn get(&self, id: i64) -> Result<Comment, DomainError> {
        self.comments
            .find_by_id(id)
            .await?
            .ok_or(DomainError::not_found("Comment", id))
    }

    pub async fn create(&self, draft: CommentDraft) -> Result<Comment, DomainError> {
        let errors = self.check_post(draft.post.value().copied()).await?;
        let fields = draft.validate(errors)?;

        let comment = self
            .comments
            .create(NewComment::new(fields.post_id.flatten(), fields.text))
            .await?;
        tracing::info!(comment_id = comment.id, post_id = ?comment.post_id, "Comment created");
        Ok(comment)
    }

    /// Replace the text. The post link changes only when `post` is sent.
    pub async fn update(&self, id: i64, draft: CommentDraft) -> Result<Comment, DomainError> {
        let mut comment = self.get(id).await?;
        let errors = self.check_post(draft.post.value().copied()).await?;
        let fields = draft.validate(errors)?;

        comment.text = fields.text;
        if let Some(post_id) = fields.post_id {
            comment.post_id = post_id;
        }
        self.save(comment).await
    }

    pub async fn partial_update(&self, id: i64, draft: CommentDraft) -> Result<Comment, DomainError> {
        let mut comment = self.get(id).await?;
        let errors = self.check_post(draft.post.value().copied()).await?;
        let changes = draft.validate_partial(errors)?;

        if let Some(text) = changes.text {
            comment.text = text;
        }
        if let Some(post_id) = changes.post_id {
            comment.post_id = post_id;
        }
        self.save(comment).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), DomainError> {
        self.comments
            .delete(id)
            .await
            .map_err(missing("Comment", id))
    }

    async fn save(&self, comment: Comment) -> Result<Comment, DomainError> {
        let id = comment.id;
        self.comments
            .update(comment)
            .await
            .map_err(missing("Comment", id))
    }

    async fn check_post(&self, post_id: Option<i64>) -> Result<ValidationErrors, DomainError> {
        let mut errors = ValidationErrors::new();
        if let Some(post_id) = post_id {
            if self.posts.find_by_id(post_id).await?.is_none() {
                errors.add("post", does_not_exist(post_id));
            }
        }
        Ok(errors)
    }
}
