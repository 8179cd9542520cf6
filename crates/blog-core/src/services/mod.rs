//! Services - resource operations composed from validation and ports.

mod comment;
mod post;

pub use comment::CommentService;
pub use post::PostService;

use crate::error::{DomainError, RepoError};

/// Translate a repository miss on `id` into a domain not-found.
fn missing(entity_type: &'static str, id: i64) -> impl FnOnce(RepoError) -> DomainError {
    move |err| match err {
        RepoError::NotFound => DomainError::not_found(entity_type, id),
        other => other.into(),
    }
}
