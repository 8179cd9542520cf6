use std::sync::Arc;

use blog_core::domain::{NewComment, NewPost, NewUser, Post};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, CommentRepository, PostRepository, UserRepository};
use blog_core::validation::{CommentDraft, NOT_NULL, PostDraft, REQUIRED};
use blog_core::{CommentService, DomainError, PostService};
use serde_json::json;

use super::MemoryDatabase;

fn post_draft(value: serde_json::Value) -> PostDraft {
    serde_json::from_value(value).unwrap()
}

fn services(db: &MemoryDatabase) -> (PostService, CommentService) {
    let users = Arc::new(db.users());
    let posts = Arc::new(db.posts());
    (
        PostService::new(posts.clone(), users),
        CommentService::new(Arc::new(db.comments()), posts),
    )
}

async fn seed_author(db: &MemoryDatabase, username: &str) -> i64 {
    db.users()
        .create(NewUser::new(username.into(), "hash".into()))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn test_ids_are_sequential() {
    let db = MemoryDatabase::new();
    let author = seed_author(&db, "author #1").await;
    let posts = db.posts();

    for title in ["First blog post", "Second blog post", "Third blog post"] {
        posts
            .create(NewPost::new(author, title.into(), "text".into()))
            .await
            .unwrap();
    }

    let listed: Vec<Post> = posts.list().await.unwrap();
    let ids: Vec<i64> = listed.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(listed[1].title, "Second blog post");
}

#[tokio::test]
async fn test_duplicate_username_rejected() {
    let db = MemoryDatabase::new();
    seed_author(&db, "test").await;

    let err = db
        .users()
        .create(NewUser::new("test".into(), "hash".into()))
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::Constraint(_)));
}

#[tokio::test]
async fn test_delete_post_cascades_to_comments() {
    let db = MemoryDatabase::new();
    let author = seed_author(&db, "test").await;
    let post = db
        .posts()
        .create(NewPost::new(author, "Post".into(), "text".into()))
        .await
        .unwrap();
    let comments = db.comments();
    comments
        .create(NewComment::new(Some(post.id), "attached".into()))
        .await
        .unwrap();
    comments
        .create(NewComment::new(None, "loose".into()))
        .await
        .unwrap();

    db.posts().delete(post.id).await.unwrap();

    let remaining = comments.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].text, "loose");
}

#[tokio::test]
async fn test_deleted_ids_are_not_reused() {
    let db = MemoryDatabase::new();
    let author = seed_author(&db, "test").await;
    let posts = db.posts();
    let first = posts
        .create(NewPost::new(author, "One".into(), "text".into()))
        .await
        .unwrap();
    posts.delete(first.id).await.unwrap();

    let second = posts
        .create(NewPost::new(author, "Two".into(), "text".into()))
        .await
        .unwrap();

    assert_eq!(second.id, 2);
}

#[tokio::test]
async fn test_create_post_with_unknown_author() {
    let db = MemoryDatabase::new();
    seed_author(&db, "test").await;
    let (posts, _) = services(&db);

    let err = posts
        .create(post_draft(json!({ "title": "First blog post", "author": 2 })))
        .await
        .unwrap_err();

    let errors = match err {
        DomainError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other:?}"),
    };
    assert_eq!(errors.get("text"), Some(&[REQUIRED.to_string()][..]));
    assert!(errors.get("author").is_some());
    assert!(posts.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_update_leaves_post_unchanged() {
    let db = MemoryDatabase::new();
    let author = seed_author(&db, "test").await;
    let (posts, _) = services(&db);
    let post = posts
        .create(post_draft(
            json!({ "title": "First blog post", "text": "Post Description", "author": author }),
        ))
        .await
        .unwrap();

    let err = posts
        .update(
            post.id,
            post_draft(json!({ "title": "First blog post", "text": null, "author": author })),
        )
        .await
        .unwrap_err();

    let errors = match err {
        DomainError::Validation(errors) => errors,
        other => panic!("expected validation error, got {other:?}"),
    };
    assert_eq!(errors.get("text"), Some(&[NOT_NULL.to_string()][..]));
    assert_eq!(posts.get(post.id).await.unwrap().text, "Post Description");
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let db = MemoryDatabase::new();
    let author = seed_author(&db, "test").await;
    let (posts, _) = services(&db);
    let post = posts
        .create(post_draft(
            json!({ "title": "First blog post", "text": "Post Description", "author": author }),
        ))
        .await
        .unwrap();

    let updated = posts
        .partial_update(post.id, post_draft(json!({ "title": "Renamed" })))
        .await
        .unwrap();

    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.text, "Post Description");
    assert_eq!(updated.created_date, post.created_date);
}

#[tokio::test]
async fn test_update_unknown_post_is_not_found() {
    let db = MemoryDatabase::new();
    let (posts, _) = services(&db);

    let err = posts
        .update(9999, post_draft(json!({ "title": "T", "text": "x", "author": 1 })))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        DomainError::NotFound {
            entity_type: "Post",
            id: 9999
        }
    ));
}

#[tokio::test]
async fn test_publish_requires_author() {
    let db = MemoryDatabase::new();
    let author = seed_author(&db, "test").await;
    let stranger = seed_author(&db, "stranger").await;
    let (posts, _) = services(&db);
    let post = posts
        .create(post_draft(
            json!({ "title": "First blog post", "text": "Post Description", "author": author }),
        ))
        .await
        .unwrap();

    assert!(matches!(
        posts.publish(post.id, None).await,
        Err(DomainError::Forbidden(_))
    ));
    assert!(matches!(
        posts.publish(post.id, Some(stranger)).await,
        Err(DomainError::Forbidden(_))
    ));

    let published = posts.publish(post.id, Some(author)).await.unwrap();
    assert!(published.is_published);
    assert!(published.published_date.is_some());
    assert!(posts.get(post.id).await.unwrap().is_published);
}

#[tokio::test]
async fn test_comment_with_unknown_post() {
    let db = MemoryDatabase::new();
    let (_, comments) = services(&db);
    let draft: CommentDraft = serde_json::from_value(json!({ "text": "Hi", "post": 9999 })).unwrap();

    let err = comments.create(draft).await.unwrap_err();

    assert!(matches!(err, DomainError::Validation(_)));
    assert!(comments.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_unknown_comment() {
    let db = MemoryDatabase::new();
    let (_, comments) = services(&db);

    assert!(matches!(
        comments.delete(9999).await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_full_comment_update_keeps_post_link() {
    let db = MemoryDatabase::new();
    let author = seed_author(&db, "test").await;
    let post = db
        .posts()
        .create(NewPost::new(author, "First blog post".into(), "text".into()))
        .await
        .unwrap();
    let (posts, comments) = services(&db);
    let comment = db
        .comments()
        .create(NewComment::new(Some(post.id), "Frist".into()))
        .await
        .unwrap();

    let draft: CommentDraft = serde_json::from_value(json!({ "text": "First" })).unwrap();
    let updated = comments.update(comment.id, draft).await.unwrap();
    assert_eq!(updated.text, "First");
    assert_eq!(updated.post_id, Some(post.id));

    let draft: CommentDraft = serde_json::from_value(json!({ "text": "Loose", "post": null })).unwrap();
    let detached = comments.update(comment.id, draft).await.unwrap();
    assert_eq!(detached.post_id, None);

    let draft: CommentDraft = serde_json::from_value(json!({ "text": "Back", "post": post.id })).unwrap();
    comments.update(comment.id, draft).await.unwrap();
    posts.delete(post.id).await.unwrap();
    assert!(comments.list().await.unwrap().is_empty());
}
