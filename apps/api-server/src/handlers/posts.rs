//! Post resource handlers.

use actix_web::{HttpResponse, web};

use blog_core::validation::PostDraft;
use blog_shared::dto::{PostDetail, PostListItem};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/posts/
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    let body: Vec<PostListItem> = posts.into_iter().map(PostListItem::from).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/posts/{id}/
pub async fn retrieve(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let post = state.posts.get(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(PostDetail::from(post)))
}

/// POST /api/posts/
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<PostDraft>,
) -> AppResult<HttpResponse> {
    let post = state.posts.create(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(PostDetail::from(post)))
}

/// POST or PUT /api/posts/{id}/
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<PostDraft>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .update(id.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(PostDetail::from(post)))
}

/// PATCH /api/posts/{id}/
pub async fn partial_update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<PostDraft>,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .partial_update(id.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(PostDetail::from(post)))
}

/// DELETE /api/posts/{id}/
pub async fn destroy(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    state.posts.delete(id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/posts/{id}/publish/ - author only.
pub async fn publish(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post = state
        .posts
        .publish(id.into_inner(), identity.user_id())
        .await?;

    Ok(HttpResponse::Ok().json(PostDetail::from(post)))
}
