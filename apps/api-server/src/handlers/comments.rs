//! Comment resource handlers.

use actix_web::{HttpResponse, web};

use blog_core::validation::CommentDraft;
use blog_shared::dto::CommentResponse;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/comments/
pub async fn list(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let comments = state.comments.list().await?;
    let body: Vec<CommentResponse> = comments.into_iter().map(CommentResponse::from).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/comments/{id}/
pub async fn retrieve(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    let comment = state.comments.get(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// POST /api/comments/
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CommentDraft>,
) -> AppResult<HttpResponse> {
    let comment = state.comments.create(body.into_inner()).await?;

    Ok(HttpResponse::Created().json(CommentResponse::from(comment)))
}

/// POST or PUT /api/comments/{id}/
pub async fn update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<CommentDraft>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .update(id.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// PATCH /api/comments/{id}/
pub async fn partial_update(
    state: web::Data<AppState>,
    id: web::Path<i64>,
    body: web::Json<CommentDraft>,
) -> AppResult<HttpResponse> {
    let comment = state
        .comments
        .partial_update(id.into_inner(), body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(CommentResponse::from(comment)))
}

/// DELETE /api/comments/{id}/
pub async fn destroy(state: web::Data<AppState>, id: web::Path<i64>) -> AppResult<HttpResponse> {
    state.comments.delete(id.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}
