//! Authentication handlers.

use actix_web::{HttpResponse, web};

use blog_core::domain::NewUser;
use blog_core::validation::{
    NOT_BLANK, PASSWORD_MIN_LEN, USERNAME_MAX_LEN, ValidationErrors, too_long,
};
use blog_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Usernames are stored and looked up without surrounding whitespace.
fn normalize_username(username: &str) -> String {
    username.trim().to_string()
}

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let username = normalize_username(&req.username);

    let mut errors = ValidationErrors::new();
    if username.is_empty() {
        errors.add("username", NOT_BLANK);
    } else if username.chars().count() > USERNAME_MAX_LEN {
        errors.add("username", too_long(USERNAME_MAX_LEN));
    }
    if req.password.chars().count() < PASSWORD_MIN_LEN {
        errors.add(
            "password",
            format!("Ensure this field has at least {PASSWORD_MIN_LEN} characters."),
        );
    }
    if !errors.is_empty() {
        return Err(AppError::Validation(errors));
    }

    if state.users.find_by_username(&username).await?.is_some() {
        return Err(AppError::Conflict("Username already registered".to_string()));
    }

    let password_hash = state
        .passwords
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    let user = state
        .users
        .create(NewUser::new(username, password_hash))
        .await?;
    tracing::info!(user_id = user.id, "User registered");

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_username(&normalize_username(&req.username))
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = state
        .passwords
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        tracing::debug!(user_id = user.id, "Rejected login");
        return Err(AppError::Unauthorized);
    }

    let token = state
        .tokens
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: state.tokens.expiration_seconds().max(0) as u64,
    }))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}
