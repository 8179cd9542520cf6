//! HTTP handlers and route configuration.

mod auth;
mod comments;
mod health;
mod posts;

use actix_web::{Resource, web};

use crate::middleware::error::method_not_allowed;

/// A resource whose unsupported methods answer with a 405 problem document.
fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::to(method_not_allowed))
}

/// Configure all application routes.
///
/// Resource paths keep their trailing slash: `/api/posts/` and
/// `/api/posts/{id}/`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .service(resource("/health").route(web::get().to(health::health_check)))
            // Auth routes
            .service(
                web::scope("/auth")
                    .service(resource("/register").route(web::post().to(auth::register)))
                    .service(resource("/login").route(web::post().to(auth::login)))
                    .service(resource("/me").route(web::get().to(auth::me))),
            )
            // Posts
            .service(
                resource("/posts/")
                    .route(web::get().to(posts::list))
                    .route(web::post().to(posts::create)),
            )
            .service(
                resource("/posts/{id}/")
                    .route(web::get().to(posts::retrieve))
                    .route(web::post().to(posts::update))
                    .route(web::put().to(posts::update))
                    .route(web::patch().to(posts::partial_update))
                    .route(web::delete().to(posts::destroy)),
            )
            .service(resource("/posts/{id}/publish/").route(web::post().to(posts::publish)))
            // Comments
            .service(
                resource("/comments/")
                    .route(web::get().to(comments::list))
                    .route(web::post().to(comments::create)),
            )
            .service(
                resource("/comments/{id}/")
                    .route(web::get().to(comments::retrieve))
                    .route(web::post().to(comments::update))
                    .route(web::put().to(comments::update))
                    .route(web::patch().to(comments::partial_update))
                    .route(web::delete().to(comments::destroy)),
            ),
    );
}
