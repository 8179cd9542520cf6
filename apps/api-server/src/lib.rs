//! # Blog API Server
//!
//! Actix-web application: routes, handlers, error mapping and the
//! shared state they run against. `main.rs` wires it to a listener;
//! integration tests build it over an isolated in-memory store.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod state;
pub mod telemetry;

use actix_web::web;

use middleware::error::{json_error_handler, path_error_handler, route_not_found};
use state::AppState;

/// Register state, extractor configuration and routes on an `App`.
///
/// ```ignore
/// App::new().configure(api_server::app_config(state))
/// ```
pub fn app_config(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::PathConfig::default().error_handler(path_error_handler))
            .default_service(web::to(route_not_found));
        handlers::configure_routes(cfg);
    }
}
