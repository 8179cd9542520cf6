//! # Blog Core
//!
//! The domain layer of the blog backend.
//! Entities, payload validation, repository ports and the services that
//! tie them together. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;
pub mod validation;

pub use error::DomainError;
pub use services::{CommentService, PostService};
