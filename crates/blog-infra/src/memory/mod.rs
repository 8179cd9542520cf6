//! In-memory repositories - used when no database is configured and in tests.
//!
//! Ids are assigned sequentially from 1 per table and never reused.
//! Deletes cascade the same way the PostgreSQL foreign keys do.

mod repository;
mod tables;

pub use repository::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryUserRepository, MemoryRepository,
};
pub use tables::{Stored, Tables};

use std::sync::Arc;

use tokio::sync::RwLock;

/// Shared handle to the in-memory tables. Cloning shares the data.
#[derive(Clone, Default)]
pub struct MemoryDatabase {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn users(&self) -> InMemoryUserRepository {
        MemoryRepository::new(self.clone())
    }

    pub fn posts(&self) -> InMemoryPostRepository {
        MemoryRepository::new(self.clone())
    }

    pub fn comments(&self) -> InMemoryCommentRepository {
        MemoryRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests;
