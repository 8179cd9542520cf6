use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Post entity - a blog post written by a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub author_id: i64,
    pub title: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
    pub published_date: Option<DateTime<Utc>>,
    pub is_published: bool,
}

impl Post {
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }

    /// Mark the post as published. Publishing twice keeps the first date.
    pub fn publish(&mut self) {
        if !self.is_published {
            self.is_published = true;
            self.published_date = Some(Utc::now());
        }
    }
}

/// A post that has not been stored yet.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: i64,
    pub title: String,
    pub text: String,
    pub created_date: DateTime<Utc>,
}

impl NewPost {
    /// Create a new, unpublished post.
    pub fn new(author_id: i64, title: String, text: String) -> Self {
        Self {
            author_id,
            title,
            text,
            created_date: Utc::now(),
        }
    }

    pub fn into_post(self, id: i64) -> Post {
        Post {
            id,
            author_id: self.author_id,
            title: self.title,
            text: self.text,
            created_date: self.created_date,
            published_date: None,
            is_published: false,
        }
    }
}
