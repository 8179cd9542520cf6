use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment entity, optionally attached to a post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: Option<i64>,
    pub text: String,
    pub created_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: Option<i64>,
    pub text: String,
    pub created_date: DateTime<Utc>,
}

impl NewComment {
    pub fn new(post_id: Option<i64>, text: String) -> Self {
        Self {
            post_id,
            text,
            created_date: Utc::now(),
        }
    }

    pub fn into_comment(self, id: i64) -> Comment {
        Comment {
            id,
            post_id: self.post_id,
            text: self.text,
            created_date: self.created_date,
        }
    }
}
