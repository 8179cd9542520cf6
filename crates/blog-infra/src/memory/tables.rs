use std::collections::BTreeMap;

use blog_core::domain::{Comment, Post, User};

/// One table: rows keyed by id, plus the last id handed out.
pub struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Clone> Table<T> {
    pub(crate) fn next_id(&mut self) -> i64 {
        self.last_id += 1;
        self.last_id
    }

    pub(crate) fn all(&self) -> Vec<T> {
        self.rows.values().cloned().collect()
    }

    pub(crate) fn get(&self, id: i64) -> Option<&T> {
        self.rows.get(&id)
    }

    pub(crate) fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    pub(crate) fn insert(&mut self, id: i64, row: T) {
        self.rows.insert(id, row);
    }

    pub(crate) fn remove(&mut self, id: i64) -> Option<T> {
        self.rows.remove(&id)
    }

    pub(crate) fn retain(&mut self, keep: impl FnMut(&i64, &mut T) -> bool) {
        self.rows.retain(keep);
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }
}

/// All tables of the in-memory database.
#[derive(Default)]
pub struct Tables {
    pub(crate) users: Table<User>,
    pub(crate) posts: Table<Post>,
    pub(crate) comments: Table<Comment>,
}

impl Tables {
    fn delete_post(&mut self, id: i64) -> bool {
        if self.posts.remove(id).is_none() {
            return false;
        }
        self.comments.retain(|_, c| c.post_id != Some(id));
        true
    }

    fn delete_user(&mut self, id: i64) -> bool {
        if self.users.remove(id).is_none() {
            return false;
        }
        let authored: Vec<i64> = self
            .posts
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in authored {
            self.delete_post(post_id);
        }
        true
    }
}

/// An entity that lives in one of the [`Tables`].
pub trait Stored: Clone + Send + Sync + 'static {
    const NAME: &'static str;

    fn table(tables: &Tables) -> &Table<Self>;

    /// Remove the row and anything that depends on it.
    fn delete(tables: &mut Tables, id: i64) -> bool;
}

impl Stored for User {
    const NAME: &'static str = "users";

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.users
    }

    fn delete(tables: &mut Tables, id: i64) -> bool {
        tables.delete_user(id)
    }
}

impl Stored for Post {
    const NAME: &'static str = "posts";

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.posts
    }

    fn delete(tables: &mut Tables, id: i64) -> bool {
        tables.delete_post(id)
    }
}

impl Stored for Comment {
    const NAME: &'static str = "comments";

    fn table(tables: &Tables) -> &Table<Self> {
        &tables.comments
    }

    fn delete(tables: &mut Tables, id: i64) -> bool {
        tables.comments.remove(id).is_some()
    }
}
