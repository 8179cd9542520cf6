//! Payload validation.
//!
//! Every write goes through an explicit schema step: the raw payload is
//! deserialized into a draft whose fields remember whether they were
//! missing, `null`, or carried a value, and the draft is then checked
//! field by field. All problems are collected into [`ValidationErrors`]
//! before anything touches storage.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

pub const REQUIRED: &str = "This field is required.";
pub const NOT_NULL: &str = "This field may not be null.";
pub const NOT_BLANK: &str = "This field may not be blank.";

/// Maximum length of a post title, in characters.
pub const TITLE_MAX_LEN: usize = 200;
/// Maximum length of a username, in characters.
pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;

pub fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

pub fn does_not_exist(id: i64) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

/// A payload field as it arrived on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Field<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<T> Field<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Field::Value(v) => Some(v),
            _ => None,
        }
    }
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only reached when the key is present; `#[serde(default)]` covers absence.
        Ok(Option::<T>::deserialize(deserializer)?.map_or(Field::Null, Field::Value))
    }
}

/// Field name -> messages, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `Ok(value)` when nothing was recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    /// Check a required text field.
    pub fn required_text(
        &mut self,
        name: &str,
        field: Field<String>,
        max_len: Option<usize>,
    ) -> Option<String> {
        match field {
            Field::Missing => {
                self.add(name, REQUIRED);
                None
            }
            field => self.optional_text(name, field, max_len),
        }
    }

    /// Check a text field that may be omitted but not nulled or blanked.
    pub fn optional_text(
        &mut self,
        name: &str,
        field: Field<String>,
        max_len: Option<usize>,
    ) -> Option<String> {
        match field {
            Field::Missing => None,
            Field::Null => {
                self.add(name, NOT_NULL);
                None
            }
            Field::Value(text) if text.trim().is_empty() => {
                self.add(name, NOT_BLANK);
                None
            }
            Field::Value(text) => match max_len {
                Some(max) if text.chars().count() > max => {
                    self.add(name, too_long(max));
                    None
                }
                _ => Some(text),
            },
        }
    }

    /// Check a required non-text field.
    pub fn required<T>(&mut self, name: &str, field: Field<T>) -> Option<T> {
        match field {
            Field::Missing => {
                self.add(name, REQUIRED);
                None
            }
            field => self.optional(name, field),
        }
    }

    pub fn optional<T>(&mut self, name: &str, field: Field<T>) -> Option<T> {
        match field {
            Field::Missing => None,
            Field::Null => {
                self.add(name, NOT_NULL);
                None
            }
            Field::Value(value) => Some(value),
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    f.write_str("; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Raw post payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDraft {
    #[serde(default)]
    pub title: Field<String>,
    #[serde(default)]
    pub text: Field<String>,
    #[serde(default)]
    pub author: Field<i64>,
}

/// Validated post fields for create and full update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub text: String,
    pub author_id: i64,
}

/// Validated subset of post fields for a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub text: Option<String>,
    pub author_id: Option<i64>,
}

impl PostDraft {
    /// Validate every field as required. `errors` may already hold
    /// findings (such as a dangling author) from the caller.
    pub fn validate(self, mut errors: ValidationErrors) -> Result<PostFields, ValidationErrors> {
        let title = errors.required_text("title", self.title, Some(TITLE_MAX_LEN));
        let text = errors.required_text("text", self.text, None);
        let author_id = errors.required("author", self.author);

        match (title, text, author_id) {
            (Some(title), Some(text), Some(author_id)) if errors.is_empty() => Ok(PostFields {
                title,
                text,
                author_id,
            }),
            _ => Err(errors),
        }
    }

    /// Validate only the supplied fields.
    pub fn validate_partial(
        self,
        mut errors: ValidationErrors,
    ) -> Result<PostChanges, ValidationErrors> {
        let changes = PostChanges {
            title: errors.optional_text("title", self.title, Some(TITLE_MAX_LEN)),
            text: errors.optional_text("text", self.text, None),
            author_id: errors.optional("author", self.author),
        };
        errors.into_result(changes)
    }
}

/// Raw comment payload.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentDraft {
    #[serde(default)]
    pub text: Field<String>,
    #[serde(default)]
    pub post: Field<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentFields {
    pub text: String,
    /// `None` when the payload leaves `post` out, `Some(None)` when it is `null`.
    pub post_id: Option<Option<i64>>,
}

/// Partial comment update. `post` is `Some(None)` when explicitly detached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentChanges {
    pub text: Option<String>,
    pub post_id: Option<Option<i64>>,
}

impl CommentDraft {
    pub fn validate(self, mut errors: ValidationErrors) -> Result<CommentFields, ValidationErrors> {
        let text = errors.required_text("text", self.text, None);
        match text {
            Some(text) if errors.is_empty() => Ok(CommentFields {
                text,
                post_id: post_reference(self.post),
            }),
            _ => Err(errors),
        }
    }

    pub fn validate_partial(
        self,
        mut errors: ValidationErrors,
    ) -> Result<CommentChanges, ValidationErrors> {
        let changes = CommentChanges {
            text: errors.optional_text("text", self.text, None),
            post_id: post_reference(self.post),
        };
        errors.into_result(changes)
    }
}

fn post_reference(field: Field<i64>) -> Option<Option<i64>> {
    match field {
        Field::Missing => None,
        Field::Null => Some(None),
        Field::Value(id) => Some(Some(id)),
    }
}
