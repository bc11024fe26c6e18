use std::fmt;
use std::str::FromStr;

use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize, Serializer};

/// Identifier of a book, assigned once at creation.
///
/// Wraps the store's 12-byte object id and renders as 24 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BookId(ObjectId);

impl BookId {
    /// Generate a fresh identifier.
    pub fn new() -> Self {
        Self(ObjectId::new())
    }

    /// Parse a client-supplied identifier.
    ///
    /// Returns `None` for anything that is not a well-formed id; callers treat
    /// that exactly like an id that matches no book.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.parse().ok()
    }

    pub fn as_object_id(&self) -> ObjectId {
        self.0
    }
}

impl Default for BookId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ObjectId> for BookId {
    fn from(id: ObjectId) -> Self {
        Self(id)
    }
}

impl FromStr for BookId {
    type Err = mongodb::bson::oid::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        ObjectId::parse_str(raw).map(Self)
    }
}

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_hex())
    }
}

impl Serialize for BookId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A book with its full comment history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: BookId,
    pub title: String,
    pub comments: Vec<String>,
}

impl Book {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: BookId::new(),
            title: title.into(),
            comments: Vec::new(),
        }
    }

    pub fn summary(&self) -> BookSummary {
        BookSummary {
            id: self.id,
            title: self.title.clone(),
            commentcount: self.comments.len(),
        }
    }
}

/// Listing projection of a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BookSummary {
    #[serde(rename = "_id")]
    pub id: BookId,
    pub title: String,
    pub commentcount: usize,
}

/// Response body for a freshly created book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreatedBook {
    #[serde(rename = "_id")]
    pub id: BookId,
    pub title: String,
}

impl From<Book> for CreatedBook {
    fn from(book: Book) -> Self {
        Self {
            id: book.id,
            title: book.title,
        }
    }
}

/// Request body for creating a book.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBook {
    pub title: Option<String>,
}

/// Request body for appending a comment.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewComment {
    pub comment: Option<String>,
}

/// Presence check shared by every required text field: absent and empty are both missing.
pub fn required(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.is_empty())
}
