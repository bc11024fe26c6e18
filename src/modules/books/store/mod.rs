//! Persistence seam for the books module.
//!
//! Every operation is a single step against the backing store. Lookups that
//! match nothing are reported as `Ok(None)` / `Ok(false)`, never as errors.

mod memory;
mod mongo;

use async_trait::async_trait;
use thiserror::Error;

use super::models::{Book, BookId, BookSummary};

pub use memory::MemoryBookStore;
pub use mongo::MongoBookStore;

/// Failure of the backing store itself.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database operation failed")]
    Database(#[from] mongodb::error::Error),
}

/// Storage operations the HTTP handlers rely on.
#[async_trait]
pub trait BookStore: Send + Sync + 'static {
    /// Short backend name used in logs.
    fn backend(&self) -> &'static str;

    /// Every book projected to its comment count, oldest first.
    async fn list(&self) -> Result<Vec<BookSummary>, StoreError>;

    /// Persist a new book with no comments.
    async fn create(&self, title: &str) -> Result<Book, StoreError>;

    async fn find(&self, id: &BookId) -> Result<Option<Book>, StoreError>;

    /// Append `comment` to the end of the book's comments and return the updated book.
    async fn append_comment(&self, id: &BookId, comment: &str)
        -> Result<Option<Book>, StoreError>;

    /// Remove one book; `false` when nothing matched.
    async fn delete(&self, id: &BookId) -> Result<bool, StoreError>;

    /// Remove every book and return how many were removed.
    async fn delete_all(&self) -> Result<u64, StoreError>;
}
