use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BookStore, StoreError};
use crate::modules::books::models::{Book, BookId, BookSummary};

/// In-process [`BookStore`] keeping books in insertion order.
///
/// Nothing survives a restart. Used by tests and by `serve --in-memory`.
#[derive(Debug, Default)]
pub struct MemoryBookStore {
    books: RwLock<Vec<Book>>,
}

impl MemoryBookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BookStore for MemoryBookStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn list(&self) -> Result<Vec<BookSummary>, StoreError> {
        let books = self.books.read().await;
        Ok(books.iter().map(Book::summary).collect())
    }

    async fn create(&self, title: &str) -> Result<Book, StoreError> {
        let book = Book::new(title);
        self.books.write().await.push(book.clone());
        Ok(book)
    }

    async fn find(&self, id: &BookId) -> Result<Option<Book>, StoreError> {
        let books = self.books.read().await;
        Ok(books.iter().find(|book| book.id == *id).cloned())
    }

    async fn append_comment(
        &self,
        id: &BookId,
        comment: &str,
    ) -> Result<Option<Book>, StoreError> {
        let mut books = self.books.write().await;
        Ok(books.iter_mut().find(|book| book.id == *id).map(|book| {
            book.comments.push(comment.to_string());
            book.clone()
        }))
    }

    async fn delete(&self, id: &BookId) -> Result<bool, StoreError> {
        let mut books = self.books.write().await;
        match books.iter().position(|book| book.id == *id) {
            Some(index) => {
                books.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let mut books = self.books.write().await;
        let removed = books.len() as u64;
        books.clear();
        Ok(removed)
    }
}
