//! HTTP handlers for `/api/books` and `/api/books/{id}`.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

use super::error::BookError;
use super::models::{required, Book, BookId, BookSummary, CreatedBook, NewBook, NewComment};
use super::payload::Payload;
use super::store::BookStore;

/// Shared handler state: the single process-wide store client.
pub type SharedStore = Arc<dyn BookStore>;

pub const COMPLETE_DELETE_MESSAGE: &str = "complete delete successful";
pub const DELETE_BOOK_MESSAGE: &str = "delete book successful";

/// Routes of the books module, relative to its mount point.
pub fn router(store: SharedStore) -> Router {
    Router::new()
        .route(
            "/",
            get(list_books).post(create_book).delete(delete_all_books),
        )
        .route(
            "/{id}",
            get(get_book).post(add_comment).delete(delete_book),
        )
        .with_state(store)
}

async fn list_books(State(store): State<SharedStore>) -> Result<Json<Vec<BookSummary>>, BookError> {
    let books = store.list().await?;
    Ok(Json(books))
}

async fn create_book(
    State(store): State<SharedStore>,
    Payload(body): Payload<NewBook>,
) -> Result<Json<CreatedBook>, BookError> {
    let title = required(body.title).ok_or(BookError::MissingTitle)?;

    let book = store.create(&title).await?;
    tracing::info!(book_id = %book.id, "book created");

    Ok(Json(book.into()))
}

async fn delete_all_books(State(store): State<SharedStore>) -> Result<&'static str, BookError> {
    let removed = store.delete_all().await?;
    tracing::info!(removed, "all books deleted");

    Ok(COMPLETE_DELETE_MESSAGE)
}

async fn get_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<Book>, BookError> {
    let id = BookId::parse(&id).ok_or(BookError::NotFound)?;
    let book = store.find(&id).await?.ok_or(BookError::NotFound)?;
    Ok(Json(book))
}

async fn add_comment(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Payload(body): Payload<NewComment>,
) -> Result<Json<Book>, BookError> {
    // The comment is checked before the id is even looked at.
    let comment = required(body.comment).ok_or(BookError::MissingComment)?;
    let id = BookId::parse(&id).ok_or(BookError::NotFound)?;

    let book = store
        .append_comment(&id, &comment)
        .await?
        .ok_or(BookError::NotFound)?;
    tracing::debug!(book_id = %book.id, comments = book.comments.len(), "comment appended");

    Ok(Json(book))
}

async fn delete_book(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<&'static str, BookError> {
    let id = BookId::parse(&id).ok_or(BookError::NotFound)?;

    if !store.delete(&id).await? {
        return Err(BookError::NotFound);
    }
    tracing::info!(book_id = %id, "book deleted");

    Ok(DELETE_BOOK_MESSAGE)
}
