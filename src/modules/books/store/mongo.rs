use async_trait::async_trait;
use mongodb::{
    bson::{doc, oid::ObjectId, Document},
    options::{FindOneAndUpdateOptions, ReturnDocument},
    Collection, Database,
};
use serde::{Deserialize, Serialize};

use super::{BookStore, StoreError};
use crate::modules::books::models::{Book, BookId, BookSummary};

/// Stored shape of a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    #[serde(default)]
    comments: Vec<String>,
}

impl From<BookDocument> for Book {
    fn from(document: BookDocument) -> Self {
        Book {
            id: document.id.into(),
            title: document.title,
            comments: document.comments,
        }
    }
}

/// Output shape of the listing pipeline.
#[derive(Debug, Deserialize)]
struct SummaryDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    commentcount: u32,
}

impl From<SummaryDocument> for BookSummary {
    fn from(document: SummaryDocument) -> Self {
        BookSummary {
            id: document.id.into(),
            title: document.title,
            commentcount: document.commentcount as usize,
        }
    }
}

fn by_id(id: &BookId) -> Document {
    doc! { "_id": id.as_object_id() }
}

/// [`BookStore`] backed by a MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoBookStore {
    collection: Collection<BookDocument>,
}

impl MongoBookStore {
    pub fn new(database: &Database, collection: &str) -> Self {
        Self {
            collection: database.collection(collection),
        }
    }
}

#[async_trait]
impl BookStore for MongoBookStore {
    fn backend(&self) -> &'static str {
        "mongodb"
    }

    async fn list(&self) -> Result<Vec<BookSummary>, StoreError> {
        let pipeline = [
            doc! { "$sort": { "_id": 1 } },
            doc! {
                "$project": {
                    "title": 1,
                    "commentcount": { "$size": { "$ifNull": ["$comments", []] } },
                }
            },
        ];

        let mut cursor = self
            .collection
            .aggregate(pipeline, None)
            .await?
            .with_type::<SummaryDocument>();

        let mut books = Vec::new();
        while cursor.advance().await? {
            books.push(cursor.deserialize_current()?.into());
        }
        Ok(books)
    }

    async fn create(&self, title: &str) -> Result<Book, StoreError> {
        let document = BookDocument {
            id: ObjectId::new(),
            title: title.to_string(),
            comments: Vec::new(),
        };
        self.collection.insert_one(&document, None).await?;

        tracing::debug!(book_id = %document.id, "book inserted");
        Ok(document.into())
    }

    async fn find(&self, id: &BookId) -> Result<Option<Book>, StoreError> {
        let document = self.collection.find_one(by_id(id), None).await?;
        Ok(document.map(Book::from))
    }

    async fn append_comment(
        &self,
        id: &BookId,
        comment: &str,
    ) -> Result<Option<Book>, StoreError> {
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();

        let document = self
            .collection
            .find_one_and_update(by_id(id), doc! { "$push": { "comments": comment } }, options)
            .await?;
        Ok(document.map(Book::from))
    }

    async fn delete(&self, id: &BookId) -> Result<bool, StoreError> {
        let removed = self.collection.find_one_and_delete(by_id(id), None).await?;
        Ok(removed.is_some())
    }

    async fn delete_all(&self) -> Result<u64, StoreError> {
        let result = self.collection.delete_many(doc! {}, None).await?;
        Ok(result.deleted_count)
    }
}
