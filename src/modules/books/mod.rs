pub mod error;
pub mod models;
pub mod payload;
pub mod routes;
pub mod store;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use librarian_kernel::{InitCtx, Module};
use serde_json::json;

use routes::SharedStore;

/// Books module: the catalog of books and their comments.
pub struct BooksModule {
    store: SharedStore,
}

impl BooksModule {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            backend = self.store.backend(),
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.store.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let text_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "text/plain": {
                        "schema": { "$ref": "#/components/schemas/ErrorMessage" }
                    }
                }
            })
        };
        let json_response = |description: &str, schema: serde_json::Value| {
            json!({
                "description": description,
                "content": { "application/json": { "schema": schema } }
            })
        };
        let book_ref = json!({ "$ref": "#/components/schemas/Book" });
        let id_parameter = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "string" }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books with their comment counts",
                        "tags": ["Books"],
                        "responses": {
                            "200": json_response("List of books", json!({
                                "type": "array",
                                "items": { "$ref": "#/components/schemas/BookSummary" }
                            })),
                            "500": text_response("Store failure")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "content": {
                                "application/x-www-form-urlencoded": {
                                    "schema": { "$ref": "#/components/schemas/NewBook" }
                                },
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/NewBook" }
                                }
                            }
                        },
                        "responses": {
                            "200": json_response("Created book", json!({
                                "$ref": "#/components/schemas/CreatedBook"
                            })),
                            "400": text_response("missing required field title"),
                            "500": text_response("Store failure")
                        }
                    },
                    "delete": {
                        "summary": "Delete every book",
                        "tags": ["Books"],
                        "responses": {
                            "200": text_response("complete delete successful"),
                            "500": text_response("Store failure")
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book with its comments",
                        "tags": ["Books"],
                        "parameters": [id_parameter.clone()],
                        "responses": {
                            "200": json_response("Book", book_ref.clone()),
                            "400": text_response("no book exists")
                        }
                    },
                    "post": {
                        "summary": "Append a comment to a book",
                        "tags": ["Books"],
                        "parameters": [id_parameter.clone()],
                        "requestBody": {
                            "content": {
                                "application/x-www-form-urlencoded": {
                                    "schema": { "$ref": "#/components/schemas/NewComment" }
                                },
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/NewComment" }
                                }
                            }
                        },
                        "responses": {
                            "200": json_response("Updated book", book_ref),
                            "400": text_response("missing required field comment, or no book exists")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [id_parameter],
                        "responses": {
                            "200": text_response("delete book successful"),
                            "400": text_response("no book exists")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "_id": { "type": "string", "description": "Identifier of the book" },
                            "title": { "type": "string" },
                            "comments": { "type": "array", "items": { "type": "string" } }
                        },
                        "required": ["_id", "title", "comments"]
                    },
                    "BookSummary": {
                        "type": "object",
                        "properties": {
                            "_id": { "type": "string" },
                            "title": { "type": "string" },
                            "commentcount": { "type": "integer", "minimum": 0 }
                        },
                        "required": ["_id", "title", "commentcount"]
                    },
                    "CreatedBook": {
                        "type": "object",
                        "properties": {
                            "_id": { "type": "string" },
                            "title": { "type": "string" }
                        },
                        "required": ["_id", "title"]
                    },
                    "NewBook": {
                        "type": "object",
                        "properties": { "title": { "type": "string" } }
                    },
                    "NewComment": {
                        "type": "object",
                        "properties": { "comment": { "type": "string" } }
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create a new instance of the books module backed by `store`
pub fn create_module(store: SharedStore) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}
