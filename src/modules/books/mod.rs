pub mod models;
pub mod repository;
pub mod routes;
pub mod service;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookstore_kernel::{InitCtx, Module, SchemaStatement};
use serde_json::json;
use sqlx::SqlitePool;
use utoipa::PartialSchema;

use models::{Book, BookDetails};
use repository::{BookRepository, SqlBookRepository};
use service::BookService;

pub(crate) const BOOKS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS books (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    title          TEXT    NOT NULL,
    author         TEXT    NOT NULL,
    price          REAL    NOT NULL,
    published_date TEXT    NOT NULL,
    genre          TEXT    NOT NULL
);
"#;

/// Book catalog module: CRUD over the `books` table
pub struct BooksModule {
    service: BookService,
}

impl BooksModule {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self {
            service: BookService::new(repository),
        }
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
            environment = ?ctx.settings.environment,
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(self.service.clone())
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        let error_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/ErrorResponse" }
                    }
                }
            })
        };
        let book_response = |description: &str| {
            json!({
                "description": description,
                "content": {
                    "application/json": {
                        "schema": { "$ref": "#/components/schemas/Book" }
                    }
                }
            })
        };
        let id_parameter = json!({
            "name": "id",
            "in": "path",
            "required": true,
            "schema": { "type": "integer", "format": "int64" }
        });
        let details_body = json!({
            "required": true,
            "content": {
                "application/json": {
                    "schema": { "$ref": "#/components/schemas/BookDetails" }
                }
            }
        });

        Some(json!({
            "paths": {
                "/": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "All books",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            },
                            "500": error_response("Internal server error")
                        }
                    },
                    "post": {
                        "summary": "Create a book",
                        "tags": ["Books"],
                        "requestBody": details_body,
                        "responses": {
                            "201": book_response("Created book with its assigned id"),
                            "500": error_response("Invalid payload or storage failure")
                        }
                    }
                },
                "/{id}": {
                    "get": {
                        "summary": "Get a book",
                        "tags": ["Books"],
                        "parameters": [id_parameter],
                        "responses": {
                            "200": book_response("The book"),
                            "404": error_response("Book not found"),
                            "500": error_response("Internal server error")
                        }
                    },
                    "put": {
                        "summary": "Replace every field of a book",
                        "tags": ["Books"],
                        "parameters": [id_parameter],
                        "requestBody": details_body,
                        "responses": {
                            "200": book_response("Updated book"),
                            "404": error_response("Book not found"),
                            "500": error_response("Invalid payload or storage failure")
                        }
                    },
                    "delete": {
                        "summary": "Delete a book",
                        "tags": ["Books"],
                        "parameters": [id_parameter],
                        "responses": {
                            "200": {
                                "description": "Deleted",
                                "content": {
                                    "text/plain": {
                                        "schema": { "type": "string" }
                                    }
                                }
                            },
                            "404": error_response("Book not found"),
                            "500": error_response("Internal server error")
                        }
                    }
                }
            },
            "components": {
                "schemas": {
                    "Book": Book::schema(),
                    "BookDetails": BookDetails::schema()
                }
            }
        }))
    }

    fn schema(&self) -> Vec<SchemaStatement> {
        vec![SchemaStatement {
            id: "001_books",
            sql: BOOKS_TABLE,
        }]
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module stopped");
        Ok(())
    }
}

/// Create the books module backed by the given pool
pub fn create_module(pool: SqlitePool) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(Arc::new(SqlBookRepository::new(pool))))
}
