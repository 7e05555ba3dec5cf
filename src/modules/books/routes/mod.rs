//! HTTP handlers for `/api/books`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use bookstore_http::error::AppError;

use super::models::{Book, BookDetails, BookId};
use super::service::{BookService, BookServiceError};

pub const DELETED_MESSAGE: &str = "Book deleted successfully";

impl From<BookServiceError> for AppError {
    fn from(err: BookServiceError) -> Self {
        match err {
            BookServiceError::NotFound(_) => AppError::not_found(err.to_string()),
            BookServiceError::Storage(e) => AppError::Internal(anyhow::Error::new(e)),
        }
    }
}

/// Routes relative to the module mount point
pub fn router(service: BookService) -> Router {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/{id}", get(get_book).put(update_book).delete(delete_book))
        .with_state(service)
}

async fn list_books(State(service): State<BookService>) -> Result<Json<Vec<Book>>, AppError> {
    Ok(Json(service.get_all_books().await?))
}

async fn get_book(
    State(service): State<BookService>,
    id: Result<Path<BookId>, PathRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(id) = id?;
    Ok(Json(service.get_book(id).await?))
}

async fn create_book(
    State(service): State<BookService>,
    payload: Result<Json<BookDetails>, JsonRejection>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let Json(details) = payload?;
    let book = service.create_book(details).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

async fn update_book(
    State(service): State<BookService>,
    id: Result<Path<BookId>, PathRejection>,
    payload: Result<Json<BookDetails>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let Path(id) = id?;
    let Json(details) = payload?;
    Ok(Json(service.update_book(id, details).await?))
}

async fn delete_book(
    State(service): State<BookService>,
    id: Result<Path<BookId>, PathRejection>,
) -> Result<&'static str, AppError> {
    let Path(id) = id?;
    service.delete_book(id).await?;
    Ok(DELETED_MESSAGE)
}
