//! Storage port for books and its adapters.

mod in_memory;
mod sql;

pub use in_memory::InMemoryBookRepository;
pub use sql::SqlBookRepository;

use super::models::{Book, BookDetails, BookId};

#[derive(thiserror::Error, Debug)]
pub enum StorageError {
    #[error("database failure: {0}")]
    Database(#[from] sqlx::Error),

    #[error("book {0} does not exist and cannot be overwritten")]
    Missing(BookId),
}

/// Generic CRUD over the book table.
#[async_trait::async_trait]
pub trait BookRepository: Send + Sync {
    /// Lists every stored book, ordered by id
    async fn find_all(&self) -> Result<Vec<Book>, StorageError>;

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StorageError>;

    /// Persists `details`. `None` inserts a new row and returns it with the
    /// assigned id; `Some(id)` overwrites that row, failing with
    /// `StorageError::Missing` if it does not exist.
    async fn save(&self, id: Option<BookId>, details: &BookDetails) -> Result<Book, StorageError>;

    /// Removes the row if present; absent ids are a no-op.
    async fn delete_by_id(&self, id: BookId) -> Result<(), StorageError>;

    async fn exists_by_id(&self, id: BookId) -> Result<bool, StorageError>;
}
