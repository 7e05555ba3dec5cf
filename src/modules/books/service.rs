use std::sync::Arc;

use super::models::{Book, BookDetails, BookId};
use super::repository::{BookRepository, StorageError};

#[derive(thiserror::Error, Debug)]
pub enum BookServiceError {
    #[error("Book not found with id: {0}")]
    NotFound(BookId),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Business operations on the book catalog.
///
/// Cheap to clone; every clone shares the same repository.
#[derive(Clone)]
pub struct BookService {
    repository: Arc<dyn BookRepository>,
}

impl BookService {
    pub fn new(repository: Arc<dyn BookRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_all_books(&self) -> Result<Vec<Book>, BookServiceError> {
        Ok(self.repository.find_all().await?)
    }

    pub async fn get_book(&self, id: BookId) -> Result<Book, BookServiceError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BookServiceError::NotFound(id))
    }

    pub async fn create_book(&self, details: BookDetails) -> Result<Book, BookServiceError> {
        let book = self.repository.save(None, &details).await?;
        tracing::info!(book_id = book.id, title = %book.title, "book created");
        Ok(book)
    }

    /// Replace every mutable field of an existing book.
    pub async fn update_book(
        &self,
        id: BookId,
        details: BookDetails,
    ) -> Result<Book, BookServiceError> {
        let mut book = self.get_book(id).await?;
        book.overwrite_with(details);

        // the row can vanish between the read and the write
        let book = self
            .repository
            .save(Some(book.id), &book.details())
            .await
            .map_err(|e| match e {
                StorageError::Missing(id) => BookServiceError::NotFound(id),
                e => e.into(),
            })?;
        tracing::info!(book_id = book.id, "book updated");
        Ok(book)
    }

    pub async fn delete_book(&self, id: BookId) -> Result<(), BookServiceError> {
        if !self.repository.exists_by_id(id).await? {
            return Err(BookServiceError::NotFound(id));
        }

        self.repository.delete_by_id(id).await?;
        tracing::info!(book_id = id, "book deleted");
        Ok(())
    }
}
