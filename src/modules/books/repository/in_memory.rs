use std::collections::BTreeMap;

use tokio::sync::RwLock;

use super::{BookRepository, StorageError};
use crate::modules::books::models::{Book, BookDetails, BookId};

#[derive(Debug, Default)]
struct Inner {
    books: BTreeMap<BookId, Book>,
    last_id: BookId,
}

/// Process-local book repository, ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryBookRepository {
    inner: RwLock<Inner>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl BookRepository for InMemoryBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, StorageError> {
        Ok(self.inner.read().await.books.values().cloned().collect())
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StorageError> {
        Ok(self.inner.read().await.books.get(&id).cloned())
    }

    async fn save(&self, id: Option<BookId>, details: &BookDetails) -> Result<Book, StorageError> {
        let mut inner = self.inner.write().await;

        let id = match id {
            Some(id) if inner.books.contains_key(&id) => id,
            Some(id) => return Err(StorageError::Missing(id)),
            None => {
                inner.last_id += 1;
                inner.last_id
            }
        };

        let book = Book::from_details(id, details.clone());
        inner.books.insert(id, book.clone());
        Ok(book)
    }

    async fn delete_by_id(&self, id: BookId) -> Result<(), StorageError> {
        self.inner.write().await.books.remove(&id);
        Ok(())
    }

    async fn exists_by_id(&self, id: BookId) -> Result<bool, StorageError> {
        Ok(self.inner.read().await.books.contains_key(&id))
    }
}
