//! sqlx-backed book repository.

use sqlx::SqlitePool;
use tracing::instrument;

use super::{BookRepository, StorageError};
use crate::modules::books::models::{Book, BookDetails, BookId};

/// Book repository over a SQLite connection pool.
///
/// Every statement is a single-row primary key operation; concurrent writers
/// to the same id resolve as last write wins.
#[derive(Debug, Clone)]
pub struct SqlBookRepository {
    pool: SqlitePool,
}

impl SqlBookRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl BookRepository for SqlBookRepository {
    #[instrument(level = "debug", skip(self), err)]
    async fn find_all(&self) -> Result<Vec<Book>, StorageError> {
        let books = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, price, published_date, genre
            FROM books
            ORDER BY id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(books)
    }

    #[instrument(level = "debug", skip(self), err)]
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, StorageError> {
        let book = sqlx::query_as::<_, Book>(
            r#"
            SELECT id, title, author, price, published_date, genre
            FROM books
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(book)
    }

    #[instrument(level = "debug", skip(self, details), err)]
    async fn save(&self, id: Option<BookId>, details: &BookDetails) -> Result<Book, StorageError> {
        match id {
            None => {
                let book = sqlx::query_as::<_, Book>(
                    r#"
                    INSERT INTO books (title, author, price, published_date, genre)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    RETURNING id, title, author, price, published_date, genre
                    "#,
                )
                .bind(&details.title)
                .bind(&details.author)
                .bind(details.price)
                .bind(details.published_date)
                .bind(&details.genre)
                .fetch_one(&self.pool)
                .await?;

                Ok(book)
            }
            Some(id) => {
                let book = sqlx::query_as::<_, Book>(
                    r#"
                    UPDATE books
                    SET title = ?1,
                        author = ?2,
                        price = ?3,
                        published_date = ?4,
                        genre = ?5
                    WHERE id = ?6
                    RETURNING id, title, author, price, published_date, genre
                    "#,
                )
                .bind(&details.title)
                .bind(&details.author)
                .bind(details.price)
                .bind(details.published_date)
                .bind(&details.genre)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

                book.ok_or(StorageError::Missing(id))
            }
        }
    }

    #[instrument(level = "debug", skip(self), err)]
    async fn delete_by_id(&self, id: BookId) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM books WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    #[instrument(level = "debug", skip(self), err)]
    async fn exists_by_id(&self, id: BookId) -> Result<bool, StorageError> {
        let exists: i64 = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM books WHERE id = ?1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists != 0)
    }
}
