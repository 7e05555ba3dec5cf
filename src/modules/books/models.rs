use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Storage-assigned identifier of a book
pub type BookId = i64;

/// Catalog record persisted in the `books` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Unique identifier for the book
    pub id: BookId,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// Price of the book
    pub price: f64,
    /// Publication date, serialized as `yyyy-MM-dd`
    pub published_date: NaiveDate,
    /// Free-text genre (Fiction, Science, ...)
    pub genre: String,
}

/// Mutable fields of a book, accepted by create and update.
///
/// An `id` in the incoming JSON is ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub title: String,
    pub author: String,
    pub price: f64,
    pub published_date: NaiveDate,
    pub genre: String,
}

impl Book {
    pub fn from_details(id: BookId, details: BookDetails) -> Self {
        Self {
            id,
            title: details.title,
            author: details.author,
            price: details.price,
            published_date: details.published_date,
            genre: details.genre,
        }
    }

    /// Overwrite every mutable field; the id is left untouched.
    pub fn overwrite_with(&mut self, details: BookDetails) {
        self.title = details.title;
        self.author = details.author;
        self.price = details.price;
        self.published_date = details.published_date;
        self.genre = details.genre;
    }

    pub fn details(&self) -> BookDetails {
        BookDetails {
            title: self.title.clone(),
            author: self.author.clone(),
            price: self.price,
            published_date: self.published_date,
            genre: self.genre.clone(),
        }
    }
}
