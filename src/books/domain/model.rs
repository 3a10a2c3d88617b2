use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// BookEntity is the persisted shape of a book. The isbn is the primary key;
// there is no surrogate identifier.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct BookEntity {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub short_description: String,
    pub page_count: i32,
    pub release_date: NaiveDate,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, author: &str, short_description: &str,
               page_count: i32, release_date: NaiveDate) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            short_description: short_description.to_string(),
            page_count,
            release_date,
        }
    }
}
