use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// BookDto is the wire shape of a book, serialized camelCase:
// {"isbn": ..., "title": ..., "author": ..., "shortDescription": ...,
//  "pageCount": ..., "releaseDate": "YYYY-MM-DD"}
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDto {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub short_description: String,
    pub page_count: i32,
    pub release_date: NaiveDate,
}

impl BookDto {
    pub fn new(isbn: &str, title: &str, author: &str, short_description: &str,
               page_count: i32, release_date: NaiveDate) -> BookDto {
        BookDto {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            short_description: short_description.to_string(),
            page_count,
            release_date,
        }
    }
}
