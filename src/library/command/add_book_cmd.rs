use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::library::domain::BookService;

pub(crate) struct AddBookCommand {
    book_service: Box<dyn BookService>,
}

impl AddBookCommand {
    pub(crate) fn new(book_service: Box<dyn BookService>) -> Self {
        Self {
            book_service,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AddBookCommandRequest {
    pub(crate) isbn: String,
    pub(crate) title: String,
    pub(crate) author: String,
    pub(crate) short_description: String,
    pub(crate) page_count: i32,
    pub(crate) release_date: NaiveDate,
}

impl AddBookCommandRequest {
    pub fn new(book: &BookDto) -> Self {
        Self {
            isbn: book.isbn.to_string(),
            title: book.title.to_string(),
            author: book.author.to_string(),
            short_description: book.short_description.to_string(),
            page_count: book.page_count,
            release_date: book.release_date,
        }
    }

    pub fn build_book(&self) -> BookDto {
        BookDto::new(self.isbn.as_str(), self.title.as_str(), self.author.as_str(),
                     self.short_description.as_str(), self.page_count, self.release_date)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.book_service.add_book(&book).await.map_err(CommandError::from).map(AddBookCommandResponse::new)
    }
}
