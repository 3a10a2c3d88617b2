use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::library::domain::BookService;

pub(crate) struct FindBooksCommand {
    book_service: Box<dyn BookService>,
}

impl FindBooksCommand {
    pub(crate) fn new(book_service: Box<dyn BookService>) -> Self {
        Self {
            book_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct FindBooksCommandRequest {
    pub(crate) search_term: Option<String>,
}

impl FindBooksCommandRequest {
    pub fn new(search_term: Option<String>) -> Self {
        Self {
            search_term,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FindBooksCommandResponse {
    pub books: Vec<BookDto>,
}

impl FindBooksCommandResponse {
    pub fn new(books: Vec<BookDto>) -> Self {
        Self {
            books,
        }
    }
}

#[async_trait]
impl Command<FindBooksCommandRequest, FindBooksCommandResponse> for FindBooksCommand {
    async fn execute(&self, req: FindBooksCommandRequest) -> Result<FindBooksCommandResponse, CommandError> {
        self.book_service.find_all_books(req.search_term.as_deref())
            .await.map_err(CommandError::from).map(FindBooksCommandResponse::new)
    }
}
