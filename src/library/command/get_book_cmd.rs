use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::library::domain::BookService;

pub(crate) struct GetBookCommand {
    book_service: Box<dyn BookService>,
}

impl GetBookCommand {
    pub(crate) fn new(book_service: Box<dyn BookService>) -> Self {
        Self {
            book_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct GetBookCommandRequest {
    pub(crate) isbn: String,
}

impl GetBookCommandRequest {
    pub fn new(isbn: String) -> Self {
        Self {
            isbn,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct GetBookCommandResponse {
    pub book: BookDto,
}

impl GetBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<GetBookCommandRequest, GetBookCommandResponse> for GetBookCommand {
    async fn execute(&self, req: GetBookCommandRequest) -> Result<GetBookCommandResponse, CommandError> {
        self.book_service.find_book_by_isbn(req.isbn.as_str())
            .await.map_err(CommandError::from).map(GetBookCommandResponse::new)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use chrono::NaiveDate;
    use lazy_static::lazy_static;
    use rand::Rng;

    use crate::books::dto::BookDto;
    use crate::core::command::{Command, CommandError};
    use crate::core::domain::Configuration;
    use crate::core::repository::RepositoryStore;
    use crate::library::command::add_book_cmd::{AddBookCommand, AddBookCommandRequest};
    use crate::library::command::get_book_cmd::{GetBookCommand, GetBookCommandRequest};
    use crate::library::factory;

    lazy_static! {
        static ref ADD_CMD: AsyncOnce<AddBookCommand> = AsyncOnce::new(async {
                let svc = factory::create_book_service(&Configuration::new("test"), RepositoryStore::LocalDynamoDB).await;
                AddBookCommand::new(svc)
            });
        static ref GET_CMD: AsyncOnce<GetBookCommand> = AsyncOnce::new(async {
                let svc = factory::create_book_service(&Configuration::new("test"), RepositoryStore::LocalDynamoDB).await;
                GetBookCommand::new(svc)
            });
    }

    #[tokio::test]
    async fn test_should_run_get_book() {
        let add_cmd = ADD_CMD.get().await;
        let get_cmd = GET_CMD.get().await;

        let mut rng = rand::thread_rng();
        let isbn = format!("{}-{}", rng.gen_range(100..999), rng.gen_range(1_000_000_000i64..2_100_999_999));
        let book = BookDto::new(isbn.as_str(), "test book", "test author", "a short description",
                                420, NaiveDate::from_ymd_opt(2010, 1, 1).expect("valid date"));
        let res = add_cmd.execute(AddBookCommandRequest::new(&book)).await.expect("should add book");
        let loaded = get_cmd.execute(GetBookCommandRequest::new(res.book.isbn.to_string()))
            .await.expect("should get book");
        assert_eq!(book, loaded.book);
    }

    #[tokio::test]
    async fn test_should_report_missing_book() {
        let get_cmd = GET_CMD.get().await;
        let res = get_cmd.execute(GetBookCommandRequest::new("999-9999999999".to_string())).await;
        assert!(matches!(res, Err(CommandError::NotFound { message: _ })));
    }
}
