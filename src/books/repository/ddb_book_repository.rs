use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;

use crate::books::domain::model::BookEntity;
use crate::books::repository::BookRepository;
use crate::core::library::{LibraryError, LibraryResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::utils::ddb::{from_ddb, parse_date_attribute, parse_item, parse_number_attribute, parse_string_attribute, to_ddb_page};

pub(crate) const DUPLICATE_ISBN_MESSAGE: &str = "A book with this ISBN already exists";

#[derive(Debug)]
pub struct DDBBookRepository {
    client: Client,
    table_name: String,
}

impl DDBBookRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl Repository<BookEntity> for DDBBookRepository {
    // The conditional expression is the authoritative uniqueness constraint on
    // the key; a raced create loses here and surfaces the same duplicate
    // outcome as the service-level existence check.
    async fn create(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(isbn)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(|err| {
            if put_condition_failed(&err) {
                LibraryError::duplicate_key(DUPLICATE_ISBN_MESSAGE)
            } else {
                LibraryError::from(err)
            }
        })
    }

    // Full-row overwrite; the existence condition on the key is the canonical
    // "not found" check, never an insert.
    async fn update(&self, entity: &BookEntity) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_exists(isbn)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(|err| {
            if put_condition_failed(&err) {
                LibraryError::not_found(format!("book not found for {}", entity.isbn).as_str())
            } else {
                LibraryError::from(err)
            }
        })
    }

    async fn get(&self, id: &str) -> LibraryResult<BookEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .get_item()
            .table_name(table_name)
            .consistent_read(true)
            .key("isbn", AttributeValue::S(id.to_string()))
            .send()
            .await.map_err(LibraryError::from).and_then(|out| {
            if let Some(map) = out.item {
                Ok(map_to_book(&map))
            } else {
                Err(LibraryError::not_found(format!("book not found for {}", id).as_str()))
            }
        })
    }

    // Shares the update operation's canonical existence condition so that a
    // repeated delete reports not-found rather than silently succeeding.
    async fn delete(&self, id: &str) -> LibraryResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .delete_item()
            .table_name(table_name)
            .key("isbn", AttributeValue::S(id.to_string()))
            .condition_expression("attribute_exists(isbn)")
            .send()
            .await.map(|_| 1).map_err(|err| {
            if delete_condition_failed(&err) {
                LibraryError::not_found(format!("book not found for {}", id).as_str())
            } else {
                LibraryError::from(err)
            }
        })
    }
}

#[async_trait]
impl BookRepository for DDBBookRepository {
    async fn find_all(&self, page: Option<&str>,
                      page_size: usize) -> LibraryResult<PaginatedResult<BookEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let exclusive_start_key = to_ddb_page(page, &HashMap::new());
        self.client
            .scan()
            .table_name(table_name)
            .consistent_read(false)
            .set_exclusive_start_key(exclusive_start_key)
            .limit(cmp::min(page_size, 500) as i32)
            .send()
            .await.map_err(LibraryError::from).map(|req| {
            let def_items = vec![];
            let items = req.items.as_ref().unwrap_or(&def_items);
            let records = items.iter().map(map_to_book).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

fn put_condition_failed(err: &SdkError<PutItemError>) -> bool {
    matches!(err, SdkError::ServiceError(ctx) if ctx.err().is_conditional_check_failed_exception())
}

fn delete_condition_failed(err: &SdkError<DeleteItemError>) -> bool {
    matches!(err, SdkError::ServiceError(ctx) if ctx.err().is_conditional_check_failed_exception())
}

fn map_to_book(map: &HashMap<String, AttributeValue>) -> BookEntity {
    BookEntity {
        isbn: parse_string_attribute("isbn", map).unwrap_or_default(),
        title: parse_string_attribute("title", map).unwrap_or_default(),
        author: parse_string_attribute("author", map).unwrap_or_default(),
        short_description: parse_string_attribute("short_description", map).unwrap_or_default(),
        page_count: parse_number_attribute("page_count", map),
        release_date: parse_date_attribute("release_date", map).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use chrono::NaiveDate;
    use lazy_static::lazy_static;
    use rand::Rng;

    use crate::books::domain::model::BookEntity;
    use crate::books::repository::ddb_book_repository::DDBBookRepository;
    use crate::books::repository::BookRepository;
    use crate::core::library::LibraryError;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "books").await;
                let _ = create_table(&client, "books", "isbn").await;
                client
            });
    }

    fn test_book(isbn: &str, title: &str) -> BookEntity {
        BookEntity::new(isbn, title, "test author", "a short description", 420,
                        NaiveDate::from_ymd_opt(2010, 1, 1).expect("valid date"))
    }

    fn random_isbn() -> String {
        let mut rng = rand::thread_rng();
        format!("{}-{}", rng.gen_range(100..999), rng.gen_range(1_000_000_000i64..2_100_999_999))
    }

    #[tokio::test]
    async fn test_should_create_get_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books");
        let book = test_book(random_isbn().as_str(), "test book");
        let size = books_repo.create(&book).await.expect("should create book");
        assert_eq!(1, size);

        let loaded = books_repo.get(book.isbn.as_str()).await.expect("should return book");
        assert_eq!(book, loaded);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_isbn() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books");
        let book = test_book(random_isbn().as_str(), "test book");
        let _ = books_repo.create(&book).await.expect("should create book");

        let duplicate = books_repo.create(&book).await;
        assert!(matches!(duplicate, Err(LibraryError::DuplicateKey { message: _ })));
    }

    #[tokio::test]
    async fn test_should_create_update_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books");
        let mut book = test_book(random_isbn().as_str(), "test book");
        let size = books_repo.create(&book).await.expect("should create book");
        assert_eq!(1, size);

        book.title = "new title".to_string();
        book.page_count = 999;
        let size = books_repo.update(&book).await.expect("should update book");
        assert_eq!(1, size);

        let loaded = books_repo.get(book.isbn.as_str()).await.expect("should return book");
        assert_eq!("new title", loaded.title.as_str());
        assert_eq!(999, loaded.page_count);
    }

    #[tokio::test]
    async fn test_should_not_update_missing_book() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books");
        let book = test_book(random_isbn().as_str(), "never created");

        let updated = books_repo.update(&book).await;
        assert!(matches!(updated, Err(LibraryError::NotFound { message: _ })));
        // the guarded overwrite must not have inserted
        assert!(books_repo.get(book.isbn.as_str()).await.is_err());
    }

    #[tokio::test]
    async fn test_should_create_scan_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books");
        for i in 0..5 {
            let book = test_book(random_isbn().as_str(), format!("scan book {}", i).as_str());
            let _ = books_repo.create(&book).await.expect("should create book");
        }

        let mut total = 0;
        let mut next_page = None;
        loop {
            let res = books_repo.find_all(next_page.as_deref(), 2).await.expect("should return books");
            total += res.records.len();
            next_page = res.next_page;
            if next_page.is_none() {
                break;
            }
        }
        assert!(total >= 5);
    }

    #[tokio::test]
    async fn test_should_create_delete_books() {
        let books_repo = DDBBookRepository::new(CLIENT.get().await.clone(), "books");
        let book = test_book(random_isbn().as_str(), "test book");
        let size = books_repo.create(&book).await.expect("should create book");
        assert_eq!(1, size);

        let deleted = books_repo.delete(book.isbn.as_str()).await.expect("should delete book");
        assert_eq!(1, deleted);

        let loaded = books_repo.get(book.isbn.as_str()).await;
        assert!(matches!(loaded, Err(LibraryError::NotFound { message: _ })));

        let repeated = books_repo.delete(book.isbn.as_str()).await;
        assert!(matches!(repeated, Err(LibraryError::NotFound { message: _ })));
    }
}
