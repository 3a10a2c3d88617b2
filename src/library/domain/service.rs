use async_trait::async_trait;

use crate::books::domain::model::BookEntity;
use crate::books::dto::BookDto;
use crate::books::repository::ddb_book_repository::DUPLICATE_ISBN_MESSAGE;
use crate::books::repository::BookRepository;
use crate::core::domain::Configuration;
use crate::core::library::{LibraryError, LibraryResult};
use crate::library::domain::BookService;

const SCAN_PAGE_SIZE: usize = 100;

pub(crate) struct BookServiceImpl {
    book_repository: Box<dyn BookRepository>,
}

impl BookServiceImpl {
    pub(crate) fn new(_config: &Configuration, book_repository: Box<dyn BookRepository>) -> Self {
        Self {
            book_repository,
        }
    }
}

#[async_trait]
impl BookService for BookServiceImpl {
    // The existence check only produces the friendly duplicate outcome; the
    // repository's conditional insert is what actually enforces uniqueness
    // when two creates race.
    async fn add_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        match self.book_repository.get(book.isbn.as_str()).await {
            Ok(_existing) => Err(LibraryError::duplicate_key(DUPLICATE_ISBN_MESSAGE)),
            Err(LibraryError::NotFound { .. }) => {
                self.book_repository.create(&BookEntity::from(book)).await?;
                Ok(book.clone())
            }
            Err(other) => Err(other),
        }
    }

    async fn update_book(&self, book: &BookDto) -> LibraryResult<BookDto> {
        self.book_repository.update(&BookEntity::from(book)).await?;
        Ok(book.clone())
    }

    async fn remove_book(&self, isbn: &str) -> LibraryResult<()> {
        self.book_repository.delete(isbn).await.map(|_| ())
    }

    async fn find_book_by_isbn(&self, isbn: &str) -> LibraryResult<BookDto> {
        self.book_repository.get(isbn).await.map(|b| BookDto::from(&b))
    }

    async fn find_all_books(&self, search_term: Option<&str>) -> LibraryResult<Vec<BookDto>> {
        let mut books = vec![];
        let mut page: Option<String> = None;
        loop {
            let res = self.book_repository.find_all(page.as_deref(), SCAN_PAGE_SIZE).await?;
            books.extend(res.records.iter().map(BookDto::from));
            match res.next_page {
                Some(next) => page = Some(next),
                None => break,
            }
        }
        if let Some(term) = search_term {
            // case-insensitive substring match; an empty term matches everything
            let needle = term.to_lowercase();
            books.retain(|book| book.title.to_lowercase().contains(needle.as_str()));
        }
        // scan order is not deterministic, so order by key for a stable listing
        books.sort_by(|a, b| a.isbn.cmp(&b.isbn));
        Ok(books)
    }
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            short_description: other.short_description.to_string(),
            page_count: other.page_count,
            release_date: other.release_date,
        }
    }
}

impl From<&BookDto> for BookEntity {
    fn from(other: &BookDto) -> Self {
        Self {
            isbn: other.isbn.to_string(),
            title: other.title.to_string(),
            author: other.author.to_string(),
            short_description: other.short_description.to_string(),
            page_count: other.page_count,
            release_date: other.release_date,
        }
    }
}
