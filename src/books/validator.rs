use lazy_static::lazy_static;
use regex::Regex;

use crate::books::dto::BookDto;
use crate::core::controller::ValidationFailure;

pub(crate) const INVALID_ISBN_MESSAGE: &str = "Value was not a valid ISBN-13";
pub(crate) const EMPTY_TITLE_MESSAGE: &str = "'Title' must not be empty.";

lazy_static! {
    // ddd-dddddddddd; a key format, not a real ISBN-13 checksum
    static ref ISBN_PATTERN: Regex = Regex::new(r"^\d{3}-\d{10}$").expect("valid isbn pattern");
}

// Field-shape rules checked before any persistence attempt. All failures are
// reported together, matching the `{propertyName, errorMessage}` error body.
pub fn validate_book(book: &BookDto) -> Result<(), Vec<ValidationFailure>> {
    let mut failures = vec![];
    if !ISBN_PATTERN.is_match(book.isbn.as_str()) {
        failures.push(ValidationFailure::new("Isbn", INVALID_ISBN_MESSAGE));
    }
    if book.title.is_empty() {
        failures.push(ValidationFailure::new("Title", EMPTY_TITLE_MESSAGE));
    }
    if failures.is_empty() {
        Ok(())
    } else {
        Err(failures)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::books::dto::BookDto;
    use crate::books::validator::{validate_book, EMPTY_TITLE_MESSAGE, INVALID_ISBN_MESSAGE};

    fn book_with(isbn: &str, title: &str) -> BookDto {
        BookDto::new(isbn, title, "test author", "a short description", 420,
                     NaiveDate::from_ymd_opt(2010, 1, 1).expect("valid date"))
    }

    #[tokio::test]
    async fn test_should_accept_valid_book() {
        assert!(validate_book(&book_with("123-4567890123", "test book")).is_ok());
    }

    #[tokio::test]
    async fn test_should_reject_invalid_isbn() {
        for isbn in ["INVALID", "1234567890123", "12-4567890123", "123-456789012",
                     "123-45678901234", "abc-defghijklmn", ""] {
            let failures = validate_book(&book_with(isbn, "test book"))
                .expect_err("should reject isbn");
            assert_eq!(1, failures.len());
            assert_eq!("Isbn", failures[0].property_name.as_str());
            assert_eq!(INVALID_ISBN_MESSAGE, failures[0].error_message.as_str());
        }
    }

    #[tokio::test]
    async fn test_should_reject_empty_title() {
        let failures = validate_book(&book_with("123-4567890123", ""))
            .expect_err("should reject title");
        assert_eq!(1, failures.len());
        assert_eq!("Title", failures[0].property_name.as_str());
        assert_eq!(EMPTY_TITLE_MESSAGE, failures[0].error_message.as_str());
    }

    #[tokio::test]
    async fn test_should_report_all_failures_together() {
        let failures = validate_book(&book_with("INVALID", ""))
            .expect_err("should reject both fields");
        assert_eq!(2, failures.len());
    }
}
