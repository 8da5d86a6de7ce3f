//! Book catalog model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Book model from database.
///
/// `availability` counts the remaining loanable copies and is never negative.
/// Total copies are not tracked separately; availability at creation time is
/// the implicit total.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i16>,
    pub availability: i32,
}

/// Create book request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBook {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Author is required"))]
    pub author: String,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i16>,
    /// Copies acquired; defaults to one
    #[validate(range(min = 0, message = "Availability cannot be negative"))]
    pub availability: Option<i32>,
}

/// Update book request; absent fields are left unchanged
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBook {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Author cannot be empty"))]
    pub author: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub year: Option<i16>,
    #[validate(range(min = 0, message = "Availability cannot be negative"))]
    pub availability: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_title_fails_validation() {
        let book = CreateBook {
            title: "".to_string(),
            author: "Smith".to_string(),
            genre: None,
            publisher: None,
            year: None,
            availability: None,
        };
        assert!(book.validate().is_err());
    }

    #[test]
    fn empty_author_fails_validation() {
        let book = CreateBook {
            title: "Dune".to_string(),
            author: "".to_string(),
            genre: None,
            publisher: None,
            year: None,
            availability: None,
        };
        assert!(book.validate().is_err());
    }

    #[test]
    fn negative_availability_fails_validation() {
        let book = CreateBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            genre: Some("Science Fiction".to_string()),
            publisher: None,
            year: Some(1965),
            availability: Some(-1),
        };
        assert!(book.validate().is_err());
    }

    #[test]
    fn complete_book_passes_validation() {
        let book = CreateBook {
            title: "Dune".to_string(),
            author: "Herbert".to_string(),
            genre: Some("Science Fiction".to_string()),
            publisher: Some("Chilton Books".to_string()),
            year: Some(1965),
            availability: Some(3),
        };
        assert!(book.validate().is_ok());
    }

    #[test]
    fn partial_update_validates_present_fields_only() {
        let patch = UpdateBook {
            title: None,
            author: None,
            genre: Some("Fantasy".to_string()),
            publisher: None,
            year: None,
            availability: None,
        };
        assert!(patch.validate().is_ok());

        let bad_patch = UpdateBook {
            title: Some("".to_string()),
            author: None,
            genre: None,
            publisher: None,
            year: None,
            availability: None,
        };
        assert!(bad_patch.validate().is_err());
    }
}
