//! Catalog management service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        book::{Book, CreateBook, UpdateBook},
        log::Actor,
        user::RequestContext,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// List the catalog, optionally only books with loanable copies
    pub async fn list_books(&self, available_only: bool) -> AppResult<Vec<Book>> {
        if available_only {
            self.repository.books.list_available().await
        } else {
            self.repository.books.list().await
        }
    }

    /// Get book by ID
    pub async fn get_book(&self, id: i32) -> AppResult<Book> {
        self.repository.books.get_by_id(id).await
    }

    /// Create a new book. Precondition: admin caller, checked by the API
    /// layer.
    pub async fn create_book(&self, ctx: &RequestContext, book: CreateBook) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let created = self.repository.books.create(&book).await?;

        self.audit(
            Actor::from(ctx),
            &format!("Added book '{}' (id {})", created.title, created.id),
        )
        .await;

        Ok(created)
    }

    /// Update a book; absent fields are unchanged. Precondition: admin
    /// caller.
    pub async fn update_book(
        &self,
        ctx: &RequestContext,
        id: i32,
        book: UpdateBook,
    ) -> AppResult<Book> {
        book.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let updated = self.repository.books.update(id, &book).await?;

        self.audit(
            Actor::from(ctx),
            &format!("Updated book '{}' (id {})", updated.title, updated.id),
        )
        .await;

        Ok(updated)
    }

    /// Delete a book. Precondition: admin caller.
    ///
    /// Destructive by policy: loans referencing the book are removed by FK
    /// cascade, including loan history.
    pub async fn delete_book(&self, ctx: &RequestContext, id: i32) -> AppResult<()> {
        self.repository.books.delete(id).await?;

        self.audit(Actor::from(ctx), &format!("Deleted book id {}", id))
            .await;

        Ok(())
    }

    /// Best-effort audit append; never fails the primary operation
    async fn audit(&self, actor: Actor, action: &str) {
        if let Err(e) = self.repository.logs.append(actor, action).await {
            tracing::warn!("Failed to append audit log entry: {}", e);
        }
    }
}
