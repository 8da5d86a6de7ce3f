//! Loans repository for database operations
//!
//! The borrow and return paths are the only writers of `books.availability`
//! besides admin edits. Both run as a conditional update plus its companion
//! statement inside one transaction, so two concurrent borrowers of a book
//! with a single copy cannot both succeed and a failed commit leaves the
//! availability accounting untouched.

use chrono::NaiveDate;
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::loan::{Loan, LoanDetails},
};

#[derive(Clone)]
pub struct LoansRepository {
    pool: Pool<Postgres>,
}

impl LoansRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get loan by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Loan> {
        sqlx::query_as::<_, Loan>("SELECT * FROM book_loans WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Loan with id {} not found", id)))
    }

    /// Borrow a book: decrement availability and record the loan atomically.
    ///
    /// The decrement is guarded by `availability > 0`, so the affected-row
    /// count decides the outcome; no copy is ever handed out twice.
    pub async fn borrow(
        &self,
        book_id: i32,
        user_id: i32,
        today: NaiveDate,
        due_date: NaiveDate,
    ) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let decremented = sqlx::query(
            "UPDATE books SET availability = availability - 1 WHERE id = $1 AND availability > 0",
        )
        .bind(book_id)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM books WHERE id = $1)")
                    .bind(book_id)
                    .fetch_one(&mut *tx)
                    .await?;

            return Err(if exists {
                AppError::Unavailable(format!("No copies of book {} are available", book_id))
            } else {
                AppError::NotFound(format!("Book with id {} not found", book_id))
            });
        }

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            INSERT INTO book_loans (book_id, user_id, borrow_date, due_date, returned)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING *
            "#,
        )
        .bind(book_id)
        .bind(user_id)
        .bind(today)
        .bind(due_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(loan)
    }

    /// Return a loan: mark it returned and restore availability atomically.
    pub async fn return_loan(&self, loan_id: i32, today: NaiveDate) -> AppResult<Loan> {
        let mut tx = self.pool.begin().await?;

        let loan = sqlx::query_as::<_, Loan>(
            r#"
            UPDATE book_loans
            SET returned = TRUE, actual_return_date = $2
            WHERE id = $1 AND NOT returned
            RETURNING *
            "#,
        )
        .bind(loan_id)
        .bind(today)
        .fetch_optional(&mut *tx)
        .await?;

        let loan = match loan {
            Some(loan) => loan,
            None => {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM book_loans WHERE id = $1)")
                        .bind(loan_id)
                        .fetch_one(&mut *tx)
                        .await?;

                return Err(if exists {
                    AppError::AlreadyReturned(format!("Loan {} was already returned", loan_id))
                } else {
                    AppError::NotFound(format!("Loan with id {} not found", loan_id))
                });
            }
        };

        sqlx::query("UPDATE books SET availability = availability + 1 WHERE id = $1")
            .bind(loan.book_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(loan)
    }

    /// Get loans for a user, joined with book details
    pub async fn get_user_loans(&self, user_id: i32, today: NaiveDate) -> AppResult<Vec<LoanDetails>> {
        let loans = sqlx::query_as::<_, LoanRow>(
            r#"
            SELECT l.id, l.book_id, b.title, b.author,
                   l.borrow_date, l.due_date, l.actual_return_date, l.returned
            FROM book_loans l
            JOIN books b ON l.book_id = b.id
            WHERE l.user_id = $1
            ORDER BY l.borrow_date DESC, l.id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(loans
            .into_iter()
            .map(|row| LoanDetails {
                is_overdue: !row.returned && today > row.due_date,
                id: row.id,
                book_id: row.book_id,
                title: row.title,
                author: row.author,
                borrow_date: row.borrow_date,
                due_date: row.due_date,
                actual_return_date: row.actual_return_date,
                returned: row.returned,
            })
            .collect())
    }

}

/// Internal row for the user-loans join
#[derive(sqlx::FromRow)]
struct LoanRow {
    id: i32,
    book_id: i32,
    title: String,
    author: String,
    borrow_date: NaiveDate,
    due_date: NaiveDate,
    actual_return_date: Option<NaiveDate>,
    returned: bool,
}
