//! Loan (borrow) model and related types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Loan model from database.
///
/// `due_date` is the date the book is expected back; `actual_return_date` is
/// stamped by the return operation and stays NULL while the loan is active.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Loan {
    pub id: i32,
    pub book_id: i32,
    pub user_id: i32,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub returned: bool,
}

/// Loan joined with book details for display
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LoanDetails {
    pub id: i32,
    pub book_id: i32,
    pub title: String,
    pub author: String,
    pub borrow_date: NaiveDate,
    pub due_date: NaiveDate,
    pub actual_return_date: Option<NaiveDate>,
    pub returned: bool,
    pub is_overdue: bool,
}

impl Loan {
    /// An active loan past its due date is overdue
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.returned && today > self.due_date
    }
}
