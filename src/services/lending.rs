//! Lending service: the borrow/return lifecycle and availability accounting
//!
//! Every change to a book's availability outside admin catalog edits goes
//! through this service. The invariant it protects: availability never goes
//! negative, and a loan row exists if and only if the matching decrement
//! committed.

use chrono::{Duration, NaiveDate};

use crate::{
    config::LendingConfig,
    error::AppResult,
    models::{
        loan::{Loan, LoanDetails},
        log::Actor,
        user::RequestContext,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct LendingService {
    repository: Repository,
    config: LendingConfig,
}

impl LendingService {
    pub fn new(repository: Repository, config: LendingConfig) -> Self {
        Self { repository, config }
    }

    /// Due date for a loan taken out today
    pub fn due_date(today: NaiveDate, period_days: u16) -> NaiveDate {
        today + Duration::days(period_days as i64)
    }

    /// Borrow a book for the calling member. Precondition: member caller,
    /// checked by the API layer.
    ///
    /// Fails with `NotFound` if the book id does not resolve, `Unavailable`
    /// if no copies remain; neither failure changes any state.
    pub async fn borrow_book(
        &self,
        ctx: &RequestContext,
        book_id: i32,
        today: NaiveDate,
    ) -> AppResult<Loan> {
        let due_date = Self::due_date(today, self.config.loan_period_days);

        let loan = self
            .repository
            .loans
            .borrow(book_id, ctx.identity_id, today, due_date)
            .await?;

        self.audit(
            Actor::from(ctx),
            &format!("Borrowed book id {} (loan {}, due {})", book_id, loan.id, loan.due_date),
        )
        .await;

        Ok(loan)
    }

    /// Return a loan. A member may only return their own loans; admins may
    /// return any.
    ///
    /// Fails with `NotFound` for an unknown loan and `AlreadyReturned` for a
    /// completed one; availability is untouched in both cases.
    pub async fn return_book(
        &self,
        ctx: &RequestContext,
        loan_id: i32,
        today: NaiveDate,
    ) -> AppResult<Loan> {
        // Ownership needs the loan row, so the check lives here rather than
        // in the API layer.
        let existing = self.repository.loans.get_by_id(loan_id).await?;
        ctx.require_self_or_admin(existing.user_id)?;

        let loan = self.repository.loans.return_loan(loan_id, today).await?;

        self.audit(
            Actor::from(ctx),
            &format!("Returned loan {} for book id {}", loan.id, loan.book_id),
        )
        .await;

        Ok(loan)
    }

    /// List a user's loans with book details and overdue flags.
    /// Precondition: caller is the user or an admin, checked by the API
    /// layer.
    pub async fn loans_for_user(&self, user_id: i32, today: NaiveDate) -> AppResult<Vec<LoanDetails>> {
        // Surface NotFound for unknown users rather than an empty list
        self.repository.users.get_by_id(user_id).await?;
        self.repository.loans.get_user_loans(user_id, today).await
    }

    /// Best-effort audit append; never fails the primary operation
    async fn audit(&self, actor: Actor, action: &str) {
        if let Err(e) = self.repository.logs.append(actor, action).await {
            tracing::warn!("Failed to append audit log entry: {}", e);
        }
    }
}
