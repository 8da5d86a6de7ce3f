//! Data models for Lectern

pub mod book;
pub mod loan;
pub mod log;
pub mod user;

// Re-export commonly used types
pub use book::Book;
pub use loan::{Loan, LoanDetails};
pub use log::{Actor, AuditLog};
pub use user::{AdminUser, Identity, RequestContext, Role, User};
