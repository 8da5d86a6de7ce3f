//! Lectern Library Management System
//!
//! A small server-side library application: book catalog browsing and CRUD,
//! member and administrator accounts, and the borrow/return workflow with
//! availability accounting.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
