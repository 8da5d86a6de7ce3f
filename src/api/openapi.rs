//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, books, health, loans, logs};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lectern API",
        version = "0.3.0",
        description = "Library Management System REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::register,
        auth::login,
        auth::me,
        auth::create_admin,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::update_book,
        books::delete_book,
        // Loans
        loans::borrow_book,
        loans::return_loan,
        loans::get_user_loans,
        // Logs
        logs::list_logs,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::IdentityInfo,
            crate::models::user::User,
            crate::models::user::AdminUser,
            crate::models::user::RegisterUser,
            crate::models::user::RegisterAdmin,
            crate::models::user::Role,
            // Books
            crate::models::book::Book,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::BookQuery,
            // Loans
            loans::BorrowRequest,
            loans::BorrowResponse,
            loans::ReturnResponse,
            crate::models::loan::Loan,
            crate::models::loan::LoanDetails,
            // Logs
            logs::LogQuery,
            crate::models::log::AuditLog,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication and registration"),
        (name = "books", description = "Book catalog management"),
        (name = "loans", description = "Borrow and return workflow"),
        (name = "logs", description = "Audit trail")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
