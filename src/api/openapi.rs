//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, users};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bookshelf API",
        version = "0.1.0",
        description = "Book catalog and issued-books REST API. \
                       Successful responses are wrapped as `{ success: true, data }`."
    ),
    paths(
        // Health
        health::health_check,
        // Books
        books::list_books,
        books::list_issued_books,
        books::get_book,
        books::create_book,
        books::update_book,
        // Users
        users::list_users,
        users::get_user,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::IssuedBook,
            crate::models::User,
            crate::api::DataPayload,
            health::HealthResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog"),
        (name = "users", description = "Library users (read-only)")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
