//! API handlers for Bookshelf REST endpoints

pub mod books;
pub mod health;
pub mod openapi;
pub mod users;

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{error::AppError, AppState};

/// Uniform response envelope: `{ success: true, data }`.
/// Failures are rendered by `AppError` as `{ success: false, message }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Write request body: the record travels in a `data` member
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DataPayload {
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub data: Option<Value>,
}

/// Extractor for the `data` member of a write request.
///
/// A body that is empty or not sent as JSON carries no data. A JSON body
/// that does not parse into a `DataPayload` is rejected.
pub struct DataBody(pub Option<Value>);

#[async_trait]
impl<S> FromRequest<S> for DataBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = has_json_content_type(req.headers());

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| AppError::BadRequest(e.body_text()))?;

        if !is_json || bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(DataBody(None));
        }

        let payload: DataPayload = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::BadRequest(format!("Malformed JSON body: {}", e)))?;

        Ok(DataBody(payload.data))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence.eq_ignore_ascii_case("application/json") || essence.ends_with("+json")
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let routes = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route("/books/issued", get(books::list_issued_books))
        .route("/books/:id", get(books::get_book).put(books::update_book))
        // Users
        .route("/users", get(users::list_users))
        .route("/users/:id", get(users::get_user))
        .fallback(route_not_found)
        .with_state(state);

    // OpenAPI documentation
    let openapi = openapi::create_openapi_router();

    Router::new()
        .merge(openapi)
        .merge(routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("This route doesn't exist".to_string())
}
