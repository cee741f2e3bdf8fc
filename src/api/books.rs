//! Book (catalog) endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::{Book, IssuedBook},
};

use super::{ApiResponse, DataBody, DataPayload};

/// List all books
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books, in catalog order", body = [Book])
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> Json<ApiResponse<Vec<Book>>> {
    let books = state.services.catalog.list_books().await;
    Json(ApiResponse::ok(books))
}

/// List issued books with the user holding each one
#[utoipa::path(
    get,
    path = "/books/issued",
    tag = "books",
    responses(
        (status = 200, description = "Issued books", body = [IssuedBook]),
        (status = 404, description = "No books have been issued", body = ErrorResponse)
    )
)]
pub async fn list_issued_books(
    State(state): State<crate::AppState>,
) -> AppResult<Json<ApiResponse<Vec<IssuedBook>>>> {
    let issued = state.services.catalog.issued_books().await?;
    Ok(Json(ApiResponse::ok(issued)))
}

/// Get a book by ID
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    responses(
        (status = 200, description = "Book details", body = Book),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Book>>> {
    let book = state.services.catalog.get_book(&id).await?;
    Ok(Json(ApiResponse::ok(book)))
}

/// Create a new book
///
/// A missing body is treated the same as a missing `data` member.
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = DataPayload,
    responses(
        (status = 201, description = "Book created, returns the whole catalog", body = [Book]),
        (status = 400, description = "No data, malformed body, invalid data or duplicate ID", body = ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    DataBody(data): DataBody,
) -> AppResult<(StatusCode, Json<ApiResponse<Vec<Book>>>)> {
    let books = state.services.catalog.create_book(data).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(books))))
}

/// Update an existing book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(
        ("id" = String, Path, description = "Book ID")
    ),
    request_body = DataPayload,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Malformed body, invalid data or ID already taken", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
    DataBody(data): DataBody,
) -> AppResult<Json<ApiResponse<Book>>> {
    let updated = state.services.catalog.update_book(&id, data).await?;
    Ok(Json(ApiResponse::ok(updated)))
}
