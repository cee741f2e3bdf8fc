//! User endpoints (read-only)

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{
    error::{AppResult, ErrorResponse},
    models::User,
};

use super::ApiResponse;

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "All users", body = [User])
    )
)]
pub async fn list_users(State(state): State<crate::AppState>) -> Json<ApiResponse<Vec<User>>> {
    Json(ApiResponse::ok(state.services.users.list_users()))
}

/// Get user details by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(
        ("id" = String, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User details", body = User),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<User>>> {
    let user = state.services.users.get_user(&id)?;
    Ok(Json(ApiResponse::ok(user)))
}
