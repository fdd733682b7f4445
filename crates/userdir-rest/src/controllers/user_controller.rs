//! User management controller.

use crate::{
    extractors::{Pagination, UserIdPath, ValidatedJson},
    responses::{created, ok, ApiResult, AppError},
    state::AppState,
};
use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::debug;
use userdir_core::ErrorResponse;
use userdir_service::{Message, UserList, UserPublic, UserSchema};

/// Creates the user router. The collection answers with and without a
/// trailing slash.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Create a new user.
#[utoipa::path(
    post,
    path = "/users/",
    tag = "users",
    request_body = UserSchema,
    responses(
        (status = 201, description = "User created", body = UserPublic),
        (status = 400, description = "Username or email already exists", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<UserSchema>,
) -> Result<(StatusCode, Json<UserPublic>), AppError> {
    debug!("Create user request: {}", request.username);

    let response = state.user_service.create_user(request).await?;
    Ok(created(response))
}

/// List users.
#[utoipa::path(
    get,
    path = "/users/",
    tag = "users",
    params(
        ("skip" = Option<u64>, Query, description = "Rows to skip (default 0)"),
        ("limit" = Option<u64>, Query, description = "Maximum rows to return (default 100)")
    ),
    responses(
        (status = 200, description = "Users in creation order", body = UserList),
        (status = 422, description = "Invalid pagination parameters", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Pagination(page): Pagination,
) -> ApiResult<UserList> {
    debug!("List users request: skip={}, limit={}", page.skip, page.limit);

    let response = state.user_service.list_users(page).await?;
    ok(response)
}

/// Get a user by ID.
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User found", body = UserPublic),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> ApiResult<UserPublic> {
    debug!("Get user request: {}", id);

    let response = state.user_service.get_user(id).await?;
    ok(response)
}

/// Replace a user's username, email and password.
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    request_body = UserSchema,
    responses(
        (status = 200, description = "User updated", body = UserPublic),
        (status = 400, description = "Username or email already exists", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
    ValidatedJson(request): ValidatedJson<UserSchema>,
) -> ApiResult<UserPublic> {
    debug!("Update user request: {}", id);

    let response = state.user_service.update_user(id, request).await?;
    ok(response)
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "users",
    params(("id" = i64, Path, description = "User id")),
    responses(
        (status = 200, description = "User deleted", body = Message),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    UserIdPath(id): UserIdPath,
) -> ApiResult<Message> {
    debug!("Delete user request: {}", id);

    let response = state.user_service.delete_user(id).await?;
    ok(response)
}
