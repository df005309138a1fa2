//! User CRUD handlers
//!
//! Each handler performs exactly one repository call; request-shape
//! validation happens here, persistence logic stays in the repository.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateUserRequest, UpdateUserRequest, UserDto};
use crate::domain::{DomainError, UserRepositoryInterface};
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};

/// User handler state
#[derive(Clone)]
pub struct UserHandlerState {
    pub users: Arc<dyn UserRepositoryInterface>,
}

type ApiError<T> = (StatusCode, Json<ApiResponse<T>>);

/// Path ids must be well-formed integers; anything else is a caller error.
fn parse_user_id<T>(raw: &str) -> Result<i32, ApiError<T>> {
    raw.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format!("Invalid user id '{}'", raw))),
        )
    })
}

fn domain_error<T>(e: DomainError) -> ApiError<T> {
    let status = match &e {
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(ApiResponse::error(e.to_string())))
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Missing or malformed fields"),
        (status = 409, description = "Username already taken"),
        (status = 422, description = "Empty fields")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserDto>>), ApiError<UserDto>> {
    let user = state
        .users
        .create(request.into())
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::from(user))),
    ))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError<UserDto>> {
    let id = parse_user_id(&raw_id)?;

    match state.users.find_by_id(id).await.map_err(domain_error)? {
        Some(user) => Ok(Json(ApiResponse::success(UserDto::from(user)))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("User {} not found", id))),
        )),
    }
}

#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Username already taken")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Path(raw_id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<ApiResponse<UserDto>>, ApiError<UserDto>> {
    let id = parse_user_id(&raw_id)?;

    match state
        .users
        .update(id, request.into())
        .await
        .map_err(domain_error)?
    {
        Some(user) => Ok(Json(ApiResponse::success(UserDto::from(user)))),
        None => Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("User {} not found", id))),
        )),
    }
}

#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 400, description = "Malformed id"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(raw_id): Path<String>,
) -> Result<Json<ApiResponse<()>>, ApiError<()>> {
    let id = parse_user_id(&raw_id)?;

    let removed = state.users.delete(id).await.map_err(domain_error)?;
    if !removed {
        return Err((
            StatusCode::NOT_FOUND,
            Json(ApiResponse::error(format!("User {} not found", id))),
        ));
    }

    Ok(Json(ApiResponse::success(())))
}
