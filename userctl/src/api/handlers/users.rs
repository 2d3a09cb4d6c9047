use crate::{
    AppState,
    api::models::users::{UserCreate, UserCreated, UserResponse, UserUpdate},
    db::{
        handlers::{Repository, Users},
        models::users::{UserCreateDBRequest, UserUpdateDBRequest},
    },
    errors::{Error, Result},
    types::UserId,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::BadRequest {
            message: "User name must not be empty".to_string(),
        });
    }
    Ok(())
}

fn user_not_found(id: UserId) -> Error {
    Error::NotFound {
        resource: "User".to_string(),
        id,
    }
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    tag = "users",
    summary = "Get user",
    responses(
        (status = 200, description = "User details", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("user_id" = String, Path, description = "User ID")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn get_user(State(state): State<AppState>, Path(user_id): Path<UserId>) -> Result<Json<UserResponse>> {
    let ctx = state.request_context();
    let repo = Users::new(state.db.clone());

    match repo.get_by_id(&ctx, &user_id).await? {
        Some(user) => Ok(Json(UserResponse::from(user))),
        None => Err(user_not_found(user_id)),
    }
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "users",
    summary = "Create user",
    request_body = UserCreate,
    responses(
        (status = 201, description = "User created successfully", body = UserCreated),
        (status = 400, description = "Invalid request"),
        (status = 500, description = "Internal server error")
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_user(State(state): State<AppState>, Json(create): Json<UserCreate>) -> Result<(StatusCode, Json<UserCreated>)> {
    validate_name(&create.name)?;

    let ctx = state.request_context();
    let repo = Users::new(state.db.clone());
    let id = repo.create(&ctx, &UserCreateDBRequest::new(create.name)).await?;

    Ok((StatusCode::CREATED, Json(UserCreated { id })))
}

#[utoipa::path(
    put,
    path = "/users/{user_id}",
    tag = "users",
    summary = "Update user",
    request_body = UserUpdate,
    responses(
        (status = 200, description = "User updated successfully", body = UserResponse),
        (status = 400, description = "Invalid request"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("user_id" = String, Path, description = "User ID")
    )
)]
#[tracing::instrument(skip(state, update))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<UserId>,
    Json(update): Json<UserUpdate>,
) -> Result<Json<UserResponse>> {
    validate_name(&update.name)?;

    let ctx = state.request_context();
    let repo = Users::new(state.db.clone());
    repo.update(&ctx, &user_id, &UserUpdateDBRequest::new(update.name)).await?;

    // The update itself does not report whether a row matched
    match repo.get_by_id(&ctx, &user_id).await? {
        Some(user) => Ok(Json(UserResponse::from(user))),
        None => Err(user_not_found(user_id)),
    }
}

#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    tag = "users",
    summary = "Delete user",
    responses(
        (status = 204, description = "User deleted successfully"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Internal server error")
    ),
    params(
        ("user_id" = String, Path, description = "User ID")
    )
)]
#[tracing::instrument(skip(state))]
pub async fn delete_user(State(state): State<AppState>, Path(user_id): Path<UserId>) -> Result<StatusCode> {
    let ctx = state.request_context();
    let repo = Users::new(state.db.clone());

    if repo.get_by_id(&ctx, &user_id).await?.is_none() {
        return Err(user_not_found(user_id));
    }
    repo.delete(&ctx, &user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
