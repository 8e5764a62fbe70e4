use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::{
    auth::jwt::AuthUser,
    dto::user::{
        DeleteUserRequest, LoginRequest, LoginResponse, MessageResponse, RefreshRequest,
        RefreshResponse, RegisterRequest, UpdatePasswordRequest, UpdateUsernameRequest,
    },
    errors::AppError,
    services::user_service,
    state::AppState,
};

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    user_service::register(&state, req).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User was created successfully!")),
    ))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let resp = user_service::login(&state, req).await?;
    Ok(Json(resp))
}

pub async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, AppError> {
    let resp = user_service::refresh(&state, req).await?;
    Ok(Json(resp))
}

pub async fn logout(AuthUser(user_id): AuthUser) -> Json<MessageResponse> {
    user_service::logout(user_id);
    Json(MessageResponse::new("Logout successful!"))
}

pub async fn update_password(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<UpdatePasswordRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    user_service::update_password(&state, user_id, req).await?;
    Ok(Json(MessageResponse::new("Password updated successfully.")))
}

pub async fn update_username(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<UpdateUsernameRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    user_service::update_username(&state, user_id, req).await?;
    Ok(Json(MessageResponse::new("Username updated successfully.")))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<DeleteUserRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    user_service::delete_user(&state, user_id, req).await?;
    Ok(Json(MessageResponse::new("Account deleted successfully.")))
}
