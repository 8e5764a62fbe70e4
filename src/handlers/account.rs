use axum::{extract::State, Json};
use std::sync::Arc;

use crate::{
    auth::jwt::AuthUser,
    dto::{
        account::{AccountResponse, UpdateAccountRequest},
        user::MessageResponse,
    },
    errors::AppError,
    services::account_service,
    state::AppState,
};

pub async fn get_account(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<AccountResponse>, AppError> {
    let data = account_service::get_account(&state, user_id).await?;
    Ok(Json(AccountResponse { data }))
}

pub async fn update_account(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<UpdateAccountRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    account_service::update_account(&state, user_id, req).await?;
    Ok(Json(MessageResponse::new("Account updated successfully.")))
}
