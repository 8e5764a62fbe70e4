use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;

use crate::{
    handlers::{account as account_handlers, user as user_handlers},
    state::AppState,
};

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .route("/register", post(user_handlers::register))
        .route("/login", post(user_handlers::login))
        .route("/logout", post(user_handlers::logout))
        .route("/users/refreshToken", post(user_handlers::refresh_token))
        .route(
            "/users/updatePassword",
            patch(user_handlers::update_password),
        )
        .route(
            "/users/updateUsername",
            patch(user_handlers::update_username),
        )
        .route("/users/deleteUser", delete(user_handlers::delete_user))
        .route("/account", get(account_handlers::get_account))
        .route("/account/update", patch(account_handlers::update_account));

    Router::new().nest("/api", api).with_state(state)
}
