//! Session lifecycle: registration, credential login, refresh-token
//! exchange, logout and the guarded account mutations.

use mongodb::bson::{doc, oid::ObjectId, DateTime as BsonDateTime};
use tracing::warn;

use crate::{
    auth::tokens::{issue_tokens_and_store_refresh, sha256_hex, sign_access_token},
    dto::user::{
        DeleteUserRequest, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
        RegisterRequest, UpdatePasswordRequest, UpdateUsernameRequest,
    },
    errors::AppError,
    models::{account::AccountDoc, user::UserDoc},
    password::{hash_password, verify_password},
    state::AppState,
    validation::{validate_email, validate_password, validate_username},
};

pub async fn register(state: &AppState, req: RegisterRequest) -> Result<(), AppError> {
    if state
        .users
        .find_one(doc! { "username": &req.username })
        .await?
        .is_some()
    {
        warn!(username = %req.username, "registration rejected: username already in use");
        return Err(AppError::Conflict("Failed! Username is already in use!".into()));
    }

    validate_username(&req.username)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".into()));
    }
    if req.password != req.repeat_password {
        warn!("registration rejected: password confirmation mismatch");
        return Err(AppError::Validation(
            "Password and password confirmation do not match".into(),
        ));
    }

    let password_hash = hash_password(&req.password)?;

    let user = UserDoc {
        id: ObjectId::new(),
        username: req.username,
        password_hash,
        created_at: BsonDateTime::now(),
    };
    state.users.insert_one(&user).await?;

    let account = AccountDoc {
        id: ObjectId::new(),
        user_id: user.id,
        name: req.name.trim().to_string(),
        email: req.email,
        address: None,
        phone: None,
        birthdate: None,
        gender: None,
        bio: None,
        created_at: BsonDateTime::now(),
    };
    state.accounts.insert_one(&account).await?;

    Ok(())
}

pub async fn login(state: &AppState, req: LoginRequest) -> Result<LoginResponse, AppError> {
    if req.username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if req.password.is_empty() {
        return Err(AppError::Validation("Password is required".into()));
    }

    let user = state
        .users
        .find_one(doc! { "username": &req.username })
        .await?
        .ok_or_else(|| {
            warn!(username = %req.username, "login failed: username not registered");
            AppError::UserNotFound
        })?;

    if !verify_password(&req.password, &user.password_hash) {
        warn!(username = %req.username, "login failed: invalid password");
        return Err(AppError::InvalidCredentials);
    }

    let tokens = issue_tokens_and_store_refresh(state, user.id).await?;

    Ok(LoginResponse {
        id: user.id.to_hex(),
        username: user.username,
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    })
}

/// Exchange a live refresh token for a fresh access token. The refresh
/// token itself is returned unchanged; it stays valid until its own
/// expiry. An expired record is deleted before the error is reported, so
/// a raced second caller simply sees "not in database".
pub async fn refresh(state: &AppState, req: RefreshRequest) -> Result<RefreshResponse, AppError> {
    let token = match req.refresh_token.as_deref() {
        Some(t) if !t.is_empty() => t,
        _ => {
            warn!("refresh rejected: no refresh token in request");
            return Err(AppError::MissingRefreshToken);
        }
    };

    let token_hash = sha256_hex(token);
    let record = state
        .refresh_tokens
        .find_one(doc! { "token_hash": &token_hash })
        .await?
        .ok_or_else(|| {
            warn!("refresh rejected: token not in database");
            AppError::RefreshTokenNotFound
        })?;

    if record.is_expired() {
        state
            .refresh_tokens
            .delete_one(doc! { "_id": record.id })
            .await?;
        warn!(user_id = %record.user_id, "refresh rejected: token expired, record deleted");
        return Err(AppError::RefreshTokenExpired);
    }

    let owner = state
        .users
        .find_one(doc! { "_id": record.user_id })
        .await?;
    let Some(owner) = owner else {
        // Owner was deleted out from under the token; drop the orphan.
        state
            .refresh_tokens
            .delete_one(doc! { "_id": record.id })
            .await?;
        warn!(user_id = %record.user_id, "refresh rejected: owning user no longer exists");
        return Err(AppError::RefreshTokenNotFound);
    };

    let access_token = sign_access_token(state, owner.id)?;

    Ok(RefreshResponse {
        access_token,
        refresh_token: token.to_string(),
    })
}

/// Server-side no-op: the caller proved possession of a valid access
/// token and is told to discard local credentials. Refresh tokens are not
/// revoked here and remain valid until natural expiry.
pub fn logout(user_id: ObjectId) {
    tracing::debug!(user_id = %user_id, "logout");
}

pub async fn update_password(
    state: &AppState,
    user_id: ObjectId,
    req: UpdatePasswordRequest,
) -> Result<(), AppError> {
    if req.old_password.is_empty() {
        return Err(AppError::Validation("Old password is required".into()));
    }
    validate_password(&req.new_password)?;
    if req.new_password != req.repeat_password {
        warn!("password update rejected: confirmation mismatch");
        return Err(AppError::Validation(
            "New password and password confirmation do not match".into(),
        ));
    }

    let user = state
        .users
        .find_one(doc! { "_id": user_id })
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

    if !verify_password(&req.old_password, &user.password_hash) {
        warn!(user_id = %user_id, "password update rejected: old password invalid");
        return Err(AppError::InvalidCredentials);
    }

    let password_hash = hash_password(&req.new_password)?;
    state
        .users
        .update_one(
            doc! { "_id": user_id },
            doc! { "$set": { "password_hash": password_hash } },
        )
        .await?;

    Ok(())
}

pub async fn update_username(
    state: &AppState,
    user_id: ObjectId,
    req: UpdateUsernameRequest,
) -> Result<(), AppError> {
    validate_username(&req.new_username)?;

    if state
        .users
        .find_one(doc! { "username": &req.new_username })
        .await?
        .is_some()
    {
        warn!(username = %req.new_username, "username update rejected: already exists");
        return Err(AppError::Conflict("Username already exists.".into()));
    }

    state
        .users
        .update_one(
            doc! { "_id": user_id },
            doc! { "$set": { "username": &req.new_username } },
        )
        .await?;

    Ok(())
}

/// Deleting a user cascades explicitly: refresh tokens first, then the
/// profile row, then the user record itself.
pub async fn delete_user(
    state: &AppState,
    user_id: ObjectId,
    req: DeleteUserRequest,
) -> Result<(), AppError> {
    if req.username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }

    let user = state
        .users
        .find_one(doc! { "_id": user_id })
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".into()))?;

    if user.username != req.username {
        warn!(user_id = %user_id, "account deletion rejected: username mismatch");
        return Err(AppError::Validation(
            "Invalid username. Please enter your username correctly.".into(),
        ));
    }

    state
        .refresh_tokens
        .delete_many(doc! { "user_id": user_id })
        .await?;
    state
        .accounts
        .delete_one(doc! { "user_id": user_id })
        .await?;
    state.users.delete_one(doc! { "_id": user_id }).await?;

    Ok(())
}
