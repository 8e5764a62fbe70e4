//! Username changes, profile reads/updates and cascading account deletion.

use account_api::dto::account::UpdateAccountRequest;
use account_api::dto::user::{DeleteUserRequest, RefreshRequest, UpdateUsernameRequest};
use account_api::errors::AppError;
use account_api::services::{account_service, user_service};
use mongodb::bson::{doc, oid::ObjectId};

mod common;
use common::{login_request, register_request, test_state, unique_username};

fn no_profile_changes() -> UpdateAccountRequest {
    UpdateAccountRequest {
        name: None,
        email: None,
        address: None,
        phone: None,
        birthdate: None,
        gender: None,
        bio: None,
    }
}

#[tokio::test]
async fn username_change_rejects_existing_name_and_applies() {
    require_mongo!();
    let state = test_state().await;
    let first = unique_username("henry");
    let second = unique_username("irene");

    user_service::register(&state, register_request(&first, "Passw0rd1"))
        .await
        .expect("register first");
    user_service::register(&state, register_request(&second, "Passw0rd1"))
        .await
        .expect("register second");

    let login = user_service::login(&state, login_request(&first, "Passw0rd1"))
        .await
        .expect("login");
    let user_id = ObjectId::parse_str(&login.id).unwrap();

    let err = user_service::update_username(
        &state,
        user_id,
        UpdateUsernameRequest {
            new_username: second.clone(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)), "got {err:?}");

    let renamed = unique_username("harold");
    user_service::update_username(
        &state,
        user_id,
        UpdateUsernameRequest {
            new_username: renamed.clone(),
        },
    )
    .await
    .expect("rename");

    user_service::login(&state, login_request(&renamed, "Passw0rd1"))
        .await
        .expect("login under the new username");
    let err = user_service::login(&state, login_request(&first, "Passw0rd1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UserNotFound), "got {err:?}");
}

#[tokio::test]
async fn profile_is_created_at_registration_and_partially_updatable() {
    require_mongo!();
    let state = test_state().await;
    let username = unique_username("judy");

    user_service::register(&state, register_request(&username, "Passw0rd1"))
        .await
        .expect("register");
    let login = user_service::login(&state, login_request(&username, "Passw0rd1"))
        .await
        .expect("login");
    let user_id = ObjectId::parse_str(&login.id).unwrap();

    let account = account_service::get_account(&state, user_id)
        .await
        .expect("get account");
    assert_eq!(account.name, "Test User");
    assert_eq!(account.email, format!("{username}@example.com"));
    assert!(account.bio.is_none());

    account_service::update_account(
        &state,
        user_id,
        UpdateAccountRequest {
            bio: Some("hello".to_string()),
            gender: Some("other".to_string()),
            ..no_profile_changes()
        },
    )
    .await
    .expect("update bio");

    let account = account_service::get_account(&state, user_id)
        .await
        .expect("get account again");
    // untouched fields keep their stored values
    assert_eq!(account.name, "Test User");
    assert_eq!(account.bio.as_deref(), Some("hello"));
    assert_eq!(account.gender.as_deref(), Some("other"));
}

#[tokio::test]
async fn invalid_gender_is_rejected() {
    require_mongo!();
    let state = test_state().await;
    let username = unique_username("kate");

    user_service::register(&state, register_request(&username, "Passw0rd1"))
        .await
        .expect("register");
    let login = user_service::login(&state, login_request(&username, "Passw0rd1"))
        .await
        .expect("login");
    let user_id = ObjectId::parse_str(&login.id).unwrap();

    let err = account_service::update_account(
        &state,
        user_id,
        UpdateAccountRequest {
            gender: Some("martian".to_string()),
            ..no_profile_changes()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn deletion_requires_matching_username() {
    require_mongo!();
    let state = test_state().await;
    let username = unique_username("liam");

    user_service::register(&state, register_request(&username, "Passw0rd1"))
        .await
        .expect("register");
    let login = user_service::login(&state, login_request(&username, "Passw0rd1"))
        .await
        .expect("login");
    let user_id = ObjectId::parse_str(&login.id).unwrap();

    let err = user_service::delete_user(
        &state,
        user_id,
        DeleteUserRequest {
            username: unique_username("mallory"),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::Validation(_)), "got {err:?}");
}

#[tokio::test]
async fn deletion_cascades_to_profile_and_refresh_tokens() {
    require_mongo!();
    let state = test_state().await;
    let username = unique_username("nina");

    user_service::register(&state, register_request(&username, "Passw0rd1"))
        .await
        .expect("register");
    let login = user_service::login(&state, login_request(&username, "Passw0rd1"))
        .await
        .expect("login");
    let user_id = ObjectId::parse_str(&login.id).unwrap();

    user_service::delete_user(
        &state,
        user_id,
        DeleteUserRequest {
            username: username.clone(),
        },
    )
    .await
    .expect("delete user");

    let err = user_service::login(&state, login_request(&username, "Passw0rd1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UserNotFound), "got {err:?}");

    let err = user_service::refresh(
        &state,
        RefreshRequest {
            refresh_token: Some(login.refresh_token),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::RefreshTokenNotFound), "got {err:?}");

    let account = state
        .accounts
        .find_one(doc! { "user_id": user_id })
        .await
        .expect("lookup");
    assert!(account.is_none());
}
