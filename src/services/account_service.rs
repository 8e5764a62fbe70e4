use mongodb::bson::{doc, oid::ObjectId};
use tracing::warn;

use crate::{
    dto::account::{AccountData, UpdateAccountRequest},
    errors::AppError,
    state::AppState,
    validation::{validate_email, validate_gender},
};

pub async fn get_account(state: &AppState, user_id: ObjectId) -> Result<AccountData, AppError> {
    let account = state
        .accounts
        .find_one(doc! { "user_id": user_id })
        .await?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "account not found");
            AppError::NotFound("Account not found.".into())
        })?;

    Ok(account.into())
}

/// Partial update: absent fields keep their stored value.
pub async fn update_account(
    state: &AppState,
    user_id: ObjectId,
    req: UpdateAccountRequest,
) -> Result<(), AppError> {
    if let Some(email) = &req.email {
        validate_email(email)?;
    }
    if let Some(gender) = &req.gender {
        validate_gender(gender)?;
    }

    let account = state
        .accounts
        .find_one(doc! { "user_id": user_id })
        .await?
        .ok_or_else(|| {
            warn!(user_id = %user_id, "account update rejected: account not found");
            AppError::NotFound("Account not found.".into())
        })?;

    let update = doc! { "$set": {
        "name": req.name.unwrap_or(account.name),
        "email": req.email.unwrap_or(account.email),
        "address": req.address.or(account.address),
        "phone": req.phone.or(account.phone),
        "birthdate": req.birthdate.or(account.birthdate),
        "gender": req.gender.or(account.gender),
        "bio": req.bio.or(account.bio),
    } };

    state
        .accounts
        .update_one(doc! { "_id": account.id }, update)
        .await?;

    Ok(())
}
