use crate::{
    auth::jwt::{make_token, new_access_claims},
    errors::AppError,
    models::refresh_token::RefreshTokenDoc,
    state::AppState,
};
use chrono::{Duration, Utc};
use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct IssuedTokens {
    pub access_token: String,
    pub refresh_token: String,
}

pub fn sha256_hex(s: &str) -> String {
    let mut h = Sha256::new();
    h.update(s.as_bytes());
    hex::encode(h.finalize())
}

/// Opaque refresh token value. A v4 UUID carries 122 random bits, which is
/// enough to make collisions and guessing impractical.
pub fn new_refresh_token() -> String {
    Uuid::new_v4().to_string()
}

pub fn sign_access_token(state: &AppState, user_id: ObjectId) -> Result<String, AppError> {
    let claims = new_access_claims(user_id.to_hex(), state.cfg.jwt_access_ttl_seconds);
    make_token(&state.keys, &claims)
}

/// Mint an access/refresh pair and persist the refresh record. Only the
/// hash of the refresh token touches the store.
pub async fn issue_tokens_and_store_refresh(
    state: &AppState,
    user_id: ObjectId,
) -> Result<IssuedTokens, AppError> {
    let access_token = sign_access_token(state, user_id)?;
    let refresh_token = new_refresh_token();

    let expires_at_millis =
        (Utc::now() + Duration::seconds(state.cfg.jwt_refresh_ttl_seconds)).timestamp_millis();

    let rt = RefreshTokenDoc {
        id: ObjectId::new(),
        user_id,
        token_hash: sha256_hex(&refresh_token),
        created_at: BsonDateTime::now(),
        expires_at: BsonDateTime::from_millis(expires_at_millis),
    };

    state.refresh_tokens.insert_one(rt).await?;

    Ok(IssuedTokens {
        access_token,
        refresh_token,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refresh_tokens_are_unique_uuids() {
        let a = new_refresh_token();
        let b = new_refresh_token();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[test]
    fn sha256_hex_is_stable() {
        assert_eq!(sha256_hex("abc"), sha256_hex("abc"));
        assert_ne!(sha256_hex("abc"), sha256_hex("abd"));
        assert_eq!(sha256_hex("abc").len(), 64);
    }
}
