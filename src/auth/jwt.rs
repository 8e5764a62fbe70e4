use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{errors::AppError, state::AppState};

pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, hex encoded.
    pub sub: String,
    pub iat: usize,
    pub exp: usize,
}

/// Signing material, built once from `Config` at startup and kept in
/// `AppState`. Read-only afterwards.
#[derive(Clone)]
pub struct Keys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
}

impl Keys {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

pub fn new_access_claims(user_id_hex: String, ttl_seconds: i64) -> Claims {
    let now = Utc::now();
    Claims {
        sub: user_id_hex,
        iat: now.timestamp() as usize,
        exp: (now + Duration::seconds(ttl_seconds)).timestamp() as usize,
    }
}

pub fn make_token(keys: &Keys, claims: &Claims) -> Result<String, AppError> {
    encode(&Header::default(), claims, &keys.encoding)
        .map_err(|e| AppError::Internal(format!("jwt encode: {e}")))
}

/// Signature is checked before anything else; a tampered token is never
/// reported as expired.
pub fn decode_token(keys: &Keys, token: &str) -> Result<Claims, AppError> {
    decode::<Claims>(token, &keys.decoding, &Validation::default())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })
}

/// Verified caller identity, extracted from the `x-access-token` header.
#[derive(Debug, Clone)]
pub struct AuthUser(pub ObjectId);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let v = parts
            .headers
            .get(ACCESS_TOKEN_HEADER)
            .ok_or(AppError::NoToken)?;
        let token = v.to_str().map_err(|_| AppError::InvalidToken)?;

        let claims = decode_token(&state.keys, token)?;
        let user_id = ObjectId::parse_str(&claims.sub).map_err(|_| AppError::InvalidToken)?;

        Ok(Self(user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_then_decode() {
        let keys = Keys::new("unit-test-secret");
        let id = ObjectId::new().to_hex();
        let token = make_token(&keys, &new_access_claims(id.clone(), 3600)).unwrap();

        let claims = decode_token(&keys, &token).unwrap();
        assert_eq!(claims.sub, id);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_fails_regardless_of_expiry() {
        let keys = Keys::new("unit-test-secret");
        let other = Keys::new("some-other-secret");
        let token =
            make_token(&other, &new_access_claims(ObjectId::new().to_hex(), 3600)).unwrap();

        match decode_token(&keys, &token) {
            Err(AppError::InvalidToken) => {}
            other => panic!("expected InvalidToken, got {other:?}"),
        }
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let keys = Keys::new("unit-test-secret");
        // Well past the default decode leeway.
        let token =
            make_token(&keys, &new_access_claims(ObjectId::new().to_hex(), -3600)).unwrap();

        match decode_token(&keys, &token) {
            Err(AppError::TokenExpired) => {}
            other => panic!("expected TokenExpired, got {other:?}"),
        }
    }

    #[test]
    fn garbage_is_invalid_not_expired() {
        let keys = Keys::new("unit-test-secret");
        match decode_token(&keys, "definitely.not.a-jwt") {
            Err(AppError::InvalidToken) => {}
            other => panic!("expected InvalidToken, got {other:?}"),
        }
    }
}
