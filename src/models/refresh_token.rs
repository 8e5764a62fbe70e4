use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// One record per issued refresh token. Records are never mutated: a token
/// is valid exactly while it exists and `expires_at` is in the future.
/// Several live records per user are allowed (multi-device).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshTokenDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub user_id: ObjectId,

    /// SHA-256 hex of the opaque token value; the plaintext only ever
    /// travels to the client.
    pub token_hash: String,

    pub created_at: BsonDateTime,
    pub expires_at: BsonDateTime,
}

impl RefreshTokenDoc {
    pub fn is_expired(&self) -> bool {
        self.expires_at <= BsonDateTime::now()
    }
}
