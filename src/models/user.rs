use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Identity record. The password only ever exists here as an argon2 PHC
/// hash, replaced atomically on password change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub username: String,

    pub password_hash: String,
    pub created_at: BsonDateTime,
}
