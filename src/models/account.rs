use mongodb::bson::{oid::ObjectId, DateTime as BsonDateTime};
use serde::{Deserialize, Serialize};

/// Profile row, 1:1 with a user. Deleted in cascade with its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountDoc {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub user_id: ObjectId,

    pub name: String,
    pub email: String,

    pub address: Option<String>,
    pub phone: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<String>,

    pub created_at: BsonDateTime,
}
