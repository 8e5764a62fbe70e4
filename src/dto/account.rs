use serde::{Deserialize, Serialize};

use crate::models::account::AccountDoc;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub id: String,
    pub name: String,
    pub email: String,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub birthdate: Option<String>,
    pub gender: Option<String>,
    pub bio: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub data: AccountData,
}

impl From<AccountDoc> for AccountData {
    fn from(a: AccountDoc) -> Self {
        Self {
            id: a.id.to_hex(),
            name: a.name,
            email: a.email,
            address: a.address,
            phone: a.phone,
            birthdate: a.birthdate,
            gender: a.gender,
            bio: a.bio,
        }
    }
}
