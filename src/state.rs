use std::sync::Arc;

use mongodb::{
    options::{ClientOptions, IndexOptions},
    Client, Collection, IndexModel,
};

use crate::{
    auth::jwt::Keys,
    config::Config,
    models::{account::AccountDoc, refresh_token::RefreshTokenDoc, user::UserDoc},
};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Arc<Config>,
    pub keys: Keys,
    pub users: Collection<UserDoc>,
    pub refresh_tokens: Collection<RefreshTokenDoc>,
    pub accounts: Collection<AccountDoc>,
}

impl AppState {
    pub async fn new(cfg: &Config) -> mongodb::error::Result<Self> {
        let mut opts = ClientOptions::parse(&cfg.mongodb_uri).await?;
        opts.app_name = Some("account-api".to_string());
        let client = Client::with_options(opts)?;
        let db = client.database(&cfg.db_name);

        let users: Collection<UserDoc> = db.collection("users");
        let refresh_tokens: Collection<RefreshTokenDoc> = db.collection("refresh_tokens");
        let accounts: Collection<AccountDoc> = db.collection("accounts");

        let username_index = IndexModel::builder()
            .keys(mongodb::bson::doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let _ = users.create_index(username_index).await?;

        let token_hash_index = IndexModel::builder()
            .keys(mongodb::bson::doc! { "token_hash": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let _ = refresh_tokens.create_index(token_hash_index).await?;

        // one profile per user
        let account_user_index = IndexModel::builder()
            .keys(mongodb::bson::doc! { "user_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        let _ = accounts.create_index(account_user_index).await?;

        Ok(Self {
            cfg: Arc::new(cfg.clone()),
            keys: Keys::new(&cfg.jwt_secret),
            users,
            refresh_tokens,
            accounts,
        })
    }
}
