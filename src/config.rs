#[derive(Clone, Debug)]
pub struct Config {
    pub mongodb_uri: String,
    pub db_name: String,

    pub jwt_secret: String,
    pub jwt_access_ttl_seconds: i64,
    pub jwt_refresh_ttl_seconds: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let mongodb_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI is required");
        let db_name = std::env::var("DB_NAME").unwrap_or_else(|_| "account_db".to_string());

        let jwt_secret = std::env::var("JWT_SECRET").expect("JWT_SECRET is required");

        let jwt_access_ttl_seconds = std::env::var("JWT_ACCESS_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(60 * 60);

        let jwt_refresh_ttl_seconds = std::env::var("JWT_REFRESH_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(24 * 60 * 60);

        Self {
            mongodb_uri,
            db_name,
            jwt_secret,
            jwt_access_ttl_seconds,
            jwt_refresh_ttl_seconds,
        }
    }

    /// Fixed configuration for tests. The Mongo URI still comes from the
    /// environment so tests can point at a disposable instance.
    pub fn test_default(db_name: &str) -> Self {
        Self {
            mongodb_uri: std::env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            db_name: db_name.to_string(),
            jwt_secret: "test-signing-secret".to_string(),
            jwt_access_ttl_seconds: 60 * 60,
            jwt_refresh_ttl_seconds: 24 * 60 * 60,
        }
    }
}
