use account_api::dto::user::{LoginRequest, RegisterRequest};
use account_api::{AppState, Config};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Integration tests need a reachable MongoDB instance.
#[allow(dead_code)]
pub fn mongo_available() -> bool {
    std::env::var("MONGODB_URI").is_ok()
}

/// Skip test with a message if no MongoDB instance is configured.
#[macro_export]
macro_rules! require_mongo {
    () => {
        if !crate::common::mongo_available() {
            eprintln!("skipping: MONGODB_URI not set");
            return;
        }
    };
}

fn nanos() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos()
}

/// Fresh state against a per-run database so tests do not interfere.
#[allow(dead_code)]
pub async fn test_state() -> Arc<AppState> {
    let db_name = format!("account_api_test_{}", nanos());
    let cfg = Config::test_default(&db_name);
    Arc::new(AppState::new(&cfg).await.expect("connect to MongoDB"))
}

/// Unique alphanumeric username, within the 3..=30 length rule.
#[allow(dead_code)]
pub fn unique_username(prefix: &str) -> String {
    format!("{prefix}{}", nanos() % 1_000_000_000_000)
}

#[allow(dead_code)]
pub fn register_request(username: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password: password.to_string(),
        repeat_password: password.to_string(),
        name: "Test User".to_string(),
    }
}

#[allow(dead_code)]
pub fn login_request(username: &str, password: &str) -> LoginRequest {
    LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    }
}
