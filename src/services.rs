pub mod account_service;
pub mod user_service;
