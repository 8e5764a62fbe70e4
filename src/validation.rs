//! Request shape rules shared by registration and the update endpoints.
//! Failures are terminal and report the first violated rule.

use crate::errors::AppError;

pub fn validate_username(username: &str) -> Result<(), AppError> {
    if username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if !username.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::Validation(
            "Username should only contain alphanumeric characters".into(),
        ));
    }
    if username.len() < 3 {
        return Err(AppError::Validation(
            "Username should have a minimum length of 3 characters".into(),
        ));
    }
    if username.len() > 30 {
        return Err(AppError::Validation(
            "Username should have a maximum length of 30 characters".into(),
        ));
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.is_empty() {
        return Err(AppError::Validation("Password is required".into()));
    }
    if password.len() < 8 {
        return Err(AppError::Validation(
            "Password should have a minimum length of 8 characters".into(),
        ));
    }
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err(AppError::Validation(
            "Password should contain at least 1 lowercase letter, 1 uppercase letter and 1 digit"
                .into(),
        ));
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), AppError> {
    let ok = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.ends_with('.'),
        None => false,
    };
    if !ok {
        return Err(AppError::Validation(
            "Email should be a valid email address".into(),
        ));
    }
    Ok(())
}

pub fn validate_gender(gender: &str) -> Result<(), AppError> {
    match gender {
        "male" | "female" | "other" => Ok(()),
        _ => Err(AppError::Validation(
            "Gender should be \"male\", \"female\", or \"other\"".into(),
        )),
    }
}
