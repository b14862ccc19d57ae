use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

const MAX_EMAIL_LENGTH: usize = 254;
const MAX_LOCAL_PART_LENGTH: usize = 64;

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();

    // dot-atom local part, LDH domain labels and an alphabetic top level domain
    EMAIL.get_or_init(|| {
        Regex::new(concat!(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
            r"@([A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z]{2,63}$",
        ))
        .expect("email pattern is a valid regex")
    })
}

pub fn validate_email(field: &str, value: &str) -> Result<(), ValidationError> {
    let local_part_ok = value
        .split_once('@')
        .is_some_and(|(local, _)| local.len() <= MAX_LOCAL_PART_LENGTH);

    if value.len() <= MAX_EMAIL_LENGTH && local_part_ok && email_regex().is_match(value) {
        return Ok(());
    }

    Err(ValidationError::new(
        field,
        "value is not a valid email address",
    ))
}

pub fn require_non_empty(field: &str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new(field, "field cannot be empty"));
    }

    Ok(())
}
