use std::fmt;

use actix_web::{
    body::BoxBody,
    dev::{ServiceRequest, ServiceResponse},
    http::header::{self, HeaderMap},
    web, Error,
};
use actix_web_lab::middleware::Next;
use base64::{engine::general_purpose::STANDARD, Engine};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::error::ApiError;

/// The single username/password pair guarding every route. Loaded once at startup
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both halves are always compared so a wrong username costs the same as a wrong password
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let username_ok = constant_time_eq(username, &self.username);
        let password_ok = constant_time_eq(password, &self.password);

        username_ok & password_ok
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Compares fixed size digests so neither the content nor the length of the expected value
/// shows in the timing
fn constant_time_eq(provided: &str, expected: &str) -> bool {
    let provided = Sha256::digest(provided.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());

    provided.as_slice().ct_eq(expected.as_slice()).into()
}

/// Decodes `Authorization: Basic <base64(username:password)>`
pub fn parse_basic(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = value.trim().split_once(' ')?;

    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }

    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;

    Some((username.to_string(), password.to_string()))
}

pub fn authorize(headers: &HeaderMap, credentials: &Credentials) -> Result<(), ApiError> {
    match parse_basic(headers) {
        Some((username, password)) if credentials.matches(&username, &password) => Ok(()),
        _ => Err(ApiError::Unauthorized),
    }
}

/// Runs before every person route, rejected requests never reach a handler
pub async fn basic_auth(
    req: ServiceRequest,
    next: Next<BoxBody>,
) -> Result<ServiceResponse<BoxBody>, Error> {
    let result = match req.app_data::<web::Data<Credentials>>() {
        Some(credentials) => authorize(req.headers(), credentials),
        None => Err(ApiError::Internal(
            "Credentials are not configured".to_string(),
        )),
    };

    if let Err(e) = result {
        log::debug!("Rejected {} {}: {}", req.method(), req.path(), e);
        return Ok(req.error_response(e));
    }

    next.call(req).await
}
