// src/auth.rs

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};

use crate::error::AppError;

pub const API_KEY_HEADER: &str = "x-api-key";

/// Pulls a candidate token out of the request headers, if this carrier is present.
pub type Carrier = fn(&HeaderMap) -> Option<&str>;

/// Tried in order; the first carrier that yields a token wins.
pub const CARRIERS: &[Carrier] = &[bearer_token, api_key_header];

/// `Authorization: Bearer <token>` (scheme matched case-insensitively).
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let scheme = value.get(..7)?;
    scheme
        .eq_ignore_ascii_case("bearer ")
        .then(|| value[7..].trim())
}

/// `X-API-Key: <token>`
pub fn api_key_header(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(API_KEY_HEADER)?.to_str().ok()?.trim();
    (!value.is_empty()).then_some(value)
}

pub fn extract_token(headers: &HeaderMap) -> Option<&str> {
    CARRIERS.iter().find_map(|carrier| carrier(headers))
}

/// The single configured secret. Never printed.
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Exact equality, compared over fixed-size digests so timing does not
    /// depend on where the inputs first differ or on their lengths.
    pub fn matches(&self, presented: &str) -> bool {
        let want = Sha256::digest(self.0.as_bytes());
        let got = Sha256::digest(presented.as_bytes());
        want.iter().zip(got.iter()).fold(0u8, |acc, (a, b)| acc | (a ^ b)) == 0
    }

    pub fn authorize(&self, headers: &HeaderMap) -> Result<(), AppError> {
        match extract_token(headers) {
            Some(token) if self.matches(token) => Ok(()),
            Some(_) => {
                tracing::warn!("rejected request with invalid credential");
                Err(AppError::Unauthorized)
            }
            None => {
                tracing::debug!("rejected request without credential");
                Err(AppError::Unauthorized)
            }
        }
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(<redacted>)")
    }
}

/// Gate for the protected router; runs before any body is read.
pub async fn require_api_key(
    State(key): State<Arc<ApiKey>>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    key.authorize(req.headers())?;
    Ok(next.run(req).await)
}
