//! Session tokens and their cookie carriage.
//!
//! A session is an HS256-signed claims blob tied to a user id, handed out
//! at signin inside an HttpOnly cookie and resolved back to a
//! [`Claims`] on every guarded request. Non-browser clients may send the
//! same token as a `Bearer` authorization header instead.

use axum::http::{header, HeaderMap};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SessionConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: Uuid,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, ttl_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(ttl_hours as i64)).timestamp();

        Self {
            user_id,
            iat: now.timestamp(),
            exp,
        }
    }
}

#[derive(Debug)]
pub enum SessionError {
    TokenGeneration(String),
    InvalidToken(String),
    MissingSecret,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::TokenGeneration(msg) => write!(f, "session token generation error: {}", msg),
            SessionError::InvalidToken(msg) => write!(f, "invalid session token: {}", msg),
            SessionError::MissingSecret => write!(f, "session secret is not configured"),
        }
    }
}

impl std::error::Error for SessionError {}

pub fn mint_session_token(claims: &Claims, secret: &str) -> Result<String, SessionError> {
    if secret.is_empty() {
        return Err(SessionError::MissingSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    encode(&Header::default(), claims, &encoding_key)
        .map_err(|e| SessionError::TokenGeneration(e.to_string()))
}

/// Verify signature and expiry, returning the embedded claims.
pub fn verify_session_token(token: &str, secret: &str) -> Result<Claims, SessionError> {
    if secret.is_empty() {
        return Err(SessionError::MissingSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &decoding_key, &Validation::default())
        .map_err(|e| SessionError::InvalidToken(e.to_string()))?;

    Ok(token_data.claims)
}

/// Session cookie wrapping a freshly minted token. HttpOnly and
/// SameSite=Lax; `Secure` follows the config. The token's own `exp` claim
/// bounds the session lifetime.
pub fn session_cookie(config: &SessionConfig, token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(config.cookie_name.clone(), token);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_secure(config.cookie_secure);
    cookie
}

/// Cookie matching [`session_cookie`] in name and path, for removal via
/// `CookieJar::remove`.
pub fn session_cookie_for_removal(config: &SessionConfig) -> Cookie<'static> {
    let mut cookie = Cookie::new(config.cookie_name.clone(), "");
    cookie.set_path("/");
    cookie
}

/// Extract the session token from a request: the session cookie first,
/// then a `Bearer` authorization header for cookie-less clients.
pub fn session_token_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(cookie_name) {
        if !cookie.value().is_empty() {
            return Some(cookie.value().to_string());
        }
    }

    bearer_token_from_headers(headers)
}

fn bearer_token_from_headers(headers: &HeaderMap) -> Option<String> {
    let auth_value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }
    Some(token.to_string())
}
