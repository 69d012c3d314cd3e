//! Authenticator implementation
//!
//! Assembles the Kintone authentication headers once and applies them to
//! every outgoing request.

use super::types::{AuthScheme, Credentials};
use crate::error::{Error, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use reqwest::RequestBuilder;

/// Header carrying base64 `login:password`
pub const PASSWORD_AUTH_HEADER: &str = "x-cybozu-authorization";

/// Header carrying the API token
pub const API_TOKEN_HEADER: &str = "x-cybozu-api-token";

/// Build the authentication headers for a credentials bundle
///
/// Password auth takes precedence over the API token. Basic auth is added
/// on top of whichever scheme applies.
pub fn auth_headers(credentials: &Credentials) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    match credentials.scheme() {
        Some(AuthScheme::Password { login, password }) => {
            let encoded = STANDARD.encode(format!("{login}:{password}"));
            insert(&mut headers, HeaderName::from_static(PASSWORD_AUTH_HEADER), &encoded)?;
        }
        Some(AuthScheme::ApiToken { token }) => {
            insert(&mut headers, HeaderName::from_static(API_TOKEN_HEADER), token)?;
        }
        None => {
            return Err(Error::auth(
                "API token or login name and password are required",
            ));
        }
    }

    if let Some((user, password)) = credentials.basic() {
        let encoded = STANDARD.encode(format!("{user}:{password}"));
        insert(&mut headers, AUTHORIZATION, &format!("Basic {encoded}"))?;
    }

    Ok(headers)
}

fn insert(headers: &mut HeaderMap, name: HeaderName, value: &str) -> Result<()> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|e| Error::auth(format!("Invalid value for {name}: {e}")))?;
    value.set_sensitive(true);
    headers.insert(name, value);
    Ok(())
}

/// Authenticator handles applying authentication to HTTP requests
#[derive(Clone)]
pub struct Authenticator {
    headers: HeaderMap,
}

impl Authenticator {
    /// Create an authenticator, failing if the credentials carry no usable scheme
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Ok(Self {
            headers: auth_headers(credentials)?,
        })
    }

    /// Apply authentication to a request builder
    pub fn apply(&self, req: RequestBuilder) -> RequestBuilder {
        req.headers(self.headers.clone())
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.headers.keys().map(HeaderName::as_str).collect();
        f.debug_struct("Authenticator")
            .field("headers", &names)
            .finish()
    }
}
