//! Tests for the auth module

use super::*;
use crate::error::Error;
use base64::Engine;
use reqwest::header::AUTHORIZATION;

fn decode(value: &str) -> String {
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(value)
        .unwrap();
    String::from_utf8(decoded).unwrap()
}

fn header<'a>(headers: &'a reqwest::header::HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).map(|v| v.to_str().unwrap())
}

#[test]
fn test_api_token_header() {
    let creds = Credentials::new("example.cybozu.com", "1").api_token("token-123");
    let headers = auth_headers(&creds).unwrap();

    assert_eq!(header(&headers, API_TOKEN_HEADER), Some("token-123"));
    assert!(headers.get(PASSWORD_AUTH_HEADER).is_none());
    assert!(headers.get(AUTHORIZATION).is_none());
}

#[test]
fn test_password_header() {
    let creds = Credentials::new("example.cybozu.com", "1").password_auth("alice", "p@ss");
    let headers = auth_headers(&creds).unwrap();

    let value = header(&headers, PASSWORD_AUTH_HEADER).unwrap();
    assert_eq!(decode(value), "alice:p@ss");
    assert!(headers.get(API_TOKEN_HEADER).is_none());
}

#[test]
fn test_password_wins_over_token() {
    let creds = Credentials::new("example.cybozu.com", "1")
        .api_token("token-123")
        .password_auth("alice", "secret");
    let headers = auth_headers(&creds).unwrap();

    assert!(headers.get(PASSWORD_AUTH_HEADER).is_some());
    assert!(headers.get(API_TOKEN_HEADER).is_none());
}

#[test]
fn test_basic_auth_is_additive() {
    let creds = Credentials::new("example.cybozu.com", "1")
        .api_token("token-123")
        .basic_auth("proxy-user", "proxy-pass");
    let headers = auth_headers(&creds).unwrap();

    assert_eq!(header(&headers, API_TOKEN_HEADER), Some("token-123"));
    let basic = header(&headers, "Authorization").unwrap();
    let encoded = basic.strip_prefix("Basic ").unwrap();
    assert_eq!(decode(encoded), "proxy-user:proxy-pass");
}

#[test]
fn test_basic_auth_needs_both_halves() {
    let mut creds = Credentials::new("example.cybozu.com", "1").api_token("token-123");
    creds.basic_auth_user = Some("proxy-user".to_string());
    creds.basic_auth_password = Some(String::new());
    let headers = auth_headers(&creds).unwrap();

    assert!(headers.get(AUTHORIZATION).is_none());
}

#[test]
fn test_missing_credentials() {
    let creds = Credentials::new("example.cybozu.com", "1");
    let err = auth_headers(&creds).unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));

    // Basic auth alone is not enough
    let creds = Credentials::new("example.cybozu.com", "1").basic_auth("u", "p");
    assert!(matches!(auth_headers(&creds), Err(Error::Auth { .. })));

    // Login without password is not enough
    let mut creds = Credentials::new("example.cybozu.com", "1");
    creds.login_name = Some("alice".to_string());
    assert!(matches!(auth_headers(&creds), Err(Error::Auth { .. })));
}

#[test]
fn test_invalid_header_value() {
    let creds = Credentials::new("example.cybozu.com", "1").api_token("bad\ntoken");
    assert!(matches!(auth_headers(&creds), Err(Error::Auth { .. })));
}

#[test]
fn test_authenticator_apply() {
    let creds = Credentials::new("example.cybozu.com", "1")
        .password_auth("alice", "secret")
        .basic_auth("u", "p");
    let auth = Authenticator::new(&creds).unwrap();

    let client = reqwest::Client::new();
    let req = auth.apply(client.get("https://example.com/k/v1/form.json"));
    let built = req.build().unwrap();

    assert!(built.headers().get(PASSWORD_AUTH_HEADER).is_some());
    assert!(built
        .headers()
        .get("Authorization")
        .unwrap()
        .to_str()
        .unwrap()
        .starts_with("Basic "));
}

#[test]
fn test_authenticator_debug_hides_values() {
    let creds = Credentials::new("example.cybozu.com", "1").api_token("token-123");
    let auth = Authenticator::new(&creds).unwrap();
    let debug = format!("{auth:?}");
    assert!(debug.contains("x-cybozu-api-token"));
    assert!(!debug.contains("token-123"));
}
