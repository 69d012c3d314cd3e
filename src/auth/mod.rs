//! Authentication module
//!
//! Supports: API token, login name/password, and basic auth on top of either.
//!
//! The `Authenticator` assembles the headers once from a `Credentials`
//! bundle and stamps them onto every request.

mod authenticator;
mod types;

pub use authenticator::{auth_headers, Authenticator, API_TOKEN_HEADER, PASSWORD_AUTH_HEADER};
pub use types::{AuthScheme, Credentials};

#[cfg(test)]
mod tests;
