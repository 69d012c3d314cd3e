//! Credential types
//!
//! A `Credentials` bundle carries everything needed to reach one Kintone
//! app: the domain, the app id and whichever authentication secrets the
//! caller has.

use std::fmt;

/// Credentials bundle for a Kintone app
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// Kintone domain (`example.cybozu.com`) or full base URL
    pub domain: String,
    /// App id as supplied by the caller; validated on each call
    pub app: String,
    /// API token (comma-separated tokens are passed through)
    pub api_token: Option<String>,
    /// Login name for password authentication
    pub login_name: Option<String>,
    /// Password for password authentication
    pub password: Option<String>,
    /// Basic auth user (for domains behind basic authentication)
    pub basic_auth_user: Option<String>,
    /// Basic auth password
    pub basic_auth_password: Option<String>,
}

impl Credentials {
    /// Create a bundle with domain and app id, no secrets yet
    pub fn new(domain: impl Into<String>, app: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            app: app.into(),
            ..Default::default()
        }
    }

    /// Set the API token
    #[must_use]
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the login name and password
    #[must_use]
    pub fn password_auth(mut self, login_name: impl Into<String>, password: impl Into<String>) -> Self {
        self.login_name = Some(login_name.into());
        self.password = Some(password.into());
        self
    }

    /// Set the basic auth user and password
    #[must_use]
    pub fn basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth_user = Some(user.into());
        self.basic_auth_password = Some(password.into());
        self
    }

    /// Resolve which authentication scheme applies
    ///
    /// A non-empty login name and password always win over a token.
    pub fn scheme(&self) -> Option<AuthScheme<'_>> {
        if let (Some(login), Some(password)) = (
            non_empty(self.login_name.as_deref()),
            non_empty(self.password.as_deref()),
        ) {
            return Some(AuthScheme::Password { login, password });
        }
        non_empty(self.api_token.as_deref()).map(|token| AuthScheme::ApiToken { token })
    }

    /// Basic auth pair, when both halves are non-empty
    pub fn basic(&self) -> Option<(&str, &str)> {
        Some((
            non_empty(self.basic_auth_user.as_deref())?,
            non_empty(self.basic_auth_password.as_deref())?,
        ))
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("domain", &self.domain)
            .field("app", &self.app)
            .field("api_token", &self.api_token.as_ref().map(|_| "***"))
            .field("login_name", &self.login_name)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("basic_auth_user", &self.basic_auth_user)
            .field(
                "basic_auth_password",
                &self.basic_auth_password.as_ref().map(|_| "***"),
            )
            .finish()
    }
}

/// Authentication scheme selected from a credentials bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme<'a> {
    /// `X-Cybozu-Authorization` with base64 login:password
    Password {
        /// Login name
        login: &'a str,
        /// Password
        password: &'a str,
    },
    /// `X-Cybozu-API-Token`
    ApiToken {
        /// Token value
        token: &'a str,
    },
}
