//! Client configuration
//!
//! A `ClientConfig` describes how to reach one Kintone app. It is loaded
//! from a YAML or JSON file and converted into `Credentials` plus an
//! `HttpClientConfig`.
//!
//! ```yaml
//! domain: example.cybozu.com
//! app: "229"
//! api_token: your-token
//! basic_auth_user: proxy-user      # optional
//! basic_auth_password: proxy-pass  # optional
//! timeout_secs: 30
//! ```

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::HttpClientConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Configuration for a Kintone client
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Kintone domain or base URL
    #[serde(default)]
    pub domain: String,

    /// App id (kept as text; validated on each call)
    #[serde(default, deserialize_with = "deserialize_app")]
    pub app: String,

    /// API token
    #[serde(default)]
    pub api_token: Option<String>,

    /// Login name for password authentication
    #[serde(default)]
    pub login_name: Option<String>,

    /// Password for password authentication
    #[serde(default)]
    pub password: Option<String>,

    /// Basic auth user
    #[serde(default)]
    pub basic_auth_user: Option<String>,

    /// Basic auth password
    #[serde(default)]
    pub basic_auth_password: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            domain: String::new(),
            app: String::new(),
            api_token: None,
            login_name: None,
            password: None,
            basic_auth_user: None,
            basic_auth_password: None,
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

/// Accept `app: 229` as well as `app: "229"`
fn deserialize_app<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AppValue {
        Number(u64),
        Text(String),
    }

    Ok(match AppValue::deserialize(deserializer)? {
        AppValue::Number(n) => n.to_string(),
        AppValue::Text(s) => s,
    })
}

impl ClientConfig {
    /// Credentials bundle described by this config
    pub fn credentials(&self) -> Credentials {
        Credentials {
            domain: self.domain.clone(),
            app: self.app.clone(),
            api_token: self.api_token.clone(),
            login_name: self.login_name.clone(),
            password: self.password.clone(),
            basic_auth_user: self.basic_auth_user.clone(),
            basic_auth_password: self.basic_auth_password.clone(),
        }
    }

    /// HTTP settings described by this config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder().timeout(Duration::from_secs(self.timeout_secs));
        if let Some(agent) = &self.user_agent {
            builder = builder.user_agent(agent);
        }
        builder.build()
    }

    /// Check the fields every client needs
    pub fn validate(&self) -> Result<()> {
        if self.domain.trim().is_empty() {
            return Err(Error::missing_field("domain"));
        }
        if self.app.trim().is_empty() {
            return Err(Error::missing_field("app"));
        }
        if self.timeout_secs == 0 {
            return Err(Error::invalid_value("timeout_secs", "must be greater than 0"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("credentials", &self.credentials())
            .field("timeout_secs", &self.timeout_secs)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

/// Load a client configuration file
///
/// `.yaml`/`.yml` files are parsed as YAML, anything else as JSON.
pub fn load_config(path: impl AsRef<Path>) -> Result<ClientConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        }
    })?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

    if is_yaml {
        load_config_from_yaml(&content)
    } else {
        load_config_from_json(&content)
    }
}

/// Parse a client configuration from YAML
pub fn load_config_from_yaml(yaml: &str) -> Result<ClientConfig> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Parse a client configuration from JSON
pub fn load_config_from_json(json: &str) -> Result<ClientConfig> {
    Ok(serde_json::from_str(json)?)
}
