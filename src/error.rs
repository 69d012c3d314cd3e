//! Error types for the Kintone SDK
//!
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Errors fall into three groups: local validation (bad app id, missing
//! credentials, config problems), transport failures, and errors reported
//! by the Kintone REST API itself.

use serde_json::Value;
use thiserror::Error;

/// The main error type for the Kintone SDK
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Application ID must be numeric: '{value}'")]
    InvalidAppId { value: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Authentication Errors
    // ============================================================================
    #[error("Authentication failed: {message}")]
    Auth { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Kintone API Errors
    // ============================================================================
    #[error("Kintone API error [{code}]: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        id: Option<String>,
        errors: Option<Value>,
    },

    #[error("Validation error (HTTP {status}): {message}")]
    Validation {
        status: u16,
        message: String,
        payload: Value,
    },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid app id error
    pub fn invalid_app_id(value: impl Into<String>) -> Self {
        Self::InvalidAppId {
            value: value.into(),
        }
    }

    /// Create an auth error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Build a validation error from a rejected mutation's response body.
    ///
    /// The remote `message` is used when present, otherwise the raw body.
    pub fn validation(status: u16, payload: Value) -> Self {
        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .map_or_else(|| body_text(&payload), str::to_string);
        Self::Validation {
            status,
            message,
            payload,
        }
    }

    /// Build an API error if `body` carries both `code` and `message`
    pub fn from_api_body(status: u16, body: &Value) -> Option<Self> {
        let code = body.get("code")?.as_str()?;
        let message = body.get("message")?.as_str()?;
        Some(Self::Api {
            status,
            code: code.to_string(),
            message: message.to_string(),
            id: body.get("id").and_then(Value::as_str).map(str::to_string),
            errors: body.get("errors").cloned(),
        })
    }

    /// Error for a failed read: the remote error body when present,
    /// otherwise the status and raw body
    pub fn from_read_body(status: u16, body: &Value) -> Self {
        Self::from_api_body(status, body)
            .unwrap_or_else(|| Self::http_status(status, body_text(body)))
    }

    /// Short machine-readable code for this error
    ///
    /// Remote errors pass the Kintone code through (e.g. `GAIA_AP01`).
    pub fn code(&self) -> &str {
        match self {
            Error::Api { code, .. } => code,
            Error::Validation { .. } => "validation-error",
            Error::InvalidAppId { .. } => "invalid-app-id",
            Error::Auth { .. } => "auth",
            Error::Config { .. }
            | Error::MissingConfigField { .. }
            | Error::InvalidConfigValue { .. }
            | Error::YamlParse(_)
            | Error::JsonParse(_) => "config",
            Error::Http(_) | Error::HttpStatus { .. } | Error::InvalidUrl(_) => "http",
            Error::Decode { .. } => "decode",
            Error::Io(_) | Error::FileNotFound { .. } => "io",
        }
    }

    /// Human-readable message, without the variant prefix for remote errors
    pub fn message(&self) -> String {
        match self {
            Error::Api { message, .. } | Error::Validation { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }

    /// Whether the error was reported by the Kintone server
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Error::Api { .. } | Error::Validation { .. } | Error::HttpStatus { .. }
        )
    }
}

/// Result type alias for the Kintone SDK
pub type Result<T> = std::result::Result<T, Error>;

/// Response body as message text; a body kept as a JSON string is unquoted
pub fn body_text(body: &Value) -> String {
    body.as_str().map_or_else(|| body.to_string(), str::to_string)
}
