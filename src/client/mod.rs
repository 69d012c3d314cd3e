//! Kintone REST client
//!
//! `KintoneClient` holds one credentials bundle and one HTTP transport and
//! exposes a method per endpoint:
//!
//! - **Metadata**: form layout and field definitions
//! - **Records**: single fetch, paginated fetch (offset or cursor), create,
//!   update, delete
//! - **Files**: upload to obtain a file key, download by file key
//!
//! Every method validates the app id before touching the network.

mod files;
mod metadata;
mod records;

pub use files::FileSource;
pub use records::RecordQuery;

use crate::auth::Credentials;
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpClientConfig};
use crate::types::{AppId, JsonValue};
use reqwest::Response;
use serde::de::DeserializeOwned;

/// Form layout endpoint
pub const FORM_PATH: &str = "/k/v1/form.json";
/// Field definitions endpoint
pub const FIELDS_PATH: &str = "/k/v1/app/form/fields.json";
/// Single record endpoint
pub const RECORD_PATH: &str = "/k/v1/record.json";
/// Bulk records endpoint
pub const RECORDS_PATH: &str = "/k/v1/records.json";
/// File upload/download endpoint
pub const FILE_PATH: &str = "/k/v1/file.json";

/// Client for one Kintone app
#[derive(Debug)]
pub struct KintoneClient {
    http: HttpClient,
    credentials: Credentials,
}

impl KintoneClient {
    /// Create a client with default HTTP settings
    ///
    /// Fails if the domain is empty or the credentials carry no usable
    /// authentication scheme.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_http_config(credentials, HttpClientConfig::default())
    }

    /// Create a client with custom HTTP settings; the base URL is derived
    /// from the credentials' domain
    pub fn with_http_config(credentials: Credentials, config: HttpClientConfig) -> Result<Self> {
        let config = HttpClientConfig {
            base_url: Some(base_url(&credentials.domain)?),
            ..config
        };
        let http = HttpClient::with_auth(config, &credentials)?;
        Ok(Self { http, credentials })
    }

    /// Create a client from a loaded configuration file
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        Self::with_http_config(config.credentials(), config.http_config())
    }

    /// The credentials bundle
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// The underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Validated app id
    pub fn app_id(&self) -> Result<AppId> {
        AppId::parse(&self.credentials.app)
    }
}

/// Derive the API base URL from a domain or URL
///
/// A bare host gets `https://`; trailing slashes are dropped.
pub fn base_url(domain: &str) -> Result<String> {
    let domain = domain.trim().trim_end_matches('/');
    if domain.is_empty() {
        return Err(Error::missing_field("domain"));
    }
    let url = if domain.starts_with("http://") || domain.starts_with("https://") {
        domain.to_string()
    } else {
        format!("https://{domain}")
    };
    url::Url::parse(&url)?;
    Ok(url)
}

/// Read a response body as JSON along with its status
///
/// An empty body reads as `null`. A non-JSON body on an error status is
/// kept as a JSON string so callers can still report it.
async fn read_json(response: Response) -> Result<(u16, JsonValue)> {
    let status = response.status();
    let text = response.text().await?;
    if text.trim().is_empty() {
        return Ok((status.as_u16(), JsonValue::Null));
    }
    match serde_json::from_str(&text) {
        Ok(value) => Ok((status.as_u16(), value)),
        Err(_) if !status.is_success() => Ok((status.as_u16(), JsonValue::String(text))),
        Err(e) => Err(Error::decode(format!("invalid JSON response: {e}"))),
    }
}

/// Read-side contract: a body with `code` and `message` is a remote error
async fn read_result(response: Response) -> Result<JsonValue> {
    let (status, body) = read_json(response).await?;
    if let Some(err) = Error::from_api_body(status, &body) {
        return Err(err);
    }
    if !(200..300).contains(&status) {
        return Err(Error::from_read_body(status, &body));
    }
    Ok(body)
}

/// Write-side contract: anything but 200 is a validation error
async fn write_result(response: Response) -> Result<JsonValue> {
    let (status, body) = read_json(response).await?;
    if status != 200 {
        return Err(Error::validation(status, body));
    }
    Ok(body)
}

/// Deserialize a response value, reporting shape mismatches as decode errors
fn decode<T: DeserializeOwned>(value: JsonValue) -> Result<T> {
    serde_json::from_value(value).map_err(|e| Error::decode(e.to_string()))
}

/// Take a required key out of a response object
fn take_field(mut body: JsonValue, key: &str) -> Result<JsonValue> {
    body.get_mut(key)
        .map(JsonValue::take)
        .ok_or_else(|| Error::decode(format!("response has no '{key}'")))
}
