//! HTTP client module
//!
//! Provides the transport used by `KintoneClient`.
//!
//! # Features
//!
//! - **Base URL resolution**: relative paths resolve against the Kintone domain
//! - **Bodies**: JSON and multipart
//! - **Authentication**: Integration with auth module
//!
//! There is no retry, backoff or rate limiting; every call is one attempt.

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestBody, RequestConfig};
