//! # Kintone SDK
//!
//! A typed async client for the Kintone REST API.
//!
//! ## Features
//!
//! - **Authentication**: API token or login/password, with optional basic auth on top
//! - **Metadata**: Form layout and field definitions
//! - **Records**: Single fetch, bulk create/update/delete
//! - **Pagination**: Offset and cursor (`$id`) strategies past the 500-record page limit
//! - **Files**: Upload from a path, bytes or URL; download by file key
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use kintone_sdk::{Credentials, KintoneClient, RecordQuery, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let creds = Credentials::new("example.cybozu.com", "229").api_token("...");
//!     let client = KintoneClient::new(creds)?;
//!
//!     // Every open record, 500 at a time
//!     let set = client
//!         .get_records(&RecordQuery::new("status = \"Open\"").total_count(true))
//!         .await?;
//!     println!("{} of {:?}", set.len(), set.total_count);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       KintoneClient                         │
//! │  metadata · records (get/paginate/add/update/delete) · files│
//! └─────────────────────────────────────────────────────────────┘
//!                               │
//! ┌───────────────┬─────────────┴──────┬────────────────────────┐
//! │     Auth      │        HTTP        │       Paginate         │
//! ├───────────────┼────────────────────┼────────────────────────┤
//! │ API token     │ GET/POST/PUT/DELETE│ Offset (limit/offset)  │
//! │ Password      │ JSON / multipart   │ Cursor ($id > last)    │
//! │ Basic (extra) │ Single attempt     │ Page plans             │
//! └───────────────┴────────────────────┴────────────────────────┘
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]
#![allow(missing_docs)] // TODO: Document error variant fields before 1.0

// ============================================================================
// Module declarations
// ============================================================================

/// Error types for the SDK
pub mod error;

/// Record, id and result types
pub mod types;

/// Credentials and header assembly
pub mod auth;

/// HTTP transport
pub mod http;

/// Pagination strategies
pub mod pagination;

/// Kintone REST client
pub mod client;

/// Client configuration files
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use auth::{AuthScheme, Authenticator, Credentials};
pub use client::{FileSource, KintoneClient, RecordQuery};
pub use config::{load_config, ClientConfig};
pub use error::{Error, Result};
pub use pagination::{CursorPaginator, OffsetPaginator, Paginator, RecordLimit};
pub use types::*;
