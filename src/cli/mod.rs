//! CLI module
//!
//! Command-line interface over `KintoneClient`. Connection settings come
//! from a config file, flags or `KINTONE_*` environment variables.
//!
//! # Commands
//!
//! - `form` / `fields` - Show app metadata
//! - `get` / `records` - Fetch one record or a paginated set
//! - `add` / `add-many` - Create records
//! - `update` / `update-many` - Update records by id or update key
//! - `delete` - Delete records by id
//! - `upload` / `download` - Transfer file attachments

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
