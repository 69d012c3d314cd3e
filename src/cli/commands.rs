//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Kintone REST API command-line client
#[derive(Parser, Debug)]
#[command(name = "kintone-sdk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Client configuration file (YAML or JSON)
    #[arg(short = 'C', long, global = true, env = "KINTONE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Kintone domain or base URL
    #[arg(short, long, global = true, env = "KINTONE_DOMAIN")]
    pub domain: Option<String>,

    /// App id
    #[arg(short, long, global = true, env = "KINTONE_APP")]
    pub app: Option<String>,

    /// API token
    #[arg(long, global = true, env = "KINTONE_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Login name for password authentication
    #[arg(long, global = true, env = "KINTONE_LOGIN_NAME")]
    pub login_name: Option<String>,

    /// Password for password authentication
    #[arg(long, global = true, env = "KINTONE_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Basic auth user
    #[arg(long, global = true, env = "KINTONE_BASIC_AUTH_USER")]
    pub basic_auth_user: Option<String>,

    /// Basic auth password
    #[arg(
        long,
        global = true,
        env = "KINTONE_BASIC_AUTH_PASSWORD",
        hide_env_values = true
    )]
    pub basic_auth_password: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
///
/// Arguments taking JSON accept either inline JSON or `@path` to read it
/// from a file.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the form layout
    Form,

    /// Show field definitions keyed by field code
    Fields,

    /// Fetch one record by id
    Get {
        /// Record id
        #[arg(long)]
        id: u64,
    },

    /// Fetch records matching a query
    Records {
        /// Query condition, without limit/offset
        #[arg(short, long, default_value = "")]
        query: String,

        /// Field codes to return (comma-separated)
        #[arg(long, value_delimiter = ',')]
        fields: Vec<String>,

        /// Number of records to fetch (-1 = all)
        #[arg(long, default_value = "-1", allow_negative_numbers = true)]
        limit: i64,

        /// Include the total count in the output
        #[arg(long)]
        total_count: bool,

        /// Page by record id instead of offset (ignores --limit)
        #[arg(long)]
        by_id: bool,
    },

    /// Create one record
    Add {
        /// Record JSON (`{"field": {"value": ...}}`)
        #[arg(long)]
        record: String,
    },

    /// Create several records
    AddMany {
        /// JSON array of records
        #[arg(long)]
        records: String,
    },

    /// Update one record by id or update key
    Update {
        /// Record id
        #[arg(long, conflicts_with = "key_field", required_unless_present = "key_field")]
        id: Option<u64>,

        /// Update key field code
        #[arg(long, requires = "key_value")]
        key_field: Option<String>,

        /// Update key value
        #[arg(long, requires = "key_field")]
        key_value: Option<String>,

        /// Record JSON with the fields to replace
        #[arg(long)]
        record: String,

        /// Expected revision
        #[arg(long)]
        revision: Option<u64>,
    },

    /// Update several records
    UpdateMany {
        /// JSON array of `{id|updateKey, record, revision?}` entries
        #[arg(long)]
        updates: String,
    },

    /// Delete records by id
    Delete {
        /// Record ids (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<u64>,

        /// Expected revisions, one per id (comma-separated)
        #[arg(long, value_delimiter = ',')]
        revisions: Vec<u64>,
    },

    /// Upload a file and print its file key
    Upload {
        /// Local file to upload
        #[arg(long, conflicts_with = "url", required_unless_present = "url")]
        file: Option<PathBuf>,

        /// Remote file to fetch and upload
        #[arg(long)]
        url: Option<String>,
    },

    /// Download a file by its file key
    Download {
        /// File key
        #[arg(long)]
        file_key: String,

        /// Destination path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
}
