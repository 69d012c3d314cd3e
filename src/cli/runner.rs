//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::client::{FileSource, KintoneClient, RecordQuery};
use crate::config::{load_config, ClientConfig};
use crate::error::{Error, Result};
use crate::pagination::RecordLimit;
use crate::types::{JsonValue, Record, RecordUpdate, UpdateKey, UpdateTarget};
use serde::Deserialize;
use serde_json::json;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let config = self.resolve_config()?;
        debug!("Resolved configuration: {:?}", config);
        let client = KintoneClient::from_config(&config)?;

        match &self.cli.command {
            Commands::Form => self.output(&json!(client.form_layout().await?)),
            Commands::Fields => self.output(&json!(client.form_fields().await?)),
            Commands::Get { id } => self.output(&json!(client.get_record(*id).await?)),
            Commands::Records {
                query,
                fields,
                limit,
                total_count,
                by_id,
            } => {
                let query = RecordQuery::new(query.as_str())
                    .fields(fields.iter().filter(|f| !f.is_empty()).cloned())
                    .limit(RecordLimit::from_raw(*limit)?)
                    .total_count(*total_count);
                let set = if *by_id {
                    client.get_all_records_by_id(&query).await?
                } else {
                    client.get_records(&query).await?
                };
                info!("Fetched {} records", set.len());
                self.output(&json!(set))
            }
            Commands::Add { record } => {
                let record: Record = parse_json_arg(record)?;
                self.output(&json!(client.add_record(&record).await?))
            }
            Commands::AddMany { records } => {
                let records: Vec<Record> = parse_json_arg(records)?;
                self.output(&json!(client.add_records(&records).await?))
            }
            Commands::Update {
                id,
                key_field,
                key_value,
                record,
                revision,
            } => {
                let target = update_target(*id, key_field.as_deref(), key_value.as_deref())?;
                let record: Record = parse_json_arg(record)?;
                let revision = client.update_record(&target, &record, *revision).await?;
                self.output(&json!({ "revision": revision }))
            }
            Commands::UpdateMany { updates } => {
                let updates = parse_updates(updates)?;
                self.output(&json!({ "records": client.update_records(&updates).await? }))
            }
            Commands::Delete { ids, revisions } => {
                if !revisions.is_empty() && revisions.len() != ids.len() {
                    return Err(Error::invalid_value(
                        "revisions",
                        "must have one entry per id",
                    ));
                }
                let revisions = (!revisions.is_empty()).then_some(revisions.as_slice());
                client.delete_records(ids, revisions).await?;
                self.output(&json!({ "deleted": ids }))
            }
            Commands::Upload { file, url } => {
                let source = match (file, url) {
                    (Some(path), _) => FileSource::Path(path.clone()),
                    (None, Some(url)) => FileSource::Url(url.clone()),
                    (None, None) => return Err(Error::config("Either --file or --url is required")),
                };
                let file_key = client.upload_file(source).await?;
                self.output(&json!({ "fileKey": file_key }))
            }
            Commands::Download { file_key, output } => {
                let content = client.download_file(file_key).await?;
                match output {
                    Some(path) => {
                        tokio::fs::write(path, &content).await?;
                        info!("Wrote {} bytes to {}", content.len(), path.display());
                        self.output(&json!({
                            "path": path.display().to_string(),
                            "bytes": content.len()
                        }))
                    }
                    None => {
                        let mut stdout = std::io::stdout().lock();
                        stdout.write_all(&content)?;
                        stdout.flush()?;
                        Ok(())
                    }
                }
            }
        }
    }

    /// Merge the config file (if any) with flag and environment overrides
    pub fn resolve_config(&self) -> Result<ClientConfig> {
        let mut config = match &self.cli.config {
            Some(path) => load_config(path)?,
            None => ClientConfig::default(),
        };

        let cli = &self.cli;
        if let Some(domain) = &cli.domain {
            config.domain.clone_from(domain);
        }
        if let Some(app) = &cli.app {
            config.app.clone_from(app);
        }
        override_opt(&mut config.api_token, cli.api_token.as_ref());
        override_opt(&mut config.login_name, cli.login_name.as_ref());
        override_opt(&mut config.password, cli.password.as_ref());
        override_opt(&mut config.basic_auth_user, cli.basic_auth_user.as_ref());
        override_opt(&mut config.basic_auth_password, cli.basic_auth_password.as_ref());

        config.validate()?;
        Ok(config)
    }

    fn output(&self, value: &JsonValue) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}

fn override_opt(slot: &mut Option<String>, value: Option<&String>) {
    if let Some(value) = value {
        *slot = Some(value.clone());
    }
}

/// Parse an inline JSON argument, or the file it names with `@path`
fn parse_json_arg<T: serde::de::DeserializeOwned>(arg: &str) -> Result<T> {
    let text = match arg.strip_prefix('@') {
        Some(path) => read_arg_file(Path::new(path))?,
        None => arg.to_string(),
    };
    Ok(serde_json::from_str(&text)?)
}

fn read_arg_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            Error::Io(e)
        }
    })
}

fn update_target(
    id: Option<u64>,
    key_field: Option<&str>,
    key_value: Option<&str>,
) -> Result<UpdateTarget> {
    match (id, key_field, key_value) {
        (Some(id), _, _) => Ok(UpdateTarget::Id(id)),
        (None, Some(field), Some(value)) => Ok(UpdateTarget::Key(UpdateKey::new(field, value))),
        _ => Err(Error::config(
            "Either --id or --key-field with --key-value is required",
        )),
    }
}

/// One `update-many` entry as written on the command line
#[derive(Deserialize)]
struct UpdateEntry {
    #[serde(default)]
    id: Option<JsonValue>,
    #[serde(default, rename = "updateKey")]
    update_key: Option<UpdateKey>,
    record: Record,
    #[serde(default)]
    revision: Option<JsonValue>,
}

fn parse_updates(arg: &str) -> Result<Vec<RecordUpdate>> {
    let entries: Vec<UpdateEntry> = parse_json_arg(arg)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| {
            let update = match (entry.id, entry.update_key) {
                (Some(id), _) => RecordUpdate::by_id(numeric(&id, "id", i)?, entry.record),
                (None, Some(key)) => RecordUpdate::by_key(key, entry.record),
                (None, None) => {
                    return Err(Error::invalid_value(
                        "updates",
                        format!("entry {i} needs an id or an updateKey"),
                    ))
                }
            };
            match entry.revision {
                Some(rev) => Ok(update.revision(numeric(&rev, "revision", i)?)),
                None => Ok(update),
            }
        })
        .collect()
}

/// Kintone writes ids and revisions as strings; accept either form
fn numeric(value: &JsonValue, name: &str, index: usize) -> Result<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
        .ok_or_else(|| {
            Error::invalid_value("updates", format!("entry {index} has a non-numeric {name}"))
        })
}
