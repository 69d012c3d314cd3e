//! File attachment upload and download

use super::{decode, read_json, take_field, write_result, KintoneClient, FILE_PATH};
use crate::error::{Error, Result};
use crate::http::RequestConfig;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use std::path::PathBuf;
use tracing::debug;

/// Where the bytes of an upload come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// A local file
    Path(PathBuf),
    /// Bytes already in memory
    Bytes {
        /// File name sent to Kintone
        file_name: String,
        /// MIME type; guessed from the file name when absent
        content_type: Option<String>,
        /// File content
        content: Vec<u8>,
    },
    /// A remote file fetched before uploading
    Url(String),
}

/// A file loaded into memory, ready to be sent
struct LoadedFile {
    file_name: String,
    content_type: String,
    content: Vec<u8>,
}

fn guess_content_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_or_octet_stream()
        .to_string()
}

impl KintoneClient {
    /// Upload a file and return the file key to reference it from a record
    pub async fn upload_file(&self, source: FileSource) -> Result<String> {
        self.app_id()?;
        let file = self.load_source(source).await?;
        debug!(
            "Uploading {} ({}, {} bytes)",
            file.file_name,
            file.content_type,
            file.content.len()
        );

        let part = Part::bytes(file.content)
            .file_name(file.file_name)
            .mime_str(&file.content_type)?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post_with_config(FILE_PATH, RequestConfig::new().multipart(form))
            .await?;
        decode(take_field(write_result(response).await?, "fileKey")?)
    }

    /// Download an attached file by its file key
    pub async fn download_file(&self, file_key: &str) -> Result<Bytes> {
        self.app_id()?;
        let response = self
            .http
            .get_with_config(FILE_PATH, RequestConfig::new().query("fileKey", file_key))
            .await?;

        if !response.status().is_success() {
            let (status, body) = read_json(response).await?;
            return Err(Error::from_read_body(status, &body));
        }
        Ok(response.bytes().await?)
    }

    async fn load_source(&self, source: FileSource) -> Result<LoadedFile> {
        match source {
            FileSource::Path(path) => {
                let content = tokio::fs::read(&path).await.map_err(|e| {
                    if e.kind() == std::io::ErrorKind::NotFound {
                        Error::FileNotFound {
                            path: path.display().to_string(),
                        }
                    } else {
                        Error::Io(e)
                    }
                })?;
                let file_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .unwrap_or("file")
                    .to_string();
                Ok(LoadedFile {
                    content_type: guess_content_type(&file_name),
                    file_name,
                    content,
                })
            }

            FileSource::Bytes {
                file_name,
                content_type,
                content,
            } => Ok(LoadedFile {
                content_type: content_type.unwrap_or_else(|| guess_content_type(&file_name)),
                file_name,
                content,
            }),

            FileSource::Url(url) => {
                let parsed = url::Url::parse(&url)?;
                let file_name = parsed
                    .path_segments()
                    .and_then(|mut segments| segments.next_back())
                    .filter(|s| !s.is_empty())
                    .unwrap_or("file")
                    .to_string();

                // Fetched without Kintone credentials
                let response = self.http.inner().get(parsed).send().await?;
                let status = response.status();
                if !status.is_success() {
                    let body = response.text().await?;
                    return Err(Error::http_status(status.as_u16(), body));
                }
                let content_type = response
                    .headers()
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map_or_else(|| guess_content_type(&file_name), str::to_string);
                let content = response.bytes().await?.to_vec();

                Ok(LoadedFile {
                    file_name,
                    content_type,
                    content,
                })
            }
        }
    }
}
