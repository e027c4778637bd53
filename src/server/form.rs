//! Request body extraction and classification for `POST /upload`.

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Form;

use crate::ingestion::{DatabaseParams, IngestionFormat};

/// Name of the multipart part carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// A file part with a non-empty filename.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// Filename as sent by the client. Only used to pick the format.
    pub file_name: String,
    /// Raw file content.
    pub bytes: Bytes,
}

/// Everything `POST /upload` reads from the body.
///
/// Multipart and URL-encoded bodies are both accepted; any other content type yields an empty
/// form (which classifies as [`ProfileRequest::Invalid`]). Text fields keep their first value.
#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    /// The `file` part, if one with a non-empty filename was sent.
    pub file: Option<UploadedFile>,
    /// Text fields by name.
    pub fields: HashMap<String, String>,
}

/// What an upload request asks for, decided once from the form.
#[derive(Debug, Clone)]
pub enum ProfileRequest {
    /// Profile an uploaded `.csv` / `.xlsx` / `.XLSX` file.
    File {
        file: UploadedFile,
        format: IngestionFormat,
    },
    /// A file was sent but its extension is not supported.
    UnsupportedFile { file_name: String },
    /// Profile a database table.
    Database {
        params: DatabaseParams,
        table_name: String,
    },
    /// Neither a file nor complete database fields.
    Invalid,
}

impl UploadForm {
    /// Text field value as sent, possibly empty.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Decide what the request asks for. A file always takes precedence over database fields.
    pub fn classify(self) -> ProfileRequest {
        if let Some(file) = self.file {
            return match IngestionFormat::from_file_name(&file.file_name) {
                Some(format) => ProfileRequest::File { file, format },
                None => ProfileRequest::UnsupportedFile {
                    file_name: file.file_name,
                },
            };
        }

        let (Some(db_name), Some(username), Some(password), Some(table_name)) = (
            self.field("db_name"),
            self.field("username"),
            self.field("password"),
            self.field("table_name"),
        ) else {
            return ProfileRequest::Invalid;
        };

        // Presence is enough: an empty password is a valid login.
        let mut params = DatabaseParams::new(db_name, username, password);
        if let Some(host) = self.field("host").filter(|h| !h.is_empty()) {
            params = params.with_host(host);
        }
        ProfileRequest::Database {
            params,
            table_name: table_name.to_string(),
        }
    }

    async fn from_multipart(mut multipart: Multipart) -> Result<Self, Response> {
        let mut form = Self::default();
        while let Some(field) = multipart.next_field().await.map_err(IntoResponse::into_response)? {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    // Empty filenames are what browsers send for an untouched file input.
                    if name != FILE_FIELD || file_name.is_empty() || form.file.is_some() {
                        continue;
                    }
                    let bytes = field.bytes().await.map_err(IntoResponse::into_response)?;
                    form.file = Some(UploadedFile { file_name, bytes });
                }
                None => {
                    let value = field.text().await.map_err(IntoResponse::into_response)?;
                    form.fields.entry(name).or_insert(value);
                }
            }
        }
        Ok(form)
    }
}

impl<S> FromRequest<S> for UploadForm
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Self::from_multipart(multipart).await
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<HashMap<String, String>>::from_request(req, state)
                .await
                .map_err(IntoResponse::into_response)?;
            Ok(Self { file: None, fields })
        } else {
            Ok(Self::default())
        }
    }
}
