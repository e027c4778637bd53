//! HTTP route handlers.

use axum::extract::State;
use axum::Json;

use crate::error::IngestionError;
use crate::ingestion::{ingest_mysql_table, DatabaseParams, IngestionFormat, IngestionOptions};
use crate::profiling::{profile_source, ProfileResponse, TableSource};

use super::error::AppError;
use super::form::{ProfileRequest, UploadForm, UploadedFile};
use super::storage::store_upload;
use super::AppState;

// ---------------------------------------------------------------------------
// POST /upload
// ---------------------------------------------------------------------------

pub async fn upload(
    State(state): State<AppState>,
    form: UploadForm,
) -> Result<Json<ProfileResponse>, AppError> {
    let response = match form.classify() {
        ProfileRequest::File { file, format } => profile_upload(&state, file, format).await?,
        ProfileRequest::UnsupportedFile { file_name } => {
            tracing::info!(%file_name, "rejecting upload with unsupported extension");
            ProfileResponse::unsupported_format()
        }
        ProfileRequest::Database { params, table_name } => {
            profile_table(&state, &params, &table_name).await?
        }
        ProfileRequest::Invalid => {
            tracing::info!("rejecting upload without file or database fields");
            ProfileResponse::invalid_request()
        }
    };
    Ok(Json(response))
}

async fn profile_upload(
    state: &AppState,
    file: UploadedFile,
    format: IngestionFormat,
) -> Result<ProfileResponse, AppError> {
    let path = store_upload(&state.config.upload_dir, format, &file.bytes)
        .await
        .map_err(IngestionError::from)?;
    tracing::debug!(
        file_name = %file.file_name,
        stored = %path.display(),
        bytes = file.bytes.len(),
        "stored upload"
    );

    let mut options = state.ingestion.clone();
    options.format = Some(format);
    run_profile(TableSource::FromPath(path), options).await
}

async fn profile_table(
    state: &AppState,
    params: &DatabaseParams,
    table_name: &str,
) -> Result<ProfileResponse, AppError> {
    match ingest_mysql_table(params, table_name, &state.ingestion).await {
        Ok(ds) => run_profile(TableSource::FromTable(ds), state.ingestion.clone()).await,
        Err(IngestionError::InvalidIdentifier { name }) => {
            tracing::info!(table_name = %name, "rejecting invalid table name");
            Ok(ProfileResponse::invalid_table_name())
        }
        Err(e) => Err(e.into()),
    }
}

/// Parse and profile on the blocking pool; both are CPU/disk bound.
async fn run_profile(
    source: TableSource,
    options: IngestionOptions,
) -> Result<ProfileResponse, AppError> {
    let response = tokio::task::spawn_blocking(move || profile_source(source, &options))
        .await
        .map_err(|e| AppError::internal(format!("profiling task failed: {e}")))??;
    Ok(response)
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
