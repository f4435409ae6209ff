//! Document upload endpoint

use axum::{
    extract::{Multipart, State},
    Json,
};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::response::{UploadResponse, UploadedFile};

/// POST /upload - write uploaded files to the data directory and ingest them.
///
/// Uploaded files carry no metadata tag, unlike the startup loader's
/// area-tagged batch. Any failure aborts the request with a 500; files
/// already processed stay stored.
pub async fn upload_files(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    let mut files = Vec::new();
    let data_dir = state.config().ingest.data_dir.clone();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::internal(format!("Failed to read multipart field: {}", e)))?
    {
        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| format!("file_{}.bin", Uuid::new_v4()));

        let data = field
            .bytes()
            .await
            .map_err(|e| Error::internal(format!("Failed to read file '{}': {}", filename, e)))?;

        tracing::info!("Processing upload: {} ({} bytes)", filename, data.len());

        tokio::fs::create_dir_all(&data_dir).await?;
        let path = data_dir.join(&filename);
        tokio::fs::write(&path, &data).await?;

        state.pipeline().ingest_path(&path, &filename, None).await?;

        files.push(UploadedFile {
            filename,
            status: "processed".to_string(),
        });
    }

    Ok(Json(UploadResponse {
        message: "files processed".to_string(),
        files,
    }))
}
