//! Startup batch ingestion
//!
//! Scans `<data_dir>/input` for one subdirectory per "area" and ingests every
//! file found underneath, tagged with `{area: <subdirectory name>}`. A
//! missing input directory is tolerated; a file that fails to ingest is
//! logged and skipped so the rest of the batch still loads.

use serde_json::{json, Map};
use std::path::Path;
use walkdir::WalkDir;

use super::pipeline::IngestPipeline;

/// Ingest the initial document tree. Returns the number of files loaded.
pub async fn load_initial_documents(pipeline: &IngestPipeline, input_dir: &Path) -> usize {
    if !input_dir.is_dir() {
        tracing::info!(
            "Input directory {} not found, skipping initial load",
            input_dir.display()
        );
        return 0;
    }

    let mut loaded = 0usize;

    let mut areas: Vec<_> = match std::fs::read_dir(input_dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .filter(|e| e.path().is_dir())
            .collect(),
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", input_dir.display(), e);
            return 0;
        }
    };
    areas.sort_by_key(|e| e.file_name());

    for area in areas {
        let area_name = area.file_name().to_string_lossy().to_string();
        tracing::info!("Loading area: {}", area_name);

        for entry in WalkDir::new(area.path())
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
        {
            let filename = entry.file_name().to_string_lossy().to_string();

            let mut metadata = Map::new();
            metadata.insert("area".to_string(), json!(area_name));

            match pipeline
                .ingest_path(entry.path(), &filename, Some(metadata))
                .await
            {
                Ok(chunks) => {
                    tracing::debug!("  loaded {} ({} chunks)", filename, chunks);
                    loaded += 1;
                }
                Err(e) => {
                    tracing::warn!("  failed to load {}: {}", filename, e);
                }
            }
        }
    }

    tracing::info!("Initial load complete: {} files", loaded);
    loaded
}
