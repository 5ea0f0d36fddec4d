//! Document export for the Gnomon engine
//!
//! Serializes a loaded scene to the renderer's JSON document and writes it
//! to disk.

use crate::scene::LoadedScene;
use anyhow::{Context, Result};
use gnomon_core::{ExportOptions, SceneDocument};
use std::path::{Path, PathBuf};
use tracing::info;

/// Summary of a completed export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Where the document was written
    pub path: PathBuf,

    /// Document size in bytes
    pub bytes: usize,

    pub points: usize,
    pub shapes: usize,
    pub planes: usize,
}

/// Serialize a loaded scene to JSON text
pub fn scene_to_json(loaded: &LoadedScene, options: &ExportOptions) -> Result<String> {
    let document = SceneDocument::from_scene(&loaded.scene, options)?;
    Ok(document.to_json(options.pretty)?)
}

/// Serialize a loaded scene and write it to `path`
pub fn export_scene(loaded: &LoadedScene, path: &Path, options: &ExportOptions) -> Result<ExportResult> {
    let document = SceneDocument::from_scene(&loaded.scene, options)?;
    let json = document.to_json(options.pretty)?;

    std::fs::write(path, &json)
        .with_context(|| format!("Failed to write scene document {}", path.display()))?;

    info!(path = %path.display(), bytes = json.len(), "scene document written");

    Ok(ExportResult {
        path: path.to_path_buf(),
        bytes: json.len(),
        points: document.points.len(),
        shapes: document.shapes.len(),
        planes: document.planes.len(),
    })
}
