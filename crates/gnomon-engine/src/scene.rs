//! Loaded scene for the Gnomon engine
//!
//! Pairs a finished construction [`Scene`] with the script it came from, so
//! the engine can reload it and name it in reports.

use gnomon_core::Scene;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when working with loaded scenes
#[derive(Error, Debug)]
pub enum SceneError {
    /// No scene is currently loaded
    #[error("No scene loaded")]
    NoScene,

    /// Scene has no associated source file
    #[error("Scene has no source file")]
    NoSourceFile,
}

/// A constructed scene and, optionally, the script file that built it
#[derive(Debug, Clone, Default)]
pub struct LoadedScene {
    pub scene: Scene,

    /// Source file path (if loaded from file)
    pub source_path: Option<PathBuf>,
}

impl LoadedScene {
    pub fn new(scene: Scene) -> Self {
        Self {
            scene,
            source_path: None,
        }
    }

    pub fn with_source(scene: Scene, path: PathBuf) -> Self {
        Self {
            scene,
            source_path: Some(path),
        }
    }

    pub fn has_source(&self) -> bool {
        self.source_path.is_some()
    }

    /// Get the source file name (without path)
    pub fn source_name(&self) -> Option<String> {
        self.source_path
            .as_ref()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_creation() {
        let loaded = LoadedScene::new(Scene::new());
        assert!(!loaded.has_source());
        assert!(loaded.source_name().is_none());
    }

    #[test]
    fn test_scene_with_source() {
        let loaded = LoadedScene::with_source(Scene::new(), PathBuf::from("/path/to/cube.rhai"));
        assert!(loaded.has_source());
        assert_eq!(loaded.source_name(), Some("cube.rhai".to_string()));
    }
}
