//! Gnomon Engine - Unified runtime for scripting and export
//!
//! The Engine is a thin orchestration layer over gnomon-script and
//! gnomon-core: it runs scene scripts, keeps the resulting scene, and writes
//! the renderer document.
//!
//! ## Example
//!
//! ```
//! use gnomon_engine::{Engine, ExportOptions};
//!
//! let mut engine = Engine::new();
//! engine.run_script(r#"cube("ABCDEFGH"); section("ACG");"#)?;
//!
//! let json = engine.export_json(&ExportOptions::default())?;
//! assert!(json.contains("faces_data"));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod export;
pub mod scene;

use anyhow::Result;
use gnomon_script::ScriptEngine;
use scene::LoadedScene;
use std::path::Path;
use tracing::info;

// Re-export commonly used types from dependencies
pub use gnomon_core::{ExportOptions, Scene, SceneDocument};
pub use gnomon_script::ConstructionFailure;

// Re-export our own types
pub use export::ExportResult;
pub use scene::SceneError;

/// The main Gnomon engine
pub struct Engine {
    /// The underlying Rhai script executor
    scripting: ScriptEngine,

    /// The most recently constructed scene
    current_scene: Option<LoadedScene>,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            scripting: ScriptEngine::new(),
            current_scene: None,
        }
    }

    // ========================================================================
    // Script Operations
    // ========================================================================

    /// Load and execute a script from a file path
    pub fn load_script(&mut self, path: &Path) -> Result<&LoadedScene> {
        let scene = self.scripting.eval_scene_file(path)?;
        info!(path = %path.display(), points = scene.point_count(), "scene script loaded");
        Ok(&*self
            .current_scene
            .insert(LoadedScene::with_source(scene, path.to_path_buf())))
    }

    /// Execute a script from a string
    pub fn run_script(&mut self, code: &str) -> Result<&LoadedScene> {
        let scene = self.scripting.eval_scene(code)?;
        Ok(&*self.current_scene.insert(LoadedScene::new(scene)))
    }

    /// Adopt a scene built directly through the Rust API
    pub fn set_scene(&mut self, scene: Scene) -> &LoadedScene {
        self.current_scene.insert(LoadedScene::new(scene))
    }

    /// Re-run the current scene's source script
    pub fn reload(&mut self) -> Result<&LoadedScene> {
        let path = self
            .current_scene
            .as_ref()
            .ok_or(SceneError::NoScene)?
            .source_path
            .clone()
            .ok_or(SceneError::NoSourceFile)?;
        self.load_script(&path)
    }

    /// Compile a script to check for syntax errors without executing
    pub fn compile(&self, code: &str) -> Result<()> {
        self.scripting.compile(code).map(|_| ())
    }

    // ========================================================================
    // Scene Access
    // ========================================================================

    pub fn scene(&self) -> Option<&LoadedScene> {
        self.current_scene.as_ref()
    }

    pub fn has_scene(&self) -> bool {
        self.current_scene.is_some()
    }

    pub fn clear_scene(&mut self) {
        self.current_scene = None;
    }

    fn require_scene(&self) -> Result<&LoadedScene> {
        Ok(self.current_scene.as_ref().ok_or(SceneError::NoScene)?)
    }

    // ========================================================================
    // Export
    // ========================================================================

    /// Serialize the current scene to the renderer document
    pub fn export_json(&self, options: &ExportOptions) -> Result<String> {
        export::scene_to_json(self.require_scene()?, options)
    }

    /// Write the current scene's document to a file
    pub fn export_to_file(&self, path: &Path, options: &ExportOptions) -> Result<ExportResult> {
        export::export_scene(self.require_scene()?, path, options)
    }

    // ========================================================================
    // Access to underlying components (for advanced use)
    // ========================================================================

    pub fn scripting(&self) -> &ScriptEngine {
        &self.scripting
    }

    pub fn scripting_mut(&mut self) -> &mut ScriptEngine {
        &mut self.scripting
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
