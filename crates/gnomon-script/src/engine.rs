//! Script engine for evaluating Rhai scene scripts

use crate::scene_api::{ConstructionFailure, SharedScene, register_scene_api, register_vector_api};
use anyhow::{Result, anyhow};
use gnomon_core::Scene;
use rhai::{AST, Engine, EvalAltResult};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Gnomon script engine.
///
/// Owns a Rhai engine with the vector and scene APIs registered against one
/// shared [`Scene`]. Each [`ScriptEngine::eval_scene`] call starts from an
/// empty scene and returns what the script built.
pub struct ScriptEngine {
    engine: Engine,
    scene: SharedScene,
}

impl ScriptEngine {
    pub fn new() -> Self {
        let scene = SharedScene::default();
        let mut engine = Engine::new();

        register_vector_api(&mut engine);
        register_scene_api(&mut engine, &scene);

        engine.set_max_expr_depths(64, 64);

        Self { engine, scene }
    }

    /// Evaluate a script against a fresh scene and return the result
    ///
    /// # Example
    ///
    /// ```
    /// use gnomon_script::ScriptEngine;
    ///
    /// let engine = ScriptEngine::new();
    /// let scene = engine.eval_scene(r#"square("ABCD"); line("AC");"#)?;
    /// assert_eq!(scene.point_count(), 4);
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn eval_scene(&self, script: &str) -> Result<Scene> {
        self.reset();
        self.engine
            .run(script)
            .map_err(|e| script_error("Failed to evaluate script", &e))?;

        let scene = self.scene();
        debug!(
            points = scene.point_count(),
            shapes = scene.shapes().len(),
            "script evaluated"
        );
        Ok(scene)
    }

    /// Evaluate a script file against a fresh scene
    pub fn eval_scene_file(&self, path: &Path) -> Result<Scene> {
        let script = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("Failed to read script file {}: {}", path.display(), e))?;

        self.eval_scene(&script)
            .map_err(|e| e.context(format!("Error in script {}", path.display())))
    }

    /// Run a script on top of the current scene without resetting it
    pub fn run(&self, script: &str) -> Result<()> {
        self.engine
            .run(script)
            .map_err(|e| script_error("Failed to run script", &e))?;
        Ok(())
    }

    /// Compile a script to check for syntax errors without running it
    pub fn compile(&self, script: &str) -> Result<AST> {
        self.engine
            .compile(script)
            .map_err(|e| anyhow!("Script compilation failed: {}", e))
    }

    /// Snapshot of the scene as the scripts have left it
    pub fn scene(&self) -> Scene {
        self.scene.lock().clone()
    }

    /// Handle to the live scene the registered functions mutate
    pub fn shared_scene(&self) -> SharedScene {
        Arc::clone(&self.scene)
    }

    /// Drop everything registered so far
    pub fn reset(&self) {
        *self.scene.lock() = Scene::new();
    }

    /// Get a reference to the underlying Rhai engine
    pub fn inner(&self) -> &Engine {
        &self.engine
    }

    /// Get a mutable reference to the underlying Rhai engine
    pub fn inner_mut(&mut self) -> &mut Engine {
        &mut self.engine
    }
}

impl Default for ScriptEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Keep construction failures as the error source so callers can downcast
fn script_error(context: &'static str, err: &EvalAltResult) -> anyhow::Error {
    match ConstructionFailure::from_eval_error(err) {
        Some(failure) => {
            let position = err.position();
            anyhow::Error::new(failure).context(format!("{} ({})", context, position))
        }
        None => anyhow!("{}: {}", context, err),
    }
}
