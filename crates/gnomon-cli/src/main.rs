//! Gnomon CLI - Command-line interface for construction scenes

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use gnomon_core::{ExportOptions, Scene};
use gnomon_engine::Engine;
use gnomon_math::Vector;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "gnomon")]
#[command(about = "Named geometric construction scenes for 3D rendering", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scene script and write the renderer document
    Build {
        /// Input script file
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file with export options
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Pretty-print the document
        #[arg(long)]
        pretty: bool,

        /// Omit the geometry and sdf convenience fields
        #[arg(long)]
        no_convenience: bool,
    },

    /// Run a scene script and report what it builds
    Check {
        /// Script file to check
        script: PathBuf,
    },

    /// Write a built-in demo scene
    Demo {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pretty-print the document
        #[arg(long)]
        pretty: bool,
    },
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays a clean document
    let stderr_layer = fmt::layer().with_writer(std::io::stderr);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(filter)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            input,
            output,
            config,
            pretty,
            no_convenience,
        } => {
            let mut options = load_options(config.as_deref())?;
            if pretty {
                options.pretty = true;
            }
            if no_convenience {
                options.include_convenience = false;
            }
            run_build(&input, output.as_deref(), &options)?;
        }
        Commands::Check { script } => {
            run_check(&script)?;
        }
        Commands::Demo { output, pretty } => {
            let options = ExportOptions::default().pretty(pretty);
            run_demo(output.as_deref(), &options)?;
        }
    }

    Ok(())
}

fn load_options(path: Option<&Path>) -> Result<ExportOptions> {
    let Some(path) = path else {
        return Ok(ExportOptions::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("Invalid config {}", path.display()))
}

fn write_document(engine: &Engine, output: Option<&Path>, options: &ExportOptions) -> Result<()> {
    match output {
        Some(path) => {
            let result = engine.export_to_file(path, options)?;
            eprintln!(
                "Wrote {} ({} points, {} shapes, {} planes)",
                result.path.display(),
                result.points,
                result.shapes,
                result.planes
            );
        }
        None => println!("{}", engine.export_json(options)?),
    }
    Ok(())
}

fn run_build(input: &Path, output: Option<&Path>, options: &ExportOptions) -> Result<()> {
    let mut engine = Engine::new();
    engine.load_script(input)?;
    write_document(&engine, output, options)
}

fn run_check(script: &Path) -> Result<()> {
    let mut engine = Engine::new();
    let loaded = engine.load_script(script)?;
    let scene = &loaded.scene;

    println!("{}: ok", script.display());
    println!("  points: {}", scene.point_count());
    println!("  shapes: {}", scene.shapes().len());
    println!("  planes: {}", scene.planes().len());
    println!("  lines:  {}", scene.lines().len());
    println!("  arrows: {}", scene.arrows().len());
    println!("  rotate: {}", scene.settings().rotate);
    Ok(())
}

/// Cube with its center, a diagonal section and a lifted apex
fn demo_scene() -> gnomon_core::Result<Scene> {
    let mut scene = Scene::new();
    scene.cube("ABCDEFGH")?;
    scene.mid_point("M", "AG")?;
    scene.section("ACG")?;

    // Two units above the center, one above the top face
    scene.point_from_vec("MT", 2.0 * Vector::Z, None)?;
    scene.line("TE")?;
    scene.line("TF")?;
    scene.arrow("MT")?;
    scene.rotate(0.5);
    Ok(scene)
}

fn run_demo(output: Option<&Path>, options: &ExportOptions) -> Result<()> {
    let scene = demo_scene()?;
    info!(points = scene.point_count(), "demo scene built");

    let mut engine = Engine::new();
    engine.set_scene(scene);
    write_document(&engine, output, options)
}
