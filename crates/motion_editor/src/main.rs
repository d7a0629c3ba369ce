// SPDX-License-Identifier: MIT OR Apache-2.0
//! Command-line front end of the motion editor.
//!
//! `render` samples a scene through the frame exporter into a recording
//! canvas; `inspect` prints the object tree.

use clap::{Parser, Subcommand};
use motion_editor::{export_frames, ConfigError, EditorConfig, ExportError, ExportSettings, FrameInfo, FrameSink};
use motion_scene::{ObjectContainer, RecordingCanvas, Registry, Scene, SceneObjectInfo, SerializeError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "motion_editor=debug";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene through the frame exporter
    Render {
        /// Scene JSON snapshot
        #[arg(value_name = "SCENE")]
        scene: PathBuf,

        /// Editor configuration (RON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Stop after this many frames
        #[arg(long)]
        frames: Option<u64>,
    },
    /// Print the object tree of a scene
    Inspect {
        /// Scene JSON snapshot
        #[arg(value_name = "SCENE")]
        scene: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Scene(#[from] SerializeError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Logs the draw calls of each frame and drops them
#[derive(Default)]
struct DrawCountSink {
    total: usize,
}

impl FrameSink<RecordingCanvas> for DrawCountSink {
    fn consume(&mut self, frame: FrameInfo, canvas: &mut RecordingCanvas) -> Result<(), ExportError> {
        let draws = canvas.take_commands().len();
        self.total += draws;
        tracing::info!(
            frame = frame.index,
            timestamp_us = frame.timestamp_us,
            duration_us = frame.duration_us,
            draws,
            "Frame"
        );
        Ok(())
    }
}

fn load_scene(path: &Path, registry: &Registry) -> Result<Scene, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Scene::from_json(&json, registry)?)
}

fn render(scene_path: &Path, config_path: Option<&Path>, frames: Option<u64>) -> Result<(), CliError> {
    let registry = Registry::with_builtin();
    let scene = load_scene(scene_path, &registry)?;
    let config = match config_path {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    let settings = ExportSettings::new(&config.export, &scene)?.with_max_frames(frames);
    let mut canvas = RecordingCanvas::new();
    let mut sink = DrawCountSink::default();
    let exported = export_frames(&scene, &settings, &mut canvas, &mut sink)?;

    tracing::info!(frames = exported, draws = sink.total, "Render complete");
    Ok(())
}

fn inspect(scene_path: &Path) -> Result<(), CliError> {
    let registry = Registry::with_builtin();
    let scene = load_scene(scene_path, &registry)?;

    tracing::info!(
        uid = %scene.uid(),
        name = scene.metadata.name.as_deref().unwrap_or("<unnamed>"),
        width = scene.metadata.size.x,
        height = scene.metadata.size.y,
        duration_ms = scene.duration(),
        "Scene"
    );
    scene.objects().walk(&mut |depth: usize, info: &SceneObjectInfo| {
        let type_name = registry
            .id_of_object(info.object.as_ref())
            .map_or_else(|| "?".to_owned(), |(addon, id)| format!("{addon}:{id}"));
        tracing::info!(
            "{:indent$}{} [{}] {}..{}ms",
            "",
            info.name,
            type_name,
            info.time_start,
            info.time_end,
            indent = depth * 2
        );
    });
    Ok(())
}

/// `directives` when they parse, the default filter otherwise
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting motion editor v{}", env!("CARGO_PKG_VERSION"));

    let result = match &cli.command {
        Command::Render { scene, config, frames } => render(scene, config.as_deref(), *frames),
        Command::Inspect { scene } => inspect(scene),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_filter_falls_back_to_default() {
        assert_eq!(log_filter(None).to_string(), DEFAULT_LOG_FILTER);
        assert_eq!(log_filter(Some("motion_editor=loud")).to_string(), DEFAULT_LOG_FILTER);
        assert_eq!(log_filter(Some("warn")).to_string(), "warn");
    }
}
