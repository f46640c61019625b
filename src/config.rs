use std::fs;
use std::path::PathBuf;

use crate::pipeline::{self, OutputFormat};
use directories::{BaseDirs, ProjectDirs};
use serde::Deserialize;

const CONFIG_FILE_NAME: &str = "pixpress.toml";

/// Startup values for the transform parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TransformDefaults {
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub format: OutputFormat,
}

impl Default for TransformDefaults {
    fn default() -> Self {
        Self {
            width: pipeline::DEFAULT_WIDTH,
            height: pipeline::DEFAULT_HEIGHT,
            quality: pipeline::DEFAULT_QUALITY,
            format: OutputFormat::Jpeg,
        }
    }
}

impl TransformDefaults {
    /// Clamp configured values into the ranges the pipeline accepts.
    pub fn sanitized(self) -> Self {
        Self {
            width: self.width.max(1),
            height: self.height.max(1),
            quality: self.quality.clamp(pipeline::QUALITY_MIN, pipeline::QUALITY_MAX),
            format: self.format,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub defaults: TransformDefaults,
    pub image_limits: ImageLimits,
    /// Drop the loaded image and all derived buffers once an export lands
    /// on disk, so no image data outlives the interaction.
    pub clear_after_export: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: TransformDefaults::default(),
            image_limits: ImageLimits::default(),
            clear_after_export: true,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        for path in Self::candidate_paths() {
            if let Ok(contents) = fs::read_to_string(&path) {
                match toml::from_str::<Self>(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {}: {err}", path.display());
                    }
                }
            }
        }
        Self::default()
    }

    pub fn effective_image_limits(&self) -> ImageLimits {
        self.image_limits.sanitized()
    }

    pub fn effective_defaults(&self) -> TransformDefaults {
        self.defaults.sanitized()
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(exe_path) = std::env::current_exe()
            && let Some(dir) = exe_path.parent()
        {
            paths.push(dir.join(CONFIG_FILE_NAME));
        }

        if let Some(proj_dirs) = ProjectDirs::from("dev", "Pixpress", "Pixpress") {
            paths.push(proj_dirs.config_dir().join(CONFIG_FILE_NAME));
        }

        if let Some(base_dirs) = BaseDirs::new() {
            paths.push(
                base_dirs
                    .config_dir()
                    .join("pixpress")
                    .join(CONFIG_FILE_NAME),
            );
        }

        paths
    }
}

/// Hard ceilings applied while decoding, so a hostile or accidental upload
/// cannot exhaust memory.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageLimits {
    pub image_dim: u32,
    pub total_pixels: u64,
    pub alloc_bytes: u64,
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self {
            image_dim: 12_000,
            total_pixels: 80_000_000,       // ~80 MP
            alloc_bytes: 512 * 1024 * 1024, // 512 MiB
        }
    }
}

impl ImageLimits {
    pub fn sanitized(&self) -> Self {
        // Clamp to reasonable operating bounds to avoid pathological configs.
        let dim = self.image_dim.clamp(64, 100_000);
        let pixels = self.total_pixels.clamp(1_000_000, 5_000_000_000); // 1 MP .. 5 GP
        let alloc = self
            .alloc_bytes
            .clamp(8 * 1024 * 1024, 8 * 1024 * 1024 * 1024); // 8 MiB .. 8 GiB
        Self {
            image_dim: dim,
            total_pixels: pixels,
            alloc_bytes: alloc,
        }
    }
}
