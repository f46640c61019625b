//! Main egui/eframe application state and UI orchestration.
//!
//! The shell owns one loaded image at a time, feeds it through the
//! transform pipeline for previews and exports, and discards every buffer
//! when the session is cleared.

use crate::config::AppConfig;
use crate::image_info::ImageMeta;
use crate::pipeline::{EncodedArtifact, SourceImage, TransformParams};
use egui::{ColorImage, Context, Key, TextureHandle, TextureOptions};

use egui_file_dialog::{DialogState, FileDialog};
use std::{
    path::{Path, PathBuf},
    sync::Arc,
    sync::mpsc::Receiver,
    time::SystemTime,
};

mod clipboard;
mod loader;
mod preview;
mod ui;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

enum ImageLoadRequest {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

struct PendingImageTask {
    rx: Receiver<ImageLoadResult>,
    meta: PendingImageMeta,
}

enum ImageLoadResult {
    Success(SourceImage),
    Error(String),
}

#[derive(Clone)]
enum PendingImageMeta {
    Path {
        path: PathBuf,
    },
    DroppedBytes {
        name: Option<String>,
        byte_len: usize,
        last_modified: Option<SystemTime>,
    },
}

impl PendingImageMeta {
    fn description(&self) -> String {
        match self {
            Self::Path { path } => path
                .file_name()
                .and_then(|s| s.to_str())
                .map_or_else(|| path.display().to_string(), str::to_string),
            Self::DroppedBytes { name, .. } => name
                .as_deref()
                .map_or_else(|| "dropped bytes".to_string(), str::to_string),
        }
    }

    fn into_image_meta(self) -> ImageMeta {
        match self {
            Self::Path { path } => ImageMeta::from_path(&path),
            Self::DroppedBytes {
                name,
                byte_len,
                last_modified,
            } => ImageMeta::from_dropped_bytes(name.as_deref(), byte_len, last_modified),
        }
    }
}

/// The decoded raster kept for the session plus its display texture.
struct SourceState {
    image: Arc<SourceImage>,
    size: [usize; 2],
    texture: TextureHandle,
}

/// Resized raster texture, tagged with the dimensions that produced it.
struct PreviewState {
    size: [usize; 2],
    texture: TextureHandle,
    width: u32,
    height: u32,
}

struct PendingPreviewTask {
    rx: Receiver<ColorImage>,
    width: u32,
    height: u32,
}

#[derive(Debug)]
enum NativeDialog {
    Open(FileDialog),
    SaveArtifact {
        dialog: FileDialog,
        artifact: EncodedArtifact,
    },
}

fn safe_usize_to_f32(value: usize) -> f32 {
    let clamped = value.min(u32::MAX as usize);
    let as_u32 = u32::try_from(clamped).unwrap_or(u32::MAX);
    #[allow(clippy::cast_precision_loss)]
    {
        as_u32 as f32
    }
}

fn color_image_of(image: &image::DynamicImage) -> ColorImage {
    let rgba = image.to_rgba8();
    let (w, h) = rgba.dimensions();
    ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &rgba)
}

/// Top-level application state for the Pixpress UI.
pub struct PixpressApp {
    config: AppConfig,
    params: TransformParams,
    source: Option<SourceState>,
    source_meta: Option<ImageMeta>,
    preview: Option<PreviewState>,
    preview_dirty: bool,
    pending_image_task: Option<PendingImageTask>,
    pending_preview_task: Option<PendingPreviewTask>,
    active_dialog: Option<NativeDialog>,
    last_image_dir: Option<PathBuf>,
    last_export_dir: Option<PathBuf>,
    last_status: Option<String>,
    side_open: bool,
    info_window_open: bool,
}

impl Default for PixpressApp {
    fn default() -> Self {
        let config = AppConfig::load();
        let defaults = config.effective_defaults();
        Self {
            params: TransformParams {
                width: defaults.width,
                height: defaults.height,
                quality: defaults.quality,
                format: defaults.format,
            },
            config,
            source: None,
            source_meta: None,
            preview: None,
            preview_dirty: false,
            pending_image_task: None,
            pending_preview_task: None,
            active_dialog: None,
            last_image_dir: None,
            last_export_dir: None,
            last_status: None,
            side_open: true,
            info_window_open: false,
        }
    }
}

impl PixpressApp {
    /// Create a new app and optionally queue an initial image load.
    pub fn new_with_initial_path(_ctx: &Context, initial_path: Option<&Path>) -> Self {
        let mut app = Self::default();
        if let Some(p) = initial_path {
            app.start_loading_image_from_path(p.to_owned());
        }
        app
    }

    fn set_status(&mut self, msg: impl Into<String>) {
        self.last_status = Some(msg.into());
    }

    const fn has_image(&self) -> bool {
        self.source.is_some()
    }

    /// Install a freshly decoded image as the session source and queue a
    /// preview for the current parameters.
    fn set_loaded_source(&mut self, ctx: &Context, source: SourceImage, meta: Option<ImageMeta>) {
        let size = [source.width() as usize, source.height() as usize];
        let texture = ctx.load_texture(
            "source_image",
            color_image_of(source.image()),
            TextureOptions::LINEAR,
        );
        self.source = Some(SourceState {
            image: Arc::new(source),
            size,
            texture,
        });
        self.source_meta = meta;
        self.preview = None;
        self.preview_dirty = true;
    }

    const fn mark_preview_dirty(&mut self) {
        self.preview_dirty = true;
    }

    /// Drop the source raster, previews, artifact buffers, and pending
    /// work so no image data outlives the interaction.
    fn clear_session(&mut self) {
        self.source = None;
        self.source_meta = None;
        self.preview = None;
        self.preview_dirty = false;
        self.pending_image_task = None;
        self.pending_preview_task = None;
        if matches!(self.active_dialog, Some(NativeDialog::SaveArtifact { .. })) {
            self.active_dialog = None;
        }
        self.set_status("Session cleared.");
    }

    pub(crate) fn remember_image_dir_from_path(&mut self, path: &Path) {
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        self.last_image_dir = Some(dir);
    }

    pub(crate) fn remember_export_dir_from_path(&mut self, path: &Path) {
        let dir = path
            .parent()
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
        self.last_export_dir = Some(dir);
    }

    fn write_artifact(path: &Path, artifact: &EncodedArtifact) -> std::io::Result<()> {
        std::fs::write(path, &artifact.bytes)
    }

    fn finish_export(&mut self, path: &Path, artifact: &EncodedArtifact) {
        match Self::write_artifact(path, artifact) {
            Ok(()) => {
                self.remember_export_dir_from_path(path);
                let name = path
                    .file_name()
                    .and_then(|s| s.to_str())
                    .map_or_else(|| artifact.file_name.clone(), str::to_string);
                if self.config.clear_after_export {
                    self.clear_session();
                    self.set_status(format!("Exported {name}. Session cleared."));
                } else {
                    self.set_status(format!("Exported {name}."));
                }
            }
            Err(err) => self.set_status(format!("Export failed: {err}")),
        }
    }
}

impl eframe::App for PixpressApp {
    fn ui(&mut self, _ui: &mut egui::Ui, _frame: &mut eframe::Frame) {}

    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        self.poll_image_loader(ctx);
        self.poll_preview_job(ctx);
        self.ensure_preview_job();

        // Global hotkeys (ignored while typing in text fields)
        let wants_kb = ctx.wants_keyboard_input();
        if !wants_kb {
            // Ctrl/Cmd + B: toggle side panel
            if ctx.input(|i| i.key_pressed(Key::B) && i.modifiers.command) {
                self.side_open = !self.side_open;
            }
            // Ctrl/Cmd + O: open image
            if self.active_dialog.is_none()
                && ctx.input(|i| i.key_pressed(Key::O) && i.modifiers.command)
            {
                self.open_image_dialog();
            }
            // Ctrl/Cmd + V: paste image from clipboard
            if self.active_dialog.is_none()
                && ctx.input(|i| i.key_pressed(Key::V) && i.modifiers.command)
            {
                self.paste_image_from_clipboard(ctx);
            }
            // Ctrl/Cmd + E: export resized image
            if self.active_dialog.is_none()
                && self.has_image()
                && ctx.input(|i| i.key_pressed(Key::E) && i.modifiers.command)
            {
                self.start_export();
            }
            // Ctrl/Cmd + I: show image info
            if self.has_image() && ctx.input(|i| i.key_pressed(Key::I) && i.modifiers.command) {
                self.info_window_open = true;
            }
        }

        egui::TopBottomPanel::top("top").show(ctx, |ui| self.ui_top(ui));
        egui::SidePanel::right("side")
            .resizable(true)
            .default_width(260.0)
            .show_animated(ctx, self.side_open, |ui| self.ui_side_controls(ui));
        egui::CentralPanel::default().show(ctx, |ui| self.ui_central_previews(ui));
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| self.ui_status_bar(ui));
        self.ui_image_info_window(ctx);

        let mut close_dialog = false;
        let mut cancel_status: Option<&'static str> = None;
        let mut picked_image: Option<PathBuf> = None;
        let mut picked_save: Option<(PathBuf, EncodedArtifact)> = None;

        if let Some(dialog_state) = self.active_dialog.as_mut() {
            match dialog_state {
                NativeDialog::Open(dialog) => {
                    dialog.update(ctx);
                    if let Some(path) = dialog.take_picked() {
                        picked_image = Some(path);
                        close_dialog = true;
                    } else {
                        match dialog.state() {
                            DialogState::Cancelled => {
                                cancel_status = Some("Open canceled.");
                                close_dialog = true;
                            }
                            DialogState::Closed => close_dialog = true,
                            _ => {}
                        }
                    }
                }
                NativeDialog::SaveArtifact { dialog, artifact } => {
                    dialog.update(ctx);
                    if let Some(path) = dialog.take_picked() {
                        picked_save = Some((path, artifact.clone()));
                        close_dialog = true;
                    } else {
                        match dialog.state() {
                            DialogState::Cancelled => {
                                cancel_status = Some("Export canceled.");
                                close_dialog = true;
                            }
                            DialogState::Closed => close_dialog = true,
                            _ => {}
                        }
                    }
                }
            }
        }

        if close_dialog {
            self.active_dialog = None;
        }
        if let Some(msg) = cancel_status {
            self.set_status(msg);
        }
        if let Some(path) = picked_image {
            self.start_loading_image_from_path(path);
        }
        if let Some((path, artifact)) = picked_save {
            self.finish_export(&path, &artifact);
        }
    }
}
