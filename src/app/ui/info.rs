use super::super::PixpressApp;
use crate::image_info::{describe_aspect_ratio, format_system_time, human_readable_bytes};
use egui::{Color32, RichText};

impl PixpressApp {
    pub(crate) fn ui_status_bar(&self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            let quality_part = if self.params.format.is_lossy() {
                format!(" q{}", self.params.quality)
            } else {
                String::new()
            };
            ui.label(
                RichText::new(format!(
                    "{}×{} · {}{quality_part}",
                    self.params.width,
                    self.params.height,
                    self.params.format.label(),
                ))
                .small()
                .color(Color32::from_gray(180)),
            );
            if let Some(msg) = &self.last_status {
                ui.separator();
                ui.label(
                    RichText::new(msg.as_str())
                        .small()
                        .color(Color32::from_gray(200)),
                );
            }
        });
    }

    pub(crate) fn ui_image_info_window(&mut self, ctx: &egui::Context) {
        if !self.info_window_open {
            return;
        }

        egui::Window::new("Image info")
            .open(&mut self.info_window_open)
            .resizable(false)
            .collapsible(false)
            .show(ctx, |ui| {
                let Some(source) = self.source.as_ref() else {
                    ui.label("Load an image to inspect its metadata.");
                    return;
                };

                ui.heading("File");
                if let Some(meta) = self.source_meta.as_ref() {
                    ui.label(format!("Source: {}", meta.source_label()));
                    ui.label(format!("Name: {}", meta.display_name()));
                    if let Some(path) = meta.path() {
                        ui.label(format!("Path: {}", path.display()));
                    }
                    if let Some(bytes) = meta.byte_len() {
                        ui.label(format!(
                            "Size: {} ({bytes} bytes)",
                            human_readable_bytes(bytes),
                        ));
                    } else {
                        ui.label("Size: Unknown");
                    }
                    if let Some(modified) = meta.last_modified() {
                        ui.label(format!("Modified: {}", format_system_time(modified)));
                    } else {
                        ui.label("Modified: Unknown");
                    }
                } else {
                    ui.label("No captured file metadata for this image.");
                }

                ui.add_space(6.0);
                ui.heading("Image");
                let (w, h) = (source.image.width(), source.image.height());
                ui.label(format!("Dimensions: {w} × {h} px"));
                ui.label(format!("Color mode: {}", source.image.color_mode().label()));
                if let Some(aspect_text) = describe_aspect_ratio(w, h) {
                    ui.label(format!("Aspect ratio: {aspect_text}"));
                } else {
                    ui.label("Aspect ratio: n/a");
                }
                let total_pixels = u64::from(w) * u64::from(h);
                ui.label(format!(
                    "Pixels: {total_pixels} ({:.2} MP)",
                    total_pixels as f64 / 1_000_000.0
                ));
                let rgba_bytes = total_pixels.saturating_mul(4);
                ui.label(format!(
                    "RGBA memory estimate: {} ({rgba_bytes} bytes)",
                    human_readable_bytes(rgba_bytes),
                ));

                ui.add_space(6.0);
                ui.heading("Output");
                ui.label(format!(
                    "Target: {} × {} px",
                    self.params.width, self.params.height
                ));
                ui.label(format!("Format: {}", self.params.format.label()));
                if self.params.format.is_lossy() {
                    ui.label(format!("Quality: {}", self.params.quality));
                }
                ui.label(format!("File name: {}", self.params.artifact_file_name()));
            });
    }
}
