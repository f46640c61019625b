use super::super::{PixpressApp, safe_usize_to_f32};
use egui::RichText;

impl PixpressApp {
    pub(crate) fn ui_central_previews(&mut self, ui: &mut egui::Ui) {
        // Handle drag & drop regardless of whether an image is already loaded
        let dropped_files = ui.input(|i| i.raw.dropped_files.clone());
        if !dropped_files.is_empty() {
            let mut loaded = false;
            for f in &dropped_files {
                if let Some(path) = &f.path {
                    self.start_loading_image_from_path(path.clone());
                    loaded = true;
                    break;
                }
                if let Some(bytes) = &f.bytes {
                    self.start_loading_image_from_bytes(
                        (!f.name.is_empty()).then(|| f.name.clone()),
                        bytes.to_vec(),
                        f.last_modified,
                    );
                    loaded = true;
                    break;
                }
            }
            if !loaded {
                self.set_status("Drop failed: no readable bytes/path");
            }
        }

        let Some(source) = self.source.as_ref() else {
            ui.centered_and_justified(|ui| {
                ui.label(
                    RichText::new("Drop an image here, paste from the clipboard, or use File → Open.")
                        .weak(),
                );
            });
            return;
        };

        let (source_tex, source_size) = (source.texture.id(), source.size);
        let preview = self
            .preview
            .as_ref()
            .map(|p| (p.texture.id(), p.size, p.width, p.height));
        let resampling = self.pending_preview_task.is_some();
        let available_width = ui.available_width();

        egui::ScrollArea::both().show(ui, |ui| {
            ui.heading("Original");
            ui.label(
                RichText::new(format!("{} × {} px", source_size[0], source_size[1])).small(),
            );
            add_fitted_image(ui, source_tex, source_size, available_width);

            ui.add_space(10.0);
            ui.heading("Resized preview");
            match preview {
                Some((tex_id, size, width, height)) => {
                    ui.label(RichText::new(format!("{width} × {height} px")).small());
                    add_fitted_image(ui, tex_id, size, available_width);
                    if resampling {
                        ui.label(RichText::new("Resampling…").weak());
                    }
                }
                None => {
                    if resampling {
                        ui.label(RichText::new("Resampling…").weak());
                    } else {
                        ui.label(
                            RichText::new("Adjust width and height to generate a preview.").weak(),
                        );
                    }
                }
            }
        });
    }
}

/// Show the texture at natural size, scaled down to the panel width when needed.
fn add_fitted_image(ui: &mut egui::Ui, tex_id: egui::TextureId, size: [usize; 2], max_width: f32) {
    let base = egui::vec2(safe_usize_to_f32(size[0]), safe_usize_to_f32(size[1]));
    let scale = if base.x > max_width && base.x > 0.0 {
        max_width / base.x
    } else {
        1.0
    };
    ui.add(egui::Image::new((tex_id, base * scale)));
}
