//! Side panel UI: target dimensions, format, quality, and export controls.

use super::super::{APP_VERSION, PixpressApp};
use super::icons;
use crate::pipeline::{OutputFormat, QUALITY_MAX, QUALITY_MIN};
use egui::{Color32, RichText};

impl PixpressApp {
    pub(crate) fn ui_side_controls(&mut self, ui: &mut egui::Ui) {
        ui.heading("Resize");
        ui.separator();

        let max_dim = self.config.effective_image_limits().image_dim;
        ui.horizontal(|ui| {
            ui.label("Width:")
                .on_hover_text("Target width in pixels; the image is stretched to fit exactly");
            let resp = ui.add(
                egui::DragValue::new(&mut self.params.width)
                    .range(1..=max_dim)
                    .suffix(" px"),
            );
            if resp.changed() {
                self.mark_preview_dirty();
            }
        });
        ui.horizontal(|ui| {
            ui.label("Height:")
                .on_hover_text("Target height in pixels; the image is stretched to fit exactly");
            let resp = ui.add(
                egui::DragValue::new(&mut self.params.height)
                    .range(1..=max_dim)
                    .suffix(" px"),
            );
            if resp.changed() {
                self.mark_preview_dirty();
            }
        });
        ui.scope(|ui| {
            ui.style_mut().spacing.item_spacing.x = 4.0;
            ui.label(
                RichText::new("The aspect ratio is not preserved; both sides are applied as-is.")
                    .small(),
            );
        });

        ui.add_space(6.0);
        ui.heading("Compression");
        ui.separator();

        ui.horizontal(|ui| {
            for format in OutputFormat::ALL {
                ui.radio_value(&mut self.params.format, format, format.label())
                    .on_hover_text(match format {
                        OutputFormat::Jpeg => {
                            "Lossy output; transparency is flattened onto white"
                        }
                        OutputFormat::Png => "Lossless output; the quality setting is ignored",
                    });
            }
        });

        ui.add_space(4.0);
        ui.spacing_mut().slider_width = 150.0;
        let quality_resp = ui.add_enabled(
            self.params.format.is_lossy(),
            egui::Slider::new(&mut self.params.quality, QUALITY_MIN..=QUALITY_MAX)
                .text("JPEG quality")
                .clamping(egui::SliderClamping::Always),
        );
        quality_resp.on_hover_text("Higher = better quality and larger files (PNG ignores this)");

        ui.add_space(6.0);
        self.ui_export_section(ui);

        let remaining = ui.available_height().max(0.0);
        if remaining > 24.0 {
            ui.add_space(remaining - 20.0);
        }
        ui.separator();
        ui.label(
            RichText::new(format!("Version {APP_VERSION}"))
                .small()
                .color(Color32::from_gray(160)),
        );
    }

    fn ui_export_section(&mut self, ui: &mut egui::Ui) {
        ui.heading("Export");
        let has_image = self.has_image();
        ui.label(format!(
            "File name: {}",
            self.params.artifact_file_name()
        ))
        .on_hover_text("Suggested name for the exported file");
        ui.label(
            RichText::new(format!("MIME type: {}", self.params.format.mime_type())).small(),
        );

        ui.add_space(4.0);
        let export_hint = if has_image {
            "Resample, encode, and save the result (Ctrl+E)"
        } else {
            "Load an image before exporting"
        };
        let resp_export = ui
            .add_enabled(
                has_image,
                egui::Button::new(format!("{} Export resized image…", icons::ICON_EXPORT))
                    .shortcut_text("Ctrl+E"),
            )
            .on_hover_text(export_hint);
        if resp_export.clicked() {
            self.start_export();
        }
    }
}
