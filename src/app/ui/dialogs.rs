use super::super::{NativeDialog, PixpressApp};
use crate::pipeline;
use egui_file_dialog::FileDialog;
use std::path::Path;

impl PixpressApp {
    pub(crate) fn open_image_dialog(&mut self) {
        let mut dialog = Self::make_open_dialog(self.last_image_dir.as_deref());
        dialog.pick_file();
        self.active_dialog = Some(NativeDialog::Open(dialog));
    }

    /// Resample and encode at the current parameters, then ask where to
    /// save the artifact. Encoding happens before the dialog opens so a
    /// failure surfaces immediately in the status bar.
    pub(crate) fn start_export(&mut self) {
        let Some(source) = self.source.as_ref() else {
            self.set_status("Export needs a loaded image.");
            return;
        };
        match pipeline::transform_decoded(&source.image, &self.params) {
            Ok(artifact) => {
                let extension = self.params.format.extension();
                let mut dialog = Self::make_save_dialog(
                    "Export resized image",
                    &artifact.file_name,
                    &[extension],
                    self.last_export_dir.as_deref(),
                );
                dialog.save_file();
                self.active_dialog = Some(NativeDialog::SaveArtifact { dialog, artifact });
            }
            Err(err) => self.set_status(format!("Export failed: {err}")),
        }
    }

    pub(crate) fn make_open_dialog(initial_dir: Option<&Path>) -> FileDialog {
        // Keep in sync with enabled `image` crate features.
        let mut dialog = FileDialog::new()
            .title("Open image")
            .add_file_filter_extensions("All images", vec!["png", "jpg", "jpeg"])
            .add_file_filter_extensions("PNG", vec!["png"])
            .add_file_filter_extensions("JPEG/JPG", vec!["jpg", "jpeg"])
            .default_file_filter("All images");
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }

    pub(crate) fn make_save_dialog(
        title: &str,
        default_name: &str,
        extensions: &[&str],
        initial_dir: Option<&Path>,
    ) -> FileDialog {
        let mut dialog = FileDialog::new()
            .title(title)
            .default_file_name(default_name);
        let mut first_label: Option<String> = None;
        for ext in extensions {
            let label = format!("*.{ext}");
            if first_label.is_none() {
                first_label = Some(label.clone());
            }
            dialog = dialog.add_save_extension(&label, ext);
        }
        if let Some(label) = first_label.as_deref() {
            dialog = dialog.default_save_extension(label);
        }
        if let Some(dir) = initial_dir {
            dialog = dialog.initial_directory(dir.to_path_buf());
        }
        dialog
    }
}
