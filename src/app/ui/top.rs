use super::super::PixpressApp;
use super::icons;

impl PixpressApp {
    pub(crate) fn ui_top(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            // Use egui's built-in theme toggle so icon matches current mode.
            egui::widgets::global_theme_preference_switch(ui);
            ui.separator();

            let has_image = self.has_image();
            self.ui_file_menu(ui, has_image);
            ui.separator();

            self.ui_side_toggle(ui);
            ui.separator();

            let info_resp = ui
                .add_enabled(
                    has_image,
                    egui::Button::new(format!("{} Image info", icons::ICON_INFO))
                        .shortcut_text("Ctrl+I"),
                )
                .on_hover_text("Show file & image details (Ctrl+I)");
            if info_resp.clicked() && has_image {
                self.info_window_open = true;
            }

            let clear_resp = ui
                .add_enabled(
                    has_image,
                    egui::Button::new(format!("{} Clear session", icons::ICON_CLEAR)),
                )
                .on_hover_text("Drop the loaded image and every derived buffer");
            if clear_resp.clicked() {
                self.clear_session();
            }
        });
    }

    fn ui_file_menu(&mut self, ui: &mut egui::Ui, has_image: bool) {
        ui.menu_button(format!("{} File", icons::ICON_MENU), |ui| {
            if ui
                .add(egui::Button::new("Open image…").shortcut_text("Ctrl+O"))
                .on_hover_text("Open an image (Ctrl+O). You can also drag & drop into the center.")
                .clicked()
            {
                self.open_image_dialog();
                ui.close();
            }

            if ui
                .add(egui::Button::new("Paste image").shortcut_text("Ctrl+V"))
                .on_hover_text("Paste image from clipboard (Ctrl+V)")
                .clicked()
            {
                self.paste_image_from_clipboard(ui.ctx());
                ui.close();
            }

            ui.separator();

            if ui
                .add_enabled(
                    has_image,
                    egui::Button::new("Export resized image…").shortcut_text("Ctrl+E"),
                )
                .on_hover_text("Resample, encode, and save the result (Ctrl+E)")
                .clicked()
            {
                self.start_export();
                ui.close();
            }
        });
    }

    fn ui_side_toggle(&mut self, ui: &mut egui::Ui) {
        let side_label = if self.side_open {
            "Hide side"
        } else {
            "Show side"
        };
        let response = ui
            .add(
                egui::Button::new(format!("{} {side_label}", icons::ICON_SIDE_TOGGLE))
                    .shortcut_text("Ctrl+B"),
            )
            .on_hover_text("Toggle the controls panel (Ctrl+B)");
        if response.clicked() {
            self.side_open = !self.side_open;
        }
    }
}
