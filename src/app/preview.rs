use super::{PendingPreviewTask, PixpressApp, PreviewState, color_image_of};
use crate::pipeline;
use egui::{Context, TextureOptions};
use std::sync::Arc;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;

impl PixpressApp {
    /// Queue a background resample for the preview when parameters changed
    /// and no job is already in flight.
    pub(crate) fn ensure_preview_job(&mut self) {
        if !self.preview_dirty || self.pending_preview_task.is_some() {
            return;
        }
        let Some(source) = self.source.as_ref() else {
            self.preview_dirty = false;
            return;
        };
        if self.params.validate().is_err() {
            return;
        }
        let image = Arc::clone(&source.image);
        let (width, height) = (self.params.width, self.params.height);
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            let resized = pipeline::resample(image.image(), width, height);
            let _ = tx.send(color_image_of(&resized));
        });
        self.pending_preview_task = Some(PendingPreviewTask { rx, width, height });
        self.preview_dirty = false;
    }

    pub(crate) fn poll_preview_job(&mut self, ctx: &Context) {
        let Some(task) = self.pending_preview_task.take() else {
            return;
        };
        match task.rx.try_recv() {
            Ok(color_image) => {
                let size = color_image.size;
                let texture = ctx.load_texture("resized_preview", color_image, TextureOptions::LINEAR);
                self.preview = Some(PreviewState {
                    size,
                    texture,
                    width: task.width,
                    height: task.height,
                });
                // Parameters may have moved on while the job ran.
                if task.width != self.params.width || task.height != self.params.height {
                    self.preview_dirty = true;
                }
            }
            Err(TryRecvError::Empty) => {
                self.pending_preview_task = Some(task);
                ctx.request_repaint_after(std::time::Duration::from_millis(16));
            }
            Err(TryRecvError::Disconnected) => {
                self.set_status("Preview update failed: worker disconnected.");
            }
        }
    }
}
