//! Main application UI
//!
//! Wires the display surface, the selector and the Display button to the
//! [`Viewer`] controller. All work happens synchronously on the UI thread.

use eframe::egui;
use tracing::{debug, error, warn};

use crate::config::Config;
use crate::viewer::Viewer;

/// Message shown under the controls
#[derive(Debug, PartialEq)]
enum Status {
    Shown(String),
    Failed(String),
}

/// Application state
pub struct ImageViewerApp {
    viewer: Viewer,
    /// Texture for the bitmap currently bound to the surface
    texture: Option<egui::TextureHandle>,
    /// Surface generation the texture was uploaded from
    texture_generation: u64,
    texture_options: egui::TextureOptions,
    allow_refresh: bool,
    status: Option<Status>,
}

impl ImageViewerApp {
    pub fn new(viewer: Viewer, config: &Config) -> Self {
        Self {
            viewer,
            texture: None,
            texture_generation: 0,
            texture_options: config.texture_filter.to_egui_options(),
            allow_refresh: config.allow_refresh,
            status: None,
        }
    }

    /// Display button handler. Failures leave the surface untouched.
    fn on_display_requested(&mut self) {
        let shown = self
            .viewer
            .display()
            .map(|bitmap| (bitmap.original_width, bitmap.original_height));

        self.status = Some(match shown {
            Ok((width, height)) => {
                Status::Shown(format!("{} ({width}x{height})", self.viewer.selection()))
            }
            Err(err) => {
                if err.is_recoverable() {
                    warn!(%err, "display failed");
                } else {
                    error!(%err, "display failed");
                }
                Status::Failed(err.to_string())
            }
        });
    }

    fn on_refresh_requested(&mut self) {
        self.status = Some(match self.viewer.refresh() {
            Ok(()) => Status::Shown(format!("{} images", self.viewer.catalog().len())),
            Err(err) => {
                warn!(%err, "refresh failed");
                Status::Failed(err.to_string())
            }
        });
    }

    /// Re-upload the texture when the surface has a newer bitmap.
    /// Replacing the handle frees the previous GPU texture.
    fn update_texture(&mut self, ctx: &egui::Context) {
        let surface = self.viewer.surface();
        if surface.generation() == self.texture_generation {
            return;
        }
        if let Some(bitmap) = surface.bitmap() {
            debug!(generation = surface.generation(), "uploading texture");
            self.texture = Some(ctx.load_texture(
                "display",
                bitmap.to_color_image(),
                self.texture_options,
            ));
        }
        self.texture_generation = surface.generation();
    }

    fn render_surface(&self, ui: &mut egui::Ui) {
        let Some(ref texture) = self.texture else {
            return;
        };
        let (rect, _) = ui.allocate_exact_size(texture.size_vec2(), egui::Sense::hover());
        ui.painter().image(
            texture.id(),
            rect,
            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
            egui::Color32::WHITE,
        );
    }

    /// Selector over the catalog. Returns the entry the user picked, if any.
    fn render_selector(&self, ui: &mut egui::Ui) -> Option<String> {
        let mut picked = None;
        let current = self.viewer.selection();

        egui::ComboBox::from_id_salt("image_selector")
            .selected_text(current)
            .show_ui(ui, |ui| {
                for entry in self.viewer.catalog().entries() {
                    if ui.selectable_label(entry == current, entry.as_str()).clicked() {
                        picked = Some(entry.clone());
                    }
                }
            });

        picked
    }

    fn render_status(&self, ui: &mut egui::Ui) {
        match self.status {
            Some(Status::Shown(ref text)) => {
                ui.label(egui::RichText::new(text).color(egui::Color32::GRAY));
            }
            Some(Status::Failed(ref text)) => {
                ui.label(egui::RichText::new(text).color(egui::Color32::RED));
            }
            None => {}
        }
    }
}

impl eframe::App for ImageViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.viewer.set_max_texture_side(ctx.input(|i| i.max_texture_side));
        self.update_texture(ctx);

        let mut picked = None;
        let mut display_clicked = false;
        let mut refresh_clicked = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                self.render_surface(ui);
                picked = self.render_selector(ui);
                display_clicked = ui.button("Display").clicked();
                if self.allow_refresh {
                    refresh_clicked = ui.button("Refresh").clicked();
                }
                self.render_status(ui);
            });
        });

        if let Some(entry) = picked {
            if let Err(err) = self.viewer.select(&entry) {
                warn!(%err, "selection rejected");
            }
        }
        if refresh_clicked {
            self.on_refresh_requested();
        }
        if display_clicked {
            self.on_display_requested();
            ctx.request_repaint();
        }
    }
}
