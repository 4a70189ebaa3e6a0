//! Dashboard Application
//! Main window: view dropdown in the top bar, resolved chart or image in the
//! central panel, status line at the bottom.

use crate::charts::{export_chart_png, ChartPlotter};
use crate::data::Workbook;
use crate::gui::images::ImageCache;
use crate::view::{resolve, RenderPayload, SelectionKey};
use egui::{Color32, ComboBox, RichText, TopBottomPanel};

pub struct DashboardApp {
    workbook: Workbook,
    selected: SelectionKey,
    payload: Option<RenderPayload>,
    images: ImageCache,
    status: Option<String>,
}

impl DashboardApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        workbook: Workbook,
        initial: SelectionKey,
    ) -> Self {
        let mut app = Self {
            workbook,
            selected: initial,
            payload: None,
            images: ImageCache::default(),
            status: None,
        };
        app.select(initial);
        app
    }

    /// Resolve a selection and replace the displayed payload.
    fn select(&mut self, key: SelectionKey) {
        self.selected = key;
        match resolve(key, &self.workbook) {
            Ok(payload) => {
                self.payload = Some(payload);
                self.status = None;
            }
            Err(err) => {
                log::error!("failed to resolve '{key}': {err}");
                self.payload = None;
                self.status = Some(format!("Error: {err}"));
            }
        }
    }

    /// Export the current chart to a PNG chosen via a save dialog.
    fn handle_export_png(&mut self) {
        let Some(RenderPayload::Chart(spec)) = self.payload.clone() else {
            self.status = Some("Only charts can be exported as PNG".to_string());
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("PNG Image", &["png"])
            .set_file_name(format!("{}.png", self.selected))
            .save_file()
        else {
            return; // User cancelled
        };

        match export_chart_png(&spec, &path, (1200, 800)) {
            Ok(()) => {
                self.status = Some(format!("Chart exported: {}", path.display()));
                if let Err(err) = open::that(&path) {
                    log::warn!("could not open {}: {err}", path.display());
                }
            }
            Err(err) => {
                log::error!("chart export failed: {err:#}");
                self.status = Some(format!("Export error: {err}"));
            }
        }
    }

    /// Export the current payload as pretty-printed JSON.
    fn handle_export_json(&mut self) {
        let Some(payload) = self.payload.clone() else {
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name(format!("{}.json", self.selected))
            .save_file()
        else {
            return; // User cancelled
        };

        let result = serde_json::to_string_pretty(&payload)
            .map_err(anyhow::Error::from)
            .and_then(|json| std::fs::write(&path, json).map_err(anyhow::Error::from));

        match result {
            Ok(()) => self.status = Some(format!("Payload exported: {}", path.display())),
            Err(err) => {
                log::error!("payload export failed: {err:#}");
                self.status = Some(format!("Export error: {err}"));
            }
        }
    }

    fn show_top_bar(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        let mut picked: Option<SelectionKey> = None;
        let mut export_png = false;
        let mut export_json = false;

        ui.horizontal(|ui| {
            ui.label(
                RichText::new("University Research Dashboard")
                    .size(20.0)
                    .strong(),
            );
            ui.add_space(16.0);

            ComboBox::from_id_salt("view_selector")
                .width(320.0)
                .selected_text(self.selected.label())
                .show_ui(ui, |ui| {
                    for key in SelectionKey::ALL {
                        if ui
                            .selectable_label(self.selected == key, key.label())
                            .clicked()
                        {
                            picked = Some(key);
                        }
                    }
                });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                // Optional site logo next to the export buttons.
                let logo_path = self.workbook.dir().join("assets/logo.png");
                if logo_path.is_file() {
                    if let Some(tex) = self.images.texture(ctx, "logo", &logo_path) {
                        ui.add(egui::Image::new(tex).max_height(36.0));
                        ui.add_space(8.0);
                    }
                }

                if ui.button("Export JSON").clicked() {
                    export_json = true;
                }
                let chart_shown = !self.selected.is_image() && self.payload.is_some();
                ui.add_enabled_ui(chart_shown, |ui| {
                    if ui.button("Export PNG").clicked() {
                        export_png = true;
                    }
                });
            });
        });

        if let Some(key) = picked {
            self.select(key);
        }
        if export_png {
            self.handle_export_png();
        }
        if export_json {
            self.handle_export_json();
        }
    }

    fn show_content(&mut self, ctx: &egui::Context, ui: &mut egui::Ui) {
        match self.payload.clone() {
            Some(RenderPayload::Chart(spec)) => {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(&spec.title).size(17.0).strong());
                });
                ui.add_space(6.0);
                ChartPlotter::draw(ui, &spec);
            }
            Some(RenderPayload::Image(image)) => {
                let path = image.fs_path(self.workbook.dir());
                ui.vertical_centered(|ui| {
                    ui.add_space(12.0);
                    if let Some(tex) = self.images.texture(ctx, &image.path, &path) {
                        let max_width = ui.available_width() * 0.7;
                        ui.add(egui::Image::new(tex).max_width(max_width));
                    } else {
                        ui.label(
                            RichText::new(format!("Image not found: {}", path.display()))
                                .color(Color32::from_rgb(220, 53, 69)),
                        );
                    }
                    ui.add_space(10.0);
                    ui.label(RichText::new(&image.caption).size(20.0));
                });
            }
            None => {
                ui.centered_and_justified(|ui| {
                    ui.label(RichText::new("No view selected").size(18.0));
                });
            }
        }
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.add_space(6.0);
            self.show_top_bar(ctx, ui);
            ui.add_space(6.0);
        });

        if let Some(status) = self.status.clone() {
            TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
                let color = if status.contains("Error") || status.contains("error") {
                    Color32::from_rgb(220, 53, 69)
                } else {
                    Color32::from_rgb(40, 167, 69)
                };
                ui.label(RichText::new(status).size(12.0).color(color));
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_content(ctx, ui);
        });
    }
}
