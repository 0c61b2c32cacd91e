//! Custom UI widgets

use egui::{Color32, Response, Ui, Widget};

/// A small filled square showing a series color
pub struct ColorSwatch {
    color: Color32,
    size: f32,
}

impl ColorSwatch {
    /// Create a new color swatch
    pub fn new(color: Color32) -> Self {
        Self { color, size: 14.0 }
    }

    /// Set the size of the swatch
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

impl Widget for ColorSwatch {
    fn ui(self, ui: &mut Ui) -> Response {
        let (rect, response) =
            ui.allocate_exact_size(egui::vec2(self.size, self.size), egui::Sense::hover());

        if ui.is_rect_visible(rect) {
            ui.painter().rect_filled(rect, 3.0, self.color);
            ui.painter().rect_stroke(
                rect,
                3.0,
                egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
                egui::StrokeKind::Outside,
            );
        }

        response
    }
}

/// Centered card with a spinner, shown while the session is restored
pub fn loading_card(ui: &mut Ui) {
    let available = ui.available_rect_before_wrap();
    let card = egui::Rect::from_center_size(available.center(), egui::vec2(220.0, 140.0));

    ui.scope_builder(egui::UiBuilder::new().max_rect(card), |ui| {
        egui::Frame::group(ui.style())
            .inner_margin(egui::Margin::same(24))
            .corner_radius(12.0)
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add(egui::Spinner::new().size(40.0));
                    ui.add_space(12.0);
                    ui.label("Loading...");
                });
            });
    });
}
