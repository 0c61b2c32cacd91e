//! Line chart

use super::{series_color32, value_label, ChartModel, ChartView};
use crate::types::ChartType;
use egui::Color32;
use egui_plot::{Line, PlotPoints, PlotUi};

const LINE_WIDTH: f32 = 2.0;

pub struct LineView;

impl ChartView for LineView {
    fn chart_type(&self) -> ChartType {
        ChartType::Line
    }

    fn draw(&self, plot_ui: &mut PlotUi, model: &ChartModel<'_>, label_color: Color32) {
        for (key, style) in model.series() {
            let color = series_color32(&style.color);
            let points = model.points(key);

            plot_ui.line(
                Line::new(style.label.as_str(), PlotPoints::from(points.clone()))
                    .color(color)
                    .width(LINE_WIDTH),
            );

            if model.toggles().labels {
                for [x, y] in points {
                    plot_ui.text(value_label(x, y, label_color));
                }
            }
        }
    }
}
