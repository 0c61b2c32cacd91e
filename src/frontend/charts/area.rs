//! Area chart

use super::{series_color32, value_label, ChartModel, ChartView};
use crate::types::ChartType;
use egui::Color32;
use egui_plot::{Line, PlotPoints, PlotUi, Polygon};

const OUTLINE_WIDTH: f32 = 1.5;
const FILL_ALPHA: u8 = 100;

/// Trapezoids from each segment down to zero
///
/// The fill is split per segment so every polygon stays convex.
fn area_segments(points: &[[f64; 2]]) -> Vec<Vec<[f64; 2]>> {
    points
        .windows(2)
        .map(|pair| {
            let [a, b] = [pair[0], pair[1]];
            vec![a, b, [b[0], 0.0], [a[0], 0.0]]
        })
        .collect()
}

pub struct AreaView;

impl ChartView for AreaView {
    fn chart_type(&self) -> ChartType {
        ChartType::Area
    }

    fn draw(&self, plot_ui: &mut PlotUi, model: &ChartModel<'_>, label_color: Color32) {
        for (key, style) in model.series() {
            let color = series_color32(&style.color);
            let fill = Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), FILL_ALPHA);
            let points = model.points(key);

            for segment in area_segments(&points) {
                plot_ui.polygon(
                    Polygon::new(style.label.as_str(), PlotPoints::from(segment))
                        .fill_color(fill)
                        .stroke(egui::Stroke::NONE),
                );
            }
            plot_ui.line(
                Line::new(style.label.as_str(), PlotPoints::from(points.clone()))
                    .color(color)
                    .width(OUTLINE_WIDTH),
            );

            if model.toggles().labels {
                for [x, y] in points {
                    plot_ui.text(value_label(x, y, label_color));
                }
            }
        }
    }
}
