//! Grouped bar chart

use super::{series_color32, value_label, ChartModel, ChartView};
use crate::types::ChartType;
use egui::Color32;
use egui_plot::{Bar, BarChart, PlotUi};

/// Share of a category slot taken by its bar group
const GROUP_WIDTH: f64 = 0.8;

/// Gap between neighbouring bars, as a share of one bar's slot
const BAR_GAP: f64 = 0.1;

/// Offset from the category center and width of bar `index` of `count`
pub fn bar_layout(count: usize, index: usize) -> (f64, f64) {
    let count = count.max(1);
    let slot = GROUP_WIDTH / count as f64;
    let offset = -GROUP_WIDTH / 2.0 + slot * (index as f64 + 0.5);
    (offset, slot * (1.0 - BAR_GAP))
}

pub struct BarView;

impl ChartView for BarView {
    fn chart_type(&self) -> ChartType {
        ChartType::Bar
    }

    fn draw(&self, plot_ui: &mut PlotUi, model: &ChartModel<'_>, label_color: Color32) {
        let count = model.series_count();

        for (index, (key, style)) in model.series().enumerate() {
            let color = series_color32(&style.color);
            let (offset, width) = bar_layout(count, index);
            let points = model.points(key);

            let bars: Vec<Bar> = points
                .iter()
                .map(|[x, y]| Bar::new(x + offset, *y).width(width).fill(color))
                .collect();
            plot_ui.bar_chart(BarChart::new(style.label.as_str(), bars).color(color));

            if model.toggles().labels {
                for [x, y] in points {
                    plot_ui.text(value_label(x + offset, y, label_color));
                }
            }
        }
    }
}
