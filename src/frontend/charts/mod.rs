//! Chart views
//!
//! Three interchangeable renderers draw a [`ChartModel`] with `egui_plot`:
//!
//! - [`BarView`] - grouped bars, one per series per category
//! - [`AreaView`] - translucent fill under a linear outline
//! - [`LineView`] - linear polyline without markers
//!
//! All of them share the plot frame built here: categorical X axis, Y range
//! `[0, max + 10]`, horizontal grid lines, a legend, optional axes, and a
//! hover readout when the tooltip toggle is on. Views only add their items.

mod area;
mod bar;
mod line;
mod model;

pub use area::AreaView;
pub use bar::{bar_layout, BarView};
pub use line::LineView;
pub use model::{ChartModel, Y_HEADROOM};

use crate::frontend::widgets::ColorSwatch;
use crate::types::ChartType;
use egui::{Align2, Color32, Response, RichText, Ui};
use egui_plot::{GridMark, Legend, Plot, PlotBounds, PlotPoint, PlotUi, Text};

/// Fallback for colors that fail to parse
pub const FALLBACK_COLOR: Color32 = Color32::GRAY;

/// A chart renderer
pub trait ChartView {
    /// Which chart type this view draws
    fn chart_type(&self) -> ChartType;

    /// Add this view's plot items
    fn draw(&self, plot_ui: &mut PlotUi, model: &ChartModel<'_>, label_color: Color32);

    /// Draw the full chart into `ui`
    fn show(&self, ui: &mut Ui, model: &ChartModel<'_>) -> Response {
        let toggles = model.toggles();
        let label_color = ui.visuals().strong_text_color();
        let (x_min, x_max) = model.x_bounds();
        let (y_min, y_max) = model.y_domain();

        let categories: Vec<String> = model.categories().iter().map(|s| s.to_string()).collect();
        let count = categories.len();

        let plot = Plot::new(("chart", self.chart_type()))
            .legend(Legend::default())
            .show_axes([!toggles.x_hidden, !toggles.y_hidden])
            .show_grid([false, true])
            .show_x(false)
            .show_y(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .allow_boxed_zoom(false)
            .allow_double_click_reset(false)
            .x_grid_spacer(move |_input| category_marks(count))
            .x_axis_formatter(move |mark: GridMark, _range| {
                category_tick_label(&categories, mark.value)
            });

        let mut hovered = None;
        let response = plot.show(ui, |plot_ui| {
            plot_ui.set_plot_bounds(PlotBounds::from_min_max([x_min, y_min], [x_max, y_max]));
            self.draw(plot_ui, model, label_color);

            if toggles.tooltip {
                hovered = plot_ui
                    .pointer_coordinate()
                    .and_then(|p| model.category_at(p.x));
            }
        });

        let mut response = response.response;
        if let Some(index) = hovered {
            response = response.on_hover_ui_at_pointer(|ui| show_readout(ui, model, index));
        }
        response
    }
}

static BAR: BarView = BarView;
static AREA: AreaView = AreaView;
static LINE: LineView = LineView;

/// View for `chart_type`
pub fn view_for(chart_type: ChartType) -> &'static dyn ChartView {
    match chart_type {
        ChartType::Bar => &BAR,
        ChartType::Area => &AREA,
        ChartType::Line => &LINE,
    }
}

/// One grid mark per category
fn category_marks(count: usize) -> Vec<GridMark> {
    (0..count)
        .map(|i| GridMark {
            value: i as f64,
            step_size: 1.0,
        })
        .collect()
}

/// Tick text for grid value `x`; only whole positions get a label
fn category_tick_label(categories: &[String], x: f64) -> String {
    if x.fract() != 0.0 || x < 0.0 {
        return String::new();
    }
    categories.get(x as usize).cloned().unwrap_or_default()
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
pub fn parse_hex_color(color: &str) -> Option<Color32> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);

    match hex.len() {
        3 => Some(Color32::from_rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        6 => Some(Color32::from_rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color32::from_rgba_unmultiplied(
            byte(0)?,
            byte(2)?,
            byte(4)?,
            byte(6)?,
        )),
        _ => None,
    }
}

/// Series color, gray when unparsable
pub fn series_color32(color: &str) -> Color32 {
    parse_hex_color(color).unwrap_or(FALLBACK_COLOR)
}

/// Format a value for labels and the readout
pub fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Value label centered above `(x, y)`
pub(crate) fn value_label(x: f64, y: f64, color: Color32) -> Text {
    Text::new("", PlotPoint::new(x, y), RichText::new(format_value(y)).small().strong())
        .anchor(Align2::CENTER_BOTTOM)
        .color(color)
}

fn show_readout(ui: &mut Ui, model: &ChartModel<'_>, index: usize) {
    let Some(row) = model.rows().get(index) else {
        return;
    };
    ui.label(RichText::new(&row.label).strong());
    for (key, style) in model.series() {
        if let Some(value) = row.value(key) {
            ui.horizontal(|ui| {
                ui.add(ColorSwatch::new(series_color32(&style.color)).with_size(10.0));
                ui.label(&style.label);
                ui.label(RichText::new(format_value(value)).monospace());
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#fff"), Some(Color32::WHITE));
        assert_eq!(
            parse_hex_color("#1a2b3c"),
            Some(Color32::from_rgb(0x1a, 0x2b, 0x3c))
        );
        assert_eq!(
            parse_hex_color("#ff000080"),
            Some(Color32::from_rgba_unmultiplied(255, 0, 0, 128))
        );
        assert_eq!(parse_hex_color("fff"), None);
        assert_eq!(parse_hex_color("#ggg"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color("hsl(1,2,3)"), None);
    }

    #[test]
    fn test_series_color_fallback() {
        assert_eq!(series_color32("var(--chart-1)"), FALLBACK_COLOR);
        assert_eq!(series_color32("#000000"), Color32::BLACK);
    }

    #[test]
    fn test_view_for_matches_type() {
        for chart_type in ChartType::all() {
            assert_eq!(view_for(*chart_type).chart_type(), *chart_type);
        }
    }

    #[test]
    fn test_category_ticks() {
        let categories = vec!["Jan".to_string(), "Feb".to_string()];
        assert_eq!(category_tick_label(&categories, 0.0), "Jan");
        assert_eq!(category_tick_label(&categories, 1.0), "Feb");
        assert_eq!(category_tick_label(&categories, 0.5), "");
        assert_eq!(category_tick_label(&categories, 2.0), "");
        assert_eq!(category_tick_label(&categories, -1.0), "");
        assert_eq!(category_marks(3).len(), 3);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(42.0), "42");
        assert_eq!(format_value(7.5), "7.5");
    }
}
