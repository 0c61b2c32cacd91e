//! Top bar: chart type buttons, display toggles and shell controls

use egui::{RichText, Ui};

use crate::frontend::state::AppAction;
use crate::types::{ChartType, DisplayToggles};

/// Context needed to render the toolbar
pub struct ToolbarContext {
    pub chart_type: ChartType,
    pub toggles: DisplayToggles,
    pub dark_mode: bool,
    pub sidebar_open: bool,
    /// Export disabled while a capture is in flight or there is nothing to draw
    pub can_export: bool,
}

/// A display toggle as shown in the toolbar
///
/// Axis toggles read "on" while the axis is visible, so their state is the
/// inverse of the stored `*_hidden` flag.
#[derive(Debug, Clone, Copy)]
pub struct ToggleButton {
    pub label: &'static str,
    pub on: bool,
    pub action: fn(bool) -> AppAction,
    pub inverted: bool,
}

impl ToggleButton {
    /// Action emitted when the button is clicked
    pub fn clicked(&self) -> AppAction {
        let stored = if self.inverted { !self.on } else { self.on };
        (self.action)(!stored)
    }
}

/// Toggle buttons in display order
pub fn toggle_buttons(toggles: DisplayToggles) -> [ToggleButton; 4] {
    [
        ToggleButton {
            label: "Tooltip",
            on: toggles.tooltip,
            action: AppAction::SetTooltip,
            inverted: false,
        },
        ToggleButton {
            label: "Label",
            on: toggles.labels,
            action: AppAction::SetLabels,
            inverted: false,
        },
        ToggleButton {
            label: "X Axis",
            on: !toggles.x_hidden,
            action: AppAction::SetXHidden,
            inverted: true,
        },
        ToggleButton {
            label: "Y Axis",
            on: !toggles.y_hidden,
            action: AppAction::SetYHidden,
            inverted: true,
        },
    ]
}

/// Render the toolbar and return the actions it produced
pub fn render_toolbar(ui: &mut Ui, ctx: &ToolbarContext) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.spacing_mut().item_spacing.x = 4.0;

        let sidebar_icon = if ctx.sidebar_open { "◀" } else { "▶" };
        if ui
            .button(sidebar_icon)
            .on_hover_text("Toggle sidebar")
            .clicked()
        {
            actions.push(AppAction::ToggleSidebar);
        }

        ui.separator();

        for chart_type in ChartType::all() {
            let selected = ctx.chart_type == *chart_type;
            if ui
                .selectable_label(selected, chart_type.display_name())
                .clicked()
                && !selected
            {
                actions.push(AppAction::SetChartType(*chart_type));
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let theme_icon = if ctx.dark_mode { "☀" } else { "🌙" };
            if ui
                .button(theme_icon)
                .on_hover_text("Switch theme")
                .clicked()
            {
                actions.push(AppAction::ToggleDarkMode);
            }

            if ui
                .add_enabled(ctx.can_export, egui::Button::new("Export"))
                .on_hover_text("Save the chart as a PNG image")
                .clicked()
            {
                actions.push(AppAction::ExportImage);
            }

            ui.separator();

            // right_to_left lays out in reverse
            for toggle in toggle_buttons(ctx.toggles).iter().rev() {
                if ui
                    .selectable_label(toggle.on, RichText::new(toggle.label).small())
                    .clicked()
                {
                    actions.push(toggle.clicked());
                }
            }
        });
    });

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_axis_toggles_show_visibility() {
        let toggles = DisplayToggles {
            x_hidden: true,
            ..Default::default()
        };
        let buttons = toggle_buttons(toggles);
        assert!(buttons[0].on);
        assert!(!buttons[1].on);
        assert!(!buttons[2].on);
        assert!(buttons[3].on);
    }

    #[test]
    fn test_toggle_click_flips_stored_flag() {
        let buttons = toggle_buttons(DisplayToggles::default());
        assert_eq!(buttons[0].clicked(), AppAction::SetTooltip(false));
        assert_eq!(buttons[1].clicked(), AppAction::SetLabels(true));
        assert_eq!(buttons[2].clicked(), AppAction::SetXHidden(true));

        let hidden = toggle_buttons(DisplayToggles {
            y_hidden: true,
            ..Default::default()
        });
        assert_eq!(hidden[3].clicked(), AppAction::SetYHidden(false));
    }
}
