//! Frontend module for egui UI
//!
//! This module provides the chart builder window using eframe/egui.
//!
//! # Layout
//!
//! - Top bar: chart type, display toggles, export, theme, sidebar toggle
//! - Left sidebar: series list and row editor
//! - Central panel: the active chart view, or a "No data" message
//!
//! While the stored session is being restored the whole window shows a
//! loading card instead.
//!
//! # Submodules
//!
//! - [`charts`] - Bar/area/line views over a [`charts::ChartModel`]
//! - [`sidebar`] - Series and row editing
//! - [`toolbar`] - Top bar rendering
//! - [`debounce`] - Quiet-period debouncer for cell edits
//! - [`state`] - [`AppAction`] emitted by the panels
//! - [`widgets`] - Small custom widgets

pub mod charts;
pub mod debounce;
pub mod sidebar;
pub mod state;
pub mod toolbar;
pub mod widgets;

pub use state::AppAction;

use crate::config::Preferences;
use crate::editor::{self, FormError, FormResult};
use crate::export;
use crate::store::{ConfigStore, PersistentStore};
use charts::{view_for, ChartModel};
use egui::{Rect, UserData, ViewportCommand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sidebar::{render_sidebar, SidebarContext, SidebarState};
use std::sync::Arc;
use std::time::{Duration, Instant};
use toolbar::{render_toolbar, ToolbarContext};

/// Repaint interval while waiting on the persister
const LOADING_REPAINT: Duration = Duration::from_millis(50);

/// Apply an action that targets the store
///
/// Returns `Ok(true)` when the action was handled here, `Ok(false)` for shell
/// actions the caller must handle itself.
pub fn apply_store_action(
    store: &mut impl ConfigStore,
    action: &AppAction,
    rng: &mut impl Rng,
) -> FormResult<bool> {
    match action {
        AppAction::SetChartType(chart_type) => store.set_chart_type(*chart_type),
        AppAction::SetTooltip(on) => store.set_tooltip(*on),
        AppAction::SetLabels(on) => store.set_labels(*on),
        AppAction::SetXHidden(hidden) => store.set_x_hidden(*hidden),
        AppAction::SetYHidden(hidden) => store.set_y_hidden(*hidden),
        AppAction::AddSeries(name) => {
            editor::add_series(store, name, rng)?;
        }
        AppAction::RemoveSeries(key) => editor::remove_series(store, key),
        AppAction::AddRow => editor::add_row(store, rng)?,
        AppAction::RemoveRow(index) => editor::remove_row(store, *index),
        AppAction::CommitCell(edit) => editor::apply_cell_edit(store, edit.clone()),
        AppAction::ResetData => editor::reset(store),
        AppAction::ToggleDarkMode
        | AppAction::ToggleSidebar
        | AppAction::ExportImage
        | AppAction::Alert(_) => return Ok(false),
    }
    Ok(true)
}

/// Image export in progress
#[derive(Debug, Default)]
struct ExportState {
    /// Screenshot requested, waiting for the event
    pending: bool,
    /// Chart rectangle from the last frame
    chart_rect: Option<Rect>,
}

/// Main application state for the chart builder
pub struct DataChartsApp {
    store: PersistentStore,
    preferences: Preferences,
    sidebar: SidebarState,
    rng: StdRng,
    alert: Option<String>,
    export: ExportState,
}

impl DataChartsApp {
    /// Create a new application instance
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        store: PersistentStore,
        preferences: Preferences,
    ) -> Self {
        apply_theme(&cc.egui_ctx, preferences.dark_mode);

        Self {
            sidebar: SidebarState::new(preferences.edit_debounce()),
            store,
            preferences,
            rng: StdRng::from_entropy(),
            alert: None,
            export: ExportState::default(),
        }
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: AppAction) {
        tracing::debug!("Handling {:?}", action);

        if action.is_structural() {
            // Pending edits address rows by position; land them first.
            if let Some(edit) = self.sidebar.flush() {
                editor::apply_cell_edit(&mut self.store, edit);
            }
            self.sidebar.clear_drafts();
        }

        match apply_store_action(&mut self.store, &action, &mut self.rng) {
            Ok(true) => {
                if matches!(action, AppAction::AddSeries(_)) {
                    self.sidebar.on_series_added();
                }
                return;
            }
            Ok(false) => {}
            Err(e) => {
                self.show_alert(e);
                return;
            }
        }

        match action {
            AppAction::ToggleDarkMode => {
                self.preferences.dark_mode = !self.preferences.dark_mode;
                apply_theme(ctx, self.preferences.dark_mode);
            }
            AppAction::ToggleSidebar => {
                self.preferences.sidebar_open = !self.preferences.sidebar_open;
            }
            AppAction::ExportImage => {
                if self.export.chart_rect.is_some() && !self.export.pending {
                    self.export.pending = true;
                    ctx.send_viewport_cmd(ViewportCommand::Screenshot(UserData::default()));
                }
            }
            AppAction::Alert(e) => self.show_alert(e),
            _ => {}
        }
    }

    fn show_alert(&mut self, error: FormError) {
        tracing::debug!("Form rejected input: {}", error);
        self.alert = Some(error.to_string());
    }

    /// Commit the debounced cell edit once it is due
    fn poll_pending_edit(&mut self, ctx: &egui::Context) {
        let now = Instant::now();
        if let Some(edit) = self.sidebar.poll(now) {
            editor::apply_cell_edit(&mut self.store, edit);
        }
        if let Some(remaining) = self.sidebar.next_due(now) {
            ctx.request_repaint_after(remaining);
        }
    }

    /// Pick up a requested screenshot and save the chart area
    fn handle_screenshot(&mut self, ctx: &egui::Context) {
        if !self.export.pending {
            return;
        }

        let screenshot: Option<Arc<egui::ColorImage>> = ctx.input(|i| {
            i.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(screenshot) = screenshot else {
            return;
        };
        self.export.pending = false;

        let Some(rect) = self.export.chart_rect else {
            return;
        };
        let chart = export::crop_to_rect(&screenshot, rect, ctx.pixels_per_point());

        let Some(path) = export::pick_export_path() else {
            tracing::debug!("Export cancelled");
            return;
        };
        if let Err(e) = export::save_png(&chart, &path) {
            tracing::error!("Chart export failed: {}", e);
            self.alert = Some(format!("Could not export the chart: {}", e));
        }
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.clone() else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("form_alert")).show(ctx, |ui| {
            ui.set_max_width(320.0);
            ui.label(&message);
            ui.add_space(8.0);
            ui.vertical_centered(|ui| ui.button("OK").clicked()).inner
        });

        if modal.inner || modal.should_close() {
            self.alert = None;
        }
    }

    fn render_chart(&mut self, ui: &mut egui::Ui) {
        let model = ChartModel::from_store(&self.store);
        if model.is_empty() {
            self.export.chart_rect = None;
            ui.centered_and_justified(|ui| {
                ui.label(egui::RichText::new("No data").weak());
            });
            return;
        }

        let response = view_for(self.store.chart_type()).show(ui, &model);
        self.export.chart_rect = Some(response.rect);
    }
}

fn apply_theme(ctx: &egui::Context, dark_mode: bool) {
    if dark_mode {
        ctx.set_visuals(egui::Visuals::dark());
    } else {
        ctx.set_visuals(egui::Visuals::light());
    }
}

impl eframe::App for DataChartsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.store.poll_rehydration() {
            tracing::info!("Session ready: {} rows", self.store.rows().len());
        }

        if self.store.loading() {
            egui::CentralPanel::default().show(ctx, widgets::loading_card);
            ctx.request_repaint_after(LOADING_REPAINT);
            return;
        }

        self.poll_pending_edit(ctx);
        self.handle_screenshot(ctx);

        self.preferences.window_size = ctx
            .input(|i| i.viewport().inner_rect)
            .map(|r| [r.width(), r.height()]);

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            let toolbar_ctx = ToolbarContext {
                chart_type: self.store.chart_type(),
                toggles: self.store.toggles(),
                dark_mode: self.preferences.dark_mode,
                sidebar_open: self.preferences.sidebar_open,
                can_export: !self.export.pending && !self.store.rows().is_empty(),
            };
            actions.extend(render_toolbar(ui, &toolbar_ctx));
        });

        if self.preferences.sidebar_open {
            egui::SidePanel::left("data_sidebar")
                .resizable(true)
                .default_width(260.0)
                .show(ctx, |ui| {
                    let sidebar_ctx = SidebarContext {
                        series: self.store.series_config(),
                        rows: self.store.rows(),
                        axis_key: editor::axis_field(&self.store),
                    };
                    actions.extend(render_sidebar(
                        ui,
                        &mut self.sidebar,
                        &sidebar_ctx,
                        Instant::now(),
                    ));
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| self.render_chart(ui));

        self.render_alert(ctx);

        for action in actions {
            self.handle_action(ctx, action);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(edit) = self.sidebar.flush() {
            editor::apply_cell_edit(&mut self.store, edit);
        }

        if let Err(e) = self.store.flush() {
            tracing::warn!("Failed to flush session snapshot: {}", e);
        }

        if let Err(e) = self.preferences.save() {
            tracing::warn!("Failed to save preferences: {}", e);
        }
    }
}
