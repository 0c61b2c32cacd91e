//! Data sidebar
//!
//! Lists the series and rows of the session and lets the user edit them.
//! The sidebar keeps only ephemeral state: whether the "add series" popover is
//! open, the name being typed, the cell currently being edited and the
//! debounced edit waiting to be committed. Store changes go out as
//! [`AppAction`]s.

use std::time::{Duration, Instant};

use egui::{RichText, TextEdit, Ui};

use crate::editor::{parse_cell, CellEdit, MAX_SERIES_NAME_CHARS};
use crate::frontend::charts::{format_value, series_color32};
use crate::frontend::debounce::Debouncer;
use crate::frontend::state::AppAction;
use crate::frontend::widgets::ColorSwatch;
use crate::types::{Row, SeriesConfig};

/// Text of the cell that has keyboard focus
#[derive(Debug, Clone, PartialEq)]
struct CellDraft {
    row: usize,
    field: String,
    text: String,
}

/// Ephemeral sidebar state
#[derive(Debug)]
pub struct SidebarState {
    pub popover_open: bool,
    pub draft_name: String,
    editing: Option<CellDraft>,
    pending: Debouncer<CellEdit>,
}

impl SidebarState {
    pub fn new(edit_debounce: Duration) -> Self {
        Self {
            popover_open: false,
            draft_name: String::new(),
            editing: None,
            pending: Debouncer::new(edit_debounce),
        }
    }

    /// Action for submitting the series name draft
    pub fn submit_name(&self) -> AppAction {
        AppAction::AddSeries(self.draft_name.clone())
    }

    /// The draft was accepted by the store
    pub fn on_series_added(&mut self) {
        self.draft_name.clear();
    }

    /// Handle a keystroke in a cell
    ///
    /// Valid input is staged behind the debounce. A pending edit for another
    /// cell is returned for immediate commit so it is not lost.
    pub fn input_changed(
        &mut self,
        axis_key: &str,
        row: usize,
        field: &str,
        text: &str,
        now: Instant,
    ) -> Option<AppAction> {
        let value = parse_cell(axis_key, field, text).ok()?;
        let edit = CellEdit {
            row,
            field: field.to_string(),
            value,
        };
        match self.pending.schedule(edit.clone(), now) {
            Some(displaced) if !displaced.same_cell(&edit) => Some(AppAction::CommitCell(displaced)),
            _ => None,
        }
    }

    /// Handle a cell losing focus
    ///
    /// Commits whatever is pending and reports invalid input as an alert.
    pub fn input_finished(
        &mut self,
        axis_key: &str,
        field: &str,
        text: &str,
    ) -> Vec<AppAction> {
        self.editing = None;
        let mut actions: Vec<AppAction> = self.pending.flush().map(AppAction::CommitCell).into_iter().collect();
        if let Err(e) = parse_cell(axis_key, field, text) {
            actions.push(AppAction::Alert(e));
        }
        actions
    }

    /// Take the staged edit once its quiet period has passed
    pub fn poll(&mut self, now: Instant) -> Option<CellEdit> {
        self.pending.poll(now)
    }

    /// Take the staged edit immediately
    pub fn flush(&mut self) -> Option<CellEdit> {
        self.pending.flush()
    }

    /// Time until the staged edit is due
    pub fn next_due(&self, now: Instant) -> Option<Duration> {
        self.pending.remaining(now)
    }

    /// Forget the focused cell's text (row positions are about to change)
    pub fn clear_drafts(&mut self) {
        self.editing = None;
    }

    fn draft_for(&self, row: usize, field: &str) -> Option<&str> {
        self.editing
            .as_ref()
            .filter(|d| d.row == row && d.field == field)
            .map(|d| d.text.as_str())
    }
}

/// Borrowed session data shown in the sidebar
pub struct SidebarContext<'a> {
    pub series: Option<&'a SeriesConfig>,
    pub rows: &'a [Row],
    pub axis_key: &'a str,
}

/// Render the sidebar and return the actions it produced
pub fn render_sidebar(
    ui: &mut Ui,
    state: &mut SidebarState,
    ctx: &SidebarContext<'_>,
    now: Instant,
) -> Vec<AppAction> {
    let mut actions = Vec::new();

    ui.add_space(4.0);
    ui.horizontal(|ui| {
        if ui.button("Reset").clicked() {
            actions.push(AppAction::ResetData);
        }
        if ui
            .selectable_label(state.popover_open, "Add series")
            .clicked()
        {
            state.popover_open = !state.popover_open;
        }
    });

    if state.popover_open {
        render_name_input(ui, state, &mut actions);
    }

    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            render_series_list(ui, ctx, &mut actions);

            ui.separator();
            ui.label(RichText::new("Chart Data").strong());
            if ui.button("Add Data").clicked() {
                actions.push(AppAction::AddRow);
            }

            for (index, row) in ctx.rows.iter().enumerate() {
                render_row(ui, state, ctx, index, row, now, &mut actions);
            }
        });

    actions
}

fn render_name_input(ui: &mut Ui, state: &mut SidebarState, actions: &mut Vec<AppAction>) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        let response = ui.add(
            TextEdit::singleline(&mut state.draft_name)
                .char_limit(MAX_SERIES_NAME_CHARS)
                .hint_text("Enter data")
                .desired_width(f32::INFINITY),
        );
        if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            actions.push(state.submit_name());
            response.request_focus();
        }
    });
}

fn render_series_list(ui: &mut Ui, ctx: &SidebarContext<'_>, actions: &mut Vec<AppAction>) {
    let Some(series) = ctx.series else {
        return;
    };
    for (key, style) in series {
        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.add(ColorSwatch::new(series_color32(&style.color)));
                ui.label(&style.label);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("X").on_hover_text("Remove series").clicked() {
                        actions.push(AppAction::RemoveSeries(key.clone()));
                    }
                });
            });
        });
    }
}

fn render_row(
    ui: &mut Ui,
    state: &mut SidebarState,
    ctx: &SidebarContext<'_>,
    index: usize,
    row: &Row,
    now: Instant,
    actions: &mut Vec<AppAction>,
) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            if ui.small_button("X").on_hover_text("Remove row").clicked() {
                actions.push(AppAction::RemoveRow(index));
            }
        });

        egui::Grid::new(("row_fields", index))
            .num_columns(2)
            .show(ui, |ui| {
                cell_editor(ui, state, ctx, index, ctx.axis_key, row.label.clone(), now, actions);
                for (field, value) in &row.values {
                    cell_editor(ui, state, ctx, index, field, format_value(*value), now, actions);
                }
            });
    });
}

#[allow(clippy::too_many_arguments)]
fn cell_editor(
    ui: &mut Ui,
    state: &mut SidebarState,
    ctx: &SidebarContext<'_>,
    row: usize,
    field: &str,
    stored: String,
    now: Instant,
    actions: &mut Vec<AppAction>,
) {
    ui.label(RichText::new(field).small());

    let mut text = state
        .draft_for(row, field)
        .map(str::to_string)
        .unwrap_or(stored);
    let response = ui.add(TextEdit::singleline(&mut text).desired_width(100.0));

    if response.has_focus() || response.changed() {
        state.editing = Some(CellDraft {
            row,
            field: field.to_string(),
            text: text.clone(),
        });
    }
    if response.changed() {
        actions.extend(state.input_changed(ctx.axis_key, row, field, &text, now));
    }
    if response.lost_focus() {
        actions.extend(state.input_finished(ctx.axis_key, field, &text));
    }
    ui.end_row();
}
