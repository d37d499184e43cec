use eframe::egui::{self, Align2, RichText, Ui};

use crate::data::summary::describe;
use crate::state::{RowLimit, ViewerState};
use crate::ui::{grid, panels};

// ---------------------------------------------------------------------------
// eframe App implementation (table analyzer)
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct AnalyzerApp {
    pub state: ViewerState,
}

impl eframe::App for AnalyzerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: toolbar ----
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            toolbar(ui, ctx, &mut self.state);
        });

        // ---- Bottom panel: row/column counts ----
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            status_bar(ui, &self.state);
        });

        // ---- Central panel: filterable grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &mut self.state);
        });

        error_modal(ctx, &mut self.state);
        analysis_window(ctx, &mut self.state);
    }
}

// ---------------------------------------------------------------------------
// Toolbar
// ---------------------------------------------------------------------------

fn toolbar(ui: &mut Ui, ctx: &egui::Context, state: &mut ViewerState) {
    ui.horizontal(|ui: &mut Ui| {
        if ui.button("Load Dataset").clicked() {
            if let Some(path) = panels::pick_data_file() {
                state.load(&path);
                if let Some(source) = &state.source {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Title(format!(
                        "Analyzer – {}",
                        source.display()
                    )));
                }
            }
        }

        let has_table = state.table.is_some();
        if ui
            .add_enabled(has_table, egui::Button::new("Analyze Dataset"))
            .clicked()
        {
            state.show_analysis = true;
        }
        if ui
            .add_enabled(has_table, egui::Button::new("Clear Filters"))
            .clicked()
        {
            state.clear_filters();
        }

        ui.separator();
        ui.label("Rows");
        egui::ComboBox::from_id_salt("row_limit")
            .selected_text(state.row_limit.label())
            .show_ui(ui, |ui: &mut Ui| {
                for choice in RowLimit::CHOICES {
                    ui.selectable_value(&mut state.row_limit, choice, choice.label());
                }
            });
    });
}

// ---------------------------------------------------------------------------
// Status bar
// ---------------------------------------------------------------------------

fn status_bar(ui: &mut Ui, state: &ViewerState) {
    ui.horizontal(|ui: &mut Ui| {
        match &state.table {
            Some(table) => {
                ui.label(format!(
                    "{} Total Rows, {} Cols",
                    state.display_rows().len(),
                    table.n_cols()
                ));
            }
            None => {
                ui.label("No dataset loaded");
            }
        }
        if let Some(source) = &state.source {
            ui.separator();
            ui.label(source.display().to_string());
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel
// ---------------------------------------------------------------------------

fn central_panel(ui: &mut Ui, state: &mut ViewerState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Load a CSV or spreadsheet file to begin.");
        });
        return;
    };

    let cap = state.row_limit.cap(state.visible.len());
    let shown: Vec<usize> = state.visible[..cap].to_vec();

    let changed = grid::filterable_grid(ui, table, &shown, &mut state.text_filters);
    if changed {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Error modal – prior state stays on screen behind it
// ---------------------------------------------------------------------------

fn error_modal(ctx: &egui::Context, state: &mut ViewerState) {
    let Some(message) = state.error.clone() else {
        return;
    };
    let mut dismissed = false;

    egui::Window::new("Error")
        .collapsible(false)
        .resizable(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(RichText::new(message).strong());
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        state.error = None;
    }
}

// ---------------------------------------------------------------------------
// Analysis window – descriptive statistics over the whole table
// ---------------------------------------------------------------------------

fn analysis_window(ctx: &egui::Context, state: &mut ViewerState) {
    if !state.show_analysis {
        return;
    }
    let Some(table) = &state.table else {
        state.show_analysis = false;
        return;
    };

    let stats = describe(table);
    let mut open = state.show_analysis;

    egui::Window::new("Dataset Analysis")
        .open(&mut open)
        .default_size([600.0, 400.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(format!(
                "{} rows, {} columns",
                table.len(),
                table.n_cols()
            ));
            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui: &mut Ui| {
                egui::Grid::new("describe_grid")
                    .striped(true)
                    .show(ui, |ui: &mut Ui| {
                        for heading in
                            ["Column", "Kind", "Non-null", "Nulls", "Min", "Mean", "Max"]
                        {
                            ui.strong(heading);
                        }
                        ui.end_row();

                        for col in &stats {
                            ui.label(&col.name);
                            ui.label(col.kind);
                            ui.label(col.non_null.to_string());
                            ui.label(col.nulls.to_string());
                            ui.label(optional_stat(col.min));
                            ui.label(optional_stat(col.mean));
                            ui.label(optional_stat(col.max));
                            ui.end_row();
                        }
                    });
            });
        });

    state.show_analysis = open;
}

fn optional_stat(value: Option<f64>) -> String {
    value
        .map(|v| format!("{v:.2}"))
        .unwrap_or_else(|| "–".to_string())
}
