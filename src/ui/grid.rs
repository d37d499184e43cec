use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Data grid
// ---------------------------------------------------------------------------

const HEADER_HEIGHT: f32 = 20.0;
const FILTER_HEADER_HEIGHT: f32 = 44.0;
const ROW_HEIGHT: f32 = 18.0;

/// Plain read-only grid over the given view (dashboard preview).
pub fn data_grid(ui: &mut Ui, table: &Table, rows: &[usize], id: &str) {
    ui.push_id(id, |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .columns(Column::auto().at_least(60.0).resizable(true), table.n_cols())
                .header(HEADER_HEIGHT, |mut header| {
                    for name in &table.headers {
                        header.col(|ui: &mut Ui| {
                            ui.strong(name);
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                        let idx = rows[row.index()];
                        for col in 0..table.n_cols() {
                            row.col(|ui: &mut Ui| {
                                ui.label(table.rows[idx][col].to_string());
                            });
                        }
                    });
                });
        });
    });
}

/// Grid with a free-text filter box under each header (the analyzer).
/// Returns true when any filter text changed this frame, so the caller can
/// re-derive the view.
pub fn filterable_grid(
    ui: &mut Ui,
    table: &Table,
    rows: &[usize],
    queries: &mut [String],
) -> bool {
    let mut changed = false;

    ui.push_id("analyzer_grid", |ui: &mut Ui| {
        egui::ScrollArea::horizontal().show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .columns(Column::auto().at_least(80.0).resizable(true), table.n_cols())
                .header(FILTER_HEADER_HEIGHT, |mut header| {
                    for (col, name) in table.headers.iter().enumerate() {
                        header.col(|ui: &mut Ui| {
                            ui.vertical(|ui: &mut Ui| {
                                ui.strong(name);
                                if ui.text_edit_singleline(&mut queries[col]).changed() {
                                    changed = true;
                                }
                            });
                        });
                    }
                })
                .body(|body| {
                    body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                        let idx = rows[row.index()];
                        for col in 0..table.n_cols() {
                            row.col(|ui: &mut Ui| {
                                ui.label(table.rows[idx][col].to_string());
                            });
                        }
                    });
                });
        });
    });

    changed
}
