use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::state::DashboardState;

// ---------------------------------------------------------------------------
// Left side panel – upload + filter dropdowns
// ---------------------------------------------------------------------------

/// Render the dashboard sidebar.
pub fn side_panel(ui: &mut Ui, state: &mut DashboardState) {
    ui.heading("File Upload");
    ui.add_space(4.0);
    if ui.button("Open file…").clicked() {
        if let Some(path) = pick_data_file() {
            state.load(&path);
        }
    }
    if let Some(table) = &state.table {
        ui.label(format!("{} rows × {} columns", table.len(), table.n_cols()));
    }

    ui.separator();
    ui.heading("Filters");

    if state.table.is_none() {
        ui.label("No file loaded.");
        return;
    }

    let sector_col = state.columns.sector.clone();
    let location_col = state.columns.location.clone();

    dropdown(ui, state, "Sector", &sector_col);
    dropdown(ui, state, "Location", &location_col);
}

/// One categorical dropdown with the "All" sentinel first; a change
/// re-derives the filtered view.
fn dropdown(ui: &mut Ui, state: &mut DashboardState, label: &str, column: &str) {
    let options = state.options_for(column);
    let selected = if column == state.columns.sector {
        &mut state.selected_sector
    } else {
        &mut state.selected_location
    };
    let before = selected.clone();

    egui::ComboBox::from_label(label.to_string())
        .selected_text(selected.clone())
        .show_ui(ui, |ui: &mut Ui| {
            for opt in &options {
                ui.selectable_value(selected, opt.clone(), opt);
            }
        });

    if *selected != before {
        state.refilter();
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut DashboardState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                if let Some(path) = pick_data_file() {
                    state.load(&path);
                }
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} rows loaded, {} visible",
                table.len(),
                state.visible.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn pick_data_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open data file")
        .add_filter("Supported files", &["csv", "xlsx", "xlsm", "xlsb", "xls", "ods"])
        .add_filter("CSV", &["csv"])
        .add_filter("Excel", &["xlsx", "xlsm", "xlsb", "xls"])
        .add_filter("OpenDocument", &["ods"])
        .pick_file()
}
