use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::config::ColumnMap;
use crate::state::{DashboardState, PREVIEW_CHOICES};
use crate::ui::{charts, grid, panels};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DashboardApp {
    pub state: DashboardState,
}

impl DashboardApp {
    pub fn new(columns: ColumnMap) -> Self {
        Self {
            state: DashboardState::new(columns),
        }
    }
}

impl Default for DashboardApp {
    fn default() -> Self {
        Self::new(ColumnMap::load_or_default())
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: upload + filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(220.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: KPIs, charts, preview ----
        egui::CentralPanel::default().show(ctx, |ui| {
            central_panel(ui, &mut self.state);
        });
    }
}

// ---------------------------------------------------------------------------
// Central panel – the full pipeline reruns top-to-bottom every frame
// ---------------------------------------------------------------------------

fn central_panel(ui: &mut Ui, state: &mut DashboardState) {
    let Some(table) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Upload a file in the sidebar.");
        });
        return;
    };

    // Derive every aggregate up front; a missing column aborts this
    // render pass and is reported inline.
    let summary = state.summary(table);
    let job_type_rows = state.cost_revenue_by_job_type(table);
    let margins = state.margin_values(table);
    let sector_shares = state.revenue_by_sector(table);
    let top_customers = state.top_customers(table);

    let cost_name = state.columns.cost.clone();
    let revenue_name = state.columns.revenue.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Business Performance Dashboard");
            ui.label("Interactive Job Metrics");
            ui.separator();

            ui.strong("Key Metrics");
            match &summary {
                Ok(s) => charts::kpi_row(ui, s),
                Err(e) => {
                    error_label(ui, &e.to_string());
                    return;
                }
            }
            ui.separator();

            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].strong("Cost and Revenue by Job Type");
                match &job_type_rows {
                    Ok(rows) => charts::cost_revenue_chart(
                        &mut cols[0],
                        rows,
                        &cost_name,
                        &revenue_name,
                    ),
                    Err(e) => error_label(&mut cols[0], &e.to_string()),
                }

                cols[1].strong("Margin Distribution");
                match &margins {
                    Ok(values) => charts::margin_histogram(&mut cols[1], values),
                    Err(e) => error_label(&mut cols[1], &e.to_string()),
                }
            });
            ui.separator();

            ui.columns(2, |cols: &mut [Ui]| {
                cols[0].strong("Revenue by Sector");
                match &sector_shares {
                    Ok(shares) => charts::share_list(&mut cols[0], shares),
                    Err(e) => error_label(&mut cols[0], &e.to_string()),
                }

                cols[1].strong("Top 5 Customers by Revenue");
                match &top_customers {
                    Ok(shares) => charts::share_list(&mut cols[1], shares),
                    Err(e) => error_label(&mut cols[1], &e.to_string()),
                }
            });
            ui.separator();

            // ---- Paginated data preview ----
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Rows");
                egui::ComboBox::from_id_salt("preview_rows")
                    .selected_text(state.preview_rows.to_string())
                    .show_ui(ui, |ui: &mut Ui| {
                        for n in PREVIEW_CHOICES {
                            ui.selectable_value(&mut state.preview_rows, n, n.to_string());
                        }
                    });
            });
            egui::CollapsingHeader::new(RichText::new("Data Preview").strong())
                .default_open(true)
                .show(ui, |ui: &mut Ui| {
                    let cap = state.preview_rows.min(state.visible.len());
                    grid::data_grid(ui, table, &state.visible[..cap], "preview_grid");
                });
        });
}

fn error_label(ui: &mut Ui, message: &str) {
    ui.label(RichText::new(message).color(Color32::RED));
}
