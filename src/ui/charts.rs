use eframe::egui::{self, Color32, ProgressBar, RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::{generate_palette, GroupColors};
use crate::data::summary::{histogram, GroupShare, Summary};
use crate::format::format_number;

// ---------------------------------------------------------------------------
// KPI metric cards
// ---------------------------------------------------------------------------

/// Render the three KPI cards. An empty view shows "no data" for the mean
/// instead of NaN.
pub fn kpi_row(ui: &mut Ui, summary: &Summary) {
    ui.columns(3, |cols: &mut [Ui]| {
        metric(&mut cols[0], "Total Cost", format_number(summary.total_cost));
        metric(
            &mut cols[1],
            "Total Revenue",
            format_number(summary.total_revenue),
        );
        let margin = summary
            .avg_margin
            .map(format_number)
            .unwrap_or_else(|| "no data".to_string());
        metric(&mut cols[2], "Avg. Margin (%)", margin);
    });
}

fn metric(ui: &mut Ui, label: &str, value: String) {
    egui::Frame::group(ui.style()).show(ui, |ui: &mut Ui| {
        ui.vertical(|ui: &mut Ui| {
            ui.label(label);
            ui.heading(RichText::new(value).strong());
        });
    });
}

// ---------------------------------------------------------------------------
// Grouped bar chart: cost and revenue by job type
// ---------------------------------------------------------------------------

/// Paired cost/revenue bars per job type, job types along the x axis.
pub fn cost_revenue_chart(
    ui: &mut Ui,
    rows: &[(String, f64, f64)],
    cost_name: &str,
    revenue_name: &str,
) {
    if rows.is_empty() {
        no_data(ui);
        return;
    }

    let series_colors = generate_palette(2);
    let cost_bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, (_, cost, _))| Bar::new(i as f64 - 0.2, *cost).width(0.35))
        .collect();
    let revenue_bars: Vec<Bar> = rows
        .iter()
        .enumerate()
        .map(|(i, (_, _, revenue))| Bar::new(i as f64 + 0.2, *revenue).width(0.35))
        .collect();

    let labels: Vec<String> = rows.iter().map(|(label, _, _)| label.clone()).collect();

    Plot::new("cost_revenue_by_job_type")
        .legend(Legend::default())
        .x_axis_formatter(move |mark, _range| {
            let i = mark.value.round();
            if (mark.value - i).abs() > 1e-6 || i < 0.0 {
                return String::new();
            }
            labels.get(i as usize).cloned().unwrap_or_default()
        })
        .y_axis_label("Amount")
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(cost_bars)
                    .name(cost_name)
                    .color(series_colors[0]),
            );
            plot_ui.bar_chart(
                BarChart::new(revenue_bars)
                    .name(revenue_name)
                    .color(series_colors[1]),
            );
        });
}

// ---------------------------------------------------------------------------
// Margin distribution histogram
// ---------------------------------------------------------------------------

const MARGIN_BINS: usize = 10;

pub fn margin_histogram(ui: &mut Ui, values: &[f64]) {
    let bins = histogram(values, MARGIN_BINS);
    if bins.is_empty() {
        no_data(ui);
        return;
    }

    let width = if bins.len() > 1 {
        (bins[1].0 - bins[0].0) * 0.9
    } else {
        1.0
    };
    let bars: Vec<Bar> = bins
        .iter()
        .map(|&(center, count)| Bar::new(center, count as f64).width(width))
        .collect();

    Plot::new("margin_distribution")
        .x_axis_label("Margin %")
        .y_axis_label("Jobs")
        .allow_boxed_zoom(false)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(Color32::LIGHT_BLUE));
        });
}

// ---------------------------------------------------------------------------
// Share lists: revenue by sector, top-5 customers
// ---------------------------------------------------------------------------

/// Render ranked groups as rows with inline percentage bars.
pub fn share_list(ui: &mut Ui, shares: &[GroupShare]) {
    if shares.is_empty() {
        no_data(ui);
        return;
    }

    let colors = GroupColors::new(shares.iter().map(|g| g.label.clone()));
    for group in shares {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new(&group.label).strong());
            ui.label(format_number(group.total));
        });
        let (fraction, text) = match group.share {
            Some(pct) => (pct as f32 / 100.0, format!("{pct:.1}%")),
            None => (0.0, "no data".to_string()),
        };
        ui.add(
            ProgressBar::new(fraction)
                .fill(colors.color_for(&group.label))
                .text(text),
        );
        ui.add_space(2.0);
    }
}

fn no_data(ui: &mut Ui) {
    ui.label("No data for the current filters.");
}
