use std::path::{Path, PathBuf};

use crate::config::ColumnMap;
use crate::data::filter::{self, FilterSet, Predicate, ALL};
use crate::data::loader;
use crate::data::model::{DataError, Table};
use crate::data::summary::{self, GroupShare, Summary};

// ---------------------------------------------------------------------------
// Row limit (display-only cap)
// ---------------------------------------------------------------------------

/// Display cap applied after filtering, purely for rendering. Never feeds
/// aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLimit {
    Limit(usize),
    All,
}

impl RowLimit {
    /// Options offered by the analyzer's combo box.
    pub const CHOICES: [RowLimit; 7] = [
        RowLimit::Limit(50),
        RowLimit::Limit(100),
        RowLimit::Limit(500),
        RowLimit::Limit(1000),
        RowLimit::Limit(10_000),
        RowLimit::Limit(100_000),
        RowLimit::All,
    ];

    pub fn label(&self) -> String {
        match self {
            RowLimit::Limit(n) => n.to_string(),
            RowLimit::All => "ALL".to_string(),
        }
    }

    pub fn cap(&self, len: usize) -> usize {
        match self {
            RowLimit::Limit(n) => len.min(*n),
            RowLimit::All => len,
        }
    }
}

impl Default for RowLimit {
    fn default() -> Self {
        RowLimit::Limit(50)
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

/// Full dashboard state, independent of rendering. The loaded table is
/// immutable; every interaction re-derives `visible` from it.
pub struct DashboardState {
    /// Loaded table (None until the user loads a file).
    pub table: Option<Table>,

    /// Names of the filterable/aggregated columns.
    pub columns: ColumnMap,

    /// Dropdown selections; [`ALL`] means no constraint.
    pub selected_sector: String,
    pub selected_location: String,

    /// Rows shown in the data-preview expander.
    pub preview_rows: usize,

    /// Indices of rows passing the current filters (cached).
    pub visible: Vec<usize>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

/// Options for the preview-row selector.
pub const PREVIEW_CHOICES: [usize; 4] = [5, 15, 50, 100];

impl DashboardState {
    pub fn new(columns: ColumnMap) -> Self {
        Self {
            table: None,
            columns,
            selected_sector: ALL.to_string(),
            selected_location: ALL.to_string(),
            preview_rows: PREVIEW_CHOICES[0],
            visible: Vec::new(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded table, resetting filters to "All".
    pub fn set_table(&mut self, table: Table) {
        self.selected_sector = ALL.to_string();
        self.selected_location = ALL.to_string();
        self.visible = (0..table.len()).collect();
        self.table = Some(table);
        self.status_message = None;
    }

    /// Load a file into the state. On failure the prior table and view are
    /// preserved and the error lands in `status_message`.
    pub fn load(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows, columns {:?}",
                    table.len(),
                    table.headers
                );
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }

    fn filter_set(&self) -> FilterSet {
        FilterSet::from([
            (
                self.columns.sector.clone(),
                Predicate::Equals(self.selected_sector.clone()),
            ),
            (
                self.columns.location.clone(),
                Predicate::Equals(self.selected_location.clone()),
            ),
        ])
    }

    /// Recompute `visible` after a dropdown change. A missing filter
    /// column aborts the update and leaves the prior view in place.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        match filter::apply(table, &self.filter_set()) {
            Ok(indices) => {
                self.visible = indices;
                self.status_message = None;
            }
            Err(e) => self.status_message = Some(format!("Error: {e}")),
        }
    }

    /// Dropdown options for a categorical column, "All" first.
    pub fn options_for(&self, column: &str) -> Vec<String> {
        let mut options = vec![ALL.to_string()];
        if let Some(table) = &self.table {
            if let Some(col) = table.column_index(column) {
                options.extend(table.unique_strings(col));
            }
        }
        options
    }

    // -- Aggregates over the current view (recomputed per frame). The
    // table is passed back in so render code can keep its own borrow. --

    pub fn summary(&self, table: &Table) -> Result<Summary, DataError> {
        summary::summarize(table, &self.visible, &self.columns)
    }

    /// `(job type, total cost, total revenue)` triples for the grouped bar
    /// chart, sorted by job type.
    pub fn cost_revenue_by_job_type(
        &self,
        table: &Table,
    ) -> Result<Vec<(String, f64, f64)>, DataError> {
        let costs = summary::group_totals(
            table,
            &self.visible,
            &self.columns.job_type,
            &self.columns.cost,
        )?;
        let revenues = summary::group_totals(
            table,
            &self.visible,
            &self.columns.job_type,
            &self.columns.revenue,
        )?;
        // Both lists are sorted by label and partition the same view.
        Ok(costs
            .into_iter()
            .zip(revenues)
            .map(|((label, cost), (_, revenue))| (label, cost, revenue))
            .collect())
    }

    /// Margin values of the current view, for the distribution histogram.
    pub fn margin_values(&self, table: &Table) -> Result<Vec<f64>, DataError> {
        let col = table.require_column(&self.columns.margin)?;
        Ok(summary::numeric_values(table, &self.visible, col))
    }

    /// Revenue share per sector over the current view.
    pub fn revenue_by_sector(&self, table: &Table) -> Result<Vec<GroupShare>, DataError> {
        let groups = summary::group_totals(
            table,
            &self.visible,
            &self.columns.sector,
            &self.columns.revenue,
        )?;
        Ok(summary::rank_groups(groups, None))
    }

    /// Top-5 customers by revenue, with shares of the whole view.
    pub fn top_customers(&self, table: &Table) -> Result<Vec<GroupShare>, DataError> {
        let groups = summary::group_totals(
            table,
            &self.visible,
            &self.columns.customer,
            &self.columns.revenue,
        )?;
        Ok(summary::rank_groups(groups, Some(5)))
    }
}

// ---------------------------------------------------------------------------
// Analyzer (table viewer) state
// ---------------------------------------------------------------------------

/// State of the table-viewer tool: Empty until a load, then Loaded, then
/// Filtered while any text filter is non-empty.
pub struct ViewerState {
    pub table: Option<Table>,

    /// Path of the loaded file, shown in the window chrome.
    pub source: Option<PathBuf>,

    /// One free-text substring filter per column, parallel to the headers.
    pub text_filters: Vec<String>,

    /// Display-only cap on rendered rows.
    pub row_limit: RowLimit,

    /// Indices of rows passing the current filters (cached).
    pub visible: Vec<usize>,

    /// Load error shown as a modal; the prior table stays on screen.
    pub error: Option<String>,

    /// Whether the descriptive-statistics window is open.
    pub show_analysis: bool,
}

impl Default for ViewerState {
    fn default() -> Self {
        Self {
            table: None,
            source: None,
            text_filters: Vec::new(),
            row_limit: RowLimit::default(),
            visible: Vec::new(),
            error: None,
            show_analysis: false,
        }
    }
}

impl ViewerState {
    /// Ingest a newly loaded table: filters cleared, every row visible.
    pub fn set_table(&mut self, path: PathBuf, table: Table) {
        self.text_filters = vec![String::new(); table.n_cols()];
        self.visible = (0..table.len()).collect();
        self.table = Some(table);
        self.source = Some(path);
        self.error = None;
    }

    /// Load a file. On failure the prior table, filters and view are left
    /// untouched and the error is surfaced as a modal.
    pub fn load(&mut self, path: &Path) {
        match loader::load_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows, columns {:?}",
                    table.len(),
                    table.headers
                );
                self.set_table(path.to_path_buf(), table);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.error = Some(format!("Failed to load file: {e:#}"));
            }
        }
    }

    /// Recompute `visible` from the text filters (key-release path).
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        let filters: FilterSet = table
            .headers
            .iter()
            .zip(&self.text_filters)
            .map(|(name, query)| (name.clone(), Predicate::Contains(query.clone())))
            .collect();

        // Filters are keyed by the table's own headers, so apply cannot
        // miss a column.
        match filter::apply(table, &filters) {
            Ok(indices) => self.visible = indices,
            Err(e) => self.error = Some(e.to_string()),
        }
    }

    /// Clear every text filter, returning to the plain Loaded state.
    pub fn clear_filters(&mut self) {
        self.text_filters.iter_mut().for_each(String::clear);
        self.refilter();
    }

    /// The slice of `visible` that is actually rendered.
    pub fn display_rows(&self) -> &[usize] {
        &self.visible[..self.row_limit.cap(self.visible.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn table() -> Table {
        Table::from_rows(
            vec!["Sector Name".into(), "Location".into(), "Actual Cost".into(),
                 "Actual Revenue".into(), "Actual Margin %".into(),
                 "Job Type".into(), "Customer Name".into()],
            (0..4)
                .map(|i| {
                    vec![
                        CellValue::Text(if i % 2 == 0 { "A" } else { "B" }.into()),
                        CellValue::Text("Lagos".into()),
                        CellValue::Float(100.0),
                        CellValue::Float(150.0),
                        CellValue::Float(25.0),
                        CellValue::Text("Roads".into()),
                        CellValue::Text("Acme".into()),
                    ]
                })
                .collect(),
        )
    }

    #[test]
    fn dashboard_starts_empty_with_all_sentinels() {
        let state = DashboardState::new(ColumnMap::default());
        assert!(state.table.is_none());
        assert_eq!(state.selected_sector, ALL);
        assert!(state.visible.is_empty());
    }

    #[test]
    fn dashboard_dropdown_narrows_and_all_restores() {
        let mut state = DashboardState::new(ColumnMap::default());
        state.set_table(table());
        assert_eq!(state.visible.len(), 4);

        state.selected_sector = "A".to_string();
        state.refilter();
        assert_eq!(state.visible, vec![0, 2]);

        state.selected_sector = ALL.to_string();
        state.refilter();
        assert_eq!(state.visible.len(), 4);
    }

    #[test]
    fn dashboard_missing_column_keeps_prior_view() {
        let mut columns = ColumnMap::default();
        columns.sector = "Business Vertical".to_string();
        let mut state = DashboardState::new(columns);
        state.set_table(table());

        state.selected_sector = "A".to_string();
        state.refilter();
        assert_eq!(state.visible.len(), 4);
        assert!(state.status_message.is_some());
    }

    #[test]
    fn dashboard_options_put_all_first() {
        let mut state = DashboardState::new(ColumnMap::default());
        state.set_table(table());
        assert_eq!(state.options_for("Sector Name"), vec!["All", "A", "B"]);
    }

    #[test]
    fn viewer_load_failure_preserves_prior_state() {
        let mut state = ViewerState::default();
        state.set_table(PathBuf::from("jobs.csv"), table());
        state.text_filters[0] = "A".to_string();
        state.refilter();
        let before = state.visible.clone();

        state.load(Path::new("does-not-exist.csv"));
        assert!(state.error.is_some());
        assert_eq!(state.visible, before);
        assert_eq!(state.text_filters[0], "A");
    }

    #[test]
    fn viewer_clear_filters_returns_to_loaded() {
        let mut state = ViewerState::default();
        state.set_table(PathBuf::from("jobs.csv"), table());
        state.text_filters[0] = "B".to_string();
        state.refilter();
        assert_eq!(state.visible, vec![1, 3]);

        state.clear_filters();
        assert_eq!(state.visible.len(), 4);
    }

    #[test]
    fn row_limit_caps_rendering_only() {
        let mut state = ViewerState::default();
        state.set_table(PathBuf::from("jobs.csv"), table());
        state.row_limit = RowLimit::Limit(2);
        assert_eq!(state.display_rows().len(), 2);
        // The underlying view is untouched.
        assert_eq!(state.visible.len(), 4);
        state.row_limit = RowLimit::All;
        assert_eq!(state.display_rows().len(), 4);
    }
}
