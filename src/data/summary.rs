use std::collections::BTreeMap;

use crate::config::ColumnMap;

use super::model::{CellValue, DataError, Table};

// ---------------------------------------------------------------------------
// KPI summary
// ---------------------------------------------------------------------------

/// Scalar aggregates over a filtered view. Recomputed whenever the view
/// changes; no independent lifecycle.
///
/// Empty-view policy: sums are 0.0 and the mean is `None` ("no data"),
/// never NaN.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_cost: f64,
    pub total_revenue: f64,
    pub avg_margin: Option<f64>,
    pub row_count: usize,
}

/// Compute the KPI summary for the given view (`indices` into `table`).
pub fn summarize(
    table: &Table,
    indices: &[usize],
    columns: &ColumnMap,
) -> Result<Summary, DataError> {
    let cost = table.require_column(&columns.cost)?;
    let revenue = table.require_column(&columns.revenue)?;
    let margin = table.require_column(&columns.margin)?;

    Ok(Summary {
        total_cost: column_sum(table, indices, cost),
        total_revenue: column_sum(table, indices, revenue),
        avg_margin: column_mean(table, indices, margin),
        row_count: indices.len(),
    })
}

/// Sum of the numeric cells of one column over the view. Non-numeric and
/// null cells contribute nothing.
pub fn column_sum(table: &Table, indices: &[usize], col: usize) -> f64 {
    indices
        .iter()
        .filter_map(|&i| table.rows[i][col].as_f64())
        .sum()
}

/// Mean of the numeric cells of one column over the view, `None` when the
/// view holds no numeric values.
pub fn column_mean(table: &Table, indices: &[usize], col: usize) -> Option<f64> {
    let values: Vec<f64> = indices
        .iter()
        .filter_map(|&i| table.rows[i][col].as_f64())
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Numeric cells of one column over the view, in row order.
pub fn numeric_values(table: &Table, indices: &[usize], col: usize) -> Vec<f64> {
    indices
        .iter()
        .filter_map(|&i| table.rows[i][col].as_f64())
        .collect()
}

// ---------------------------------------------------------------------------
// Grouping
// ---------------------------------------------------------------------------

/// One group after ranking: its label, summed value, and percentage share
/// of the all-groups total (`None` when the denominator is 0).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupShare {
    pub label: String,
    pub total: f64,
    pub share: Option<f64>,
}

/// Partition the view by a categorical column and sum a numeric column per
/// group. Groups come back sorted by label.
pub fn group_totals(
    table: &Table,
    indices: &[usize],
    group_col: &str,
    value_col: &str,
) -> Result<Vec<(String, f64)>, DataError> {
    let group = table.require_column(group_col)?;
    let value = table.require_column(value_col)?;

    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for &i in indices {
        let row = &table.rows[i];
        let key = row[group].to_string();
        let amount = row[value].as_f64().unwrap_or(0.0);
        *totals.entry(key).or_insert(0.0) += amount;
    }

    Ok(totals.into_iter().collect())
}

/// Rank groups descending by total, attach each group's percentage share
/// of the all-groups total, and keep the top `n` (all of them for `None`).
///
/// The share denominator is the total over every group, not just the kept
/// ones, so a top-5 list reports shares of the whole.
pub fn rank_groups(mut groups: Vec<(String, f64)>, n: Option<usize>) -> Vec<GroupShare> {
    let denominator: f64 = groups.iter().map(|(_, t)| t).sum();

    groups.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    if let Some(n) = n {
        groups.truncate(n);
    }

    groups
        .into_iter()
        .map(|(label, total)| {
            let share = if denominator == 0.0 {
                None
            } else {
                Some(total / denominator * 100.0)
            };
            GroupShare {
                label,
                total,
                share,
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram (margin distribution chart)
// ---------------------------------------------------------------------------

/// Bin `values` into `bins` equal-width buckets over their observed range.
/// Returns `(bin_center, count)` pairs; empty input yields no bins, a
/// degenerate range yields a single bin holding everything.
pub fn histogram(values: &[f64], bins: usize) -> Vec<(f64, usize)> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }
    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if range.abs() < f64::EPSILON {
        return vec![(min, values.len())];
    }

    let width = range / bins as f64;
    let mut counts = vec![0usize; bins];
    for &v in values {
        let mut idx = ((v - min) / width) as usize;
        if idx >= bins {
            idx = bins - 1; // max lands in the last bin
        }
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| (min + width * (i as f64 + 0.5), c))
        .collect()
}

// ---------------------------------------------------------------------------
// Descriptive statistics (analyzer "Analyze Dataset" window)
// ---------------------------------------------------------------------------

/// Per-column descriptive statistics over the whole table.
#[derive(Debug, Clone)]
pub struct ColumnStats {
    pub name: String,
    pub kind: &'static str,
    pub non_null: usize,
    pub nulls: usize,
    pub min: Option<f64>,
    pub mean: Option<f64>,
    pub max: Option<f64>,
}

/// Describe every column: inferred kind, null counts, and numeric
/// min/mean/max where applicable.
pub fn describe(table: &Table) -> Vec<ColumnStats> {
    let all: Vec<usize> = (0..table.len()).collect();

    table
        .headers
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let nulls = all
                .iter()
                .filter(|&&i| table.rows[i][col].is_null())
                .count();
            let non_null = table.len() - nulls;

            let numeric = numeric_values(table, &all, col);
            let kind = column_kind(table, col);

            let (min, max) = if numeric.is_empty() {
                (None, None)
            } else {
                (
                    Some(numeric.iter().cloned().fold(f64::INFINITY, f64::min)),
                    Some(numeric.iter().cloned().fold(f64::NEG_INFINITY, f64::max)),
                )
            };

            ColumnStats {
                name: name.clone(),
                kind,
                non_null,
                nulls,
                min,
                mean: column_mean(table, &all, col),
                max,
            }
        })
        .collect()
}

fn column_kind(table: &Table, col: usize) -> &'static str {
    let mut saw_numeric = false;
    let mut saw_text = false;
    let mut saw_bool = false;
    for row in &table.rows {
        match &row[col] {
            CellValue::Integer(_) | CellValue::Float(_) => saw_numeric = true,
            CellValue::Text(_) => saw_text = true,
            CellValue::Bool(_) => saw_bool = true,
            CellValue::Null => {}
        }
    }
    match (saw_numeric, saw_text, saw_bool) {
        (true, false, false) => "numeric",
        (false, true, false) => "text",
        (false, false, true) => "bool",
        (false, false, false) => "empty",
        _ => "mixed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{apply, FilterSet, Predicate};

    fn jobs_table() -> Table {
        // 10 rows, 2 sectors; sector A rows: 0,1,3,5,7,8.
        let data = [
            ("A", "Lagos", "Roads", "Acme", 100.0, 150.0, 33.3),
            ("A", "Abuja", "Rail", "Borealis", 200.0, 260.0, 23.1),
            ("B", "Lagos", "Roads", "Corex", 300.0, 330.0, 9.1),
            ("A", "Lagos", "Power", "Acme", 400.0, 520.0, 23.1),
            ("B", "Abuja", "Rail", "Dyna", 500.0, 550.0, 9.1),
            ("A", "Abuja", "Roads", "Epoch", 600.0, 780.0, 23.1),
            ("B", "Lagos", "Power", "Corex", 700.0, 770.0, 9.1),
            ("A", "Lagos", "Rail", "Fulcrum", 800.0, 1040.0, 23.1),
            ("A", "Abuja", "Power", "Acme", 900.0, 1170.0, 23.1),
            ("B", "Abuja", "Roads", "Dyna", 1000.0, 1100.0, 9.1),
        ];
        let rows = data
            .iter()
            .map(|(s, l, j, c, cost, rev, margin)| {
                vec![
                    CellValue::Text(s.to_string()),
                    CellValue::Text(l.to_string()),
                    CellValue::Text(j.to_string()),
                    CellValue::Text(c.to_string()),
                    CellValue::Float(*cost),
                    CellValue::Float(*rev),
                    CellValue::Float(*margin),
                ]
            })
            .collect();
        Table::from_rows(
            vec![
                "Sector Name".into(),
                "Location".into(),
                "Job Type".into(),
                "Customer Name".into(),
                "Actual Cost".into(),
                "Actual Revenue".into(),
                "Actual Margin %".into(),
            ],
            rows,
        )
    }

    fn all_rows(table: &Table) -> Vec<usize> {
        (0..table.len()).collect()
    }

    #[test]
    fn sector_selection_sums_only_matching_rows() {
        let t = jobs_table();
        let filters = FilterSet::from([(
            "Sector Name".to_string(),
            Predicate::Equals("A".to_string()),
        )]);
        let view = apply(&t, &filters).unwrap();
        assert_eq!(view, vec![0, 1, 3, 5, 7, 8]);

        let summary = summarize(&t, &view, &ColumnMap::default()).unwrap();
        assert_eq!(summary.row_count, 6);
        assert!((summary.total_cost - 3000.0).abs() < 1e-9);
        assert!((summary.total_revenue - 3920.0).abs() < 1e-9);
    }

    #[test]
    fn empty_view_yields_zero_sums_and_no_mean() {
        let t = jobs_table();
        let summary = summarize(&t, &[], &ColumnMap::default()).unwrap();
        assert_eq!(summary.total_cost, 0.0);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.avg_margin, None);
        assert_eq!(summary.row_count, 0);
    }

    #[test]
    fn missing_numeric_column_is_fatal() {
        let t = jobs_table();
        let mut columns = ColumnMap::default();
        columns.cost = "Projected Cost".to_string();
        assert!(summarize(&t, &all_rows(&t), &columns).is_err());
    }

    #[test]
    fn group_totals_partition_the_view() {
        let t = jobs_table();
        let view = all_rows(&t);
        let groups = group_totals(&t, &view, "Job Type", "Actual Cost").unwrap();
        assert_eq!(
            groups,
            vec![
                ("Power".to_string(), 2000.0),
                ("Rail".to_string(), 1500.0),
                ("Roads".to_string(), 2000.0),
            ]
        );
    }

    #[test]
    fn shares_sum_to_one_hundred() {
        let t = jobs_table();
        let groups =
            group_totals(&t, &all_rows(&t), "Customer Name", "Actual Revenue").unwrap();
        let ranked = rank_groups(groups, None);
        let total: f64 = ranked.iter().filter_map(|g| g.share).sum();
        assert!((total - 100.0).abs() < 1e-9);
    }

    #[test]
    fn top_n_keeps_whole_table_denominator() {
        let t = jobs_table();
        let groups =
            group_totals(&t, &all_rows(&t), "Customer Name", "Actual Revenue").unwrap();
        let top = rank_groups(groups, Some(5));
        assert_eq!(top.len(), 5);
        // Ranked descending.
        assert!(top.windows(2).all(|w| w[0].total >= w[1].total));
        // 6 distinct customers, so the kept shares fall short of 100.
        let kept: f64 = top.iter().filter_map(|g| g.share).sum();
        assert!(kept < 100.0);
    }

    #[test]
    fn empty_view_shares_are_none_not_nan() {
        let ranked = rank_groups(Vec::new(), Some(5));
        assert!(ranked.is_empty());
        let ranked = rank_groups(vec![("A".to_string(), 0.0)], None);
        assert_eq!(ranked[0].share, None);
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 5.0];
        let bins = histogram(&values, 5);
        assert_eq!(bins.len(), 5);
        assert_eq!(bins.iter().map(|(_, c)| c).sum::<usize>(), values.len());
        // The max lands in the last bin.
        assert_eq!(bins[4].1, 3);
    }

    #[test]
    fn histogram_handles_degenerate_input() {
        assert!(histogram(&[], 10).is_empty());
        assert_eq!(histogram(&[7.0, 7.0], 10), vec![(7.0, 2)]);
    }

    #[test]
    fn describe_reports_kinds_and_null_counts() {
        let t = Table::from_rows(
            vec!["name".into(), "cost".into()],
            vec![
                vec![CellValue::Text("a".into()), CellValue::Float(1.0)],
                vec![CellValue::Null, CellValue::Float(3.0)],
            ],
        );
        let stats = describe(&t);
        assert_eq!(stats[0].kind, "text");
        assert_eq!(stats[0].nulls, 1);
        assert_eq!(stats[1].kind, "numeric");
        assert_eq!(stats[1].mean, Some(2.0));
        assert_eq!(stats[1].min, Some(1.0));
        assert_eq!(stats[1].max, Some(3.0));
    }
}
