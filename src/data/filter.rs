use std::collections::BTreeMap;

use super::model::{DataError, Table};

/// Dropdown option meaning "impose no constraint on this column".
pub const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// A per-column constraint. Predicates on different columns are ANDed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Exact match on the cell's string rendering. The [`ALL`] sentinel
    /// imposes no constraint.
    Equals(String),
    /// Case-insensitive substring match on the cell's string rendering.
    /// An empty query imposes no constraint.
    Contains(String),
}

impl Predicate {
    /// Whether this predicate actually constrains anything.
    pub fn is_active(&self) -> bool {
        match self {
            Predicate::Equals(v) => v != ALL,
            Predicate::Contains(q) => !q.is_empty(),
        }
    }

    fn matches(&self, cell_text: &str) -> bool {
        match self {
            Predicate::Equals(v) => v == ALL || cell_text == v,
            Predicate::Contains(q) => {
                q.is_empty()
                    || cell_text
                        .to_lowercase()
                        .contains(&q.to_lowercase())
            }
        }
    }
}

/// Column name → predicate. Absent columns are unconstrained.
pub type FilterSet = BTreeMap<String, Predicate>;

// ---------------------------------------------------------------------------
// apply
// ---------------------------------------------------------------------------

/// Return indices of rows satisfying every active predicate, in original
/// row order. An empty result is valid; a predicate naming a column the
/// table does not have aborts the update.
pub fn apply(table: &Table, filters: &FilterSet) -> Result<Vec<usize>, DataError> {
    // Resolve names once, skipping inactive predicates.
    let mut active: Vec<(usize, &Predicate)> = Vec::new();
    for (name, pred) in filters {
        if !pred.is_active() {
            continue;
        }
        active.push((table.require_column(name)?, pred));
    }

    Ok(table
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            active
                .iter()
                .all(|(col, pred)| pred.matches(&row[*col].to_string()))
        })
        .map(|(i, _)| i)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::CellValue;

    fn jobs_table() -> Table {
        let sectors = ["A", "A", "B", "A", "B", "A", "B", "A", "A", "B"];
        let locations = [
            "Lagos", "Abuja", "Lagos", "Lagos", "Abuja", "Abuja", "Lagos", "Lagos", "Abuja",
            "Abuja",
        ];
        let rows = sectors
            .iter()
            .zip(locations)
            .enumerate()
            .map(|(i, (s, l))| {
                vec![
                    CellValue::Text(s.to_string()),
                    CellValue::Text(l.to_string()),
                    CellValue::Float(100.0 * (i + 1) as f64),
                ]
            })
            .collect();
        Table::from_rows(
            vec![
                "Sector Name".into(),
                "Location".into(),
                "Actual Cost".into(),
            ],
            rows,
        )
    }

    fn equals(col: &str, v: &str) -> FilterSet {
        FilterSet::from([(col.to_string(), Predicate::Equals(v.to_string()))])
    }

    #[test]
    fn empty_filter_set_returns_every_row() {
        let t = jobs_table();
        assert_eq!(apply(&t, &FilterSet::new()).unwrap().len(), t.len());
    }

    #[test]
    fn all_sentinel_and_empty_query_are_no_constraints() {
        let t = jobs_table();
        let filters = FilterSet::from([
            ("Sector Name".to_string(), Predicate::Equals(ALL.to_string())),
            ("Location".to_string(), Predicate::Contains(String::new())),
        ]);
        let view = apply(&t, &filters).unwrap();
        assert_eq!(view, (0..t.len()).collect::<Vec<_>>());
    }

    #[test]
    fn equality_keeps_only_matching_rows_in_order() {
        let t = jobs_table();
        let view = apply(&t, &equals("Sector Name", "A")).unwrap();
        assert_eq!(view, vec![0, 1, 3, 5, 7, 8]);
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        let t = jobs_table();
        let filters = FilterSet::from([(
            "Location".to_string(),
            Predicate::Contains("lag".to_string()),
        )]);
        let view = apply(&t, &filters).unwrap();
        assert_eq!(view, vec![0, 2, 3, 6, 7]);
    }

    #[test]
    fn predicates_on_distinct_columns_are_anded() {
        let t = jobs_table();
        let mut filters = equals("Sector Name", "A");
        filters.insert(
            "Location".to_string(),
            Predicate::Equals("Lagos".to_string()),
        );
        assert_eq!(apply(&t, &filters).unwrap(), vec![0, 3, 7]);
    }

    #[test]
    fn strengthening_never_grows_the_view() {
        let t = jobs_table();
        let loose = apply(&t, &equals("Sector Name", "A")).unwrap();
        let mut stricter = equals("Sector Name", "A");
        stricter.insert(
            "Location".to_string(),
            Predicate::Contains("abu".to_string()),
        );
        let tight = apply(&t, &stricter).unwrap();
        assert!(tight.len() <= loose.len());
        assert!(tight.iter().all(|i| loose.contains(i)));
    }

    #[test]
    fn sequential_filtering_equals_the_combined_filter_set() {
        let t = jobs_table();
        let first = apply(&t, &equals("Sector Name", "A")).unwrap();
        let second = apply(
            &t,
            &FilterSet::from([(
                "Location".to_string(),
                Predicate::Contains("lag".to_string()),
            )]),
        )
        .unwrap();
        // Restricting the first view by the second predicate...
        let sequential: Vec<usize> = first
            .iter()
            .copied()
            .filter(|i| second.contains(i))
            .collect();

        // ...matches applying both predicates at once.
        let mut combined = equals("Sector Name", "A");
        combined.insert(
            "Location".to_string(),
            Predicate::Contains("lag".to_string()),
        );
        assert_eq!(sequential, apply(&t, &combined).unwrap());
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let t = jobs_table();
        let view = apply(&t, &equals("Sector Name", "Z")).unwrap();
        assert!(view.is_empty());
    }

    #[test]
    fn unknown_column_aborts_the_update() {
        let t = jobs_table();
        assert!(apply(&t, &equals("Business Vertical", "A")).is_err());
    }

    #[test]
    fn selecting_all_after_a_sector_restores_the_full_view() {
        let t = jobs_table();
        let narrowed = apply(&t, &equals("Sector Name", "B")).unwrap();
        assert!(narrowed.len() < t.len());
        let restored = apply(&t, &equals("Sector Name", ALL)).unwrap();
        assert_eq!(restored.len(), t.len());
    }
}
