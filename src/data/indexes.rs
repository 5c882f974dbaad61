use std::collections::{BTreeSet, HashMap};

use super::model::{Dataset, MANUFACTURER};

/// Distinct non-empty manufacturers, ordered case-insensitively.
///
/// Original casing is kept; names differing only in case are both listed.
pub fn manufacturers_sorted(dataset: &Dataset) -> Vec<String> {
    let distinct: BTreeSet<&str> = dataset
        .records
        .iter()
        .filter_map(|r| r.get_str(MANUFACTURER))
        .filter(|m| !m.is_empty())
        .collect();
    let mut out: Vec<String> = distinct.into_iter().map(str::to_string).collect();
    out.sort_by(|a, b| {
        a.to_lowercase()
            .cmp(&b.to_lowercase())
            .then_with(|| a.cmp(b))
    });
    out
}

/// Columns holding only numbers (or nulls), with at least one number.
pub fn numeric_columns_sorted(dataset: &Dataset) -> Vec<String> {
    // column → has a numeric value; columns with a non-numeric value are removed.
    let mut numeric: HashMap<&str, bool> = dataset
        .column_names
        .iter()
        .map(|c| (c.as_str(), false))
        .collect();

    for rec in &dataset.records {
        for (name, value) in rec.fields() {
            if value.is_null() {
                continue;
            }
            if value.is_numeric() {
                if let Some(seen) = numeric.get_mut(name) {
                    *seen = true;
                }
            } else {
                numeric.remove(name);
            }
        }
    }

    let mut out: Vec<String> = numeric
        .into_iter()
        .filter(|&(_, seen)| seen)
        .map(|(name, _)| name.to_string())
        .collect();
    out.sort();
    out
}
