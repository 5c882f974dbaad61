//! Numbers behind the dashboard charts, computed from a filtered view.
//!
//! Nothing here draws; the results are handed to `egui_plot` as is.

use thiserror::Error;

use super::model::Dataset;

/// Why a chart has nothing to show. Shown to the user as a notice.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ViewIssue {
    #[error("No data available.")]
    NoData,
    #[error("Column '{0}' not found in data.")]
    ColumnNotFound(String),
    #[error("No valid data for '{0}'.")]
    NoValidData(String),
}

fn check_view(dataset: &Dataset, indices: &[usize], column: &str) -> Result<(), ViewIssue> {
    if indices.is_empty() {
        return Err(ViewIssue::NoData);
    }
    if !dataset.has_column(column) {
        return Err(ViewIssue::ColumnNotFound(column.to_string()));
    }
    Ok(())
}

fn values<'a>(dataset: &'a Dataset, indices: &'a [usize], column: &'a str) -> impl Iterator<Item = f64> + 'a {
    indices
        .iter()
        .filter_map(move |&i| dataset.records.get(i)?.get_f64(column))
        .filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Box plot
// ---------------------------------------------------------------------------

/// Five-number summary with 1.5·IQR whiskers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSummary {
    pub lower_whisker: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub upper_whisker: f64,
    pub outliers: Vec<f64>,
    pub count: usize,
}

pub fn box_summary(dataset: &Dataset, indices: &[usize], column: &str) -> Result<BoxSummary, ViewIssue> {
    check_view(dataset, indices, column)?;
    let mut sorted: Vec<f64> = values(dataset, indices, column).collect();
    if sorted.is_empty() {
        return Err(ViewIssue::NoValidData(column.to_string()));
    }
    sorted.sort_by(f64::total_cmp);

    let q1 = quantile(&sorted, 0.25);
    let median = quantile(&sorted, 0.5);
    let q3 = quantile(&sorted, 0.75);
    let iqr = q3 - q1;
    let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    // Data is sorted, so the first value above the low fence is the lowest inlier.
    let lower_whisker = sorted.iter().copied().find(|&v| v >= low_fence).unwrap_or(q1);
    let upper_whisker = sorted.iter().copied().rev().find(|&v| v <= high_fence).unwrap_or(q3);
    let outliers = sorted
        .iter()
        .copied()
        .filter(|v| !(low_fence..=high_fence).contains(v))
        .collect();

    Ok(BoxSummary {
        lower_whisker,
        q1,
        median,
        q3,
        upper_whisker,
        outliers,
        count: sorted.len(),
    })
}

/// Linear-interpolated quantile of sorted, non-empty data.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ---------------------------------------------------------------------------
// Availability pie
// ---------------------------------------------------------------------------

/// Availability flag belonging to a measured variable:
/// `accelerometer_rate` → `accelerometer_available`.
pub fn availability_column(variable: &str) -> String {
    match variable.rsplit_once('_') {
        Some((sensor, _)) => format!("{sensor}_available"),
        None => "available".to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AvailabilityCounts {
    pub available: usize,
    pub unavailable: usize,
}

impl AvailabilityCounts {
    pub fn total(&self) -> usize {
        self.available + self.unavailable
    }
}

/// Count `true`/`false` in `column`; nulls and other values are ignored.
pub fn availability_counts(
    dataset: &Dataset,
    indices: &[usize],
    column: &str,
) -> Result<AvailabilityCounts, ViewIssue> {
    check_view(dataset, indices, column)?;
    let mut counts = AvailabilityCounts::default();
    for flag in indices
        .iter()
        .filter_map(|&i| dataset.records.get(i)?.get(column)?.as_bool())
    {
        if flag {
            counts.available += 1;
        } else {
            counts.unavailable += 1;
        }
    }
    if counts.total() == 0 {
        return Err(ViewIssue::NoValidData(column.to_string()));
    }
    Ok(counts)
}

// ---------------------------------------------------------------------------
// Ordered bars
// ---------------------------------------------------------------------------

/// `(model, value)` pairs in ascending value order; records without a value
/// are left out. Equal values keep their view order.
pub fn ordered_bars(
    dataset: &Dataset,
    indices: &[usize],
    column: &str,
) -> Result<Vec<(String, f64)>, ViewIssue> {
    check_view(dataset, indices, column)?;
    let mut bars: Vec<(String, f64)> = indices
        .iter()
        .filter_map(|&i| {
            let rec = dataset.records.get(i)?;
            let value = rec.get_f64(column).filter(|v| v.is_finite())?;
            let label = rec.model().unwrap_or("(unnamed)").to_string();
            Some((label, value))
        })
        .collect();
    if bars.is_empty() {
        return Err(ViewIssue::NoValidData(column.to_string()));
    }
    bars.sort_by(|a, b| a.1.total_cmp(&b.1));
    Ok(bars)
}

/// `accelerometer_rate` → `Accelerometer Rate`.
pub fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
