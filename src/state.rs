use std::sync::Arc;

use crate::data::filter::{filtered_indices, ViewFilter};
use crate::data::pipeline::DeviceCatalog;

const DEFAULT_MANUFACTURER: &str = "Apple";
const DEFAULT_VARIABLE: &str = "accelerometer_rate";

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Filters,
    Plot,
    Data,
    About,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Filters, Tab::Plot, Tab::Data, Tab::About];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Filters => "Filters",
            Tab::Plot => "Plot",
            Tab::Data => "Data",
            Tab::About => "About",
        }
    }
}

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Device catalog built at startup; shared, never mutated.
    pub catalog: Arc<DeviceCatalog>,

    /// Manufacturer and model-text selection.
    pub filter: ViewFilter,

    /// Numeric column driving the charts.
    pub variable: Option<String>,

    /// Indices of records passing the current filter (cached).
    pub visible_indices: Vec<usize>,

    pub tab: Tab,
}

impl AppState {
    /// Start with the default manufacturer and variable when available.
    pub fn new(catalog: Arc<DeviceCatalog>) -> Self {
        let manufacturer = pick_default(catalog.manufacturers(), DEFAULT_MANUFACTURER);
        let variable = pick_default(catalog.numeric_columns(), DEFAULT_VARIABLE);
        let mut state = AppState {
            catalog,
            filter: ViewFilter {
                manufacturer,
                model_text: String::new(),
            },
            variable,
            visible_indices: Vec::new(),
            tab: Tab::Filters,
        };
        state.refilter();
        state
    }

    /// Recompute `visible_indices` after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(self.catalog.dataset(), &self.filter);
    }

    pub fn set_manufacturer(&mut self, manufacturer: String) {
        if self.filter.manufacturer.as_deref() != Some(manufacturer.as_str()) {
            self.filter.manufacturer = Some(manufacturer);
            self.refilter();
        }
    }

    pub fn set_variable(&mut self, variable: String) {
        self.variable = Some(variable);
    }
}

fn pick_default(options: &[String], preferred: &str) -> Option<String> {
    options
        .iter()
        .find(|o| *o == preferred)
        .or_else(|| options.first())
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::parse_devices;
    use crate::data::normalize::NameMap;

    fn catalog(source: &str) -> Arc<DeviceCatalog> {
        let raw = parse_devices(source).unwrap();
        Arc::new(DeviceCatalog::from_parts(raw, &NameMap::default(), 1).unwrap())
    }

    #[test]
    fn defaults_prefer_apple_and_accelerometer() {
        let state = AppState::new(catalog(
            r#"var d = [
                {manufacturer: "Acme", model: "A1", sample_size: 3, accelerometer_rate: 100, gyroscope_rate: 1},
                {manufacturer: "Apple", model: "iPhone", sample_size: 3, accelerometer_rate: 200},
            ];"#,
        ));
        assert_eq!(state.filter.manufacturer.as_deref(), Some("Apple"));
        assert_eq!(state.variable.as_deref(), Some("accelerometer_rate"));
        assert_eq!(state.visible_indices, [1]);
    }

    #[test]
    fn defaults_fall_back_to_first_option() {
        let state = AppState::new(catalog(
            r#"var d = [{manufacturer: "Zed", model: "Z", sample_size: 2}];"#,
        ));
        assert_eq!(state.filter.manufacturer.as_deref(), Some("Zed"));
        assert_eq!(state.variable.as_deref(), Some("sample_size"));
    }

    #[test]
    fn changing_filter_recomputes_view_only() {
        let mut state = AppState::new(catalog(
            r#"var d = [
                {manufacturer: "Apple", model: "iPhone 12", sample_size: 2},
                {manufacturer: "Apple", model: "iPad", sample_size: 2},
                {manufacturer: "Acme", model: "A1", sample_size: 2},
            ];"#,
        ));
        state.filter.model_text = "ipad".into();
        state.refilter();
        assert_eq!(state.visible_indices, [1]);

        state.set_manufacturer("Acme".into());
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.catalog.dataset().len(), 3);
    }
}
