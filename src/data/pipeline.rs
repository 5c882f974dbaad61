use std::collections::BTreeSet;
use std::sync::Arc;

use super::dedupe::dedupe;
use super::eligibility::filter_eligible;
use super::indexes::{manufacturers_sorted, numeric_columns_sorted};
use super::loader::{load_devices, load_name_map};
use super::model::{Dataset, MANUFACTURER, MODEL, SAMPLE_SIZE};
use super::normalize::{normalize, NameMap};
use crate::config::Config;
use crate::error::{PipelineError, Result};

// ---------------------------------------------------------------------------
// DeviceCatalog – the read-only result of the startup pipeline
// ---------------------------------------------------------------------------

/// Deduplicated, eligibility-filtered devices plus the indexes the UI needs.
///
/// Built once; there is no way to mutate it afterwards.
#[derive(Debug)]
pub struct DeviceCatalog {
    dataset: Dataset,
    eligible: BTreeSet<String>,
    manufacturers: Vec<String>,
    numeric_columns: Vec<String>,
}

impl DeviceCatalog {
    /// Load, normalize, deduplicate, filter and index the configured files.
    pub fn build(config: &Config) -> Result<Self> {
        let raw = load_devices(&config.data_file)?;
        log::info!("loaded {} device records", raw.len());
        let name_map = load_name_map(&config.column_map_file)?;
        Self::from_parts(raw, &name_map, config.min_sample_size)
    }

    /// Run the in-memory steps on an already loaded dataset.
    pub fn from_parts(raw: Dataset, name_map: &NameMap, min_sample_size: u64) -> Result<Self> {
        let normalized = normalize(raw, name_map);
        require_column(&normalized, MANUFACTURER)?;
        require_column(&normalized, MODEL)?;

        let deduped = dedupe(normalized, MODEL, SAMPLE_SIZE);
        log::info!("{} records after model deduplication", deduped.len());

        let (dataset, eligible) =
            filter_eligible(deduped, MANUFACTURER, SAMPLE_SIZE, min_sample_size as f64);
        log::info!(
            "{} records from {} manufacturers with total sample size >= {min_sample_size}",
            dataset.len(),
            eligible.len()
        );

        let manufacturers = manufacturers_sorted(&dataset);
        let numeric_columns = numeric_columns_sorted(&dataset);
        Ok(DeviceCatalog {
            dataset,
            eligible,
            manufacturers,
            numeric_columns,
        })
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Manufacturers meeting the sample-size threshold.
    pub fn eligible(&self) -> &BTreeSet<String> {
        &self.eligible
    }

    /// Eligible manufacturers in case-insensitive order.
    pub fn manufacturers(&self) -> &[String] {
        &self.manufacturers
    }

    pub fn numeric_columns(&self) -> &[String] {
        &self.numeric_columns
    }
}

fn require_column(dataset: &Dataset, field: &str) -> Result<()> {
    // An empty source has nothing to mismatch.
    if dataset.is_empty() || dataset.has_column(field) {
        Ok(())
    } else {
        Err(PipelineError::MissingField {
            field: field.to_string(),
        })
    }
}

// ---------------------------------------------------------------------------
// PipelineState – UNINITIALIZED → READY | FAILED
// ---------------------------------------------------------------------------

/// Lifecycle of the startup pipeline. `Ready` and `Failed` are terminal.
#[derive(Debug, Default)]
pub enum PipelineState {
    #[default]
    Uninitialized,
    Ready(Arc<DeviceCatalog>),
    Failed(PipelineError),
}

impl PipelineState {
    /// Run the pipeline. Only an uninitialized state transitions; any other
    /// state is returned as is.
    pub fn initialize(self, config: &Config) -> Self {
        match self {
            PipelineState::Uninitialized => match DeviceCatalog::build(config) {
                Ok(catalog) => PipelineState::Ready(Arc::new(catalog)),
                Err(e) => PipelineState::Failed(e),
            },
            done => done,
        }
    }

    pub fn catalog(&self) -> Option<&Arc<DeviceCatalog>> {
        match self {
            PipelineState::Ready(catalog) => Some(catalog),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::Settings;
    use crate::data::loader::parse_devices;

    const SCENARIO: &str = r#"var d=[{manufacturer:"Acme",model:"X1",sample_size:5},{manufacturer:"Acme",model:"X1",sample_size:9},{manufacturer:"Acme",model:"X2",sample_size:2},];"#;

    fn scenario(min_total: u64) -> DeviceCatalog {
        let raw = parse_devices(SCENARIO).unwrap();
        DeviceCatalog::from_parts(raw, &NameMap::default(), min_total).unwrap()
    }

    fn fixtures_config(min_sample_size: u64) -> Config {
        let base = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
        Config::resolve(
            base,
            Settings {
                min_sample_size: Some(min_sample_size),
                ..Settings::default()
            },
        )
    }

    #[test]
    fn scenario_one_keeps_both_models() {
        let catalog = scenario(10);
        let ds = catalog.dataset();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].model(), Some("X1"));
        assert_eq!(ds.records[0].sample_size(), Some(9.0));
        assert_eq!(ds.records[1].model(), Some("X2"));
        assert_eq!(ds.records[1].sample_size(), Some(2.0));
        assert_eq!(catalog.manufacturers(), ["Acme"]);
    }

    #[test]
    fn scenario_two_excludes_manufacturer_below_threshold() {
        let catalog = scenario(12);
        assert!(catalog.dataset().is_empty());
        assert!(catalog.manufacturers().is_empty());
        assert!(catalog.eligible().is_empty());
    }

    #[test]
    fn threshold_equal_to_total_is_eligible() {
        // X1 kept at 9, X2 at 2.
        assert_eq!(scenario(11).manufacturers(), ["Acme"]);
    }

    #[test]
    fn builds_from_fixture_files() {
        let catalog = DeviceCatalog::build(&fixtures_config(10)).unwrap();
        assert_eq!(catalog.manufacturers(), ["Apple", "samsung"]);
        assert!(catalog
            .numeric_columns()
            .iter()
            .any(|c| c == "accelerometer_rate"));
        assert!(!catalog
            .numeric_columns()
            .iter()
            .any(|c| c == "gyroscope_available"));
        // One duplicated Apple model collapses to its larger sample.
        let models: Vec<&str> = catalog
            .dataset()
            .records
            .iter()
            .filter_map(|r| r.model())
            .collect();
        assert_eq!(models, ["iPhone 12", "Galaxy S21", "Galaxy A5", "iPhone SE"]);
    }

    #[test]
    fn column_map_without_key_fields_is_a_missing_field() {
        let raw = parse_devices(r#"var d = [{mfr: "Acme", model: "X1"}];"#).unwrap();
        let err = DeviceCatalog::from_parts(raw, &NameMap::default(), 0).unwrap_err();
        assert!(matches!(err, PipelineError::MissingField { ref field } if field == "manufacturer"));
    }

    #[test]
    fn failed_initialization_is_terminal() {
        let mut config = fixtures_config(10);
        config.data_file = config.base_dir.join("no_declaration.js");
        let state = PipelineState::Uninitialized.initialize(&config);
        assert!(matches!(
            state,
            PipelineState::Failed(PipelineError::MalformedSource { .. })
        ));
        let state = state.initialize(&fixtures_config(10));
        assert!(state.catalog().is_none());
    }

    #[test]
    fn ready_state_exposes_catalog() {
        let state = PipelineState::default().initialize(&fixtures_config(0));
        let catalog = state.catalog().unwrap();
        assert_eq!(catalog.manufacturers(), ["Apple", "Nokia", "samsung"]);
    }

    #[test]
    fn bundled_sample_data_builds() {
        let catalog = DeviceCatalog::build(&Config::default()).unwrap();
        assert_eq!(catalog.manufacturers(), ["Apple", "Google", "samsung"]);
        assert!(catalog
            .numeric_columns()
            .iter()
            .any(|c| c == "accelerometer_rate"));
    }

    #[test]
    fn missing_column_map_fails_the_pipeline() {
        let mut config = fixtures_config(10);
        config.column_map_file = config.base_dir.join("absent.json");
        let state = PipelineState::Uninitialized.initialize(&config);
        assert!(matches!(
            state,
            PipelineState::Failed(PipelineError::ConfigLoad { .. })
        ));
    }
}
