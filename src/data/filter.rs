use super::model::Dataset;

// ---------------------------------------------------------------------------
// Filter predicate: manufacturer + model text
// ---------------------------------------------------------------------------

/// The user's current selection in the filter panel.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewFilter {
    /// Selected manufacturer. `None` selects nothing.
    pub manufacturer: Option<String>,
    /// Text that must occur in the model name (case-insensitive, trimmed).
    pub model_text: String,
}

/// Return indices of records that pass the filter.
///
/// A record passes when:
/// * its manufacturer equals the selected one, and
/// * the trimmed search text is empty, or its model contains the text
///   ignoring case. Records without a model never match a non-empty text.
pub fn filtered_indices(dataset: &Dataset, filter: &ViewFilter) -> Vec<usize> {
    let Some(manufacturer) = filter.manufacturer.as_deref() else {
        return Vec::new();
    };
    let needle = filter.model_text.trim().to_lowercase();

    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| rec.manufacturer() == Some(manufacturer))
        .filter(|(_, rec)| {
            needle.is_empty()
                || rec
                    .model()
                    .is_some_and(|model| model.to_lowercase().contains(&needle))
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FieldValue, Record, MANUFACTURER, MODEL};

    fn device(manufacturer: &str, model: Option<&str>) -> Record {
        let mut fields = vec![(
            MANUFACTURER.to_string(),
            FieldValue::String(manufacturer.to_string()),
        )];
        if let Some(m) = model {
            fields.push((MODEL.to_string(), FieldValue::String(m.to_string())));
        }
        Record::new(fields)
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            device("Apple", Some("iPhone 12")),
            device("samsung", Some("Galaxy S21")),
            device("Apple", Some("iPad Air")),
            device("Apple", None),
            device("Apple", Some("IPHONE SE")),
        ])
    }

    fn filter(manufacturer: Option<&str>, text: &str) -> ViewFilter {
        ViewFilter {
            manufacturer: manufacturer.map(str::to_string),
            model_text: text.to_string(),
        }
    }

    #[test]
    fn manufacturer_only() {
        assert_eq!(filtered_indices(&dataset(), &filter(Some("Apple"), "")), [0, 2, 3, 4]);
    }

    #[test]
    fn model_text_is_case_insensitive_and_trimmed() {
        assert_eq!(
            filtered_indices(&dataset(), &filter(Some("Apple"), "  iphone ")),
            [0, 4]
        );
    }

    #[test]
    fn no_match_is_an_empty_view() {
        assert!(filtered_indices(&dataset(), &filter(Some("Apple"), "pixel")).is_empty());
        assert!(filtered_indices(&dataset(), &filter(Some("Google"), "")).is_empty());
        assert!(filtered_indices(&dataset(), &filter(None, "")).is_empty());
    }

    #[test]
    fn filtering_does_not_touch_the_dataset() {
        let ds = dataset();
        let before = ds.records.clone();
        let _ = filtered_indices(&ds, &filter(Some("Apple"), "ipad"));
        assert_eq!(ds.records, before);
    }
}
