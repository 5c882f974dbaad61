use std::path::Path;

use serde_json::Value as JsonValue;

use super::js_literal::{self, ExtractError};
use super::model::{Dataset, Record};
use super::normalize::NameMap;
use crate::error::{snippet_around, PipelineError, Result};

// ---------------------------------------------------------------------------
// Device data (`devices.js`)
// ---------------------------------------------------------------------------

/// Load the device records from a `var <name> = [...]` JavaScript file.
///
/// Expected layout:
///
/// ```text
/// var devices = [
///   {manufacturer: "Acme", model: "X1", sample_size: 5, gyroscope_available: True,},
///   ...
/// ];
/// ```
pub fn load_devices(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).map_err(|source| PipelineError::SourceRead {
        path: path.to_path_buf(),
        source,
    })?;
    let dataset = parse_devices(&text).map_err(|e| match e {
        DeviceTextError::Malformed(reason) => PipelineError::MalformedSource {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        },
        DeviceTextError::Pipeline(e) => e,
    })?;
    log::debug!(
        "{}: {} records, {} columns",
        path.display(),
        dataset.len(),
        dataset.column_names.len()
    );
    Ok(dataset)
}

/// Failure of [`parse_devices`], before a path is attached.
#[derive(Debug)]
pub enum DeviceTextError {
    Malformed(ExtractError),
    Pipeline(PipelineError),
}

/// Parse the text of a device data file.
pub fn parse_devices(text: &str) -> std::result::Result<Dataset, DeviceTextError> {
    let (open, array) = js_literal::extract_array(text).map_err(DeviceTextError::Malformed)?;

    let json = js_literal::to_strict_json(array).map_err(|e| {
        DeviceTextError::Pipeline(parse_error(text, open, array, e.offset, e.message))
    })?;

    let root: JsonValue = serde_json::from_str(&json).map_err(|e| {
        let at = js_literal::offset_of(&json, e.line(), e.column());
        let (line, column) = file_position(text, open, e.line(), e.column());
        DeviceTextError::Pipeline(PipelineError::Parse {
            message: e.to_string(),
            line,
            column,
            snippet: snippet_around(&json, at),
        })
    })?;

    // extract_array guarantees the text starts with `[`.
    let items = root.as_array().map(Vec::as_slice).unwrap_or_default();
    let mut records = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let obj = item.as_object().ok_or_else(|| {
            DeviceTextError::Pipeline(PipelineError::Parse {
                message: format!("element {i} is not an object"),
                line: 0,
                column: 0,
                snippet: snippet_around(&item.to_string(), 0),
            })
        })?;
        records.push(Record::from_json_object(obj));
    }

    Ok(Dataset::from_records(records))
}

fn parse_error(text: &str, open: usize, array: &str, at: usize, message: String) -> PipelineError {
    let (line, column) = js_literal::line_column(text, open + at);
    PipelineError::Parse {
        message,
        line,
        column,
        snippet: snippet_around(array, at),
    }
}

/// Translate a position inside the extracted array to a position in the file.
///
/// The repaired JSON keeps the array's line breaks, so lines map one to one.
fn file_position(text: &str, open: usize, line: usize, column: usize) -> (usize, usize) {
    let (open_line, open_column) = js_literal::line_column(text, open);
    if line <= 1 {
        (open_line, open_column + column.saturating_sub(1))
    } else {
        (open_line + line - 1, column)
    }
}

// ---------------------------------------------------------------------------
// Column map (`column_map.json`)
// ---------------------------------------------------------------------------

/// Load the raw-name → canonical-name map, keeping the file's key order.
pub fn load_name_map(path: &Path) -> Result<NameMap> {
    let config_err = |reason: String| PipelineError::ConfigLoad {
        path: path.to_path_buf(),
        reason,
    };

    let text = std::fs::read_to_string(path).map_err(|e| config_err(e.to_string()))?;
    let root: JsonValue =
        serde_json::from_str(&text).map_err(|e| config_err(format!("invalid JSON: {e}")))?;
    let obj = root
        .as_object()
        .ok_or_else(|| config_err("expected a JSON object".to_string()))?;

    let mut pairs = Vec::with_capacity(obj.len());
    for (from, to) in obj {
        let to = to
            .as_str()
            .ok_or_else(|| config_err(format!("value for '{from}' is not a string")))?;
        pairs.push((from.clone(), to.to_string()));
    }
    let map = NameMap::new(pairs);
    log::debug!("{}: {} column renames", path.display(), map.len());
    Ok(map)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::data::model::FieldValue;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn fixture_yields_one_record_per_object_literal() {
        let ds = load_devices(&fixture("devices.js")).unwrap();
        assert_eq!(ds.len(), 6);
        assert_eq!(
            ds.records[0].get("gyr_avail"),
            Some(&FieldValue::Bool(true))
        );
        assert_eq!(ds.records[5].get("gyr_avail"), Some(&FieldValue::Bool(false)));
    }

    #[test]
    fn missing_declaration_is_malformed_source() {
        let err = load_devices(&fixture("no_declaration.js")).unwrap_err();
        assert!(matches!(err, PipelineError::MalformedSource { .. }), "{err}");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = load_devices(&fixture("does_not_exist.js")).unwrap_err();
        assert!(matches!(err, PipelineError::SourceRead { .. }));
    }

    #[test]
    fn invalid_json_reports_position_and_snippet() {
        let text = "// data\nvar d = [\n  {a: 1},\n  {b: 2 3},\n];";
        let Err(DeviceTextError::Pipeline(PipelineError::Parse { line, snippet, .. })) =
            parse_devices(text)
        else {
            panic!("expected parse error");
        };
        assert_eq!(line, 4);
        assert!(snippet.contains("\"b\""), "{snippet}");
    }

    #[test]
    fn tokenizer_error_reports_file_line() {
        let text = "var d = [\n{a: nope}\n];";
        let Err(DeviceTextError::Pipeline(PipelineError::Parse { line, column, .. })) =
            parse_devices(text)
        else {
            panic!("expected parse error");
        };
        assert_eq!((line, column), (2, 5));
    }

    #[test]
    fn non_object_element_is_a_parse_error() {
        let res = parse_devices("var d = [{a: 1}, 2];");
        assert!(matches!(
            res,
            Err(DeviceTextError::Pipeline(PipelineError::Parse { .. }))
        ));
    }

    #[test]
    fn empty_array_is_an_empty_dataset() {
        let ds = parse_devices("var d = [];").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn name_map_keeps_file_order() {
        let map = load_name_map(&fixture("column_map.json")).unwrap();
        let pairs: Vec<(&str, &str)> = map.iter().collect();
        assert_eq!(pairs[0], ("mfr", "manufacturer"));
        assert_eq!(pairs.len(), 4);
    }

    #[test]
    fn name_map_failures_are_config_errors() {
        for name in ["does_not_exist.json", "no_declaration.js", "bad_column_map.json"] {
            let err = load_name_map(&fixture(name)).unwrap_err();
            assert!(matches!(err, PipelineError::ConfigLoad { .. }), "{name}: {err}");
        }
    }
}
