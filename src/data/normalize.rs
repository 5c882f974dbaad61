use std::collections::{BTreeSet, HashMap};

use super::model::{Dataset, FieldValue, Record};

// ---------------------------------------------------------------------------
// NameMap – raw column name → canonical column name
// ---------------------------------------------------------------------------

/// Column renames in the order they were loaded.
#[derive(Debug, Clone, Default)]
pub struct NameMap {
    pairs: Vec<(String, String)>,
    index: HashMap<String, usize>,
}

impl NameMap {
    /// Build from ordered pairs. A repeated source name keeps its last target.
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        let index = pairs
            .iter()
            .enumerate()
            .map(|(i, (from, _))| (from.clone(), i))
            .collect();
        NameMap { pairs, index }
    }

    pub fn target(&self, name: &str) -> Option<&str> {
        self.index.get(name).map(|&i| self.pairs[i].1.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(a, b)| (a.as_str(), b.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Renaming
// ---------------------------------------------------------------------------

/// Rename the fields of every record through `map`.
///
/// Each field name is looked up exactly once, so a cyclic map swaps names
/// instead of renaming twice. If two fields end up with the same name, the
/// later field's value wins and takes the earlier field's position.
pub fn normalize(dataset: Dataset, map: &NameMap) -> Dataset {
    if map.is_empty() {
        return dataset;
    }
    let mut collided: BTreeSet<String> = BTreeSet::new();
    let records = dataset
        .records
        .into_iter()
        .map(|rec| rename_record(rec, map, &mut collided))
        .collect();
    for name in &collided {
        log::warn!("several source columns renamed to '{name}'; the last one wins");
    }
    Dataset::from_records(records)
}

fn rename_record(rec: Record, map: &NameMap, collided: &mut BTreeSet<String>) -> Record {
    let mut fields: Vec<(String, FieldValue)> = Vec::with_capacity(rec.len());
    for (name, value) in rec.into_fields() {
        let name = match map.target(&name) {
            Some(target) => target.to_string(),
            None => name,
        };
        match fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => {
                if !collided.contains(&name) {
                    collided.insert(name.clone());
                }
                slot.1 = value;
            }
            None => fields.push((name, value)),
        }
    }
    Record::new(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> NameMap {
        NameMap::new(
            pairs
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        )
    }

    fn rec(fields: &[(&str, i64)]) -> Record {
        Record::new(
            fields
                .iter()
                .map(|(k, v)| (k.to_string(), FieldValue::Integer(*v)))
                .collect(),
        )
    }

    fn names(rec: &Record) -> Vec<&str> {
        rec.field_names().collect()
    }

    #[test]
    fn mapped_field_replaces_original_key() {
        let ds = Dataset::from_records(vec![Record::new(vec![
            ("m".into(), FieldValue::String("Acme".into())),
            ("model".into(), FieldValue::String("X1".into())),
        ])]);
        let out = normalize(ds, &map(&[("m", "manufacturer")]));
        let r = &out.records[0];
        assert_eq!(r.manufacturer(), Some("Acme"));
        assert!(r.get("m").is_none());
        assert_eq!(out.column_names, vec!["manufacturer", "model"]);
    }

    #[test]
    fn renaming_keeps_field_order() {
        let ds = Dataset::from_records(vec![rec(&[("a", 1), ("b", 2), ("c", 3)])]);
        let out = normalize(ds, &map(&[("b", "beta")]));
        assert_eq!(names(&out.records[0]), ["a", "beta", "c"]);
    }

    #[test]
    fn normalizing_twice_equals_once() {
        let m = map(&[("acc_r", "accelerometer_rate"), ("gyr_r", "gyroscope_rate")]);
        let ds = Dataset::from_records(vec![rec(&[("acc_r", 100), ("gyr_r", 200), ("x", 1)])]);
        let once = normalize(ds, &m);
        let twice = normalize(once.clone(), &m);
        assert_eq!(once.records, twice.records);
        assert_eq!(once.column_names, twice.column_names);
    }

    #[test]
    fn cyclic_map_swaps_without_double_renaming() {
        let ds = Dataset::from_records(vec![rec(&[("a", 1), ("b", 2)])]);
        let out = normalize(ds, &map(&[("a", "b"), ("b", "a")]));
        let r = &out.records[0];
        assert_eq!(names(r), ["b", "a"]);
        assert_eq!(r.get_f64("b"), Some(1.0));
        assert_eq!(r.get_f64("a"), Some(2.0));
    }

    #[test]
    fn collision_keeps_later_value_at_earlier_position() {
        let ds = Dataset::from_records(vec![rec(&[("x", 1), ("y", 2), ("z", 3)])]);
        let out = normalize(ds, &map(&[("x", "rate"), ("z", "rate")]));
        let r = &out.records[0];
        assert_eq!(names(r), ["rate", "y"]);
        assert_eq!(r.get_f64("rate"), Some(3.0));
    }

    #[test]
    fn unmapped_fields_pass_through() {
        let ds = Dataset::from_records(vec![rec(&[("keep", 7)])]);
        let out = normalize(ds, &map(&[("other", "renamed")]));
        assert_eq!(out.records[0].get_f64("keep"), Some(7.0));
    }
}
