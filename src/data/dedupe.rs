use std::collections::HashMap;

use super::model::{Dataset, FieldValue, Record};

/// Hashable form of a key value. Integer and float keys with the same value
/// fall in the same group.
#[derive(Debug, PartialEq, Eq, Hash)]
enum GroupKey {
    Text(String),
    Number(u64),
    Flag(bool),
}

impl GroupKey {
    fn of(value: &FieldValue) -> Option<Self> {
        match value {
            FieldValue::String(s) if s.is_empty() => None,
            FieldValue::String(s) => Some(GroupKey::Text(s.clone())),
            FieldValue::Integer(_) | FieldValue::Float(_) => {
                let v = value.as_f64()?;
                // -0.0 and 0.0 compare equal.
                let v = if v == 0.0 { 0.0 } else { v };
                Some(GroupKey::Number(v.to_bits()))
            }
            FieldValue::Bool(b) => Some(GroupKey::Flag(*b)),
            FieldValue::Null => None,
        }
    }
}

/// Keep one record per `key_field` value: the one with the largest `rank_field`.
///
/// * Records whose key is missing, null or empty are never merged.
/// * A missing or non-numeric rank loses to any present rank.
/// * Ties go to the record seen first.
/// * The survivor of each group sits where the group's key first appeared.
pub fn dedupe(dataset: Dataset, key_field: &str, rank_field: &str) -> Dataset {
    let before = dataset.len();

    // Slots in output order; each holds the current best record of its group.
    let mut slots: Vec<Record> = Vec::with_capacity(before);
    let mut slot_of_key: HashMap<GroupKey, usize> = HashMap::new();

    for rec in dataset.records {
        let key = rec.get(key_field).and_then(GroupKey::of);
        let Some(key) = key else {
            slots.push(rec);
            continue;
        };
        match slot_of_key.get(&key) {
            Some(&slot) => {
                if rank(&rec, rank_field) > rank(&slots[slot], rank_field) {
                    slots[slot] = rec;
                }
            }
            None => {
                slot_of_key.insert(key, slots.len());
                slots.push(rec);
            }
        }
    }

    if slots.len() != before {
        log::debug!(
            "dedupe on '{key_field}': {before} → {} records",
            slots.len()
        );
    }
    Dataset::from_records(slots)
}

fn rank(rec: &Record, rank_field: &str) -> f64 {
    rec.get_f64(rank_field)
        .filter(|v| !v.is_nan())
        .unwrap_or(f64::NEG_INFINITY)
}
