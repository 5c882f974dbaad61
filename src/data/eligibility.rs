use std::collections::{BTreeMap, BTreeSet};

use super::model::Dataset;

/// Keep the records whose group reaches `min_total` when summing `sum_field`.
///
/// Groups are the string values of `group_field`; records without one belong
/// to no group and are dropped. Missing or non-numeric `sum_field` values add
/// nothing. The bound is inclusive. Record order is preserved.
pub fn filter_eligible(
    dataset: Dataset,
    group_field: &str,
    sum_field: &str,
    min_total: f64,
) -> (Dataset, BTreeSet<String>) {
    let totals = group_totals(&dataset, group_field, sum_field);
    let eligible: BTreeSet<String> = totals
        .iter()
        .filter(|&(_, &total)| total >= min_total)
        .map(|(group, _)| group.clone())
        .collect();

    for (group, total) in totals.iter().filter(|(g, _)| !eligible.contains(*g)) {
        log::debug!("'{group}' excluded: total {sum_field} {total} < {min_total}");
    }

    let records = dataset
        .records
        .into_iter()
        .filter(|rec| {
            rec.get_str(group_field)
                .is_some_and(|group| eligible.contains(group))
        })
        .collect();

    (Dataset::from_records(records), eligible)
}

/// Sum of `sum_field` per `group_field` value.
pub fn group_totals(dataset: &Dataset, group_field: &str, sum_field: &str) -> BTreeMap<String, f64> {
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for rec in &dataset.records {
        let Some(group) = rec.get_str(group_field) else {
            continue;
        };
        let value = rec.get_f64(sum_field).filter(|v| v.is_finite()).unwrap_or(0.0);
        *totals.entry(group.to_string()).or_insert(0.0) += value;
    }
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{FieldValue, Record, MANUFACTURER, SAMPLE_SIZE};

    fn device(manufacturer: Option<&str>, sample_size: FieldValue) -> Record {
        let mut fields = Vec::new();
        if let Some(m) = manufacturer {
            fields.push((MANUFACTURER.to_string(), FieldValue::String(m.to_string())));
        }
        fields.push((SAMPLE_SIZE.to_string(), sample_size));
        Record::new(fields)
    }

    fn dataset() -> Dataset {
        Dataset::from_records(vec![
            device(Some("Acme"), FieldValue::Integer(9)),
            device(Some("Bolt"), FieldValue::Integer(4)),
            device(Some("Acme"), FieldValue::Integer(2)),
            device(Some("Bolt"), FieldValue::Null),
            device(Some("Core"), FieldValue::Float(10.0)),
            device(None, FieldValue::Integer(50)),
        ])
    }

    #[test]
    fn totals_treat_missing_as_zero() {
        let totals = group_totals(&dataset(), MANUFACTURER, SAMPLE_SIZE);
        assert_eq!(totals["Acme"], 11.0);
        assert_eq!(totals["Bolt"], 4.0);
        assert_eq!(totals.len(), 3);
    }

    #[test]
    fn eligible_groups_meet_threshold_and_others_do_not() {
        let ds = dataset();
        let totals = group_totals(&ds, MANUFACTURER, SAMPLE_SIZE);
        let (out, eligible) = filter_eligible(ds, MANUFACTURER, SAMPLE_SIZE, 10.0);

        for (group, total) in &totals {
            assert_eq!(eligible.contains(group), *total >= 10.0, "{group}");
        }
        for rec in &out.records {
            assert!(eligible.contains(rec.manufacturer().unwrap()));
        }
    }

    #[test]
    fn boundary_is_inclusive() {
        let (_, eligible) = filter_eligible(dataset(), MANUFACTURER, SAMPLE_SIZE, 10.0);
        assert!(eligible.contains("Core"));
        let (_, eligible) = filter_eligible(dataset(), MANUFACTURER, SAMPLE_SIZE, 11.0);
        assert!(eligible.contains("Acme"));
        assert!(!eligible.contains("Core"));
    }

    #[test]
    fn order_is_preserved_and_ungrouped_records_dropped() {
        let (out, _) = filter_eligible(dataset(), MANUFACTURER, SAMPLE_SIZE, 0.0);
        let makers: Vec<&str> = out.records.iter().filter_map(Record::manufacturer).collect();
        assert_eq!(makers, ["Acme", "Bolt", "Acme", "Bolt", "Core"]);
    }
}
