use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::{FieldValue, MANUFACTURER, MODEL, SAMPLE_SIZE};
use crate::state::AppState;

/// Rows of the current view: identity columns plus the selected variable.
pub fn view_table(ui: &mut Ui, state: &AppState) {
    let dataset = state.catalog.dataset();
    let mut columns = vec![MODEL, MANUFACTURER, SAMPLE_SIZE];
    if let Some(var) = state.variable.as_deref() {
        if !columns.contains(&var) {
            columns.push(var);
        }
    }

    if state.visible_indices.is_empty() {
        ui.label("No rows match the current filters.");
        return;
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .columns(Column::auto().at_least(90.0), columns.len() - 1)
        .column(Column::remainder())
        .header(20.0, |mut header| {
            for name in &columns {
                header.col(|ui| {
                    ui.strong(*name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, state.visible_indices.len(), |mut row| {
                let rec = &dataset.records[state.visible_indices[row.index()]];
                for name in &columns {
                    row.col(|ui| {
                        let text = match rec.get(name) {
                            Some(FieldValue::Null) | None => String::new(),
                            Some(v) => v.to_string(),
                        };
                        ui.label(text);
                    });
                }
            });
        });
}
