use eframe::egui::{self, RichText, ScrollArea, Ui};

use crate::state::{AppState, Tab};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let catalog = state.catalog.clone();
    if catalog.manufacturers().is_empty() {
        ui.label("No manufacturer meets the sample-size threshold.");
        return;
    }

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            // ---- Manufacturer ----
            ui.strong("Manufacturer");
            let current = state.filter.manufacturer.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("manufacturer")
                .selected_text(&current)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for m in catalog.manufacturers() {
                        if ui.selectable_label(current == *m, m).clicked() {
                            state.set_manufacturer(m.clone());
                        }
                    }
                });
            ui.add_space(8.0);

            // ---- Model text ----
            ui.strong("Text contained in Model Name");
            if ui
                .text_edit_singleline(&mut state.filter.model_text)
                .changed()
            {
                state.refilter();
            }
            ui.add_space(8.0);

            // ---- Variable ----
            ui.strong("Variable");
            let current_var = state.variable.clone().unwrap_or_default();
            egui::ComboBox::from_id_salt("variable")
                .selected_text(&current_var)
                .width(ui.available_width())
                .show_ui(ui, |ui: &mut Ui| {
                    for col in catalog.numeric_columns() {
                        if ui.selectable_label(current_var == *col, col).clicked() {
                            state.set_variable(col.clone());
                        }
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the tab strip and record counts.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        for tab in Tab::ALL {
            ui.selectable_value(&mut state.tab, tab, tab.label());
        }

        ui.separator();

        ui.label(format!(
            "{} devices loaded, {} visible",
            state.catalog.dataset().len(),
            state.visible_indices.len()
        ));
    });
}

// ---------------------------------------------------------------------------
// About
// ---------------------------------------------------------------------------

pub fn about_panel(ui: &mut Ui, state: &AppState) {
    ui.heading("About this site");
    ui.add_space(8.0);
    ui.horizontal(|ui: &mut Ui| {
        ui.label("Data comes from");
        ui.hyperlink_to("phyphox sensordb", "https://phyphox.org/sensordb");
        ui.label(".");
    });
    ui.add_space(8.0);
    ui.label(RichText::new(format!(
        "{} devices from {} manufacturers, {} numeric variables.",
        state.catalog.dataset().len(),
        state.catalog.eligible().len(),
        state.catalog.numeric_columns().len()
    )));
}
