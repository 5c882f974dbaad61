use std::sync::Arc;

use eframe::egui;

use crate::data::pipeline::DeviceCatalog;
use crate::state::{AppState, Tab};
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SensorDbApp {
    pub state: AppState,
}

impl SensorDbApp {
    pub fn new(catalog: Arc<DeviceCatalog>) -> Self {
        Self {
            state: AppState::new(catalog),
        }
    }
}

impl eframe::App for SensorDbApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        if self.state.tab != Tab::About {
            // ---- Left side panel: filters ----
            egui::SidePanel::left("filter_panel")
                .default_width(240.0)
                .resizable(true)
                .show(ctx, |ui| {
                    panels::side_panel(ui, &mut self.state);
                });
        }

        // ---- Central panel: charts ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.tab {
            Tab::Filters => {
                ui.columns(2, |cols| {
                    plot::box_plot(&mut cols[0], &self.state);
                    plot::availability_pie(&mut cols[1], &self.state);
                });
            }
            Tab::Plot => plot::ordered_bar_chart(ui, &self.state),
            Tab::Data => table::view_table(ui, &self.state),
            Tab::About => panels::about_panel(ui, &self.state),
        });
    }
}
