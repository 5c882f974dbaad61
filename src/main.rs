mod app;
mod color;
mod config;
mod data;
mod error;
mod state;
mod ui;

use std::process::ExitCode;

use app::SensorDbApp;
use clap::Parser;
use config::{Args, Config};
use data::pipeline::PipelineState;
use eframe::egui;

fn main() -> ExitCode {
    env_logger::init();

    let config = match Config::from_args(Args::parse()) {
        Ok(config) => config,
        Err(e) => {
            log::error!("invalid configuration: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "data: {}, column map: {}, min sample size: {}",
        config.data_file.display(),
        config.column_map_file.display(),
        config.min_sample_size
    );

    // The catalog is built once; a failure means nothing is served.
    let state = PipelineState::Uninitialized.initialize(&config);
    let Some(catalog) = state.catalog().cloned() else {
        if let PipelineState::Failed(e) = &state {
            log::error!("failed to build device catalog: {e}");
        }
        return ExitCode::FAILURE;
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Sensor Database Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(SensorDbApp::new(catalog)))),
    );
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("UI error: {e}");
            ExitCode::FAILURE
        }
    }
}
