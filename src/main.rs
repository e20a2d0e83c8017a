mod app;
mod cli;
mod color;
mod data;
mod layout;
mod report;
mod state;
mod ui;

use anyhow::{anyhow, Result};
use app::FlightLensApp;
use clap::Parser;
use cli::Cli;
use data::filter::{departures_from, FilterState};
use eframe::egui;
use state::AppState;

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = cli.report_settings();

    let mut state = AppState::new(FilterState::for_origin(&cli.origin), settings);

    if let Some(path) = &cli.input {
        let table = data::loader::load_file(path)?;
        println!("{}", report::render_head(table.head(5)));

        let departures = departures_from(&table, &cli.origin);
        let airport = data::analysis::AirportReport::build(&table, &departures, &cli.origin, &settings)?;
        println!("{}", report::render_report(&airport));

        if cli.headless {
            return Ok(());
        }
        state.set_table(table);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Flight Lens – Departure Explorer",
        options,
        Box::new(|_cc| Ok(Box::new(FlightLensApp::new(state)))),
    )
    .map_err(|e| anyhow!("viewer failed: {e}"))
}
