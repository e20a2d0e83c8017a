use std::path::PathBuf;

use clap::Parser;

use crate::data::analysis::ReportSettings;
use crate::data::filter::DEFAULT_ORIGIN;

#[derive(Parser, Debug)]
#[command(name = "flight-lens")]
#[command(about = "Explore the flights departing one airport", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Flight table to load (.csv, .json or .parquet)
    pub input: Option<PathBuf>,

    /// IATA code of the departure airport
    #[arg(long, default_value = DEFAULT_ORIGIN)]
    pub origin: String,

    /// Entries in the top destinations and top airlines rankings
    #[arg(long, default_value_t = 5)]
    pub top: usize,

    /// Entries in the hub ranking
    #[arg(long, default_value_t = 10)]
    pub hubs: usize,

    /// Print the report and exit without opening the viewer
    #[arg(long, requires = "input")]
    pub headless: bool,
}

impl Cli {
    pub fn report_settings(&self) -> ReportSettings {
        ReportSettings {
            top_destinations: self.top,
            hubs: self.hubs,
            top_airlines: self.top,
        }
    }
}
