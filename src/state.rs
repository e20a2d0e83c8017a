use std::collections::BTreeSet;

use crate::data::analysis::{AirportReport, ReportSettings};
use crate::data::filter::{FilterState, filtered_indices};
use crate::data::model::FlightTable;
use crate::layout::{DEFAULT_SEED, spring_layout};

// ---------------------------------------------------------------------------
// Which of the six views is on screen
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Chart {
    #[default]
    Routes,
    TopDestinations,
    HourlyVolume,
    DomesticInternational,
    Hubs,
    TopAirlines,
}

impl Chart {
    pub const ALL: [Chart; 6] = [
        Chart::Routes,
        Chart::TopDestinations,
        Chart::HourlyVolume,
        Chart::DomesticInternational,
        Chart::Hubs,
        Chart::TopAirlines,
    ];

    /// Short label for the chart selector.
    pub fn label(self) -> &'static str {
        match self {
            Chart::Routes => "Routes",
            Chart::TopDestinations => "Destinations",
            Chart::HourlyVolume => "Time of Day",
            Chart::DomesticInternational => "Domestic / Intl",
            Chart::Hubs => "Hubs",
            Chart::TopAirlines => "Airlines",
        }
    }

    /// Full chart title for a given origin.
    pub fn title(self, origin: &str, settings: &ReportSettings) -> String {
        match self {
            Chart::Routes => format!("Direct Flight Routes from {origin}"),
            Chart::TopDestinations => format!(
                "Top {} Destinations from {origin} by Flight Volume",
                settings.top_destinations
            ),
            Chart::HourlyVolume => format!("Flight Volume by Time of Day ({origin})"),
            Chart::DomesticInternational => {
                format!("Domestic vs International Flights from {origin}")
            }
            Chart::Hubs => format!("Top {} Hub Airports Connected to {origin}", settings.hubs),
            Chart::TopAirlines => {
                format!("Top {} Airlines Operating from {origin}", settings.top_airlines)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded table (None until a file is loaded).
    pub table: Option<FlightTable>,

    /// Origin and airline selections.
    pub filters: FilterState,

    /// Indices of flights passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Airlines operating from the current origin, for the filter list.
    pub origin_airlines: BTreeSet<String>,

    /// Ranking sizes.
    pub settings: ReportSettings,

    /// Aggregates over `visible_indices`.
    pub report: Option<AirportReport>,

    /// Route-map node positions, indexed like `report.routes` nodes.
    pub route_positions: Vec<[f64; 2]>,

    /// Chart on screen.
    pub chart: Chart,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(FilterState::default(), ReportSettings::default())
    }
}

impl AppState {
    pub fn new(filters: FilterState, settings: ReportSettings) -> Self {
        Self {
            table: None,
            filters,
            visible_indices: Vec::new(),
            origin_airlines: BTreeSet::new(),
            settings,
            report: None,
            route_positions: Vec::new(),
            chart: Chart::default(),
            status_message: None,
        }
    }

    /// Ingest a newly loaded table and rebuild every view.
    pub fn set_table(&mut self, table: FlightTable) {
        self.table = Some(table);
        self.filters.airlines = None;
        self.status_message = None;
        self.refresh_origin_airlines();
        self.refilter();
    }

    /// Switch the departure airport; the airline selection is reset.
    pub fn set_origin(&mut self, origin: &str) {
        self.filters = FilterState::for_origin(origin);
        self.refresh_origin_airlines();
        self.refilter();
    }

    fn refresh_origin_airlines(&mut self) {
        self.origin_airlines = match &self.table {
            Some(table) => {
                let departures = crate::data::filter::departures_from(table, &self.filters.origin);
                table.airlines_in(&departures)
            }
            None => BTreeSet::new(),
        };
    }

    /// Recompute `visible_indices`, the report and the route layout.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        self.visible_indices = filtered_indices(table, &self.filters);
        if self.visible_indices.is_empty() {
            log::warn!("No flights depart {} with the current selection", self.filters.origin);
        }

        match AirportReport::build(table, &self.visible_indices, &self.filters.origin, &self.settings) {
            Ok(report) => {
                self.status_message = None;
                self.route_positions = spring_layout(&report.routes.graph, DEFAULT_SEED);
                self.report = Some(report);
            }
            Err(e) => {
                log::error!("Failed to aggregate flights: {e}");
                self.status_message = Some(format!("Error: {e}"));
                self.report = None;
                self.route_positions.clear();
            }
        }
    }

    /// Whether an airline is currently shown.
    pub fn airline_selected(&self, airline: &str) -> bool {
        self.filters
            .airlines
            .as_ref()
            .map_or(true, |selected| selected.contains(airline))
    }

    /// Toggle a single airline in the filter.
    pub fn toggle_airline(&mut self, airline: &str) {
        let selected = self
            .filters
            .airlines
            .get_or_insert_with(|| self.origin_airlines.clone());
        if !selected.remove(airline) {
            selected.insert(airline.to_string());
        }
        if selected.len() == self.origin_airlines.len() {
            self.filters.airlines = None;
        }
        self.refilter();
    }

    /// Show every airline.
    pub fn select_all_airlines(&mut self) {
        self.filters.airlines = None;
        self.refilter();
    }

    /// Hide every airline.
    pub fn select_no_airlines(&mut self) {
        self.filters.airlines = Some(BTreeSet::new());
        self.refilter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Flight;

    fn table() -> FlightTable {
        let rows = [
            ("JFK", "LAX", "Delta", "08:00"),
            ("JFK", "LHR", "British Airways", "19:00"),
            ("JFK", "SFO", "Delta", "11:00"),
            ("LGA", "ORD", "United", "07:00"),
        ];
        let flights = rows
            .iter()
            .map(|(o, d, a, t)| Flight {
                origin: o.to_string(),
                destination: d.to_string(),
                airline: a.to_string(),
                departure_time: t.to_string(),
                domestic_international: "Domestic".to_string(),
                ..Default::default()
            })
            .collect();
        FlightTable::from_flights(flights, Vec::new())
    }

    #[test]
    fn test_set_table_builds_report_and_layout() {
        let mut state = AppState::default();
        state.set_table(table());

        let report = state.report.as_ref().unwrap();
        assert_eq!(report.total_flights, 3);
        assert_eq!(state.route_positions.len(), report.routes.node_count());
        assert_eq!(state.origin_airlines.len(), 2);
    }

    #[test]
    fn test_switching_origin() {
        let mut state = AppState::default();
        state.set_table(table());
        state.set_origin("LGA");

        assert_eq!(state.visible_indices, vec![3]);
        assert_eq!(state.report.as_ref().unwrap().origin, "LGA");
    }

    #[test]
    fn test_airline_toggles() {
        let mut state = AppState::default();
        state.set_table(table());

        state.toggle_airline("Delta");
        assert!(!state.airline_selected("Delta"));
        assert_eq!(state.visible_indices, vec![1]);

        state.toggle_airline("Delta");
        assert_eq!(state.filters.airlines, None);
        assert_eq!(state.visible_indices.len(), 3);

        state.select_no_airlines();
        assert!(state.visible_indices.is_empty());
        state.select_all_airlines();
        assert_eq!(state.visible_indices.len(), 3);
    }

    #[test]
    fn test_bad_timestamp_surfaces_as_status() {
        let mut t = table();
        t.flights[0].departure_time = "whenever".to_string();
        let mut state = AppState::default();
        state.set_table(t);

        assert!(state.report.is_none());
        assert!(state.status_message.as_deref().unwrap().contains("whenever"));
    }

    #[test]
    fn test_status_clears_after_successful_refilter() {
        let mut t = table();
        t.flights[0].departure_time = "whenever".to_string();
        let mut state = AppState::default();
        state.set_table(t);
        assert!(state.status_message.is_some());

        state.set_origin("LGA");

        assert_eq!(state.report.as_ref().unwrap().origin, "LGA");
        assert!(state.status_message.is_none());
    }

    #[test]
    fn test_titles_follow_settings() {
        let settings = ReportSettings::default();
        assert_eq!(
            Chart::Hubs.title("JFK", &settings),
            "Top 10 Hub Airports Connected to JFK"
        );
        assert_eq!(
            Chart::TopDestinations.title("JFK", &settings),
            "Top 5 Destinations from JFK by Flight Volume"
        );
    }
}
