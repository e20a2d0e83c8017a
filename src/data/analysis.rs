use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, NaiveDateTime, NaiveTime, Timelike};

use super::error::DatasetError;
use super::model::{Flight, FlightTable};
use super::routes::RouteGraph;

// ---------------------------------------------------------------------------
// Value counts
// ---------------------------------------------------------------------------

/// Number of rows carrying one distinct value of a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Percentage of the counted rows carrying one value.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub value: String,
    pub percent: f64,
}

/// Count distinct values, most frequent first.
///
/// Blank values are treated as missing and skipped. Ties are broken by the
/// value itself so the order never depends on input order.
pub fn value_counts<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<ValueCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        if v.is_empty() {
            continue;
        }
        *counts.entry(v).or_default() += 1;
    }

    let mut out: Vec<ValueCount> = counts
        .into_iter()
        .map(|(value, count)| ValueCount {
            value: value.to_string(),
            count,
        })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value)));
    out
}

/// The `n` most frequent values.
pub fn top_n(mut counts: Vec<ValueCount>, n: usize) -> Vec<ValueCount> {
    counts.truncate(n);
    counts
}

/// Convert counts to percentages of their total.
pub fn shares(counts: &[ValueCount]) -> Vec<Share> {
    let total: usize = counts.iter().map(|c| c.count).sum();
    if total == 0 {
        return Vec::new();
    }
    counts
        .iter()
        .map(|c| Share {
            value: c.value.clone(),
            percent: c.count as f64 * 100.0 / total as f64,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Departure hours
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

const TIME_FORMATS: &[&str] = &["%H:%M:%S", "%H:%M", "%I:%M %p", "%I:%M:%S %p"];

/// Hour of day (0–23) of a departure timestamp, or `None` if the text is not
/// a recognised date-time or time-of-day.
pub fn departure_hour(text: &str) -> Option<u32> {
    let text = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.hour());
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return Some(dt.hour());
        }
    }
    for fmt in TIME_FORMATS {
        if let Ok(t) = NaiveTime::parse_from_str(text, fmt) {
            return Some(t.hour());
        }
    }
    None
}

/// Flights per departure hour, ascending by hour. Only hours that occur are
/// present. `rows` pairs each flight with its row number in the table.
pub fn hourly_volume<'a>(
    rows: impl IntoIterator<Item = (usize, &'a Flight)>,
) -> Result<BTreeMap<u32, usize>, DatasetError> {
    let mut hours = BTreeMap::new();
    for (row, flight) in rows {
        if flight.departure_time.trim().is_empty() {
            continue;
        }
        let hour = departure_hour(&flight.departure_time).ok_or_else(|| {
            DatasetError::InvalidDepartureTime {
                row,
                value: flight.departure_time.clone(),
            }
        })?;
        *hours.entry(hour).or_default() += 1;
    }
    Ok(hours)
}

// ---------------------------------------------------------------------------
// AirportReport – the six views over one origin
// ---------------------------------------------------------------------------

/// How many entries the ranked views keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportSettings {
    pub top_destinations: usize,
    pub hubs: usize,
    pub top_airlines: usize,
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_destinations: 5,
            hubs: 10,
            top_airlines: 5,
        }
    }
}

/// Every aggregate derived from the flights departing one origin.
#[derive(Debug, Clone)]
pub struct AirportReport {
    pub origin: String,
    pub settings: ReportSettings,
    pub total_flights: usize,
    pub routes: RouteGraph,
    pub top_destinations: Vec<ValueCount>,
    pub hourly_volume: BTreeMap<u32, usize>,
    pub domestic_international: Vec<Share>,
    pub hubs: Vec<ValueCount>,
    pub top_airlines: Vec<ValueCount>,
}

impl AirportReport {
    /// Aggregate the rows at `indices`, which should already be filtered to
    /// `origin`.
    pub fn build(
        table: &FlightTable,
        indices: &[usize],
        origin: &str,
        settings: &ReportSettings,
    ) -> Result<Self, DatasetError> {
        let rows = || indices.iter().map(|&i| &table.flights[i]);

        let destinations = value_counts(rows().map(|f| f.destination.as_str()));
        let airlines = value_counts(rows().map(|f| f.airline.as_str()));
        let segments = value_counts(rows().map(|f| f.domestic_international.as_str()));

        Ok(Self {
            origin: origin.to_string(),
            settings: *settings,
            total_flights: indices.len(),
            routes: RouteGraph::from_rows(rows()),
            top_destinations: top_n(destinations.clone(), settings.top_destinations),
            hourly_volume: hourly_volume(indices.iter().map(|&i| (i, &table.flights[i])))?,
            domestic_international: shares(&segments),
            hubs: top_n(destinations, settings.hubs),
            top_airlines: top_n(airlines, settings.top_airlines),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::departures_from;

    fn flight(origin: &str, destination: &str, airline: &str, time: &str, kind: &str) -> Flight {
        Flight {
            origin: origin.to_string(),
            destination: destination.to_string(),
            airline: airline.to_string(),
            flight_number: "1".to_string(),
            departure_time: time.to_string(),
            date: "2024-03-01".to_string(),
            domestic_international: kind.to_string(),
        }
    }

    fn sample_table() -> FlightTable {
        let flights = vec![
            flight("JFK", "LAX", "Delta", "2024-03-01 08:15:00", "Domestic"),
            flight("JFK", "LAX", "JetBlue", "2024-03-01 08:50:00", "Domestic"),
            flight("JFK", "LHR", "British Airways", "2024-03-01 19:40:00", "International"),
            flight("LGA", "ORD", "United", "2024-03-01 07:00:00", "Domestic"),
            flight("JFK", "SFO", "JetBlue", "2024-03-01 11:05:00", "Domestic"),
            flight("JFK", "CDG", "Air France", "2024-03-01 19:10:00", "International"),
            flight("JFK", "LAX", "Delta", "2024-03-01 21:30:00", "Domestic"),
        ];
        FlightTable::from_flights(flights, Vec::new())
    }

    #[test]
    fn test_value_counts_sorted_with_tie_break() {
        let counts = value_counts(["b", "a", "c", "a", "b", "a"]);
        let pairs: Vec<(&str, usize)> = counts.iter().map(|c| (c.value.as_str(), c.count)).collect();
        assert_eq!(pairs, vec![("a", 3), ("b", 2), ("c", 1)]);

        let tied = value_counts(["y", "x"]);
        assert_eq!(tied[0].value, "x");
    }

    #[test]
    fn test_value_counts_skip_blank_values() {
        let counts = value_counts(["JFK", "", "JFK"]);
        assert_eq!(counts, vec![ValueCount { value: "JFK".to_string(), count: 2 }]);
    }

    #[test]
    fn test_value_counts_sum_to_filtered_rows() {
        let table = sample_table();
        let idx = departures_from(&table, "JFK");
        let rows = || idx.iter().map(|&i| &table.flights[i]);

        for column in ["destination", "airline", "domestic_international", "date"] {
            let counts = value_counts(rows().map(|f| f.field(column).unwrap()));
            let total: usize = counts.iter().map(|c| c.count).sum();
            assert_eq!(total, idx.len(), "column {column}");
        }
    }

    #[test]
    fn test_shares_sum_to_hundred() {
        let counts = value_counts(["Domestic", "International", "Domestic"]);
        let shares = shares(&counts);

        let total: f64 = shares.iter().map(|s| s.percent).sum();
        assert!((total - 100.0).abs() < 1e-9);
        assert!((shares[0].percent - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_shares_of_nothing_is_empty() {
        assert!(shares(&[]).is_empty());
    }

    #[test]
    fn test_departure_hour_formats() {
        assert_eq!(departure_hour("2024-03-01 08:15:00"), Some(8));
        assert_eq!(departure_hour("2024-03-01T23:59"), Some(23));
        assert_eq!(departure_hour("2024-03-01T05:00:00-04:00"), Some(5));
        assert_eq!(departure_hour("03/01/2024 14:20"), Some(14));
        assert_eq!(departure_hour("06:45"), Some(6));
        assert_eq!(departure_hour(" 17:30:00 "), Some(17));
        assert_eq!(departure_hour("9:05 PM"), Some(21));
        assert_eq!(departure_hour("late evening"), None);
    }

    #[test]
    fn test_hourly_volume_rejects_malformed_time() {
        let rows = vec![
            flight("JFK", "LAX", "Delta", "08:00", "Domestic"),
            flight("JFK", "LAX", "Delta", "soon", "Domestic"),
        ];

        let err = hourly_volume(rows.iter().enumerate()).unwrap_err();
        assert_eq!(
            err,
            DatasetError::InvalidDepartureTime { row: 1, value: "soon".to_string() }
        );
    }

    #[test]
    fn test_hourly_volume_skips_blank_times() {
        let rows = vec![
            flight("JFK", "LAX", "Delta", "", "Domestic"),
            flight("JFK", "LAX", "Delta", "08:10", "Domestic"),
        ];

        let hours = hourly_volume(rows.iter().enumerate()).unwrap();
        assert_eq!(hours, BTreeMap::from([(8, 1)]));
    }

    #[test]
    fn test_report_for_origin() {
        let table = sample_table();
        let idx = departures_from(&table, "JFK");
        let report = AirportReport::build(&table, &idx, "JFK", &ReportSettings::default()).unwrap();

        assert_eq!(report.total_flights, 6);
        assert_eq!(report.top_destinations[0], ValueCount { value: "LAX".to_string(), count: 3 });
        assert_eq!(report.top_destinations.len(), 4);
        assert_eq!(report.hubs.len(), 4);
        assert_eq!(report.top_airlines[0].value, "Delta");
        assert_eq!(report.top_airlines[0].count, 2);
        assert_eq!(report.top_airlines[1].value, "JetBlue");
        assert_eq!(report.hourly_volume, BTreeMap::from([(8, 2), (11, 1), (19, 2), (21, 1)]));
        assert_eq!(report.domestic_international[0].value, "Domestic");
        assert!((report.domestic_international[0].percent - 400.0 / 6.0).abs() < 1e-9);
        assert_eq!(report.routes.edge_count(), 4);
        assert!(report.routes.nodes().all(|n| n != "ORD"));
    }

    #[test]
    fn test_report_respects_settings() {
        let table = sample_table();
        let idx = departures_from(&table, "JFK");
        let settings = ReportSettings { top_destinations: 1, hubs: 2, top_airlines: 1 };
        let report = AirportReport::build(&table, &idx, "JFK", &settings).unwrap();

        assert_eq!(report.top_destinations.len(), 1);
        assert_eq!(report.hubs.len(), 2);
        assert_eq!(report.top_airlines.len(), 1);
    }

    #[test]
    fn test_report_for_origin_without_flights() {
        let table = sample_table();
        let report = AirportReport::build(&table, &[], "EWR", &ReportSettings::default()).unwrap();

        assert_eq!(report.total_flights, 0);
        assert!(report.top_destinations.is_empty());
        assert!(report.domestic_international.is_empty());
        assert_eq!(report.routes.node_count(), 0);
    }
}
