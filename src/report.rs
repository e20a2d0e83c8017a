use std::fmt::Write;

use crate::data::analysis::{AirportReport, Share, ValueCount};
use crate::data::model::{Flight, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Console tables
// ---------------------------------------------------------------------------

/// Tabular preview of the first rows, one line per flight.
pub fn render_head(rows: &[Flight]) -> String {
    let cells: Vec<Vec<&str>> = rows
        .iter()
        .map(|f| REQUIRED_COLUMNS.iter().map(|c| f.field(c).unwrap_or("")).collect())
        .collect();

    let widths: Vec<usize> = REQUIRED_COLUMNS
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .fold(name.len(), usize::max)
        })
        .collect();

    let mut out = String::new();
    let line = |out: &mut String, values: &[&str]| {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(v, &w)| format!("{v:<w$}"))
            .collect();
        let _ = writeln!(out, "{}", padded.join("  ").trim_end());
    };

    line(&mut out, &REQUIRED_COLUMNS);
    for row in &cells {
        line(&mut out, row);
    }
    out
}

pub fn render_counts(title: &str, counts: &[ValueCount]) -> String {
    let mut out = format!("{title}:\n");
    let width = counts.iter().map(|c| c.value.chars().count()).max().unwrap_or(0);
    for c in counts {
        let _ = writeln!(out, "  {:<width$}  {:>6}", c.value, c.count);
    }
    out
}

pub fn render_shares(title: &str, shares: &[Share]) -> String {
    let mut out = format!("{title}:\n");
    let width = shares.iter().map(|s| s.value.chars().count()).max().unwrap_or(0);
    for s in shares {
        let _ = writeln!(out, "  {:<width$}  {:>6.1}%", s.value, s.percent);
    }
    out
}

pub fn render_hourly(title: &str, report: &AirportReport) -> String {
    let mut out = format!("{title}:\n");
    for (hour, count) in &report.hourly_volume {
        let _ = writeln!(out, "  {hour:02}:00  {count:>6}");
    }
    out
}

/// All console sections for one origin, in display order.
pub fn render_report(report: &AirportReport) -> String {
    let origin = &report.origin;
    [
        format!(
            "{} flights depart {origin} on {} routes\n",
            report.total_flights,
            report.routes.edge_count()
        ),
        render_counts(
            &format!("Top {} destinations from {origin}", report.settings.top_destinations),
            &report.top_destinations,
        ),
        render_hourly(&format!("Flight volume by time of day ({origin})"), report),
        render_shares(
            "Domestic vs. International flight distribution",
            &report.domestic_international,
        ),
        render_counts(&format!("Major hubs connected to {origin}"), &report.hubs),
        render_counts(
            &format!("Most frequent airlines operating from {origin}"),
            &report.top_airlines,
        ),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::analysis::ReportSettings;
    use crate::data::filter::departures_from;
    use crate::data::model::FlightTable;

    fn flight(destination: &str, airline: &str, time: &str, kind: &str) -> Flight {
        Flight {
            origin: "JFK".to_string(),
            destination: destination.to_string(),
            airline: airline.to_string(),
            flight_number: "100".to_string(),
            departure_time: time.to_string(),
            date: "2024-03-01".to_string(),
            domestic_international: kind.to_string(),
        }
    }

    #[test]
    fn test_head_has_header_and_aligned_rows() {
        let text = render_head(&[flight("LAX", "Delta", "08:00", "Domestic")]);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("origin"));
        assert_eq!(lines[0].find("destination"), lines[1].find("LAX"));
    }

    #[test]
    fn test_counts_table() {
        let counts = vec![
            ValueCount { value: "LAX".to_string(), count: 12 },
            ValueCount { value: "SFO".to_string(), count: 3 },
        ];
        let text = render_counts("Top 5 destinations from JFK", &counts);

        assert_eq!(text, "Top 5 destinations from JFK:\n  LAX      12\n  SFO       3\n");
    }

    #[test]
    fn test_shares_use_one_decimal() {
        let shares = vec![Share { value: "Domestic".to_string(), percent: 200.0 / 3.0 }];
        assert!(render_shares("split", &shares).contains("66.7%"));
    }

    #[test]
    fn test_full_report_sections() {
        let table = FlightTable::from_flights(
            vec![
                flight("LAX", "Delta", "08:00", "Domestic"),
                flight("LHR", "British Airways", "19:30", "International"),
            ],
            Vec::new(),
        );
        let idx = departures_from(&table, "JFK");
        let report = AirportReport::build(&table, &idx, "JFK", &ReportSettings::default()).unwrap();
        let text = render_report(&report);

        assert!(text.starts_with("2 flights depart JFK on 2 routes"));
        assert!(text.contains("Major hubs connected to JFK:"));
        assert!(text.contains("Most frequent airlines operating from JFK:"));
        assert!(text.contains("  19:00       1"));
        assert!(text.contains("50.0%"));
    }

    #[test]
    fn test_destination_heading_uses_requested_size() {
        let table = FlightTable::from_flights(
            vec![
                flight("LAX", "Delta", "08:00", "Domestic"),
                flight("LHR", "British Airways", "19:30", "International"),
            ],
            Vec::new(),
        );
        let idx = departures_from(&table, "JFK");
        let report = AirportReport::build(&table, &idx, "JFK", &ReportSettings::default()).unwrap();
        let text = render_report(&report);

        assert!(text.contains("Top 5 destinations from JFK:"));
        assert!(!text.contains("Top 2 destinations"));
    }
}
