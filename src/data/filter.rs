use std::collections::BTreeSet;

use super::model::FlightTable;

/// Origin used when nothing else is asked for.
pub const DEFAULT_ORIGIN: &str = "JFK";

// ---------------------------------------------------------------------------
// Filter predicate: origin airport plus selected airlines
// ---------------------------------------------------------------------------

/// Which flights are visible.
///
/// `airlines == None` means "no airline constraint". `Some(set)` keeps only
/// airlines in the set, so an empty set hides everything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub origin: String,
    pub airlines: Option<BTreeSet<String>>,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::for_origin(DEFAULT_ORIGIN)
    }
}

impl FilterState {
    pub fn for_origin(origin: &str) -> Self {
        Self {
            origin: origin.to_string(),
            airlines: None,
        }
    }
}

/// Indices of flights departing `origin`. The comparison is exact.
pub fn departures_from(table: &FlightTable, origin: &str) -> Vec<usize> {
    table
        .flights
        .iter()
        .enumerate()
        .filter(|(_, f)| f.origin == origin)
        .map(|(i, _)| i)
        .collect()
}

/// Return indices of flights that pass all active filters.
pub fn filtered_indices(table: &FlightTable, filters: &FilterState) -> Vec<usize> {
    let departures = departures_from(table, &filters.origin);
    match &filters.airlines {
        None => departures,
        Some(selected) => departures
            .into_iter()
            .filter(|&i| selected.contains(&table.flights[i].airline))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Flight;

    fn table() -> FlightTable {
        let rows = [
            ("JFK", "LAX", "Delta"),
            ("LGA", "ORD", "United"),
            ("JFK", "SFO", "JetBlue"),
            ("jfk", "MIA", "American"),
            ("JFK", "LAX", "JetBlue"),
        ];
        let flights = rows
            .iter()
            .map(|(o, d, a)| Flight {
                origin: o.to_string(),
                destination: d.to_string(),
                airline: a.to_string(),
                ..Default::default()
            })
            .collect();
        FlightTable::from_flights(flights, Vec::new())
    }

    #[test]
    fn test_departures_only_match_origin() {
        let table = table();
        let idx = departures_from(&table, "JFK");

        assert_eq!(idx, vec![0, 2, 4]);
        assert!(idx.iter().all(|&i| table.flights[i].origin == "JFK"));
    }

    #[test]
    fn test_unknown_origin_is_empty() {
        assert!(departures_from(&table(), "EWR").is_empty());
    }

    #[test]
    fn test_airline_selection_narrows_origin() {
        let table = table();
        let filters = FilterState {
            origin: "JFK".to_string(),
            airlines: Some(BTreeSet::from(["JetBlue".to_string()])),
        };

        assert_eq!(filtered_indices(&table, &filters), vec![2, 4]);
    }

    #[test]
    fn test_empty_airline_selection_hides_everything() {
        let filters = FilterState {
            origin: "JFK".to_string(),
            airlines: Some(BTreeSet::new()),
        };
        assert!(filtered_indices(&table(), &filters).is_empty());
    }

    #[test]
    fn test_default_filter_is_jfk_without_airline_constraint() {
        let filters = FilterState::default();
        assert_eq!(filters.origin, "JFK");
        assert_eq!(filtered_indices(&table(), &filters).len(), 3);
    }
}
