use std::collections::BTreeSet;

use serde::Deserialize;

/// Columns every flight file must carry. Order is the order used when
/// reporting missing columns.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    "origin",
    "destination",
    "airline",
    "flight_number",
    "departure_time",
    "date",
    "domestic_international",
];

// ---------------------------------------------------------------------------
// Flight – one row of the source table
// ---------------------------------------------------------------------------

/// A single flight record. Values are kept as text exactly as read; only
/// `departure_time` is ever interpreted, and only when hours are counted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct Flight {
    pub origin: String,
    pub destination: String,
    pub airline: String,
    pub flight_number: String,
    pub departure_time: String,
    pub date: String,
    pub domestic_international: String,
}

impl Flight {
    /// Value of a required column by name.
    pub fn field(&self, column: &str) -> Option<&str> {
        let value = match column {
            "origin" => &self.origin,
            "destination" => &self.destination,
            "airline" => &self.airline,
            "flight_number" => &self.flight_number,
            "departure_time" => &self.departure_time,
            "date" => &self.date,
            "domestic_international" => &self.domestic_international,
            _ => return None,
        };
        Some(value.as_str())
    }
}

// ---------------------------------------------------------------------------
// FlightTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed table with its source header and origin index.
#[derive(Debug, Clone, Default)]
pub struct FlightTable {
    /// All flights (rows), in file order.
    pub flights: Vec<Flight>,
    /// Source column names in file order, including columns we ignore.
    pub column_names: Vec<String>,
    /// Sorted distinct non-empty origin codes.
    pub origins: BTreeSet<String>,
}

impl FlightTable {
    pub fn from_flights(flights: Vec<Flight>, column_names: Vec<String>) -> Self {
        let origins = flights
            .iter()
            .filter(|f| !f.origin.is_empty())
            .map(|f| f.origin.clone())
            .collect();
        FlightTable {
            flights,
            column_names,
            origins,
        }
    }

    /// Number of flights.
    pub fn len(&self) -> usize {
        self.flights.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }

    /// The first `n` rows (fewer if the table is shorter).
    pub fn head(&self, n: usize) -> &[Flight] {
        &self.flights[..n.min(self.flights.len())]
    }

    /// Distinct non-empty airlines among the given rows, sorted.
    pub fn airlines_in(&self, indices: &[usize]) -> BTreeSet<String> {
        indices
            .iter()
            .map(|&i| &self.flights[i].airline)
            .filter(|a| !a.is_empty())
            .cloned()
            .collect()
    }
}
