use std::path::Path;

use anyhow::{Context, Result};
use arrow::array::Array;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::{Map, Value as JsonValue};

use super::error::DatasetError;
use super::model::{Flight, FlightTable, REQUIRED_COLUMNS};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a flight table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row, one flight per row (the usual export)
/// * `.json`    – `[{ "origin": "JFK", "destination": "LAX", ... }, ...]`
/// * `.parquet` – flat columns of any scalar type, rendered to text
///
/// Every format is checked for [`REQUIRED_COLUMNS`] before any row is read.
pub fn load_file(path: &Path) -> Result<FlightTable> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "csv" => load_csv(path)?,
        "json" => load_json(path)?,
        "parquet" | "pq" => load_parquet(path)?,
        other => return Err(DatasetError::UnsupportedFormat(other.to_string()).into()),
    };

    log::info!(
        "Loaded {} flights from {} with columns {:?}",
        table.len(),
        path.display(),
        table.column_names
    );
    Ok(table)
}

/// Fail with every required column absent from `columns`, in required order.
pub fn check_required_columns(columns: &[String]) -> Result<(), DatasetError> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|req| !columns.iter().any(|c| c == *req))
        .map(|req| req.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(DatasetError::MissingColumns(missing))
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<FlightTable> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    check_required_columns(&headers)?;
    // Trimmed names so `" origin"` still maps onto the struct field.
    reader.set_headers(csv::StringRecord::from(headers.clone()));

    let mut flights = Vec::new();
    for (row_no, result) in reader.deserialize::<Flight>().enumerate() {
        let flight = result.with_context(|| format!("CSV row {row_no}"))?;
        flights.push(flight);
    }

    Ok(FlightTable::from_flights(flights, headers))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "origin": "JFK", "destination": "LAX", "flight_number": 23, ... },
///   ...
/// ]
/// ```
///
/// The column set is the union of keys across records; a key missing from a
/// single record reads as an empty value.
fn load_json(path: &Path) -> Result<FlightTable> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON {}", path.display()))?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut objects = Vec::with_capacity(records.len());
    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    check_required_columns(&columns)?;

    let flights = objects.into_iter().map(json_to_flight).collect();
    Ok(FlightTable::from_flights(flights, columns))
}

fn json_to_flight(obj: &Map<String, JsonValue>) -> Flight {
    let text = |key: &str| obj.get(key).map(json_to_text).unwrap_or_default();
    Flight {
        origin: text("origin"),
        destination: text("destination"),
        airline: text("airline"),
        flight_number: text("flight_number"),
        departure_time: text("departure_time"),
        date: text("date"),
        domestic_international: text("domestic_international"),
    }
}

fn json_to_text(val: &JsonValue) -> String {
    match val {
        JsonValue::String(s) => s.clone(),
        JsonValue::Null => String::new(),
        other => other.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing one flight per row.
///
/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`); numeric and timestamp columns are
/// rendered with Arrow's display formatting.
fn load_parquet(path: &Path) -> Result<FlightTable> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("opening parquet file {}", path.display()))?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    check_required_columns(&columns)?;

    let reader = builder.build().context("building parquet reader")?;

    let mut flights = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let mut required = Vec::with_capacity(REQUIRED_COLUMNS.len());
        for name in REQUIRED_COLUMNS {
            let idx = schema
                .index_of(name)
                .with_context(|| format!("record batch missing '{name}'"))?;
            required.push(batch.column(idx).clone());
        }

        for row in 0..batch.num_rows() {
            let mut cells = Vec::with_capacity(required.len());
            for col in &required {
                let cell = if col.is_null(row) {
                    String::new()
                } else {
                    array_value_to_string(col, row)
                        .with_context(|| format!("Row {row}: formatting parquet value"))?
                };
                cells.push(cell);
            }
            flights.push(flight_from_cells(cells));
        }
    }

    Ok(FlightTable::from_flights(flights, columns))
}

/// Build a flight from cells given in [`REQUIRED_COLUMNS`] order.
fn flight_from_cells(cells: Vec<String>) -> Flight {
    let mut it = cells.into_iter();
    let mut next = || it.next().unwrap_or_default();
    Flight {
        origin: next(),
        destination: next(),
        airline: next(),
        flight_number: next(),
        departure_time: next(),
        date: next(),
        domestic_international: next(),
    }
}
