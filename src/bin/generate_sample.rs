use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

/// (code, relative weight, international)
const DESTINATIONS: &[(&str, u32, bool)] = &[
    ("LAX", 14, false),
    ("SFO", 10, false),
    ("MIA", 8, false),
    ("ORD", 7, false),
    ("ATL", 6, false),
    ("BOS", 5, false),
    ("LAS", 4, false),
    ("SEA", 3, false),
    ("LHR", 9, true),
    ("CDG", 5, true),
    ("FRA", 3, true),
    ("NRT", 2, true),
    ("DXB", 2, true),
    ("GRU", 1, true),
];

const AIRLINES: &[(&str, &str, u32)] = &[
    ("Delta", "DL", 9),
    ("JetBlue", "B6", 8),
    ("American", "AA", 6),
    ("United", "UA", 3),
    ("British Airways", "BA", 2),
    ("Air France", "AF", 1),
];

/// Departures per hour of day, weighted towards morning and evening banks.
const HOUR_WEIGHTS: [u32; 24] = [
    0, 0, 0, 0, 0, 1, 4, 7, 8, 6, 5, 4, 4, 4, 5, 6, 7, 8, 9, 8, 6, 4, 2, 1,
];

const ORIGINS: &[(&str, u32)] = &[("JFK", 8), ("LGA", 2), ("EWR", 2)];

#[derive(Debug, Serialize)]
struct SampleFlight {
    origin: String,
    destination: String,
    airline: String,
    flight_number: String,
    departure_time: String,
    date: String,
    domestic_international: String,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: u32) -> u32 {
        (self.next_u64() % n as u64) as u32
    }

    /// Index into `weights`, chosen proportionally.
    fn weighted(&mut self, weights: impl Iterator<Item = u32> + Clone) -> usize {
        let total: u32 = weights.clone().sum();
        let mut pick = self.below(total);
        for (i, w) in weights.enumerate() {
            if pick < w {
                return i;
            }
            pick -= w;
        }
        0
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let days = 7;
    let flights_per_day = 60;

    let mut rows = Vec::with_capacity(days * flights_per_day);
    for day in 1..=days {
        let date = format!("2024-03-{day:02}");
        for _ in 0..flights_per_day {
            let origin = ORIGINS[rng.weighted(ORIGINS.iter().map(|o| o.1))].0;
            let (destination, _, international) =
                DESTINATIONS[rng.weighted(DESTINATIONS.iter().map(|d| d.1))];
            let (airline, code, _) = AIRLINES[rng.weighted(AIRLINES.iter().map(|a| a.2))];
            let hour = rng.weighted(HOUR_WEIGHTS.iter().copied());
            let minute = rng.below(12) * 5;

            rows.push(SampleFlight {
                origin: origin.to_string(),
                destination: destination.to_string(),
                airline: airline.to_string(),
                flight_number: format!("{code}{}", 100 + rng.below(1900)),
                departure_time: format!("{date} {hour:02}:{minute:02}:00"),
                date: date.clone(),
                domestic_international: if international {
                    "International"
                } else {
                    "Domestic"
                }
                .to_string(),
            });
        }
    }

    let csv_path = "sample_flights.csv";
    let mut writer = csv::Writer::from_path(csv_path).context("creating CSV output")?;
    for row in &rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    let column = |f: fn(&SampleFlight) -> &str| -> ArrayRef {
        Arc::new(StringArray::from(rows.iter().map(f).collect::<Vec<_>>()))
    };
    let names = [
        "origin",
        "destination",
        "airline",
        "flight_number",
        "departure_time",
        "date",
        "domestic_international",
    ];
    let schema = Arc::new(Schema::new(
        names
            .iter()
            .map(|n| Field::new(*n, DataType::Utf8, false))
            .collect::<Vec<_>>(),
    ));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            column(|r| r.origin.as_str()),
            column(|r| r.destination.as_str()),
            column(|r| r.airline.as_str()),
            column(|r| r.flight_number.as_str()),
            column(|r| r.departure_time.as_str()),
            column(|r| r.date.as_str()),
            column(|r| r.domestic_international.as_str()),
        ],
    )
    .context("building record batch")?;

    let parquet_path = "sample_flights.parquet";
    let file = std::fs::File::create(parquet_path).context("creating parquet output")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;

    println!("Wrote {} flights to {csv_path} and {parquet_path}", rows.len());
    Ok(())
}
