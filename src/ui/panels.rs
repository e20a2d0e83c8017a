use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::analysis::{AirportReport, ValueCount};
use crate::state::{AppState, Chart};

// ---------------------------------------------------------------------------
// Left side panel – filter widgets and the active chart's numbers
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No flight table loaded.");
        return;
    };

    // Clone what we need so we can mutate state below.
    let origins: Vec<String> = table.origins.iter().cloned().collect();
    let airlines: Vec<String> = state.origin_airlines.iter().cloned().collect();

    ui.strong("Origin");
    let current_origin = state.filters.origin.clone();
    let mut picked_origin = None;
    egui::ComboBox::from_id_salt("origin")
        .selected_text(current_origin.as_str())
        .show_ui(ui, |ui: &mut Ui| {
            ScrollArea::vertical().max_height(300.0).show(ui, |ui: &mut Ui| {
                for code in &origins {
                    if ui.selectable_label(current_origin == *code, code.as_str()).clicked() {
                        picked_origin = Some(code.clone());
                    }
                }
            });
        });
    if let Some(code) = picked_origin {
        log::info!("Origin changed to {code}");
        state.set_origin(&code);
    }
    ui.separator();

    let n_selected = airlines.iter().filter(|a| state.airline_selected(a)).count();
    let header_text = format!("Airlines  ({n_selected}/{})", airlines.len());
    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("airlines")
        .default_open(false)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all_airlines();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_airlines();
                }
            });

            let mut toggled = None;
            ScrollArea::vertical().max_height(240.0).show(ui, |ui: &mut Ui| {
                for airline in &airlines {
                    let mut checked = state.airline_selected(airline);
                    if ui.checkbox(&mut checked, airline.as_str()).changed() {
                        toggled = Some(airline.clone());
                    }
                }
            });
            if let Some(airline) = toggled {
                state.toggle_airline(&airline);
            }
        });
    ui.separator();

    if let Some(report) = &state.report {
        ui.strong(state.chart.label());
        summary_table(ui, state.chart, report);
    }
}

/// Two-column table of the numbers behind a chart.
fn summary_table(ui: &mut Ui, chart: Chart, report: &AirportReport) {
    let (key_header, value_header, rows) = summary_rows(chart, report);

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(true)
        .column(Column::remainder())
        .column(Column::auto().at_least(60.0))
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong(key_header);
            });
            header.col(|ui| {
                ui.strong(value_header);
            });
        })
        .body(|mut body| {
            for (key, value) in rows {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        ui.label(key);
                    });
                    row.col(|ui| {
                        ui.label(value);
                    });
                });
            }
        });
}

/// Header labels and `(key, value)` rows for a chart's summary table.
fn summary_rows(
    chart: Chart,
    report: &AirportReport,
) -> (&'static str, &'static str, Vec<(String, String)>) {
    let counts = |values: &[ValueCount]| -> Vec<(String, String)> {
        values
            .iter()
            .map(|c| (c.value.clone(), c.count.to_string()))
            .collect()
    };

    match chart {
        Chart::Routes => (
            "Route",
            "Flights",
            report
                .routes
                .edges()
                .map(|(from, to, n)| (format!("{from} → {to}"), n.to_string()))
                .collect(),
        ),
        Chart::TopDestinations => ("Destination", "Flights", counts(&report.top_destinations)),
        Chart::HourlyVolume => (
            "Hour",
            "Flights",
            report
                .hourly_volume
                .iter()
                .map(|(hour, n)| (format!("{hour:02}:00"), n.to_string()))
                .collect(),
        ),
        Chart::DomesticInternational => (
            "Segment",
            "Share",
            report
                .domestic_international
                .iter()
                .map(|s| (s.value.clone(), format!("{:.1}%", s.percent)))
                .collect(),
        ),
        Chart::Hubs => ("Airport", "Flights", counts(&report.hubs)),
        Chart::TopAirlines => ("Airline", "Flights", counts(&report.top_airlines)),
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        for chart in Chart::ALL {
            if ui
                .selectable_label(state.chart == chart, chart.label())
                .clicked()
            {
                state.chart = chart;
            }
        }

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} flights loaded, {} from {}",
                table.len(),
                state.visible_indices.len(),
                state.filters.origin
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open flight data")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        match crate::data::loader::load_file(&path) {
            Ok(table) => state.set_table(table),
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::analysis::ReportSettings;
    use crate::data::model::{Flight, FlightTable};

    fn report() -> AirportReport {
        let flights = vec![
            Flight {
                origin: "JFK".to_string(),
                destination: "LAX".to_string(),
                airline: "Delta".to_string(),
                departure_time: "08:10".to_string(),
                domestic_international: "Domestic".to_string(),
                ..Default::default()
            },
            Flight {
                origin: "JFK".to_string(),
                destination: "NRT".to_string(),
                airline: "JAL".to_string(),
                departure_time: "13:25".to_string(),
                domestic_international: "International".to_string(),
                ..Default::default()
            },
        ];
        let table = FlightTable::from_flights(flights, Vec::new());
        AirportReport::build(&table, &[0, 1], "JFK", &ReportSettings::default()).unwrap()
    }

    #[test]
    fn test_route_rows() {
        let (key, _, rows) = summary_rows(Chart::Routes, &report());
        assert_eq!(key, "Route");
        assert_eq!(rows[0], ("JFK → LAX".to_string(), "1".to_string()));
    }

    #[test]
    fn test_share_and_hour_rows() {
        let report = report();
        let (_, header, shares) = summary_rows(Chart::DomesticInternational, &report);
        assert_eq!(header, "Share");
        assert!(shares.iter().all(|(_, v)| v == "50.0%"));

        let (_, _, hours) = summary_rows(Chart::HourlyVolume, &report);
        assert_eq!(hours[1].0, "13:00");
    }
}
