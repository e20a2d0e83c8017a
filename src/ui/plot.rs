use std::f64::consts::TAU;

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{
    Arrows, Bar, BarChart, GridMark, Line, MarkerShape, Plot, PlotPoint, PlotPoints, Points,
    Polygon, Text,
};

use crate::color::{pie_colors, ColorRamp, EDGE_GRAY, LIGHT_BLUE};
use crate::data::analysis::{AirportReport, Share, ValueCount};
use crate::state::{AppState, Chart};

const PIE_START_DEG: f64 = 140.0;
const PIE_SEGMENTS_PER_TURN: f64 = 180.0;

// ---------------------------------------------------------------------------
// Central panel – the active chart
// ---------------------------------------------------------------------------

/// Render the selected chart in the central panel.
pub fn chart_view(ui: &mut Ui, state: &AppState) {
    let report = match &state.report {
        Some(r) => r,
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a flight table to begin  (File → Open…)");
            });
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(state.chart.title(&report.origin, &state.settings));
    });

    if report.total_flights == 0 {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label(format!("No flights depart {}", report.origin));
        });
        return;
    }

    match state.chart {
        Chart::Routes => route_map(ui, report, &state.route_positions),
        Chart::TopDestinations => ranked_bars(
            ui,
            "top_destinations",
            "Destination Airport",
            &report.top_destinations,
            ColorRamp::BluesReversed,
        ),
        Chart::HourlyVolume => hourly_line(ui, report),
        Chart::DomesticInternational => share_pie(ui, &report.domestic_international),
        Chart::Hubs => ranked_bars(ui, "hubs", "Airport", &report.hubs, ColorRamp::CoolWarm),
        Chart::TopAirlines => ranked_bars(
            ui,
            "top_airlines",
            "Airline",
            &report.top_airlines,
            ColorRamp::Magma,
        ),
    }
}

// ---------------------------------------------------------------------------
// 1. Route map
// ---------------------------------------------------------------------------

fn route_map(ui: &mut Ui, report: &AirportReport, positions: &[[f64; 2]]) {
    let graph = &report.routes.graph;
    let at = |idx: petgraph::graph::NodeIndex| positions.get(idx.index()).copied();

    let mut tails = Vec::new();
    let mut tips = Vec::new();
    for edge in graph.raw_edges() {
        if let (Some(a), Some(b)) = (at(edge.source()), at(edge.target())) {
            // stop short of the target marker
            let (dx, dy) = (b[0] - a[0], b[1] - a[1]);
            tails.push(a);
            tips.push([a[0] + dx * 0.9, a[1] + dy * 0.9]);
        }
    }

    Plot::new("route_map")
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .allow_boxed_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.arrows(
                Arrows::new(PlotPoints::new(tails), PlotPoints::new(tips))
                    .color(EDGE_GRAY)
                    .tip_length(10.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::new(positions.to_vec()))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(22.0)
                    .color(LIGHT_BLUE),
            );
            for idx in graph.node_indices() {
                let code = &graph[idx];
                if let Some([x, y]) = at(idx) {
                    plot_ui.text(
                        Text::new(PlotPoint::new(x, y), RichText::new(code).strong())
                            .color(Color32::BLACK),
                    );
                }
            }
        });
}

// ---------------------------------------------------------------------------
// 2, 5, 6. Ranked bar charts
// ---------------------------------------------------------------------------

fn ranked_bars(ui: &mut Ui, id: &str, x_label: &str, counts: &[ValueCount], ramp: ColorRamp) {
    let colors = ramp.sample(counts.len());
    let bars: Vec<Bar> = counts
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(i, (c, color))| {
            Bar::new(i as f64, c.count as f64)
                .name(&c.value)
                .fill(color)
                .width(0.7)
        })
        .collect();

    let labels: Vec<String> = counts.iter().map(|c| c.value.clone()).collect();

    Plot::new(id)
        .x_axis_label(x_label)
        .y_axis_label("Number of Flights")
        .x_axis_formatter(move |mark: GridMark, _range| category_label(&labels, mark.value))
        .include_y(0.0)
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).name("Number of Flights"));
        });
}

/// Axis label for a category axis: the name at integer ticks, blank elsewhere.
fn category_label(labels: &[String], value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    labels.get(rounded as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// 3. Hourly volume
// ---------------------------------------------------------------------------

fn hourly_line(ui: &mut Ui, report: &AirportReport) {
    let points: Vec<[f64; 2]> = report
        .hourly_volume
        .iter()
        .map(|(&hour, &count)| [hour as f64, count as f64])
        .collect();

    Plot::new("hourly_volume")
        .x_axis_label("Hour of Day")
        .y_axis_label("Number of Flights")
        .x_axis_formatter(|mark: GridMark, _range| hour_label(mark.value))
        .include_x(0.0)
        .include_x(23.0)
        .include_y(0.0)
        .show_grid(true)
        .show(ui, |plot_ui| {
            plot_ui.line(
                Line::new(PlotPoints::new(points.clone()))
                    .name("Flights")
                    .color(Color32::from_rgb(31, 119, 180))
                    .width(2.0),
            );
            plot_ui.points(
                Points::new(PlotPoints::new(points))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(4.0)
                    .color(Color32::from_rgb(31, 119, 180)),
            );
        });
}

/// Hour ticks 0–23, nothing outside the day or between whole hours.
fn hour_label(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || !(0.0..=23.0).contains(&rounded) {
        return String::new();
    }
    format!("{}", rounded as u32)
}

// ---------------------------------------------------------------------------
// 4. Domestic / international pie
// ---------------------------------------------------------------------------

/// Slice boundaries in radians: `(start, end)` per share, counter-clockwise
/// from the start angle.
fn pie_slices(shares: &[Share]) -> Vec<(f64, f64)> {
    let total: f64 = shares.iter().map(|s| s.percent).sum();
    if total <= 0.0 {
        return Vec::new();
    }
    let mut start = PIE_START_DEG.to_radians();
    shares
        .iter()
        .map(|s| {
            let end = start + TAU * s.percent / total;
            let slice = (start, end);
            start = end;
            slice
        })
        .collect()
}

fn share_pie(ui: &mut Ui, shares: &[Share]) {
    let slices = pie_slices(shares);
    let colors = pie_colors(shares.len());

    Plot::new("domestic_international")
        .data_aspect(1.0)
        .show_axes([false, false])
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .include_x(-1.4)
        .include_x(1.4)
        .include_y(-1.3)
        .include_y(1.3)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .show(ui, |plot_ui| {
            for ((share, &(start, end)), color) in shares.iter().zip(&slices).zip(colors) {
                let steps = (((end - start) / TAU) * PIE_SEGMENTS_PER_TURN).ceil().max(2.0) as usize;
                let mut outline = vec![[0.0, 0.0]];
                outline.extend((0..=steps).map(|i| {
                    let a = start + (end - start) * i as f64 / steps as f64;
                    [a.cos(), a.sin()]
                }));
                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(outline))
                        .name(&share.value)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = (start + end) / 2.0;
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                        format!("{:.1}%", share.percent),
                    )
                    .color(Color32::BLACK),
                );
                let anchor = if mid.cos() >= 0.0 {
                    Align2::LEFT_CENTER
                } else {
                    Align2::RIGHT_CENTER
                };
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(1.1 * mid.cos(), 1.1 * mid.sin()),
                        share.value.as_str(),
                    )
                    .anchor(anchor),
                );
            }
        });
}
