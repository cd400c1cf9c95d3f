use std::f32::consts::TAU;

use eframe::egui::{self, Color32, RichText, Sense, Shape, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Line, Plot, PlotPoints, Points};

use rusty_dash::data::series::{ChartKind, ChartSeries, HistogramBin};

use crate::color::generate_palette;

const PLOT_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Chart (central panel)
// ---------------------------------------------------------------------------

/// Render `series` in the style requested by `kind`.
pub fn chart(ui: &mut Ui, column: &str, kind: ChartKind, series: &ChartSeries, color: Color32) {
    if series.is_empty() {
        ui.label("Nothing to plot: no rows pass the filter.");
        return;
    }

    match series {
        ChartSeries::Points(points) => point_chart(ui, column, kind, points, color),
        ChartSeries::Bins(bins) => histogram_chart(ui, column, bins, color),
        ChartSeries::Categories(categories) => pie_chart(ui, categories, color),
    }
}

fn point_chart(ui: &mut Ui, column: &str, kind: ChartKind, points: &[(usize, f64)], color: Color32) {
    Plot::new("point_chart")
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .x_axis_label("Row")
        .y_axis_label(column)
        .show(ui, |plot_ui| {
            let xy: Vec<[f64; 2]> = points
                .iter()
                .map(|&(row, value)| [row as f64, value])
                .collect();
            match kind {
                ChartKind::Bar => {
                    let bars: Vec<Bar> = points
                        .iter()
                        .map(|&(row, value)| Bar::new(row as f64, value).width(0.8))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).color(color).name(column));
                }
                ChartKind::Scatter => {
                    plot_ui.points(
                        Points::new(PlotPoints::from(xy))
                            .radius(3.0)
                            .color(color)
                            .name(column),
                    );
                }
                ChartKind::Area => {
                    plot_ui.line(
                        Line::new(PlotPoints::from(xy))
                            .fill(0.0)
                            .color(color)
                            .name(column),
                    );
                }
                _ => {
                    plot_ui.line(
                        Line::new(PlotPoints::from(xy))
                            .width(1.5)
                            .color(color)
                            .name(column),
                    );
                }
            }
        });
}

fn histogram_chart(ui: &mut Ui, column: &str, bins: &[HistogramBin], color: Color32) {
    let bars: Vec<Bar> = bins
        .iter()
        .map(|b| {
            Bar::new((b.start + b.end) / 2.0, b.count as f64)
                .width(b.end - b.start)
                .name(format!("{:.3} – {:.3}", b.start, b.end))
        })
        .collect();

    Plot::new("histogram")
        .height(PLOT_HEIGHT)
        .x_axis_label(column)
        .y_axis_label("Count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color));
        });
}

// ---------------------------------------------------------------------------
// Pie (drawn with the painter; egui_plot has no pie)
// ---------------------------------------------------------------------------

/// Max angle of one fan triangle, in radians.
const ARC_STEP: f32 = 0.05;

fn pie_chart(ui: &mut Ui, categories: &[(String, usize)], color: Color32) {
    let total: usize = categories.iter().map(|(_, n)| n).sum();
    let colors = generate_palette(categories.len(), color);

    ui.horizontal(|ui: &mut Ui| {
        let size = PLOT_HEIGHT.min(ui.available_width() * 0.6);
        let (response, painter) = ui.allocate_painter(egui::vec2(size, size), Sense::hover());
        let center = response.rect.center();
        let radius = size * 0.45;

        let mut start = -TAU / 4.0;
        for ((_, count), fill) in categories.iter().zip(&colors) {
            let sweep = TAU * *count as f32 / total as f32;
            let steps = (sweep / ARC_STEP).ceil().max(1.0) as usize;
            for i in 0..steps {
                let a0 = start + sweep * i as f32 / steps as f32;
                let a1 = start + sweep * (i + 1) as f32 / steps as f32;
                painter.add(Shape::convex_polygon(
                    vec![
                        center,
                        center + radius * egui::Vec2::angled(a0),
                        center + radius * egui::Vec2::angled(a1),
                    ],
                    *fill,
                    Stroke::NONE,
                ));
            }
            start += sweep;
        }

        ui.vertical(|ui: &mut Ui| {
            for ((label, count), fill) in categories.iter().zip(&colors) {
                let pct = 100.0 * *count as f64 / total as f64;
                ui.label(RichText::new(format!("■ {label}: {count} ({pct:.1}%)")).color(*fill));
            }
        });
    });
}
