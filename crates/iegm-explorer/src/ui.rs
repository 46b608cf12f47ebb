//! Plot and statistics widgets

use crate::figures::{Figure, Trace};
use egui_plot::{Corner, Legend, Line, Plot, PlotPoints};

const PALETTE: [egui::Color32; 6] = [
    egui::Color32::from_rgb(31, 119, 180),
    egui::Color32::from_rgb(255, 127, 14),
    egui::Color32::from_rgb(44, 160, 44),
    egui::Color32::from_rgb(214, 39, 40),
    egui::Color32::from_rgb(148, 103, 189),
    egui::Color32::from_rgb(140, 86, 75),
];

fn trace_color(index: usize) -> egui::Color32 {
    PALETTE[index % PALETTE.len()]
}

/// Time-domain plot above the magnitude spectrum
pub fn show_figure(ui: &mut egui::Ui, id: usize, figure: &Figure) {
    ui.heading(&figure.title);

    let height = ((ui.available_height() - 60.0) / 2.0).max(150.0);

    Plot::new(("time_plot", id))
        .legend(Legend::default().position(Corner::RightTop))
        .height(height)
        .x_axis_label(figure.axis.label())
        .allow_zoom(true)
        .allow_drag(true)
        .show(ui, |plot_ui| {
            for (i, trace) in figure.traces.iter().enumerate() {
                plot_ui.line(line(trace, &trace.time_points, i));
            }
        });

    ui.separator();

    Plot::new(("spectrum_plot", id))
        .legend(Legend::default().position(Corner::RightTop))
        .height(height)
        .x_axis_label(figure.axis.frequency_label())
        .y_axis_label("|X(f)|")
        .allow_zoom(true)
        .allow_drag(true)
        .show(ui, |plot_ui| {
            for (i, trace) in figure.traces.iter().enumerate() {
                plot_ui.line(line(trace, &trace.spectrum_points, i));
            }
        });
}

fn line(trace: &Trace, points: &[[f64; 2]], index: usize) -> Line {
    Line::new(PlotPoints::new(points.to_vec()))
        .color(trace_color(index))
        .name(&trace.name)
}

/// Summary statistics of the figure's traces
pub fn show_trace_stats(ui: &mut egui::Ui, id: usize, figure: &Figure) {
    for (i, trace) in figure.traces.iter().enumerate() {
        let Some(stats) = &trace.stats else {
            continue;
        };

        egui::CollapsingHeader::new(egui::RichText::new(&trace.name).color(trace_color(i)))
            .id_source(("trace_stats", id, i))
            .default_open(figure.traces.len() == 1)
            .show(ui, |ui| {
                egui::Grid::new(("stats_grid", id, i)).striped(true).show(ui, |ui| {
                    for (name, value) in stats.rows() {
                        ui.label(name);
                        ui.monospace(format!("{:.4}", value));
                        ui.end_row();
                    }
                    if let Some(peak) = trace.peak_frequency {
                        ui.label("peak");
                        ui.monospace(format!("{:.4}", peak));
                        ui.end_row();
                    }
                });
            });
    }
}
