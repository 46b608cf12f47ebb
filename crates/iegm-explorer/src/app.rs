//! Viewer window: one tab per figure, report on the side

use crate::figures::Figure;
use crate::ui;

pub struct ExplorerApp {
    figures: Vec<Figure>,
    report: String,
    selected: usize,
    show_report: bool,
}

impl ExplorerApp {
    pub fn new(figures: Vec<Figure>, report: String) -> Self {
        ExplorerApp {
            figures,
            report,
            selected: 0,
            show_report: true,
        }
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("figure_tabs").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                for (i, figure) in self.figures.iter().enumerate() {
                    ui.selectable_value(&mut self.selected, i, &figure.title);
                }
                ui.separator();
                ui.checkbox(&mut self.show_report, "Report");
            });
        });

        if self.show_report {
            egui::SidePanel::right("report_panel")
                .resizable(true)
                .default_width(340.0)
                .show(ctx, |ui| {
                    egui::ScrollArea::vertical().show(ui, |ui| {
                        ui.heading("Dataset");
                        ui.separator();
                        ui.monospace(&self.report);

                        if let Some(figure) = self.figures.get(self.selected) {
                            ui.separator();
                            ui.heading("Summary statistics");
                            ui::show_trace_stats(ui, self.selected, figure);
                        }
                    });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.figures.get(self.selected) {
            Some(figure) => ui::show_figure(ui, self.selected, figure),
            None => {
                ui.vertical_centered(|ui| {
                    ui.add_space(200.0);
                    ui.heading("No recordings to plot");
                });
            }
        });
    }
}
