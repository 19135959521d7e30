use eframe::egui;

use crate::config::SIDE_PANEL_WIDTH;
use crate::state::AppState;
use crate::ui::{overview, panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct TitanicDashboardApp {
    pub state: AppState,
}

impl TitanicDashboardApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for TitanicDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: title and dataset info ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(SIDE_PANEL_WIDTH)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: value boxes, charts, table ----
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    egui::CollapsingHeader::new("Dashboard Overview")
                        .default_open(true)
                        .show(ui, |ui| overview::value_boxes(ui, &self.state));

                    egui::CollapsingHeader::new("Histogram")
                        .default_open(true)
                        .show(ui, |ui| plot::age_histogram(ui, &self.state));

                    egui::CollapsingHeader::new("Survival by Gender")
                        .default_open(true)
                        .show(ui, |ui| plot::survival_by_gender(ui, &self.state));

                    egui::CollapsingHeader::new("Passengers")
                        .default_open(false)
                        .show(ui, |ui| overview::passenger_table(ui, &self.state));
                });
        });
    }
}
