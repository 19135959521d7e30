use eframe::egui::{self, Align, Color32, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::data::table::TABLE_COLUMNS;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Value boxes
// ---------------------------------------------------------------------------

/// The three headline numbers, side by side.
pub fn value_boxes(ui: &mut Ui, state: &AppState) {
    let text = state.summary().text();
    let boxes = [
        ("🚢", "Total Passengers", text.passengers, Color32::from_rgb(52, 101, 164)),
        ("👫", "Average Fare", text.average_fare, Color32::from_rgb(46, 139, 87)),
        ("💀", "Survival Rate", text.survival_rate, Color32::from_rgb(214, 105, 38)),
    ];

    ui.columns(boxes.len(), |columns: &mut [Ui]| {
        for (ui, (icon, title, value, fill)) in columns.iter_mut().zip(boxes) {
            egui::Frame::group(ui.style())
                .fill(fill)
                .inner_margin(12.0)
                .show(ui, |ui: &mut Ui| {
                    ui.set_min_width(ui.available_width());
                    ui.horizontal(|ui: &mut Ui| {
                        ui.label(RichText::new(icon).size(32.0));
                        ui.vertical(|ui: &mut Ui| {
                            ui.label(RichText::new(title).color(Color32::WHITE));
                            ui.label(
                                RichText::new(value)
                                    .size(24.0)
                                    .strong()
                                    .color(Color32::WHITE),
                            );
                        });
                    });
                });
        }
    });
}

// ---------------------------------------------------------------------------
// Passenger table
// ---------------------------------------------------------------------------

/// Rows of the current filtered view.
pub fn passenger_table(ui: &mut Ui, state: &AppState) {
    let indices = state.visible_indices();
    if indices.is_empty() {
        ui.label("No passengers match the current selection.");
        return;
    }
    let dataset = state.dataset();

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .columns(Column::auto().at_least(64.0), TABLE_COLUMNS.len())
        .max_scroll_height(320.0)
        .header(20.0, |mut header| {
            for name in TABLE_COLUMNS {
                header.col(|ui: &mut Ui| {
                    ui.strong(name);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, indices.len(), |mut row| {
                let Some(p) = dataset.get(indices[row.index()]) else {
                    return;
                };
                let cells = [
                    p.class.to_string(),
                    p.sex.to_string(),
                    p.age.map(|a| a.to_string()).unwrap_or_default(),
                    format!("{:.2}", p.fare),
                    if p.survived { "yes" } else { "no" }.to_string(),
                    p.sibsp.to_string(),
                    p.parch.to_string(),
                    p.embark_town.clone().unwrap_or_default(),
                ];
                for cell in cells {
                    row.col(|ui: &mut Ui| {
                        ui.label(cell);
                    });
                }
            });
        });
}
