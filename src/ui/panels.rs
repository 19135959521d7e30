use eframe::egui::{self, RichText, Ui};

use crate::data::filter::FilterSelection;
use crate::data::model::PassengerClass;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
///
/// Widgets edit a copy of the selection; the copy is applied once at the end
/// so a frame triggers at most one recomputation.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Dashboard Configuration Options");
    ui.separator();

    let classes: Vec<PassengerClass> = state.dataset().classes().iter().copied().collect();
    let (age_lo, age_hi) = state.dataset().age_range();
    let mut selection: FilterSelection = *state.selection();

    egui::CollapsingHeader::new(RichText::new("Class Filter").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Select a Class:");
            egui::ComboBox::from_id_salt("selected_class")
                .selected_text(selection.class.as_str())
                .show_ui(ui, |ui: &mut Ui| {
                    for class in &classes {
                        ui.selectable_value(&mut selection.class, *class, class.as_str());
                    }
                });
        });

    egui::CollapsingHeader::new(RichText::new("Age Group Filter").strong())
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Select Minimum Age:");
            ui.add(egui::Slider::new(&mut selection.age_min, age_lo..=age_hi));
            ui.label("Select Maximum Age:");
            ui.add(egui::Slider::new(&mut selection.age_max, age_lo..=age_hi));

            if selection.is_inverted() {
                let (lo, hi) = selection.age_bounds();
                ui.small(format!("Minimum is above maximum; filtering {lo} - {hi}."));
            }
        });

    // Recompute the view only if something actually changed.
    state.apply_selection(selection);

    ui.separator();

    let (class_line, age_line) = state.selected_info();
    ui.strong("Selected Configuration:");
    ui.label(class_line);
    ui.label(age_line);

    ui.separator();
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with dataset information.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading(crate::config::APP_TITLE);
        ui.separator();
        ui.label(format!(
            "{} passengers loaded from {}, {} visible",
            state.dataset().len(),
            state.source,
            state.visible_indices().len()
        ));
    });
}
