use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, GridMark, Legend, Plot};

use crate::color::ColorMap;
use crate::data::model::Sex;
use crate::state::AppState;

const PLOT_HEIGHT: f32 = 280.0;
const GROUP_BAR_WIDTH: f64 = 0.35;

// ---------------------------------------------------------------------------
// Histogram of age
// ---------------------------------------------------------------------------

pub fn age_histogram(ui: &mut Ui, state: &AppState) {
    let hist = &state.summary().age_histogram;
    if hist.is_empty() {
        ui.label("No ages to plot for the current selection.");
        return;
    }

    let bars: Vec<Bar> = hist
        .bins
        .iter()
        .map(|bin| {
            Bar::new(bin.center(), bin.count as f64)
                .width(bin.width())
                .name(format!("{:.1} - {:.1}", bin.start, bin.end))
        })
        .collect();

    let chart = BarChart::new(bars)
        .name("count")
        .color(Color32::from_rgb(52, 101, 164));

    Plot::new("age_histogram")
        .height(PLOT_HEIGHT)
        .x_axis_label("age")
        .y_axis_label("count")
        .allow_scroll(false)
        .allow_drag(false)
        .show(ui, |plot_ui| plot_ui.bar_chart(chart));
}

// ---------------------------------------------------------------------------
// Survival by gender (grouped bars)
// ---------------------------------------------------------------------------

/// One group per sex along x; inside each group one bar per `survived`
/// value, coloured by `survived`.
pub fn survival_by_gender(ui: &mut Ui, state: &AppState) {
    let breakdown = &state.summary().gender_survival;
    if breakdown.total() == 0 {
        ui.label("No passengers match the current selection.");
        return;
    }

    let colors = ColorMap::new([0u8, 1u8]);
    let charts: Vec<BarChart> = colors
        .legend_entries()
        .into_iter()
        .zip([false, true])
        .map(|((key, color), survived)| {
            let offset = if survived {
                GROUP_BAR_WIDTH / 2.0
            } else {
                -GROUP_BAR_WIDTH / 2.0
            };
            let bars = Sex::ALL
                .iter()
                .enumerate()
                .map(|(i, &sex)| {
                    Bar::new(i as f64 + offset, breakdown.count(sex, survived) as f64)
                        .width(GROUP_BAR_WIDTH)
                        .name(sex.as_str())
                })
                .collect();
            BarChart::new(bars)
                .name(format!("survived = {key}"))
                .color(color)
        })
        .collect();

    Plot::new("survival_by_gender")
        .height(PLOT_HEIGHT)
        .legend(Legend::default())
        .x_axis_label("sex")
        .y_axis_label("count")
        .x_axis_formatter(|mark: GridMark, _range| sex_axis_label(mark.value))
        .allow_scroll(false)
        .allow_drag(false)
        .show(ui, |plot_ui| {
            for chart in charts {
                plot_ui.bar_chart(chart);
            }
        });
}

/// Category label for an x grid mark; blank between categories.
fn sex_axis_label(x: f64) -> String {
    let idx = x.round();
    if (x - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    Sex::ALL
        .get(idx as usize)
        .map(|s| s.to_string())
        .unwrap_or_default()
}
