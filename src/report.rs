//! Plain-text and JSON rendering of a dashboard summary, for the terminal.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::data::filter::FilterSelection;
use crate::data::summary::{DashboardSummary, SummaryText};

const BAR_WIDTH: usize = 40;

/// Text report: selected configuration, value boxes, histogram, breakdown.
pub fn render_text(selection: &FilterSelection, summary: &DashboardSummary) -> String {
    let text = summary.text();
    let mut out = String::new();

    out.push_str(&format!("Selected Class: {}\n", selection.class));
    out.push_str(&format!(
        "Selected Age Range: {} - {}\n",
        selection.age_min, selection.age_max
    ));
    out.push('\n');
    out.push_str(&format!("Total Passengers  {}\n", text.passengers));
    out.push_str(&format!("Average Fare      {}\n", text.average_fare));
    out.push_str(&format!("Survival Rate     {}\n", text.survival_rate));

    out.push_str("\nHistogram of Age\n");
    let hist = &summary.age_histogram;
    if hist.is_empty() {
        out.push_str("  (no data)\n");
    } else {
        let peak = hist.max_count().max(1);
        for bin in &hist.bins {
            let len = bin.count * BAR_WIDTH / peak;
            out.push_str(&format!(
                "  {:>6.1} - {:>6.1}  {:<width$} {}\n",
                bin.start,
                bin.end,
                "#".repeat(len),
                bin.count,
                width = BAR_WIDTH
            ));
        }
    }

    out.push_str("\nSurvival by Gender\n");
    for group in &summary.gender_survival.groups {
        out.push_str(&format!(
            "  {:<8} survived={}  {}\n",
            group.sex.as_str(),
            u8::from(group.survived),
            group.count
        ));
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    selection: &'a FilterSelection,
    text: SummaryText,
    summary: &'a DashboardSummary,
}

/// Pretty JSON holding the selection, the formatted strings and the raw
/// aggregates. Unavailable metrics serialize as `null`.
pub fn render_json(selection: &FilterSelection, summary: &DashboardSummary) -> Result<String> {
    let report = JsonReport {
        selection,
        text: summary.text(),
        summary,
    };
    serde_json::to_string_pretty(&report).context("serializing summary")
}
