use std::sync::Arc;

use crate::data::filter::{compute_filtered_view, FilterSelection};
use crate::data::model::{Dataset, PassengerClass};
use crate::data::summary::DashboardSummary;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full dashboard state, independent of rendering.
///
/// Holds the current selection together with the filtered rows and summary
/// derived from it. Both are recomputed only when a different selection is
/// applied, so the displays can read them every frame.
pub struct AppState {
    /// Shared passenger table, loaded once at startup.
    dataset: Arc<Dataset>,

    /// Where the dataset came from (file path or bundled).
    pub source: String,

    /// Current sidebar inputs.
    selection: FilterSelection,

    /// Indices of passengers passing the current selection (cached).
    visible_indices: Vec<usize>,

    /// Summaries of `visible_indices` (cached).
    summary: DashboardSummary,

    /// Number of times the filtered view has been computed.
    recomputations: usize,
}

impl AppState {
    /// Build the state with the default selection already applied.
    pub fn new(dataset: Arc<Dataset>, source: impl Into<String>) -> Self {
        let selection = FilterSelection::default_for(&dataset);
        let view = compute_filtered_view(&dataset, &selection);
        let summary = DashboardSummary::compute(&view);
        let visible_indices = view.into_indices();

        Self {
            dataset,
            source: source.into(),
            selection,
            visible_indices,
            summary,
            recomputations: 1,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn summary(&self) -> &DashboardSummary {
        &self.summary
    }

    pub fn recomputations(&self) -> usize {
        self.recomputations
    }

    pub fn visible_indices(&self) -> &[usize] {
        &self.visible_indices
    }

    /// Replace the selection and recompute the view and summaries.
    ///
    /// Returns `false` (and does nothing) when `selection` equals the
    /// current one.
    pub fn apply_selection(&mut self, selection: FilterSelection) -> bool {
        if selection == self.selection {
            return false;
        }
        self.selection = selection;
        self.refilter();
        true
    }

    pub fn set_class(&mut self, class: PassengerClass) -> bool {
        self.apply_selection(FilterSelection { class, ..self.selection })
    }

    pub fn set_age_min(&mut self, age_min: f64) -> bool {
        self.apply_selection(FilterSelection { age_min, ..self.selection })
    }

    pub fn set_age_max(&mut self, age_max: f64) -> bool {
        self.apply_selection(FilterSelection { age_max, ..self.selection })
    }

    /// Recompute `visible_indices` and `summary` after a selection change.
    fn refilter(&mut self) {
        let view = compute_filtered_view(&self.dataset, &self.selection);
        self.summary = DashboardSummary::compute(&view);
        self.visible_indices = view.into_indices();
        self.recomputations += 1;

        log::debug!(
            "Selection {} / {}..{} -> {} passengers",
            self.selection.class,
            self.selection.age_min,
            self.selection.age_max,
            self.visible_indices.len()
        );
    }

    /// "Selected Configuration" lines for the sidebar.
    pub fn selected_info(&self) -> (String, String) {
        (
            format!("Selected Class: {}", self.selection.class),
            format!(
                "Selected Age Range: {} - {}",
                self.selection.age_min, self.selection.age_max
            ),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_dataset;

    fn state() -> AppState {
        AppState::new(Arc::new(sample_dataset()), "fixture")
    }

    #[test]
    fn starts_with_default_selection() {
        let st = state();
        assert_eq!(st.selection().class, PassengerClass::First);
        assert_eq!(st.summary().passenger_count, 3);
        assert_eq!(st.recomputations(), 1);
    }

    #[test]
    fn unchanged_selection_is_not_recomputed() {
        let mut st = state();
        let same = *st.selection();
        assert!(!st.apply_selection(same));
        assert!(!st.set_class(PassengerClass::First));
        assert_eq!(st.recomputations(), 1);
    }

    #[test]
    fn changes_flow_into_summary() {
        let mut st = state();
        assert!(st.set_class(PassengerClass::Second));
        assert_eq!(st.summary().passenger_count, 2);
        assert!(st.set_age_min(20.0));
        assert_eq!(st.summary().passenger_count, 1);
        assert_eq!(st.visible_indices(), &[5]);
        assert!(st.set_age_max(30.0));
        assert_eq!(st.summary().passenger_count, 0);
        assert!(!st.summary().survival_rate.is_available());
        assert_eq!(st.recomputations(), 4);
    }

    #[test]
    fn cached_view_matches_fresh_computation() {
        let mut st = state();
        st.set_class(PassengerClass::Third);
        let fresh = compute_filtered_view(st.dataset(), st.selection());
        assert_eq!(st.visible_indices(), fresh.indices());
        assert_eq!(st.summary(), &DashboardSummary::compute(&fresh));
    }

    #[test]
    fn selected_info_text() {
        let st = state();
        let (class, ages) = st.selected_info();
        assert_eq!(class, "Selected Class: First");
        assert_eq!(ages, "Selected Age Range: 4 - 66");
    }
}
