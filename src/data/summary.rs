use std::fmt;

use serde::Serialize;

use super::filter::FilteredView;
use super::model::Sex;
use crate::config::{HISTOGRAM_BINS, MAX_HISTOGRAM_BINS, UNAVAILABLE};

// ---------------------------------------------------------------------------
// Metric – a scalar that may be undefined on an empty view
// ---------------------------------------------------------------------------

/// Result of a ratio-style summary. `Unavailable` stands in for what would
/// otherwise be a division by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Metric {
    Value(f64),
    Unavailable,
}

impl Metric {
    pub fn value(&self) -> Option<f64> {
        match self {
            Metric::Value(v) => Some(*v),
            Metric::Unavailable => None,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Metric::Value(_))
    }

    /// `$12.34`, or the sentinel.
    pub fn as_currency(&self) -> String {
        self.value()
            .map(|v| format!("${v:.2}"))
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }

    /// `38.46%`, or the sentinel.
    pub fn as_percent(&self) -> String {
        self.value()
            .map(|v| format!("{v:.2}%"))
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Value(v) => write!(f, "{v:.2}"),
            Metric::Unavailable => f.write_str(UNAVAILABLE),
        }
    }
}

// ---------------------------------------------------------------------------
// Scalar summaries
// ---------------------------------------------------------------------------

pub fn passenger_count(view: &FilteredView<'_>) -> usize {
    view.len()
}

/// Mean fare over the view.
pub fn average_fare(view: &FilteredView<'_>) -> Metric {
    if view.is_empty() {
        return Metric::Unavailable;
    }
    let total: f64 = view.iter().map(|p| p.fare).sum();
    Metric::Value(total / view.len() as f64)
}

/// Percentage of survivors in the view, in `[0, 100]`.
pub fn survival_rate(view: &FilteredView<'_>) -> Metric {
    if view.is_empty() {
        return Metric::Unavailable;
    }
    let survived = view.iter().filter(|p| p.survived).count();
    Metric::Value(survived as f64 / view.len() as f64 * 100.0)
}

// ---------------------------------------------------------------------------
// Age histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

impl HistogramBin {
    pub fn center(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    pub fn width(&self) -> f64 {
        self.end - self.start
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgeHistogram {
    pub bins: Vec<HistogramBin>,
}

impl AgeHistogram {
    pub fn total(&self) -> usize {
        self.bins.iter().map(|b| b.count).sum()
    }

    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|b| b.count).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }
}

/// Partition the view's ages into `bins` equal-width bins spanning
/// `[min_age, max_age]`. The last bin also holds `max_age`.
///
/// When every age is the same, bins are 1 year wide starting at that age.
/// `bins` is capped at [`MAX_HISTOGRAM_BINS`].
pub fn age_histogram(view: &FilteredView<'_>, bins: usize) -> AgeHistogram {
    let bins = bins.min(MAX_HISTOGRAM_BINS);
    let ages: Vec<f64> = view
        .iter()
        .filter_map(|p| p.age)
        .filter(|a| a.is_finite())
        .collect();
    if ages.is_empty() || bins == 0 {
        return AgeHistogram::default();
    }

    let min = ages.iter().copied().fold(f64::INFINITY, f64::min);
    let max = ages.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = if max > min {
        (max - min) / bins as f64
    } else {
        1.0
    };

    let mut counts = vec![0usize; bins];
    for age in ages {
        let idx = ((age - min) / width).floor() as usize;
        counts[idx.min(bins - 1)] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBin {
            start: min + i as f64 * width,
            end: min + (i + 1) as f64 * width,
            count,
        })
        .collect();
    AgeHistogram { bins }
}

// ---------------------------------------------------------------------------
// Survival by gender
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub sex: Sex,
    pub survived: bool,
    pub count: usize,
}

/// Row counts per `(sex, survived)` pair. Always holds all four pairs,
/// ordered by sex then survived (`false` first).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderSurvival {
    pub groups: Vec<GroupCount>,
}

impl GenderSurvival {
    pub fn count(&self, sex: Sex, survived: bool) -> usize {
        self.groups
            .iter()
            .find(|g| g.sex == sex && g.survived == survived)
            .map(|g| g.count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.groups.iter().map(|g| g.count).sum()
    }
}

pub fn gender_survival_breakdown(view: &FilteredView<'_>) -> GenderSurvival {
    let mut groups: Vec<GroupCount> = Sex::ALL
        .iter()
        .flat_map(|&sex| {
            [false, true].into_iter().map(move |survived| GroupCount {
                sex,
                survived,
                count: 0,
            })
        })
        .collect();

    for p in view.iter() {
        if let Some(g) = groups
            .iter_mut()
            .find(|g| g.sex == p.sex && g.survived == p.survived)
        {
            g.count += 1;
        }
    }
    GenderSurvival { groups }
}

// ---------------------------------------------------------------------------
// DashboardSummary – everything the displays read
// ---------------------------------------------------------------------------

/// The three value-box strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryText {
    pub passengers: String,
    pub average_fare: String,
    pub survival_rate: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub passenger_count: usize,
    pub average_fare: Metric,
    pub survival_rate: Metric,
    pub age_histogram: AgeHistogram,
    pub gender_survival: GenderSurvival,
}

impl DashboardSummary {
    pub fn compute(view: &FilteredView<'_>) -> Self {
        Self::compute_with_bins(view, HISTOGRAM_BINS)
    }

    pub fn compute_with_bins(view: &FilteredView<'_>, bins: usize) -> Self {
        Self {
            passenger_count: passenger_count(view),
            average_fare: average_fare(view),
            survival_rate: survival_rate(view),
            age_histogram: age_histogram(view, bins),
            gender_survival: gender_survival_breakdown(view),
        }
    }

    pub fn text(&self) -> SummaryText {
        SummaryText {
            passengers: format!("{} passengers", self.passenger_count),
            average_fare: self.average_fare.as_currency(),
            survival_rate: self.survival_rate.as_percent(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{compute_filtered_view, FilterSelection};
    use crate::data::fixtures::sample_dataset;
    use crate::data::model::PassengerClass;

    #[test]
    fn empty_view_reports_unavailable() {
        let ds = sample_dataset();
        let view = compute_filtered_view(&ds, &FilterSelection::new(PassengerClass::Second, 70.0, 75.0));
        let summary = DashboardSummary::compute(&view);

        assert_eq!(summary.passenger_count, 0);
        assert_eq!(summary.average_fare, Metric::Unavailable);
        assert_eq!(summary.survival_rate, Metric::Unavailable);
        assert!(summary.age_histogram.is_empty());
        assert_eq!(summary.gender_survival.total(), 0);
        assert_eq!(
            summary.text(),
            SummaryText {
                passengers: "0 passengers".into(),
                average_fare: "N/A".into(),
                survival_rate: "N/A".into(),
            }
        );
    }

    #[test]
    fn first_class_summary() {
        let ds = sample_dataset();
        let view = compute_filtered_view(&ds, &FilterSelection::new(PassengerClass::First, 0.0, 80.0));
        let summary = DashboardSummary::compute(&view);

        assert_eq!(summary.passenger_count, 3);
        // (71.2833 + 51.8625 + 26.55) / 3
        assert_eq!(summary.text().average_fare, "$49.90");
        assert_eq!(summary.text().survival_rate, "66.67%");
        assert_eq!(summary.gender_survival.count(Sex::Female, true), 2);
        assert_eq!(summary.gender_survival.count(Sex::Male, false), 1);
        assert_eq!(summary.gender_survival.count(Sex::Male, true), 0);
    }

    #[test]
    fn histogram_spans_view_range() {
        let ds = sample_dataset();
        let view = compute_filtered_view(&ds, &FilterSelection::new(PassengerClass::First, 0.0, 80.0));
        let hist = age_histogram(&view, 20);

        assert_eq!(hist.bins.len(), 20);
        assert_eq!(hist.total(), 3);
        assert_eq!(hist.bins[0].start, 38.0);
        assert!((hist.bins[19].end - 58.0).abs() < 1e-9);
        assert_eq!(hist.bins[0].count, 1);
        assert_eq!(hist.bins[19].count, 1);
        // 54 sits in [54, 55)
        assert_eq!(hist.bins[16].count, 1);
    }

    #[test]
    fn histogram_single_age() {
        let ds = sample_dataset();
        let view = compute_filtered_view(&ds, &FilterSelection::new(PassengerClass::Second, 60.0, 70.0));
        let hist = age_histogram(&view, 20);

        assert_eq!(hist.bins.len(), 20);
        assert_eq!(hist.bins[0].count, 1);
        assert_eq!(hist.bins[0].width(), 1.0);
        assert_eq!(hist.total(), 1);
    }

    #[test]
    fn oversized_bin_request_is_capped() {
        let ds = sample_dataset();
        let view = compute_filtered_view(&ds, &FilterSelection::new(PassengerClass::First, 0.0, 80.0));
        let hist = age_histogram(&view, usize::MAX / 4);

        assert_eq!(hist.bins.len(), MAX_HISTOGRAM_BINS);
        assert_eq!(hist.total(), 3);
        assert!((hist.bins[MAX_HISTOGRAM_BINS - 1].end - 58.0).abs() < 1e-9);
        assert!(age_histogram(&view, 0).is_empty());
    }

    #[test]
    fn metric_formatting() {
        assert_eq!(Metric::Value(32.204).as_currency(), "$32.20");
        assert_eq!(Metric::Value(38.3838).as_percent(), "38.38%");
        assert_eq!(Metric::Unavailable.to_string(), "N/A");
        assert_eq!(Metric::Unavailable.as_currency(), "N/A");
        assert_eq!(Metric::Value(12.5).value(), Some(12.5));
    }
}
