use serde::Serialize;

use super::model::{Dataset, Passenger, PassengerClass};

// ---------------------------------------------------------------------------
// Filter selection: the three user-settable inputs
// ---------------------------------------------------------------------------

/// Current sidebar inputs. Values are kept exactly as the user set them;
/// [`FilterSelection::age_bounds`] is what the filter actually tests against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FilterSelection {
    pub class: PassengerClass,
    pub age_min: f64,
    pub age_max: f64,
}

impl FilterSelection {
    pub fn new(class: PassengerClass, age_min: f64, age_max: f64) -> Self {
        Self {
            class,
            age_min,
            age_max,
        }
    }

    /// Initial selection: the class of the first row, full age range.
    pub fn default_for(dataset: &Dataset) -> Self {
        let class = dataset
            .classes()
            .first()
            .copied()
            .unwrap_or(PassengerClass::First);
        let (age_min, age_max) = dataset.age_range();
        Self::new(class, age_min, age_max)
    }

    /// Inclusive `(low, high)` age bounds. An inverted pair is swapped.
    pub fn age_bounds(&self) -> (f64, f64) {
        if self.age_min <= self.age_max {
            (self.age_min, self.age_max)
        } else {
            (self.age_max, self.age_min)
        }
    }

    pub fn is_inverted(&self) -> bool {
        self.age_min > self.age_max
    }

    /// Whether a single passenger passes this selection.
    ///
    /// A missing age never matches.
    pub fn matches(&self, passenger: &Passenger) -> bool {
        if passenger.class != self.class {
            return false;
        }
        let (low, high) = self.age_bounds();
        match passenger.age {
            Some(age) => age >= low && age <= high,
            None => false,
        }
    }
}

// ---------------------------------------------------------------------------
// Filtered view
// ---------------------------------------------------------------------------

/// Read-only subset of a [`Dataset`]: the rows matching one selection.
#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    /// Wrap pre-computed row indices (e.g. a cached result) as a view.
    pub fn from_indices(dataset: &'a Dataset, indices: Vec<usize>) -> Self {
        Self { dataset, indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Passenger> + '_ {
        let passengers = self.dataset.passengers();
        self.indices.iter().map(move |&i| &passengers[i])
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}

/// Return indices of passengers matching `selection`, in dataset order.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .passengers()
        .iter()
        .enumerate()
        .filter(|(_, p)| selection.matches(p))
        .map(|(i, _)| i)
        .collect()
}

/// Apply `selection` to `dataset`. Zero matches is an empty view, not an error.
pub fn compute_filtered_view<'a>(
    dataset: &'a Dataset,
    selection: &FilterSelection,
) -> FilteredView<'a> {
    if selection.is_inverted() {
        log::debug!(
            "Inverted age range {}..{}, filtering {:?}",
            selection.age_min,
            selection.age_max,
            selection.age_bounds()
        );
    }
    FilteredView::from_indices(dataset, filtered_indices(dataset, selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::sample_dataset;

    #[test]
    fn filter_is_exact() {
        let ds = sample_dataset();
        let sel = FilterSelection::new(PassengerClass::First, 40.0, 60.0);
        let view = compute_filtered_view(&ds, &sel);

        assert_eq!(view.indices(), &[1, 3]);
        for (i, p) in ds.passengers().iter().enumerate() {
            let inside = p.class == sel.class
                && p.age.is_some_and(|a| (40.0..=60.0).contains(&a));
            assert_eq!(view.indices().contains(&i), inside, "row {i}");
        }
    }

    #[test]
    fn bounds_are_inclusive() {
        let ds = sample_dataset();
        let view = compute_filtered_view(&ds, &FilterSelection::new(PassengerClass::First, 38.0, 54.0));
        assert_eq!(view.indices(), &[0, 1]);
    }

    #[test]
    fn missing_age_never_matches() {
        let ds = sample_dataset();
        let view = compute_filtered_view(
            &ds,
            &FilterSelection::new(PassengerClass::First, f64::MIN, f64::MAX),
        );
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|p| p.age.is_some()));
    }

    #[test]
    fn no_match_is_empty_view() {
        let ds = sample_dataset();
        let view = compute_filtered_view(&ds, &FilterSelection::new(PassengerClass::Second, 70.0, 75.0));
        assert!(view.is_empty());
    }

    #[test]
    fn inverted_range_is_swapped() {
        let ds = sample_dataset();
        let inverted = FilterSelection::new(PassengerClass::First, 60.0, 40.0);
        let ordered = FilterSelection::new(PassengerClass::First, 40.0, 60.0);
        assert!(inverted.is_inverted());
        assert_eq!(
            compute_filtered_view(&ds, &inverted).indices(),
            compute_filtered_view(&ds, &ordered).indices()
        );
    }

    #[test]
    fn default_selection_spans_dataset() {
        let ds = sample_dataset();
        let sel = FilterSelection::default_for(&ds);
        assert_eq!(sel, FilterSelection::new(PassengerClass::First, 4.0, 66.0));
    }

    #[test]
    fn default_class_follows_row_order() {
        use crate::data::fixtures::passenger;
        use crate::data::model::Sex;

        let ds = Dataset::from_passengers(vec![
            passenger(PassengerClass::Third, Sex::Male, Some(22.0), 7.25, false),
            passenger(PassengerClass::First, Sex::Female, Some(38.0), 71.2833, true),
            passenger(PassengerClass::Second, Sex::Female, Some(14.0), 30.0708, true),
        ])
        .unwrap();

        assert_eq!(
            ds.classes(),
            &[PassengerClass::Third, PassengerClass::First, PassengerClass::Second]
        );
        assert_eq!(FilterSelection::default_for(&ds).class, PassengerClass::Third);
    }
}
