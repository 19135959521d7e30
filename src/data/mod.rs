/// Data layer: passenger records, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  bundled .csv / .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset (once, at startup)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ Dataset   │  Vec<Passenger>, class + age domains
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → FilteredView (row indices)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ summary   │  count, mean fare, survival rate, histogram, breakdown
///   └──────────┘
/// ```

pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod summary;
pub mod table;

pub use error::DataError;
pub use filter::{compute_filtered_view, FilterSelection, FilteredView};
pub use model::{Dataset, Passenger, PassengerClass, Sex};
pub use summary::{DashboardSummary, Metric};

#[cfg(test)]
pub(crate) mod fixtures {
    use super::model::{Dataset, Passenger, PassengerClass, Sex};

    pub(crate) fn passenger(
        class: PassengerClass,
        sex: Sex,
        age: Option<f64>,
        fare: f64,
        survived: bool,
    ) -> Passenger {
        Passenger {
            survived,
            pclass: match class {
                PassengerClass::First => 1,
                PassengerClass::Second => 2,
                PassengerClass::Third => 3,
            },
            sex,
            age,
            sibsp: 0,
            parch: 0,
            fare,
            embarked: None,
            class,
            deck: None,
            embark_town: None,
            alone: true,
        }
    }

    /// Small hand-checked table: four first-class rows (one without age),
    /// two second-class rows, two third-class rows.
    pub(crate) fn sample_dataset() -> Dataset {
        use PassengerClass::*;
        use Sex::*;
        Dataset::from_passengers(vec![
            passenger(First, Female, Some(38.0), 71.2833, true),
            passenger(First, Male, Some(54.0), 51.8625, false),
            passenger(First, Male, None, 27.7208, false),
            passenger(First, Female, Some(58.0), 26.55, true),
            passenger(Second, Female, Some(14.0), 30.0708, true),
            passenger(Second, Male, Some(66.0), 10.5, false),
            passenger(Third, Male, Some(22.0), 7.25, false),
            passenger(Third, Female, Some(4.0), 16.7, true),
        ])
        .expect("fixture is valid")
    }
}
