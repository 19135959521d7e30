use std::fmt;
use std::str::FromStr;

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use super::error::DataError;

// ---------------------------------------------------------------------------
// Categorical columns
// ---------------------------------------------------------------------------

/// Ticket class, as spelled in the `class` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PassengerClass {
    First,
    Second,
    Third,
}

impl PassengerClass {
    pub const ALL: [PassengerClass; 3] = [Self::First, Self::Second, Self::Third];

    pub fn as_str(&self) -> &'static str {
        match self {
            PassengerClass::First => "First",
            PassengerClass::Second => "Second",
            PassengerClass::Third => "Third",
        }
    }
}

impl fmt::Display for PassengerClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PassengerClass {
    type Err = DataError;

    /// Accepts the column spelling (`First`) case-insensitively, or the
    /// numeric `pclass` value (`1`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first" | "1" => Ok(PassengerClass::First),
            "second" | "2" => Ok(PassengerClass::Second),
            "third" | "3" => Ok(PassengerClass::Third),
            _ => Err(DataError::UnknownClass(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub const ALL: [Sex; 2] = [Sex::Male, Sex::Female];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sex {
    type Err = DataError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Sex::Male),
            "female" => Ok(Sex::Female),
            _ => Err(DataError::UnknownSex(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Passenger – one row of the dataset
// ---------------------------------------------------------------------------

/// A single passenger record. Field names follow the seaborn `titanic`
/// column layout; unknown columns (`who`, `alive`, ...) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passenger {
    #[serde(deserialize_with = "deserialize_flag")]
    pub survived: bool,
    pub pclass: u8,
    pub sex: Sex,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub age: Option<f64>,
    #[serde(default)]
    pub sibsp: u32,
    #[serde(default)]
    pub parch: u32,
    pub fare: f64,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub embarked: Option<String>,
    pub class: PassengerClass,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub deck: Option<String>,
    #[serde(default, deserialize_with = "csv::invalid_option")]
    pub embark_town: Option<String>,
    #[serde(default, deserialize_with = "deserialize_flag")]
    pub alone: bool,
}

/// Boolean columns show up as `0/1`, `true/false`, `True/False` or `yes/no`
/// depending on who wrote the file.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    struct FlagVisitor;

    impl Visitor<'_> for FlagVisitor {
        type Value = bool;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a boolean flag (0/1, true/false, yes/no)")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<bool, E> {
            Ok(v)
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
            }
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<bool, E> {
            match v {
                0 => Ok(false),
                1 => Ok(true),
                other => Err(E::invalid_value(de::Unexpected::Signed(other), &self)),
            }
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<bool, E> {
            if v == 0.0 {
                Ok(false)
            } else if v == 1.0 {
                Ok(true)
            } else {
                Err(E::invalid_value(de::Unexpected::Float(v), &self))
            }
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<bool, E> {
            match v.trim().to_ascii_lowercase().as_str() {
                "1" | "1.0" | "true" | "yes" => Ok(true),
                "0" | "0.0" | "false" | "no" => Ok(false),
                _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
            }
        }
    }

    deserializer.deserialize_any(FlagVisitor)
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The immutable passenger table with pre-computed column domains.
///
/// Built once at startup and shared behind an `Arc`; nothing mutates it
/// afterwards.
#[derive(Debug, Clone)]
pub struct Dataset {
    passengers: Vec<Passenger>,
    /// Classes that occur in the data, in order of first appearance.
    classes: Vec<PassengerClass>,
    /// `(min, max)` over all non-missing ages.
    age_range: (f64, f64),
}

impl Dataset {
    /// Build column domains from the loaded rows.
    ///
    /// Fails when there are no rows or no row carries an age.
    pub fn from_passengers(passengers: Vec<Passenger>) -> Result<Self, DataError> {
        if passengers.is_empty() {
            return Err(DataError::Empty);
        }

        let mut classes: Vec<PassengerClass> = Vec::new();
        for p in &passengers {
            if !classes.contains(&p.class) {
                classes.push(p.class);
            }
        }

        let mut ages = passengers.iter().filter_map(|p| p.age).filter(|a| a.is_finite());
        let first = ages.next().ok_or(DataError::NoAges)?;
        let age_range = ages.fold((first, first), |(lo, hi), a| (lo.min(a), hi.max(a)));

        Ok(Dataset {
            passengers,
            classes,
            age_range,
        })
    }

    pub fn passengers(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn get(&self, index: usize) -> Option<&Passenger> {
        self.passengers.get(index)
    }

    /// Distinct classes in row order of first appearance.
    pub fn classes(&self) -> &[PassengerClass] {
        &self.classes
    }

    /// Observed `(min, max)` age over rows with a known age.
    pub fn age_range(&self) -> (f64, f64) {
        self.age_range
    }

    /// Number of passengers.
    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::passenger;

    #[test]
    fn domains_ignore_missing_ages() {
        let ds = Dataset::from_passengers(vec![
            passenger(PassengerClass::Third, Sex::Male, Some(22.0), 7.25, false),
            passenger(PassengerClass::First, Sex::Female, None, 71.28, true),
            passenger(PassengerClass::Third, Sex::Female, Some(4.0), 16.7, true),
        ])
        .unwrap();

        assert_eq!(ds.age_range(), (4.0, 22.0));
        assert_eq!(
            ds.classes(),
            &[PassengerClass::Third, PassengerClass::First]
        );
    }

    #[test]
    fn rejects_empty_and_ageless_tables() {
        assert!(matches!(Dataset::from_passengers(vec![]), Err(DataError::Empty)));
        let ageless = vec![passenger(PassengerClass::Second, Sex::Male, None, 13.0, false)];
        assert!(matches!(Dataset::from_passengers(ageless), Err(DataError::NoAges)));
    }

    #[test]
    fn class_parses_names_and_numbers() {
        assert_eq!("first".parse::<PassengerClass>().unwrap(), PassengerClass::First);
        assert_eq!("3".parse::<PassengerClass>().unwrap(), PassengerClass::Third);
        assert!(matches!(
            "steerage".parse::<PassengerClass>(),
            Err(DataError::UnknownClass(_))
        ));
    }
}
