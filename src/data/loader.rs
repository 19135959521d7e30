use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type, Int64Type};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use super::error::DataError;
use super::model::{Dataset, Passenger, PassengerClass, Sex};
use crate::config::BUNDLED_DATASET;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Parse the passenger table compiled into the binary.
pub fn load_bundled() -> Result<Dataset> {
    load_csv_reader(BUNDLED_DATASET.as_bytes()).context("parsing bundled dataset")
}

/// Load a passenger dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with seaborn `titanic` column names
/// * `.json`    – `[{ "survived": 0, "class": "Third", "age": 22.0, ... }, ...]`
/// * `.parquet` – one row per passenger, columns named as in the CSV
pub fn load_file(path: &Path) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading {}", path.display()))?;

    log::info!(
        "Loaded {} passengers from {} (ages {:?})",
        dataset.len(),
        path.display(),
        dataset.age_range()
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    load_csv_reader(file)
}

/// Deserialize passenger rows from any CSV source with a header row.
/// Empty cells in optional columns become missing values.
pub fn load_csv_reader<R: Read>(source: R) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(source);
    let mut passengers = Vec::new();

    for (row_no, result) in reader.deserialize::<Passenger>().enumerate() {
        let passenger = result.with_context(|| format!("CSV row {row_no}"))?;
        passengers.push(passenger);
    }

    Ok(Dataset::from_passengers(passengers)?)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "survived": 0, "pclass": 3, "sex": "male", "age": 22.0,
///     "fare": 7.25, "class": "Third", "deck": null, ... },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let passengers: Vec<Passenger> = serde_json::from_str(&text).context("parsing JSON")?;
    Ok(Dataset::from_passengers(passengers)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file written by **Pandas** (`df.to_parquet()`) or
/// **Polars** (`df.write_parquet()`).
///
/// Columns are looked up by name and cast to the expected type, so integer
/// flags, dictionary-encoded categoricals and float-encoded integers all read.
fn load_parquet(path: &Path) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut passengers = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let offset = passengers.len();
        passengers.extend(passengers_from_batch(&batch, offset)?);
    }

    Ok(Dataset::from_passengers(passengers)?)
}

/// Convert one record batch into passengers. `offset` is only used to
/// number rows in error messages.
pub fn passengers_from_batch(batch: &RecordBatch, offset: usize) -> Result<Vec<Passenger>> {
    let survived = required(batch, "survived", &DataType::Boolean)?;
    let pclass = required(batch, "pclass", &DataType::Int64)?;
    let sex = required(batch, "sex", &DataType::Utf8)?;
    let age = required(batch, "age", &DataType::Float64)?;
    let fare = required(batch, "fare", &DataType::Float64)?;
    let class = required(batch, "class", &DataType::Utf8)?;
    let sibsp = optional(batch, "sibsp", &DataType::Int64)?;
    let parch = optional(batch, "parch", &DataType::Int64)?;
    let embarked = optional(batch, "embarked", &DataType::Utf8)?;
    let deck = optional(batch, "deck", &DataType::Utf8)?;
    let embark_town = optional(batch, "embark_town", &DataType::Utf8)?;
    let alone = optional(batch, "alone", &DataType::Boolean)?;

    let survived = survived.as_boolean();
    let pclass = pclass.as_primitive::<Int64Type>();
    let sex = sex.as_string::<i32>();
    let age = age.as_primitive::<Float64Type>();
    let fare = fare.as_primitive::<Float64Type>();
    let class = class.as_string::<i32>();

    let mut out = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let row_no = offset + row;
        let null = |column: &str| DataError::NullValue {
            row: row_no,
            column: column.to_string(),
        };

        if survived.is_null(row) {
            return Err(null("survived").into());
        }
        if pclass.is_null(row) {
            return Err(null("pclass").into());
        }
        if sex.is_null(row) {
            return Err(null("sex").into());
        }
        if fare.is_null(row) {
            return Err(null("fare").into());
        }
        if class.is_null(row) {
            return Err(null("class").into());
        }

        let count = |col: &Option<ArrayRef>| {
            col.as_ref()
                .map(|c| c.as_primitive::<Int64Type>())
                .filter(|c| !c.is_null(row))
                .map(|c| c.value(row).max(0) as u32)
                .unwrap_or(0)
        };
        let text = |col: &Option<ArrayRef>| {
            col.as_ref()
                .map(|c| c.as_string::<i32>())
                .filter(|c| !c.is_null(row))
                .map(|c| c.value(row).to_string())
                .filter(|s| !s.is_empty())
        };

        out.push(Passenger {
            survived: survived.value(row),
            pclass: u8::try_from(pclass.value(row))
                .with_context(|| format!("Row {row_no}: pclass out of range"))?,
            sex: sex.value(row).parse::<Sex>()?,
            age: if age.is_null(row) || age.value(row).is_nan() {
                None
            } else {
                Some(age.value(row))
            },
            sibsp: count(&sibsp),
            parch: count(&parch),
            fare: fare.value(row),
            embarked: text(&embarked),
            class: class.value(row).parse::<PassengerClass>()?,
            deck: text(&deck),
            embark_town: text(&embark_town),
            alone: alone
                .as_ref()
                .map(|c| c.as_boolean())
                .filter(|c| !c.is_null(row))
                .is_some_and(|c| c.value(row)),
        });
    }
    Ok(out)
}

// -- Arrow helpers --

fn required(batch: &RecordBatch, name: &str, to: &DataType) -> Result<ArrayRef> {
    optional(batch, name, to)?.ok_or_else(|| {
        DataError::MissingColumn {
            column: name.to_string(),
        }
        .into()
    })
}

/// Look up a column and cast it to `to`. `None` when the column is absent.
fn optional(batch: &RecordBatch, name: &str, to: &DataType) -> Result<Option<ArrayRef>> {
    let Some(col) = batch.column_by_name(name) else {
        return Ok(None);
    };
    let cast_col = cast(col.as_ref(), to).map_err(|_| DataError::UnsupportedColumnType {
        column: name.to_string(),
        data_type: format!("{:?}", col.data_type()),
    })?;
    Ok(Some(cast_col))
}
