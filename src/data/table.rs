use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, BooleanArray, Float64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;

use super::filter::FilteredView;

// ---------------------------------------------------------------------------
// Filtered view as an Arrow table (terminal output)
// ---------------------------------------------------------------------------

/// Columns shown for each passenger in tables.
pub const TABLE_COLUMNS: [&str; 8] = [
    "class", "sex", "age", "fare", "survived", "sibsp", "parch", "embark_town",
];

/// Build a record batch holding the view's rows in dataset order.
pub fn view_to_record_batch(view: &FilteredView<'_>) -> Result<RecordBatch> {
    let rows: Vec<_> = view.iter().collect();

    let class = StringArray::from_iter_values(rows.iter().map(|p| p.class.as_str()));
    let sex = StringArray::from_iter_values(rows.iter().map(|p| p.sex.as_str()));
    let age: Float64Array = rows.iter().map(|p| p.age).collect();
    let fare = Float64Array::from_iter_values(rows.iter().map(|p| p.fare));
    let survived: BooleanArray = rows.iter().map(|p| Some(p.survived)).collect();
    let sibsp = UInt32Array::from_iter_values(rows.iter().map(|p| p.sibsp));
    let parch = UInt32Array::from_iter_values(rows.iter().map(|p| p.parch));
    let embark_town: StringArray = rows.iter().map(|p| p.embark_town.as_deref()).collect();

    let schema = Arc::new(Schema::new(vec![
        Field::new(TABLE_COLUMNS[0], DataType::Utf8, false),
        Field::new(TABLE_COLUMNS[1], DataType::Utf8, false),
        Field::new(TABLE_COLUMNS[2], DataType::Float64, true),
        Field::new(TABLE_COLUMNS[3], DataType::Float64, false),
        Field::new(TABLE_COLUMNS[4], DataType::Boolean, false),
        Field::new(TABLE_COLUMNS[5], DataType::UInt32, false),
        Field::new(TABLE_COLUMNS[6], DataType::UInt32, false),
        Field::new(TABLE_COLUMNS[7], DataType::Utf8, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(class),
        Arc::new(sex),
        Arc::new(age),
        Arc::new(fare),
        Arc::new(survived),
        Arc::new(sibsp),
        Arc::new(parch),
        Arc::new(embark_town),
    ];

    RecordBatch::try_new(schema, columns).context("building passenger table")
}

/// Render the view as a boxed text table.
pub fn format_view(view: &FilteredView<'_>) -> Result<String> {
    let batch = view_to_record_batch(view)?;
    let table = pretty_format_batches(&[batch]).context("formatting passenger table")?;
    Ok(table.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filter::{compute_filtered_view, FilterSelection};
    use crate::data::fixtures::sample_dataset;
    use crate::data::model::PassengerClass;

    #[test]
    fn batch_matches_view() {
        let ds = sample_dataset();
        let view = compute_filtered_view(&ds, &FilterSelection::new(PassengerClass::Third, 0.0, 30.0));
        let batch = view_to_record_batch(&view).unwrap();

        assert_eq!(batch.num_rows(), 2);
        assert_eq!(batch.num_columns(), TABLE_COLUMNS.len());
        let text = format_view(&view).unwrap();
        assert!(text.contains("Third"));
        assert!(text.contains("embark_town"));
    }

    #[test]
    fn empty_view_still_has_header() {
        let ds = sample_dataset();
        let view = compute_filtered_view(&ds, &FilterSelection::new(PassengerClass::Second, 70.0, 75.0));
        let batch = view_to_record_batch(&view).unwrap();
        assert_eq!(batch.num_rows(), 0);
    }
}
