//! Selection Dispatcher
//! Pure mapping from (selection key, loaded workbook) to a render payload.
//! Every resolution builds a fresh payload; nothing is cached or mutated.

use polars::prelude::*;
use thiserror::Error;

use super::payload::{ChartKind, ChartSeries, ChartSpec, ImageRef, RenderPayload, ValueFormat};
use super::selection::SelectionKey;
use crate::data::{schema, Workbook};

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("sheet '{0}' is not loaded")]
    MissingSheet(String),
    #[error("column '{column}' has a missing value at row {row}")]
    MissingValue { column: String, row: usize },
    #[error("column '{column}' holds non-integer value {value}")]
    NotAnInteger { column: String, value: f64 },
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Resolve a selection key against the workbook.
///
/// Chart keys project the sheet's registered columns: the first column
/// becomes the category labels, each remaining column one series. Image keys
/// come from a fixed lookup and never touch the workbook.
pub fn resolve(key: SelectionKey, workbook: &Workbook) -> Result<RenderPayload, ResolveError> {
    match key {
        SelectionKey::Graph1 => grouped_bar(
            workbook,
            schema::POSTGRAD_ENROLMENT,
            1.0,
            ValueFormat::Count,
            "Postgraduate Enrolment - Actual Student Numbers (2020-2023)",
            "Subjects",
            "Number of Students",
        ),
        SelectionKey::Graph2 => grouped_bar(
            workbook,
            schema::FAS_POSTGRAD_ENROLMENT,
            // Source sheet stores fractions; display as percentages.
            100.0,
            ValueFormat::Percent,
            "FAS Postgraduate Enrolment (2020-2023)",
            "Category",
            "Enrolment (%)",
        ),
        SelectionKey::Graph3 => grouped_bar(
            workbook,
            schema::ENROLMENT_BY_LEVEL,
            1.0,
            ValueFormat::Count,
            "2023 Student Enrolment by Level",
            "Programs",
            "Number of Students",
        ),
        SelectionKey::Graph4 => graduation_line(workbook),
        SelectionKey::Image1 => Ok(image("/assets/1.png", "Postgraduate Enrolment 2024")),
        SelectionKey::Image2 => Ok(image("/assets/2.png", "Current Postdoctoral Fellows")),
        SelectionKey::Image3 => Ok(image("/assets/3.png", "Emeritus/Honorary/Adjunct Professors")),
        SelectionKey::Image4 => Ok(image("/assets/4.png", "Departmental Research Outputs 2023")),
    }
}

fn image(path: &str, caption: &str) -> RenderPayload {
    RenderPayload::Image(ImageRef {
        path: path.to_string(),
        caption: caption.to_string(),
    })
}

fn sheet_frame<'a>(workbook: &'a Workbook, sheet: &str) -> Result<&'a DataFrame, ResolveError> {
    workbook
        .sheet(sheet)
        .ok_or_else(|| ResolveError::MissingSheet(sheet.to_string()))
}

/// Build a grouped bar chart from a sheet's registered columns, scaling
/// every value by `scale`.
fn grouped_bar(
    workbook: &Workbook,
    sheet: &str,
    scale: f64,
    value_format: ValueFormat,
    title: &str,
    x_label: &str,
    y_label: &str,
) -> Result<RenderPayload, ResolveError> {
    let df = sheet_frame(workbook, sheet)?;
    let (label_col, value_cols) = schema::columns_of(sheet)
        .split_first()
        .ok_or_else(|| ResolveError::MissingSheet(sheet.to_string()))?;

    let categories = label_column(df, label_col)?;
    let mut series = Vec::with_capacity(value_cols.len());
    for column in value_cols {
        let values = numeric_column(df, column)?
            .into_iter()
            .map(|v| v * scale)
            .collect();
        series.push(ChartSeries {
            name: column.to_string(),
            values,
        });
    }

    Ok(RenderPayload::Chart(ChartSpec {
        kind: ChartKind::GroupedBar,
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        categories,
        series,
        value_format,
    }))
}

/// Graduation rate over the years: a line chart with integer-coerced years
/// as x-axis categories and the rate as the single series.
fn graduation_line(workbook: &Workbook) -> Result<RenderPayload, ResolveError> {
    let df = sheet_frame(workbook, schema::GRADUATION_RATE)?;
    let (year_col, rate_cols) = schema::columns_of(schema::GRADUATION_RATE)
        .split_first()
        .ok_or_else(|| ResolveError::MissingSheet(schema::GRADUATION_RATE.to_string()))?;
    let rate_col = rate_cols
        .first()
        .ok_or_else(|| ResolveError::MissingSheet(schema::GRADUATION_RATE.to_string()))?;

    let years = integer_column(df, year_col)?;
    let rates = numeric_column(df, rate_col)?;

    Ok(RenderPayload::Chart(ChartSpec {
        kind: ChartKind::Line,
        title: "Postgraduate Graduation Rate (2015-2023)".to_string(),
        x_label: "Year".to_string(),
        y_label: "Graduation Rate (%)".to_string(),
        categories: years.iter().map(|y| y.to_string()).collect(),
        series: vec![ChartSeries {
            name: rate_col.to_string(),
            values: rates,
        }],
        value_format: ValueFormat::Percent,
    }))
}

/// Read a column as display labels.
fn label_column(df: &DataFrame, column: &str) -> Result<Vec<String>, ResolveError> {
    let col = df.column(column)?;
    let mut labels = Vec::with_capacity(df.height());
    for row in 0..df.height() {
        let value = col.get(row)?;
        if value.is_null() {
            return Err(ResolveError::MissingValue {
                column: column.to_string(),
                row,
            });
        }
        labels.push(value.to_string().trim_matches('"').to_string());
    }
    Ok(labels)
}

/// Read a column as f64, failing on missing or non-numeric cells.
fn numeric_column(df: &DataFrame, column: &str) -> Result<Vec<f64>, ResolveError> {
    let cast = df.column(column)?.cast(&DataType::Float64)?;
    let ca = cast.f64()?;
    let mut out = Vec::with_capacity(ca.len());
    for row in 0..ca.len() {
        match ca.get(row) {
            Some(v) if !v.is_nan() => out.push(v),
            _ => {
                return Err(ResolveError::MissingValue {
                    column: column.to_string(),
                    row,
                })
            }
        }
    }
    Ok(out)
}

/// Read a column as i64, failing on fractional values.
fn integer_column(df: &DataFrame, column: &str) -> Result<Vec<i64>, ResolveError> {
    numeric_column(df, column)?
        .into_iter()
        .map(|v| {
            if v.fract() == 0.0 {
                Ok(v as i64)
            } else {
                Err(ResolveError::NotAnInteger {
                    column: column.to_string(),
                    value: v,
                })
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sample_sheets() -> BTreeMap<String, DataFrame> {
        let mut sheets = BTreeMap::new();
        sheets.insert(
            schema::POSTGRAD_ENROLMENT.to_string(),
            df!(
                "Postgraduate Enrolment" => &["Science"],
                "2020" => &[10i64],
                "2021" => &[12i64],
                "2022" => &[15i64],
                "2023" => &[20i64],
            )
            .unwrap(),
        );
        sheets.insert(
            schema::FAS_POSTGRAD_ENROLMENT.to_string(),
            df!(
                "FAS Postgraduate Enrolment" => &["Masters", "Doctoral"],
                "2020" => &[0.25, 0.10],
                "2021" => &[0.30, 0.12],
                "2022" => &[0.40, 0.15],
                "2023" => &[0.50, 0.20],
            )
            .unwrap(),
        );
        sheets.insert(
            schema::ENROLMENT_BY_LEVEL.to_string(),
            df!(
                "2023 Student Enrolment by Level" => &["Engineering", "Humanities"],
                "UG (NQF 5-7)" => &[900i64, 700i64],
                "PG upto Masters (NQF8)" => &[120i64, 90i64],
                "PG (NQF9-10)" => &[45i64, 30i64],
            )
            .unwrap(),
        );
        sheets.insert(
            schema::GRADUATION_RATE.to_string(),
            df!(
                "Year" => &[2015i64, 2016i64, 2017i64],
                "Graduation Rate" => &[61i64, 64i64, 66i64],
            )
            .unwrap(),
        );
        sheets
    }

    fn sample_workbook() -> Workbook {
        Workbook::from_sheets("data", sample_sheets()).unwrap()
    }

    #[test]
    fn every_key_resolves_to_expected_kind() {
        let workbook = sample_workbook();
        for key in SelectionKey::ALL {
            let payload = resolve(key, &workbook).unwrap();
            match payload {
                RenderPayload::Chart(spec) => {
                    assert!(!key.is_image(), "{key} resolved to a chart");
                    assert!(!spec.series.is_empty());
                    assert!(!spec.categories.is_empty());
                }
                RenderPayload::Image(image) => {
                    assert!(key.is_image(), "{key} resolved to an image");
                    assert!(!image.path.is_empty());
                    assert!(!image.caption.is_empty());
                }
            }
        }
    }

    #[test]
    fn graph1_projects_columns_in_order() {
        let payload = resolve(SelectionKey::Graph1, &sample_workbook()).unwrap();
        let RenderPayload::Chart(spec) = payload else {
            panic!("expected a chart");
        };

        assert_eq!(spec.kind, ChartKind::GroupedBar);
        assert_eq!(spec.categories, vec!["Science"]);
        let names: Vec<&str> = spec.series.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["2020", "2021", "2022", "2023"]);
        let values: Vec<f64> = spec.series.iter().map(|s| s.values[0]).collect();
        assert_eq!(values, vec![10.0, 12.0, 15.0, 20.0]);
    }

    #[test]
    fn graph2_scales_fractions_to_percent() {
        let payload = resolve(SelectionKey::Graph2, &sample_workbook()).unwrap();
        let RenderPayload::Chart(spec) = payload else {
            panic!("expected a chart");
        };

        assert_eq!(spec.value_format, ValueFormat::Percent);
        assert_eq!(spec.series[0].values, vec![25.0, 10.0]);
        assert_eq!(spec.format_value(spec.series[0].values[0]), "25%");
    }

    #[test]
    fn graph4_is_line_over_integer_years() {
        let payload = resolve(SelectionKey::Graph4, &sample_workbook()).unwrap();
        let RenderPayload::Chart(spec) = payload else {
            panic!("expected a chart");
        };

        assert_eq!(spec.kind, ChartKind::Line);
        assert_eq!(spec.categories, vec!["2015", "2016", "2017"]);
        assert_eq!(spec.series.len(), 1);
        assert_eq!(spec.series[0].values, vec![61.0, 64.0, 66.0]);
    }

    #[test]
    fn graph4_fractional_year_is_fatal() {
        let mut sheets = sample_sheets();
        sheets.insert(
            schema::GRADUATION_RATE.to_string(),
            df!(
                "Year" => &[2015.5],
                "Graduation Rate" => &[61i64],
            )
            .unwrap(),
        );
        let workbook = Workbook::from_sheets("data", sheets).unwrap();

        let err = resolve(SelectionKey::Graph4, &workbook).unwrap_err();
        match err {
            ResolveError::NotAnInteger { column, value } => {
                assert_eq!(column, "Year");
                assert_eq!(value, 2015.5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn image1_is_a_fixed_lookup() {
        let payload = resolve(SelectionKey::Image1, &sample_workbook()).unwrap();
        assert_eq!(
            payload,
            RenderPayload::Image(ImageRef {
                path: "/assets/1.png".to_string(),
                caption: "Postgraduate Enrolment 2024".to_string(),
            })
        );
    }

    #[test]
    fn resolve_is_idempotent() {
        let workbook = sample_workbook();
        for key in SelectionKey::ALL {
            let first = resolve(key, &workbook).unwrap();
            let second = resolve(key, &workbook).unwrap();
            assert_eq!(first, second);
        }
    }
}
