//! Workbook Schema Registry
//! Fixed set of sheets the dashboard reads, with their required columns.

/// Sheet name constants, also the CSV file stems inside the workbook directory.
pub const POSTGRAD_ENROLMENT: &str = "postgrad_enrolment";
pub const FAS_POSTGRAD_ENROLMENT: &str = "fas_postgrad_enrolment";
pub const ENROLMENT_BY_LEVEL: &str = "enrolment_by_level";
pub const GRADUATION_RATE: &str = "graduation_rate";

/// Schema of a single sheet: its name and the columns that must be present.
#[derive(Debug, Clone, Copy)]
pub struct SheetSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

/// All sheets the loader expects. A workbook missing any of these sheets or
/// columns fails to load.
/// Registered columns of a sheet; empty for names outside the registry.
/// The first column holds category labels, the rest numeric values.
pub fn columns_of(name: &str) -> &'static [&'static str] {
    SHEETS
        .iter()
        .find(|schema| schema.name == name)
        .map(|schema| schema.columns)
        .unwrap_or(&[])
}

pub const SHEETS: [SheetSchema; 4] = [
    SheetSchema {
        name: POSTGRAD_ENROLMENT,
        columns: &["Postgraduate Enrolment", "2020", "2021", "2022", "2023"],
    },
    SheetSchema {
        name: FAS_POSTGRAD_ENROLMENT,
        columns: &["FAS Postgraduate Enrolment", "2020", "2021", "2022", "2023"],
    },
    SheetSchema {
        name: ENROLMENT_BY_LEVEL,
        columns: &[
            "2023 Student Enrolment by Level",
            "UG (NQF 5-7)",
            "PG upto Masters (NQF8)",
            "PG (NQF9-10)",
        ],
    },
    SheetSchema {
        name: GRADUATION_RATE,
        columns: &["Year", "Graduation Rate"],
    },
];
