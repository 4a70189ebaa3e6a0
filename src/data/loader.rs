//! Workbook Loader Module
//! Loads the fixed set of enrolment sheets from a workbook directory
//! (one CSV file per sheet) using Polars.

use polars::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::schema::SHEETS;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("workbook directory not found: {0}")]
    MissingWorkbook(PathBuf),
    #[error("sheet file missing: {0}")]
    MissingSheetFile(PathBuf),
    #[error("sheet '{0}' is not present in the workbook")]
    MissingSheet(String),
    #[error("sheet '{sheet}' is missing column '{column}'")]
    MissingColumn { sheet: String, column: String },
    #[error("failed to read sheet '{sheet}': {source}")]
    Sheet {
        sheet: String,
        #[source]
        source: PolarsError,
    },
}

/// The loaded workbook: one DataFrame per sheet, plus the directory it came
/// from (static image assets are resolved relative to it). Built once at
/// startup and read-only afterwards.
#[derive(Debug)]
pub struct Workbook {
    dir: PathBuf,
    sheets: BTreeMap<String, DataFrame>,
}

impl Workbook {
    /// Load every sheet in the registry from `<dir>/<sheet>.csv`.
    pub fn load(dir: impl Into<PathBuf>) -> Result<Self, LoadError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(LoadError::MissingWorkbook(dir));
        }

        let mut sheets = BTreeMap::new();
        for schema in &SHEETS {
            let path = dir.join(format!("{}.csv", schema.name));
            if !path.is_file() {
                return Err(LoadError::MissingSheetFile(path));
            }

            let path_str = path.to_string_lossy().to_string();
            let df = LazyCsvReader::new(&path_str)
                .with_infer_schema_length(Some(10000))
                .finish()
                .and_then(|lazy| lazy.collect())
                .map_err(|source| LoadError::Sheet {
                    sheet: schema.name.to_string(),
                    source,
                })?;

            log::debug!("loaded sheet '{}' ({} rows)", schema.name, df.height());
            sheets.insert(schema.name.to_string(), df);
        }

        Self::from_sheets(dir, sheets)
    }

    /// Build a workbook from pre-constructed frames, applying the same column
    /// validation as [`Workbook::load`]. This is the constructor the selection
    /// dispatcher is tested against.
    pub fn from_sheets(
        dir: impl Into<PathBuf>,
        sheets: BTreeMap<String, DataFrame>,
    ) -> Result<Self, LoadError> {
        for schema in &SHEETS {
            let df = sheets
                .get(schema.name)
                .ok_or_else(|| LoadError::MissingSheet(schema.name.to_string()))?;

            for column in schema.columns {
                if df.column(column).is_err() {
                    return Err(LoadError::MissingColumn {
                        sheet: schema.name.to_string(),
                        column: column.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            dir: dir.into(),
            sheets,
        })
    }

    /// Get a sheet by name.
    pub fn sheet(&self, name: &str) -> Option<&DataFrame> {
        self.sheets.get(name)
    }

    /// Number of loaded sheets.
    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    /// Directory the workbook was loaded from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_sheet(dir: &Path, name: &str, contents: &str) {
        fs::write(dir.join(format!("{name}.csv")), contents).unwrap();
    }

    fn write_full_workbook(dir: &Path) {
        write_sheet(
            dir,
            "postgrad_enrolment",
            "Postgraduate Enrolment,2020,2021,2022,2023\nScience,10,12,15,20\n",
        );
        write_sheet(
            dir,
            "fas_postgrad_enrolment",
            "FAS Postgraduate Enrolment,2020,2021,2022,2023\nMasters,0.25,0.30,0.40,0.50\n",
        );
        write_sheet(
            dir,
            "enrolment_by_level",
            "2023 Student Enrolment by Level,UG (NQF 5-7),PG upto Masters (NQF8),PG (NQF9-10)\nEngineering,900,120,45\n",
        );
        write_sheet(
            dir,
            "graduation_rate",
            "Year,Graduation Rate\n2015,61\n2016,64\n",
        );
    }

    #[test]
    fn load_complete_workbook() {
        let tmp = tempfile::tempdir().unwrap();
        write_full_workbook(tmp.path());

        let workbook = Workbook::load(tmp.path()).unwrap();
        assert_eq!(workbook.sheet_count(), 4);
        assert_eq!(workbook.sheet("graduation_rate").unwrap().height(), 2);
        assert_eq!(workbook.dir(), tmp.path());
    }

    #[test]
    fn missing_directory_fails() {
        let err = Workbook::load("/nonexistent/workbook").unwrap_err();
        assert!(matches!(err, LoadError::MissingWorkbook(_)));
    }

    #[test]
    fn missing_sheet_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        write_full_workbook(tmp.path());
        fs::remove_file(tmp.path().join("graduation_rate.csv")).unwrap();

        let err = Workbook::load(tmp.path()).unwrap_err();
        match err {
            LoadError::MissingSheetFile(path) => {
                assert!(path.ends_with("graduation_rate.csv"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_column_fails() {
        let tmp = tempfile::tempdir().unwrap();
        write_full_workbook(tmp.path());
        // Rewrite the first sheet without its 2023 column.
        write_sheet(
            tmp.path(),
            "postgrad_enrolment",
            "Postgraduate Enrolment,2020,2021,2022\nScience,10,12,15\n",
        );

        let err = Workbook::load(tmp.path()).unwrap_err();
        match err {
            LoadError::MissingColumn { sheet, column } => {
                assert_eq!(sheet, "postgrad_enrolment");
                assert_eq!(column, "2023");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
