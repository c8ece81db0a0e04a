//! CSV Data Loader Module
//! Loads the injury report CSV into an immutable Polars table.

use crate::data::schema::EXPECTED_COLUMNS;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Dataset file not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV {path}: {source}")]
    CsvError {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// First rows of the table rendered as display strings.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePreview {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// The loaded injury table. Never mutated after loading.
#[derive(Debug, Clone)]
pub struct Dataset {
    df: DataFrame,
    source: Option<PathBuf>,
}

impl Dataset {
    /// Wrap an already materialized DataFrame.
    pub fn from_frame(df: DataFrame) -> Self {
        Self { df, source: None }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn row_count(&self) -> usize {
        self.df.height()
    }

    /// Get list of column names.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Expected columns that the file did not provide.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        let present = self.columns();
        EXPECTED_COLUMNS
            .iter()
            .copied()
            .filter(|name| !present.iter().any(|p| p == name))
            .collect()
    }

    /// Render the first `max_rows` rows as strings; nulls become empty cells.
    pub fn preview(&self, max_rows: usize) -> TablePreview {
        let head = self.df.head(Some(max_rows));
        let rows = (0..head.height())
            .map(|i| {
                head.get_columns()
                    .iter()
                    .map(|col| match col.get(i) {
                        Ok(AnyValue::Null) | Err(_) => String::new(),
                        Ok(AnyValue::String(s)) => s.to_string(),
                        Ok(value) => value.to_string().trim_matches('"').to_string(),
                    })
                    .collect()
            })
            .collect();

        TablePreview {
            headers: self.columns(),
            rows,
        }
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file with a header row, reading at most `max_rows` rows.
    ///
    /// Malformed rows fail the whole load; there is no partial result.
    pub fn load_csv(path: impl AsRef<Path>, max_rows: Option<usize>) -> Result<Dataset, LoaderError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .with_n_rows(max_rows)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoaderError::CsvError {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Dataset {
            df,
            source: Some(path.to_path_buf()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::schema::*;
    use std::io::Write;

    const HEADER: &str = "sectors_code,subsectors_code,establishment_type,state,annual_average_employees,total_hours_worked,total_deaths,total_dafw_cases,total_djtr_cases,total_other_cases,total_cases,description";

    fn write_csv(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        write!(file, "{body}").unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_all_rows() {
        let file = write_csv(
            "11,111,1,CA,10,20000,0,5,1,0,6,Agriculture\n\
             23,236,1,NY,5,9000,0,2,1,1,4,Construction\n\
             31,311,2,TX,8,15000,1,0,1,0,2,Manufacturing\n",
        );

        let dataset = DataLoader::load_csv(file.path(), None).unwrap();
        assert_eq!(dataset.row_count(), 3);
        assert!(dataset.missing_columns().is_empty());
        assert_eq!(dataset.source(), Some(file.path()));
    }

    #[test]
    fn caps_row_count() {
        let file = write_csv(
            "11,111,1,CA,10,20000,0,5,1,0,6,Agriculture\n\
             23,236,1,NY,5,9000,0,2,1,1,4,Construction\n\
             31,311,2,TX,8,15000,1,0,1,0,2,Manufacturing\n",
        );

        let dataset = DataLoader::load_csv(file.path(), Some(2)).unwrap();
        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = DataLoader::load_csv("does/not/exist.csv", None).unwrap_err();
        assert!(matches!(err, LoaderError::NotFound(_)));
    }

    #[test]
    fn malformed_csv_is_an_error() {
        let file = write_csv(
            "11,111,1,CA,10,20000,0,5,1,0,6,Agriculture\n\
             23,236,1,NY,5,9000,0,2,1,1,4,Construction,99,extra\n",
        );

        let err = DataLoader::load_csv(file.path(), None).unwrap_err();
        assert!(matches!(err, LoaderError::CsvError { .. }));
    }

    #[test]
    fn reports_missing_columns() {
        let df = df!(
            STATE => ["CA"],
            TOTAL_DAFW_CASES => [1i64],
        )
        .unwrap();

        let missing = Dataset::from_frame(df).missing_columns();
        assert_eq!(missing.len(), EXPECTED_COLUMNS.len() - 2);
        assert!(missing.contains(&DESCRIPTION));
        assert!(!missing.contains(&STATE));
    }

    #[test]
    fn preview_renders_plain_strings() {
        let df = df!(
            STATE => [Some("CA"), None, Some("NY")],
            TOTAL_DAFW_CASES => [5i64, 3, 2],
        )
        .unwrap();

        let preview = Dataset::from_frame(df).preview(2);
        assert_eq!(preview.headers, vec![STATE.to_string(), TOTAL_DAFW_CASES.to_string()]);
        assert_eq!(
            preview.rows,
            vec![
                vec!["CA".to_string(), "5".to_string()],
                vec![String::new(), "3".to_string()],
            ]
        );
    }
}
