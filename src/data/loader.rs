//! CSV Data Loader Module
//! Reads the film CSV with Polars and validates each row into a `Record`.

use crate::data::record::{AwardStatus, Record};
use polars::prelude::*;
use rayon::prelude::*;
use serde::Serialize;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Columns every film CSV must carry.
pub const REQUIRED_COLUMNS: [&str; 5] = ["Year", "Length", "Popularity", "Subject", "Awards"];

/// Optional column, only used for tooltips.
pub const TITLE_COLUMN: &str = "Title";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// Why a row was left out of the dataset.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum RejectReason {
    #[error("{0} is empty")]
    MissingField(&'static str),
    #[error("{field} is not a valid number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
    #[error("{field} is not a whole number: {value:?}")]
    NotAnInteger { field: &'static str, value: String },
}

/// A row that failed validation. `row` is 1-based and excludes the header.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectedRow {
    pub row: usize,
    pub reason: RejectReason,
}

/// Outcome of a load: parsed records plus the rows that were rejected.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoadReport {
    pub records: Vec<Record>,
    pub rejected: Vec<RejectedRow>,
}

impl LoadReport {
    /// Number of data rows seen, valid or not.
    pub fn total_rows(&self) -> usize {
        self.records.len() + self.rejected.len()
    }
}

/// Borrowed text cells of one CSV row.
struct RawRow<'a> {
    year: Option<&'a str>,
    length: Option<&'a str>,
    popularity: Option<&'a str>,
    subject: Option<&'a str>,
    awards: Option<&'a str>,
    title: Option<&'a str>,
}

impl RawRow<'_> {
    fn parse(&self) -> Result<Record, RejectReason> {
        let year = parse_year(self.year)?;
        let length = parse_number("Length", self.length)?;
        let popularity = parse_number("Popularity", self.popularity)?;
        let subject = required("Subject", self.subject)?;

        Ok(Record {
            year,
            length,
            popularity,
            subject: subject.to_string(),
            awards: AwardStatus::parse(self.awards),
            title: self
                .title
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string),
        })
    }
}

fn required<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, RejectReason> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(RejectReason::MissingField(field)),
    }
}

fn parse_number(field: &'static str, value: Option<&str>) -> Result<f64, RejectReason> {
    let text = required(field, value)?;
    text.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| RejectReason::InvalidNumber {
            field,
            value: text.to_string(),
        })
}

fn parse_year(value: Option<&str>) -> Result<i32, RejectReason> {
    let year = parse_number("Year", value)?;
    if year.fract() != 0.0 || year < i32::MIN as f64 || year > i32::MAX as f64 {
        return Err(RejectReason::NotAnInteger {
            field: "Year",
            value: value.unwrap_or_default().trim().to_string(),
        });
    }
    Ok(year as i32)
}

/// Fetch a column as text, casting if the frame was read with inferred types.
fn text_column(df: &DataFrame, name: &str) -> Result<Series, LoaderError> {
    let column = df
        .column(name)
        .map_err(|_| LoaderError::MissingColumn(name.to_string()))?;
    Ok(column.as_materialized_series().cast(&DataType::String)?)
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Read and validate a CSV file.
    pub fn read_csv(file_path: &Path) -> Result<LoadReport, LoaderError> {
        info!(path = %file_path.display(), "loading film CSV");

        // Schema inference off: every column arrives as text and coercion stays here
        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;

        Self::records_from_frame(&df)
    }

    /// Validate CSV content held in memory.
    pub fn parse_csv_bytes(bytes: Vec<u8>) -> Result<LoadReport, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        Self::records_from_frame(&df)
    }

    /// Turn a frame of raw rows into validated records.
    pub fn records_from_frame(df: &DataFrame) -> Result<LoadReport, LoaderError> {
        let [year, length, popularity, subject, awards] =
            REQUIRED_COLUMNS.map(|name| text_column(df, name));
        let (year, length, popularity) = (year?, length?, popularity?);
        let (subject, awards) = (subject?, awards?);
        let title = text_column(df, TITLE_COLUMN).ok();

        let (year, length, popularity) = (year.str()?, length.str()?, popularity.str()?);
        let (subject, awards) = (subject.str()?, awards.str()?);
        let title = title.as_ref().map(|t| t.str()).transpose()?;

        let rows: Vec<RawRow<'_>> = (0..df.height())
            .map(|i| RawRow {
                year: year.get(i),
                length: length.get(i),
                popularity: popularity.get(i),
                subject: subject.get(i),
                awards: awards.get(i),
                title: title.and_then(|t| t.get(i)),
            })
            .collect();

        // Parallel parse; collect keeps row order
        let parsed: Vec<Result<Record, RejectReason>> =
            rows.par_iter().map(RawRow::parse).collect();

        let mut report = LoadReport::default();
        for (i, result) in parsed.into_iter().enumerate() {
            match result {
                Ok(record) => report.records.push(record),
                Err(reason) => {
                    warn!(row = i + 1, %reason, "rejected CSV row");
                    report.rejected.push(RejectedRow { row: i + 1, reason });
                }
            }
        }

        info!(
            records = report.records.len(),
            rejected = report.rejected.len(),
            "film CSV validated"
        );
        debug!(has_title = title.is_some(), "optional columns");
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(csv: &str) -> LoadReport {
        DataLoader::parse_csv_bytes(csv.as_bytes().to_vec()).expect("csv should load")
    }

    #[test]
    fn parses_valid_rows() {
        let report = parse(
            "Year,Length,Popularity,Subject,Awards,Title\n\
             1990,111,68,Drama,No,Tie Me Up\n\
             1991,94,79,Comedy,Yes,High Heels\n",
        );
        assert!(report.rejected.is_empty());
        assert_eq!(report.records.len(), 2);

        let first = &report.records[0];
        assert_eq!(first.year, 1990);
        assert_eq!(first.length, 111.0);
        assert_eq!(first.popularity, 68.0);
        assert_eq!(first.subject, "Drama");
        assert_eq!(first.awards, AwardStatus::No);
        assert_eq!(first.title.as_deref(), Some("Tie Me Up"));
        assert_eq!(report.records[1].awards, AwardStatus::Yes);
    }

    #[test]
    fn rejects_bad_numbers_with_row_and_reason() {
        let report = parse(
            "Year,Length,Popularity,Subject,Awards\n\
             1990,111,68,Drama,No\n\
             199x,94,79,Comedy,Yes\n\
             1992,,50,Comedy,No\n\
             1993.5,90,50,Comedy,No\n",
        );
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.total_rows(), 4);
        assert_eq!(
            report.rejected,
            vec![
                RejectedRow {
                    row: 2,
                    reason: RejectReason::InvalidNumber {
                        field: "Year",
                        value: "199x".to_string()
                    }
                },
                RejectedRow {
                    row: 3,
                    reason: RejectReason::MissingField("Length")
                },
                RejectedRow {
                    row: 4,
                    reason: RejectReason::NotAnInteger {
                        field: "Year",
                        value: "1993.5".to_string()
                    }
                },
            ]
        );
    }

    #[test]
    fn rejects_empty_subject() {
        let report = parse("Year,Length,Popularity,Subject,Awards\n2000,90,10,  ,Yes\n");
        assert!(report.records.is_empty());
        assert_eq!(report.rejected[0].reason, RejectReason::MissingField("Subject"));
    }

    #[test]
    fn unknown_awards_are_kept() {
        let report = parse("Year,Length,Popularity,Subject,Awards\n2000,90,10,War,\n2001,80,20,War,n/a\n");
        assert!(report.rejected.is_empty());
        assert!(report
            .records
            .iter()
            .all(|r| r.awards == AwardStatus::Unknown));
    }

    #[test]
    fn trims_whitespace_before_parsing() {
        let report = parse("Year,Length,Popularity,Subject,Awards\n 2000 , 90.5 ,10, War , yes \n");
        let record = &report.records[0];
        assert_eq!(record.year, 2000);
        assert_eq!(record.length, 90.5);
        assert_eq!(record.subject, "War");
        assert_eq!(record.awards, AwardStatus::Yes);
        assert_eq!(record.title, None);
    }

    #[test]
    fn missing_column_is_an_error() {
        let err = DataLoader::parse_csv_bytes(b"Year,Length,Subject,Awards\n2000,90,War,No\n".to_vec())
            .unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "Popularity"));
    }

    #[test]
    fn each_required_column_is_checked() {
        for missing in REQUIRED_COLUMNS {
            let header: Vec<&str> = REQUIRED_COLUMNS
                .into_iter()
                .filter(|name| *name != missing)
                .collect();
            let csv = format!("{}\n", header.join(","));
            let err = DataLoader::parse_csv_bytes(csv.into_bytes()).unwrap_err();
            assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == missing));
        }
    }

    #[test]
    fn header_only_yields_empty_dataset() {
        let report = parse("Year,Length,Popularity,Subject,Awards\n");
        assert_eq!(report.total_rows(), 0);
    }
}
