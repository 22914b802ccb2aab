// Delimited-file record source
use crate::application::dataset_source::DatasetSource;
use crate::domain::record::Record;
use anyhow::{Context, Result};
use async_trait::async_trait;
use csv::{ByteRecord, ReaderBuilder, Trim};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const GIVEN_BY_COLUMN: &str = "dadopor";
pub const PHYSICIAN_COLUMN: &str = "Medico";
pub const DATE_COLUMN: &str = "fecha";
pub const STATUS_COLUMN: &str = "estado";
pub const CONSULTATION_TYPE_COLUMN: &str = "tipoconsulta";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("delimiter must be a single byte, got {0:?}")]
    InvalidDelimiter(String),
    #[error("required column '{0}' missing from header")]
    MissingColumn(&'static str),
    #[error("failed to read records: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Clone)]
pub struct CsvDatasetSource {
    path: PathBuf,
    delimiter: u8,
}

impl CsvDatasetSource {
    pub fn new(path: impl Into<PathBuf>, delimiter: &str) -> Result<Self, LoadError> {
        let delimiter = match delimiter.as_bytes() {
            [byte] => *byte,
            _ => return Err(LoadError::InvalidDelimiter(delimiter.to_string())),
        };
        Ok(Self {
            path: path.into(),
            delimiter,
        })
    }
}

#[async_trait]
impl DatasetSource for CsvDatasetSource {
    async fn load_records(&self) -> Result<Vec<Record>> {
        let path = self.path.clone();
        let delimiter = self.delimiter;
        tokio::task::spawn_blocking(move || read_records(&path, delimiter))
            .await
            .context("Record loading task failed")?
            .with_context(|| format!("Failed to load dataset from {}", self.path.display()))
    }
}

struct ColumnIndex {
    given_by: usize,
    physician: usize,
    date: usize,
    status: usize,
    consultation_type: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &ByteRecord) -> Result<Self, LoadError> {
        let names: Vec<String> = headers
            .iter()
            .map(|h| {
                String::from_utf8_lossy(h)
                    .trim_start_matches('\u{feff}')
                    .trim()
                    .to_string()
            })
            .collect();
        let find = |column: &'static str| {
            names
                .iter()
                .position(|n| n == column)
                .ok_or(LoadError::MissingColumn(column))
        };

        Ok(Self {
            given_by: find(GIVEN_BY_COLUMN)?,
            physician: find(PHYSICIAN_COLUMN)?,
            date: find(DATE_COLUMN)?,
            status: find(STATUS_COLUMN)?,
            consultation_type: find(CONSULTATION_TYPE_COLUMN)?,
        })
    }
}

/// Read the whole file. Short rows are padded with empty cells.
pub fn read_records(path: &Path, delimiter: u8) -> Result<Vec<Record>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;

    let columns = ColumnIndex::from_headers(reader.byte_headers()?)?;

    let mut records = Vec::new();
    for (line, row) in reader.byte_records().enumerate() {
        let row = row?;
        let cell = |idx: usize| -> String {
            row.get(idx)
                .map(|b| String::from_utf8_lossy(b).into_owned())
                .unwrap_or_default()
        };

        let physician = Some(cell(columns.physician)).filter(|p| !p.is_empty());
        let record = Record::new(
            cell(columns.given_by),
            physician,
            cell(columns.date),
            cell(columns.status),
            cell(columns.consultation_type),
        );
        if record.month.is_none() {
            tracing::debug!(line = line + 2, date = %record.date, "Unparseable date, month left empty");
        }
        records.push(record);
    }

    Ok(records)
}
