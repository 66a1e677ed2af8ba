use std::collections::HashMap;
use std::io;
use std::path::Path;
use log::{debug, warn};

use crate::artifacts::ArtifactError;

pub const DESCRIPTION_PLACEHOLDER: &str = "Description not available.";
pub const PRECAUTION_PLACEHOLDER: &str = "Precautions not available.";

/// Column holding the disease name in both reference tables
pub const DISEASE_COLUMN: &str = "disease";
pub const DESCRIPTION_COLUMN: &str = "description";
pub const PRECAUTION_COLUMN: &str = "precaution";

/// A read-only disease → text table keyed case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    column: String,
    rows: HashMap<String, String>,
}

impl ReferenceTable {
    /// Builds a table from `(disease, text)` pairs. The first row for a disease wins.
    pub fn from_rows<I, K, V>(column: impl Into<String>, rows: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut table = Self { column: column.into(), rows: HashMap::new() };
        for (disease, text) in rows {
            table.insert(disease.as_ref(), text.into());
        }
        table
    }

    /// Reads a CSV file with a header containing `disease` and `value_column`.
    /// Other columns are ignored.
    pub fn from_csv_path(path: &Path, value_column: &str) -> Result<Self, ArtifactError> {
        let file = std::fs::File::open(path).map_err(|e| ArtifactError::io(path, e))?;
        Self::from_csv_reader(file, value_column)
            .map_err(|e| e.with_path(path))
    }

    /// Reads CSV from any reader; see [`from_csv_path`](Self::from_csv_path).
    pub fn from_csv_reader<R: io::Read>(reader: R, value_column: &str) -> Result<Self, ArtifactError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .quote(b'"')
            .flexible(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let disease_idx = Self::column_index(&headers, DISEASE_COLUMN)?;
        let value_idx = Self::column_index(&headers, value_column)?;

        let mut table = Self { column: value_column.to_string(), rows: HashMap::new() };
        for record in reader.records() {
            let record = record?;
            match (record.get(disease_idx), record.get(value_idx)) {
                (Some(disease), Some(text)) if !disease.trim().is_empty() => {
                    table.insert(disease, text.to_string());
                }
                _ => debug!("Skipping incomplete {} row: {:?}", value_column, record),
            }
        }
        Ok(table)
    }

    fn column_index(headers: &csv::StringRecord, column: &str) -> Result<usize, ArtifactError> {
        headers.iter()
            .position(|h| h.trim().eq_ignore_ascii_case(column))
            .ok_or_else(|| ArtifactError::MissingColumn { column: column.to_string(), path: None })
    }

    fn insert(&mut self, disease: &str, text: String) {
        self.rows.entry(Self::key(disease)).or_insert(text);
    }

    fn key(disease: &str) -> String {
        disease.to_lowercase()
    }

    pub fn get(&self, disease: &str) -> Option<&str> {
        self.rows.get(&Self::key(disease)).map(String::as_str)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Resolves disease names to description and precaution text.
///
/// Missing rows are expected; they resolve to fixed placeholder text and never fail.
#[derive(Debug, Clone, Default)]
pub struct LookupService {
    descriptions: ReferenceTable,
    precautions: ReferenceTable,
}

impl LookupService {
    pub fn new(descriptions: ReferenceTable, precautions: ReferenceTable) -> Self {
        Self { descriptions, precautions }
    }

    pub fn describe(&self, disease: &str) -> &str {
        self.descriptions.get(disease).unwrap_or_else(|| {
            warn!("No description for disease '{}'", disease);
            DESCRIPTION_PLACEHOLDER
        })
    }

    pub fn precautions(&self, disease: &str) -> &str {
        self.precautions.get(disease).unwrap_or_else(|| {
            warn!("No precautions for disease '{}'", disease);
            PRECAUTION_PLACEHOLDER
        })
    }

    pub fn descriptions(&self) -> &ReferenceTable {
        &self.descriptions
    }

    pub fn precaution_table(&self) -> &ReferenceTable {
        &self.precautions
    }
}
