//! Metadata index reader.
//!
//! The index is a CSV file with a header row. Column 0 holds the paper's file
//! identifier and the last column holds the full-text flag; all other columns
//! are ignored. Rows may have differing widths.

use crate::models::MetadataRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Streaming reader over the metadata index
pub struct MetadataIndex<R> {
    reader: csv::Reader<R>,
}

impl MetadataIndex<File> {
    /// Open the index at `path`
    pub fn open(path: &Path) -> Result<Self, csv::Error> {
        let reader = Self::builder().from_path(path)?;
        Ok(Self { reader })
    }
}

impl<R: Read> MetadataIndex<R> {
    /// Read an index from any byte source
    pub fn from_reader(source: R) -> Self {
        Self {
            reader: Self::builder().from_reader(source),
        }
    }

    fn builder() -> csv::ReaderBuilder {
        let mut builder = csv::ReaderBuilder::new();
        builder.has_headers(true).flexible(true);
        builder
    }

    /// Iterate over the data rows.
    ///
    /// A row that cannot be parsed yields an error; iteration can continue past it.
    pub fn records(&mut self) -> impl Iterator<Item = Result<MetadataRecord, csv::Error>> + '_ {
        self.reader.records().filter_map(|row| match row {
            Ok(row) => MetadataRecord::from_columns(row.iter()).map(Ok),
            Err(e) => Some(Err(e)),
        })
    }
}
