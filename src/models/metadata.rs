//! One row of the metadata index.

use serde::{Deserialize, Serialize};

/// Flag value marking a record whose full-text JSON is available
pub const FULL_TEXT_FLAG: &str = "True";

/// A paper listed in the metadata index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    /// File identifier (the JSON document is named `<file_id>.json`)
    pub file_id: String,

    /// Whether a full-text JSON document exists for this paper
    pub has_full_text: bool,
}

impl MetadataRecord {
    /// Create a record from its file id and flag
    pub fn new(file_id: impl Into<String>, has_full_text: bool) -> Self {
        Self {
            file_id: file_id.into(),
            has_full_text,
        }
    }

    /// Build a record from the raw columns of a data row.
    ///
    /// Column 0 is the file id and the last column is the full-text flag.
    /// Only the literal `"True"` counts as full text. Returns `None` for an empty row.
    pub fn from_columns<'a, I>(columns: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut columns = columns.into_iter();
        let file_id = columns.next()?;
        let flag = columns.last().unwrap_or(file_id);

        Some(Self::new(file_id, flag == FULL_TEXT_FLAG))
    }

    /// Name of the JSON document holding this paper's full text
    pub fn json_file_name(&self) -> String {
        format!("{}.json", self.file_id)
    }
}
