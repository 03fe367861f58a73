//! Conversion driver.
//!
//! Reads the metadata index and, for every record flagged as having full text,
//! locates its JSON document, extracts it, renders it and writes
//! `<output dir>/<file id>.txt`. Failures are isolated per record: they are logged
//! as warnings and the run moves on. Only a metadata index that cannot be opened
//! stops the run.

use crate::config::ConvertConfig;
use crate::extract::{extract, ExtractionError};
use crate::locate::FileIndex;
use crate::metadata::MetadataIndex;
use crate::models::MetadataRecord;
use crate::render::render;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while converting
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("error opening metadata file {}: {source}", .path.display())]
    MetadataOpen {
        path: PathBuf,
        source: csv::Error,
    },

    #[error("file not found: {file_name}")]
    FileNotFound { file_name: String },

    #[error("error reading file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("error parsing file {}: {source}", .path.display())]
    JsonParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("error converting file {}: {source}", .path.display())]
    Extraction {
        path: PathBuf,
        source: ExtractionError,
    },

    #[error("error writing file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What happened to a single metadata record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// Text written to this path
    Converted(PathBuf),
    /// Record not flagged as full text
    NoFullText,
}

/// Counters for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// Data rows read from the index, malformed ones included
    pub records: usize,
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub malformed_rows: usize,
}

/// Drives the conversion of a whole dataset
#[derive(Debug, Clone)]
pub struct Converter {
    config: ConvertConfig,
}

impl Converter {
    pub fn new(config: ConvertConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// Convert every full-text record of the metadata index.
    ///
    /// Fails only when the metadata index cannot be opened.
    pub fn run(&self) -> Result<RunStats, ConvertError> {
        let path = self.config.metadata_path();
        let mut metadata = MetadataIndex::open(&path)
            .map_err(|source| ConvertError::MetadataOpen { path, source })?;

        let index = FileIndex::build(&self.config.dataset_root);

        Ok(self.run_records(&index, metadata.records()))
    }

    /// Convert a sequence of metadata rows, logging and counting failures
    pub fn run_records<I>(&self, index: &FileIndex, records: I) -> RunStats
    where
        I: IntoIterator<Item = Result<MetadataRecord, csv::Error>>,
    {
        let mut stats = RunStats::default();

        for record in records {
            stats.records += 1;

            let record = match record {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!("Skipping malformed metadata row: {}", e);
                    stats.malformed_rows += 1;
                    continue;
                }
            };

            match self.convert_record(index, &record) {
                Ok(RecordOutcome::Converted(path)) => {
                    tracing::debug!("Converted {} to {}", record.file_id, path.display());
                    stats.converted += 1;
                }
                Ok(RecordOutcome::NoFullText) => {
                    tracing::debug!("Skipping {}: no full text", record.file_id);
                    stats.skipped += 1;
                }
                Err(e) => {
                    tracing::warn!(file_id = %record.file_id, "{}", e);
                    stats.failed += 1;
                }
            }
        }

        tracing::debug!(
            "Processed {} records: {} converted, {} skipped, {} failed, {} malformed",
            stats.records,
            stats.converted,
            stats.skipped,
            stats.failed,
            stats.malformed_rows
        );

        stats
    }

    /// Convert one metadata record
    pub fn convert_record(
        &self,
        index: &FileIndex,
        record: &MetadataRecord,
    ) -> Result<RecordOutcome, ConvertError> {
        if !record.has_full_text {
            return Ok(RecordOutcome::NoFullText);
        }

        let file_name = record.json_file_name();
        let source = index
            .locate(&file_name)
            .ok_or(ConvertError::FileNotFound { file_name })?;

        let text = convert_file(source)?;

        let output = self.config.output_path(&record.file_id);
        std::fs::write(&output, text).map_err(|source| ConvertError::Write {
            path: output.clone(),
            source,
        })?;

        Ok(RecordOutcome::Converted(output))
    }
}

/// Read, parse, extract and render one JSON document
pub fn convert_file(path: &Path) -> Result<String, ConvertError> {
    let content = std::fs::read(path).map_err(|source| ConvertError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;

    let raw: serde_json::Value =
        serde_json::from_slice(&content).map_err(|source| ConvertError::JsonParse {
            path: path.to_path_buf(),
            source,
        })?;

    let document = extract(&raw).map_err(|source| ConvertError::Extraction {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(render(&document))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    const PAPER: &str = r#"{
        "metadata": {"title": "Test", "authors": [{"first": "A", "last": "B"}]},
        "abstract": [{"section": "", "text": "Hello"}],
        "body_text": [{"section": "Intro", "text": "World"}]
    }"#;

    const EXPECTED: &str = "\nTITLE\nTest\n\nAUTHORS\nA B\n\n\nHello\n\nIntro\n\nWorld\n";

    struct Fixture {
        dataset: TempDir,
        output: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                dataset: tempdir().unwrap(),
                output: tempdir().unwrap(),
            }
        }

        fn add_document(&self, relative: &str, content: &str) {
            let path = self.dataset.path().join(relative);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }

        fn converter(&self) -> Converter {
            Converter::new(ConvertConfig::new(self.dataset.path(), self.output.path()))
        }

        fn index(&self) -> FileIndex {
            FileIndex::build(self.dataset.path())
        }
    }

    #[test]
    fn test_convert_record_writes_text() {
        let fixture = Fixture::new();
        fixture.add_document("comm_use_subset/paper1.json", PAPER);

        let outcome = fixture
            .converter()
            .convert_record(&fixture.index(), &MetadataRecord::new("paper1", true))
            .unwrap();

        let expected_path = fixture.output.path().join("paper1.txt");
        assert_eq!(outcome, RecordOutcome::Converted(expected_path.clone()));
        assert_eq!(fs::read_to_string(expected_path).unwrap(), EXPECTED);
    }

    #[test]
    fn test_record_without_full_text_is_skipped() {
        let fixture = Fixture::new();
        fixture.add_document("paper1.json", PAPER);

        let outcome = fixture
            .converter()
            .convert_record(&fixture.index(), &MetadataRecord::new("paper1", false))
            .unwrap();

        assert_eq!(outcome, RecordOutcome::NoFullText);
        assert!(!fixture.output.path().join("paper1.txt").exists());
    }

    #[test]
    fn test_missing_document() {
        let fixture = Fixture::new();

        let err = fixture
            .converter()
            .convert_record(&fixture.index(), &MetadataRecord::new("paper1", true))
            .unwrap_err();

        assert!(matches!(err, ConvertError::FileNotFound { ref file_name } if file_name == "paper1.json"));
    }

    #[test]
    fn test_invalid_json() {
        let fixture = Fixture::new();
        fixture.add_document("paper1.json", "{not json");

        let err = fixture
            .converter()
            .convert_record(&fixture.index(), &MetadataRecord::new("paper1", true))
            .unwrap_err();

        assert!(matches!(err, ConvertError::JsonParse { .. }));
        assert!(!fixture.output.path().join("paper1.txt").exists());
    }

    #[test]
    fn test_extraction_failure() {
        let fixture = Fixture::new();
        fixture.add_document("paper1.json", r#"{"metadata": {"title": "T"}}"#);

        let err = fixture
            .converter()
            .convert_record(&fixture.index(), &MetadataRecord::new("paper1", true))
            .unwrap_err();

        match err {
            ConvertError::Extraction { source, .. } => {
                assert_eq!(source.path(), "metadata.authors")
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_missing_output_dir_is_write_error() {
        let fixture = Fixture::new();
        fixture.add_document("paper1.json", PAPER);
        let config = ConvertConfig::new(
            fixture.dataset.path(),
            fixture.output.path().join("does-not-exist"),
        );

        let err = Converter::new(config)
            .convert_record(&fixture.index(), &MetadataRecord::new("paper1", true))
            .unwrap_err();

        assert!(matches!(err, ConvertError::Write { .. }));
    }

    #[test]
    fn test_run_records_continues_after_failures() {
        let fixture = Fixture::new();
        fixture.add_document("a/paper1.json", PAPER);
        fixture.add_document("b/paper3.json", PAPER);

        let records = vec![
            Ok(MetadataRecord::new("paper1", true)),
            Ok(MetadataRecord::new("missing", true)),
            Ok(MetadataRecord::new("paper2", false)),
            Ok(MetadataRecord::new("paper3", true)),
        ];

        let stats = fixture.converter().run_records(&fixture.index(), records);

        assert_eq!(
            stats,
            RunStats {
                records: 4,
                converted: 2,
                skipped: 1,
                failed: 1,
                malformed_rows: 0,
            }
        );
        assert!(fixture.output.path().join("paper1.txt").exists());
        assert!(fixture.output.path().join("paper3.txt").exists());
        assert!(!fixture.output.path().join("missing.txt").exists());
    }

    #[test]
    fn test_run_missing_metadata_is_fatal() {
        let fixture = Fixture::new();

        let err = fixture.converter().run().unwrap_err();
        assert!(matches!(err, ConvertError::MetadataOpen { .. }));
    }

    #[test]
    fn test_run_reads_metadata_index() {
        let fixture = Fixture::new();
        fixture.add_document("subset/paper1.json", PAPER);
        fs::write(
            fixture.dataset.path().join("metadata.csv"),
            "sha,title,has_full_text\npaper1,Test,True\npaper2,Other,False\n",
        )
        .unwrap();

        let config = ConvertConfig::new(fixture.dataset.path(), fixture.output.path())
            .with_metadata_file("metadata.csv");
        let stats = Converter::new(config).run().unwrap();

        assert_eq!(stats.converted, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(
            fs::read_to_string(fixture.output.path().join("paper1.txt")).unwrap(),
            EXPECTED
        );
    }
}
