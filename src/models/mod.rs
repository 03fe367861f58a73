//! Core data models for converted papers and the metadata index.

mod document;
mod metadata;

pub use document::{Author, BibEntry, Document, DocumentBuilder, FigureRef, Paragraph};
pub use metadata::{MetadataRecord, FULL_TEXT_FLAG};
