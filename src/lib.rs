//! # Paper Convert
//!
//! Converts a corpus of structured scientific-paper records (one JSON document per
//! paper plus a CSV metadata index) into one plain-text file per paper, for search
//! indexing or NLP.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (Document, Author, MetadataRecord, etc.)
//! - [`metadata`]: Metadata index reader
//! - [`locate`]: Filename index used to find JSON documents under the dataset root
//! - [`extract`]: Typed extraction of a [`Document`] from parsed JSON
//! - [`render`]: Deterministic plain-text rendering of a [`Document`]
//! - [`convert`]: Conversion driver tying the pieces together
//! - [`config`]: Configuration management
//!
//! ## Example
//!
//! ```rust
//! use paper_convert::{extract, render};
//!
//! let raw = serde_json::json!({
//!     "metadata": {"title": "Test", "authors": [{"first": "A", "last": "B"}]},
//!     "abstract": [{"section": "", "text": "Hello"}],
//!     "body_text": [{"section": "Intro", "text": "World"}]
//! });
//!
//! let document = extract(&raw).unwrap();
//! assert_eq!(
//!     render(&document),
//!     "\nTITLE\nTest\n\nAUTHORS\nA B\n\n\nHello\n\nIntro\n\nWorld\n"
//! );
//! ```

pub mod config;
pub mod convert;
pub mod extract;
pub mod locate;
pub mod metadata;
pub mod models;
pub mod render;

// Re-export commonly used types
pub use config::ConvertConfig;
pub use convert::{ConvertError, Converter, RunStats};
pub use extract::{extract, ExtractionError};
pub use models::{Document, MetadataRecord};
pub use render::render;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
