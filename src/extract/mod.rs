//! Content extraction from parsed paper JSON.
//!
//! [`extract`] turns the untyped JSON of one paper into a [`Document`]. Extraction is
//! all-or-nothing: the first missing or mistyped field aborts the whole document with an
//! [`ExtractionError`] naming that field.
//!
//! # Expected shape
//!
//! ```json
//! {
//!   "metadata": {
//!     "title": "...",
//!     "authors": [{"first": "Jane", "last": "Doe",
//!                  "affiliation": {"institution": "MIT", "location": {"country": "USA"}}}]
//!   },
//!   "abstract":  [{"section": "Abstract", "text": "..."}],
//!   "body_text": [{"section": "Introduction", "text": "..."}],
//!   "ref_entries": {"FIGREF0": {"text": "caption"}},
//!   "bib_entries": {"BIBREF0": {"ref_id": "b0", "title": "...", "authors": [],
//!                               "venue": "Nature", "year": 2020}}
//! }
//! ```
//!
//! `ref_entries` and `bib_entries` may be absent, but if present every entry in them must be
//! well-formed.

mod lookup;

use crate::models::{Author, BibEntry, Document, FigureRef, Paragraph};
use lookup::Object;
use serde_json::Value;
use std::collections::BTreeMap;

pub use lookup::ExtractionError;

/// Extract a [`Document`] from the parsed JSON of one paper
pub fn extract(raw: &Value) -> Result<Document, ExtractionError> {
    let root = Object::root(raw)?;

    let metadata = root.object("metadata").required()?;
    let title = metadata.str("title").required()?.to_string();
    let authors = objects_in(&metadata, "authors")?
        .iter()
        .map(extract_author)
        .collect::<Result<Vec<_>, _>>()?;

    let abstract_paragraphs = extract_paragraphs(&root, "abstract")?;
    let body_paragraphs = extract_paragraphs(&root, "body_text")?;

    let figures = match root.object("ref_entries").optional()? {
        Some(entries) => extract_figures(&entries)?,
        None => BTreeMap::new(),
    };

    let bibliography = match root.object("bib_entries").optional()? {
        Some(entries) => extract_bibliography(&entries)?,
        None => BTreeMap::new(),
    };

    Ok(Document {
        title,
        authors,
        abstract_paragraphs,
        body_paragraphs,
        figures,
        bibliography,
    })
}

/// Elements of a required array, each of which must be an object
fn objects_in<'a>(parent: &Object<'a>, key: &str) -> Result<Vec<Object<'a>>, ExtractionError> {
    let path = parent.child_path(key);
    parent
        .array(key)
        .required()?
        .iter()
        .enumerate()
        .map(|(i, value)| Object::at(value, format!("{}[{}]", path, i)).required())
        .collect()
}

/// Paragraphs in input order
fn extract_paragraphs(root: &Object<'_>, key: &str) -> Result<Vec<Paragraph>, ExtractionError> {
    objects_in(root, key)?
        .iter()
        .map(|paragraph| -> Result<_, ExtractionError> {
            Ok(Paragraph::new(
                paragraph.str("section").required()?,
                paragraph.str("text").required()?,
            ))
        })
        .collect()
}

/// Paper author with optional affiliation
fn extract_author(author: &Object<'_>) -> Result<Author, ExtractionError> {
    let mut result = extract_name(author)?;

    if let Some(affiliation) = author.object("affiliation").optional()? {
        result.institution = affiliation.str("institution").optional()?.map(str::to_string);

        if let Some(location) = affiliation.object("location").optional()? {
            result.country = location.str("country").optional()?.map(str::to_string);
        }
    }

    Ok(result)
}

/// First and last name only
fn extract_name(author: &Object<'_>) -> Result<Author, ExtractionError> {
    Ok(Author::new(
        author.str("first").required()?,
        author.str("last").required()?,
    ))
}

fn extract_figures(entries: &Object<'_>) -> Result<BTreeMap<String, FigureRef>, ExtractionError> {
    entries
        .entries()
        .map(|(id, value)| -> Result<_, ExtractionError> {
            let entry = Object::at(value, entries.child_path(id)).required()?;
            let figure = FigureRef {
                id: id.clone(),
                caption: entry.str("text").required()?.to_string(),
            };
            Ok((id.clone(), figure))
        })
        .collect()
}

fn extract_bibliography(
    entries: &Object<'_>,
) -> Result<BTreeMap<String, BibEntry>, ExtractionError> {
    entries
        .entries()
        .map(|(key, value)| -> Result<_, ExtractionError> {
            let entry = Object::at(value, entries.child_path(key)).required()?;
            let authors = objects_in(&entry, "authors")?
                .iter()
                .map(extract_name)
                .collect::<Result<Vec<_>, _>>()?;

            let bib = BibEntry {
                ref_id: entry.str("ref_id").required()?.to_string(),
                title: entry.str("title").required()?.to_string(),
                authors,
                venue: entry.str("venue").optional()?.map(str::to_string),
                year: entry.integer("year").optional()?,
            };
            Ok((key.clone(), bib))
        })
        .collect()
}
