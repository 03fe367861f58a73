//! Structured representation of a single paper, as extracted from its JSON document.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A paper author, or an author of a cited work
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Given name
    pub first_name: String,

    /// Family name
    pub last_name: String,

    /// Affiliated institution
    pub institution: Option<String>,

    /// Country of the affiliation
    pub country: Option<String>,
}

impl Author {
    /// Create an author with no affiliation
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            institution: None,
            country: None,
        }
    }

    /// Set the institution
    pub fn with_institution(mut self, institution: impl Into<String>) -> Self {
        self.institution = Some(institution.into());
        self
    }

    /// Set the country
    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A paragraph of abstract or body text.
///
/// Section membership is positional: consecutive paragraphs with the same
/// `section_name` form one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paragraph {
    pub section_name: String,
    pub text: String,
}

impl Paragraph {
    pub fn new(section_name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            section_name: section_name.into(),
            text: text.into(),
        }
    }
}

/// A captioned figure or table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureRef {
    /// Reference id (e.g. `FIGREF0`, `TABREF1`)
    pub id: String,

    /// Caption text
    pub caption: String,
}

/// A bibliography entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BibEntry {
    /// Reference id as printed in the paper
    pub ref_id: String,

    /// Title of the cited work
    pub title: String,

    /// Authors of the cited work, in order
    pub authors: Vec<Author>,

    /// Journal or conference
    pub venue: Option<String>,

    /// Publication year
    pub year: Option<i64>,
}

impl BibEntry {
    /// Create an entry with no authors, venue or year
    pub fn new(ref_id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            ref_id: ref_id.into(),
            title: title.into(),
            authors: Vec::new(),
            venue: None,
            year: None,
        }
    }
}

/// A fully extracted paper.
///
/// Figures and bibliography are keyed by their id in the source document and
/// iterate in ascending key order, which keeps rendering deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub authors: Vec<Author>,
    pub abstract_paragraphs: Vec<Paragraph>,
    pub body_paragraphs: Vec<Paragraph>,
    pub figures: BTreeMap<String, FigureRef>,
    pub bibliography: BTreeMap<String, BibEntry>,
}

impl Document {
    /// Create a document with a title and nothing else
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Builder for constructing Document objects
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    document: Document,
}

impl DocumentBuilder {
    /// Create a new builder with the document title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            document: Document::new(title),
        }
    }

    /// Append an author
    pub fn author(mut self, author: Author) -> Self {
        self.document.authors.push(author);
        self
    }

    /// Append an abstract paragraph
    pub fn abstract_paragraph(mut self, section: impl Into<String>, text: impl Into<String>) -> Self {
        self.document
            .abstract_paragraphs
            .push(Paragraph::new(section, text));
        self
    }

    /// Append a body paragraph
    pub fn body_paragraph(mut self, section: impl Into<String>, text: impl Into<String>) -> Self {
        self.document.body_paragraphs.push(Paragraph::new(section, text));
        self
    }

    /// Add a figure or table caption
    pub fn figure(mut self, id: impl Into<String>, caption: impl Into<String>) -> Self {
        let id = id.into();
        self.document.figures.insert(
            id.clone(),
            FigureRef {
                id,
                caption: caption.into(),
            },
        );
        self
    }

    /// Add a bibliography entry under its internal key
    pub fn bib_entry(mut self, key: impl Into<String>, entry: BibEntry) -> Self {
        self.document.bibliography.insert(key.into(), entry);
        self
    }

    /// Build the Document
    pub fn build(self) -> Document {
        self.document
    }
}
