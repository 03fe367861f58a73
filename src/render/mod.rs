//! Plain-text rendering of extracted documents.
//!
//! The layout is fixed:
//!
//! ```text
//!
//! TITLE
//! <title>
//!
//! AUTHORS
//! <one line per author>
//!
//!
//! <abstract, section-grouped>
//! <body, section-grouped>
//!
//! FIGURES AND TABLES      (only when there are figures)
//!
//! <id>
//! <caption>
//!
//! REFERENCES              (only when there are references)
//!
//! <ref id>. <authors>
//! <title>
//! <venue - year>
//!
//! ```
//!
//! Paragraph text is written verbatim. Figures and references follow the key
//! order of the document's maps.

use crate::models::{Author, BibEntry, Document, Paragraph};

const AUTHOR_SEPARATOR: &str = " - ";

/// Render a document to its plain-text form
pub fn render(document: &Document) -> String {
    let mut out = String::new();

    out.push_str("\nTITLE\n");
    out.push_str(&document.title);
    out.push('\n');

    out.push_str("\nAUTHORS\n");
    for author in &document.authors {
        out.push_str(&format_author(author));
    }
    out.push('\n');

    out.push('\n');
    write_sections(&mut out, &document.abstract_paragraphs);
    write_sections(&mut out, &document.body_paragraphs);

    if !document.figures.is_empty() {
        out.push_str("\nFIGURES AND TABLES\n\n");
        for figure in document.figures.values() {
            out.push_str(&figure.id);
            out.push('\n');
            out.push_str(&figure.caption);
            out.push('\n');
        }
    }

    if !document.bibliography.is_empty() {
        out.push_str("\nREFERENCES\n\n");
        for entry in document.bibliography.values() {
            out.push_str(&format_reference(entry));
        }
    }

    out
}

/// Write paragraphs, emitting a section header whenever the section name changes.
///
/// The sequence starts with an empty previous section, so leading paragraphs
/// without a section name get no header.
pub fn write_sections(out: &mut String, paragraphs: &[Paragraph]) {
    let mut current_section = "";

    for paragraph in paragraphs {
        if paragraph.section_name != current_section {
            out.push('\n');
            out.push_str(&paragraph.section_name);
            out.push_str("\n\n");
            current_section = paragraph.section_name.as_str();
        }
        out.push_str(&paragraph.text);
        out.push('\n');
    }
}

/// `"First Last[ - institution][ - country]\n"`
pub fn format_author(author: &Author) -> String {
    let mut line = author.full_name();

    for part in [&author.institution, &author.country] {
        if let Some(part) = non_empty(part) {
            line.push_str(AUTHOR_SEPARATOR);
            line.push_str(part);
        }
    }

    line.push('\n');
    line
}

/// One bibliography block, terminated by a blank line
pub fn format_reference(entry: &BibEntry) -> String {
    let authors: Vec<String> = entry.authors.iter().map(Author::full_name).collect();

    format!(
        "{}. {}\n{}\n{}\n\n",
        entry.ref_id,
        authors.join(AUTHOR_SEPARATOR),
        entry.title,
        format_venue_line(entry.venue.as_deref(), entry.year)
    )
}

/// `"venue - year"`, either part optional, no trailing newline
pub fn format_venue_line(venue: Option<&str>, year: Option<i64>) -> String {
    match (venue.filter(|v| !v.is_empty()), year) {
        (Some(venue), Some(year)) => format!("{} - {}", venue, year),
        (Some(venue), None) => venue.to_string(),
        (None, Some(year)) => year.to_string(),
        (None, None) => String::new(),
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
