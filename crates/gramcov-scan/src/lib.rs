//! Annotation extraction from fixture text.
//!
//! A marker is a line comment whose text starts with an identifier,
//! optionally followed by more identifiers separated by commas:
//!
//! ```text
//! // if_statement, statement_block
//! if (val) { ... }
//! ```
//!
//! Every identifier in the leading list becomes one [`Annotation`]. The
//! scan is lexical: commented-out code that happens to start with an
//! identifier is reported too.

mod lexer;

pub use lexer::{Lexer, Marker};

use gramcov_common::{
    Annotation, CommentSyntax, ConstructName, LineIndex, SourceFile, SourceLocation, Span, Spanned,
    SyntaxTable,
};
use std::path::Path;
use std::sync::Arc;

/// Scan text for markers using the given comment syntax.
pub fn scan(text: &str, syntax: &CommentSyntax) -> Vec<Marker> {
    Lexer::new(text, syntax).run()
}

/// Extract annotations from fixture text, choosing the comment syntax from
/// the extension of `file_id`.
pub fn extract_annotations(text: &str, file_id: &str) -> Vec<Annotation> {
    let table = SyntaxTable::default();
    extract_annotations_with(text, file_id, table.for_path(Path::new(file_id)))
}

/// Extract annotations from fixture text with an explicit comment syntax.
pub fn extract_annotations_with(
    text: &str,
    file_id: &str,
    syntax: &CommentSyntax,
) -> Vec<Annotation> {
    let lines = LineIndex::new(text);
    let file: Arc<str> = file_id.into();
    scan(text, syntax)
        .into_iter()
        .map(|marker| {
            let (line, col) = lines.line_col(text, marker.start);
            Annotation::new(marker.name, SourceLocation::new(file.clone(), line + 1, col + 1))
        })
        .collect()
}

/// Markers of a registered fixture, as spans into it.
pub fn scan_file(file: &SourceFile) -> Vec<Spanned<ConstructName>> {
    scan(&file.content, &file.syntax)
        .into_iter()
        .map(|m| Spanned::new(m.name, Span::new(file.id, m.start, m.end)))
        .collect()
}

/// Annotations of a registered fixture, in file order.
#[tracing::instrument(skip_all, fields(file = %file.name()))]
pub fn annotations_for(file: &SourceFile) -> Vec<Annotation> {
    let annotations: Vec<Annotation> = scan_file(file)
        .into_iter()
        .map(|marker| Annotation::new(marker.node, file.location(marker.span.start)))
        .collect();
    tracing::debug!(annotations = annotations.len(), "scanned fixture");
    annotations
}
