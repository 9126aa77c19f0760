use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// A grammar spec that cannot be used.
///
/// Every variant is fatal: a run stops before any fixture is read.
#[derive(Debug, Error, Diagnostic)]
pub enum MalformedSpec {
    #[error("grammar spec {origin} declares no constructs")]
    #[diagnostic(
        code(gramcov::grammar::empty),
        help("list one construct name per line; blank lines and `#` comments are ignored")
    )]
    Empty { origin: String },

    #[error("construct `{name}` is declared more than once{}", at_line(.line))]
    #[diagnostic(code(gramcov::grammar::duplicate))]
    Duplicate {
        name: String,
        line: Option<usize>,
        #[source_code]
        src: NamedSource<String>,
        #[label("declared again here")]
        span: Option<SourceSpan>,
        #[label("first declared here")]
        first: Option<SourceSpan>,
    },

    #[error("`{name}` is not a valid construct name{}", at_line(.line))]
    #[diagnostic(
        code(gramcov::grammar::invalid_name),
        help("construct names are identifiers: a letter or `_` followed by letters, digits or `_`")
    )]
    InvalidName {
        name: String,
        line: Option<usize>,
        #[source_code]
        src: NamedSource<String>,
        #[label("not an identifier")]
        span: Option<SourceSpan>,
    },

    #[error("grammar spec {origin} is not a valid construct list")]
    #[diagnostic(
        code(gramcov::grammar::structured),
        help("expected a JSON array of names or a tree-sitter node-types.json")
    )]
    Structured {
        origin: String,
        #[source]
        source: serde_json::Error,
    },
}

fn at_line(line: &Option<usize>) -> String {
    match line {
        Some(line) => format!(" (line {line})"),
        None => String::new(),
    }
}
