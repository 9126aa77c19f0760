//! Comment and string-literal syntax used by the annotation scanner.
//!
//! The scanner never parses fixtures. It only needs to know where line
//! comments start and which regions of text (strings, templates, block
//! comments) must be skipped so that identifier-like text inside them is
//! not mistaken for a marker.

use rustc_hash::FxHashMap;
use smol_str::SmolStr;
use std::path::Path;

/// How the text between two quote characters is lexed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteKind {
    /// Backslash escapes, ends at the closing quote or the end of the line.
    Escaped,
    /// No escapes, may span lines (Go raw strings).
    Raw,
    /// Backslash escapes, may span lines, `${...}` interpolations are code.
    Template,
    /// Character literal: `'x'` or `'\n'`; a lone quote (a Rust lifetime) is ignored.
    Char,
    /// Backslash escapes; a tripled delimiter opens a string that may span
    /// lines and ends at the next tripled delimiter (Python).
    Triple,
    /// `r#"..."#`: any number of `#` between prefix and delimiter, closed by
    /// the delimiter followed by as many `#` (Rust).
    Hashed,
    /// `R"tag(...)tag"`: closed by `)`, the same tag and the delimiter (C++).
    Parenthesized,
}

/// A string delimiter. A quote with prefixes only opens a literal directly
/// after one of those identifiers (`r"..."`, `u8R"(...)"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub delim: char,
    pub kind: QuoteKind,
    pub prefixes: &'static [&'static str],
}

impl Quote {
    pub const fn new(delim: char, kind: QuoteKind) -> Self {
        Self {
            delim,
            kind,
            prefixes: &[],
        }
    }

    pub const fn prefixed(delim: char, kind: QuoteKind, prefixes: &'static [&'static str]) -> Self {
        Self {
            delim,
            kind,
            prefixes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentSyntax {
    pub line_comment: SmolStr,
    pub block_comment: Option<(SmolStr, SmolStr)>,
    /// Block comments nest (`/* /* */ */` is one comment).
    pub nested_block_comments: bool,
    pub quotes: Vec<Quote>,
}

impl CommentSyntax {
    /// `//` and `/* */` with `"` and `'` strings (C, C++, Java, C#...).
    pub fn c_family() -> Self {
        Self {
            line_comment: SmolStr::new_static("//"),
            block_comment: Some((SmolStr::new_static("/*"), SmolStr::new_static("*/"))),
            nested_block_comments: false,
            quotes: vec![
                Quote::new('"', QuoteKind::Escaped),
                Quote::new('\'', QuoteKind::Escaped),
            ],
        }
    }

    /// C family plus interpolating backtick templates (JS, TS, JSX, TSX).
    pub fn javascript() -> Self {
        let mut syntax = Self::c_family();
        syntax.quotes.push(Quote::new('`', QuoteKind::Template));
        syntax
    }

    /// C family plus `R"tag(...)tag"` raw strings.
    pub fn cpp() -> Self {
        let mut syntax = Self::c_family();
        syntax.quotes.push(Quote::prefixed(
            '"',
            QuoteKind::Parenthesized,
            &["R", "LR", "uR", "UR", "u8R"],
        ));
        syntax
    }

    /// C family plus backtick raw strings.
    pub fn go() -> Self {
        let mut syntax = Self::c_family();
        syntax.quotes.push(Quote::new('`', QuoteKind::Raw));
        syntax
    }

    /// `'` introduces either a char literal or a lifetime. Block comments nest.
    pub fn rust() -> Self {
        let mut syntax = Self::c_family();
        syntax.nested_block_comments = true;
        syntax.quotes = vec![
            Quote::new('"', QuoteKind::Escaped),
            Quote::new('\'', QuoteKind::Char),
            Quote::prefixed('"', QuoteKind::Hashed, &["r", "br", "cr"]),
        ];
        syntax
    }

    /// `#` line comments, no block comments (Python, Ruby, shell, TOML, YAML).
    pub fn hash() -> Self {
        Self {
            line_comment: SmolStr::new_static("#"),
            block_comment: None,
            nested_block_comments: false,
            quotes: vec![
                Quote::new('"', QuoteKind::Escaped),
                Quote::new('\'', QuoteKind::Escaped),
            ],
        }
    }

    /// Hash comments with `"""` and `'''` multi-line strings.
    pub fn python() -> Self {
        let mut syntax = Self::hash();
        syntax.quotes = vec![
            Quote::new('"', QuoteKind::Triple),
            Quote::new('\'', QuoteKind::Triple),
        ];
        syntax
    }

    /// The unprefixed quote opened by `c`.
    pub fn quote(&self, c: char) -> Option<Quote> {
        self.quotes
            .iter()
            .copied()
            .find(|q| q.delim == c && q.prefixes.is_empty())
    }

    /// A prefixed quote that `word` may open.
    pub fn prefixed_quote(&self, word: &str) -> Option<Quote> {
        self.quotes
            .iter()
            .copied()
            .find(|q| q.prefixes.iter().any(|p| *p == word))
    }
}

impl Default for CommentSyntax {
    fn default() -> Self {
        Self::javascript()
    }
}

/// Comment syntax by file extension, with a fallback for unknown extensions.
#[derive(Debug, Clone)]
pub struct SyntaxTable {
    by_extension: FxHashMap<SmolStr, CommentSyntax>,
    fallback: CommentSyntax,
}

impl SyntaxTable {
    /// Table with no extension mappings.
    pub fn empty(fallback: CommentSyntax) -> Self {
        Self {
            by_extension: FxHashMap::default(),
            fallback,
        }
    }

    pub fn insert(&mut self, extension: &str, syntax: CommentSyntax) {
        let ext = extension.trim_start_matches('.').to_ascii_lowercase();
        self.by_extension.insert(SmolStr::new(ext), syntax);
    }

    pub fn for_extension(&self, extension: &str) -> &CommentSyntax {
        self.by_extension
            .get(extension.to_ascii_lowercase().as_str())
            .unwrap_or(&self.fallback)
    }

    pub fn for_path(&self, path: &Path) -> &CommentSyntax {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => self.for_extension(ext),
            None => &self.fallback,
        }
    }
}

impl Default for SyntaxTable {
    fn default() -> Self {
        let mut table = Self::empty(CommentSyntax::javascript());
        for ext in ["js", "jsx", "ts", "tsx", "mjs", "cjs", "mts", "cts"] {
            table.insert(ext, CommentSyntax::javascript());
        }
        for ext in ["c", "h", "java", "kt", "swift", "cs", "scala", "dart"] {
            table.insert(ext, CommentSyntax::c_family());
        }
        for ext in ["cc", "cpp", "cxx", "hpp", "hh", "hxx"] {
            table.insert(ext, CommentSyntax::cpp());
        }
        table.insert("go", CommentSyntax::go());
        table.insert("rs", CommentSyntax::rust());
        for ext in ["py", "pyi", "pyw"] {
            table.insert(ext, CommentSyntax::python());
        }
        for ext in ["rb", "sh", "bash", "toml", "yaml", "yml", "pl", "r"] {
            table.insert(ext, CommentSyntax::hash());
        }
        table
    }
}
