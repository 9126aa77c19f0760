use serde::Serialize;
use smol_str::SmolStr;
use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Name of one grammar production, e.g. `if_statement`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct ConstructName(SmolStr);

impl ConstructName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(SmolStr::new(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConstructName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for ConstructName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConstructName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Check if a character can start an identifier.
pub fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier.
pub fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Whether `s` is a single identifier token.
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if is_ident_start(c) => chars.all(is_ident_continue),
        _ => false,
    }
}

/// File path plus 1-based line and column.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceLocation {
    pub file: Arc<str>,
    pub line: u32,
    /// Counted in characters from the start of the line.
    pub column: u32,
}

impl SourceLocation {
    pub fn new(file: impl Into<Arc<str>>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One occurrence of a construct name in a fixture comment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Annotation {
    pub name: ConstructName,
    pub location: SourceLocation,
}

impl Annotation {
    pub fn new(name: impl Into<ConstructName>, location: SourceLocation) -> Self {
        Self {
            name: name.into(),
            location,
        }
    }
}
