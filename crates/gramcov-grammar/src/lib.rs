//! Grammar specs: the authoritative set of construct names a fixture suite
//! must exercise.
//!
//! A spec is loaded from one of:
//! - plain text, one construct name per line (blank lines and `#` comments ignored)
//! - a JSON array of names, or a tree-sitter `node-types.json`
//! - a tree-sitter grammar linked into the binary ([`BuiltinGrammar`])
//!
//! ```text
//! # grammar.txt
//! if_statement
//! for_statement
//! jsx_element
//! ```

mod builtin;
mod structured;
mod text;

pub use builtin::{BuiltinGrammar, UnknownBuiltin};

use gramcov_common::{ConstructName, MalformedSpec};
use indexmap::IndexSet;

/// An immutable set of construct names, each declared exactly once.
///
/// Equality is set equality; declaration order is kept only for
/// re-serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrammarSpec {
    origin: String,
    names: IndexSet<ConstructName>,
}

impl GrammarSpec {
    /// Parse a grammar spec, detecting the structured form by a leading `[`.
    #[tracing::instrument(skip_all, fields(origin = %origin.as_ref()))]
    pub fn parse(origin: impl AsRef<str>, source: &str) -> Result<Self, MalformedSpec> {
        let origin = origin.as_ref();
        let names = if source.trim_start().starts_with('[') {
            structured::parse(origin, source)?
        } else {
            text::parse(origin, source)?
        };
        let spec = Self::new(origin, names)?;
        tracing::debug!(constructs = spec.len(), "loaded grammar spec");
        Ok(spec)
    }

    /// Spec derived from a tree-sitter grammar's named node kinds.
    pub fn builtin(grammar: BuiltinGrammar) -> Self {
        let names = grammar.construct_names();
        tracing::debug!(
            grammar = grammar.name(),
            constructs = names.len(),
            "loaded builtin grammar"
        );
        Self {
            origin: format!("<builtin:{}>", grammar.name()),
            names,
        }
    }

    fn new(origin: &str, names: IndexSet<ConstructName>) -> Result<Self, MalformedSpec> {
        if names.is_empty() {
            return Err(MalformedSpec::Empty {
                origin: origin.to_string(),
            });
        }
        Ok(Self {
            origin: origin.to_string(),
            names,
        })
    }

    /// Where the spec came from: a file path or `<builtin:NAME>`.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false for a loaded spec.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ConstructName> {
        self.names.iter()
    }

    /// One name per line in declaration order; `parse` of the result yields an equal spec.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for name in &self.names {
            out.push_str(name.as_str());
            out.push('\n');
        }
        out
    }
}

/// Load a grammar spec from its text. Same as [`GrammarSpec::parse`].
pub fn load_grammar_spec(
    origin: impl AsRef<str>,
    source: &str,
) -> Result<GrammarSpec, MalformedSpec> {
    GrammarSpec::parse(origin, source)
}
