use gramcov_common::{is_identifier, ConstructName};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tree_sitter::Language;

/// Tree-sitter grammars linked into the binary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinGrammar {
    Rust,
    Cpp,
    Go,
    TypeScript,
    Tsx,
}

#[derive(Debug, Error)]
#[error("unknown builtin grammar `{0}` (expected one of: rust, cpp, go, typescript, tsx)")]
pub struct UnknownBuiltin(pub String);

impl BuiltinGrammar {
    pub const ALL: [BuiltinGrammar; 5] = [
        BuiltinGrammar::Rust,
        BuiltinGrammar::Cpp,
        BuiltinGrammar::Go,
        BuiltinGrammar::TypeScript,
        BuiltinGrammar::Tsx,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BuiltinGrammar::Rust => "rust",
            BuiltinGrammar::Cpp => "cpp",
            BuiltinGrammar::Go => "go",
            BuiltinGrammar::TypeScript => "typescript",
            BuiltinGrammar::Tsx => "tsx",
        }
    }

    fn language(self) -> Language {
        match self {
            BuiltinGrammar::Rust => tree_sitter_rust::LANGUAGE.into(),
            BuiltinGrammar::Cpp => tree_sitter_cpp::LANGUAGE.into(),
            BuiltinGrammar::Go => tree_sitter_go::LANGUAGE.into(),
            BuiltinGrammar::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            BuiltinGrammar::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }

    /// Named, visible node kinds of the grammar.
    ///
    /// Aliases make several kind ids share one name; they collapse to a
    /// single construct.
    pub(crate) fn construct_names(self) -> IndexSet<ConstructName> {
        let language = self.language();
        let count = u16::try_from(language.node_kind_count()).unwrap_or(u16::MAX);

        (0..count)
            .filter(|&id| language.node_kind_is_named(id) && language.node_kind_is_visible(id))
            .filter_map(|id| language.node_kind_for_id(id))
            .filter(|kind| !kind.starts_with('_') && is_identifier(kind))
            .map(ConstructName::new)
            .collect()
    }
}

impl fmt::Display for BuiltinGrammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BuiltinGrammar {
    type Err = UnknownBuiltin;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BuiltinGrammar::ALL
            .into_iter()
            .find(|g| g.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBuiltin(s.to_string()))
    }
}
