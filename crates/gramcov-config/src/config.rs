//! Checker configuration types (gramcov.toml format).

use crate::error::{ConfigError, Result};
use gramcov_common::{CommentSyntax, Quote, QuoteKind, SyntaxTable};
use gramcov_grammar::BuiltinGrammar;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CoverageConfig {
    /// Where the grammar spec comes from.
    #[serde(default)]
    pub grammar: GrammarConfig,

    /// Fixture files to scan.
    #[serde(default)]
    pub fixtures: Vec<PathBuf>,

    /// Report rendering.
    #[serde(default)]
    pub report: ReportConfig,

    /// Scanner settings.
    #[serde(default)]
    pub scan: ScanConfig,
}

/// Grammar source: a spec file or a builtin tree-sitter grammar.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GrammarConfig {
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default)]
    pub builtin: Option<BuiltinGrammar>,
}

/// Report format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReportConfig {
    #[serde(default)]
    pub format: ReportFormat,

    /// List matched constructs with their occurrences.
    #[serde(default)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScanConfig {
    /// Worker threads for fixture extraction (default: available parallelism).
    #[serde(default)]
    pub jobs: Option<usize>,

    /// Comment syntax overrides by extension.
    #[serde(rename = "syntax", default)]
    pub syntaxes: Vec<SyntaxConfig>,
}

/// Comment syntax for a set of file extensions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyntaxConfig {
    pub extensions: Vec<String>,

    pub line_comment: String,

    /// Opening and closing block comment delimiters.
    #[serde(default)]
    pub block_comment: Option<[String; 2]>,

    /// String delimiters with backslash escapes.
    #[serde(default = "default_quotes")]
    pub quotes: Vec<String>,

    /// Delimiter of interpolating templates (`${...}`).
    #[serde(default)]
    pub template: Option<String>,

    /// Delimiters of raw strings without escapes.
    #[serde(default)]
    pub raw_quotes: Vec<String>,

    /// A tripled `quotes` delimiter opens a multi-line string.
    #[serde(default)]
    pub triple_quotes: bool,

    #[serde(default)]
    pub nested_block_comments: bool,
}

fn default_quotes() -> Vec<String> {
    vec!["\"".to_string(), "'".to_string()]
}

impl SyntaxConfig {
    fn to_syntax(&self) -> Result<CommentSyntax> {
        if self.line_comment.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "syntax for {:?}: line_comment must not be empty",
                self.extensions
            )));
        }

        let block_comment = match &self.block_comment {
            Some([open, close]) if open.is_empty() || close.is_empty() => {
                return Err(ConfigError::Validation(format!(
                    "syntax for {:?}: block_comment delimiters must not be empty",
                    self.extensions
                )));
            }
            Some([open, close]) => Some((open.as_str().into(), close.as_str().into())),
            None => None,
        };

        let escaped = if self.triple_quotes {
            QuoteKind::Triple
        } else {
            QuoteKind::Escaped
        };
        let mut quotes = Vec::new();
        for quote in &self.quotes {
            quotes.push(Quote::new(single_char(quote, &self.extensions)?, escaped));
        }
        for quote in &self.raw_quotes {
            quotes.push(Quote::new(single_char(quote, &self.extensions)?, QuoteKind::Raw));
        }
        if let Some(template) = &self.template {
            quotes.push(Quote::new(single_char(template, &self.extensions)?, QuoteKind::Template));
        }

        Ok(CommentSyntax {
            line_comment: self.line_comment.as_str().into(),
            block_comment,
            nested_block_comments: self.nested_block_comments,
            quotes,
        })
    }
}

fn single_char(quote: &str, extensions: &[String]) -> Result<char> {
    let mut chars = quote.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::Validation(format!(
            "syntax for {extensions:?}: quote {quote:?} must be a single character"
        ))),
    }
}

impl CoverageConfig {
    /// Default file name looked up in the working directory.
    pub const FILE_NAME: &'static str = "gramcov.toml";

    /// Load configuration from a TOML file.
    ///
    /// Relative paths inside the file are resolved against its directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            config.resolve_paths(base);
        }
        config.validate()?;
        Ok(config)
    }

    /// `gramcov.toml` in `dir`, if present.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(Self::FILE_NAME);
        if path.is_file() {
            Self::from_file(&path).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    fn resolve_paths(&mut self, base: &Path) {
        if let Some(path) = &mut self.grammar.path {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        for fixture in &mut self.fixtures {
            if fixture.is_relative() {
                *fixture = base.join(&*fixture);
            }
        }
    }

    /// Check constraints the TOML schema cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.grammar.path.is_some() && self.grammar.builtin.is_some() {
            return Err(ConfigError::Validation(
                "grammar: set either `path` or `builtin`, not both".to_string(),
            ));
        }
        if self.scan.jobs == Some(0) {
            return Err(ConfigError::Validation("scan.jobs must be at least 1".to_string()));
        }
        for syntax in &self.scan.syntaxes {
            if syntax.extensions.is_empty() {
                return Err(ConfigError::Validation(
                    "scan.syntax: `extensions` must list at least one extension".to_string(),
                ));
            }
            syntax.to_syntax()?;
        }
        Ok(())
    }

    /// Default comment syntaxes with this config's overrides applied.
    pub fn syntax_table(&self) -> Result<SyntaxTable> {
        let mut table = SyntaxTable::default();
        for config in &self.scan.syntaxes {
            let syntax = config.to_syntax()?;
            for ext in &config.extensions {
                table.insert(ext, syntax.clone());
            }
        }
        Ok(table)
    }
}
