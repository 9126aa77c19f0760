use gramcov_common::{is_identifier, ConstructName, MalformedSpec};
use indexmap::IndexSet;
use miette::NamedSource;
use serde::Deserialize;

/// One element of a structured spec: a bare name or a tree-sitter node type.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Entry {
    Name(String),
    Node {
        #[serde(rename = "type")]
        kind: String,
        #[serde(default = "named_by_default")]
        named: bool,
    },
}

fn named_by_default() -> bool {
    true
}

/// Parse a JSON array of names or tree-sitter `node-types.json` entries.
///
/// Anonymous node types (`"named": false`) and hidden supertypes (leading
/// `_`) are not constructs a fixture can annotate, so they are skipped.
pub(crate) fn parse(origin: &str, source: &str) -> Result<IndexSet<ConstructName>, MalformedSpec> {
    let entries: Vec<Entry> =
        serde_json::from_str(source).map_err(|source| MalformedSpec::Structured {
            origin: origin.to_string(),
            source,
        })?;

    let mut names = IndexSet::new();
    for entry in entries {
        let name = match entry {
            Entry::Name(name) => name,
            Entry::Node { kind, named } => {
                if !named || kind.starts_with('_') {
                    continue;
                }
                kind
            }
        };

        if !is_identifier(&name) {
            return Err(MalformedSpec::InvalidName {
                name,
                line: None,
                src: NamedSource::new(origin, source.to_string()),
                span: None,
            });
        }
        if !names.insert(ConstructName::new(&name)) {
            return Err(MalformedSpec::Duplicate {
                name,
                line: None,
                src: NamedSource::new(origin, source.to_string()),
                span: None,
                first: None,
            });
        }
    }

    Ok(names)
}
