use gramcov_common::{is_identifier, ConstructName, MalformedSpec};
use indexmap::IndexSet;
use miette::{NamedSource, SourceSpan};

/// Parse the line-oriented form: one construct name per line.
pub(crate) fn parse(origin: &str, source: &str) -> Result<IndexSet<ConstructName>, MalformedSpec> {
    let mut names = IndexSet::new();
    let mut spans: Vec<SourceSpan> = Vec::new();
    let mut offset = 0;

    for (index, raw) in source.split_inclusive('\n').enumerate() {
        let line_start = offset;
        offset += raw.len();

        let name = raw.trim();
        if name.is_empty() || name.starts_with('#') {
            continue;
        }
        let start = line_start + (raw.len() - raw.trim_start().len());
        let span = SourceSpan::from((start, name.len()));
        let line = index + 1;

        if !is_identifier(name) {
            return Err(MalformedSpec::InvalidName {
                name: name.to_string(),
                line: Some(line),
                src: NamedSource::new(origin, source.to_string()),
                span: Some(span),
            });
        }

        let (existing, inserted) = names.insert_full(ConstructName::new(name));
        if !inserted {
            return Err(MalformedSpec::Duplicate {
                name: name.to_string(),
                line: Some(line),
                src: NamedSource::new(origin, source.to_string()),
                span: Some(span),
                first: Some(spans[existing]),
            });
        }
        spans.push(span);
    }

    Ok(names)
}
