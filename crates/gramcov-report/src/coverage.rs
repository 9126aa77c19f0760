use crate::suggest::closest_construct;
use gramcov_common::{Annotation, ConstructName, SourceLocation};
use gramcov_grammar::GrammarSpec;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// An annotation naming a construct the grammar does not declare.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Orphan {
    pub name: ConstructName,
    pub location: SourceLocation,
    /// Closest declared construct, when one is similar enough to suggest.
    pub suggestion: Option<ConstructName>,
}

/// Result of checking annotations against a grammar spec.
///
/// All collections are ordered (names lexicographically, occurrences by
/// location) so the report does not depend on annotation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoverageReport {
    pub grammar: String,
    pub total: usize,
    /// Matched constructs with every occurrence.
    pub matched: BTreeMap<ConstructName, Vec<SourceLocation>>,
    pub unmatched: BTreeSet<ConstructName>,
    pub orphans: Vec<Orphan>,
}

impl CoverageReport {
    pub fn matched_count(&self) -> usize {
        self.matched.len()
    }

    /// Every construct matched and no orphan annotations.
    pub fn is_complete(&self) -> bool {
        self.unmatched.is_empty() && self.orphans.is_empty()
    }

    /// Combine reports computed against the same grammar from disjoint
    /// fixture sets. Equals the report of the concatenated annotations.
    pub fn merge(mut self, other: CoverageReport) -> CoverageReport {
        debug_assert_eq!(self.grammar, other.grammar);
        debug_assert_eq!(self.total, other.total);

        for (name, locations) in other.matched {
            let entry = self.matched.entry(name).or_default();
            entry.extend(locations);
            entry.sort();
        }
        self.unmatched = self
            .unmatched
            .intersection(&other.unmatched)
            .cloned()
            .collect();
        self.orphans.extend(other.orphans);
        self.orphans.sort();
        self
    }
}

/// Compute coverage of `spec` by `annotations`. Pure and order-independent.
#[tracing::instrument(skip_all, fields(grammar = spec.origin(), annotations = annotations.len()))]
pub fn compute_coverage(spec: &GrammarSpec, annotations: &[Annotation]) -> CoverageReport {
    let mut matched: BTreeMap<ConstructName, Vec<SourceLocation>> = BTreeMap::new();
    let mut orphans = Vec::new();

    for annotation in annotations {
        if spec.contains(annotation.name.as_str()) {
            matched
                .entry(annotation.name.clone())
                .or_default()
                .push(annotation.location.clone());
        } else {
            orphans.push(Orphan {
                name: annotation.name.clone(),
                location: annotation.location.clone(),
                suggestion: closest_construct(spec, annotation.name.as_str()),
            });
        }
    }
    for locations in matched.values_mut() {
        locations.sort();
    }
    orphans.sort();

    let unmatched: BTreeSet<ConstructName> = spec
        .iter()
        .filter(|name| !matched.contains_key(name.as_str()))
        .cloned()
        .collect();

    tracing::debug!(
        matched = matched.len(),
        unmatched = unmatched.len(),
        orphans = orphans.len(),
        "computed coverage"
    );

    CoverageReport {
        grammar: spec.origin().to_string(),
        total: spec.len(),
        matched,
        unmatched,
        orphans,
    }
}
