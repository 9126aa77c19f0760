use gramcov_common::ConstructName;
use gramcov_grammar::GrammarSpec;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const MIN_SIMILARITY: f64 = 0.85;

/// Closest declared construct to an unknown name.
///
/// Ties go to the lexicographically smaller name so reports stay
/// deterministic.
pub(crate) fn closest_construct(spec: &GrammarSpec, name: &str) -> Option<ConstructName> {
    let mut best: Option<(f64, &ConstructName)> = None;
    for candidate in spec.iter() {
        let score = strsim::jaro_winkler(name, candidate.as_str());
        if score < MIN_SIMILARITY {
            continue;
        }
        best = match best {
            Some((best_score, best_name))
                if best_score > score || (best_score == score && best_name <= candidate) =>
            {
                Some((best_score, best_name))
            }
            _ => Some((score, candidate)),
        };
    }
    best.map(|(_, name)| name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> GrammarSpec {
        let names = "statement_block\nswitch_statement\nfor_in_statement\npair\n";
        GrammarSpec::parse("g.txt", names).unwrap()
    }

    #[test]
    fn test_suggests_typo_fix() {
        let suggestion = closest_construct(&spec(), "statment_block");
        assert_eq!(suggestion.as_ref().map(ConstructName::as_str), Some("statement_block"));
    }

    #[test]
    fn test_no_suggestion_for_unrelated_name() {
        assert_eq!(closest_construct(&spec(), "jsx_self_closing_element"), None);
    }
}
