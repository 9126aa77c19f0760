//! Property tests for grammar spec loading.

use gramcov_common::MalformedSpec;
use gramcov_grammar::GrammarSpec;
use proptest::prelude::*;

proptest! {
    /// Re-serializing a loaded spec and loading it again yields the same set.
    #[test]
    fn text_round_trip(names in prop::collection::btree_set("[a-z_][a-z0-9_]{0,16}", 1..40)) {
        let source: String = names.iter().map(|n| format!("  {n}\n\n")).collect();
        let spec = GrammarSpec::parse("grammar.txt", &source).unwrap();
        prop_assert_eq!(spec.len(), names.len());

        let reloaded = GrammarSpec::parse("grammar.txt", &spec.to_text()).unwrap();
        prop_assert_eq!(&spec, &reloaded);
        for name in &names {
            prop_assert!(reloaded.contains(name));
        }
    }

    /// Declaring any name twice is rejected, wherever the repeat appears.
    #[test]
    fn duplicates_are_rejected(
        names in prop::collection::btree_set("[a-z]{1,10}", 1..20),
        pick in any::<prop::sample::Index>(),
    ) {
        let names: Vec<&String> = names.iter().collect();
        let repeated = names[pick.index(names.len())];
        let mut source: String = names.iter().map(|n| format!("{n}\n")).collect();
        source.push_str(repeated);

        match GrammarSpec::parse("grammar.txt", &source) {
            Err(MalformedSpec::Duplicate { name, line, .. }) => {
                prop_assert_eq!(&name, repeated);
                prop_assert_eq!(line, Some(names.len() + 1));
            }
            other => prop_assert!(false, "expected duplicate, got {:?}", other),
        }
    }
}
