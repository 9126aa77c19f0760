//! Extraction over the TSX grammar fixture shipped in `fixtures/`.

use gramcov_scan::extract_annotations;

const FIXTURE: &str = include_str!("../../../fixtures/test-jedi.tsx");

fn extracted() -> Vec<(String, u32)> {
    extract_annotations(FIXTURE, "test-jedi.tsx")
        .into_iter()
        .map(|a| (a.name.to_string(), a.location.line))
        .collect()
}

#[test]
fn test_every_marker_in_file_order() {
    let expected = [
        ("import_statement", 1),
        ("named_imports", 1),
        ("type_alias_declaration", 5),
        ("tuple_type", 8),
        ("interface_declaration", 11),
        ("lexical_declaration", 20),
        ("variable_declarator", 20),
        ("assignment_expression", 25),
        ("array_pattern", 28),
        ("object_pattern", 31),
        ("function_declaration", 36),
        ("formal_parameters", 36),
        ("return_statement", 38),
        ("arrow_function", 42),
        ("arguments", 45),
        ("class_declaration", 50),
        ("method_definition", 52),
        ("if_statement", 61),
        ("statement_block", 61),
        ("switch_statement", 66),
        ("try_statement", 72),
        ("throw_statement", 74),
        ("for_statement", 84),
        ("for_in_statement", 87),
        ("while_statement", 91),
        ("do_statement", 96),
        ("object", 104),
        ("pair", 106),
        ("string", 108),
        ("template_string", 110),
        ("array", 112),
        ("expression_statement", 118),
        ("parenthesized_expression", 121),
        ("jsx_element", 128),
        ("jsx_opening_element", 128),
        ("jsx_self_closing_element", 134),
        ("export_statement", 143),
        ("export_clause", 146),
    ];
    let expected: Vec<(String, u32)> = expected.iter().map(|&(n, l)| (n.to_string(), l)).collect();
    assert_eq!(extracted(), expected);
}

#[test]
fn test_block_comment_markers_are_not_annotations() {
    let names: Vec<String> = extracted().into_iter().map(|(n, _)| n).collect();
    assert!(!names.iter().any(|n| n == "jsx_attribute"));
    assert!(!names.iter().any(|n| n == "jsx_expression"));
    assert!(!names.iter().any(|n| n == "comment"));
}

#[test]
fn test_extraction_is_deterministic() {
    assert_eq!(extract_annotations(FIXTURE, "a.tsx"), extract_annotations(FIXTURE, "a.tsx"));
}
