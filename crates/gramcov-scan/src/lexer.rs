//! Lexical scan for construct markers.
//!
//! The lexer tracks just enough of the source language to know whether a
//! comment prefix is really the start of a line comment. String literals
//! (raw, triple-quoted and templated ones included) and block comments are
//! skipped, and identifiers are consumed whole so that a prefix such as
//! `r#` or `R` can open a raw string. Everything else is opaque code.

use gramcov_common::{
    is_ident_continue, is_ident_start, CommentSyntax, ConstructName, Quote, QuoteKind,
};

/// A construct name found in a line comment, with its byte range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub name: ConstructName,
    pub start: u32,
    pub end: u32,
}

/// Longest escape accepted inside a char literal, e.g. `'\u{10FFFF}'`.
const MAX_CHAR_LITERAL: usize = 12;

struct Interpolation {
    /// Delimiter of the enclosing template.
    delim: char,
    /// Unclosed `{` inside the interpolation.
    depth: usize,
}

pub struct Lexer<'a> {
    text: &'a str,
    syntax: &'a CommentSyntax,
    pos: usize,
    /// Open `${...}` interpolations, innermost last.
    interpolations: Vec<Interpolation>,
    markers: Vec<Marker>,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str, syntax: &'a CommentSyntax) -> Self {
        Self {
            text,
            syntax,
            pos: 0,
            interpolations: Vec::new(),
            markers: Vec::new(),
        }
    }

    pub fn run(mut self) -> Vec<Marker> {
        let (text, syntax) = (self.text, self.syntax);
        while let Some(c) = self.peek() {
            let rest = &text[self.pos..];

            if !syntax.line_comment.is_empty() && rest.starts_with(syntax.line_comment.as_str()) {
                self.line_comment();
                continue;
            }
            if let Some((open, close)) = &syntax.block_comment {
                if !open.is_empty() && rest.starts_with(open.as_str()) {
                    self.block_comment(open, close);
                    continue;
                }
            }
            if let Some(quote) = syntax.quote(c) {
                self.pos += c.len_utf8();
                self.quoted(quote);
                continue;
            }
            if let Some(end) = identifier_end(text, self.pos) {
                let word = &text[self.pos..end];
                self.pos = end;
                if let Some(quote) = syntax.prefixed_quote(word) {
                    self.prefixed(quote);
                }
                continue;
            }

            self.pos += c.len_utf8();
            match c {
                '{' => {
                    if let Some(open) = self.interpolations.last_mut() {
                        open.depth += 1;
                    }
                }
                '}' => match self.interpolations.last_mut() {
                    Some(open) if open.depth == 0 => {
                        let delim = open.delim;
                        self.interpolations.pop();
                        self.template_body(delim);
                    }
                    Some(open) => open.depth -= 1,
                    None => {}
                },
                _ => {}
            }
        }
        self.markers
    }

    fn peek(&self) -> Option<char> {
        self.text[self.pos..].chars().next()
    }

    /// Collect the leading `ident (, ident)*` list of a line comment.
    fn line_comment(&mut self) {
        let body_start = self.pos + self.syntax.line_comment.len();
        let line_end = self.text[body_start..]
            .find('\n')
            .map_or(self.text.len(), |i| body_start + i);
        self.pos = line_end;

        let body = &self.text[body_start..line_end];
        let mut cursor = skip_blanks(body, 0);
        loop {
            let Some(end) = identifier_end(body, cursor) else {
                break;
            };
            self.markers.push(Marker {
                name: ConstructName::new(&body[cursor..end]),
                start: (body_start + cursor) as u32,
                end: (body_start + end) as u32,
            });

            cursor = skip_blanks(body, end);
            if !body[cursor..].starts_with(',') {
                break;
            }
            cursor = skip_blanks(body, cursor + 1);
        }
    }

    /// Skip a block comment starting at `self.pos`. Unterminated comments run to EOF.
    fn block_comment(&mut self, open: &str, close: &str) {
        self.pos += open.len();
        let mut depth = 1usize;
        while depth > 0 {
            let rest = &self.text[self.pos..];
            let next_close = rest.find(close);
            let next_open = if self.syntax.nested_block_comments {
                rest.find(open)
            } else {
                None
            };
            match (next_open, next_close) {
                (Some(o), Some(c)) if o < c => {
                    depth += 1;
                    self.pos += o + open.len();
                }
                (_, Some(c)) => {
                    depth -= 1;
                    self.pos += c + close.len();
                }
                (_, None) => {
                    self.pos = self.text.len();
                    return;
                }
            }
        }
    }

    /// Skip a quoted literal; `self.pos` is just past the opening delimiter.
    fn quoted(&mut self, quote: Quote) {
        match quote.kind {
            QuoteKind::Escaped => self.escaped(quote.delim),
            QuoteKind::Raw => {
                self.pos = match self.text[self.pos..].find(quote.delim) {
                    Some(i) => self.pos + i + quote.delim.len_utf8(),
                    None => self.text.len(),
                };
            }
            QuoteKind::Template => self.template_body(quote.delim),
            QuoteKind::Char => self.char_literal(quote.delim),
            QuoteKind::Triple => {
                let delim = quote.delim;
                let opener: String = [delim, delim].iter().collect();
                if self.text[self.pos..].starts_with(opener.as_str()) {
                    self.pos += 2 * delim.len_utf8();
                    self.triple(delim);
                } else {
                    self.escaped(delim);
                }
            }
            // Only opened through a prefix.
            QuoteKind::Hashed | QuoteKind::Parenthesized => self.escaped(quote.delim),
        }
    }

    /// A literal opened by a prefix word; `self.pos` is just past the word.
    /// If what follows is not a literal, nothing is consumed.
    fn prefixed(&mut self, quote: Quote) {
        let rest = &self.text[self.pos..];
        let closing = match quote.kind {
            QuoteKind::Hashed => {
                let hashes = rest.len() - rest.trim_start_matches('#').len();
                if !rest[hashes..].starts_with(quote.delim) {
                    return;
                }
                self.pos += hashes + quote.delim.len_utf8();
                format!("{}{}", quote.delim, "#".repeat(hashes))
            }
            QuoteKind::Parenthesized => {
                let Some(body) = rest.strip_prefix(quote.delim) else {
                    return;
                };
                let Some(tag_len) = raw_tag_len(body) else {
                    // Not a raw string after all: lex it as a plain one.
                    self.pos += quote.delim.len_utf8();
                    self.escaped(quote.delim);
                    return;
                };
                self.pos += quote.delim.len_utf8() + tag_len + 1;
                format!("){}{}", &body[..tag_len], quote.delim)
            }
            _ => {
                if rest.starts_with(quote.delim) {
                    self.pos += quote.delim.len_utf8();
                    self.quoted(quote);
                }
                return;
            }
        };
        self.pos = match self.text[self.pos..].find(closing.as_str()) {
            Some(i) => self.pos + i + closing.len(),
            None => self.text.len(),
        };
    }

    /// Ends at the next tripled delimiter; may span lines.
    fn triple(&mut self, delim: char) {
        let closing: String = [delim; 3].iter().collect();
        let mut chars = self.text[self.pos..].char_indices();
        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                chars.next();
            } else if c == delim && self.text[self.pos + i..].starts_with(closing.as_str()) {
                self.pos += i + closing.len();
                return;
            }
        }
        self.pos = self.text.len();
    }

    /// Ends at the closing delimiter, or before an unescaped newline.
    fn escaped(&mut self, delim: char) {
        let mut chars = self.text[self.pos..].char_indices();
        while let Some((i, c)) = chars.next() {
            if c == '\\' {
                chars.next();
            } else if c == delim {
                self.pos += i + c.len_utf8();
                return;
            } else if c == '\n' {
                self.pos += i;
                return;
            }
        }
        self.pos = self.text.len();
    }

    /// Scan template text up to the closing delimiter or the next `${`.
    fn template_body(&mut self, delim: char) {
        let mut chars = self.text[self.pos..].char_indices().peekable();
        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => {
                    chars.next();
                }
                c if c == delim => {
                    self.pos += i + c.len_utf8();
                    return;
                }
                '$' if matches!(chars.peek(), Some((_, '{'))) => {
                    self.pos += i + 2;
                    self.interpolations.push(Interpolation { delim, depth: 0 });
                    return;
                }
                _ => {}
            }
        }
        self.pos = self.text.len();
    }

    /// `'x'` and `'\n'` are skipped; anything else (a lifetime) leaves the quote as code.
    fn char_literal(&mut self, delim: char) {
        let rest = &self.text[self.pos..];
        let mut chars = rest.char_indices();
        let end = match chars.next() {
            Some((_, '\\')) => rest
                .char_indices()
                .skip(2)
                .take_while(|&(i, c)| i < MAX_CHAR_LITERAL && c != '\n')
                .find(|&(_, c)| c == delim)
                .map(|(i, c)| i + c.len_utf8()),
            Some((_, c)) if c != delim && c != '\n' => match chars.next() {
                Some((i, close)) if close == delim => Some(i + close.len_utf8()),
                _ => None,
            },
            _ => None,
        };
        if let Some(end) = end {
            self.pos += end;
        }
    }
}

/// Length of a C++ raw string tag, if `body` starts with `tag(`.
fn raw_tag_len(body: &str) -> Option<usize> {
    const MAX_TAG: usize = 16;
    let end = body.find('(')?;
    let tag = &body[..end];
    let valid = tag.len() <= MAX_TAG
        && !tag.contains(|c: char| c.is_whitespace() || matches!(c, ')' | '\\' | '"'));
    valid.then_some(end)
}

fn skip_blanks(s: &str, from: usize) -> usize {
    s[from..]
        .find(|c: char| c != ' ' && c != '\t' && c != '\r')
        .map_or(s.len(), |i| from + i)
}

/// End of the identifier starting at `from`, if one starts there.
fn identifier_end(s: &str, from: usize) -> Option<usize> {
    let mut chars = s[from..].char_indices();
    match chars.next() {
        Some((_, c)) if is_ident_start(c) => {}
        _ => return None,
    }
    let len = chars
        .find(|&(_, c)| !is_ident_continue(c))
        .map_or(s.len() - from, |(i, _)| i);
    Some(from + len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(text: &str, syntax: &CommentSyntax) -> Vec<String> {
        Lexer::new(text, syntax)
            .run()
            .into_iter()
            .map(|m| m.name.to_string())
            .collect()
    }

    fn js(text: &str) -> Vec<String> {
        names(text, &CommentSyntax::javascript())
    }

    #[test]
    fn test_leading_identifier_list() {
        assert_eq!(
            js("// if_statement, statement_block\nif (x) {}"),
            ["if_statement", "statement_block"]
        );
        assert_eq!(js("//   a ,b,  c\n"), ["a", "b", "c"]);
    }

    #[test]
    fn test_list_stops_at_first_non_identifier() {
        assert_eq!(js("// array_pattern (destructuring)"), ["array_pattern"]);
        assert_eq!(js("// Fast path: check"), ["Fast"]);
        assert_eq!(js("// a, (b)"), ["a"]);
        assert_eq!(js("// a,"), ["a"]);
    }

    #[test]
    fn test_non_marker_comments() {
        assert!(js("// --- Types & Interfaces ---").is_empty());
        assert!(js("/// doc comment\n//! inner doc").is_empty());
        assert!(js("//").is_empty());
    }

    #[test]
    fn test_trailing_comment_after_code() {
        let text = r#"import React, { useState } from "react"; // import_statement, named_imports"#;
        assert_eq!(js(text), ["import_statement", "named_imports"]);
    }

    #[test]
    fn test_marker_offsets() {
        let markers = Lexer::new("x;\n// pair, array", &CommentSyntax::javascript()).run();
        assert_eq!((markers[0].start, markers[0].end), (6, 10));
        assert_eq!((markers[1].start, markers[1].end), (12, 17));
    }

    #[test]
    fn test_strings_hide_comment_prefixes() {
        assert!(js(r#"const url = "http://example.com";"#).is_empty());
        assert!(js(r#"const s = 'it\'s // not_a_marker';"#).is_empty());
        assert_eq!(js("const s = \"a\\\"b\"; // pair"), ["pair"]);
    }

    #[test]
    fn test_unterminated_string_ends_at_newline() {
        assert_eq!(js("const s = \"oops\n// object"), ["object"]);
    }

    #[test]
    fn test_templates() {
        assert!(js("const t = `line\n// not_a_marker\n`;").is_empty());
        assert_eq!(js("const t = `Master ${\"Yoda\"}`; // template_string"), ["template_string"]);
        assert_eq!(js("const t = `${ {a: 1}.a } // inside`; // after"), ["after"]);
        assert_eq!(js("`${ `${x}` } // nested`\n// outer"), ["outer"]);
    }

    #[test]
    fn test_comment_inside_interpolation_is_code() {
        assert_eq!(js("`${ x // interp_marker\n}` // after"), ["interp_marker", "after"]);
    }

    #[test]
    fn test_block_comments_are_skipped() {
        assert!(js("<div /* jsx_attribute */>").is_empty());
        assert!(js("{/* jsx_expression */}").is_empty());
        assert!(js("/* multi\n// hidden\n*/").is_empty());
        assert!(js("/* unterminated\n// hidden").is_empty());
        assert_eq!(js("/* x */ // pair"), ["pair"]);
    }

    #[test]
    fn test_hash_syntax() {
        let hash = CommentSyntax::hash();
        assert_eq!(names("x = '#nope'  # if_statement, pair\n", &hash), ["if_statement", "pair"]);
        assert!(names("// not a comment here", &hash).is_empty());
    }

    #[test]
    fn test_go_raw_strings() {
        let go = CommentSyntax::go();
        assert!(names("s := `raw\n// hidden\n`", &go).is_empty());
        assert_eq!(names("s := `raw\\` // call_expression", &go), ["call_expression"]);
    }

    #[test]
    fn test_rust_lifetimes_and_chars() {
        let rust = CommentSyntax::rust();
        assert_eq!(names("fn f<'a>(x: &'a str) {} // function_item", &rust), ["function_item"]);
        assert_eq!(names("let q = '\"'; // char_literal", &rust), ["char_literal"]);
        assert_eq!(names("let n = '\\n'; // let_declaration", &rust), ["let_declaration"]);
        assert_eq!(names("let u = '\\u{1F600}'; // unicode", &rust), ["unicode"]);
    }

    #[test]
    fn test_rust_raw_strings() {
        let rust = CommentSyntax::rust();
        assert!(names(r##"let s = r#"a " // fake"#;"##, &rust).is_empty());
        assert_eq!(names(r##"let s = r#"a"b"#; // function_item"##, &rust), ["function_item"]);
        let text = "let s = r\"C:\\\"; // raw_string_literal";
        assert_eq!(names(text, &rust), ["raw_string_literal"]);
        assert!(names("let s = br##\"\n// hidden \"# still\n\"##;", &rust).is_empty());
        assert!(names("let s = r#\"unterminated\n// hidden", &rust).is_empty());
    }

    #[test]
    fn test_rust_raw_identifier_is_code() {
        let rust = CommentSyntax::rust();
        assert_eq!(names("let r#type = 1; // let_declaration", &rust), ["let_declaration"]);
        assert_eq!(names("let b = b'x'; // char_literal", &rust), ["char_literal"]);
    }

    #[test]
    fn test_rust_nested_block_comments() {
        let rust = CommentSyntax::rust();
        assert!(names("/* outer /* inner */ // fake */", &rust).is_empty());
        assert_eq!(names("/* a /* b */ c */ // block_comment", &rust), ["block_comment"]);
        assert!(names("/* /* */ unterminated\n// hidden", &rust).is_empty());
        // Without nesting the first `*/` closes the comment.
        assert_eq!(js("/* a /* b */ // after */"), ["after"]);
    }

    #[test]
    fn test_cpp_raw_strings() {
        let cpp = CommentSyntax::cpp();
        assert!(names(r#"auto s = R"(a " // fake)";"#, &cpp).is_empty());
        assert_eq!(names(r#"auto s = u8R"x(a )" b)x"; // declaration"#, &cpp), ["declaration"]);
        assert!(names("auto s = R\"(\n// hidden\n)\";", &cpp).is_empty());
        let text = r#"int R = 1; auto s = "R"; // expression_statement"#;
        assert_eq!(names(text, &cpp), ["expression_statement"]);
    }

    #[test]
    fn test_python_triple_quotes() {
        let py = CommentSyntax::python();
        assert!(names("def f():\n    \"\"\"Doc.\n    # fake\n    \"\"\"\n", &py).is_empty());
        assert!(names("s = \'\'\'\n# fake\n\'\'\'", &py).is_empty());
        assert_eq!(names("s = \"\"  # string\n", &py), ["string"]);
        assert_eq!(names("s = \"\"\"a\"\"\"  # string, call\n", &py), ["string", "call"]);
        assert!(names("s = \"\"\"unterminated\n# hidden", &py).is_empty());
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert!(js("").is_empty());
        assert!(js("  \n\t\n").is_empty());
    }
}
