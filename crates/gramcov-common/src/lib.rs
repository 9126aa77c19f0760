mod span;
mod construct;
mod source;
mod syntax;
mod error;

pub use span::{Span, Spanned};
pub use construct::{
    is_ident_continue, is_ident_start, is_identifier, Annotation, ConstructName, SourceLocation,
};
pub use source::{LineIndex, SourceFile, SourceId, SourceMap};
pub use syntax::{CommentSyntax, Quote, QuoteKind, SyntaxTable};
pub use error::MalformedSpec;
