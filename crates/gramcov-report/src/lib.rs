//! Coverage computation and report rendering.

mod coverage;
mod render;
mod suggest;

pub use coverage::{compute_coverage, CoverageReport, Orphan};
pub use render::{format, format_with, to_json, FormatOptions, Rendered};
