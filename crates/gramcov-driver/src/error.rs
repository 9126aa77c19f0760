use gramcov_common::MalformedSpec;
use gramcov_config::ConfigError;
use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors of a coverage run. None are retried.
#[derive(Debug, Error, Diagnostic)]
pub enum CoverageError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedSpec(#[from] MalformedSpec),

    #[error("failed to read grammar spec {}", path.display())]
    #[diagnostic(code(gramcov::grammar::read))]
    GrammarRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read fixture {}", path.display())]
    #[diagnostic(
        code(gramcov::fixture::read),
        help("every listed fixture must exist and be readable")
    )]
    FixtureRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

impl CoverageError {
    /// Process exit code: 2 for a malformed grammar spec, 3 for any other fatal input error.
    pub fn exit_code(&self) -> u8 {
        match self {
            CoverageError::MalformedSpec(_) => 2,
            _ => 3,
        }
    }
}
