//! Configuration file support for the grammar coverage checker.
//!
//! Command-line flags override anything set here.
//!
//! # Example
//!
//! ```toml
//! # gramcov.toml
//! fixtures = ["fixtures/test-jedi.tsx"]
//!
//! [grammar]
//! path = "fixtures/tsx.grammar"
//!
//! [report]
//! format = "text"
//! verbose = false
//!
//! [scan]
//! jobs = 4
//!
//! [[scan.syntax]]
//! extensions = ["vue"]
//! line_comment = "//"
//! block_comment = ["/*", "*/"]
//! template = "`"
//! ```

mod config;
mod error;

pub use config::{
    CoverageConfig, GrammarConfig, ReportConfig, ReportFormat, ScanConfig, SyntaxConfig,
};
pub use error::{ConfigError, Result};

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_basic_config() {
        let toml = r#"
fixtures = ["a.tsx", "b.tsx"]

[grammar]
builtin = "go"

[report]
format = "json"
verbose = true
        "#;

        let config: CoverageConfig = toml::from_str(toml).expect("Failed to parse config");
        assert_eq!(config.fixtures.len(), 2);
        assert_eq!(config.grammar.builtin, Some(gramcov_grammar::BuiltinGrammar::Go));
        assert_eq!(config.report.format, ReportFormat::Json);
        assert!(config.report.verbose);
    }

    #[test]
    fn test_from_file_resolves_relative_paths() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CoverageConfig::FILE_NAME);
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            "fixtures = [\"fx/a.tsx\", \"/abs/b.tsx\"]\n[grammar]\npath = \"g.txt\""
        )
        .unwrap();

        let config = CoverageConfig::from_file(&path).unwrap();
        assert_eq!(config.grammar.path, Some(dir.path().join("g.txt")));
        assert_eq!(config.fixtures[0], dir.path().join("fx/a.tsx"));
        assert_eq!(config.fixtures[1], std::path::PathBuf::from("/abs/b.tsx"));
    }

    #[test]
    fn test_discover() {
        let dir = TempDir::new().unwrap();
        assert!(CoverageConfig::discover(dir.path()).unwrap().is_none());

        std::fs::write(dir.path().join(CoverageConfig::FILE_NAME), "[scan]\njobs = 2\n").unwrap();
        let config = CoverageConfig::discover(dir.path()).unwrap().unwrap();
        assert_eq!(config.scan.jobs, Some(2));
    }

    #[test]
    fn test_missing_and_invalid_files() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(CoverageConfig::from_file(&missing), Err(ConfigError::Read { .. })));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "fixtures = 3\n").unwrap();
        assert!(matches!(CoverageConfig::from_file(&bad), Err(ConfigError::Parse { .. })));
    }
}
