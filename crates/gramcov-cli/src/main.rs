use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use gramcov_config::{CoverageConfig, ReportFormat};
use gramcov_driver::{CoverageError, Driver, GrammarSource};
use gramcov_grammar::BuiltinGrammar;
use gramcov_report::FormatOptions;
use miette::{IntoDiagnostic, Result};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "check-coverage")]
#[command(
    author,
    version,
    about = "Check that annotated fixtures exercise every construct of a grammar"
)]
struct Cli {
    /// Grammar spec: one construct name per line, a JSON list, or a tree-sitter node-types.json
    #[arg(long, value_name = "SPEC_FILE", conflicts_with = "builtin")]
    grammar: Option<PathBuf>,

    /// Use a tree-sitter grammar linked into the binary (rust, cpp, go, typescript, tsx)
    #[arg(long, value_name = "LANGUAGE")]
    builtin: Option<BuiltinGrammar>,

    /// Fixture files to scan for construct annotations
    #[arg(value_name = "FIXTURE")]
    fixtures: Vec<PathBuf>,

    /// Report format
    #[arg(long)]
    format: Option<Format>,

    /// List matched constructs and log progress
    #[arg(short, long)]
    verbose: bool,

    /// Worker threads for scanning fixtures
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    jobs: Option<u16>,

    /// Configuration file (default: ./gramcov.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Format {
    /// Human-readable text
    Text,
    /// Pretty-printed JSON
    Json,
}

impl From<ReportFormat> for Format {
    fn from(format: ReportFormat) -> Self {
        match format {
            ReportFormat::Text => Format::Text,
            ReportFormat::Json => Format::Json,
        }
    }
}

fn main() -> ExitCode {
    let _ = miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }));

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(report) => {
            let code = report
                .downcast_ref::<CoverageError>()
                .map_or(3, CoverageError::exit_code);
            eprintln!("{report:?}");
            ExitCode::from(code)
        }
    }
}

/// Structured logs go to stderr; stdout carries only the report.
fn init_tracing(verbose: bool) {
    let default = if verbose { "info" } else { "warn" };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Returns whether coverage is complete.
fn run(cli: Cli) -> Result<bool> {
    let config = load_config(cli.config.as_deref())?;

    let grammar = match (cli.grammar, cli.builtin) {
        (Some(path), _) => GrammarSource::File(path),
        (None, Some(builtin)) => GrammarSource::Builtin(builtin),
        (None, None) => match (config.grammar.path.clone(), config.grammar.builtin) {
            (Some(path), _) => GrammarSource::File(path),
            (None, Some(builtin)) => GrammarSource::Builtin(builtin),
            (None, None) => usage_error(
                ErrorKind::MissingRequiredArgument,
                "a grammar is required: pass --grammar <SPEC_FILE> or --builtin <LANGUAGE>",
            ),
        },
    };

    let fixtures = if cli.fixtures.is_empty() {
        config.fixtures.clone()
    } else {
        cli.fixtures
    };
    if fixtures.is_empty() {
        usage_error(
            ErrorKind::MissingRequiredArgument,
            "at least one <FIXTURE> is required",
        );
    }

    let syntaxes = config.syntax_table().map_err(CoverageError::from)?;
    let mut driver = Driver::with_syntaxes(syntaxes);
    if let Some(jobs) = cli.jobs.map(usize::from).or(config.scan.jobs) {
        driver = driver.with_jobs(jobs);
    }

    let spec = driver.load_grammar(&grammar)?;
    tracing::info!(
        grammar = spec.origin(),
        constructs = spec.len(),
        fixtures = fixtures.len(),
        "checking coverage"
    );
    let report = driver.check(&spec, &fixtures)?;

    let verbose = cli.verbose || config.report.verbose;
    match cli.format.unwrap_or_else(|| config.report.format.into()) {
        Format::Text => print!("{}", report.render(FormatOptions { verbose })),
        Format::Json => println!("{}", gramcov_report::to_json(&report).into_diagnostic()?),
    }

    Ok(report.is_complete())
}

fn load_config(path: Option<&Path>) -> Result<CoverageConfig> {
    let config = match path {
        Some(path) => CoverageConfig::from_file(path).map_err(CoverageError::from)?,
        None => CoverageConfig::discover(Path::new("."))
            .map_err(CoverageError::from)?
            .unwrap_or_default(),
    };
    Ok(config)
}

fn usage_error(kind: ErrorKind, message: &str) -> ! {
    Cli::command().error(kind, message).exit()
}
