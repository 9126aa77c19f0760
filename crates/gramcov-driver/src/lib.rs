mod error;

pub use error::CoverageError;

use gramcov_common::{Annotation, SourceFile, SourceId, SourceMap, SyntaxTable};
use gramcov_grammar::{BuiltinGrammar, GrammarSpec};
use gramcov_report::{compute_coverage, CoverageReport};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub type Result<T> = std::result::Result<T, CoverageError>;

/// Where a run's grammar spec comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarSource {
    File(PathBuf),
    Builtin(BuiltinGrammar),
}

/// Coverage driver that orchestrates a run: grammar, fixtures, report.
pub struct Driver {
    source_map: SourceMap,
    jobs: usize,
}

impl Driver {
    pub fn new() -> Self {
        Self::with_syntaxes(SyntaxTable::default())
    }

    pub fn with_syntaxes(syntaxes: SyntaxTable) -> Self {
        Self {
            source_map: SourceMap::with_syntaxes(syntaxes),
            jobs: std::thread::available_parallelism().map_or(1, NonZeroUsize::get),
        }
    }

    /// Worker threads used to scan fixtures; `1` scans sequentially.
    pub fn with_jobs(mut self, jobs: usize) -> Self {
        self.jobs = jobs.max(1);
        self
    }

    /// Load the grammar spec. Fails before any fixture is touched.
    pub fn load_grammar(&self, source: &GrammarSource) -> Result<GrammarSpec> {
        match source {
            GrammarSource::File(path) => {
                let content =
                    std::fs::read_to_string(path).map_err(|source| CoverageError::GrammarRead {
                        path: path.clone(),
                        source,
                    })?;
                Ok(GrammarSpec::parse(path.display().to_string(), &content)?)
            }
            GrammarSource::Builtin(grammar) => Ok(GrammarSpec::builtin(*grammar)),
        }
    }

    /// Read and register a fixture. Bytes that are not UTF-8 are replaced.
    /// A path that is already registered is not read again.
    pub fn add_fixture(&self, path: impl AsRef<Path>) -> Result<SourceId> {
        let path = path.as_ref();
        if let Some(file) = self.source_map.get_by_path(path) {
            tracing::debug!(fixture = %path.display(), "fixture already registered");
            return Ok(file.id);
        }
        let bytes = std::fs::read(path).map_err(|source| CoverageError::FixtureRead {
            path: path.to_path_buf(),
            source,
        })?;
        let content = String::from_utf8_lossy(&bytes).into_owned();
        tracing::debug!(fixture = %path.display(), bytes = bytes.len(), "read fixture");
        Ok(self.source_map.add_file(path, content))
    }

    /// Read every fixture, then compute coverage of `spec`.
    ///
    /// All fixtures are read before scanning starts, so an unreadable path
    /// aborts the run without a partial report. Repeated paths are scanned once.
    #[tracing::instrument(skip_all, fields(grammar = spec.origin(), fixtures = fixtures.len()))]
    pub fn check<P: AsRef<Path>>(
        &self,
        spec: &GrammarSpec,
        fixtures: &[P],
    ) -> Result<CoverageReport> {
        let mut ids: Vec<SourceId> = Vec::with_capacity(fixtures.len());
        for path in fixtures {
            let id = self.add_fixture(path)?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        let files: Vec<Arc<SourceFile>> =
            ids.iter().filter_map(|&id| self.source_map.get(id)).collect();
        let report = self.scan_all(spec, &files);
        tracing::info!(
            matched = report.matched_count(),
            total = report.total,
            orphans = report.orphans.len(),
            "coverage computed"
        );
        Ok(report)
    }

    /// Run a whole check from a grammar source.
    pub fn run<P: AsRef<Path>>(
        &self,
        grammar: &GrammarSource,
        fixtures: &[P],
    ) -> Result<CoverageReport> {
        let spec = self.load_grammar(grammar)?;
        self.check(&spec, fixtures)
    }

    /// Scan files, splitting them across workers. Per-worker reports merge
    /// by set union, so the result does not depend on the split.
    fn scan_all(&self, spec: &GrammarSpec, files: &[Arc<SourceFile>]) -> CoverageReport {
        let workers = self.jobs.min(files.len());
        if workers <= 1 {
            return compute_coverage(spec, &collect_annotations(files));
        }

        let chunk_size = files.len().div_ceil(workers);
        tracing::debug!(workers, chunk_size, "scanning fixtures in parallel");
        std::thread::scope(|scope| {
            let handles: Vec<_> = files
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move || compute_coverage(spec, &collect_annotations(chunk)))
                })
                .collect();

            let mut reports = handles.into_iter().map(|handle| match handle.join() {
                Ok(report) => report,
                Err(panic) => std::panic::resume_unwind(panic),
            });
            let first = reports.next().unwrap_or_else(|| compute_coverage(spec, &[]));
            reports.fold(first, CoverageReport::merge)
        })
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

fn collect_annotations(files: &[Arc<SourceFile>]) -> Vec<Annotation> {
    files
        .iter()
        .flat_map(|file| gramcov_scan::annotations_for(file))
        .collect()
}
