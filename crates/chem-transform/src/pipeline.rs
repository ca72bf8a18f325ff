//! Batch processing of input files.
//!
//! Files are processed in the order given and rows in file order, so the
//! sink receives entities in input order. An unsupported or unreadable file
//! is skipped with an error diagnostic; the batch always continues.

use std::path::{Path, PathBuf};
use std::time::Instant;

use chem_ingest::{TableReader, file_extension, is_supported};
use chem_model::{
    ChemicalSink, Diagnostic, DiagnosticCode, DiagnosticLog, ParserProfile, Severity,
};
use tracing::{debug, error, info, info_span, warn};

use crate::row::RowTransformer;

/// How far processing of a file got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileStatus {
    Processed,
    Unsupported,
    Unreadable,
}

impl FileStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Unsupported => "unsupported",
            Self::Unreadable => "unreadable",
        }
    }
}

/// Outcome of one input file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub path: PathBuf,
    pub status: FileStatus,
    pub rows_read: usize,
    pub entities_emitted: usize,
    pub rows_dropped: usize,
    /// Diagnostics in input order.
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    fn new(path: &Path, status: FileStatus) -> Self {
        Self {
            path: path.to_path_buf(),
            status,
            rows_read: 0,
            entities_emitted: 0,
            rows_dropped: 0,
            diagnostics: Vec::new(),
        }
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.severity == severity)
            .count()
    }
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
}

impl BatchReport {
    /// All diagnostics of the batch, file by file.
    pub fn diagnostics(&self) -> DiagnosticLog {
        let mut log = DiagnosticLog::new();
        for file in &self.files {
            log.extend(file.diagnostics.iter().cloned());
        }
        log
    }

    pub fn entities_emitted(&self) -> usize {
        self.files.iter().map(|file| file.entities_emitted).sum()
    }

    pub fn rows_dropped(&self) -> usize {
        self.files.iter().map(|file| file.rows_dropped).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.files
            .iter()
            .any(|file| file.diagnostics.iter().any(Diagnostic::is_error))
    }
}

/// Runs the row transformer over a list of files.
#[derive(Debug)]
pub struct BatchPipeline<'a, R> {
    profile: &'a ParserProfile,
    reader: R,
    transformer: RowTransformer<'a>,
}

impl<'a, R: TableReader> BatchPipeline<'a, R> {
    pub fn new(profile: &'a ParserProfile, reader: R) -> Self {
        Self {
            profile,
            reader,
            transformer: RowTransformer::new(profile),
        }
    }

    /// Process `files` in order, offering every completed entity to `sink`.
    pub fn run(&self, files: &[PathBuf], sink: &mut impl ChemicalSink) -> BatchReport {
        let start = Instant::now();
        let mut report = BatchReport::default();
        for path in files {
            report.files.push(self.process_file(path, sink));
        }
        info!(
            file_count = report.files.len(),
            entities = report.entities_emitted(),
            rows_dropped = report.rows_dropped(),
            duration_ms = start.elapsed().as_millis(),
            "batch complete"
        );
        report
    }

    /// Process a single file. Never fails; failures are recorded in the report.
    pub fn process_file(&self, path: &Path, sink: &mut impl ChemicalSink) -> FileReport {
        let source_file = path.display().to_string();
        let span = info_span!("process_file", source_file = %source_file);
        let _guard = span.enter();
        let start = Instant::now();

        if !is_supported(path, &self.profile.files) {
            let extension = file_extension(path).unwrap_or_default();
            let diagnostic = Diagnostic::new(
                DiagnosticCode::UnsupportedFormat,
                format!("unsupported file format '{extension}', file skipped"),
            )
            .with_file(path);
            return finish(FileReport::new(path, FileStatus::Unsupported), vec![diagnostic]);
        }

        let table = match self.reader.read_table(path) {
            Ok(table) => table,
            Err(err) => {
                let diagnostic = Diagnostic::new(DiagnosticCode::UnreadableFile, err.to_string())
                    .with_file(path);
                return finish(FileReport::new(path, FileStatus::Unreadable), vec![diagnostic]);
            }
        };

        let mut report = FileReport::new(path, FileStatus::Processed);
        let mut diagnostics = Vec::new();
        for row in &table.rows {
            report.rows_read += 1;
            let (chemical, row_diagnostics) = self.transformer.transform(row).into_parts();
            match chemical {
                Some(chemical) => {
                    sink.add(chemical);
                    report.entities_emitted += 1;
                }
                None => report.rows_dropped += 1,
            }
            diagnostics.extend(
                row_diagnostics
                    .into_iter()
                    .map(|diagnostic| diagnostic.with_file(path)),
            );
        }
        debug!(
            rows_read = report.rows_read,
            entities = report.entities_emitted,
            rows_dropped = report.rows_dropped,
            duration_ms = start.elapsed().as_millis(),
            "file processed"
        );
        finish(report, diagnostics)
    }
}

fn finish(mut report: FileReport, diagnostics: Vec<Diagnostic>) -> FileReport {
    for diagnostic in &diagnostics {
        emit(diagnostic);
    }
    report.diagnostics = diagnostics;
    report
}

/// Forward a diagnostic to the log at its severity.
pub fn emit(diagnostic: &Diagnostic) {
    let code = diagnostic.code.id();
    let file = diagnostic
        .file
        .as_deref()
        .map(|path| path.display().to_string())
        .unwrap_or_default();
    let row = diagnostic.row.unwrap_or_default();
    let handling_id = diagnostic.handling_id.as_deref().unwrap_or_default();
    let column = diagnostic.column.as_deref().unwrap_or_default();
    match diagnostic.severity {
        Severity::Error => error!(
            code, file = %file, row, handling_id, column,
            "{}", diagnostic.message
        ),
        Severity::Warning => warn!(
            code, file = %file, row, handling_id, column,
            "{}", diagnostic.message
        ),
        Severity::Info => info!(
            code, file = %file, row, handling_id, column,
            "{}", diagnostic.message
        ),
    }
}
