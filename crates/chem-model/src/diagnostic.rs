//! Leveled, attributable data-quality diagnostics.
//!
//! Diagnostics never mutate entities. Components return them alongside their
//! result and the batch attaches the row, file and handling identifier.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Diagnostic severity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational, no data lost
    Info,
    /// Field degraded or omitted, row still emitted
    Warning,
    /// Row or file dropped
    Error,
}

impl Severity {
    /// Parse severity from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "info" => Some(Self::Info),
            "warning" | "warn" => Some(Self::Warning),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "Info",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of data-quality event, each with a stable short identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DiagnosticCode {
    // File level
    /// Input file extension is not accepted
    UnsupportedFormat,
    /// Input file could not be opened or read
    UnreadableFile,

    // Row level
    /// Mandatory handling identifier is empty
    MissingIdentifier,

    // Product category
    /// Non-empty text without any code token
    UnmappableCategory,
    /// Code tokens found, none in the allow-list
    DisallowedCategory,
    /// Several code tokens found, first allowed one kept
    AmbiguousCategory,

    // Numeric fields
    /// Null input reached the numeric cleaner
    NotText,
    /// No parseable number in the text
    UnrecognizedNumber,
    /// A numeric range was collapsed to zero
    RangeCollapsed,
    /// Parsed value outside the expected closed range
    OutOfRange,

    // Derived fields
    /// Part of a composite field is empty
    MissingCompositePart,
    /// Responsible person name could not be turned into a username
    UnresolvedPerson,
}

impl DiagnosticCode {
    /// Stable identifier used in reports.
    pub fn id(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat => "FILE001",
            Self::UnreadableFile => "FILE002",
            Self::MissingIdentifier => "ROW001",
            Self::UnmappableCategory => "CAT001",
            Self::DisallowedCategory => "CAT002",
            Self::AmbiguousCategory => "CAT003",
            Self::NotText => "NUM001",
            Self::UnrecognizedNumber => "NUM002",
            Self::RangeCollapsed => "NUM003",
            Self::OutOfRange => "NUM004",
            Self::MissingCompositePart => "CMP001",
            Self::UnresolvedPerson => "PER001",
        }
    }

    /// Severity every diagnostic of this kind is raised with.
    pub fn severity(&self) -> Severity {
        match self {
            Self::UnsupportedFormat | Self::UnreadableFile | Self::MissingIdentifier => {
                Severity::Error
            }
            Self::AmbiguousCategory | Self::RangeCollapsed => Severity::Info,
            Self::UnmappableCategory
            | Self::DisallowedCategory
            | Self::NotText
            | Self::UnrecognizedNumber
            | Self::OutOfRange
            | Self::MissingCompositePart
            | Self::UnresolvedPerson => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A single diagnostic with whatever location context is known.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: DiagnosticCode,
    pub message: String,
    pub column: Option<String>,
    pub handling_id: Option<String>,
    pub row: Option<usize>,
    pub file: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a diagnostic with the default severity of its code.
    pub fn new(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: code.severity(),
            code,
            message: message.into(),
            column: None,
            handling_id: None,
            row: None,
            file: None,
        }
    }

    #[must_use]
    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    /// Attribute to a row identifier unless one is already set.
    #[must_use]
    pub fn with_handling_id(mut self, handling_id: &str) -> Self {
        if self.handling_id.is_none() {
            self.handling_id = Some(handling_id.to_string());
        }
        self
    }

    #[must_use]
    pub fn with_row(mut self, row: usize) -> Self {
        self.row = Some(row);
        self
    }

    #[must_use]
    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(file) = &self.file {
            write!(f, " (file {}", file.display())?;
            if let Some(row) = self.row {
                write!(f, ", row {row}")?;
            }
            f.write_str(")")?;
        } else if let Some(row) = self.row {
            write!(f, " (row {row})")?;
        }
        if let Some(id) = &self.handling_id {
            write!(f, " [id {id}]")?;
        }
        Ok(())
    }
}

/// Ordered collection of diagnostics with severity counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticLog {
    pub entries: Vec<Diagnostic>,
}

impl DiagnosticLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.entries.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.severity == severity)
            .count()
    }

    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    pub fn info_count(&self) -> usize {
        self.count(Severity::Info)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }
}

impl Extend<Diagnostic> for DiagnosticLog {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.entries.extend(iter);
    }
}

impl<'a> IntoIterator for &'a DiagnosticLog {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
