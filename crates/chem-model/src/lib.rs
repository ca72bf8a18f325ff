pub mod chemical;
pub mod diagnostic;
pub mod options;
pub mod table;

pub use chemical::{Chemical, ChemicalSink, FieldValue};
pub use diagnostic::{Diagnostic, DiagnosticCode, DiagnosticLog, Severity};
pub use options::{
    CategoryOptions, CodeOptions, ColumnMapping, FileOptions, HazardOptions, IdentityOptions,
    KeyColumns, LocationOptions, NameFormat, NoteOptions, NumericKind, ParserProfile,
    ResponsibleSource,
};
pub use table::{CellValue, RawRow, SourceTable};
