//! Diagnostics report as CSV.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use chem_model::Diagnostic;

/// Column order of the report.
pub const REPORT_HEADER: [&str; 7] = [
    "severity",
    "code",
    "file",
    "row",
    "handling_id",
    "column",
    "message",
];

/// Write one CSV record per diagnostic, header first even when empty.
pub fn write_report<'a, W, I>(writer: W, diagnostics: I) -> csv::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Diagnostic>,
{
    let mut csv_writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    csv_writer.write_record(REPORT_HEADER)?;
    for diagnostic in diagnostics {
        let file = diagnostic
            .file
            .as_deref()
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        let row = diagnostic
            .row
            .map(|row| row.to_string())
            .unwrap_or_default();
        csv_writer.write_record([
            diagnostic.severity.label(),
            diagnostic.code.id(),
            file.as_str(),
            row.as_str(),
            diagnostic.handling_id.as_deref().unwrap_or_default(),
            diagnostic.column.as_deref().unwrap_or_default(),
            diagnostic.message.as_str(),
        ])?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write the report to `path`, replacing any existing file.
pub fn write_report_file<'a, I>(path: &Path, diagnostics: I) -> csv::Result<()>
where
    I: IntoIterator<Item = &'a Diagnostic>,
{
    let file = File::create(path)?;
    write_report(io::BufWriter::new(file), diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chem_model::DiagnosticCode;

    #[test]
    fn empty_report_has_header_only() {
        let mut buffer = Vec::new();
        write_report(&mut buffer, &Vec::<Diagnostic>::new()).expect("write report");
        assert_eq!(
            String::from_utf8(buffer).expect("utf8"),
            "severity,code,file,row,handling_id,column,message\n"
        );
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let diagnostics = vec![
            Diagnostic::new(
                DiagnosticCode::AmbiguousCategory,
                "chose PC21 from 'PC99, PC21', discarded PC99",
            )
            .with_column("Produktkategorie")
            .with_handling_id("0042")
            .with_row(3),
        ];
        let mut buffer = Vec::new();
        write_report(&mut buffer, &diagnostics).expect("write report");
        let text = String::from_utf8(buffer).expect("utf8");
        insta::assert_snapshot!(text, @r#"
        severity,code,file,row,handling_id,column,message
        Info,CAT003,,3,0042,Produktkategorie,"chose PC21 from 'PC99, PC21', discarded PC99"
        "#);
    }
}
