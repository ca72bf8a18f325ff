use std::collections::BTreeMap;

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use chem_model::{DiagnosticCode, Severity};
use chem_transform::{FileReport, FileStatus};

use crate::commands::ConvertResult;

/// Print the per-file summary and the grouped issue table to stderr.
///
/// Stdout is reserved for entity output.
pub fn print_summary(result: &ConvertResult) {
    match (&result.output, result.dry_run) {
        (_, true) => eprintln!("Output: dry run, no entities written"),
        (Some(path), false) => eprintln!("Output: {}", path.display()),
        (None, false) => eprintln!("Output: stdout"),
    }
    if let Some(path) = &result.report_path {
        eprintln!("Report: {}", path.display());
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Status"),
        header_cell("Rows"),
        header_cell("Entities"),
        header_cell("Dropped"),
        header_cell("Errors"),
        header_cell("Warnings"),
        header_cell("Info"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 2..8 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    align_column(&mut table, 1, CellAlignment::Center);

    let mut totals = [0usize; 6];
    for file in &result.report.files {
        let counts = [
            file.rows_read,
            file.entities_emitted,
            file.rows_dropped,
            file.count(Severity::Error),
            file.count(Severity::Warning),
            file.count(Severity::Info),
        ];
        for (total, count) in totals.iter_mut().zip(counts) {
            *total += count;
        }
        table.add_row(file_row(file, counts));
    }
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(totals[0]).add_attribute(Attribute::Bold),
        Cell::new(totals[1]).add_attribute(Attribute::Bold),
        count_cell(totals[2], Color::Red).add_attribute(Attribute::Bold),
        count_cell(totals[3], Color::Red).add_attribute(Attribute::Bold),
        count_cell(totals[4], Color::Yellow).add_attribute(Attribute::Bold),
        count_cell(totals[5], Color::Blue).add_attribute(Attribute::Bold),
    ]);
    eprintln!("{table}");
    print_issue_table(result);
}

fn file_row(file: &FileReport, counts: [usize; 6]) -> Vec<Cell> {
    let name = file
        .path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.path.display().to_string());
    vec![
        Cell::new(name).fg(Color::Blue).add_attribute(Attribute::Bold),
        status_cell(file.status),
        Cell::new(counts[0]),
        Cell::new(counts[1]),
        count_cell(counts[2], Color::Red),
        count_cell(counts[3], Color::Red),
        count_cell(counts[4], Color::Yellow),
        count_cell(counts[5], Color::Blue),
    ]
}

/// One line per diagnostic code and column with an example message.
fn print_issue_table(result: &ConvertResult) {
    let mut groups: BTreeMap<(Severity, DiagnosticCode, String), (usize, String)> = BTreeMap::new();
    for diagnostic in &result.report.diagnostics() {
        let key = (
            diagnostic.severity,
            diagnostic.code,
            diagnostic.column.clone().unwrap_or_default(),
        );
        groups
            .entry(key)
            .or_insert_with(|| (0, diagnostic.message.clone()))
            .0 += 1;
    }
    if groups.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Code"),
        header_cell("Column"),
        header_cell("Count"),
        header_cell("Example"),
    ]);
    apply_issue_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    // Most severe first
    for ((severity, code, column), (count, example)) in groups.into_iter().rev() {
        let column_cell = if column.is_empty() {
            dim_cell("-")
        } else {
            Cell::new(column)
        };
        table.add_row(vec![
            severity_cell(severity),
            Cell::new(code.id()),
            column_cell,
            Cell::new(count).fg(severity_color(severity)),
            Cell::new(example),
        ]);
    }
    eprintln!();
    eprintln!("Issues:");
    eprintln!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
}

fn apply_issue_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn status_cell(status: FileStatus) -> Cell {
    match status {
        FileStatus::Processed => Cell::new("✓").fg(Color::Green),
        FileStatus::Unsupported | FileStatus::Unreadable => Cell::new(status.label())
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
    }
}

fn severity_cell(severity: Severity) -> Cell {
    match severity {
        Severity::Error => Cell::new("ERROR")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold),
        Severity::Warning => Cell::new("WARN").fg(Color::Yellow),
        Severity::Info => Cell::new("INFO").fg(Color::Blue),
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Blue,
    }
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
