//! End-to-end conversion of a real workbook.

use std::path::{Path, PathBuf};

use chem_cli::output::entities_json;
use chem_cli::report::write_report_file;
use chem_ingest::{XlsxReader, expand_inputs};
use chem_model::{Chemical, ParserProfile};
use chem_transform::{BatchPipeline, FileStatus};
use rust_xlsxwriter::Workbook;

const HEADERS: [&str; 12] = [
    "Umgang-Id",
    "Organisationseinheit",
    "Produktname",
    "Konzentration",
    "Produktkategorie",
    "AntragstellerIn",
    "H-Sätze",
    "Liegenschaft",
    "Haus",
    "Etage",
    "Raum-Nr",
    "Bemerkung",
];

fn write_export(path: &Path) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in HEADERS.iter().enumerate() {
        sheet
            .write_string(0, col as u16, *header)
            .expect("write header");
    }
    let rows: [[&str; 12]; 3] = [
        [
            "", "4.1", "Ethanol", "70%", "PC21", "Schmidt, Anna", "H225", "ACZ", "12", "2", "204",
            "",
        ],
        [
            "", "4.1", "Aceton", "99%", "PC21", "Schmidt, Anna", "", "ACZ", "12", "2", "204",
            "",
        ],
        [
            "", "4.1", "Toluol", "5-10%", "PC99 PC21", "Meier Jonas", "", "ACZ", "", "1", "101",
            "kühl lagern",
        ],
    ];
    for (idx, row) in rows.iter().enumerate() {
        let sheet_row = (idx + 1) as u32;
        for (col, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet
                    .write_string(sheet_row, col as u16, *value)
                    .expect("write cell");
            }
        }
    }
    // Handling ids as numbers, the way the export writes them; row 3 has none.
    sheet.write_number(1, 0, 12.0).expect("write id");
    sheet.write_number(3, 0, 3.0).expect("write id");
    workbook.save(path).expect("save workbook");
}

fn convert(inputs: &[PathBuf]) -> (Vec<Chemical>, chem_transform::BatchReport) {
    let profile = ParserProfile::default();
    let files = expand_inputs(inputs, &profile.files).expect("expand inputs");
    let pipeline = BatchPipeline::new(&profile, XlsxReader);
    let mut chemicals = Vec::new();
    let report = pipeline.run(&files, &mut chemicals);
    (chemicals, report)
}

#[test]
fn converts_workbook_and_reports_diagnostics() {
    let dir = tempfile::tempdir().expect("temp dir");
    write_export(&dir.path().join("inventar.xlsx"));
    let inputs = vec![dir.path().to_path_buf(), dir.path().join("legacy.csv")];

    let (chemicals, report) = convert(&inputs);

    let ids: Vec<&str> = chemicals.iter().map(|c| c.handling_id.as_str()).collect();
    assert_eq!(ids, vec!["0012", "0003"]);
    assert_eq!(report.files.len(), 2);
    assert_eq!(report.files[0].status, FileStatus::Processed);
    assert_eq!(report.files[0].rows_read, 3);
    assert_eq!(report.files[0].rows_dropped, 1);
    assert_eq!(report.files[1].status, FileStatus::Unsupported);
    assert!(report.has_errors());

    let report_path = dir.path().join("report.csv");
    write_report_file(&report_path, &report.diagnostics()).expect("write report");
    let mut reader = csv::Reader::from_path(&report_path).expect("open report");
    let lines: Vec<String> = reader
        .records()
        .map(|record| {
            let record = record.expect("record");
            [0, 1, 3, 4, 5]
                .iter()
                .map(|idx| record.get(*idx).unwrap_or_default())
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect();
    insta::assert_snapshot!(lines.join("\n"), @r"
    Error,ROW001,3,,Umgang-Id
    Info,NUM003,4,0003,Konzentration
    Warning,PER001,4,0003,AntragstellerIn
    Info,CAT003,4,0003,Produktkategorie
    Warning,CMP001,4,0003,Haus
    Error,FILE001,,,
    ");
}

#[test]
fn entities_serialize_as_json_array() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("inventar.xlsx");
    write_export(&path);

    let (chemicals, _) = convert(&[path]);
    let json = entities_json(&chemicals).expect("render json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("parse json");

    let first = &value[0];
    assert_eq!(first["code"], "CHEM-4.1-0012");
    assert_eq!(first["bam_oe"], "OE_4.1");
    assert_eq!(first["responsible_person"], "/BAM_GLOBAL/BAM_DATA/ASCHMIDT");
    assert_eq!(first["hazardous_substance"], true);
    assert_eq!(first["attributes"]["concentration"], 70.0);
    assert_eq!(first["attributes"]["name"], "Ethanol");
    assert_eq!(first["bam_location_complete"], "ACZ_12_2_204");
    assert_eq!(first["notes"], "Bemerkung: None");

    let second = &value[1];
    assert_eq!(second["product_category"], "PC21");
    assert_eq!(second["attributes"]["concentration"], 0.0);
    assert_eq!(second["notes"], "Bemerkung: kühl lagern");
    assert!(second.get("responsible_person").is_none());
    assert_eq!(second["bam_location_complete"], "ACZ_1_101");
}
